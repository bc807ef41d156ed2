use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;

use crate::config::GoogleConfig;

const AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// The fixed internal record a provider profile is projected into. Nothing
/// provider-shaped leaks past this module.
#[derive(Debug, Clone)]
pub struct OAuthProfile {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

pub fn authorize_url(config: &GoogleConfig) -> anyhow::Result<String> {
    let url = reqwest::Url::parse_with_params(
        AUTHORIZE_URL,
        &[
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", config.redirect_url.as_str()),
            ("response_type", "code"),
            ("scope", "openid email profile"),
        ],
    )
    .context("build authorize url")?;
    Ok(url.to_string())
}

/// Exchange an authorization code for a projected profile.
pub async fn exchange_code(config: &GoogleConfig, code: &str) -> anyhow::Result<OAuthProfile> {
    let client = reqwest::Client::new();

    let token: TokenResponse = client
        .post(TOKEN_URL)
        .form(&[
            ("code", code),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("redirect_uri", config.redirect_url.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await
        .context("oauth token request")?
        .error_for_status()
        .context("oauth token exchange rejected")?
        .json()
        .await
        .context("decode token response")?;

    // The profile payload is treated as opaque JSON and projected right here.
    let profile: Value = client
        .get(USERINFO_URL)
        .bearer_auth(&token.access_token)
        .send()
        .await
        .context("userinfo request")?
        .error_for_status()
        .context("userinfo rejected")?
        .json()
        .await
        .context("decode userinfo")?;

    project_profile(&profile)
}

fn project_profile(payload: &Value) -> anyhow::Result<OAuthProfile> {
    let email = payload
        .get("email")
        .and_then(Value::as_str)
        .context("provider profile has no email")?
        .trim()
        .to_lowercase();
    let name = payload
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());
    Ok(OAuthProfile { email, name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn projects_email_and_name() {
        let profile = project_profile(&json!({
            "sub": "123",
            "email": "Alice@Example.com",
            "name": "Alice A.",
            "picture": "https://example.com/p.png"
        }))
        .unwrap();
        assert_eq!(profile.email, "alice@example.com");
        assert_eq!(profile.name, "Alice A.");
    }

    #[test]
    fn falls_back_to_email_local_part_for_name() {
        let profile = project_profile(&json!({ "email": "bob@example.com" })).unwrap();
        assert_eq!(profile.name, "bob");
    }

    #[test]
    fn missing_email_is_an_error() {
        assert!(project_profile(&json!({ "name": "nobody" })).is_err());
    }
}
