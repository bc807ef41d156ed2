use serde::{Deserialize, Serialize};

use crate::session::identity::IdentitySnapshot;

/// Request body for local registration.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for local sign-in.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Request body for a balance top-up (payment verification happens upstream).
#[derive(Debug, Deserialize)]
pub struct TopupRequest {
    pub amount: f64,
}

/// Returned after signup/signin; the session token rides in the cookie.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: IdentitySnapshot,
}

/// Current identity for the session, `null` when anonymous.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Option<IdentitySnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn me_response_serializes_anonymous_as_null() {
        let json = serde_json::to_string(&MeResponse { user: None }).unwrap();
        assert_eq!(json, r#"{"user":null}"#);
    }

    #[test]
    fn auth_response_carries_display_fields() {
        let response = AuthResponse {
            user: IdentitySnapshot::new("alice", "alice@example.com", Some(1.5), None),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""balance":"1.50""#));
        assert!(json.contains(r#""role":"Member""#));
    }
}
