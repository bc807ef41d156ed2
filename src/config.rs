use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub session: SessionConfig,
    /// Absent when Google sign-in is not configured; the /auth/google routes
    /// then answer with a validation error instead of redirecting.
    pub google: Option<GoogleConfig>,
    pub development: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let session = SessionConfig {
            ttl_hours: std::env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(24),
        };
        let google = match (
            std::env::var("GOOGLE_CLIENT_ID"),
            std::env::var("GOOGLE_CLIENT_SECRET"),
        ) {
            (Ok(client_id), Ok(client_secret)) => Some(GoogleConfig {
                client_id,
                client_secret,
                redirect_url: std::env::var("GOOGLE_CALLBACK_URL")
                    .unwrap_or_else(|_| "http://localhost:8080/auth/google/callback".into()),
            }),
            _ => None,
        };
        let development = std::env::var("APP_ENV")
            .map(|v| v == "development")
            .unwrap_or(false);
        Ok(Self {
            database_url,
            session,
            google,
            development,
        })
    }
}
