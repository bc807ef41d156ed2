use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use tracing::error;

use crate::error::AppError;
use crate::session::store::Session;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "sid";

/// The caller's session, if the `sid` cookie names a live one. Never rejects;
/// store errors degrade to an anonymous request.
pub struct CurrentSession(pub Option<Session>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = match CookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };

        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Ok(CurrentSession(None));
        };

        match Session::load(&state.db, cookie.value()).await {
            Ok(session) => Ok(CurrentSession(session)),
            Err(e) => {
                error!(error = %e, "session load failed");
                Ok(CurrentSession(None))
            }
        }
    }
}

/// A session with a signed-in user. Rejects with 401 otherwise.
pub struct AuthSession {
    pub session: Session,
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentSession(session) = match CurrentSession::from_request_parts(parts, state).await {
            Ok(current) => current,
            Err(never) => match never {},
        };

        let session =
            session.ok_or_else(|| AppError::Unauthorized("Sign in required".to_string()))?;
        let email = session
            .user_email
            .clone()
            .ok_or_else(|| AppError::Unauthorized("Sign in required".to_string()))?;

        Ok(AuthSession { session, email })
    }
}
