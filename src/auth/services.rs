use axum_extra::extract::cookie::{Cookie, SameSite};
use lazy_static::lazy_static;
use regex::Regex;
use time::Duration;

use crate::auth::repo_types::User;
use crate::session::extractors::SESSION_COOKIE;
use crate::session::identity::IdentitySnapshot;
use crate::session::store::Session;
use crate::state::AppState;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Open a session for a signed-in user and build the cookie that names it.
pub(crate) async fn open_session(
    state: &AppState,
    email: &str,
) -> anyhow::Result<(Session, Cookie<'static>)> {
    let ttl_hours = state.config.session.ttl_hours;
    let session = Session::create(&state.db, Some(email), ttl_hours).await?;
    let cookie = Cookie::build((SESSION_COOKIE, session.token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(!state.config.development)
        .max_age(Duration::hours(ttl_hours))
        .build();
    Ok((session, cookie))
}

pub(crate) fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(Duration::ZERO)
        .build()
}

pub(crate) fn snapshot_of(user: &User) -> IdentitySnapshot {
    IdentitySnapshot::new(
        &user.username,
        &user.email,
        Some(user.balance),
        Some(&user.role),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+tag@mail.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("alice@"));
        assert!(!is_valid_email("alice@example"));
        assert!(!is_valid_email("al ice@example.com"));
    }
}
