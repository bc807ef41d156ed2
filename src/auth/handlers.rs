use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, MeResponse, SigninRequest, SignupRequest, TopupRequest},
        oauth,
        password::{hash_password, verify_password},
        repo_types::User,
        services::{clear_session_cookie, is_valid_email, open_session, snapshot_of},
    },
    error::{is_unique_violation, AppError, AppResult},
    session::{identity, AuthSession, CurrentSession, Session},
    state::AppState,
};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/user/signup", post(signup))
        .route("/user/signin", post(signin))
        .route("/user/signout", post(signout))
        .route("/user/me", get(me))
        .route("/user/topup", post(topup))
}

pub fn oauth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/google", get(google_redirect))
        .route("/auth/google/callback", get(google_callback))
}

#[instrument(skip(state, jar, payload))]
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(mut payload): Json<SignupRequest>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    payload.email = payload.email.trim().to_lowercase();
    payload.username = payload.username.trim().to_string();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }
    if payload.username.is_empty() {
        return Err(AppError::Validation("Username is required".into()));
    }
    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(AppError::Validation("Password too short".into()));
    }

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&payload.password)?;
    // The pre-check above races with concurrent signups; the unique index
    // on email is the arbiter.
    let user = match User::create(&state.db, &payload.username, &payload.email, &hash).await {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %payload.email, "email already registered (concurrent signup)");
            return Err(AppError::Conflict("Email already registered".into()));
        }
        Err(e) => return Err(e.into()),
    };
    let (_, cookie) = open_session(&state, &user.email).await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        jar.add(cookie),
        Json(AuthResponse {
            user: snapshot_of(&user),
        }),
    ))
}

#[instrument(skip(state, jar, payload))]
pub async fn signin(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(mut payload): Json<SigninRequest>,
) -> AppResult<(CookieJar, Json<AuthResponse>)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }

    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "signin unknown email");
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        }
    };

    // OAuth-only accounts have no hash; same generic rejection.
    let ok = match user.password_hash.as_deref() {
        Some(hash) => verify_password(&payload.password, hash)?,
        None => false,
    };
    if !ok {
        warn!(email = %payload.email, user_id = %user.id, "signin invalid password");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let (_, cookie) = open_session(&state, &user.email).await?;

    info!(user_id = %user.id, email = %user.email, "user signed in");
    Ok((
        jar.add(cookie),
        Json(AuthResponse {
            user: snapshot_of(&user),
        }),
    ))
}

#[instrument(skip(state, jar, current))]
pub async fn signout(
    State(state): State<AppState>,
    jar: CookieJar,
    current: CurrentSession,
) -> AppResult<(CookieJar, Json<Value>)> {
    if let CurrentSession(Some(session)) = current {
        Session::destroy(&state.db, &session.token).await?;
        info!("session destroyed");
    }
    Ok((
        jar.add(clear_session_cookie()),
        Json(json!({ "status": "success" })),
    ))
}

/// Resolved identity for the caller, `null` when anonymous. Uses the
/// session-cached snapshot; always 200.
#[instrument(skip(state, current))]
pub async fn me(State(state): State<AppState>, current: CurrentSession) -> Json<MeResponse> {
    let user = match current {
        CurrentSession(Some(mut session)) => identity::resolve(&state.db, &mut session).await,
        CurrentSession(None) => None,
    };
    Json(MeResponse { user })
}

/// Balance top-up. Payment verification happens upstream; this endpoint
/// records the credited amount. The session identity cache is deliberately
/// not invalidated here (5-minute window only).
#[instrument(skip(state, auth, payload))]
pub async fn topup(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(payload): Json<TopupRequest>,
) -> AppResult<Json<AuthResponse>> {
    if !payload.amount.is_finite() || payload.amount <= 0.0 {
        return Err(AppError::Validation("Amount must be positive".into()));
    }

    let user = User::find_by_email(&state.db, &auth.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Sign in required".into()))?;

    User::credit(&state.db, user.id, payload.amount).await?;
    let user = User::find_by_email(&state.db, &auth.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Sign in required".into()))?;

    info!(user_id = %user.id, amount = payload.amount, "balance credited");
    Ok(Json(AuthResponse {
        user: snapshot_of(&user),
    }))
}

#[instrument(skip(state))]
pub async fn google_redirect(State(state): State<AppState>) -> AppResult<Redirect> {
    let google = state
        .config
        .google
        .as_ref()
        .ok_or_else(|| AppError::Validation("Google sign-in is not configured".into()))?;
    let url = oauth::authorize_url(google)?;
    Ok(Redirect::temporary(&url))
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: String,
}

#[instrument(skip(state, jar, query))]
pub async fn google_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> AppResult<(CookieJar, Redirect)> {
    let google = state
        .config
        .google
        .as_ref()
        .ok_or_else(|| AppError::Validation("Google sign-in is not configured".into()))?;

    let profile = oauth::exchange_code(google, &query.code).await?;
    let user = User::upsert_oauth(&state.db, &profile.name, &profile.email).await?;
    let (_, cookie) = open_session(&state, &user.email).await?;

    info!(user_id = %user.id, email = %user.email, "oauth sign-in");
    Ok((jar.add(cookie), Redirect::to("/user/dashboard")))
}
