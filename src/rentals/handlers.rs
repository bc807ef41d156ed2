use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::{
    auth::repo_types::User,
    catalog::repo_types::Service,
    error::{AppError, AppResult},
    rentals::{
        dto::{Pagination, RentRequest, RentalItem},
        repo,
        repo_types::RentalDuration,
        services,
    },
    session::AuthSession,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/user/rentals", get(list_rentals))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/user/rentals", post(create_rental))
}

#[instrument(skip(state, auth))]
pub async fn list_rentals(
    State(state): State<AppState>,
    auth: AuthSession,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<RentalItem>>> {
    let user = User::find_by_email(&state.db, &auth.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Sign in required".into()))?;

    let page = page.clamped();
    let rentals = repo::list_by_user(&state.db, user.id, page.limit, page.offset).await?;
    let now = OffsetDateTime::now_utc();
    let items = rentals
        .into_iter()
        .map(|r| RentalItem::from_rental(r, now))
        .collect();
    Ok(Json(items))
}

#[instrument(skip(state, auth, payload))]
pub async fn create_rental(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(payload): Json<RentRequest>,
) -> AppResult<(StatusCode, Json<RentalItem>)> {
    let duration = RentalDuration::parse(&payload.duration)
        .ok_or_else(|| AppError::Validation("Unknown duration".into()))?;

    let user = User::find_by_email(&state.db, &auth.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Sign in required".into()))?;

    let service = Service::find_by_name(&state.db, &payload.service)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".into()))?;
    if !service.is_available() {
        return Err(AppError::Validation("Service is not available".into()));
    }

    let rental = services::purchase(&state, user.id, &service, duration, &payload.state).await?;

    info!(
        user_id = %user.id,
        rental_id = %rental.id,
        service = %rental.service,
        duration = %rental.duration,
        "rental purchased"
    );
    let now = OffsetDateTime::now_utc();
    Ok((
        StatusCode::CREATED,
        Json(RentalItem::from_rental(rental, now)),
    ))
}
