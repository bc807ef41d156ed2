use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::repo_types::User,
    catalog::repo_types::Service,
    error::{AppError, AppResult},
    orders::{
        dto::{CheckResponse, OrderItem, OrderRequest, Pagination},
        repo, services,
    },
    session::AuthSession,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/user/orders", get(list_orders))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/user/orders", post(create_order))
        .route("/user/orders/:id/check", post(check_order))
}

#[instrument(skip(state, auth))]
pub async fn list_orders(
    State(state): State<AppState>,
    auth: AuthSession,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<OrderItem>>> {
    let user = User::find_by_email(&state.db, &auth.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Sign in required".into()))?;

    let page = page.clamped();
    let orders = repo::list_by_user(&state.db, user.id, page.limit, page.offset).await?;
    Ok(Json(orders.into_iter().map(OrderItem::from).collect()))
}

#[instrument(skip(state, auth, payload))]
pub async fn create_order(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(payload): Json<OrderRequest>,
) -> AppResult<(StatusCode, Json<OrderItem>)> {
    let user = User::find_by_email(&state.db, &auth.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Sign in required".into()))?;

    let service = Service::find_by_name(&state.db, &payload.service)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".into()))?;
    if !service.is_available() {
        return Err(AppError::Validation("Service is not available".into()));
    }

    let order = services::purchase(&state, user.id, &service, &payload.country).await?;

    info!(
        user_id = %user.id,
        order_id = %order.id,
        service = %order.service,
        "order placed"
    );
    Ok((StatusCode::CREATED, Json(OrderItem::from(order))))
}

#[instrument(skip(state, auth))]
pub async fn check_order(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CheckResponse>> {
    let user = User::find_by_email(&state.db, &auth.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Sign in required".into()))?;

    let order = repo::find_for_user(&state.db, user.id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".into()))?;

    let (order, sms_code) = services::check(&state, order).await?;
    Ok(Json(CheckResponse {
        order: OrderItem::from(order),
        sms_code,
    }))
}
