use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::repo_types::User,
    catalog::repo_types::Service,
    error::{AppError, AppResult},
    orders::{
        repo,
        repo_types::{Order, OrderStatus},
    },
    provisioner::SmsPoll,
    state::AppState,
};

/// Purchase a single-use number: ask the provider for a number (it may still
/// be provisioning), then debit and insert the pending order in one
/// transaction.
pub async fn purchase(
    state: &AppState,
    user_id: Uuid,
    service: &Service,
    country: &str,
) -> AppResult<Order> {
    let number = state
        .provisioner
        .provision(&service.name, country)
        .await
        .map_err(AppError::Internal)?;

    let mut tx = state.db.begin().await?;
    let debited = User::debit(&mut *tx, user_id, service.price).await?;
    if !debited {
        return Err(AppError::InsufficientBalance);
    }
    let order = repo::create(
        &mut *tx,
        user_id,
        &service.name,
        country,
        number.as_deref(),
        service.price,
    )
    .await?;
    tx.commit().await?;

    Ok(order)
}

/// Poll the provider for a pending order and apply the resulting transition.
/// Terminal orders come back unchanged; there is no way out of `completed`
/// or `failed`.
pub async fn check(state: &AppState, order: Order) -> AppResult<(Order, Option<String>)> {
    let current = order.status();
    if current.is_terminal() {
        return Ok((order, None));
    }

    let Some(number) = order.number.clone() else {
        // Still provisioning; nothing to poll yet.
        return Ok((order, None));
    };

    let poll = state
        .provisioner
        .poll_sms(&number)
        .await
        .map_err(AppError::Internal)?;

    let (next, code) = match poll {
        SmsPoll::Delivered(code) => (Some(OrderStatus::Completed), Some(code)),
        SmsPoll::Expired => (Some(OrderStatus::Failed), None),
        SmsPoll::Waiting => (None, None),
    };

    let Some(next) = next else {
        return Ok((order, None));
    };

    if !current.can_become(next) {
        warn!(order_id = %order.id, from = current.as_str(), to = next.as_str(), "illegal order transition ignored");
        return Ok((order, None));
    }

    let order = repo::set_status(&state.db, order.id, next).await?;
    info!(order_id = %order.id, status = next.as_str(), "order transitioned");
    Ok((order, code))
}
