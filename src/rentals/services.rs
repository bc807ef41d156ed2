use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    auth::repo_types::User,
    catalog::repo_types::Service,
    error::{AppError, AppResult},
    rentals::{repo, repo_types::{Rental, RentalDuration}},
    state::AppState,
};

/// Purchase a rental: price from the catalog tier, balance debit and insert
/// in one transaction, expiry computed from the purchase instant.
pub async fn purchase(
    state: &AppState,
    user_id: Uuid,
    service: &Service,
    duration: RentalDuration,
    target_state: &str,
) -> AppResult<Rental> {
    let price = service.price_for(duration);
    let now = OffsetDateTime::now_utc();
    let expires_at = now + duration.length();

    let mut tx = state.db.begin().await?;
    let debited = User::debit(&mut *tx, user_id, price).await?;
    if !debited {
        return Err(AppError::InsufficientBalance);
    }
    let rental = repo::create(
        &mut *tx,
        user_id,
        &service.name,
        target_state,
        duration,
        price,
        expires_at,
    )
    .await?;
    tx.commit().await?;

    Ok(rental)
}
