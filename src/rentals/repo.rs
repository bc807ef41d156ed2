use serde::Serialize;
use sqlx::{PgExecutor, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::rentals::repo_types::{Rental, RentalDuration, RentalStatus};

const RENTAL_COLUMNS: &str =
    "id, user_id, service, state, duration, price, status, expires_at, created_at";

/// Dashboard counts. An unknown user simply yields zeros.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RentalStats {
    pub total_rentals: i64,
    pub active_rentals: i64,
}

pub async fn stats_for_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<RentalStats> {
    let total_rentals =
        sqlx::query_scalar::<_, i64>("SELECT count(*) FROM rentals WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(db)
            .await?;

    // Both the label and the clock must agree; a stale "active" label past
    // its expiry is not counted.
    let active_rentals = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT count(*)
        FROM rentals
        WHERE user_id = $1 AND status = $2 AND expires_at > $3
        "#,
    )
    .bind(user_id)
    .bind(RentalStatus::Active.as_str())
    .bind(OffsetDateTime::now_utc())
    .fetch_one(db)
    .await?;

    Ok(RentalStats {
        total_rentals,
        active_rentals,
    })
}

pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Rental>> {
    let rows = sqlx::query_as::<_, Rental>(&format!(
        r#"
        SELECT {RENTAL_COLUMNS}
        FROM rentals
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    exec: impl PgExecutor<'_>,
    user_id: Uuid,
    service: &str,
    state: &str,
    duration: RentalDuration,
    price: f64,
    expires_at: OffsetDateTime,
) -> anyhow::Result<Rental> {
    let rental = sqlx::query_as::<_, Rental>(&format!(
        r#"
        INSERT INTO rentals (user_id, service, state, duration, price, status, expires_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {RENTAL_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(service)
    .bind(state)
    .bind(duration.as_str())
    .bind(price)
    .bind(RentalStatus::Active.as_str())
    .bind(expires_at)
    .fetch_one(exec)
    .await?;
    Ok(rental)
}

/// Status-field hygiene: flip stale "active" labels whose expiry has passed.
/// Correctness never depends on this; reads reconcile against the clock.
pub async fn reconcile_expired(db: &PgPool) -> anyhow::Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE rentals
        SET status = $1
        WHERE status = $2 AND expires_at <= $3
        "#,
    )
    .bind(RentalStatus::Expired.as_str())
    .bind(RentalStatus::Active.as_str())
    .bind(OffsetDateTime::now_utc())
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}
