use sqlx::{types::Json, FromRow, PgPool};
use time::{Duration, OffsetDateTime};
use tracing::warn;
use uuid::Uuid;

use crate::session::identity::CachedIdentity;

/// Server-side session row. The token travels in an HttpOnly cookie; all
/// other fields stay in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub token: String,
    pub user_email: Option<String>,
    pub identity: Option<Json<CachedIdentity>>,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

const SESSION_COLUMNS: &str = "token, user_email, identity, created_at, expires_at";

impl Session {
    /// Open a new session. Expired rows are swept opportunistically here;
    /// there is no background cleaner.
    pub async fn create(
        db: &PgPool,
        user_email: Option<&str>,
        ttl_hours: i64,
    ) -> anyhow::Result<Session> {
        if let Err(e) = purge_expired(db).await {
            warn!(error = %e, "session purge failed; continuing");
        }

        let token = Uuid::new_v4().simple().to_string();
        let expires_at = OffsetDateTime::now_utc() + Duration::hours(ttl_hours);
        let session = sqlx::query_as::<_, Session>(&format!(
            r#"
            INSERT INTO sessions (token, user_email, expires_at)
            VALUES ($1, $2, $3)
            RETURNING {SESSION_COLUMNS}
            "#
        ))
        .bind(&token)
        .bind(user_email)
        .bind(expires_at)
        .fetch_one(db)
        .await?;
        Ok(session)
    }

    /// Load a live session by token. Expired rows are treated as absent.
    pub async fn load(db: &PgPool, token: &str) -> anyhow::Result<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(&format!(
            r#"
            SELECT {SESSION_COLUMNS}
            FROM sessions
            WHERE token = $1 AND expires_at > $2
            "#
        ))
        .bind(token)
        .bind(OffsetDateTime::now_utc())
        .fetch_optional(db)
        .await?;
        Ok(session)
    }

    /// Persist (or clear) the cached identity snapshot on this session.
    pub async fn save_identity(
        db: &PgPool,
        token: &str,
        identity: Option<&CachedIdentity>,
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE sessions SET identity = $2 WHERE token = $1")
            .bind(token)
            .bind(identity.map(Json))
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn destroy(db: &PgPool, token: &str) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(db)
            .await?;
        Ok(())
    }
}

pub async fn purge_expired(db: &PgPool) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
        .bind(OffsetDateTime::now_utc())
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
