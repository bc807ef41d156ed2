use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::auth::repo_types::User;

const USER_COLUMNS: &str = "id, username, email, password_hash, balance, role, created_at";

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = $1
            "#
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new local-credentials user.
    pub async fn create(
        db: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Fetch-or-create for OAuth sign-in. An existing account keeps its
    /// username and balance; only brand-new rows take the provider's name.
    pub async fn upsert_oauth(db: &PgPool, username: &str, email: &str) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email)
            VALUES ($1, $2)
            ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(username)
        .bind(email)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Debit the balance if it covers `amount`. Returns false when it does
    /// not; the row is untouched in that case.
    pub async fn debit(
        exec: impl PgExecutor<'_>,
        user_id: Uuid,
        amount: f64,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET balance = balance - $2
            WHERE id = $1 AND balance >= $2
            "#,
        )
        .bind(user_id)
        .bind(amount)
        .execute(exec)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Credit a top-up or admin adjustment.
    pub async fn credit(exec: impl PgExecutor<'_>, user_id: Uuid, amount: f64) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET balance = balance + $2 WHERE id = $1")
            .bind(user_id)
            .bind(amount)
            .execute(exec)
            .await?;
        Ok(())
    }
}
