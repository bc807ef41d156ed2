use sqlx::PgPool;

use crate::catalog::repo_types::Service;

const SERVICE_COLUMNS: &str = "id, name, price, short_price, long_price, available";

impl Service {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Service>> {
        let rows = sqlx::query_as::<_, Service>(&format!(
            r#"
            SELECT {SERVICE_COLUMNS}
            FROM services
            ORDER BY name
            "#
        ))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_name(db: &PgPool, name: &str) -> anyhow::Result<Option<Service>> {
        let row = sqlx::query_as::<_, Service>(&format!(
            r#"
            SELECT {SERVICE_COLUMNS}
            FROM services
            WHERE name = $1
            "#
        ))
        .bind(name)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }
}
