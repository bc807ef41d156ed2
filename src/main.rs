mod app;
mod auth;
mod catalog;
mod config;
mod dashboard;
mod error;
mod orders;
mod provisioner;
mod rentals;
mod session;
mod state;

use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "numrent=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = state::AppState::init().await?;

    if let Err(e) = sqlx::migrate!("./migrations").run(&app_state.db).await {
        tracing::warn!(error = %e, "migrations folder not found or migration failed; continuing");
    }

    // Hourly hygiene: flip stale rental labels and drop expired sessions.
    // Reads never depend on this; expiry is reconciled at query time.
    let hygiene_db = app_state.db.clone();
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_secs(3600));
        loop {
            tick.tick().await;
            match rentals::repo::reconcile_expired(&hygiene_db).await {
                Ok(n) if n > 0 => tracing::info!(rentals = n, "expired rental labels reconciled"),
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "rental reconciliation failed"),
            }
            if let Err(e) = session::store::purge_expired(&hygiene_db).await {
                tracing::warn!(error = %e, "session purge failed");
            }
        }
    });

    let app = app::build_app(app_state);
    app::serve(app).await
}
