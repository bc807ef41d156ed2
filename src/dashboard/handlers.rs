use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::{error, instrument};

use crate::{
    auth::repo_types::User,
    error::AppResult,
    orders::repo::OrderStats,
    rentals::repo::RentalStats,
    session::{identity, AuthSession, IdentitySnapshot},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/user/dashboard", get(dashboard))
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// `null` when the snapshot cannot be resolved (e.g. the account
    /// vanished); the page still renders.
    pub user: Option<IdentitySnapshot>,
    #[serde(flatten)]
    pub rentals: RentalStats,
    #[serde(flatten)]
    pub orders: OrderStats,
}

/// Dashboard data: identity snapshot plus rental/order counts. The two
/// counts are independent reads with no mutual consistency guarantee, and
/// either tracker failing degrades to zeros rather than failing the page.
#[instrument(skip(state, auth))]
pub async fn dashboard(
    State(state): State<AppState>,
    auth: AuthSession,
) -> AppResult<Json<DashboardResponse>> {
    let mut session = auth.session;
    let user = identity::resolve(&state.db, &mut session).await;

    let (rentals, orders) = match User::find_by_email(&state.db, &auth.email).await {
        Ok(Some(db_user)) => {
            let rentals = crate::rentals::repo::stats_for_user(&state.db, db_user.id)
                .await
                .unwrap_or_else(|e| {
                    error!(error = %e, user_id = %db_user.id, "rental stats failed");
                    RentalStats::default()
                });
            let orders = crate::orders::repo::stats_for_user(&state.db, db_user.id)
                .await
                .unwrap_or_else(|e| {
                    error!(error = %e, user_id = %db_user.id, "order stats failed");
                    OrderStats::default()
                });
            (rentals, orders)
        }
        Ok(None) => (RentalStats::default(), OrderStats::default()),
        Err(e) => {
            error!(error = %e, email = %auth.email, "dashboard user lookup failed");
            (RentalStats::default(), OrderStats::default())
        }
    };

    Ok(Json(DashboardResponse {
        user,
        rentals,
        orders,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_flatten_into_the_top_level() {
        let response = DashboardResponse {
            user: None,
            rentals: RentalStats {
                total_rentals: 2,
                active_rentals: 1,
            },
            orders: OrderStats {
                total_orders: 3,
                success_orders: 1,
            },
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""user":null"#));
        assert!(json.contains(r#""total_rentals":2"#));
        assert!(json.contains(r#""active_rentals":1"#));
        assert!(json.contains(r#""total_orders":3"#));
        assert!(json.contains(r#""success_orders":1"#));
    }
}
