use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::{
    catalog::repo_types::Service,
    error::AppResult,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/services", get(list_services))
}

#[derive(Debug, Serialize)]
pub struct ServiceItem {
    pub name: String,
    pub price: f64,
    pub short_price: f64,
    pub long_price: f64,
    pub available: bool,
}

impl From<Service> for ServiceItem {
    fn from(s: Service) -> Self {
        let available = s.is_available();
        Self {
            name: s.name,
            price: s.price,
            short_price: s.short_price,
            long_price: s.long_price,
            available,
        }
    }
}

#[instrument(skip(state))]
pub async fn list_services(State(state): State<AppState>) -> AppResult<Json<Vec<ServiceItem>>> {
    let services = Service::list(&state.db).await?;
    Ok(Json(services.into_iter().map(ServiceItem::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn item_normalizes_availability() {
        let item = ServiceItem::from(Service {
            id: Uuid::new_v4(),
            name: "Telegram".into(),
            price: 1.0,
            short_price: 1.0,
            long_price: 4.0,
            available: "0".into(),
        });
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""available":false"#));
    }
}
