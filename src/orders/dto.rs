use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::orders::repo_types::Order;

#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    pub service: String,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    "US".into()
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

pub const MAX_PAGE_SIZE: i64 = 100;

impl Pagination {
    /// Bound the page and floor the offset before SQL sees them.
    pub fn clamped(self) -> Pagination {
        Pagination {
            limit: self.limit.clamp(1, MAX_PAGE_SIZE),
            offset: self.offset.max(0),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub service: String,
    pub country: String,
    pub number: Option<String>,
    pub amount: f64,
    pub status: String,
    pub created_at: OffsetDateTime,
}

impl From<Order> for OrderItem {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            service: o.service,
            country: o.country,
            number: o.number,
            amount: o.amount,
            status: o.status,
            created_at: o.created_at,
        }
    }
}

/// Result of an SMS check: the (possibly transitioned) order and the code
/// when one arrived.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub order: OrderItem,
    pub sms_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_clamps_hostile_values() {
        let page = Pagination {
            limit: -1,
            offset: -9,
        }
        .clamped();
        assert_eq!(page.limit, 1);
        assert_eq!(page.offset, 0);

        let page = Pagination {
            limit: 500,
            offset: 20,
        }
        .clamped();
        assert_eq!(page.limit, MAX_PAGE_SIZE);
        assert_eq!(page.offset, 20);
    }

    #[test]
    fn provisioning_order_serializes_number_as_null() {
        let item = OrderItem::from(Order {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            service: "Facebook".into(),
            country: "US".into(),
            number: None,
            amount: 1.75,
            status: "pending".into(),
            created_at: OffsetDateTime::now_utc(),
        });
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""number":null"#));
        assert!(json.contains(r#""status":"pending""#));
    }
}
