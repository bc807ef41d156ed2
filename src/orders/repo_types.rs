use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Failed,
}

impl OrderStatus {
    pub fn parse(label: &str) -> Option<OrderStatus> {
        match label {
            "pending" => Some(OrderStatus::Pending),
            "completed" => Some(OrderStatus::Completed),
            "failed" => Some(OrderStatus::Failed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Failed)
    }

    /// `pending → completed` and `pending → failed` are the only legal
    /// moves; terminal states never change.
    pub fn can_become(&self, next: OrderStatus) -> bool {
        *self == OrderStatus::Pending && next.is_terminal()
    }
}

/// A purchase of a single-use virtual number awaiting an SMS code.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service: String,
    pub country: String,
    /// Absent while the provider is still assigning a number.
    pub number: Option<String>,
    pub amount: f64,
    pub status: String,
    pub created_at: OffsetDateTime,
}

impl Order {
    pub fn status(&self) -> OrderStatus {
        OrderStatus::parse(&self.status).unwrap_or(OrderStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for status in [OrderStatus::Pending, OrderStatus::Completed, OrderStatus::Failed] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("cancelled"), None);
    }

    #[test]
    fn pending_can_reach_both_terminals() {
        assert!(OrderStatus::Pending.can_become(OrderStatus::Completed));
        assert!(OrderStatus::Pending.can_become(OrderStatus::Failed));
    }

    #[test]
    fn terminal_states_are_frozen() {
        for terminal in [OrderStatus::Completed, OrderStatus::Failed] {
            assert!(terminal.is_terminal());
            assert!(!terminal.can_become(OrderStatus::Pending));
            assert!(!terminal.can_become(OrderStatus::Completed));
            assert!(!terminal.can_become(OrderStatus::Failed));
        }
    }

    #[test]
    fn pending_cannot_loop_to_pending() {
        assert!(!OrderStatus::Pending.can_become(OrderStatus::Pending));
    }
}
