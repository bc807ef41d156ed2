use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::rentals::repo_types::Rental;

#[derive(Debug, Deserialize)]
pub struct RentRequest {
    pub service: String,
    /// "3days" or "30days".
    pub duration: String,
    /// Target state/region; the provider picks when omitted.
    #[serde(default = "default_state")]
    pub state: String,
}

fn default_state() -> String {
    "random".into()
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
    /// Query-string values are untrusted; keep the page bounded and the
    /// offset non-negative before they reach SQL.
    pub fn clamped(self) -> Pagination {
        Pagination {
            limit: self.limit.clamp(1, MAX_PAGE_SIZE),
            offset: self.offset.max(0),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RentalItem {
    pub id: Uuid,
    pub service: String,
    pub state: String,
    pub duration: String,
    pub price: f64,
    /// Reconciled at read time; a stale stored label is never echoed.
    pub status: String,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

impl RentalItem {
    pub fn from_rental(rental: Rental, now: OffsetDateTime) -> Self {
        let status = rental.effective_status(now).as_str().to_string();
        Self {
            id: rental.id,
            service: rental.service,
            state: rental.state,
            duration: rental.duration,
            price: rental.price,
            status,
            expires_at: rental.expires_at,
            created_at: rental.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    #[test]
    fn pagination_clamps_hostile_values() {
        let page = Pagination {
            limit: -1,
            offset: -5,
        }
        .clamped();
        assert_eq!(page.limit, 1);
        assert_eq!(page.offset, 0);

        let page = Pagination {
            limit: 1_000_000,
            offset: 40,
        }
        .clamped();
        assert_eq!(page.limit, MAX_PAGE_SIZE);
        assert_eq!(page.offset, 40);
    }

    #[test]
    fn stale_label_is_reconciled_in_the_listing() {
        let now = OffsetDateTime::now_utc();
        let rental = Rental {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            service: "Instagram".into(),
            state: "random".into(),
            duration: "3days".into(),
            price: 2.0,
            status: "active".into(),
            expires_at: now - Duration::days(1),
            created_at: now - Duration::days(4),
        };
        let item = RentalItem::from_rental(rental, now);
        assert_eq!(item.status, "expired");
    }
}
