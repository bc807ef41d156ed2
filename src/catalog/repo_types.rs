use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::rentals::repo_types::RentalDuration;

/// Rentable/orderable target application and its pricing tiers.
/// Reference data, maintained out-of-band.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    /// Single-use order price.
    pub price: f64,
    /// 3-day rental price.
    pub short_price: f64,
    /// 30-day rental price.
    pub long_price: f64,
    /// Stored as text ("1"/"0") for historical reasons; use
    /// [`Service::is_available`].
    pub available: String,
}

impl Service {
    pub fn is_available(&self) -> bool {
        matches!(self.available.as_str(), "1" | "true")
    }

    pub fn price_for(&self, duration: RentalDuration) -> f64 {
        match duration {
            RentalDuration::ThreeDays => self.short_price,
            RentalDuration::ThirtyDays => self.long_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(available: &str) -> Service {
        Service {
            id: Uuid::new_v4(),
            name: "WhatsApp".into(),
            price: 1.5,
            short_price: 1.5,
            long_price: 5.0,
            available: available.into(),
        }
    }

    #[test]
    fn availability_flag_normalizes() {
        assert!(service("1").is_available());
        assert!(service("true").is_available());
        assert!(!service("0").is_available());
        assert!(!service("false").is_available());
        assert!(!service("").is_available());
    }

    #[test]
    fn duration_tier_picks_price() {
        let s = service("1");
        assert_eq!(s.price_for(RentalDuration::ThreeDays), 1.5);
        assert_eq!(s.price_for(RentalDuration::ThirtyDays), 5.0);
    }
}
