use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Rental duration class. Wire labels match the stored form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RentalDuration {
    #[serde(rename = "3days")]
    ThreeDays,
    #[serde(rename = "30days")]
    ThirtyDays,
}

impl RentalDuration {
    pub fn parse(label: &str) -> Option<RentalDuration> {
        match label {
            "3days" => Some(RentalDuration::ThreeDays),
            "30days" => Some(RentalDuration::ThirtyDays),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RentalDuration::ThreeDays => "3days",
            RentalDuration::ThirtyDays => "30days",
        }
    }

    pub fn length(&self) -> Duration {
        match self {
            RentalDuration::ThreeDays => Duration::days(3),
            RentalDuration::ThirtyDays => Duration::days(30),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Active,
    Expired,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Active => "active",
            RentalStatus::Expired => "expired",
        }
    }
}

/// A time-bounded lease of a virtual number. Kept for history; only the
/// status label ever changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rental {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service: String,
    pub state: String,
    pub duration: String,
    pub price: f64,
    pub status: String,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

impl Rental {
    /// A rental counts as active only when the stored label says so AND the
    /// expiry is strictly in the future. The label alone is a cache that can
    /// go stale; the clock is authoritative.
    pub fn is_active(&self, now: OffsetDateTime) -> bool {
        self.status == RentalStatus::Active.as_str() && now < self.expires_at
    }

    /// Status reconciled against the clock at read time.
    pub fn effective_status(&self, now: OffsetDateTime) -> RentalStatus {
        if self.is_active(now) {
            RentalStatus::Active
        } else {
            RentalStatus::Expired
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rental(status: &str, expires_in: Duration) -> (Rental, OffsetDateTime) {
        let now = OffsetDateTime::now_utc();
        let rental = Rental {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            service: "WhatsApp".into(),
            state: "random".into(),
            duration: "3days".into(),
            price: 1.5,
            status: status.into(),
            expires_at: now + expires_in,
            created_at: now,
        };
        (rental, now)
    }

    #[test]
    fn duration_labels_round_trip() {
        assert_eq!(RentalDuration::parse("3days"), Some(RentalDuration::ThreeDays));
        assert_eq!(RentalDuration::parse("30days"), Some(RentalDuration::ThirtyDays));
        assert_eq!(RentalDuration::parse("7days"), None);
        assert_eq!(RentalDuration::ThreeDays.as_str(), "3days");
    }

    #[test]
    fn duration_lengths() {
        assert_eq!(RentalDuration::ThreeDays.length(), Duration::days(3));
        assert_eq!(RentalDuration::ThirtyDays.length(), Duration::days(30));
    }

    #[test]
    fn active_label_with_future_expiry_is_active() {
        let (r, now) = rental("active", Duration::hours(1));
        assert!(r.is_active(now));
        assert_eq!(r.effective_status(now), RentalStatus::Active);
    }

    #[test]
    fn stale_active_label_past_expiry_is_not_active() {
        let (r, now) = rental("active", Duration::hours(-1));
        assert!(!r.is_active(now));
        assert_eq!(r.effective_status(now), RentalStatus::Expired);
    }

    #[test]
    fn expired_label_is_never_active_even_before_expiry() {
        let (r, now) = rental("expired", Duration::hours(1));
        assert!(!r.is_active(now));
    }

    #[test]
    fn exact_expiry_instant_is_not_active() {
        let (r, _) = rental("active", Duration::ZERO);
        assert!(!r.is_active(r.expires_at));
        assert!(!r.is_active(r.expires_at + Duration::seconds(1)));
        assert!(r.is_active(r.expires_at - Duration::seconds(1)));
    }

    #[test]
    fn three_day_rental_expires_on_schedule() {
        let purchase = OffsetDateTime::now_utc();
        let expires_at = purchase + RentalDuration::ThreeDays.length();
        let r = Rental {
            expires_at,
            ..rental("active", Duration::ZERO).0
        };
        assert_eq!(r.expires_at - purchase, Duration::days(3));
        assert!(!r.is_active(purchase + Duration::days(3) + Duration::seconds(1)));
    }
}
