use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Argon2 hash; absent for OAuth-only accounts, never exposed in JSON.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub balance: f64,
    pub role: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Member,
    Admin,
}

impl Role {
    /// Stored labels are free-form text; anything unrecognized is a Member.
    pub fn from_label(label: Option<&str>) -> Role {
        match label {
            Some("Admin") => Role::Admin,
            _ => Role::Member,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "Member",
            Role::Admin => "Admin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_labels_fall_back_to_member() {
        assert_eq!(Role::from_label(None), Role::Member);
        assert_eq!(Role::from_label(Some("")), Role::Member);
        assert_eq!(Role::from_label(Some("superuser")), Role::Member);
        assert_eq!(Role::from_label(Some("Admin")), Role::Admin);
    }
}
