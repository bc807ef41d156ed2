pub mod extractors;
pub mod identity;
pub mod store;

pub use extractors::{AuthSession, CurrentSession, SESSION_COOKIE};
pub use identity::IdentitySnapshot;
pub use store::Session;
