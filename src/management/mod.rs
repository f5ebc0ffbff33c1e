mod auth;
mod roster;

pub use auth::TokenManager;
pub use roster::RosterManager;
