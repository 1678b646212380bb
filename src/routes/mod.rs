mod api;
mod error;
mod health;
mod home;
mod not_found;
mod user;

pub use api::*;
pub use error::PageError;
pub use health::*;
pub use home::*;
pub use not_found::not_found;
pub use user::*;

/// Ids that are not integers can never match a row.
fn parse_id(raw: &str) -> Option<i32> {
    raw.parse().ok()
}
