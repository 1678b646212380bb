mod delete;
mod error;
mod get;
mod put;

pub use delete::*;
pub use error::ApiError;
pub use get::*;
pub use put::*;
