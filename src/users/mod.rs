mod create;
mod delete;
mod image;
mod update;

pub use create::create_user;
pub use delete::delete_user;
pub use image::{resolve_image_transition, ImageTransition, NewImage};
pub use update::update_user;

use crate::store::StoreError;

pub const NAME_AND_EMAIL_REQUIRED: &str = "Name and email are required";
pub const EMAIL_ALREADY_EXISTS: &str = "User with this email already exists";
pub const EMAIL_USED_BY_ANOTHER_USER: &str = "Email address is already in use by another user";

#[derive(thiserror::Error, Debug)]
pub enum UserError {
    #[error("{0}")]
    ValidationError(&'static str),

    #[error("User not found")]
    NotFound,

    #[error("Email address is already in use")]
    ConstraintViolation(#[source] StoreError),

    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

impl From<StoreError> for UserError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::ConstraintViolation(message) => {
                Self::ConstraintViolation(StoreError::ConstraintViolation(message))
            }
            StoreError::UnexpectedError(e) => Self::UnexpectedError(e),
        }
    }
}
