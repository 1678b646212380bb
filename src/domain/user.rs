use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub profile_image: Option<String>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

/// An image received with a form submission, held in memory until the
/// request passes validation.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub original_filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The parsed body of a create or edit request.
#[derive(Debug, Clone, Default)]
pub struct UserSubmission {
    pub name: String,
    pub email: String,
    pub remove_image: bool,
    pub image: Option<ImageUpload>,
}

impl UserSubmission {
    pub fn has_required_fields(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty()
    }
}
