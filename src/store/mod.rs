mod postgres;

pub use postgres::PgUserStore;

use async_trait::async_trait;

use crate::domain::User;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Unique constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("Something went wrong")]
    UnexpectedError(#[from] anyhow::Error),
}

/// Persistent storage for user rows. Each call is a single round trip that
/// holds a connection only for its own duration.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`StoreError::ConstraintViolation`] when `email` is taken.
    async fn create(
        &self,
        name: &str,
        email: &str,
        profile_image: Option<&str>,
    ) -> Result<User, StoreError>;

    /// Most recently created first.
    async fn get_all(&self) -> Result<Vec<User>, StoreError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<User>, StoreError>;

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Overwrites every mutable column and refreshes `updated_at`.
    async fn update(
        &self,
        id: i32,
        name: &str,
        email: &str,
        profile_image: Option<&str>,
    ) -> Result<Option<User>, StoreError>;

    /// Returns the removed row so the caller can clean up its image.
    async fn delete(&self, id: i32) -> Result<Option<User>, StoreError>;
}
