use anyhow::Context;
use async_trait::async_trait;
use sqlx::{pool::PoolConnection, PgPool, Postgres};

use super::{StoreError, UserStore};
use crate::domain::User;

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn connection(&self) -> Result<PoolConnection<Postgres>, StoreError> {
        let connection = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire a Postgres connection from the pool.")?;
        Ok(connection)
    }
}

fn classify(error: sqlx::Error, context: &'static str) -> StoreError {
    if let Some(database_error) = error.as_database_error() {
        if database_error.is_unique_violation() {
            return StoreError::ConstraintViolation(database_error.message().to_string());
        }
    }
    StoreError::UnexpectedError(anyhow::Error::new(error).context(context))
}

#[async_trait]
impl UserStore for PgUserStore {
    #[tracing::instrument(name = "Insert user", skip(self, name, email))]
    async fn create(
        &self,
        name: &str,
        email: &str,
        profile_image: Option<&str>,
    ) -> Result<User, StoreError> {
        let mut connection = self.connection().await?;
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, profile_image)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, profile_image, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(profile_image)
        .fetch_one(&mut *connection)
        .await
        .map_err(|e| classify(e, "Failed to insert a new user."))
    }

    #[tracing::instrument(name = "Fetch all users", skip(self))]
    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        let mut connection = self.connection().await?;
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, profile_image, created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&mut *connection)
        .await
        .map_err(|e| classify(e, "Failed to fetch users."))
    }

    #[tracing::instrument(name = "Fetch user by id", skip(self))]
    async fn get_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        let mut connection = self.connection().await?;
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, profile_image, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *connection)
        .await
        .map_err(|e| classify(e, "Failed to fetch user by id."))
    }

    #[tracing::instrument(name = "Fetch user by email", skip(self, email))]
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let mut connection = self.connection().await?;
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, profile_image, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&mut *connection)
        .await
        .map_err(|e| classify(e, "Failed to fetch user by email."))
    }

    #[tracing::instrument(name = "Update user", skip(self, name, email))]
    async fn update(
        &self,
        id: i32,
        name: &str,
        email: &str,
        profile_image: Option<&str>,
    ) -> Result<Option<User>, StoreError> {
        let mut connection = self.connection().await?;
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, email = $3, profile_image = $4, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING id, name, email, profile_image, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(profile_image)
        .fetch_optional(&mut *connection)
        .await
        .map_err(|e| classify(e, "Failed to update user."))
    }

    #[tracing::instrument(name = "Delete user", skip(self))]
    async fn delete(&self, id: i32) -> Result<Option<User>, StoreError> {
        let mut connection = self.connection().await?;
        sqlx::query_as::<_, User>(
            r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING id, name, email, profile_image, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *connection)
        .await
        .map_err(|e| classify(e, "Failed to delete user."))
    }
}
