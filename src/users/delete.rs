use super::UserError;
use crate::{domain::User, store::UserStore, uploads::ImageStorage};

#[tracing::instrument(name = "Delete user", skip(store, images))]
pub async fn delete_user(
    store: &dyn UserStore,
    images: &ImageStorage,
    id: i32,
) -> Result<User, UserError> {
    let deleted = store.delete(id).await?.ok_or(UserError::NotFound)?;

    if let Some(filename) = &deleted.profile_image {
        images.remove(filename).await;
    }

    tracing::info!(user_id = deleted.id, "User deleted");
    Ok(deleted)
}
