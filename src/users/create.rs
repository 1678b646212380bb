use anyhow::Context;

use super::{UserError, EMAIL_ALREADY_EXISTS, NAME_AND_EMAIL_REQUIRED};
use crate::{
    domain::{User, UserSubmission},
    store::UserStore,
    uploads::ImageStorage,
};

/// Validates the submission, stores the attached image if any and inserts the
/// row. The email check is advisory; the store's unique index decides races.
#[tracing::instrument(
    name = "Create user",
    skip(store, images, submission),
    fields(has_image = submission.image.is_some())
)]
pub async fn create_user(
    store: &dyn UserStore,
    images: &ImageStorage,
    submission: UserSubmission,
) -> Result<User, UserError> {
    if !submission.has_required_fields() {
        return Err(UserError::ValidationError(NAME_AND_EMAIL_REQUIRED));
    }

    if store.get_by_email(&submission.email).await?.is_some() {
        return Err(UserError::ValidationError(EMAIL_ALREADY_EXISTS));
    }

    let profile_image = match &submission.image {
        Some(image) => Some(
            images
                .save(image)
                .await
                .context("Failed to store the uploaded profile image.")?,
        ),
        None => None,
    };

    match store
        .create(&submission.name, &submission.email, profile_image.as_deref())
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = user.id, "New user created");
            Ok(user)
        }
        Err(e) => {
            if let Some(filename) = &profile_image {
                images.remove(filename).await;
            }
            Err(e.into())
        }
    }
}
