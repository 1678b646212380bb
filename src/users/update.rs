use anyhow::Context;

use super::{
    resolve_image_transition, NewImage, UserError, EMAIL_USED_BY_ANOTHER_USER,
    NAME_AND_EMAIL_REQUIRED,
};
use crate::{
    domain::{User, UserSubmission},
    store::UserStore,
    uploads::ImageStorage,
};

/// Applies an edit. The replaced image file is removed before the row is
/// written and is not restored if the write fails.
#[tracing::instrument(
    name = "Update user",
    skip(store, images, submission),
    fields(
        remove_image = submission.remove_image,
        has_image = submission.image.is_some()
    )
)]
pub async fn update_user(
    store: &dyn UserStore,
    images: &ImageStorage,
    id: i32,
    submission: UserSubmission,
) -> Result<User, UserError> {
    if !submission.has_required_fields() {
        return Err(UserError::ValidationError(NAME_AND_EMAIL_REQUIRED));
    }

    if let Some(existing) = store.get_by_email(&submission.email).await? {
        if existing.id != id {
            return Err(UserError::ValidationError(EMAIL_USED_BY_ANOTHER_USER));
        }
    }

    let current = store.get_by_id(id).await?.ok_or(UserError::NotFound)?;

    let uploaded = match &submission.image {
        Some(image) => Some(
            images
                .save(image)
                .await
                .context("Failed to store the uploaded profile image.")?,
        ),
        None => None,
    };

    let new_image = match &uploaded {
        Some(filename) => NewImage::Uploaded(filename),
        None => NewImage::None,
    };
    let transition = resolve_image_transition(
        current.profile_image.as_deref(),
        submission.remove_image,
        new_image,
    );

    if let Some(old) = &transition.delete {
        images.remove(old).await;
    }

    let updated = store
        .update(
            id,
            &submission.name,
            &submission.email,
            transition.reference.as_deref(),
        )
        .await;

    match updated {
        Ok(Some(user)) => {
            tracing::info!(user_id = user.id, "User updated");
            Ok(user)
        }
        Ok(None) => {
            if let Some(filename) = &uploaded {
                images.remove(filename).await;
            }
            Err(UserError::NotFound)
        }
        Err(e) => {
            if let Some(filename) = &uploaded {
                images.remove(filename).await;
            }
            Err(e.into())
        }
    }
}
