use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::ImageUpload;

/// Flat directory of profile images, addressed by generated filename.
#[derive(Debug, Clone)]
pub struct ImageStorage {
    dir: PathBuf,
}

/// `profile-<unix millis>-<random>` followed by the original extension.
pub fn generate_filename(original_filename: &str) -> String {
    let extension = Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    format!(
        "profile-{}-{}{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        extension
    )
}

impl ImageStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<(), anyhow::Error> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create upload directory {}", self.dir.display()))
    }

    /// Only the final path component of a stored reference is honoured.
    pub fn path_for(&self, filename: &str) -> Option<PathBuf> {
        Path::new(filename)
            .file_name()
            .map(|name| self.dir.join(name))
    }

    #[tracing::instrument(
        name = "Store uploaded image",
        skip(self, image),
        fields(original_filename = %image.original_filename, size = image.bytes.len())
    )]
    pub async fn save(&self, image: &ImageUpload) -> Result<String, anyhow::Error> {
        let filename = generate_filename(&image.original_filename);
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, &image.bytes)
            .await
            .with_context(|| format!("Failed to write uploaded image to {}", path.display()))?;
        Ok(filename)
    }

    /// Best-effort removal: a file that is already gone is fine and other
    /// failures are only logged.
    #[tracing::instrument(name = "Remove stored image", skip(self))]
    pub async fn remove(&self, filename: &str) {
        let Some(path) = self.path_for(filename) else {
            return;
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "Failed to remove image file");
            }
        }
    }
}
