mod multipart;
mod policy;
mod storage;

pub use multipart::read_submission;
pub use policy::{is_allowed_image, UploadRejected};
pub use storage::{generate_filename, ImageStorage};
