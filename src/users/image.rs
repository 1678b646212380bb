/// The image side of an edit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewImage<'a> {
    None,
    Uploaded(&'a str),
}

/// Outcome of an edit for the image reference: what the row should point at
/// and which stored file has to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTransition {
    pub reference: Option<String>,
    pub delete: Option<String>,
}

pub fn resolve_image_transition(
    current: Option<&str>,
    remove_requested: bool,
    new_image: NewImage<'_>,
) -> ImageTransition {
    let mut reference = current.map(str::to_string);
    let mut delete = None;

    if remove_requested {
        delete = current.map(str::to_string);
        reference = None;
    }

    if let NewImage::Uploaded(filename) = new_image {
        if !remove_requested {
            delete = current.map(str::to_string);
        }
        reference = Some(filename.to_string());
    }

    ImageTransition { reference, delete }
}
