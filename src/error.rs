use thiserror::Error;

/// Errors surfaced when exporting the rendered image.
///
/// Export failures are reported to the caller so the UI can notify the
/// user; they never corrupt the in-memory timeline or surface.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("failed to write image file: {0}")]
    Io(#[from] std::io::Error),
}
