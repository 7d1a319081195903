//! Error types surfaced by the rendering pipeline.
use std::{fmt, io};

use crate::extensions::ExtensionError;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that abort a render.
///
/// Malformed Markdown never produces one of these; only failing to load an
/// extension the document needs, or a fatal failure while producing the HTML.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
  #[error(transparent)]
  Extension(#[from] ExtensionError),

  #[error("Failed to format HTML: {0}")]
  Format(#[from] fmt::Error),

  #[error("Failed to serialize document tree: {0}")]
  Serialize(#[from] io::Error),
}
