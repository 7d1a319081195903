//! Types for blogmark-commonmark public API and internal use.
use serde::{Deserialize, Serialize};

/// A heading collected into the table of contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeadingEntry {
  /// Anchor id assigned to the heading element.
  pub id:    String,
  /// Flattened heading text (no markup).
  pub text:  String,
  /// Heading depth, 1-3.
  pub depth: u8,
}

/// Result of rendering one Markdown document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderOutput {
  /// Sanitized HTML, safe for direct insertion into a page.
  pub html: String,

  /// Headings of depth 1-3 in document order.
  pub toc: Vec<HeadingEntry>,
}

impl RenderOutput {
  /// Whether nothing was rendered.
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.html.is_empty() && self.toc.is_empty()
  }
}
