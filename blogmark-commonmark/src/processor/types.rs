//! Type definitions for the Markdown renderer.
//!
//! Contains the core types used by the renderer, including:
//! - Configuration options (`RenderOptions`) and their builder
//! - The renderer itself (`MarkdownRenderer`)
//! - The per-document `RenderPlan`
//! - The transformation traits for both trees
//!
//! # Examples
//!
//! ```
//! use blogmark_commonmark::{MarkdownRenderer, RenderOptionsBuilder};
//!
//! let options = RenderOptionsBuilder::new().copy_button_label("复制").build();
//!
//! let renderer = MarkdownRenderer::new(options);
//! ```
use std::sync::Arc;

use comrak::nodes::AstNode;
use kuchikikiki::NodeRef;
use serde::{Deserialize, Serialize};

use crate::{extensions::ExtensionRegistry, passes::CaptionPolicy};

/// Options for configuring the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
  /// Text of the copy button placed above code blocks.
  pub copy_button_label: String,

  /// Rules for recognising image captions.
  pub caption: CaptionPolicy,
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self {
      copy_button_label: "Copy".to_string(),
      caption:           CaptionPolicy::default(),
    }
  }
}

/// Builder for constructing `RenderOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct RenderOptionsBuilder {
  options: RenderOptions,
}

impl RenderOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Set the copy button label.
  #[must_use]
  pub fn copy_button_label<S: Into<String>>(mut self, label: S) -> Self {
    self.options.copy_button_label = label.into();
    self
  }

  /// Replace the caption policy.
  #[must_use]
  pub fn caption_policy(mut self, policy: CaptionPolicy) -> Self {
    self.options.caption = policy;
    self
  }

  /// Set the caption markers.
  #[must_use]
  pub fn caption_markers<I, S>(mut self, markers: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.options.caption.markers =
      markers.into_iter().map(Into::into).collect();
    self
  }

  /// Set the exclusive upper bound on caption length, in characters.
  #[must_use]
  pub const fn caption_max_length(mut self, max_length: usize) -> Self {
    self.options.caption.max_length = max_length;
    self
  }

  /// Build the final `RenderOptions`.
  #[must_use]
  pub fn build(self) -> RenderOptions {
    self.options
  }
}

/// Which optional extensions a document needs, decided once from its source
/// before anything is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderPlan {
  /// The source contains `$`.
  pub math: bool,

  /// The source contains a ```` ``` ```` fence.
  pub highlight: bool,
}

impl RenderPlan {
  #[must_use]
  pub fn for_source(source: &str) -> Self {
    Self {
      math:      source.contains('$'),
      highlight: source.contains("```"),
    }
  }
}

/// Markdown renderer.
///
/// Cheap to clone; clones share the extension registry.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
  pub(crate) options:  RenderOptions,
  pub(crate) registry: Arc<ExtensionRegistry>,
}

/// Trait for transformations of the structural (comrak) tree.
pub trait AstTransformer {
  fn transform<'a>(&self, node: &'a AstNode<'a>);
}

/// Trait for in-place transformations of the presentational tree.
pub trait TreeTransformer {
  /// Short name used in logs.
  fn name(&self) -> &'static str;

  /// Mutate the tree below `root`.
  fn transform(&self, root: &NodeRef);
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn test_plan_triggers() {
    assert_eq!(RenderPlan::for_source("plain"), RenderPlan::default());
    assert!(RenderPlan::for_source("costs $5").math);
    assert!(RenderPlan::for_source("```rs\nfn f() {}\n```").highlight);
    assert!(!RenderPlan::for_source("`inline` and ``double``").highlight);
  }

  #[test]
  fn test_builder() {
    let options = RenderOptionsBuilder::new()
      .copy_button_label("Copier")
      .caption_markers(["Abbildung"])
      .caption_max_length(80)
      .build();

    assert_eq!(options.copy_button_label, "Copier");
    assert_eq!(options.caption.markers, vec!["Abbildung"]);
    assert_eq!(options.caption.max_length, 80);
  }

  #[test]
  fn test_options_deserialize_with_defaults() {
    let options: RenderOptions =
      serde_json::from_str(r#"{"copy_button_label":"复制"}"#)
        .expect("valid options");
    assert_eq!(options.copy_button_label, "复制");
    assert_eq!(options.caption, CaptionPolicy::default());
  }
}
