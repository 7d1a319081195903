//! Image caption detection.
use std::sync::LazyLock;

use kuchikikiki::NodeRef;
use serde::{Deserialize, Serialize};

use crate::{
  processor::TreeTransformer,
  tree,
  walk::{Visit, walk_elements},
};

/// Class added to a paragraph holding a captioned image.
pub const IMAGE_PARAGRAPH_CLASS: &str = "image-paragraph";

/// Class added to a paragraph recognised as a caption.
pub const CAPTION_CLASS: &str = "image-caption";

/// What counts as a figure caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionPolicy {
  /// Prefixes that open a caption, matched case-insensitively.
  pub markers: Vec<String>,

  /// Captions must be shorter than this many characters.
  pub max_length: usize,
}

impl Default for CaptionPolicy {
  fn default() -> Self {
    Self {
      markers:    vec!["图".to_string(), "figure".to_string()],
      max_length: 200,
    }
  }
}

impl CaptionPolicy {
  /// Whether `text` has an acceptable caption length once trimmed.
  #[must_use]
  pub fn fits(&self, text: &str) -> bool {
    let length = text.trim().chars().count();
    length > 0 && length < self.max_length
  }

  /// Whether `text` reads like a figure caption: short enough and opening
  /// with one of the markers.
  #[must_use]
  pub fn looks_like_figure_caption(&self, text: &str) -> bool {
    if !self.fits(text) {
      return false;
    }
    let lowered = text.trim().to_lowercase();
    self
      .markers
      .iter()
      .any(|marker| lowered.starts_with(&marker.to_lowercase()))
  }
}

static DEFAULT_POLICY: LazyLock<CaptionPolicy> =
  LazyLock::new(CaptionPolicy::default);

/// [`CaptionPolicy::looks_like_figure_caption`] with the default policy.
#[must_use]
pub fn looks_like_figure_caption(text: &str) -> bool {
  DEFAULT_POLICY.looks_like_figure_caption(text)
}

/// Tags image paragraphs and the captions that accompany them.
///
/// A paragraph holding nothing but an image, followed by a paragraph that
/// reads like a caption or is a lone `<em>`, gets `image-paragraph` and the
/// follower gets `image-caption`. A single paragraph holding an image and one
/// caption-like node gets `image-caption` itself.
#[derive(Debug, Clone, Default)]
pub struct CaptionTransformer {
  policy: CaptionPolicy,
}

impl CaptionTransformer {
  #[must_use]
  pub const fn new(policy: CaptionPolicy) -> Self {
    Self { policy }
  }

  fn is_emphasis_only(paragraph: &NodeRef) -> bool {
    matches!(
      tree::meaningful_children(paragraph).as_slice(),
      [only] if tree::is_element(only, "em")
    )
  }

  fn is_caption_paragraph(&self, paragraph: &NodeRef) -> bool {
    let text = tree::flatten_text(paragraph);
    self.policy.looks_like_figure_caption(&text)
      || (self.policy.fits(&text) && Self::is_emphasis_only(paragraph))
  }

  fn tag(&self, paragraph: &NodeRef) {
    match tree::meaningful_children(paragraph).as_slice() {
      [only] if tree::is_element(only, "img") => {
        let Some(next) = tree::next_meaningful_sibling(paragraph) else {
          return;
        };
        if tree::is_element(&next, "p") && self.is_caption_paragraph(&next) {
          tree::add_class(paragraph, IMAGE_PARAGRAPH_CLASS);
          tree::add_class(&next, CAPTION_CLASS);
        }
      },
      [first, second] => {
        let other = if tree::is_element(first, "img") {
          second
        } else if tree::is_element(second, "img") {
          first
        } else {
          return;
        };
        if tree::is_element(other, "img") {
          return;
        }
        let text = tree::flatten_text(other);
        if self.policy.looks_like_figure_caption(&text) {
          tree::add_class(paragraph, CAPTION_CLASS);
        }
      },
      _ => {},
    }
  }
}

impl TreeTransformer for CaptionTransformer {
  fn name(&self) -> &'static str {
    "caption"
  }

  fn transform(&self, root: &NodeRef) {
    let mut paragraphs = Vec::new();
    walk_elements(root, |node| {
      if tree::is_element(node, "p") {
        paragraphs.push(node.clone());
        return Visit::Skip;
      }
      Visit::Continue
    });

    for paragraph in &paragraphs {
      self.tag(paragraph);
    }
  }
}
