//! Table of contents extraction.
use kuchikikiki::NodeRef;

use crate::{
  tree,
  types::HeadingEntry,
  walk::{Visit, walk_elements},
};

/// Deepest heading level included in the table of contents.
pub const MAX_TOC_DEPTH: u8 = 3;

/// Collect `h1`-`h3` headings that carry an id and some text, in document
/// order.
#[must_use]
pub fn extract_toc(root: &NodeRef) -> Vec<HeadingEntry> {
  let mut toc = Vec::new();
  walk_elements(root, |node| {
    let Some(depth) = tree::heading_level(node) else {
      return Visit::Continue;
    };
    let id = tree::attribute(node, "id").unwrap_or_default();
    let text = tree::flatten_text(node).trim().to_string();
    if depth <= MAX_TOC_DEPTH && !id.is_empty() && !text.is_empty() {
      toc.push(HeadingEntry { id, text, depth });
    }
    Visit::Skip
  });
  toc
}
