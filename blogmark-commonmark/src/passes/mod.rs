//! Enhancement passes over the presentational tree.
//!
//! Each pass is a [`TreeTransformer`](crate::processor::TreeTransformer)
//! mutating the document root in place. Passes never fail: a node that does
//! not have the shape a pass expects is left alone.
//!
//! The renderer applies them in this order:
//!
//! 1. [`SlugTransformer`]: heading ids
//! 2. [`HighlightTransformer`]: syntax highlighting, only for documents with
//!    fenced code
//! 3. [`CodeBlockTransformer`]: language label and copy button
//! 4. [`TableTransformer`]: scroll container around tables
//! 5. [`CaptionTransformer`]: image caption detection
//!
//! [`extract_toc`] runs after all of them.
pub mod caption;
pub mod codeblock;
pub mod highlight;
pub mod slug;
pub mod table;
pub mod toc;

use kuchikikiki::NodeRef;

pub use self::{
  caption::{CaptionPolicy, CaptionTransformer, looks_like_figure_caption},
  codeblock::{CodeBlockTransformer, language_label_for},
  highlight::HighlightTransformer,
  slug::SlugTransformer,
  table::TableTransformer,
  toc::extract_toc,
};
use crate::tree;

/// Class prefix carrying the fence language of a code element.
pub const LANGUAGE_CLASS_PREFIX: &str = "language-";

/// The fence language of a `code` element, from its `language-X` class.
#[must_use]
pub fn code_language(code: &NodeRef) -> Option<String> {
  tree::classes(code).into_iter().find_map(|class| {
    class
      .strip_prefix(LANGUAGE_CLASS_PREFIX)
      .filter(|language| !language.is_empty())
      .map(str::to_string)
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tree::element;

  #[test]
  fn test_code_language() {
    let code = element("code", &[("class", "hljs language-rust")]);
    assert_eq!(code_language(&code).as_deref(), Some("rust"));

    assert_eq!(code_language(&element("code", &[])), None);
    assert_eq!(
      code_language(&element("code", &[("class", "language-")])),
      None
    );
  }
}
