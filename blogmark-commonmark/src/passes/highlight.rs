//! Syntax highlighting of fenced code blocks.
use std::sync::Arc;

use kuchikikiki::NodeRef;
use log::trace;

use super::code_language;
use crate::{
  processor::TreeTransformer,
  syntax::SyntaxManager,
  tree,
  walk::{Visit, walk_elements},
};

/// Class marking a highlighted code element.
pub const HIGHLIGHTED_CLASS: &str = "hljs";

/// Highlights `pre > code.language-X` blocks with classed token spans.
///
/// Blocks without a language, in a language the backend does not know, or
/// that already contain markup are left as they are.
#[derive(Debug, Clone)]
pub struct HighlightTransformer {
  manager: Arc<SyntaxManager>,
}

impl HighlightTransformer {
  #[must_use]
  pub const fn new(manager: Arc<SyntaxManager>) -> Self {
    Self { manager }
  }

  fn highlight_block(&self, code: &NodeRef) {
    let Some(language) = code_language(code) else {
      return;
    };
    if code.children().any(|child| child.as_element().is_some()) {
      return;
    }

    let source = tree::flatten_text(code);
    let highlighted = match self.manager.highlight_code(&source, &language) {
      Ok(html) => html,
      Err(e) => {
        trace!("Leaving code block unhighlighted: {e}");
        return;
      },
    };

    // Parse inside a code element so leading whitespace survives.
    let parsed =
      tree::parse_fragment(&format!("<pre><code>{highlighted}</code></pre>"));
    let Some(container) = parsed
      .descendants()
      .find(|node| tree::is_element(node, "code"))
    else {
      return;
    };

    tree::clear_children(code);
    for child in container.children().collect::<Vec<_>>() {
      code.append(child);
    }
    tree::add_class(code, HIGHLIGHTED_CLASS);
  }
}

impl TreeTransformer for HighlightTransformer {
  fn name(&self) -> &'static str {
    "highlight"
  }

  fn transform(&self, root: &NodeRef) {
    let mut blocks = Vec::new();
    walk_elements(root, |node| {
      let in_pre = node
        .parent()
        .is_some_and(|parent| tree::is_element(&parent, "pre"));
      if tree::is_element(node, "code") && in_pre {
        blocks.push(node.clone());
        return Visit::Skip;
      }
      Visit::Continue
    });

    for code in &blocks {
      self.highlight_block(code);
    }
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;
  use crate::{
    syntax::create_default_manager,
    tree::{element_with, text},
  };

  fn transformer() -> HighlightTransformer {
    HighlightTransformer::new(Arc::new(
      create_default_manager().expect("syntax manager"),
    ))
  }

  fn code_block(class: &str, source: &str) -> NodeRef {
    let attrs: Vec<(&str, &str)> = if class.is_empty() {
      Vec::new()
    } else {
      vec![("class", class)]
    };
    tree::document([element_with("pre", &[], [element_with(
      "code",
      &attrs,
      [text(source)],
    )])])
  }

  fn code_of(root: &NodeRef) -> NodeRef {
    root
      .descendants()
      .find(|node| tree::is_element(node, "code"))
      .expect("code element")
  }

  #[test]
  fn test_known_language_is_highlighted() {
    let root = code_block("language-rust", "fn main() {}\n");
    transformer().transform(&root);

    let code = code_of(&root);
    assert!(tree::has_class(&code, HIGHLIGHTED_CLASS));
    assert!(code.children().any(|child| tree::is_element(&child, "span")));
    assert_eq!(tree::flatten_text(&code), "fn main() {}\n");
  }

  #[test]
  fn test_unknown_language_is_untouched() {
    let root = code_block("language-klingon", "qapla'\n");
    let before = tree::serialize(&root).expect("serialize");
    transformer().transform(&root);
    assert_eq!(tree::serialize(&root).expect("serialize"), before);
  }

  #[test]
  fn test_missing_language_is_untouched() {
    let root = code_block("", "plain\n");
    let before = tree::serialize(&root).expect("serialize");
    transformer().transform(&root);
    assert_eq!(tree::serialize(&root).expect("serialize"), before);
  }

  #[test]
  fn test_inline_code_is_ignored() {
    let root = tree::document([element_with("p", &[], [element_with(
      "code",
      &[("class", "language-rust")],
      [text("let x = 1;")],
    )])]);
    transformer().transform(&root);
    assert!(!tree::has_class(&code_of(&root), HIGHLIGHTED_CLASS));
  }

  #[test]
  fn test_leading_whitespace_survives() {
    let root = code_block("language-python", "    indented = True\n");
    transformer().transform(&root);
    assert_eq!(
      tree::flatten_text(&code_of(&root)),
      "    indented = True\n"
    );
  }
}
