//! Code block chrome: language label and copy button.
use kuchikikiki::NodeRef;

use super::{LANGUAGE_CLASS_PREFIX, highlight::HIGHLIGHTED_CLASS};
use crate::{
  processor::TreeTransformer,
  tree::{self, element, element_with, text},
  utils::encode_uri_component,
  walk::{Visit, walk_elements},
};

/// Class of the container inserted around each code block.
pub const WRAPPER_CLASS: &str = "code-wrapper";

/// Label shown for blocks without a language.
pub const PLAIN_LABEL: &str = "TEXT";

/// Uppercased fence language from a code element's class list, or
/// [`PLAIN_LABEL`].
#[must_use]
pub fn language_label_for<I, S>(classes: I) -> String
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  classes
    .into_iter()
    .find_map(|class| {
      class
        .as_ref()
        .strip_prefix(LANGUAGE_CLASS_PREFIX)
        .filter(|language| !language.is_empty())
        .map(str::to_uppercase)
    })
    .unwrap_or_else(|| PLAIN_LABEL.to_string())
}

/// Wraps `pre > code` blocks as
///
/// ```html
/// <div class="code-wrapper">
///   <div class="code-header">
///     <span class="lang-label">RUST</span>
///     <button class="copy-btn" data-code="...">Copy</button>
///   </div>
///   <pre class="hljs"><code>...</code></pre>
/// </div>
/// ```
///
/// `data-code` holds the percent-encoded source without its final newline.
#[derive(Debug, Clone)]
pub struct CodeBlockTransformer {
  copy_label: String,
}

impl CodeBlockTransformer {
  #[must_use]
  pub fn new(copy_label: impl Into<String>) -> Self {
    Self {
      copy_label: copy_label.into(),
    }
  }

  fn wrap(&self, pre: &NodeRef, code: &NodeRef) {
    let label = language_label_for(tree::classes(code));

    let mut source = tree::flatten_text(code);
    if source.ends_with('\n') {
      source.pop();
    }
    let encoded = encode_uri_component(&source);

    let header = element_with("div", &[("class", "code-header")], [
      element_with("span", &[("class", "lang-label")], [text(&label)]),
      element_with(
        "button",
        &[("class", "copy-btn"), ("data-code", encoded.as_str())],
        [text(&self.copy_label)],
      ),
    ]);

    let wrapper = element("div", &[("class", WRAPPER_CLASS)]);
    pre.insert_before(wrapper.clone());
    wrapper.append(header);
    wrapper.append(pre.clone());
    tree::add_class(pre, HIGHLIGHTED_CLASS);
  }
}

impl Default for CodeBlockTransformer {
  fn default() -> Self {
    Self::new("Copy")
  }
}

impl TreeTransformer for CodeBlockTransformer {
  fn name(&self) -> &'static str {
    "codeblock"
  }

  fn transform(&self, root: &NodeRef) {
    let mut blocks = Vec::new();
    walk_elements(root, |node| {
      if tree::has_class(node, WRAPPER_CLASS) {
        return Visit::Skip;
      }
      if !tree::is_element(node, "pre") {
        return Visit::Continue;
      }

      let wrapped = node
        .parent()
        .is_some_and(|parent| tree::has_class(&parent, WRAPPER_CLASS));
      if !wrapped {
        if let [code] = tree::meaningful_children(node).as_slice() {
          if tree::is_element(code, "code") {
            blocks.push((node.clone(), code.clone()));
          }
        }
      }
      Visit::Skip
    });

    for (pre, code) in &blocks {
      self.wrap(pre, code);
    }
  }
}
