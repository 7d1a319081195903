//! Presentational tree helpers.
//!
//! The presentational tree is a kuchikikiki document whose children are the
//! rendered fragment. Every enhancement pass works on that root; the helpers
//! here cover parsing, serialization, fixture construction and the handful of
//! queries the passes share.
use std::io;

use kuchikikiki::{Attribute, ExpandedName, NodeRef};
use markup5ever::{LocalName, QualName, local_name, ns};
use tendril::TendrilSink;

/// Parse an HTML fragment into a document root holding the fragment nodes.
#[must_use]
pub fn parse_fragment(html: &str) -> NodeRef {
  let parsed = kuchikikiki::parse_html().one(html);
  let body = parsed
    .select_first("body")
    .map_or_else(|()| parsed.clone(), |body| body.as_node().clone());

  let root = NodeRef::new_document();
  for child in body.children().collect::<Vec<_>>() {
    root.append(child);
  }
  root
}

/// Serialize the children of `root` back into an HTML string.
///
/// # Errors
///
/// Returns an error if the serializer fails to write.
pub fn serialize(root: &NodeRef) -> io::Result<String> {
  let mut buf = Vec::new();
  root.serialize(&mut buf)?;
  Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Build a document root from a list of nodes. Used for fixtures.
#[must_use]
pub fn document(children: impl IntoIterator<Item = NodeRef>) -> NodeRef {
  let root = NodeRef::new_document();
  for child in children {
    root.append(child);
  }
  root
}

/// Create an HTML element with the given attributes.
#[must_use]
pub fn element(tag: &str, attrs: &[(&str, &str)]) -> NodeRef {
  NodeRef::new_element(
    QualName::new(None, ns!(html), LocalName::from(tag)),
    attrs.iter().map(|(name, value)| {
      (ExpandedName::new("", *name), Attribute {
        prefix: None,
        value:  (*value).to_string(),
      })
    }),
  )
}

/// Create an element and append `children` to it.
#[must_use]
pub fn element_with(
  tag: &str,
  attrs: &[(&str, &str)],
  children: impl IntoIterator<Item = NodeRef>,
) -> NodeRef {
  let node = element(tag, attrs);
  for child in children {
    node.append(child);
  }
  node
}

/// Create a text node.
#[must_use]
pub fn text(value: &str) -> NodeRef {
  NodeRef::new_text(value)
}

/// Whether `node` is an element with the given local name.
#[must_use]
pub fn is_element(node: &NodeRef, tag: &str) -> bool {
  node
    .as_element()
    .is_some_and(|element| element.name.local.as_ref() == tag)
}

/// Heading level of an `h1`-`h6` element.
#[must_use]
pub fn heading_level(node: &NodeRef) -> Option<u8> {
  let element = node.as_element()?;
  match element.name.local {
    local_name!("h1") => Some(1),
    local_name!("h2") => Some(2),
    local_name!("h3") => Some(3),
    local_name!("h4") => Some(4),
    local_name!("h5") => Some(5),
    local_name!("h6") => Some(6),
    _ => None,
  }
}

/// Read an attribute value.
#[must_use]
pub fn attribute(node: &NodeRef, name: &str) -> Option<String> {
  node.as_element().and_then(|element| {
    element
      .attributes
      .borrow()
      .get(name)
      .map(std::string::ToString::to_string)
  })
}

/// Set an attribute value, replacing any previous one.
pub fn set_attribute(node: &NodeRef, name: &str, value: impl Into<String>) {
  if let Some(element) = node.as_element() {
    element.attributes.borrow_mut().insert(name, value.into());
  }
}

/// The whitespace separated class list of an element.
#[must_use]
pub fn classes(node: &NodeRef) -> Vec<String> {
  attribute(node, "class")
    .map(|class| class.split_whitespace().map(str::to_string).collect())
    .unwrap_or_default()
}

/// Whether the element carries `class`.
#[must_use]
pub fn has_class(node: &NodeRef, class: &str) -> bool {
  attribute(node, "class")
    .is_some_and(|value| value.split_whitespace().any(|c| c == class))
}

/// Append `class` to the element's class list unless already present.
pub fn add_class(node: &NodeRef, class: &str) {
  let mut list = classes(node);
  if list.iter().any(|c| c == class) {
    return;
  }
  list.push(class.to_string());
  set_attribute(node, "class", list.join(" "));
}

/// Concatenate all descendant text in document order, ignoring element
/// boundaries.
#[must_use]
pub fn flatten_text(node: &NodeRef) -> String {
  node.text_contents()
}

/// Whether the node carries nothing visible: whitespace-only text or a
/// comment.
#[must_use]
pub fn is_insignificant(node: &NodeRef) -> bool {
  if node.as_comment().is_some() {
    return true;
  }
  node
    .as_text()
    .is_some_and(|value| value.borrow().trim().is_empty())
}

/// Children of `node` other than whitespace-only text and comments.
#[must_use]
pub fn meaningful_children(node: &NodeRef) -> Vec<NodeRef> {
  node.children().filter(|child| !is_insignificant(child)).collect()
}

/// The next sibling that is not whitespace-only text or a comment.
#[must_use]
pub fn next_meaningful_sibling(node: &NodeRef) -> Option<NodeRef> {
  let mut sibling = node.next_sibling();
  while let Some(candidate) = sibling {
    if !is_insignificant(&candidate) {
      return Some(candidate);
    }
    sibling = candidate.next_sibling();
  }
  None
}

/// Detach every child of `node`.
pub fn clear_children(node: &NodeRef) {
  for child in node.children().collect::<Vec<_>>() {
    child.detach();
  }
}
