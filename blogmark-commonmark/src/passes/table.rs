//! Scroll containers for tables.
use kuchikikiki::NodeRef;

use crate::{
  processor::TreeTransformer,
  tree,
  walk::{Visit, walk_elements},
};

/// Class of the container inserted around each table.
pub const CONTAINER_CLASS: &str = "table-container";

/// Wraps every `table` in `div.table-container` unless its parent already is
/// one.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableTransformer;

impl TreeTransformer for TableTransformer {
  fn name(&self) -> &'static str {
    "table"
  }

  fn transform(&self, root: &NodeRef) {
    let mut tables = Vec::new();
    walk_elements(root, |node| {
      if tree::is_element(node, "table") {
        let contained = node
          .parent()
          .is_some_and(|parent| tree::has_class(&parent, CONTAINER_CLASS));
        if !contained {
          tables.push(node.clone());
        }
      }
      Visit::Continue
    });

    for table in &tables {
      let container = tree::element("div", &[("class", CONTAINER_CLASS)]);
      table.insert_before(container.clone());
      container.append(table.clone());
    }
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;
  use crate::tree::{element, element_with, text};

  #[test]
  fn test_wraps_table() {
    let root = tree::document([element_with("table", &[], [element(
      "tbody",
      &[],
    )])]);
    TableTransformer.transform(&root);
    assert_eq!(
      tree::serialize(&root).expect("serialize"),
      "<div class=\"table-container\"><table><tbody></tbody></table></div>"
    );
  }

  #[test]
  fn test_is_idempotent() {
    let root = tree::document([element_with(
      "div",
      &[("class", CONTAINER_CLASS)],
      [element("table", &[])],
    )]);
    let before = tree::serialize(&root).expect("serialize");
    TableTransformer.transform(&root);
    TableTransformer.transform(&root);
    assert_eq!(tree::serialize(&root).expect("serialize"), before);
  }

  #[test]
  fn test_wraps_each_table_once() {
    let root = tree::document([
      element("table", &[]),
      element_with("p", &[], [text("between")]),
      element("table", &[]),
    ]);
    TableTransformer.transform(&root);
    let containers = root
      .children()
      .filter(|node| tree::has_class(node, CONTAINER_CLASS))
      .count();
    assert_eq!(containers, 2);
  }
}
