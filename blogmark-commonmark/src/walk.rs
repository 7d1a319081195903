//! Pre-order element walker with an explicit visit stack.
//!
//! Visitors may mutate the tree while it is being walked. Children are read
//! after the visitor returns, so a visitor that moves the current node into a
//! freshly inserted wrapper keeps walking the moved node's children, while the
//! wrapper itself is never visited: it was not on the stack when its parent
//! was expanded.
use kuchikikiki::NodeRef;

/// What the walker should do after visiting an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
  /// Descend into the element's children.
  Continue,
  /// Do not descend into this subtree.
  Skip,
}

/// Visit every element below `root` in document order.
pub fn walk_elements<F>(root: &NodeRef, mut visit: F)
where
  F: FnMut(&NodeRef) -> Visit,
{
  let mut stack: Vec<NodeRef> = root.children().collect();
  stack.reverse();

  while let Some(node) = stack.pop() {
    if node.as_element().is_none() {
      continue;
    }
    if visit(&node) == Visit::Skip {
      continue;
    }
    let children: Vec<NodeRef> = node.children().collect();
    stack.extend(children.into_iter().rev());
  }
}
