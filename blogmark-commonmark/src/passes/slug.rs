//! Heading id assignment.
use std::collections::HashSet;

use kuchikikiki::NodeRef;

use crate::{
  processor::TreeTransformer,
  tree,
  utils::Slugger,
  walk::{Visit, walk_elements},
};

/// Gives every heading a unique, deterministic `id`.
///
/// Ids already present in the markup are kept, and reserved before any slug
/// is generated so a generated id never shadows an authored one. A repeated
/// authored id keeps its first occurrence; later ones get a suffix. Headings
/// without text get no id.
#[derive(Debug, Default, Clone, Copy)]
pub struct SlugTransformer;

impl TreeTransformer for SlugTransformer {
  fn name(&self) -> &'static str {
    "slug"
  }

  fn transform(&self, root: &NodeRef) {
    let mut headings = Vec::new();
    walk_elements(root, |node| {
      if tree::heading_level(node).is_some() {
        headings.push(node.clone());
        return Visit::Skip;
      }
      Visit::Continue
    });

    let mut slugger = Slugger::new();
    let authored: Vec<Option<String>> = headings
      .iter()
      .map(|heading| {
        tree::attribute(heading, "id").filter(|id| !id.is_empty())
      })
      .collect();
    for id in authored.iter().flatten() {
      slugger.reserve(id);
    }

    let mut seen = HashSet::new();
    for (heading, authored) in headings.iter().zip(authored) {
      if let Some(id) = authored {
        if !seen.insert(id.clone()) {
          tree::set_attribute(heading, "id", slugger.unique(&id));
        }
        continue;
      }

      let text = tree::flatten_text(heading);
      let text = text.trim();
      if text.is_empty() {
        continue;
      }
      tree::set_attribute(heading, "id", slugger.slug(text));
    }
  }
}
