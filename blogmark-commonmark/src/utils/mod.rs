//! Slug and URI helpers shared by the enhancement passes.
use std::collections::HashMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters escaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
  .remove(b'-')
  .remove(b'_')
  .remove(b'.')
  .remove(b'!')
  .remove(b'~')
  .remove(b'*')
  .remove(b'\'')
  .remove(b'(')
  .remove(b')');

/// Slugify a string for use as an anchor ID.
///
/// Lowercases, drops punctuation and symbols, and turns each whitespace
/// character into a dash. Letters and digits of any script are kept, so CJK
/// headings produce CJK slugs.
#[must_use]
pub fn slugify(text: &str) -> String {
  text
    .to_lowercase()
    .chars()
    .filter_map(|c| {
      if c.is_whitespace() {
        Some('-')
      } else if c.is_alphanumeric() || c == '-' || c == '_' {
        Some(c)
      } else {
        None
      }
    })
    .collect()
}

/// Hands out unique slugs within one document.
///
/// The first occurrence of a slug is returned as is; later ones get `-1`,
/// `-2`, ... appended, skipping any suffix that is itself already taken.
#[derive(Debug, Default, Clone)]
pub struct Slugger {
  occurrences: HashMap<String, usize>,
}

impl Slugger {
  /// Slug used when the text has no sluggable characters.
  pub const FALLBACK: &'static str = "section";

  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Mark an id as taken without generating anything.
  pub fn reserve(&mut self, id: &str) {
    self.occurrences.entry(id.to_string()).or_insert(0);
  }

  /// Produce a unique slug for `text`.
  pub fn slug(&mut self, text: &str) -> String {
    let base = slugify(text);
    if base.is_empty() {
      self.unique(Self::FALLBACK)
    } else {
      self.unique(&base)
    }
  }

  /// Return `base` if it is free, otherwise the first free suffixed form.
  /// The result is marked as taken.
  pub fn unique(&mut self, base: &str) -> String {
    let mut candidate = base.to_string();
    while self.occurrences.contains_key(&candidate) {
      let count = self.occurrences.entry(base.to_string()).or_insert(0);
      *count += 1;
      candidate = format!("{base}-{count}");
    }
    self.occurrences.insert(candidate.clone(), 0);
    candidate
  }
}

/// Percent-encode text the way `encodeURIComponent` does.
#[must_use]
pub fn encode_uri_component(text: &str) -> String {
  utf8_percent_encode(text, URI_COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_slugify() {
    assert_eq!(slugify("Hello World"), "hello-world");
    assert_eq!(slugify("Rust & Safety!"), "rust--safety");
    assert_eq!(slugify("snake_case-name"), "snake_case-name");
    assert_eq!(slugify("中文 标题"), "中文-标题");
    assert_eq!(slugify("?!"), "");
  }

  #[test]
  fn test_slugger_suffixes_duplicates() {
    let mut slugger = Slugger::new();
    assert_eq!(slugger.slug("Intro"), "intro");
    assert_eq!(slugger.slug("Intro"), "intro-1");
    assert_eq!(slugger.slug("Intro"), "intro-2");
    assert_eq!(slugger.slug("Other"), "other");
  }

  #[test]
  fn test_unique_keeps_raw_base() {
    let mut slugger = Slugger::new();
    slugger.reserve("My_Id");
    assert_eq!(slugger.unique("My_Id"), "My_Id-1");
    assert_eq!(slugger.unique("Fresh"), "Fresh");
  }

  #[test]
  fn test_slugger_skips_taken_suffix() {
    let mut slugger = Slugger::new();
    assert_eq!(slugger.slug("Intro 1"), "intro-1");
    assert_eq!(slugger.slug("Intro"), "intro");
    assert_eq!(slugger.slug("Intro"), "intro-2");
  }

  #[test]
  fn test_slugger_reserved_ids() {
    let mut slugger = Slugger::new();
    slugger.reserve("setup");
    assert_eq!(slugger.slug("Setup"), "setup-1");
  }

  #[test]
  fn test_slugger_fallback() {
    let mut slugger = Slugger::new();
    assert_eq!(slugger.slug("!!!"), "section");
    assert_eq!(slugger.slug(""), "section-1");
  }

  #[test]
  fn test_encode_uri_component() {
    assert_eq!(encode_uri_component("const x = 1;"), "const%20x%20%3D%201%3B");
    let unreserved = "a-b_c.d!e~f*g'h(i)";
    assert_eq!(encode_uri_component(unreserved), unreserved);
    assert_eq!(encode_uri_component("é\n"), "%C3%A9%0A");
  }
}
