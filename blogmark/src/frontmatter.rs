//! Front-matter splitting for blog post sources.
//!
//! A post may open with a YAML block between `---` fences. It is split off
//! before rendering and passed through untouched as metadata.
use std::sync::LazyLock;

use log::error;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontMatterError {
  #[error("Invalid YAML front-matter: {0}")]
  Yaml(#[from] serde_yaml::Error),

  #[error("Front-matter must be a mapping, found {0}")]
  NotAMapping(&'static str),
}

static FRONT_MATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)^---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n(.*))?$")
    .unwrap_or_else(|e| {
      error!("Failed to compile FRONT_MATTER_RE regex: {e}");
      never_matching_regex()
    })
});

/// A regex that matches nothing, so every post is treated as body only.
#[allow(
  clippy::expect_used,
  reason = "The empty negated class is a valid pattern"
)]
fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").expect("Failed to compile never-matching regex")
}

/// A post split into metadata and Markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<'a> {
  /// Parsed front-matter; empty when the post has none.
  pub front_matter: Mapping,

  /// Markdown to render.
  pub body: &'a str,
}

/// Split `content` into front-matter and body.
///
/// Content without a leading fence is returned whole as the body. An empty
/// front-matter block yields an empty mapping.
///
/// # Errors
///
/// Returns an error if the fenced block is not valid YAML or is not a
/// mapping.
pub fn split_front_matter(
  content: &str,
) -> Result<Document<'_>, FrontMatterError> {
  let Some(captures) = FRONT_MATTER_RE.captures(content) else {
    return Ok(Document {
      front_matter: Mapping::new(),
      body:         content,
    });
  };

  let yaml = captures.get(1).map_or("", |m| m.as_str());
  let body = captures.get(2).map_or("", |m| m.as_str());

  let front_matter = match serde_yaml::from_str::<Value>(yaml)? {
    Value::Mapping(mapping) => mapping,
    Value::Null => Mapping::new(),
    Value::Bool(_) => return Err(FrontMatterError::NotAMapping("a boolean")),
    Value::Number(_) => return Err(FrontMatterError::NotAMapping("a number")),
    Value::String(_) => return Err(FrontMatterError::NotAMapping("a string")),
    Value::Sequence(_) => {
      return Err(FrontMatterError::NotAMapping("a sequence"));
    },
    Value::Tagged(_) => {
      return Err(FrontMatterError::NotAMapping("a tagged value"));
    },
  };

  Ok(Document { front_matter, body })
}
