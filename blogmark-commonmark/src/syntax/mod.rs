//! Provides a trait-based architecture for syntax highlighting that allows
//! backends to be plugged in.
//!
//! The bundled backend is **Syntect**, using Sublime Text syntax definitions
//! with two-face added for extended syntax definitions.

pub mod error;
pub mod types;

mod syntect;

// Re-export commonly used types
pub use error::{SyntaxError, SyntaxResult};
pub use self::syntect::{
  CLASS_PREFIX,
  SyntectHighlighter,
  create_syntect_manager,
};
pub use types::{SyntaxConfig, SyntaxHighlighter, SyntaxManager};

/// Create the default syntax manager.
///
/// Building the underlying syntax set is expensive, which is why the
/// renderer only calls this through the extension registry, and only for
/// documents that contain fenced code.
///
/// # Errors
///
/// Returns an error if backend initialization fails.
pub fn create_default_manager() -> SyntaxResult<SyntaxManager> {
  create_syntect_manager()
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn test_syntax_config_default() {
    let config = SyntaxConfig::default();
    assert!(config.language_aliases.contains_key("js"));
    assert_eq!(config.language_aliases["js"], "javascript");
  }

  #[test]
  fn test_syntect_highlighter() {
    let highlighter = SyntectHighlighter;
    assert_eq!(highlighter.name(), "Syntect");
    assert!(highlighter.supports_language("rs"));
    assert!(highlighter.supports_language("rust"));
    assert!(!highlighter.supports_language("definitely-not-a-language"));
  }

  #[test]
  fn test_syntect_highlight_emits_prefixed_classes() {
    let highlighter = SyntectHighlighter;
    let html = highlighter
      .highlight("fn main() {}\n", "rust")
      .expect("Failed to highlight code");
    assert!(html.contains("main"));
    assert!(html.contains("class=\"hljs-"));
    assert!(!html.contains("style="));
  }

  #[test]
  fn test_language_resolution() {
    let manager =
      create_default_manager().expect("Failed to create syntax manager");

    assert_eq!(manager.resolve_language("js"), "javascript");
    assert_eq!(manager.resolve_language("PY"), "python");
    assert_eq!(manager.resolve_language("rust"), "rust");
  }

  #[test]
  fn test_unknown_language_is_an_error() {
    let manager =
      create_default_manager().expect("Failed to create syntax manager");
    let result = manager.highlight_code("x", "no-such-lang");
    assert!(matches!(result, Err(SyntaxError::UnsupportedLanguage(_))));
  }

  #[test]
  fn test_highlight_through_alias() {
    let manager =
      create_default_manager().expect("Failed to create syntax manager");
    let html = manager
      .highlight_code("const x = 1;\n", "js")
      .expect("js should resolve to javascript");
    assert!(html.contains("const"));
  }
}
