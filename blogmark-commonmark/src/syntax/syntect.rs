//! Syntect-based syntax highlighting backend enhanced with two-face.
//!
//! Uses Sublime Text syntax definitions from the two-face crate and emits
//! classed HTML: every scope atom becomes an `hljs-` prefixed class, so the
//! site stylesheet decides the colours.

use std::sync::OnceLock;

use syntect::{
  html::{ClassStyle, ClassedHTMLGenerator},
  parsing::SyntaxSet,
  util::LinesWithEndings,
};

use super::{
  error::{SyntaxError, SyntaxResult},
  types::{SyntaxConfig, SyntaxHighlighter, SyntaxManager},
};

/// Class prefix applied to every token scope.
pub const CLASS_PREFIX: &str = "hljs-";

/// Syntect-based syntax highlighter
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntectHighlighter;

impl SyntectHighlighter {
  /// Get the syntect `SyntaxSet`, built on first use.
  fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(two_face::syntax::extra_newlines)
  }
}

impl SyntaxHighlighter for SyntectHighlighter {
  fn name(&self) -> &'static str {
    "Syntect"
  }

  fn supports_language(&self, language: &str) -> bool {
    !language.is_empty()
      && Self::syntax_set().find_syntax_by_token(language).is_some()
  }

  fn highlight(&self, code: &str, language: &str) -> SyntaxResult<String> {
    let syntax_set = Self::syntax_set();
    let syntax = syntax_set
      .find_syntax_by_token(language)
      .ok_or_else(|| SyntaxError::UnsupportedLanguage(language.to_string()))?;

    let mut generator = ClassedHTMLGenerator::new_with_class_style(
      syntax,
      syntax_set,
      ClassStyle::SpacedPrefixed {
        prefix: CLASS_PREFIX,
      },
    );
    for line in LinesWithEndings::from(code) {
      generator
        .parse_html_for_line_which_includes_newline(line)
        .map_err(|e| SyntaxError::HighlightingFailed(e.to_string()))?;
    }
    Ok(generator.finalize())
  }
}

/// Create a Syntect-based syntax manager with the default configuration.
///
/// # Errors
///
/// Returns [`SyntaxError::BackendError`] if the bundled syntax set holds no
/// definitions.
pub fn create_syntect_manager() -> SyntaxResult<SyntaxManager> {
  let highlighter = SyntectHighlighter;
  if SyntectHighlighter::syntax_set().syntaxes().is_empty() {
    return Err(SyntaxError::BackendError(
      "syntect syntax set is empty".to_string(),
    ));
  }
  Ok(SyntaxManager::new(
    Box::new(highlighter),
    SyntaxConfig::default(),
  ))
}
