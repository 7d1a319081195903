//! Core types and traits for syntax highlighting.

use std::collections::HashMap;

use super::error::{SyntaxError, SyntaxResult};

/// Trait for syntax highlighting backends.
///
/// A backend turns source code into HTML where every token is wrapped in a
/// `span` carrying classes for its scope. Styling is left to the stylesheet,
/// so there is no notion of a theme here.
pub trait SyntaxHighlighter: Send + Sync {
  /// Get the name of this highlighter backend
  fn name(&self) -> &'static str;

  /// Check if a language name or file extension is supported
  fn supports_language(&self, language: &str) -> bool;

  /// Highlight code in the given language, returning the token markup that
  /// goes inside a `<code>` element.
  ///
  /// # Errors
  ///
  /// Returns an error if the language is unknown or the backend fails.
  fn highlight(&self, code: &str, language: &str) -> SyntaxResult<String>;
}

/// Configuration for syntax highlighting
#[derive(Debug, Clone)]
pub struct SyntaxConfig {
  /// Language aliases for mapping common names to supported languages
  pub language_aliases: HashMap<String, String>,
}

impl Default for SyntaxConfig {
  fn default() -> Self {
    let mut language_aliases = HashMap::new();

    // Common aliases
    language_aliases.insert("js".to_string(), "javascript".to_string());
    language_aliases.insert("mjs".to_string(), "javascript".to_string());
    language_aliases.insert("ts".to_string(), "typescript".to_string());
    language_aliases.insert("py".to_string(), "python".to_string());
    language_aliases.insert("rb".to_string(), "ruby".to_string());
    language_aliases.insert("sh".to_string(), "bash".to_string());
    language_aliases.insert("shell".to_string(), "bash".to_string());
    language_aliases.insert("zsh".to_string(), "bash".to_string());
    language_aliases.insert("yml".to_string(), "yaml".to_string());
    language_aliases.insert("md".to_string(), "markdown".to_string());
    language_aliases.insert("rs".to_string(), "rust".to_string());

    Self { language_aliases }
  }
}

/// High-level syntax highlighting manager.
///
/// Resolves language aliases before handing code to the backend. Unknown
/// languages are reported as errors rather than rendered as plain text, so
/// callers can leave such blocks untouched.
pub struct SyntaxManager {
  highlighter: Box<dyn SyntaxHighlighter>,
  config:      SyntaxConfig,
}

impl SyntaxManager {
  /// Create a new syntax manager with the given highlighter and config
  #[must_use]
  pub fn new(
    highlighter: Box<dyn SyntaxHighlighter>,
    config: SyntaxConfig,
  ) -> Self {
    Self {
      highlighter,
      config,
    }
  }

  /// Resolve a language name using aliases
  #[must_use]
  pub fn resolve_language(&self, language: &str) -> String {
    let lowered = language.to_lowercase();
    self
      .config
      .language_aliases
      .get(&lowered)
      .cloned()
      .unwrap_or(lowered)
  }

  /// Highlight code with automatic language resolution.
  ///
  /// # Errors
  ///
  /// Returns [`SyntaxError::UnsupportedLanguage`] when neither the language
  /// nor its alias is known to the backend.
  pub fn highlight_code(
    &self,
    code: &str,
    language: &str,
  ) -> SyntaxResult<String> {
    let resolved = self.resolve_language(language);
    if self.highlighter.supports_language(&resolved) {
      return self.highlighter.highlight(code, &resolved);
    }
    if self.highlighter.supports_language(language) {
      return self.highlighter.highlight(code, language);
    }
    Err(SyntaxError::UnsupportedLanguage(resolved))
  }
}

impl std::fmt::Debug for SyntaxManager {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SyntaxManager")
      .field("highlighter", &self.highlighter.name())
      .field("config", &self.config)
      .finish()
  }
}
