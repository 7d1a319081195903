use thiserror::Error;

/// Error type for template operations.
#[derive(Debug, Error)]
pub enum TemplateError {
  /// The requested configuration format is not supported.
  #[error("Unsupported config format: {0}")]
  UnsupportedFormat(String),
}

/// Default configuration template in TOML, commented so that each field
/// explains itself.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# blogmark configuration file

# Text of the copy button placed above code blocks
copy_button_label = "Copy"

# Number of threads to use for rendering (defaults to number of CPU cores)
# jobs = 4

# Pretty-print the JSON written by `blogmark render`
pretty = false

# Render front-matter as part of the document instead of splitting it off
keep_front_matter = false

# Rules for recognising image captions
[caption]
# Prefixes that open a caption, matched case-insensitively
markers = ["图", "figure"]

# Captions must be shorter than this many characters
max_length = 200
"#;

/// Default configuration template in JSON.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "copy_button_label": "Copy",
  "pretty": false,
  "keep_front_matter": false,
  "caption": {
    "markers": ["图", "figure"],
    "max_length": 200
  }
}
"#;

/// Get the default template for a configuration format.
///
/// # Errors
///
/// Returns [`TemplateError::UnsupportedFormat`] for anything but `toml` or
/// `json`.
pub fn get_template(format: &str) -> Result<&'static str, TemplateError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(TemplateError::UnsupportedFormat(format.to_string())),
  }
}
