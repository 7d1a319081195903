pub mod templates;

use std::{
  fs,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use blogmark_commonmark::{CaptionPolicy, RenderOptions, RenderOptionsBuilder};
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, Commands};

/// File names searched for in the working directory, in order.
const CONFIG_FILENAMES: [&str; 5] = [
  "blogmark.toml",
  "blogmark.json",
  ".blogmark.toml",
  ".blogmark.json",
  ".config/blogmark.toml",
];

fn default_copy_button_label() -> String {
  RenderOptions::default().copy_button_label
}

/// Configuration options for blogmark
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  /// Text of the copy button placed above code blocks
  #[serde(default = "default_copy_button_label")]
  pub copy_button_label: String,

  /// Rules for recognising image captions
  #[serde(default)]
  pub caption: CaptionPolicy,

  /// Number of threads to use for parallel rendering
  #[serde(default)]
  pub jobs: Option<usize>,

  /// Whether to pretty-print JSON output
  #[serde(default)]
  pub pretty: bool,

  /// Whether to render front-matter as part of the document
  #[serde(default)]
  pub keep_front_matter: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      copy_button_label: default_copy_button_label(),
      caption:           CaptionPolicy::default(),
      jobs:              None,
      pretty:            false,
      keep_front_matter: false,
    }
  }
}

impl Config {
  /// Create a new configuration from a file
  /// Only TOML and JSON are supported for the time being.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, has no or an unknown
  /// extension, or does not parse.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).with_context(|| {
      format!("Failed to read config file: {}", path.display())
    })?;

    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
      anyhow::bail!("Config file has no extension: {}", path.display());
    };

    match ext.to_lowercase().as_str() {
      "json" => {
        serde_json::from_str(&content).with_context(|| {
          format!("Failed to parse JSON config from {}", path.display())
        })
      },
      "toml" => {
        toml::from_str(&content).with_context(|| {
          format!("Failed to parse TOML config from {}", path.display())
        })
      },
      _ => {
        Err(anyhow::anyhow!(
          "Unsupported config file format: {}",
          path.display()
        ))
      },
    }
  }

  /// Load config from file and CLI arguments
  ///
  /// # Errors
  ///
  /// Returns an error if an explicit or discovered config file fails to
  /// load, or if the merged configuration is invalid.
  pub fn load(cli: &Cli) -> Result<Self> {
    let mut config = if let Some(config_path) = &cli.config_file {
      Self::from_file(config_path).with_context(|| {
        format!("Failed to load config from {}", config_path.display())
      })?
    } else if let Some(discovered_config) = Self::find_config_file() {
      log::info!(
        "Using discovered config file: {}",
        discovered_config.display()
      );
      Self::from_file(&discovered_config).with_context(|| {
        format!(
          "Failed to load discovered config from {}",
          discovered_config.display()
        )
      })?
    } else {
      Self::default()
    };

    config.merge_with_cli(cli);
    config.validate()?;
    Ok(config)
  }

  /// Merge CLI arguments into this config, prioritizing CLI values when
  /// present
  pub fn merge_with_cli(&mut self, cli: &Cli) {
    self.jobs = cli.jobs.or(self.jobs);

    if let Commands::Render {
      pretty,
      copy_label,
      keep_front_matter,
      ..
    } = &cli.command
    {
      // Flags can only switch these on
      self.pretty |= *pretty;
      self.keep_front_matter |= *keep_front_matter;

      if let Some(label) = copy_label {
        self.copy_button_label.clone_from(label);
      }
    }
  }

  /// Check values that deserialize fine but cannot be used.
  ///
  /// # Errors
  ///
  /// Returns an error describing every invalid value found.
  pub fn validate(&self) -> Result<()> {
    let mut errors = Vec::new();

    if self.jobs == Some(0) {
      errors.push("jobs must be at least 1".to_string());
    }

    if self.caption.max_length == 0 {
      errors.push("caption.max_length must be at least 1".to_string());
    }

    if self
      .caption
      .markers
      .iter()
      .any(|marker| marker.trim().is_empty())
    {
      errors.push("caption.markers must not contain empty entries".to_string());
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(anyhow::anyhow!(
        "Configuration validation failed:\n{}",
        errors.join("\n")
      ))
    }
  }

  /// Renderer options derived from this configuration.
  #[must_use]
  pub fn render_options(&self) -> RenderOptions {
    RenderOptionsBuilder::new()
      .copy_button_label(self.copy_button_label.as_str())
      .caption_policy(self.caption.clone())
      .build()
  }

  /// Search for config files in common locations
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    if let Some(path) = std::env::current_dir()
      .ok()
      .and_then(|dir| Self::find_config_file_in(&dir))
    {
      return Some(path);
    }

    // If we have a $XDG_CONFIG_HOME environment variable, check there too
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
      let xdg_config_dir = PathBuf::from(xdg_config_home);
      for filename in ["blogmark.toml", "blogmark.json"] {
        let config_path = xdg_config_dir.join(filename);
        if config_path.exists() {
          return Some(config_path);
        }
      }
    }

    None
  }

  /// First of the standard config file names present in `dir`.
  #[must_use]
  pub fn find_config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|filename| dir.join(filename))
      .find(|path| path.is_file())
  }

  /// Write the default configuration template to `path`.
  ///
  /// # Errors
  ///
  /// Returns an error for an unknown format or if the file cannot be
  /// written.
  pub fn generate_default_config(format: &str, path: &Path) -> Result<()> {
    let template = templates::get_template(format)?;
    fs::write(path, template).with_context(|| {
      format!("Failed to write configuration to {}", path.display())
    })?;
    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use clap::Parser;
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_default_matches_render_defaults() {
    let config = Config::default();
    assert_eq!(config.render_options(), RenderOptions::default());
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_templates_parse_to_defaults() {
    let toml_config: Config =
      toml::from_str(templates::DEFAULT_TOML_TEMPLATE).expect("valid toml");
    let json_config: Config =
      serde_json::from_str(templates::DEFAULT_JSON_TEMPLATE)
        .expect("valid json");

    assert_eq!(toml_config, Config::default());
    assert_eq!(json_config, Config::default());
  }

  #[test]
  fn test_from_file_partial_toml() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("blogmark.toml");
    fs::write(&path, "copy_button_label = \"复制\"\n[caption]\nmax_length = 80\n")
      .expect("write config");

    let config = Config::from_file(&path).expect("config loads");
    assert_eq!(config.copy_button_label, "复制");
    assert_eq!(config.caption.max_length, 80);
    assert_eq!(config.caption.markers, CaptionPolicy::default().markers);
  }

  #[test]
  fn test_from_file_rejects_unknown_extension() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("blogmark.yaml");
    fs::write(&path, "pretty: true\n").expect("write config");
    assert!(Config::from_file(&path).is_err());
  }

  #[test]
  fn test_find_config_file_in_prefers_first_name() {
    let dir = tempdir().expect("temp dir");
    assert!(Config::find_config_file_in(dir.path()).is_none());

    fs::write(dir.path().join(".blogmark.toml"), "").expect("write config");
    fs::write(dir.path().join("blogmark.json"), "{}").expect("write config");

    let found = Config::find_config_file_in(dir.path()).expect("found");
    assert_eq!(found, dir.path().join("blogmark.json"));
  }

  #[test]
  fn test_cli_overrides_config() {
    let cli = Cli::try_parse_from([
      "blogmark",
      "render",
      "post.md",
      "--copy-label",
      "Kopieren",
      "--pretty",
      "--jobs",
      "3",
    ])
    .expect("valid arguments");

    let mut config = Config {
      jobs: Some(8),
      ..Config::default()
    };
    config.merge_with_cli(&cli);

    assert_eq!(config.jobs, Some(3));
    assert!(config.pretty);
    assert!(!config.keep_front_matter);
    assert_eq!(config.render_options().copy_button_label, "Kopieren");
  }

  #[test]
  fn test_validate_reports_every_problem() {
    let config = Config {
      jobs: Some(0),
      caption: CaptionPolicy {
        markers:    vec![String::new()],
        max_length: 0,
      },
      ..Config::default()
    };
    let message = config.validate().expect_err("invalid").to_string();
    assert!(message.contains("jobs"));
    assert!(message.contains("max_length"));
    assert!(message.contains("markers"));
  }

  #[test]
  fn test_generate_default_config() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("blogmark.json");
    Config::generate_default_config("json", &path).expect("generated");
    assert_eq!(
      Config::from_file(&path).expect("loads back"),
      Config::default()
    );
    assert!(Config::generate_default_config("ini", &path).is_err());
  }
}
