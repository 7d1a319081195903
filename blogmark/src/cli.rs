use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for blogmark
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "blogmark: render Markdown blog posts into sanitized HTML"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to a configuration file (TOML or JSON). When omitted, standard
  /// locations are searched.
  #[arg(short = 'c', long = "config-file", global = true)]
  pub config_file: Option<PathBuf>,

  /// Number of threads to use for parallel rendering.
  #[arg(short = 'p', long = "jobs", global = true)]
  pub jobs: Option<usize>,
}

/// All supported subcommands for the blogmark CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Initialize a new blogmark configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "blogmark.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Render Markdown files and print the results as JSON.
  Render {
    /// Markdown files to render.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Write the JSON to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pretty: bool,

    /// Label of the copy button placed on code blocks.
    #[arg(long = "copy-label")]
    copy_label: Option<String>,

    /// Render the whole file, leaving any front-matter in the body.
    #[arg(long = "keep-front-matter", action = clap::ArgAction::SetTrue)]
    keep_front_matter: bool,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, clippy::panic, reason = "Fine in tests")]
  use super::*;

  #[test]
  fn test_render_arguments() {
    let cli = Cli::try_parse_from([
      "blogmark",
      "-v",
      "render",
      "a.md",
      "b.md",
      "--pretty",
      "--copy-label",
      "复制",
      "-p",
      "2",
    ])
    .expect("valid arguments");

    assert!(cli.verbose);
    assert_eq!(cli.jobs, Some(2));
    let Commands::Render {
      files,
      pretty,
      copy_label,
      keep_front_matter,
      output,
    } = cli.command
    else {
      panic!("expected render command");
    };
    assert_eq!(files, vec![PathBuf::from("a.md"), PathBuf::from("b.md")]);
    assert!(pretty);
    assert!(!keep_front_matter);
    assert_eq!(copy_label.as_deref(), Some("复制"));
    assert!(output.is_none());
  }

  #[test]
  fn test_render_requires_files() {
    assert!(Cli::try_parse_from(["blogmark", "render"]).is_err());
  }

  #[test]
  fn test_init_defaults() {
    let cli =
      Cli::try_parse_from(["blogmark", "init"]).expect("valid arguments");
    let Commands::Init {
      output,
      format,
      force,
    } = cli.command
    else {
      panic!("expected init command");
    };
    assert_eq!(output, PathBuf::from("blogmark.toml"));
    assert_eq!(format, "toml");
    assert!(!force);
  }

  #[test]
  fn test_init_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["blogmark", "init", "-F", "yaml"]).is_err());
  }
}
