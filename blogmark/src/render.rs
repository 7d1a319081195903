//! The `render` command: Markdown files in, JSON out.
use std::{
  fs,
  io::{self, Write},
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use blogmark_commonmark::{
  HeadingEntry,
  MarkdownRenderer,
  render_with_recovery,
};
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;
use serde_yaml::Mapping;

use crate::{config::Config, frontmatter::split_front_matter};

/// One rendered post as emitted on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPost {
  /// Source file the post was read from.
  pub path: PathBuf,

  /// Front-matter, echoed as-is.
  pub front_matter: Mapping,

  /// Sanitized HTML body.
  pub html: String,

  /// Headings of depth 1-3 in document order.
  pub toc: Vec<HeadingEntry>,
}

/// A source file read from disk, front-matter split off.
struct Source {
  path:         PathBuf,
  front_matter: Mapping,
  body:         String,
}

fn read_source(path: &Path, keep_front_matter: bool) -> Result<Source> {
  let content = fs::read_to_string(path)
    .with_context(|| format!("Failed to read {}", path.display()))?;

  if keep_front_matter {
    return Ok(Source {
      path:         path.to_path_buf(),
      front_matter: Mapping::new(),
      body:         content,
    });
  }

  let document = split_front_matter(&content).with_context(|| {
    format!("Failed to parse front-matter in {}", path.display())
  })?;
  debug!(
    "{}: {} front-matter keys",
    path.display(),
    document.front_matter.len()
  );

  Ok(Source {
    path:         path.to_path_buf(),
    front_matter: document.front_matter,
    body:         document.body.to_string(),
  })
}

/// Render every file in `files`, in order.
///
/// Files are read and rendered in parallel on the global rayon pool. A post
/// that fails to render is replaced by the renderer's error placeholder, so
/// one bad post does not sink the batch.
///
/// # Errors
///
/// Returns an error if a file cannot be read or has malformed front-matter.
pub fn render_files(
  config: &Config,
  files: &[PathBuf],
) -> Result<Vec<RenderedPost>> {
  let sources = files
    .par_iter()
    .map(|path| read_source(path, config.keep_front_matter))
    .collect::<Result<Vec<_>>>()?;

  let renderer = MarkdownRenderer::new(config.render_options());
  let posts: Vec<RenderedPost> = sources
    .into_par_iter()
    .map(|source| {
      let output = render_with_recovery(&renderer, &source.body);
      debug!(
        "Rendered {} ({} headings)",
        source.path.display(),
        output.toc.len()
      );
      RenderedPost {
        path:         source.path,
        front_matter: source.front_matter,
        html:         output.html,
        toc:          output.toc,
      }
    })
    .collect();

  info!("Rendered {} post(s)", posts.len());
  Ok(posts)
}

/// Serialize `posts` as a JSON array.
///
/// # Errors
///
/// Returns an error if a post's front-matter cannot be represented in JSON,
/// for example a mapping used as a key.
pub fn to_json(posts: &[RenderedPost], pretty: bool) -> Result<String> {
  let json = if pretty {
    serde_json::to_string_pretty(posts)
  } else {
    serde_json::to_string(posts)
  };
  json.context("Failed to serialize rendered posts")
}

/// Write `posts` as JSON to `output`, or to stdout when `None`.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_output(
  posts: &[RenderedPost],
  pretty: bool,
  output: Option<&Path>,
) -> Result<()> {
  let mut json = to_json(posts, pretty)?;
  json.push('\n');

  match output {
    Some(path) => {
      if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
          fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create directory: {}", parent.display())
          })?;
        }
      }
      fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
      info!("Wrote {}", path.display());
    },
    None => {
      io::stdout()
        .lock()
        .write_all(json.as_bytes())
        .context("Failed to write to stdout")?;
    },
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]
  use serde_json::Value;
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_read_source_splits_front_matter() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("post.md");
    fs::write(&path, "---\ntitle: Post\n---\n# Body\n").expect("write post");

    let source = read_source(&path, false).expect("source");
    assert_eq!(source.body, "# Body\n");
    assert_eq!(source.front_matter.len(), 1);

    let kept = read_source(&path, true).expect("source");
    assert!(kept.body.starts_with("---\n"));
    assert!(kept.front_matter.is_empty());
  }

  #[test]
  fn test_read_source_reports_path() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("missing.md");
    let err = read_source(&path, false).err().expect("missing file fails");
    assert!(format!("{err:#}").contains("missing.md"));
  }

  #[test]
  fn test_to_json_shape() {
    let post = RenderedPost {
      path:         PathBuf::from("a.md"),
      front_matter: Mapping::new(),
      html:         "<p>x</p>".to_string(),
      toc:          vec![HeadingEntry {
        id:    "x".to_string(),
        text:  "X".to_string(),
        depth: 1,
      }],
    };

    let json = to_json(&[post], false).expect("serializes");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value[0]["path"], "a.md");
    assert_eq!(value[0]["html"], "<p>x</p>");
    assert_eq!(value[0]["toc"][0]["depth"], 1);
    assert!(value[0]["front_matter"].is_object());
  }
}
