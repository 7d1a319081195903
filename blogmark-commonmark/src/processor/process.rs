//! High-level rendering functions for collaborators.
use log::error;
use rayon::prelude::*;

use super::types::MarkdownRenderer;
use crate::{error::RenderResult, types::RenderOutput};

/// Markup returned in place of a document that failed to render.
pub const ERROR_PLACEHOLDER: &str =
  "<div class=\"render-error\">Failed to render this document</div>";

/// Render with error recovery.
///
/// A failed render is logged and replaced by [`ERROR_PLACEHOLDER`] with an
/// empty table of contents, so a page can still be served.
///
/// # Arguments
///
/// * `renderer` - The configured renderer
/// * `source` - Markdown source, front-matter already removed
#[must_use]
pub fn render_with_recovery(
  renderer: &MarkdownRenderer,
  source: &str,
) -> RenderOutput {
  match renderer.render(source) {
    Ok(output) => output,
    Err(e) => {
      error!("Failed to render markdown: {e}");
      RenderOutput {
        html: ERROR_PLACEHOLDER.to_string(),
        toc:  Vec::new(),
      }
    },
  }
}

/// Render several documents concurrently.
///
/// Renders share nothing but the renderer's extension registry. Results are
/// returned in input order.
pub fn render_batch<S>(
  renderer: &MarkdownRenderer,
  sources: &[S],
) -> Vec<RenderResult<RenderOutput>>
where
  S: AsRef<str> + Sync,
{
  sources
    .par_iter()
    .map(|source| renderer.render(source.as_ref()))
    .collect()
}
