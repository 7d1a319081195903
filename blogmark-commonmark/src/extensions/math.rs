//! TeX math rendering.
use comrak::nodes::{AstNode, NodeValue};
use latex2mathml::{DisplayStyle, latex_to_mathml};
use log::warn;

use crate::processor::AstTransformer;

/// Errors produced while converting a single formula.
#[derive(Debug, thiserror::Error)]
pub enum MathError {
  #[error("Invalid TeX `{tex}`: {reason}")]
  Invalid { tex: String, reason: String },
}

/// Converts TeX source into markup that browsers can display.
pub trait MathRenderer: Send + Sync {
  /// Backend name, for logging.
  fn name(&self) -> &'static str;

  /// Render one formula. `display` selects block layout.
  ///
  /// # Errors
  ///
  /// Returns [`MathError::Invalid`] when the TeX cannot be converted.
  fn render(&self, tex: &str, display: bool) -> Result<String, MathError>;
}

/// Marker `latex2mathml` embeds in its output for tokens it cannot parse.
const PARSE_ERROR_MARKER: &str = "[PARSE ERROR";

/// Renders TeX to MathML with `latex2mathml`.
///
/// Unknown commands and dangling operators come back from the backend as
/// `Ok` with an error message inside `<mtext>`; those are reported as
/// [`MathError::Invalid`] so the message never reaches a reader.
#[derive(Debug, Default, Clone, Copy)]
pub struct MathMlRenderer;

impl MathRenderer for MathMlRenderer {
  fn name(&self) -> &'static str {
    "MathML"
  }

  fn render(&self, tex: &str, display: bool) -> Result<String, MathError> {
    let style = if display {
      DisplayStyle::Block
    } else {
      DisplayStyle::Inline
    };
    let invalid = |reason: String| {
      MathError::Invalid {
        tex: tex.to_string(),
        reason,
      }
    };

    let markup =
      latex_to_mathml(tex, style).map_err(|e| invalid(e.to_string()))?;
    match markup.find(PARSE_ERROR_MARKER) {
      Some(start) => {
        let rest = &markup[start + 1..];
        let reason = rest.find(']').map_or(rest, |end| &rest[..end]);
        Err(invalid(reason.to_string()))
      },
      None => Ok(markup),
    }
  }
}

/// Render a formula and wrap it for inline placement in the document.
///
/// A formula that fails to convert is shown as its escaped source inside
/// `<code class="math-error">`.
#[must_use]
pub fn math_markup(
  renderer: &dyn MathRenderer,
  tex: &str,
  display: bool,
) -> String {
  let class = if display {
    "math math-display"
  } else {
    "math math-inline"
  };
  match renderer.render(tex, display) {
    Ok(markup) => format!("<span class=\"{class}\">{markup}</span>"),
    Err(e) => {
      warn!("{} renderer rejected formula: {e}", renderer.name());
      format!(
        "<code class=\"math-error\">{}</code>",
        html_escape::encode_text(tex)
      )
    },
  }
}

/// AST transformer replacing `$...$` and `$$...$$` math nodes with rendered
/// markup.
pub struct MathTransformer<'r> {
  renderer: &'r dyn MathRenderer,
}

impl<'r> MathTransformer<'r> {
  #[must_use]
  pub fn new(renderer: &'r dyn MathRenderer) -> Self {
    Self { renderer }
  }
}

impl AstTransformer for MathTransformer<'_> {
  fn transform<'a>(&self, node: &'a AstNode<'a>) {
    for child in node.children() {
      {
        let mut data = child.data.borrow_mut();
        if let NodeValue::Math(ref math) = data.value {
          let html =
            math_markup(self.renderer, &math.literal, math.display_math);
          data.value = NodeValue::HtmlInline(html);
        }
      }
      self.transform(child);
    }
  }
}
