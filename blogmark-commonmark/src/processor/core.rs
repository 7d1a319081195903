//! Core implementation of the Markdown renderer.
//!
//! This module contains the main implementation of `MarkdownRenderer`: the
//! staged pipeline from Markdown source to sanitized HTML and a table of
//! contents.
use std::sync::Arc;

use comrak::{Arena, options::Options, parse_document};
use log::{debug, trace};

use super::types::{
  AstTransformer,
  MarkdownRenderer,
  RenderOptions,
  RenderPlan,
  TreeTransformer,
};
use crate::{
  error::RenderResult,
  extensions::{ExtensionRegistry, MathRenderer, MathTransformer},
  passes::{
    CaptionTransformer,
    CodeBlockTransformer,
    HighlightTransformer,
    SlugTransformer,
    TableTransformer,
    extract_toc,
  },
  sanitize::sanitize_html,
  syntax::SyntaxManager,
  tree,
  types::RenderOutput,
};

impl MarkdownRenderer {
  /// Create a renderer backed by the process-wide extension registry.
  #[must_use]
  pub fn new(options: RenderOptions) -> Self {
    Self::with_registry(options, ExtensionRegistry::global())
  }

  /// Create a renderer backed by the given registry.
  #[must_use]
  pub const fn with_registry(
    options: RenderOptions,
    registry: Arc<ExtensionRegistry>,
  ) -> Self {
    Self { options, registry }
  }

  /// Access renderer options.
  #[must_use]
  pub const fn options(&self) -> &RenderOptions {
    &self.options
  }

  /// The registry extensions are loaded from.
  #[must_use]
  pub fn registry(&self) -> &ExtensionRegistry {
    &self.registry
  }

  /// Render Markdown to sanitized HTML, extracting the table of contents.
  ///
  /// Empty input returns an empty output without loading anything.
  ///
  /// # Errors
  ///
  /// Returns an error if an extension the document needs fails to load, or
  /// if producing the HTML fails. Malformed Markdown is not an error.
  pub fn render(&self, source: &str) -> RenderResult<RenderOutput> {
    if source.is_empty() {
      return Ok(RenderOutput::default());
    }

    let plan = RenderPlan::for_source(source);
    debug!("Rendering {} bytes with {plan:?}", source.len());

    let math = if plan.math {
      Some(self.registry.math()?)
    } else {
      None
    };
    let highlighter = if plan.highlight {
      Some(self.registry.highlighter()?)
    } else {
      None
    };

    let html = Self::convert_to_html(source, plan, math.as_deref())?;
    let root = tree::parse_fragment(&html);

    for transformer in self.tree_transformers(highlighter) {
      trace!("Applying {} pass", transformer.name());
      transformer.transform(&root);
    }

    let toc = extract_toc(&root);
    let html = tree::serialize(&root)?;

    Ok(RenderOutput {
      html: sanitize_html(&html),
      toc,
    })
  }

  /// The enhancement passes for one render, in application order.
  fn tree_transformers(
    &self,
    highlighter: Option<Arc<SyntaxManager>>,
  ) -> Vec<Box<dyn TreeTransformer>> {
    let mut transformers: Vec<Box<dyn TreeTransformer>> =
      vec![Box::new(SlugTransformer)];
    if let Some(manager) = highlighter {
      transformers.push(Box::new(HighlightTransformer::new(manager)));
    }
    transformers.push(Box::new(CodeBlockTransformer::new(
      self.options.copy_button_label.as_str(),
    )));
    transformers.push(Box::new(TableTransformer));
    transformers
      .push(Box::new(CaptionTransformer::new(self.options.caption.clone())));
    transformers
  }

  /// Parse with comrak, apply AST transformations and format as HTML.
  fn convert_to_html(
    source: &str,
    plan: RenderPlan,
    math: Option<&dyn MathRenderer>,
  ) -> RenderResult<String> {
    let arena = Arena::new();
    let options = Self::comrak_options(plan);
    let root = parse_document(&arena, source, &options);

    if let Some(renderer) = math {
      MathTransformer::new(renderer).transform(root);
    }

    let mut html = String::new();
    comrak::format_html(root, &options, &mut html)?;
    Ok(html)
  }

  /// Build comrak options for a plan.
  fn comrak_options(plan: RenderPlan) -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.tasklist = true;
    options.extension.autolink = true;
    options.extension.math_dollars = plan.math;
    // Raw HTML passes through here; sanitization happens at the end.
    options.render.r#unsafe = true;
    // Heading ids are assigned by the slug pass
    options.extension.header_ids = None;
    options
  }
}
