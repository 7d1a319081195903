//! # blogmark-commonmark
//!
//! Markdown to sanitized HTML for a blog, with a heading outline for the
//! table of contents.
//!
//! ## Quick Start
//!
//! ```rust
//! use blogmark_commonmark::{MarkdownRenderer, RenderOptions};
//!
//! let renderer = MarkdownRenderer::new(RenderOptions::default());
//! let output = renderer.render("# Hello World\n\nThis is **bold** text.")?;
//!
//! println!("HTML: {}", output.html);
//! println!("TOC: {:?}", output.toc);
//! # Ok::<(), blogmark_commonmark::RenderError>(())
//! ```
//!
//! ## Features
//!
//! - **GitHub Flavored Markdown** via `comrak`: tables, strikethrough,
//!   autolinks and task lists
//! - **Heading ids** assigned GitHub-style, unique per document
//! - **Math** (`$...$`, `$$...$$`) rendered to MathML, loaded on demand
//! - **Syntax highlighting** with classed spans, loaded on demand
//! - **Code block chrome** with a language label and a copy button
//! - **Table containers** and **image caption** detection
//! - **Sanitized output**: nothing that runs script leaves the renderer
//!
//! ## Configuration
//!
//! ```rust
//! use blogmark_commonmark::{MarkdownRenderer, RenderOptionsBuilder};
//!
//! let options = RenderOptionsBuilder::new()
//!   .copy_button_label("复制")
//!   .caption_markers(["图", "figure", "abbildung"])
//!   .build();
//!
//! let renderer = MarkdownRenderer::new(options);
//! ```

pub mod error;
pub mod extensions;
pub mod passes;
pub mod processor;
pub mod sanitize;
pub mod syntax;
pub mod tree;
mod types;
pub mod utils;
pub mod walk;

pub use crate::{
  error::{RenderError, RenderResult},
  extensions::{ExtensionKind, ExtensionLoader, ExtensionRegistry},
  passes::CaptionPolicy,
  processor::{
    AstTransformer,
    MarkdownRenderer,
    RenderOptions,
    RenderOptionsBuilder,
    TreeTransformer,
    render_batch,
    render_with_recovery,
  },
  types::{HeadingEntry, RenderOutput},
};
