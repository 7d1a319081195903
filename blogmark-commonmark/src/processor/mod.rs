//! Markdown rendering pipeline.
//!
//! # Architecture
//!
//! The processor module is organized into focused submodules:
//!
//! - [`core`]: The renderer and its staged pipeline
//! - [`process`]: Rendering helpers with error recovery and batching
//! - [`types`]: Options, the render plan and the transformer traits
//!
//! A render runs these stages in order:
//!
//! 1. Empty input short-circuits.
//! 2. A [`RenderPlan`] decides which extensions are needed.
//! 3. Needed extensions are fetched from the registry.
//! 4. comrak parses the source into its AST.
//! 5. [`AstTransformer`]s rewrite the AST (math).
//! 6. comrak's HTML is parsed into the presentational tree.
//! 7. [`TreeTransformer`]s enhance the tree in a fixed order.
//! 8. The table of contents is extracted.
//! 9. The tree is serialized.
//! 10. The HTML is sanitized.
pub mod core;
pub mod process;
pub mod types;

pub use process::{ERROR_PLACEHOLDER, render_batch, render_with_recovery};
pub use types::{
  AstTransformer,
  MarkdownRenderer,
  RenderOptions,
  RenderOptionsBuilder,
  RenderPlan,
  TreeTransformer,
};
