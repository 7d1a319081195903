//! Lazily loaded rendering extensions.
//!
//! Math rendering and syntax highlighting are expensive to set up, and most
//! documents need neither. The [`ExtensionRegistry`] loads each one on first
//! use and shares it with every later render in the process. Concurrent first
//! requests for the same extension wait for a single in-flight load; a load
//! that fails is not remembered, so a later render retries it.
pub mod math;

use std::{
  fmt,
  sync::{
    Arc,
    LazyLock,
    atomic::{AtomicUsize, Ordering},
  },
};

use log::debug;
use once_cell::sync::OnceCell;

pub use self::math::{
  MathError,
  MathMlRenderer,
  MathRenderer,
  MathTransformer,
};
use crate::syntax::{SyntaxManager, create_default_manager};

/// The extensions a render may need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
  /// TeX to MathML conversion.
  Math,
  /// Code block syntax highlighting.
  Highlight,
}

impl fmt::Display for ExtensionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Math => f.write_str("math"),
      Self::Highlight => f.write_str("highlight"),
    }
  }
}

/// Errors raised while loading an extension.
#[derive(Debug, thiserror::Error)]
pub enum ExtensionError {
  #[error("Failed to load {kind} extension: {reason}")]
  Load { kind: ExtensionKind, reason: String },
}

impl ExtensionError {
  /// Build a load error for `kind` from any displayable cause.
  pub fn load(kind: ExtensionKind, reason: impl fmt::Display) -> Self {
    Self::Load {
      kind,
      reason: reason.to_string(),
    }
  }

  /// The extension that failed to load.
  #[must_use]
  pub const fn kind(&self) -> ExtensionKind {
    match self {
      Self::Load { kind, .. } => *kind,
    }
  }
}

/// Constructs extension instances. The registry calls into a loader at most
/// once per successful load.
pub trait ExtensionLoader: Send + Sync {
  /// Build the math renderer.
  ///
  /// # Errors
  ///
  /// Returns an error if the renderer cannot be constructed.
  fn load_math(&self) -> Result<Arc<dyn MathRenderer>, ExtensionError>;

  /// Build the syntax highlighter.
  ///
  /// # Errors
  ///
  /// Returns an error if the highlighting backend cannot be initialized.
  fn load_highlighter(&self) -> Result<Arc<SyntaxManager>, ExtensionError>;
}

/// Loader for the bundled extensions: MathML output and the syntect backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultLoader;

impl ExtensionLoader for DefaultLoader {
  fn load_math(&self) -> Result<Arc<dyn MathRenderer>, ExtensionError> {
    Ok(Arc::new(MathMlRenderer))
  }

  fn load_highlighter(&self) -> Result<Arc<SyntaxManager>, ExtensionError> {
    create_default_manager()
      .map(Arc::new)
      .map_err(|e| ExtensionError::load(ExtensionKind::Highlight, e))
  }
}

/// Process-wide cache of loaded extensions.
pub struct ExtensionRegistry {
  loader:      Box<dyn ExtensionLoader>,
  math:        OnceCell<Arc<dyn MathRenderer>>,
  highlighter: OnceCell<Arc<SyntaxManager>>,
  loads:       AtomicUsize,
}

static GLOBAL: LazyLock<Arc<ExtensionRegistry>> =
  LazyLock::new(|| Arc::new(ExtensionRegistry::new()));

impl ExtensionRegistry {
  /// Create an empty registry backed by the [`DefaultLoader`].
  #[must_use]
  pub fn new() -> Self {
    Self::with_loader(Box::new(DefaultLoader))
  }

  /// Create an empty registry backed by a custom loader.
  #[must_use]
  pub fn with_loader(loader: Box<dyn ExtensionLoader>) -> Self {
    Self {
      loader,
      math: OnceCell::new(),
      highlighter: OnceCell::new(),
      loads: AtomicUsize::new(0),
    }
  }

  /// The registry shared by every renderer that was not given its own.
  #[must_use]
  pub fn global() -> Arc<Self> {
    Arc::clone(&GLOBAL)
  }

  /// Get the math renderer, loading it on first use.
  ///
  /// # Errors
  ///
  /// Returns the loader's error if the renderer is not loaded yet and
  /// loading fails.
  pub fn math(&self) -> Result<Arc<dyn MathRenderer>, ExtensionError> {
    self
      .math
      .get_or_try_init(|| {
        debug!("Loading math extension");
        self.loads.fetch_add(1, Ordering::Relaxed);
        self.loader.load_math()
      })
      .map(Arc::clone)
  }

  /// Get the syntax highlighter, loading it on first use.
  ///
  /// # Errors
  ///
  /// Returns the loader's error if the highlighter is not loaded yet and
  /// loading fails.
  pub fn highlighter(&self) -> Result<Arc<SyntaxManager>, ExtensionError> {
    self
      .highlighter
      .get_or_try_init(|| {
        debug!("Loading highlight extension");
        self.loads.fetch_add(1, Ordering::Relaxed);
        self.loader.load_highlighter()
      })
      .map(Arc::clone)
  }

  /// Make sure `kind` is loaded.
  ///
  /// # Errors
  ///
  /// Returns the loader's error if loading fails.
  pub fn ensure(&self, kind: ExtensionKind) -> Result<(), ExtensionError> {
    match kind {
      ExtensionKind::Math => self.math().map(drop),
      ExtensionKind::Highlight => self.highlighter().map(drop),
    }
  }

  /// Whether `kind` has been loaded successfully.
  #[must_use]
  pub fn is_loaded(&self, kind: ExtensionKind) -> bool {
    match kind {
      ExtensionKind::Math => self.math.get().is_some(),
      ExtensionKind::Highlight => self.highlighter.get().is_some(),
    }
  }

  /// How many times the loader has been invoked, failed attempts included.
  #[must_use]
  pub fn load_count(&self) -> usize {
    self.loads.load(Ordering::Relaxed)
  }
}

impl Default for ExtensionRegistry {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for ExtensionRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ExtensionRegistry")
      .field("math", &self.is_loaded(ExtensionKind::Math))
      .field("highlight", &self.is_loaded(ExtensionKind::Highlight))
      .field("loads", &self.load_count())
      .finish_non_exhaustive()
  }
}
