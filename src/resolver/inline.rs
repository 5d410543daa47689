//! Inline deployment mode embedding raw library source into the document.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::assets::{Asset, Kind};
use crate::registry::ModelRegistry;
use crate::resolver::{AssetResolver, ResolverConfig, core_file_name};

/// Resolver that embeds the core library source directly into the output.
///
/// Source files are read from a directory holding the packaged PlotKit
/// distribution; the resulting documents work without network access.
#[derive(Debug, Clone)]
pub struct InlineResolver {
  config: ResolverConfig,
  registry: Arc<ModelRegistry>,
  root: PathBuf,
}

impl InlineResolver {
  /// Create an inline resolver reading packaged sources from `root`.
  pub fn new(
    registry: Arc<ModelRegistry>,
    config: ResolverConfig,
    root: impl Into<PathBuf>,
  ) -> Self {
    Self {
      config,
      registry,
      root: root.into(),
    }
  }

  /// Directory the packaged sources are read from.
  pub fn root(&self) -> &Path {
    &self.root
  }

  fn read_core(&self, kind: Kind) -> Result<String> {
    let file = core_file_name(kind, None, self.config.minified(), self.config.legacy());
    let path = self.root.join(file);
    fs::read_to_string(&path)
      .with_context(|| format!("failed to read packaged asset at {}", path.display()))
  }
}

impl AssetResolver for InlineResolver {
  fn mode(&self) -> &'static str {
    "inline"
  }

  fn config(&self) -> &ResolverConfig {
    &self.config
  }

  fn registry(&self) -> &ModelRegistry {
    &self.registry
  }

  fn core_assets(&self, kind: Kind) -> Result<Vec<Asset>> {
    let content = self.read_core(kind)?;
    Ok(match kind {
      Kind::Js => vec![Asset::Script(content)],
      Kind::Css => vec![Asset::Style(content)],
    })
  }

  fn with_overrides(
    &self,
    dev: Option<bool>,
    minified: Option<bool>,
    legacy: Option<bool>,
  ) -> Self {
    Self {
      config: self.config.with_overrides(dev, minified, legacy),
      registry: Arc::clone(&self.registry),
      root: self.root.clone(),
    }
  }
}
