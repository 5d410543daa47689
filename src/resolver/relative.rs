//! Relative-path deployment mode for documents served next to their assets.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::assets::{Asset, Kind};
use crate::registry::ModelRegistry;
use crate::resolver::{AssetResolver, ResolverConfig, core_file_name};

const DEFAULT_ROOT: &str = "static";

/// Resolver that links core assets through paths relative to the document.
#[derive(Debug, Clone)]
pub struct RelativeResolver {
  config: ResolverConfig,
  registry: Arc<ModelRegistry>,
  root: PathBuf,
}

impl RelativeResolver {
  /// Create a relative resolver rooted at the default `static` directory.
  pub fn new(registry: Arc<ModelRegistry>, config: ResolverConfig) -> Self {
    Self {
      config,
      registry,
      root: PathBuf::from(DEFAULT_ROOT),
    }
  }

  /// Use an alternative root directory for asset links.
  pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
    self.root = root.into();
    self
  }

  /// Root directory asset links are produced under.
  pub fn root(&self) -> &Path {
    &self.root
  }

  fn link_for(&self, kind: Kind) -> String {
    let file = core_file_name(kind, None, self.config.minified(), self.config.legacy());
    // Links are URLs, so backslashes from Windows paths are normalised away.
    self
      .root
      .join(file)
      .to_string_lossy()
      .replace('\\', "/")
  }
}

impl AssetResolver for RelativeResolver {
  fn mode(&self) -> &'static str {
    "relative"
  }

  fn config(&self) -> &ResolverConfig {
    &self.config
  }

  fn registry(&self) -> &ModelRegistry {
    &self.registry
  }

  fn core_assets(&self, kind: Kind) -> Result<Vec<Asset>> {
    let link = self.link_for(kind);
    Ok(match kind {
      Kind::Js => vec![Asset::ScriptLink(link)],
      Kind::Css => vec![Asset::StyleLink(link)],
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

#[cfg(test)]
mod tests {
  use super::*;
  use crate::resolver::ResolverOptions;
  use crate::settings::Settings;

  fn resolver(options: ResolverOptions) -> RelativeResolver {
    let config = ResolverConfig::from_settings(&Settings::default(), options).unwrap();
    RelativeResolver::new(Arc::new(ModelRegistry::new()), config)
  }

  #[test]
  fn links_under_the_default_root() {
    let assets = resolver(ResolverOptions::default())
      .core_assets(Kind::Js)
      .unwrap();
    assert_eq!(assets, vec![Asset::ScriptLink("static/plotkit.min.js".into())]);
  }

  #[test]
  fn css_links_use_the_stylesheet_directive() {
    let assets = resolver(ResolverOptions {
      minified: Some(false),
      ..Default::default()
    })
    .core_assets(Kind::Css)
    .unwrap();
    assert_eq!(assets, vec![Asset::StyleLink("static/plotkit.css".into())]);
  }

  #[test]
  fn custom_root_flows_into_links() {
    let resolver = resolver(ResolverOptions::default()).with_root("assets/vendor");
    let assets = resolver.core_assets(Kind::Js).unwrap();
    assert_eq!(assets[0].url().unwrap(), "assets/vendor/plotkit.min.js");
  }

  #[test]
  fn overrides_keep_the_root() {
    let resolver = resolver(ResolverOptions::default()).with_root("assets");
    let sibling = resolver.with_overrides(None, None, Some(true));

    assert_eq!(sibling.root(), Path::new("assets"));
    let assets = sibling.core_assets(Kind::Js).unwrap();
    assert_eq!(assets[0].url().unwrap(), "assets/plotkit.legacy.min.js");
  }
}
