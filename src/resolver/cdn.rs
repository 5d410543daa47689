//! CDN deployment mode linking against published PlotKit releases.

use std::sync::Arc;

use anyhow::Result;
use tracing::warn;

use crate::assets::{Asset, Kind, Message};
use crate::registry::ModelRegistry;
use crate::resolver::{AssetResolver, ResolverConfig, core_file_name};

const DEFAULT_CDN_ROOT: &str = "https://cdn.plotkit.org/plotkit/release";

const INSTALLED_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resolver that links core assets from the public PlotKit CDN.
///
/// The version defaults to the installed library version and may be pinned to
/// another published release with [`CdnResolver::with_version`].
#[derive(Debug, Clone)]
pub struct CdnResolver {
  config: ResolverConfig,
  registry: Arc<ModelRegistry>,
  root: String,
  version: String,
}

impl CdnResolver {
  /// Create a CDN resolver for the installed library version.
  pub fn new(registry: Arc<ModelRegistry>, config: ResolverConfig) -> Self {
    Self {
      config,
      registry,
      root: DEFAULT_CDN_ROOT.to_string(),
      version: INSTALLED_VERSION.to_string(),
    }
  }

  /// Pin resolution to a specific published version.
  pub fn with_version(mut self, version: impl Into<String>) -> Self {
    self.version = version.into();
    self
  }

  /// Use an alternative CDN root URL.
  pub fn with_root(mut self, root: impl Into<String>) -> Self {
    self.root = root.into();
    self
  }

  /// Version the resolver links against.
  pub fn version(&self) -> &str {
    &self.version
  }

  fn url_for(&self, kind: Kind) -> String {
    let file = core_file_name(
      kind,
      Some(&self.version),
      self.config.minified(),
      self.config.legacy(),
    );
    format!("{}/{}", self.root, file)
  }
}

impl AssetResolver for CdnResolver {
  fn mode(&self) -> &'static str {
    "cdn"
  }

  fn config(&self) -> &ResolverConfig {
    &self.config
  }

  fn registry(&self) -> &ModelRegistry {
    &self.registry
  }

  fn core_assets(&self, kind: Kind) -> Result<Vec<Asset>> {
    let url = self.url_for(kind);
    Ok(match kind {
      Kind::Js => vec![Asset::ScriptLink(url)],
      Kind::Css => vec![Asset::StyleLink(url)],
    })
  }

  fn messages(&self) -> Vec<Message> {
    if self.version == INSTALLED_VERSION {
      return Vec::new();
    }

    warn!(
      requested = %self.version,
      installed = INSTALLED_VERSION,
      "pinned cdn version differs from the installed library"
    );
    vec![Message::warn(format!(
      "Requested PlotKit version '{}' differs from the installed library version '{}'; \
       rendered output may not match the runtime.",
      self.version, INSTALLED_VERSION
    ))]
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
      version: self.version.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::resolver::ResolverOptions;
  use crate::settings::Settings;

  fn resolver(options: ResolverOptions) -> CdnResolver {
    let config = ResolverConfig::from_settings(&Settings::default(), options).unwrap();
    CdnResolver::new(Arc::new(ModelRegistry::new()), config)
  }

  #[test]
  fn links_minified_release_by_default() {
    let assets = resolver(ResolverOptions::default())
      .core_assets(Kind::Js)
      .unwrap();

    assert_eq!(assets, vec![Asset::ScriptLink(format!(
      "{DEFAULT_CDN_ROOT}/plotkit-{INSTALLED_VERSION}.min.js"
    ))]);
  }

  #[test]
  fn honours_minified_and_legacy_flags() {
    let resolver = resolver(ResolverOptions {
      minified: Some(false),
      legacy: Some(true),
      ..Default::default()
    });

    let assets = resolver.core_assets(Kind::Css).unwrap();
    assert_eq!(assets, vec![Asset::StyleLink(format!(
      "{DEFAULT_CDN_ROOT}/plotkit-{INSTALLED_VERSION}.legacy.css"
    ))]);
  }

  #[test]
  fn pinned_version_appears_in_urls() {
    let resolver = resolver(ResolverOptions::default()).with_version("0.3.0");
    let assets = resolver.core_assets(Kind::Js).unwrap();

    assert_eq!(assets[0].url().unwrap(), format!(
      "{DEFAULT_CDN_ROOT}/plotkit-0.3.0.min.js"
    ));
  }

  #[test]
  fn no_messages_for_the_installed_version() {
    assert!(resolver(ResolverOptions::default()).messages().is_empty());
  }

  #[test]
  fn warns_when_pinned_to_another_version() {
    let resolver = resolver(ResolverOptions::default()).with_version("0.3.0");
    let messages = resolver.messages();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].kind, "warn");
    assert!(messages[0].text.contains("0.3.0"));
    assert!(messages[0].text.contains(INSTALLED_VERSION));
  }

  #[test]
  fn resolve_attaches_version_warning() {
    let resolver = resolver(ResolverOptions::default()).with_version("0.3.0");
    let bundle = resolver.resolve().unwrap();
    assert_eq!(bundle.messages().len(), 1);
  }

  #[test]
  fn overrides_keep_mode_and_version() {
    let resolver = resolver(ResolverOptions::default()).with_version("0.3.0");
    let sibling = resolver.with_overrides(None, Some(false), None);

    assert_eq!(sibling.mode(), "cdn");
    assert_eq!(sibling.version(), "0.3.0");
    assert!(resolver.config().minified());
    assert!(!sibling.config().minified());
  }
}
