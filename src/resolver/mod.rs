//! Resolver interface producing asset bundles for each deployment mode.
//!
//! The shared logic lives on the [`AssetResolver`] trait: merging external
//! assets declared by registered models, the core library assets supplied by
//! the concrete mode, and runtime configuration directives into one ordered
//! [`Bundle`]. Each deployment mode implements the trait once; callers depend
//! on the trait only.

mod cdn;
mod inline;
mod relative;

pub use cdn::CdnResolver;
pub use inline::InlineResolver;
pub use relative::RelativeResolver;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::Deserialize;
use tracing::debug;

use crate::assets::{Asset, Bundle, Kind, Message};
use crate::registry::ModelRegistry;
use crate::settings::Settings;

/// Runtime log levels understood by the PlotKit client library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  /// Most verbose level.
  Trace,
  /// Debugging output.
  Debug,
  /// Informational output.
  Info,
  /// Warnings only.
  Warn,
  /// Errors only.
  Error,
  /// Fatal errors only.
  Fatal,
}

impl LogLevel {
  /// Every recognised level, in increasing severity order.
  pub const ALL: [LogLevel; 6] = [
    LogLevel::Trace,
    LogLevel::Debug,
    LogLevel::Info,
    LogLevel::Warn,
    LogLevel::Error,
    LogLevel::Fatal,
  ];

  /// Lowercase string form passed to the client runtime.
  pub fn as_str(self) -> &'static str {
    match self {
      LogLevel::Trace => "trace",
      LogLevel::Debug => "debug",
      LogLevel::Info => "info",
      LogLevel::Warn => "warn",
      LogLevel::Error => "error",
      LogLevel::Fatal => "fatal",
    }
  }
}

impl fmt::Display for LogLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for LogLevel {
  type Err = ResourceError;

  fn from_str(value: &str) -> Result<Self, Self::Err> {
    LogLevel::ALL
      .into_iter()
      .find(|level| level.as_str() == value)
      .ok_or_else(|| ResourceError::UnknownLogLevel {
        value: value.to_string(),
      })
  }
}

/// Errors raised while configuring a resolver.
#[derive(Debug)]
pub enum ResourceError {
  /// A log level outside the recognised set was supplied.
  UnknownLogLevel {
    /// The rejected value.
    value: String,
  },
}

impl fmt::Display for ResourceError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnknownLogLevel { value } => {
        let valid: Vec<&str> = LogLevel::ALL.iter().map(|level| level.as_str()).collect();
        write!(
          f,
          "unknown log level '{}', valid levels are: {}",
          value,
          valid.join(", ")
        )
      }
    }
  }
}

impl std::error::Error for ResourceError {}

/// Optional construction-time fields for a resolver.
///
/// Unset fields fall back to process-wide [`Settings`], except `dev` which
/// defaults to `false`.
#[derive(Debug, Clone, Default)]
pub struct ResolverOptions {
  /// Enable the client runtime's development flag.
  pub dev: Option<bool>,
  /// Whether JavaScript and CSS should be minified.
  pub minified: Option<bool>,
  /// Whether legacy browser bundles should be used.
  pub legacy: Option<bool>,
  /// Runtime log level, validated against the recognised set.
  pub log_level: Option<String>,
}

/// Configuration shared by every resolver mode, resolved at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
  minified: bool,
  legacy: bool,
  dev: bool,
  log_level: Option<LogLevel>,
}

impl ResolverConfig {
  /// Resolve explicit options against process-wide settings.
  ///
  /// An invalid `log_level` is rejected before any configuration is stored.
  pub fn from_settings(
    settings: &Settings,
    options: ResolverOptions,
  ) -> Result<Self, ResourceError> {
    let log_level = match options.log_level.as_deref() {
      Some(value) => Some(value.parse::<LogLevel>()?),
      None => None,
    };

    Ok(Self {
      minified: settings.minified(options.minified),
      legacy: settings.legacy(options.legacy),
      dev: options.dev.unwrap_or(false),
      log_level: settings.log_level(log_level),
    })
  }

  /// Whether JavaScript and CSS should be minified.
  pub fn minified(&self) -> bool {
    self.minified
  }

  /// Whether legacy browser bundles should be used.
  pub fn legacy(&self) -> bool {
    self.legacy
  }

  /// Whether the client runtime's development flag is set.
  pub fn dev(&self) -> bool {
    self.dev
  }

  /// Runtime log level, when one is configured.
  pub fn log_level(&self) -> Option<LogLevel> {
    self.log_level
  }

  /// Replace the log level.
  ///
  /// The value is validated before storage is touched; on failure the prior
  /// level remains in place.
  pub fn set_log_level(&mut self, level: Option<&str>) -> Result<(), ResourceError> {
    let parsed = match level {
      Some(value) => Some(value.parse::<LogLevel>()?),
      None => None,
    };
    self.log_level = parsed;
    Ok(())
  }

  /// Copy of this configuration with the selected fields replaced.
  pub fn with_overrides(
    &self,
    dev: Option<bool>,
    minified: Option<bool>,
    legacy: Option<bool>,
  ) -> Self {
    Self {
      minified: minified.unwrap_or(self.minified),
      legacy: legacy.unwrap_or(self.legacy),
      dev: dev.unwrap_or(self.dev),
      log_level: self.log_level,
    }
  }
}

/// Interface implemented once per deployment mode.
///
/// Resolution is a pure function of the stored configuration and the current
/// registry snapshot; there is no caching across calls. The registry is
/// written only at startup, so sharing it read-only between resolver
/// instances needs no locking.
pub trait AssetResolver {
  /// Short name of the deployment mode, e.g. `"cdn"`.
  fn mode(&self) -> &'static str;

  /// Configuration resolved at construction time.
  fn config(&self) -> &ResolverConfig;

  /// Registry consulted for model-declared external assets.
  fn registry(&self) -> &ModelRegistry;

  /// Core library assets of the given kind.
  ///
  /// The returned list is order-stable and contains no duplicates within a
  /// single call. Modes that read from disk may fail.
  fn core_assets(&self, kind: Kind) -> Result<Vec<Asset>>;

  /// Sibling resolver of the same mode with the selected fields overridden.
  ///
  /// The receiver is left untouched; the sibling is independently configured.
  fn with_overrides(
    &self,
    dev: Option<bool>,
    minified: Option<bool>,
    legacy: Option<bool>,
  ) -> Self
  where
    Self: Sized;

  /// Diagnostics to attach to the resolved bundle.
  fn messages(&self) -> Vec<Message> {
    Vec::new()
  }

  /// Collect external resources declared by registered models.
  ///
  /// Models are processed sorted by qualified name, so identical registry
  /// contents always produce identical output. All stylesheet links come
  /// before all script links, each in model order.
  fn resolve_external_assets(&self) -> Vec<Asset> {
    resolve_external(self.registry())
  }

  /// Produce the complete bundle for this resolver.
  ///
  /// Order: external assets, then core JS, then the log-level directive when
  /// a level is configured, then the dev-flag directive when `dev` is set.
  fn resolve(&self) -> Result<Bundle> {
    let config = self.config();
    let mut assets = self.resolve_external_assets();
    assets.extend(self.core_assets(Kind::Js)?);

    if let Some(level) = config.log_level() {
      assets.push(Asset::Script(format!("PlotKit.set_log_level('{level}');")));
    }
    if config.dev() {
      assets.push(Asset::Script("PlotKit.settings.dev = true".to_string()));
    }

    debug!(mode = self.mode(), assets = assets.len(), "resolved asset bundle");
    Ok(Bundle::new(assets, self.messages()))
  }
}

fn resolve_external(registry: &ModelRegistry) -> Vec<Asset> {
  // One visited set spans both attribute kinds: a URL already emitted as a
  // stylesheet is skipped when a later declaration names it as a script, and
  // vice versa.
  let mut visited: BTreeSet<&str> = BTreeSet::new();
  let mut styles: Vec<Asset> = Vec::new();
  let mut scripts: Vec<Asset> = Vec::new();

  for model in registry.all_models() {
    for url in model.css().urls() {
      if visited.insert(url) {
        styles.push(Asset::StyleLink(url.clone()));
      }
    }
    for url in model.javascript().urls() {
      if visited.insert(url) {
        scripts.push(Asset::ScriptLink(url.clone()));
      }
    }
  }

  styles.into_iter().chain(scripts).collect()
}

/// File name of a core library asset, e.g. `plotkit-0.4.2.min.js`.
pub(crate) fn core_file_name(
  kind: Kind,
  version: Option<&str>,
  minified: bool,
  legacy: bool,
) -> String {
  let mut name = String::from("plotkit");
  if let Some(version) = version {
    name.push('-');
    name.push_str(version);
  }
  if legacy {
    name.push_str(".legacy");
  }
  if minified {
    name.push_str(".min");
  }
  name.push('.');
  name.push_str(kind.as_str());
  name
}
