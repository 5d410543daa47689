//! Registry of model descriptors and the external assets they declare.

use std::collections::BTreeMap;
use std::slice;

/// External asset attribute on a model: absent, one URL, or several.
///
/// Mirrors the attribute shape models declare: nothing at all, a single URL
/// string, or a list of URL strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExternalUrls {
  /// The model declares no asset of this kind.
  #[default]
  Absent,
  /// A single URL.
  One(String),
  /// A list of URLs, in declaration order.
  Many(Vec<String>),
}

impl ExternalUrls {
  /// Declared URLs as a slice, empty when absent.
  pub fn urls(&self) -> &[String] {
    match self {
      ExternalUrls::Absent => &[],
      ExternalUrls::One(url) => slice::from_ref(url),
      ExternalUrls::Many(urls) => urls,
    }
  }
}

impl From<&str> for ExternalUrls {
  fn from(url: &str) -> Self {
    ExternalUrls::One(url.to_string())
  }
}

impl From<String> for ExternalUrls {
  fn from(url: String) -> Self {
    ExternalUrls::One(url)
  }
}

impl From<Vec<String>> for ExternalUrls {
  fn from(urls: Vec<String>) -> Self {
    ExternalUrls::Many(urls)
  }
}

impl From<Vec<&str>> for ExternalUrls {
  fn from(urls: Vec<&str>) -> Self {
    ExternalUrls::Many(urls.into_iter().map(str::to_string).collect())
  }
}

/// One registered model and the external assets it declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelDescriptor {
  qualified_name: String,
  css: ExternalUrls,
  javascript: ExternalUrls,
}

impl ModelDescriptor {
  /// Create a descriptor with no declared assets.
  pub fn new(qualified_name: impl Into<String>) -> Self {
    Self {
      qualified_name: qualified_name.into(),
      css: ExternalUrls::Absent,
      javascript: ExternalUrls::Absent,
    }
  }

  /// Declare external stylesheets for this model.
  pub fn with_css(mut self, urls: impl Into<ExternalUrls>) -> Self {
    self.css = urls.into();
    self
  }

  /// Declare external scripts for this model.
  pub fn with_javascript(mut self, urls: impl Into<ExternalUrls>) -> Self {
    self.javascript = urls.into();
    self
  }

  /// Fully qualified model name, e.g. `"models.tools.HoverTool"`.
  pub fn qualified_name(&self) -> &str {
    &self.qualified_name
  }

  /// Declared external stylesheet URLs.
  pub fn css(&self) -> &ExternalUrls {
    &self.css
  }

  /// Declared external script URLs.
  pub fn javascript(&self) -> &ExternalUrls {
    &self.javascript
  }
}

/// Append-only collection of model descriptors keyed by qualified name.
///
/// Populated once while models are defined, before any resolution runs;
/// resolvers only read from it afterwards. Registering a descriptor under an
/// already-registered name replaces the earlier entry.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
  models: BTreeMap<String, ModelDescriptor>,
}

impl ModelRegistry {
  /// Create an empty registry.
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a model descriptor.
  pub fn register(&mut self, descriptor: ModelDescriptor) {
    self
      .models
      .insert(descriptor.qualified_name.clone(), descriptor);
  }

  /// All registered models, sorted by qualified name.
  pub fn all_models(&self) -> impl Iterator<Item = &ModelDescriptor> {
    self.models.values()
  }

  /// Number of registered models.
  pub fn len(&self) -> usize {
    self.models.len()
  }

  /// Returns `true` when no models have been registered.
  pub fn is_empty(&self) -> bool {
    self.models.is_empty()
  }
}

impl FromIterator<ModelDescriptor> for ModelRegistry {
  fn from_iter<I: IntoIterator<Item = ModelDescriptor>>(iter: I) -> Self {
    let mut registry = Self::new();
    for descriptor in iter {
      registry.register(descriptor);
    }
    registry
  }
}
