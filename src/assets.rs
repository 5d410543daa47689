//! Asset directives and the bundles produced by resolution.

use std::fmt;

/// Kind of resource a directive refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
  /// JavaScript, emitted through `<script>` markup.
  Js,
  /// CSS, emitted through `<style>` or `<link>` markup.
  Css,
}

impl Kind {
  /// Short string form used in file extensions and configuration.
  pub fn as_str(self) -> &'static str {
    match self {
      Kind::Js => "js",
      Kind::Css => "css",
    }
  }
}

impl fmt::Display for Kind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A single directive to emit one unit of JavaScript or CSS.
///
/// Inline variants carry raw source destined for `<script>`/`<style>` tags;
/// link variants carry a URL destined for `<script src>`/`<link>` tags. The
/// serialization into markup belongs to the template layer, not this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
  /// Raw JavaScript source to emit inline.
  Script(String),
  /// URL of a JavaScript file to load.
  ScriptLink(String),
  /// Raw CSS source to emit inline.
  Style(String),
  /// URL of a stylesheet to load.
  StyleLink(String),
}

impl Asset {
  /// Whether this directive is JavaScript or CSS.
  pub fn kind(&self) -> Kind {
    match self {
      Asset::Script(_) | Asset::ScriptLink(_) => Kind::Js,
      Asset::Style(_) | Asset::StyleLink(_) => Kind::Css,
    }
  }

  /// Returns `true` for inline directives carrying raw source.
  pub fn is_inline(&self) -> bool {
    matches!(self, Asset::Script(_) | Asset::Style(_))
  }

  /// URL of a link directive, `None` for inline directives.
  pub fn url(&self) -> Option<&str> {
    match self {
      Asset::ScriptLink(url) | Asset::StyleLink(url) => Some(url),
      _ => None,
    }
  }

  /// Raw source of an inline directive, `None` for link directives.
  pub fn content(&self) -> Option<&str> {
    match self {
      Asset::Script(content) | Asset::Style(content) => Some(content),
      _ => None,
    }
  }
}

/// Resolver-level diagnostic attached to a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
  /// Message category, e.g. `"warn"`.
  pub kind: String,
  /// Human readable message text.
  pub text: String,
}

impl Message {
  /// Create a warning message.
  pub fn warn(text: impl Into<String>) -> Self {
    Self {
      kind: "warn".into(),
      text: text.into(),
    }
  }
}

/// Ordered collection of assets forming one resolution result.
///
/// Order is significant: browsers execute and load in document order, so
/// external links come before core library JS, which comes before runtime
/// directives. Bundles are immutable once constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle {
  assets: Vec<Asset>,
  messages: Vec<Message>,
}

impl Bundle {
  /// Build a bundle from already-ordered assets and diagnostics.
  pub fn new(assets: Vec<Asset>, messages: Vec<Message>) -> Self {
    Self { assets, messages }
  }

  /// Assets in emit order.
  pub fn assets(&self) -> &[Asset] {
    &self.assets
  }

  /// Diagnostics raised while resolving.
  pub fn messages(&self) -> &[Message] {
    &self.messages
  }

  /// Number of assets in the bundle.
  pub fn len(&self) -> usize {
    self.assets.len()
  }

  /// Returns `true` when the bundle holds no assets.
  pub fn is_empty(&self) -> bool {
    self.assets.is_empty()
  }
}

impl<'a> IntoIterator for &'a Bundle {
  type Item = &'a Asset;
  type IntoIter = std::slice::Iter<'a, Asset>;

  fn into_iter(self) -> Self::IntoIter {
    self.assets.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kind_follows_variant() {
    assert_eq!(Asset::Script("x".into()).kind(), Kind::Js);
    assert_eq!(Asset::ScriptLink("x.js".into()).kind(), Kind::Js);
    assert_eq!(Asset::Style("x".into()).kind(), Kind::Css);
    assert_eq!(Asset::StyleLink("x.css".into()).kind(), Kind::Css);
  }

  #[test]
  fn inline_and_link_accessors_are_disjoint() {
    let inline = Asset::Style("body {}".into());
    assert!(inline.is_inline());
    assert_eq!(inline.content(), Some("body {}"));
    assert_eq!(inline.url(), None);

    let link = Asset::ScriptLink("app.js".into());
    assert!(!link.is_inline());
    assert_eq!(link.url(), Some("app.js"));
    assert_eq!(link.content(), None);
  }

  #[test]
  fn bundle_preserves_insertion_order() {
    let bundle = Bundle::new(
      vec![
        Asset::StyleLink("a.css".into()),
        Asset::ScriptLink("b.js".into()),
        Asset::Script("run();".into()),
      ],
      Vec::new(),
    );

    let urls: Vec<Option<&str>> = bundle.assets().iter().map(Asset::url).collect();
    assert_eq!(urls, vec![Some("a.css"), Some("b.js"), None]);
    assert_eq!(bundle.len(), 3);
    assert!(!bundle.is_empty());
  }

  #[test]
  fn bundle_iterates_by_reference() {
    let bundle = Bundle::new(vec![Asset::Script("x".into())], Vec::new());
    let collected: Vec<&Asset> = (&bundle).into_iter().collect();
    assert_eq!(collected.len(), 1);
  }
}
