#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod assets;
pub mod registry;
pub mod resolver;
pub mod settings;

pub use assets::{Asset, Bundle, Kind, Message};
pub use registry::{ExternalUrls, ModelDescriptor, ModelRegistry};
pub use resolver::{
  AssetResolver, CdnResolver, InlineResolver, LogLevel, RelativeResolver, ResolverConfig,
  ResolverOptions, ResourceError,
};
pub use settings::Settings;
