//! IDE features: the language service surface and the semantic
//! highlighting plugin built on top of it.
//!
//! ## Usage
//!
//! ```ignore
//! use tssh::ide::{HostService, PluginCreateInfo, PluginModule, init};
//!
//! let host = HostService::new();
//! host.set_file_content("main.ts", "class Foo { static async bar() {} }");
//!
//! let service = init().create(PluginCreateInfo::new(Box::new(host)));
//! let tokens = service.classify_semantic("main.ts", TextSpan::new(0, 35));
//! ```

mod classification;
mod error;
mod host;
mod intercept;
mod plugin;
mod semantic_tokens;
mod service;

pub use classification::{ClassificationType, semantic_classifications, syntactic_classifications};
pub use error::{ServiceError, ServiceResult};
pub use host::HostService;
pub use intercept::SemanticHighlighting;
pub use plugin::{PluginCreateInfo, PluginModule, SemanticHighlightingPlugin, init};
pub use semantic_tokens::{TokenModifier, TokenType, decode, encode, semantic_tokens};
pub use service::{Classifications, EndOfLineState, LanguageService, Location};
