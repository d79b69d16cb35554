//! Plugin activation: the entry point a host calls once per session.

use serde_json::Value;

use super::{LanguageService, SemanticHighlighting};

/// What the host hands to [`PluginModule::create`].
pub struct PluginCreateInfo {
    pub language_service: Box<dyn LanguageService>,
    /// Initial plugin configuration, opaque to the plugin.
    pub config: Value,
}

impl PluginCreateInfo {
    pub fn new(language_service: Box<dyn LanguageService>) -> Self {
        Self {
            language_service,
            config: Value::Null,
        }
    }
}

/// A language-service plugin as seen by its host.
pub trait PluginModule {
    /// Wrap the host's language service.
    fn create(&self, info: PluginCreateInfo) -> Box<dyn LanguageService>;

    fn on_configuration_changed(&self, config: Value);
}

/// The semantic-highlighting plugin returned by [`init`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticHighlightingPlugin;

impl PluginModule for SemanticHighlightingPlugin {
    fn create(&self, info: PluginCreateInfo) -> Box<dyn LanguageService> {
        tracing::debug!(config = %info.config, "creating semantic highlighting service");
        Box::new(SemanticHighlighting::new(info.language_service))
    }

    fn on_configuration_changed(&self, config: Value) {
        tracing::debug!(%config, "configuration changed");
    }
}

/// Activate the plugin.
pub fn init() -> SemanticHighlightingPlugin {
    tracing::info!("ts-sh activated");
    SemanticHighlightingPlugin
}
