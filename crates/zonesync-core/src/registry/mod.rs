//! Plugin-based provider registry
//!
//! The registry allows zone providers to be registered dynamically at
//! runtime, avoiding hardcoded if-else chains over provider types.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zonesync_core::registry::ProviderRegistry;
//! use zonesync_core::config::{ClientConfig, ProviderConfig};
//!
//! let registry = ProviderRegistry::new();
//! zonesync_provider_netcup::register(&registry);
//!
//! let config = ProviderConfig::Netcup { ... };
//! let provider = registry.create_provider(&config, &ClientConfig::default())?;
//! ```

use crate::config::{ClientConfig, ProviderConfig};
use crate::error::{Error, Result};
use crate::traits::{ZoneProvider, ZoneProviderFactory};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Provider registry for plugin-based zone provider creation
///
/// The registry maintains a map of provider type names to factory objects,
/// allowing dynamic instantiation of providers based on configuration.
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: RwLock<HashMap<String, Box<dyn ZoneProviderFactory>>>,
}

impl ProviderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone provider factory
    ///
    /// Registering a name twice replaces the earlier factory.
    pub fn register_provider(&self, name: impl Into<String>, factory: Box<dyn ZoneProviderFactory>) {
        let mut providers = self.providers.write().unwrap_or_else(PoisonError::into_inner);
        providers.insert(name.into(), factory);
    }

    /// Create a zone provider from configuration
    ///
    /// The configuration is validated before the factory is invoked.
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn ZoneProvider>)`: Created provider instance
    /// - `Err(Error)`: If the configuration is invalid, the provider type is
    ///   not registered, or creation fails
    pub fn create_provider(
        &self,
        config: &ProviderConfig,
        client: &ClientConfig,
    ) -> Result<Box<dyn ZoneProvider>> {
        config.validate()?;
        client.validate()?;

        let provider_type = config.type_name();
        let providers = self.providers.read().unwrap_or_else(PoisonError::into_inner);

        let factory = providers
            .get(provider_type)
            .ok_or_else(|| Error::config(format!("Unknown provider type: {}", provider_type)))?;

        factory.create(config, client)
    }

    /// List all registered provider types, sorted
    pub fn list_providers(&self) -> Vec<String> {
        let providers = self.providers.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a provider type is registered
    pub fn has_provider(&self, name: &str) -> bool {
        let providers = self.providers.read().unwrap_or_else(PoisonError::into_inner);
        providers.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns_record::Record;
    use async_trait::async_trait;

    struct MockProvider;

    #[async_trait]
    impl ZoneProvider for MockProvider {
        async fn get_records(&self, _zone: &str) -> Result<Vec<Record>> {
            Ok(Vec::new())
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }

    struct MockProviderFactory;

    impl ZoneProviderFactory for MockProviderFactory {
        fn create(&self, _config: &ProviderConfig, _client: &ClientConfig) -> Result<Box<dyn ZoneProvider>> {
            Ok(Box::new(MockProvider))
        }
    }

    fn custom(factory: &str) -> ProviderConfig {
        ProviderConfig::Custom {
            factory: factory.to_string(),
            config: serde_json::json!({}),
        }
    }

    #[test]
    fn test_registry_registration() {
        let registry = ProviderRegistry::new();

        assert!(!registry.has_provider("mock"));

        registry.register_provider("mock", Box::new(MockProviderFactory));

        assert!(registry.has_provider("mock"));
        assert_eq!(registry.list_providers(), vec!["mock".to_string()]);
    }

    #[test]
    fn test_create_registered_provider() {
        let registry = ProviderRegistry::new();
        registry.register_provider("mock", Box::new(MockProviderFactory));

        let provider = registry
            .create_provider(&custom("mock"), &ClientConfig::default())
            .unwrap();
        assert_eq!(provider.provider_name(), "mock");
    }

    #[test]
    fn test_unknown_provider_is_config_error() {
        let registry = ProviderRegistry::new();

        let result = registry.create_provider(&custom("route53"), &ClientConfig::default());
        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("route53")));
    }

    #[test]
    fn test_invalid_config_rejected_before_factory() {
        let registry = ProviderRegistry::new();
        registry.register_provider("mock", Box::new(MockProviderFactory));

        let result = registry.create_provider(&custom(""), &ClientConfig::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
