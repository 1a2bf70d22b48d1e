use crate::engine::error::GenerationError;
use crate::fields::distance::DistanceProvider;
use crate::fields::esp::EspProvider;
use crate::fields::ScalarFieldProvider;
use phf::{phf_set, Set};
use std::collections::HashMap;
use tracing::debug;

/// The domain prefix of every provider key.
pub const FIELD_DOMAIN: &str = "fields";

/// The field types shipped with the library.
static BUILTIN_FIELD_TYPES: Set<&'static str> = phf_set! { "Esp", "Distance" };

/// Builds the composite registry key for a field type name, e.g.
/// `fields.EspCalculation`.
pub fn provider_key(field_type: &str) -> String {
    format!("{FIELD_DOMAIN}.{field_type}Calculation")
}

/// Whether `field_type` is one of the built-in field types.
pub fn is_builtin(field_type: &str) -> bool {
    BUILTIN_FIELD_TYPES.contains(field_type)
}

/// Runtime registry of scalar-field providers, keyed by composite string.
///
/// Populated at process startup (or by the host before the first request) and
/// treated as effectively immutable thereafter; requests only perform
/// read-only lookups. An unregistered key fails explicitly rather than
/// resolving to a no-op provider.
pub struct ProviderRegistry {
    providers: HashMap<String, Box<dyn ScalarFieldProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Creates a registry with every built-in field type registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(EspProvider));
        registry.register(Box::new(DistanceProvider));
        registry
    }

    /// Registers a provider under its own field type name.
    ///
    /// Returns the provider previously registered under the same key, if any.
    pub fn register(
        &mut self,
        provider: Box<dyn ScalarFieldProvider>,
    ) -> Option<Box<dyn ScalarFieldProvider>> {
        let key = provider_key(provider.field_type());
        debug!(key = %key, "scalar-field provider registered");
        self.providers.insert(key, provider)
    }

    /// Resolves the provider for a field type name.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::ProviderNotFound`] with the composite key if
    /// no provider is registered under it.
    pub fn lookup(&self, field_type: &str) -> Result<&dyn ScalarFieldProvider, GenerationError> {
        let key = provider_key(field_type);
        self.providers
            .get(&key)
            .map(Box::as_ref)
            .ok_or(GenerationError::ProviderNotFound { key })
    }

    /// The number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no provider is registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
