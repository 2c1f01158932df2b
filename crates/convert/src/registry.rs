//! Converter registry keyed by ordered (source, target) platform pairs.

use crate::converter::PlatformConverter;
use crate::converters::{ClaudeToCursor, ClaudeToKiro, CursorToClaude, KiroToClaude};
use std::collections::HashMap;
use taptik_core::Platform;

/// Typed lookup outcome; absence of a converter is a first-class result, not
/// a bare `None`.
pub enum RegistryLookup<'a> {
    Found(&'a dyn PlatformConverter),
    NotFound { source: Platform, target: Platform },
}

/// Registry of platform converters, populated once at startup.
pub struct ConverterRegistry {
    converters: HashMap<(Platform, Platform), Box<dyn PlatformConverter>>,
}

impl ConverterRegistry {
    /// An empty registry, for tests and custom setups.
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// Registry with the production converter set:
    /// claude-code ↔ kiro and claude-code ↔ cursor.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(ClaudeToKiro));
        registry.register(Box::new(KiroToClaude));
        registry.register(Box::new(ClaudeToCursor));
        registry.register(Box::new(CursorToClaude));
        registry
    }

    /// Register a converter under its (source, target) pair. A later
    /// registration for the same pair replaces the earlier one.
    pub fn register(&mut self, converter: Box<dyn PlatformConverter>) {
        let key = (converter.source(), converter.target());
        self.converters.insert(key, converter);
    }

    pub fn lookup(&self, source: Platform, target: Platform) -> RegistryLookup<'_> {
        match self.converters.get(&(source, target)) {
            Some(converter) => RegistryLookup::Found(converter.as_ref()),
            None => RegistryLookup::NotFound { source, target },
        }
    }

    /// Registered (source, target) pairs, sorted for stable output.
    pub fn pairs(&self) -> Vec<(Platform, Platform)> {
        let mut pairs: Vec<_> = self.converters.keys().copied().collect();
        pairs.sort();
        pairs
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
