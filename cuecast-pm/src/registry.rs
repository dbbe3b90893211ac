//! Playlist module registry
//!
//! The host picks its playlist module by configured name. Each `create` call
//! builds a fresh instance, so two hosts never share a line counter.

use crate::contract::PlaylistModule;
use crate::skeleton::SkeletonModule;
use cuecast_common::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Name of the skeleton with the metadata hook
pub const SKELETON: &str = "skeleton";

/// Name of the skeleton without the metadata hook
pub const SKELETON_BASIC: &str = "skeleton-basic";

/// Builds a new module instance
pub type ModuleFactory = Box<dyn Fn() -> Box<dyn PlaylistModule> + Send + Sync>;

/// Name → factory map
pub struct ModuleRegistry {
    factories: BTreeMap<String, ModuleFactory>,
}

impl ModuleRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry with the skeleton modules
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(SKELETON, || Box::new(SkeletonModule::new()));
        registry.register(SKELETON_BASIC, || Box::new(SkeletonModule::basic()));
        registry
    }

    /// Register a factory, replacing any previous one under the same name
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn PlaylistModule> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!("Registering playlist module '{}'", name);
        self.factories.insert(name, Box::new(factory));
    }

    /// New instance of the named module
    pub fn create(&self, name: &str) -> Result<Box<dyn PlaylistModule>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| Error::UnknownModule(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.names())
            .finish()
    }
}
