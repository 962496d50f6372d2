//! Typed registry of platform descriptors
//!
//! The registry is populated once at start-up and iterated in registration
//! order, so listings and help output are deterministic.

use log::{debug, warn};
use porter_platform_iphone::IphonePlatform;
use porter_platform_ps2::Ps2Platform;
use porter_protocol::PlatformDescriptor;

use crate::options::validate_schema;
use crate::types::{PorterError, PorterResult};

#[derive(Default)]
pub struct PlatformRegistry {
    platforms: Vec<Box<dyn PlatformDescriptor>>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every platform that ships with Porter.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        let builtin: Vec<Box<dyn PlatformDescriptor>> =
            vec![Box::new(IphonePlatform), Box::new(Ps2Platform)];

        for platform in builtin {
            let key = platform.key().to_string();
            if let Err(e) = registry.register(platform) {
                warn!("Failed to register platform '{}': {}", key, e);
            }
        }
        registry
    }

    /// Register a platform.
    ///
    /// Returns `Ok(false)` when the platform reports itself inactive and is
    /// skipped. Duplicate keys and schemas with repeated option keys are errors.
    pub fn register(&mut self, platform: Box<dyn PlatformDescriptor>) -> PorterResult<bool> {
        if !platform.is_active() {
            debug!("Skipping inactive platform '{}'", platform.key());
            return Ok(false);
        }

        if self.get(platform.key()).is_some() {
            return Err(PorterError::DuplicatePlatform(platform.key().to_string()));
        }

        validate_schema(platform.as_ref())?;

        debug!("Registered platform '{}' ({})", platform.key(), platform.name());
        self.platforms.push(platform);
        Ok(true)
    }

    pub fn get(&self, key: &str) -> Option<&dyn PlatformDescriptor> {
        self.platforms
            .iter()
            .find(|p| p.key() == key)
            .map(|p| p.as_ref() as &dyn PlatformDescriptor)
    }

    /// Like [`get`](Self::get), but unknown keys are an error.
    pub fn require(&self, key: &str) -> PorterResult<&dyn PlatformDescriptor> {
        self.get(key)
            .ok_or_else(|| PorterError::UnknownPlatform(key.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn PlatformDescriptor> {
        self.platforms
            .iter()
            .map(|p| p.as_ref() as &dyn PlatformDescriptor)
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }
}
