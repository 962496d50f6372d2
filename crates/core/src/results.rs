//! Result types for driver operations
//!
//! This module contains the output structures returned by [`BuildDriver`](crate::driver::BuildDriver)
//! queries, kept separate so the CLI only depends on plain data.

use porter_protocol::{Availability, BuildOption, FeatureFlag, PlatformDescriptor};

/// Availability of one registered platform on the current host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformStatus {
    pub key: String,
    pub name: String,
    pub availability: Availability,
}

/// The options a platform exposes, split by where they come from
#[derive(Debug, Clone)]
pub struct OptionSchemaResult {
    pub platform: String,
    pub name: String,
    /// Options declared by the platform, in declaration order.
    pub options: Vec<BuildOption>,
    /// Flag defaults the platform applies to driver options.
    pub flags: Vec<FeatureFlag>,
    /// Driver options with the platform's flag defaults applied.
    pub driver_options: Vec<BuildOption>,
    /// Engine modules the platform always disables.
    pub disabled_modules: Vec<String>,
}

impl PlatformStatus {
    pub fn probe(platform: &dyn PlatformDescriptor, host: &porter_protocol::HostEnv) -> Self {
        Self {
            key: platform.key().to_string(),
            name: platform.name().to_string(),
            availability: platform.probe(host),
        }
    }
}
