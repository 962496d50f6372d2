//! The build driver
//!
//! [`BuildDriver`] is the one place that talks to platform descriptors. For a
//! build it:
//!
//! 1. looks the platform up in the registry,
//! 2. probes the host and refuses to continue if the toolchain is missing,
//! 3. resolves the option values,
//! 4. builds the platform-independent default configuration,
//! 5. applies the platform's module overrides,
//! 6. hands the configuration to the platform's `configure` exactly once.
//!
//! ## Example
//!
//! ```rust,no_run
//! use porter_core::driver::BuildDriver;
//! use porter_core::options::BuildRequest;
//! use porter_protocol::{BuildTarget, HostEnv};
//!
//! # fn example() -> porter_core::PorterResult<()> {
//! let driver = BuildDriver::with_builtin();
//! let request = BuildRequest::new()
//!     .with_target(BuildTarget::Release)
//!     .with_override("debug_release", "yes");
//!
//! let config = driver.configure("ps2", &request, &HostEnv::current())?;
//! println!("{:?}", config.cc_flags());
//! # Ok(())
//! # }
//! ```

use log::{debug, info, warn};
use porter_protocol::{BuildConfiguration, HostEnv, OptionValues, PlatformDescriptor};

use crate::options::{
    module_option_key, resolve_options, schema_for, BuildRequest, ENGINE_MODULES,
};
use crate::registry::PlatformRegistry;
use crate::results::{OptionSchemaResult, PlatformStatus};
use crate::types::{PorterError, PorterResult};

pub struct BuildDriver {
    registry: PlatformRegistry,
}

impl BuildDriver {
    pub fn new(registry: PlatformRegistry) -> Self {
        Self { registry }
    }

    /// A driver over every platform that ships with Porter.
    pub fn with_builtin() -> Self {
        Self::new(PlatformRegistry::with_builtin())
    }

    pub fn registry(&self) -> &PlatformRegistry {
        &self.registry
    }

    /// Probe every registered platform, logging why unavailable ones are out.
    pub fn detect(&self, host: &HostEnv) -> Vec<PlatformStatus> {
        self.registry
            .iter()
            .map(|platform| {
                let status = PlatformStatus::probe(platform, host);
                match status.availability.reason() {
                    None => info!("{} is available", status.name),
                    Some(reason) => warn!("{} disabled: {}", status.name, reason),
                }
                status
            })
            .collect()
    }

    /// The option schema for one platform.
    pub fn option_schema(&self, key: &str) -> PorterResult<OptionSchemaResult> {
        let platform = self.registry.require(key)?;
        let options = platform.options();
        let driver_options = schema_for(platform)?
            .into_iter()
            .filter(|o| !options.iter().any(|p| p.key == o.key))
            .collect();

        Ok(OptionSchemaResult {
            platform: platform.key().to_string(),
            name: platform.name().to_string(),
            options,
            flags: platform.flags(),
            driver_options,
            disabled_modules: platform
                .disabled_modules()
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
    }

    /// Resolve options and produce the configuration for one platform.
    ///
    /// Fails with [`PorterError::Unavailable`] when the host cannot build the
    /// platform; `configure` is never called in that case.
    pub fn configure(
        &self,
        key: &str,
        request: &BuildRequest,
        host: &HostEnv,
    ) -> PorterResult<BuildConfiguration> {
        let platform = self.registry.require(key)?;

        if let Some(reason) = platform.probe(host).reason() {
            warn!("{} disabled: {}", platform.name(), reason);
            return Err(PorterError::Unavailable {
                platform: platform.name().to_string(),
                reason: reason.to_string(),
            });
        }

        let values = resolve_options(platform, request)?;
        let mut config = default_configuration(&values, host);
        apply_module_overrides(platform, &mut config);

        platform.configure(&mut config, &values, host);
        info!("Configured {} for {}", platform.name(), values.target());

        Ok(config)
    }
}

/// The platform-independent configuration every build starts from.
pub fn default_configuration(values: &OptionValues, host: &HostEnv) -> BuildConfiguration {
    let mut config = BuildConfiguration::new(values.target());
    config.append_include_paths(["#"]);

    if let Some(path) = host.var("PATH") {
        config.set_env("PATH", path);
    }

    let arch = values.text("arch");
    if !arch.is_empty() {
        config.set_arch(arch);
    }
    let bits = values.text("bits");
    if !bits.is_empty() {
        config.set_bits(bits);
    }

    if values.flag("tools") {
        config.append_defines(["TOOLS_ENABLED"]);
    }

    for module in ENGINE_MODULES {
        config.set_module(*module, values.flag(&module_option_key(module)));
    }

    config
}

fn apply_module_overrides(platform: &dyn PlatformDescriptor, config: &mut BuildConfiguration) {
    for module in platform.disabled_modules() {
        if config.module_enabled(module) {
            debug!("{} disables module '{}'", platform.name(), module);
        }
        config.set_module(module, false);
    }
}
