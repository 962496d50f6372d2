//! Option schemas and option resolution
//!
//! The driver owns a small set of platform-independent options (build mode,
//! architecture, word size, editor tools, engine module switches). A platform
//! contributes its own options on top and can change the defaults of the
//! driver's options through its feature flags.
//!
//! Resolution layers, lowest precedence first:
//!
//! 1. driver defaults
//! 2. platform feature flags
//! 3. platform option defaults
//! 4. overrides, applied in the order given (build file first, then command line)

use std::collections::HashSet;

use porter_protocol::{BuildOption, BuildTarget, OptionValues, PlatformDescriptor};

use crate::configs::build_file::BuildFileConfig;
use crate::types::{PorterError, PorterResult};

/// Engine modules that platforms can switch off.
pub const ENGINE_MODULES: &[&str] = &[
    "cscript", "dds", "etc1", "gdscript", "gridmap", "jpg", "mpc", "ogg", "openssl", "opus", "pbm",
    "pvr", "speex", "squish", "theora", "vorbis", "webm", "webp",
];

/// Key of the option that enables `module`.
pub fn module_option_key(module: &str) -> String {
    format!("module_{module}_enabled")
}

/// Options every platform inherits from the driver.
pub fn global_options() -> Vec<BuildOption> {
    let mut options = vec![
        BuildOption::new(
            "target",
            "Compilation target (release, release_debug, debug)",
            BuildTarget::default().as_str(),
        ),
        BuildOption::new("arch", "Target architecture, empty for the platform default", ""),
        BuildOption::new("bits", "Target word size (32, 64), empty for the platform default", ""),
        BuildOption::flag("tools", "Build the editor tools", true),
        BuildOption::flag("debug_release", "Keep debug symbols in release builds", false),
    ];

    options.extend(ENGINE_MODULES.iter().map(|module| {
        BuildOption::flag(
            module_option_key(module),
            format!("Enable module '{module}'"),
            true,
        )
    }));

    options
}

/// Reject platforms whose options and flags share a key.
pub fn validate_schema(platform: &dyn PlatformDescriptor) -> PorterResult<()> {
    let mut seen = HashSet::new();
    let keys = platform
        .options()
        .into_iter()
        .map(|o| o.key)
        .chain(platform.flags().into_iter().map(|f| f.key));

    for key in keys {
        if !seen.insert(key.clone()) {
            return Err(PorterError::DuplicateOption {
                platform: platform.key().to_string(),
                key,
            });
        }
    }
    Ok(())
}

/// The full, ordered option schema for a platform.
///
/// Driver options come first with the platform's flag defaults applied,
/// followed by flags the driver does not know about, followed by the
/// platform's own options in declaration order.
pub fn schema_for(platform: &dyn PlatformDescriptor) -> PorterResult<Vec<BuildOption>> {
    validate_schema(platform)?;

    let mut schema = global_options();

    for flag in platform.flags() {
        match schema.iter_mut().find(|o| o.key == flag.key) {
            Some(option) => option.default = flag.default,
            None => schema.push(BuildOption::new(
                flag.key,
                format!("{} flag", platform.name()),
                flag.default,
            )),
        }
    }

    for option in platform.options() {
        if schema.iter().any(|o| o.key == option.key) {
            return Err(PorterError::DuplicateOption {
                platform: platform.key().to_string(),
                key: option.key,
            });
        }
        schema.push(option);
    }

    Ok(schema)
}

/// What the caller wants configured, beyond the schema defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildRequest {
    /// Takes precedence over a `target` option override.
    pub target: Option<BuildTarget>,
    /// `(key, value)` pairs in their external string form, applied in order.
    pub overrides: Vec<(String, String)>,
}

impl BuildRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: BuildTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// Seed a request from a build file's target and option table.
    pub fn from_build_file(file: &BuildFileConfig) -> PorterResult<Self> {
        let target = file
            .target
            .as_deref()
            .map(|t| t.parse::<BuildTarget>().map_err(PorterError::InvalidTarget))
            .transpose()?;

        let overrides = file
            .options
            .as_ref()
            .map(|options| {
                options
                    .iter()
                    .map(|(key, setting)| (key.clone(), setting.to_raw()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self { target, overrides })
    }
}

/// Resolve every option in the platform's schema to a typed value.
pub fn resolve_options(
    platform: &dyn PlatformDescriptor,
    request: &BuildRequest,
) -> PorterResult<OptionValues> {
    let schema = schema_for(platform)?;

    let mut values = OptionValues::new(BuildTarget::default());
    for option in &schema {
        values.set(option.key.clone(), option.default.clone());
    }

    for (key, raw) in &request.overrides {
        let option = schema
            .iter()
            .find(|o| &o.key == key)
            .ok_or_else(|| PorterError::UnknownOption {
                platform: platform.key().to_string(),
                key: key.clone(),
            })?;

        let value = option
            .default
            .parse_like(raw)
            .map_err(|message| PorterError::InvalidValue {
                key: key.clone(),
                message,
            })?;
        values.set(key.clone(), value);
    }

    let target = match request.target {
        Some(target) => target,
        None => values
            .text("target")
            .parse::<BuildTarget>()
            .map_err(PorterError::InvalidTarget)?,
    };
    values.set_target(target);

    Ok(values)
}
