use std::collections::BTreeMap;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::{PorterError, PorterResult};

/// A value in the `options` table of a build file.
///
/// Files may write booleans and numbers natively; they are turned back into
/// the command-line spelling before option resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum OptionSetting {
    Flag(bool),
    Number(i64),
    /// Unquoted decimals such as `SDKVERSION: 12.1`.
    Decimal(f64),
    Text(String),
}

impl OptionSetting {
    pub fn to_raw(&self) -> String {
        match self {
            OptionSetting::Flag(true) => "yes".to_string(),
            OptionSetting::Flag(false) => "no".to_string(),
            OptionSetting::Number(n) => n.to_string(),
            // Debug keeps the trailing `.0` that Display drops.
            OptionSetting::Decimal(n) => format!("{n:?}"),
            OptionSetting::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildFileConfig {
    /// Registry key of the platform to configure, e.g. `ps2`.
    pub platform: Option<String>,
    /// Build mode: `release`, `release_debug` or `debug`.
    pub target: Option<String>,
    /// Option overrides keyed by option name.
    pub options: Option<BTreeMap<String, OptionSetting>>,
}

pub fn parse_build_file_yaml(yaml_str: &str) -> PorterResult<BuildFileConfig> {
    let config: BuildFileConfig = serde_yaml::from_str(yaml_str)?;
    Ok(config)
}

pub fn parse_build_file_toml(toml_str: &str) -> PorterResult<BuildFileConfig> {
    let config: BuildFileConfig = toml::from_str(toml_str)?;
    Ok(config)
}

/// Load a build file, picking the format from the extension.
pub fn load_build_file(path: &Path) -> PorterResult<BuildFileConfig> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("yml") | Some("yaml") => parse_build_file_yaml(&content),
        Some("toml") => parse_build_file_toml(&content),
        _ => Err(PorterError::Config(format!(
            "Unsupported build file {} (expected .yml, .yaml or .toml)",
            path.display()
        ))),
    }
}

/// JSON schema of the build file format.
pub fn build_file_schema() -> schemars::Schema {
    schemars::schema_for!(BuildFileConfig)
}

/// The build file schema, pretty-printed.
pub fn build_file_schema_json() -> PorterResult<String> {
    Ok(serde_json::to_string_pretty(&build_file_schema())?)
}
