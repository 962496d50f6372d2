//! Core types for the Porter platform protocol.
//!
//! This module contains the data structures shared by the driver and every
//! platform module:
//! - [`OptionValue`] - A typed option value (boolean or text)
//! - [`BuildOption`] - A user-overridable setting declared by a platform
//! - [`FeatureFlag`] - A platform-specific default for a driver-level option
//! - [`OptionValues`] - The resolved values handed to `configure`
//! - [`BuildTarget`] - The build mode (release, release with debug, debug)
//! - [`Availability`] - The outcome of probing the host toolchain

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const MAX_EXPANSION_DEPTH: usize = 8;

/// Parse the external spelling of a boolean option.
///
/// Accepts `yes`/`no`, `true`/`false`, `on`/`off` and `1`/`0`, ignoring case.
///
/// ```rust
/// # use porter_protocol::parse_bool;
/// assert_eq!(parse_bool("yes"), Some(true));
/// assert_eq!(parse_bool("Off"), Some(false));
/// assert_eq!(parse_bool("maybe"), None);
/// ```
#[must_use]
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "on" | "1" => Some(true),
        "no" | "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// A typed option value.
///
/// Booleans display as `yes`/`no` so they read the same way on the command
/// line as they are typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Text(String),
}

impl OptionValue {
    /// Parse `raw` using the same variant as `self`.
    ///
    /// Text options accept anything; boolean options only accept the
    /// spellings understood by [`parse_bool`].
    pub fn parse_like(&self, raw: &str) -> Result<Self, String> {
        match self {
            Self::Bool(_) => parse_bool(raw)
                .map(Self::Bool)
                .ok_or_else(|| format!("'{raw}' is not a boolean (expected yes or no)")),
            Self::Text(_) => Ok(Self::Text(raw.to_string())),
        }
    }

}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => write!(f, "yes"),
            Self::Bool(false) => write!(f, "no"),
            Self::Text(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A named, user-overridable build setting declared by a platform.
///
/// Options are immutable once declared. The driver collects them exactly once,
/// when the platform is registered, and keeps them in declaration order
/// because that order is the order they appear in help output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOption {
    /// The key users set, e.g. `SDKVERSION` or `game_center`.
    pub key: String,
    /// One-line description shown in option listings.
    pub description: String,
    /// Value used when nothing overrides the option.
    pub default: OptionValue,
}

impl BuildOption {
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        description: impl Into<String>,
        default: impl Into<OptionValue>,
    ) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            default: default.into(),
        }
    }

    /// Convenience constructor for on/off options.
    #[must_use]
    pub fn flag(key: impl Into<String>, description: impl Into<String>, default: bool) -> Self {
        Self::new(key, description, default)
    }
}

/// A platform-specific default for a driver-level switch.
///
/// Consoles and phones use flags to turn off things that make no sense for
/// them, such as building the editor tools, or to pin the word size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlag {
    pub key: String,
    pub default: OptionValue,
}

impl FeatureFlag {
    #[must_use]
    pub fn new(key: impl Into<String>, default: impl Into<OptionValue>) -> Self {
        Self {
            key: key.into(),
            default: default.into(),
        }
    }
}

/// The build mode. Exactly one is active per build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildTarget {
    /// Optimised, assertions off.
    Release,
    /// Optimised, with debug checks compiled in.
    #[default]
    ReleaseDebug,
    /// Unoptimised, full debug checks.
    Debug,
}

impl BuildTarget {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::ReleaseDebug => "release_debug",
            Self::Debug => "debug",
        }
    }

    /// Returns whether this is one of the optimised modes.
    #[must_use]
    pub const fn is_release(&self) -> bool {
        matches!(self, Self::Release | Self::ReleaseDebug)
    }
}

impl fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "release" => Ok(Self::Release),
            "release_debug" => Ok(Self::ReleaseDebug),
            "debug" => Ok(Self::Debug),
            other => Err(format!(
                "Unknown build target '{other}' (expected release, release_debug or debug)"
            )),
        }
    }
}

/// Outcome of probing the host for a platform's toolchain.
///
/// A missing prerequisite is an expected result, not an error: the driver
/// simply leaves the platform out of the buildable set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Available,
    /// Carries a human-readable line naming the missing prerequisite.
    Missing(String),
}

impl Availability {
    #[must_use]
    pub fn missing(reason: impl Into<String>) -> Self {
        Self::Missing(reason.into())
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// The diagnostic for an unavailable platform, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Available => None,
            Self::Missing(reason) => Some(reason),
        }
    }
}

/// Resolved option values for one build.
///
/// Produced by the driver from the driver-level options, the platform's flags
/// and options, and any user overrides. Missing keys read as `false` / empty
/// text, so a descriptor never has to handle absence separately.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OptionValues {
    target: BuildTarget,
    values: BTreeMap<String, OptionValue>,
}

impl OptionValues {
    #[must_use]
    pub fn new(target: BuildTarget) -> Self {
        Self {
            target,
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn target(&self) -> BuildTarget {
        self.target
    }

    pub fn set_target(&mut self, target: BuildTarget) {
        self.target = target;
        self.values
            .insert("target".to_string(), OptionValue::from(target.as_str()));
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Boolean view of an option. Text values are read with [`parse_bool`].
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        match self.values.get(key) {
            Some(OptionValue::Bool(value)) => *value,
            Some(OptionValue::Text(text)) => parse_bool(text).unwrap_or(false),
            None => false,
        }
    }

    /// Text view of an option. Booleans read as `yes`/`no`.
    #[must_use]
    pub fn text(&self, key: &str) -> String {
        self.values
            .get(key)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Substitute `$NAME` and `${NAME}` references with option values.
    ///
    /// Substitution repeats so defaults that reference other options (an SDK
    /// path built from the platform name, say) resolve fully. Unknown names
    /// are left untouched.
    ///
    /// ```rust
    /// # use porter_protocol::{BuildTarget, OptionValues};
    /// let values = OptionValues::new(BuildTarget::Release)
    ///     .with("PLATFORM", "iPhoneOS")
    ///     .with("SDK", "/sdks/${PLATFORM}.sdk");
    /// assert_eq!(values.expand("-isysroot $SDK"), "-isysroot /sdks/iPhoneOS.sdk");
    /// assert_eq!(values.expand("$UNKNOWN/bin"), "$UNKNOWN/bin");
    /// ```
    #[must_use]
    pub fn expand(&self, input: &str) -> String {
        let mut current = input.to_string();
        for _ in 0..MAX_EXPANSION_DEPTH {
            let next = self.expand_once(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn expand_once(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            let (name, consumed) = match after.strip_prefix('{') {
                Some(braced) => match braced.find('}') {
                    Some(end) => (&braced[..end], end + 2),
                    None => ("", 0),
                },
                None => {
                    let end = after
                        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                        .unwrap_or(after.len());
                    (&after[..end], end)
                }
            };

            match self.values.get(name) {
                Some(value) if !name.is_empty() => {
                    out.push_str(&value.to_string());
                    rest = &after[consumed..];
                }
                _ => {
                    out.push('$');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_external_boolean_spellings() {
        for raw in ["yes", "YES", "true", "on", "1", " yes "] {
            assert_eq!(parse_bool(raw), Some(true), "{raw}");
        }
        for raw in ["no", "False", "off", "0"] {
            assert_eq!(parse_bool(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_bool(""), None);
        assert_eq!(parse_bool("y"), None);
    }

    #[test]
    fn parse_like_follows_the_default_type() {
        let boolean = OptionValue::Bool(false);
        assert_eq!(boolean.parse_like("yes"), Ok(OptionValue::Bool(true)));
        assert!(boolean.parse_like("sometimes").is_err());

        let text = OptionValue::from("12.1");
        assert_eq!(text.parse_like("yes"), Ok(OptionValue::from("yes")));
    }

    #[test]
    fn booleans_display_as_yes_no() {
        assert_eq!(OptionValue::Bool(true).to_string(), "yes");
        assert_eq!(OptionValue::Bool(false).to_string(), "no");
        assert_eq!(OptionValue::from("arm64").to_string(), "arm64");
    }

    #[test]
    fn build_target_round_trips_external_names() {
        for target in [
            BuildTarget::Release,
            BuildTarget::ReleaseDebug,
            BuildTarget::Debug,
        ] {
            assert_eq!(target.as_str().parse::<BuildTarget>(), Ok(target));
        }
        assert!("profile".parse::<BuildTarget>().is_err());
        assert!(BuildTarget::ReleaseDebug.is_release());
        assert!(!BuildTarget::Debug.is_release());
    }

    #[test]
    fn missing_values_read_as_false_and_empty() {
        let values = OptionValues::new(BuildTarget::Debug);
        assert!(!values.flag("game_center"));
        assert_eq!(values.text("ios_triple"), "");
    }

    #[test]
    fn text_flags_are_read_as_booleans() {
        let values = OptionValues::new(BuildTarget::Debug).with("legacy", "yes");
        assert!(values.flag("legacy"));
    }

    #[test]
    fn set_target_is_visible_as_an_option() {
        let mut values = OptionValues::new(BuildTarget::Debug);
        values.set_target(BuildTarget::Release);
        assert_eq!(values.target(), BuildTarget::Release);
        assert_eq!(values.text("target"), "release");
    }

    #[test]
    fn expand_handles_braced_and_bare_names() {
        let values = OptionValues::new(BuildTarget::Release)
            .with("ROOT", "/opt/sdk")
            .with("triple", "");
        assert_eq!(values.expand("$ROOT/usr/bin/${triple}clang"), "/opt/sdk/usr/bin/clang");
        assert_eq!(values.expand("-F$ROOT"), "-F/opt/sdk");
        assert_eq!(values.expand("cost: 5$"), "cost: 5$");
        assert_eq!(values.expand("${unterminated"), "${unterminated");
    }

    #[test]
    fn expand_stops_on_self_reference() {
        let values = OptionValues::new(BuildTarget::Release).with("LOOP", "x$LOOP");
        let expanded = values.expand("$LOOP");
        assert!(expanded.starts_with("xxxx"));
    }

    #[test]
    fn availability_exposes_reason() {
        assert!(Availability::Available.is_available());
        assert_eq!(Availability::Available.reason(), None);

        let missing = Availability::missing("PS2SDK not defined in environment");
        assert!(!missing.is_available());
        assert_eq!(missing.reason(), Some("PS2SDK not defined in environment"));
    }
}
