//! The build configuration a platform descriptor mutates.
//!
//! [`BuildConfiguration`] is created by the driver, filled with the
//! platform-independent defaults, and then handed by `&mut` to exactly one
//! descriptor. Fields are private and the API only appends, prepends, or
//! sets, so a descriptor cannot drop something the default step put in place.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::BuildTarget;

/// Separator used when prepending to a search-path style environment variable.
#[cfg(windows)]
const PATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const PATH_SEPARATOR: &str = ":";

/// Toolchain programs a platform can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Cc,
    Cxx,
    As,
    Ld,
    Ar,
    Ranlib,
    Objcopy,
    Strip,
    Addr2line,
}

impl Tool {
    pub const ALL: [Tool; 9] = [
        Tool::Cc,
        Tool::Cxx,
        Tool::As,
        Tool::Ld,
        Tool::Ar,
        Tool::Ranlib,
        Tool::Objcopy,
        Tool::Strip,
        Tool::Addr2line,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Tool::Cc => "cc",
            Tool::Cxx => "cxx",
            Tool::As => "as",
            Tool::Ld => "ld",
            Tool::Ar => "ar",
            Tool::Ranlib => "ranlib",
            Tool::Objcopy => "objcopy",
            Tool::Strip => "strip",
            Tool::Addr2line => "addr2line",
        }
    }
}

/// The kind of source-to-header generator a build step runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuilderKind {
    /// GLSL 1.20 shaders for the legacy GL renderer.
    LegacyGlHeaders,
    /// Current GLSL shaders.
    GlslHeaders,
    /// GLSL shaders targeting GLES 2.
    Gles2Headers,
}

/// A named build-step generator registered by a platform.
///
/// The driver's build graph maps every source with `src_suffix` through the
/// generator to an output ending in `suffix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderSpec {
    pub name: String,
    pub kind: BuilderKind,
    pub suffix: String,
    pub src_suffix: String,
}

impl BuilderSpec {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: BuilderKind,
        suffix: impl Into<String>,
        src_suffix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            suffix: suffix.into(),
            src_suffix: src_suffix.into(),
        }
    }
}

/// Compiler, linker, preprocessor and path settings for one build.
///
/// Lifetime is one build process. Defines are stored without the `-D` prefix.
///
/// Entries can be read but not removed:
///
/// ```compile_fail
/// # use porter_protocol::{BuildConfiguration, BuildTarget};
/// let mut config = BuildConfiguration::new(BuildTarget::Release);
/// config.append_include_paths(["#"]);
/// config.include_paths.clear();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildConfiguration {
    target: BuildTarget,
    arch: Option<String>,
    bits: Option<String>,
    tools: BTreeMap<Tool, String>,
    include_paths: Vec<String>,
    defines: Vec<String>,
    cc_flags: Vec<String>,
    c_flags: Vec<String>,
    cpp_flags: Vec<String>,
    as_flags: Vec<String>,
    link_flags: Vec<String>,
    libs: Vec<String>,
    /// Environment the compile and link steps run with.
    env: BTreeMap<String, String>,
    /// Engine module switches, keyed by module name (`opus`, `theora`, …).
    modules: BTreeMap<String, bool>,
    /// Named fields read by later build steps.
    custom: BTreeMap<String, String>,
    builders: Vec<BuilderSpec>,
}

fn extend_strings<I, S>(target: &mut Vec<String>, items: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    target.extend(items.into_iter().map(Into::into));
}

fn prepend_strings<I, S>(target: &mut Vec<String>, items: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let prefix: Vec<String> = items.into_iter().map(Into::into).collect();
    target.splice(0..0, prefix);
}

impl BuildConfiguration {
    #[must_use]
    pub fn new(target: BuildTarget) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn target(&self) -> BuildTarget {
        self.target
    }

    pub fn arch(&self) -> Option<&str> {
        self.arch.as_deref()
    }

    pub fn bits(&self) -> Option<&str> {
        self.bits.as_deref()
    }

    pub fn tools(&self) -> &BTreeMap<Tool, String> {
        &self.tools
    }

    pub fn include_paths(&self) -> &[String] {
        &self.include_paths
    }

    /// Preprocessor defines, without the `-D` prefix.
    pub fn defines(&self) -> &[String] {
        &self.defines
    }

    /// Flags for both C and C++ compilation.
    pub fn cc_flags(&self) -> &[String] {
        &self.cc_flags
    }

    pub fn c_flags(&self) -> &[String] {
        &self.c_flags
    }

    pub fn cpp_flags(&self) -> &[String] {
        &self.cpp_flags
    }

    pub fn as_flags(&self) -> &[String] {
        &self.as_flags
    }

    pub fn link_flags(&self) -> &[String] {
        &self.link_flags
    }

    pub fn libs(&self) -> &[String] {
        &self.libs
    }

    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn modules(&self) -> &BTreeMap<String, bool> {
        &self.modules
    }

    pub fn builders(&self) -> &[BuilderSpec] {
        &self.builders
    }

    pub fn set_tool(&mut self, tool: Tool, program: impl Into<String>) {
        self.tools.insert(tool, program.into());
    }

    #[must_use]
    pub fn tool(&self, tool: Tool) -> Option<&str> {
        self.tools.get(&tool).map(String::as_str)
    }

    pub fn set_arch(&mut self, arch: impl Into<String>) {
        self.arch = Some(arch.into());
    }

    pub fn set_bits(&mut self, bits: impl Into<String>) {
        self.bits = Some(bits.into());
    }

    pub fn append_include_paths<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_strings(&mut self.include_paths, paths);
    }

    /// Insert paths ahead of the existing ones, keeping their given order.
    pub fn prepend_include_paths<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        prepend_strings(&mut self.include_paths, paths);
    }

    pub fn append_defines<I, S>(&mut self, defines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_strings(&mut self.defines, defines);
    }

    pub fn append_cc_flags<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_strings(&mut self.cc_flags, flags);
    }

    pub fn prepend_cc_flags<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        prepend_strings(&mut self.cc_flags, flags);
    }

    pub fn append_c_flags<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_strings(&mut self.c_flags, flags);
    }

    pub fn append_cpp_flags<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_strings(&mut self.cpp_flags, flags);
    }

    pub fn append_as_flags<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_strings(&mut self.as_flags, flags);
    }

    pub fn append_link_flags<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_strings(&mut self.link_flags, flags);
    }

    pub fn append_libs<I, S>(&mut self, libs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_strings(&mut self.libs, libs);
    }

    pub fn set_env(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.env.insert(key.into(), value.into());
    }

    /// Put `entry` in front of a search-path variable such as `PATH`.
    pub fn prepend_env_path(&mut self, key: &str, entry: &str) {
        let value = match self.env.get(key) {
            Some(existing) if !existing.is_empty() => {
                format!("{entry}{PATH_SEPARATOR}{existing}")
            }
            _ => entry.to_string(),
        };
        self.env.insert(key.to_string(), value);
    }

    pub fn set_module(&mut self, module: impl Into<String>, enabled: bool) {
        self.modules.insert(module.into(), enabled);
    }

    /// Modules the configuration has never heard of count as disabled.
    #[must_use]
    pub fn module_enabled(&self, module: &str) -> bool {
        self.modules.get(module).copied().unwrap_or(false)
    }

    pub fn set_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn custom(&self, key: &str) -> Option<&str> {
        self.custom.get(key).map(String::as_str)
    }

    pub fn add_builder(&mut self, builder: BuilderSpec) {
        self.builders.push(builder);
    }

    #[must_use]
    pub fn has_define(&self, define: &str) -> bool {
        self.defines.iter().any(|d| d == define)
    }

    #[must_use]
    pub fn has_link_flag(&self, flag: &str) -> bool {
        self.link_flags.iter().any(|f| f == flag)
    }

    /// Returns whether `framework` is linked with `-framework <name>`.
    #[must_use]
    pub fn links_framework(&self, framework: &str) -> bool {
        self.link_flags
            .windows(2)
            .any(|pair| pair[0] == "-framework" && pair[1] == framework)
    }
}
