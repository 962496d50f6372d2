//! The trait every Porter platform module implements.
//!
//! [`PlatformDescriptor`] bundles the six capabilities the driver relies on:
//! activity, naming, the buildability probe, the option schema, the feature
//! flag schema, and the configuration mutator. A seventh, explicit capability,
//! [`PlatformDescriptor::disabled_modules`], lets a platform switch off engine
//! modules it cannot build.

use crate::config::BuildConfiguration;
use crate::host::HostEnv;
use crate::types::{Availability, BuildOption, FeatureFlag, OptionValues};

/// A pluggable description of one build target's toolchain and flag policy.
///
/// **Purpose**: The driver discovers descriptors through its registry, merges
/// their option schemas into the global option set, filters by
/// [`is_active`](Self::is_active) and [`can_build`](Self::can_build), and
/// invokes the chosen descriptor's [`configure`](Self::configure) once per
/// build.
///
/// Descriptors are stateless: every method is a function of the
/// [`HostEnv`], the resolved [`OptionValues`] and, for `configure`, the
/// [`BuildConfiguration`] being mutated.
///
/// # Example
///
/// ```rust
/// # use porter_protocol::*;
/// pub struct Handheld;
///
/// impl PlatformDescriptor for Handheld {
///     fn key(&self) -> &str {
///         "handheld"
///     }
///
///     fn name(&self) -> &str {
///         "Handheld"
///     }
///
///     fn probe(&self, host: &HostEnv) -> Availability {
///         match host.var("HANDHELD_SDK") {
///             Some(_) => Availability::Available,
///             None => Availability::missing("HANDHELD_SDK not defined in environment"),
///         }
///     }
///
///     fn flags(&self) -> Vec<FeatureFlag> {
///         vec![FeatureFlag::new("tools", false)]
///     }
///
///     fn configure(&self, config: &mut BuildConfiguration, _values: &OptionValues, host: &HostEnv) {
///         let sdk = host.var("HANDHELD_SDK").unwrap_or_default();
///         config.append_include_paths([format!("{sdk}/include")]);
///     }
/// }
///
/// let host = HostEnv::new("linux");
/// assert!(!Handheld.can_build(&host));
/// ```
pub trait PlatformDescriptor {
    /// Return the stable registry key for this platform.
    ///
    /// **Requirements**:
    /// - Unique across all registered platforms
    /// - No whitespace; lowercase by convention (`"iphone"`, `"ps2"`)
    fn key(&self) -> &str;

    /// Return the human-readable label shown in listings and logs.
    fn name(&self) -> &str;

    /// Return whether the platform should be registered at all.
    ///
    /// This is a static property of the module, not of the host.
    fn is_active(&self) -> bool {
        true
    }

    /// Inspect the host for the toolchain this platform needs.
    ///
    /// **Guidelines**:
    /// - Never panic. A missing prerequisite is a normal outcome.
    /// - Name the missing prerequisite in the returned reason so the driver can
    ///   print something actionable.
    fn probe(&self, host: &HostEnv) -> Availability;

    /// Boolean view of [`probe`](Self::probe).
    fn can_build(&self, host: &HostEnv) -> bool {
        self.probe(host).is_available()
    }

    /// Declare every option this platform accepts, each with a default.
    ///
    /// Order matters: it is the order options are listed in help output.
    fn options(&self) -> Vec<BuildOption> {
        Vec::new()
    }

    /// Declare platform-specific defaults for driver-level switches, such as
    /// disabling the editor tools for a console target.
    ///
    /// Keys must not repeat any key returned by [`options`](Self::options).
    fn flags(&self) -> Vec<FeatureFlag> {
        Vec::new()
    }

    /// Engine modules this platform cannot build.
    ///
    /// The driver disables each of these in the configuration before calling
    /// [`configure`](Self::configure), so `configure` sees the final module
    /// set. This override applies on top of whatever the user asked for.
    fn disabled_modules(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Select the toolchain and assemble target-specific flags.
    ///
    /// Called once per build, only after [`can_build`](Self::can_build)
    /// returned `true` for the same host. `config` already holds the
    /// driver's platform-independent defaults; implementations append to it,
    /// prepend to it, or set keys, and never remove anything.
    ///
    /// There is no error path: a host that lacks the assumed toolchain
    /// produces a configuration that fails later at compile or link time.
    fn configure(&self, config: &mut BuildConfiguration, values: &OptionValues, host: &HostEnv);
}
