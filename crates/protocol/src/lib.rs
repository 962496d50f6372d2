//! Porter Platform Protocol
//!
//! This crate defines the contract every platform module implements so the
//! Porter build driver can discover, filter, and invoke it generically.
//!
//! ## Overview
//!
//! A platform module describes one build target (iOS, Playstation 2, …). It
//! answers four questions for the driver:
//!
//! 1. Is the module active at all? ([`PlatformDescriptor::is_active`])
//! 2. What is it called? ([`PlatformDescriptor::name`])
//! 3. Can the host build it right now? ([`PlatformDescriptor::probe`])
//! 4. How does it turn a default [`BuildConfiguration`] into one that produces a
//!    correct binary for the target? ([`PlatformDescriptor::configure`])
//!
//! It also declares the options and feature flags it accepts, and the engine
//! modules it cannot build.
//!
//! ## Quick Start
//!
//! ```rust
//! use porter_protocol::{
//!     Availability, BuildConfiguration, BuildOption, HostEnv, OptionValues,
//!     PlatformDescriptor, Tool,
//! };
//!
//! pub struct ToyPlatform;
//!
//! impl PlatformDescriptor for ToyPlatform {
//!     fn key(&self) -> &str {
//!         "toy"
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Toy Console"
//!     }
//!
//!     fn probe(&self, host: &HostEnv) -> Availability {
//!         if host.has_var("TOYSDK") {
//!             Availability::Available
//!         } else {
//!             Availability::missing("TOYSDK not defined in environment")
//!         }
//!     }
//!
//!     fn options(&self) -> Vec<BuildOption> {
//!         vec![BuildOption::flag("toy_rumble", "Support for rumble packs", false)]
//!     }
//!
//!     fn configure(&self, config: &mut BuildConfiguration, values: &OptionValues, _host: &HostEnv) {
//!         config.set_tool(Tool::Cc, "toy-gcc");
//!         if values.flag("toy_rumble") {
//!             config.append_defines(["RUMBLE_ENABLED"]);
//!         }
//!     }
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Build configuration**: an explicit struct handed to exactly one
//!   descriptor per build. It can be appended to, prepended to, or have keys
//!   set, but nothing already present can be removed.
//! - **Host environment**: a snapshot of the host OS and environment
//!   variables. Descriptors read from it instead of the live process, which
//!   keeps probing and configuration pure functions of their inputs.
//! - **Typed option values**: booleans are real `bool`s once resolved; the
//!   `"yes"`/`"no"` spelling only exists at the command-line boundary.

pub mod config;
pub mod host;
pub mod traits;
pub mod types;

pub use config::{BuildConfiguration, BuilderKind, BuilderSpec, Tool};
pub use host::HostEnv;
pub use traits::PlatformDescriptor;
pub use types::{
    parse_bool, Availability, BuildOption, BuildTarget, FeatureFlag, OptionValue, OptionValues,
};
