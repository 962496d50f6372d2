//! Porter Core Library
//!
//! This is the core library for the Porter build configurator. It owns the
//! platform registry, option resolution, and the driver that turns a platform
//! descriptor plus user settings into a finished build configuration.
//!
//! ## Architecture
//!
//! The core library is organized into several modules:
//!
//! - [`driver`] - Probes, resolves, and invokes one platform per build
//! - [`registry`] - Ordered, typed registry of platform descriptors
//! - [`options`] - Driver options, schema merging, and option resolution
//! - [`configs`] - Build file parsing (YAML or TOML)
//! - [`results`] - Result types for driver queries
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! ```rust,no_run
//! use porter_core::{BuildDriver, BuildRequest};
//! use porter_protocol::HostEnv;
//!
//! # fn example() -> porter_core::PorterResult<()> {
//! let driver = BuildDriver::with_builtin();
//! let host = HostEnv::current();
//!
//! for status in driver.detect(&host) {
//!     println!("{}: {}", status.name, status.availability.is_available());
//! }
//!
//! let _config = driver.configure("iphone", &BuildRequest::new(), &host)?;
//! # Ok(())
//! # }
//! ```

pub mod configs;
pub mod driver;
pub mod options;
pub mod registry;
pub mod results;
pub mod types;

// Re-export the main types for easier usage
pub use driver::BuildDriver;
pub use options::BuildRequest;
pub use registry::PlatformRegistry;
pub use types::{PorterError, PorterResult};
