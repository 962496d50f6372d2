//! Host environment snapshot used for toolchain probing

use log::debug;
use std::collections::BTreeMap;
use std::env;
use std::ffi::OsString;

/// The host OS and environment variables, captured once.
///
/// Descriptors read prerequisites (SDK roots, cache wrappers, `PATH`) from
/// here rather than from the live process so probing and configuration stay
/// pure functions of their inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnv {
    /// Value of `std::env::consts::OS` on the host (e.g. "macos", "linux").
    pub os: String,
    vars: BTreeMap<String, String>,
}

impl HostEnv {
    /// Capture the running process's OS and environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped, with a
    /// debug log line naming them.
    pub fn current() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            vars: unicode_vars(env::vars_os()),
        }
    }

    /// An empty environment for the given OS.
    pub fn new(os: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            vars: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn has_var(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn is_macos(&self) -> bool {
        self.os == "macos"
    }
}

fn unicode_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> BTreeMap<String, String> {
    vars.into_iter()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (Ok(key), Err(_)) => {
                debug!("Ignoring environment variable {key}: value is not valid Unicode");
                None
            }
            (Err(key), _) => {
                debug!("Ignoring environment variable {key:?}: name is not valid Unicode");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_reports_host_os() {
        let host = HostEnv::current();
        assert_eq!(host.os, env::consts::OS);
    }

    #[test]
    fn test_with_var() {
        let host = HostEnv::new("linux").with_var("PS2DEV", "/usr/local/ps2dev");
        assert_eq!(host.var("PS2DEV"), Some("/usr/local/ps2dev"));
        assert!(host.has_var("PS2DEV"));
        assert!(!host.has_var("PS2SDK"));
        assert!(!host.is_macos());
    }

    #[test]
    fn test_macos() {
        assert!(HostEnv::new("macos").is_macos());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_values_are_skipped() {
        use std::os::unix::ffi::OsStringExt;

        let vars = unicode_vars([
            (OsString::from("PATH"), OsString::from_vec(vec![b'/', 0xff])),
            (OsString::from("PS2DEV"), OsString::from("/usr/local/ps2dev")),
        ]);
        assert!(!vars.contains_key("PATH"));
        assert_eq!(vars.get("PS2DEV").map(String::as_str), Some("/usr/local/ps2dev"));
    }
}
