use std::collections::HashSet;

use porter_core::configs::build_file::load_build_file;
use porter_core::options::validate_schema;
use porter_core::{BuildDriver, BuildRequest, PorterError};
use porter_protocol::{BuildConfiguration, BuildTarget, HostEnv, PlatformDescriptor, Tool};

const TARGETS: [BuildTarget; 3] = [
    BuildTarget::Release,
    BuildTarget::ReleaseDebug,
    BuildTarget::Debug,
];

fn capable_host() -> HostEnv {
    HostEnv::new("macos")
        .with_var("PS2SDK", "/usr/local/ps2dev/ps2sdk")
        .with_var("PS2DEV", "/usr/local/ps2dev")
        .with_var("PATH", "/usr/bin:/bin")
}

fn configure(key: &str, request: &BuildRequest) -> BuildConfiguration {
    BuildDriver::with_builtin()
        .configure(key, request, &capable_host())
        .expect("platform configures on a capable host")
}

#[test]
fn builtin_schemas_have_unique_keys() {
    let driver = BuildDriver::with_builtin();
    for platform in driver.registry().iter() {
        assert!(validate_schema(platform).is_ok(), "{}", platform.key());

        let mut seen = HashSet::new();
        for key in platform
            .options()
            .into_iter()
            .map(|o| o.key)
            .chain(platform.flags().into_iter().map(|f| f.key))
        {
            assert!(seen.insert(key.clone()), "{} repeats {}", platform.key(), key);
        }
    }
}

#[test]
fn missing_prerequisites_block_configuration() {
    let driver = BuildDriver::with_builtin();
    let bare = HostEnv::new("linux");

    for platform in driver.registry().iter() {
        assert!(!platform.can_build(&bare), "{}", platform.key());
        assert!(matches!(
            driver.configure(platform.key(), &BuildRequest::new(), &bare),
            Err(PorterError::Unavailable { .. })
        ));
    }

    let half = HostEnv::new("linux").with_var("PS2DEV", "/usr/local/ps2dev");
    assert!(matches!(
        driver.configure("ps2", &BuildRequest::new(), &half),
        Err(PorterError::Unavailable { reason, .. }) if reason.contains("PS2SDK")
    ));
}

#[test]
fn configuration_is_a_pure_function_of_inputs() {
    for key in ["iphone", "ps2"] {
        for target in TARGETS {
            let request = BuildRequest::new().with_target(target);
            assert_eq!(configure(key, &request), configure(key, &request), "{key} {target}");
        }
    }
}

#[test]
fn exactly_one_arch_and_mode_branch_fires() {
    for key in ["iphone", "ps2"] {
        for target in TARGETS {
            let config = configure(key, &BuildRequest::new().with_target(target));
            assert!(config.arch().is_some(), "{key} {target}");
            assert!(config.bits().is_some(), "{key} {target}");

            let memory_debug = config.has_define("DEBUG_MEMORY_ENABLED");
            let debug_enabled = config.has_define("DEBUG_ENABLED");
            match target {
                BuildTarget::Release => assert!(!debug_enabled && !memory_debug),
                BuildTarget::ReleaseDebug => assert!(debug_enabled && !memory_debug),
                BuildTarget::Debug => assert!(debug_enabled && memory_debug),
            }
            assert_eq!(config.target(), target);
        }
    }
}

#[test]
fn iphone_arch_variants_are_exclusive() {
    let arches = [("x86", "32"), ("arm64", "64"), ("arm", "32")];
    for (arch, bits) in arches {
        let request = BuildRequest::new().with_override("arch", arch);
        let config = configure("iphone", &request);
        assert_eq!(config.arch(), Some(arch));
        assert_eq!(config.bits(), Some(bits));

        let arch_flags = config
            .cc_flags()
            .windows(2)
            .filter(|pair| pair[0] == "-arch")
            .count();
        assert_eq!(arch_flags, 1, "{arch}");
    }
}

#[test]
fn iphone_arm64_release_scenario() {
    let request = BuildRequest::new()
        .with_target(BuildTarget::Release)
        .with_override("arch", "arm64");
    let config = configure("iphone", &request);

    for define in [
        "IPHONE_ENABLED",
        "UNIX_ENABLED",
        "GLES2_ENABLED",
        "MPC_FIXED_POINT",
        "NEED_LONG_INT",
        "LIBYUV_DISABLE_NEON",
        "NDEBUG",
        "NS_BLOCK_ASSERTIONS=1",
    ] {
        assert!(config.has_define(define), "missing {define}");
    }
    for define in ["_DEBUG", "DEBUG=1", "DEBUG_ENABLED", "DEBUG_MEMORY_ENABLED"] {
        assert!(!config.has_define(define), "unexpected {define}");
    }
}

#[test]
fn iphone_disabled_toggle_leaves_no_define_or_framework() {
    let request = BuildRequest::new().with_override("store_kit", "no");
    let config = configure("iphone", &request);
    assert!(!config.has_define("STOREKIT_ENABLED"));
    assert!(!config.links_framework("StoreKit"));
    assert!(config.has_define("GAME_CENTER_ENABLED"));
}

#[test]
fn iphone_sees_opus_enabled_by_default() {
    let config = configure("iphone", &BuildRequest::new().with_override("arch", "arm64"));
    assert!(config.module_enabled("opus"));
    assert_eq!(config.custom("opus_fixed_point"), Some("yes"));

    let request = BuildRequest::new()
        .with_override("arch", "arm64")
        .with_override("module_opus_enabled", "no");
    let config = configure("iphone", &request);
    assert_eq!(config.custom("opus_fixed_point"), None);
    assert!(!config.c_flags().iter().any(|f| f == "-DOPUS_ARM64_OPT"));
}

#[test]
fn ps2_disables_unsupported_modules() {
    let request = BuildRequest::new().with_override("module_opus_enabled", "yes");
    let config = configure("ps2", &request);
    for module in ["opus", "theora", "openssl", "webp", "squish"] {
        assert!(!config.module_enabled(module), "{module}");
    }
    assert!(config.module_enabled("gdscript"));
    assert_eq!(config.tool(Tool::Ld), Some("mips64r5900el-ps2-elf-ld"));
}

#[test]
fn platforms_never_drop_default_entries() {
    for key in ["iphone", "ps2"] {
        let config = configure(key, &BuildRequest::new());
        assert!(config.include_paths().iter().any(|p| p == "#"), "{key}");
        let path = config.env().get("PATH").cloned().unwrap_or_default();
        assert!(path.ends_with("/usr/bin:/bin"), "{key}: {path}");
        // Both platforms turn the editor tools off through their flags.
        assert!(!config.has_define("TOOLS_ENABLED"), "{key}");
    }
}

#[test]
fn ps2_build_file_drives_configuration() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("ps2.yml");
    std::fs::write(
        &path,
        "platform: ps2\ntarget: release\noptions:\n  debug_release: true\n",
    )
    .expect("build file written");

    let file = load_build_file(&path).expect("build file loads");
    let request = BuildRequest::from_build_file(&file).expect("valid request");
    let config = configure(file.platform.as_deref().unwrap_or("ps2"), &request);

    assert_eq!(config.target(), BuildTarget::Release);
    assert_eq!(config.cc_flags().first().map(String::as_str), Some("-g2"));
    assert!(config.cc_flags().iter().any(|f| f == "-Ofast"));
}

#[test]
fn command_line_overrides_follow_build_file() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("iphone.toml");
    std::fs::write(
        &path,
        "platform = \"iphone\"\n\n[options]\ngame_center = true\n",
    )
    .expect("build file written");

    let file = load_build_file(&path).expect("build file loads");
    let request = BuildRequest::from_build_file(&file)
        .expect("valid request")
        .with_override("game_center", "no");
    let config = configure("iphone", &request);
    assert!(!config.has_define("GAME_CENTER_ENABLED"));
}

#[test]
fn unsupported_build_file_extension() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("build.json");
    std::fs::write(&path, "{}").expect("file written");
    assert!(matches!(load_build_file(&path), Err(PorterError::Config(_))));
}

#[test]
fn unquoted_sdk_version_reaches_link_flags() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("iphone.yml");
    std::fs::write(&path, "platform: iphone\noptions:\n  SDKVERSION: 13.0\n")
        .expect("build file written");

    let file = load_build_file(&path).expect("build file loads");
    let request = BuildRequest::from_build_file(&file).expect("valid request");
    let config = configure("iphone", &request);
    assert!(config
        .link_flags()
        .windows(2)
        .any(|pair| pair[0] == "-Xlinker" && pair[1] == "13.0"));
}

#[test]
fn platforms_only_add_to_the_defaults() {
    let host = capable_host();
    for key in ["iphone", "ps2"] {
        let driver = BuildDriver::with_builtin();
        let values = porter_core::options::resolve_options(
            driver.registry().require(key).expect("builtin platform"),
            &BuildRequest::new(),
        )
        .expect("options resolve");
        let defaults = porter_core::driver::default_configuration(&values, &host);
        let config = configure(key, &BuildRequest::new());

        for path in defaults.include_paths() {
            assert!(config.include_paths().contains(path), "{key} dropped {path}");
        }
        for define in defaults.defines() {
            assert!(config.has_define(define), "{key} dropped {define}");
        }
        for var in defaults.env().keys() {
            assert!(config.env().contains_key(var), "{key} dropped {var}");
        }
    }
}
