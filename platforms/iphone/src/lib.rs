//! iOS platform module.
//!
//! Builds with the Xcode toolchain on macOS, or with an osxcross iOS toolchain
//! elsewhere (signalled by `OSXCROSS_IOS`).

use log::debug;
use porter_protocol::{
    Availability, BuildConfiguration, BuildOption, BuildTarget, BuilderKind, BuilderSpec,
    FeatureFlag, HostEnv, OptionValues, PlatformDescriptor, Tool,
};

mod arch;

pub use arch::IosArch;

const DEFAULT_TOOLCHAIN: &str =
    "/Applications/Xcode.app/Contents/Developer/Toolchains/XcodeDefault.xctoolchain";
const DEFAULT_SDK: &str = "/Applications/Xcode.app/Contents/Developer/Platforms/${IPHONEPLATFORM}.platform/Developer/SDKs/${IPHONEPLATFORM}.sdk/";
const CODESIGN_ALLOCATE: &str =
    "/Developer/Platforms/iPhoneOS.platform/Developer/usr/bin/codesign_allocate";

/// The iOS descriptor.
#[derive(Debug, Default, Clone, Copy)]
pub struct IphonePlatform;

impl IphonePlatform {
    pub const KEY: &'static str = "iphone";
}

impl PlatformDescriptor for IphonePlatform {
    fn key(&self) -> &str {
        Self::KEY
    }

    fn name(&self) -> &str {
        "iOS"
    }

    fn probe(&self, host: &HostEnv) -> Availability {
        if host.is_macos() || host.has_var("OSXCROSS_IOS") {
            Availability::Available
        } else {
            Availability::missing("not running on macOS and OSXCROSS_IOS is not set")
        }
    }

    fn options(&self) -> Vec<BuildOption> {
        vec![
            BuildOption::new("IPHONEPLATFORM", "name of the iphone platform", "iPhoneOS"),
            BuildOption::new("IPHONEPATH", "the path to iphone toolchain", DEFAULT_TOOLCHAIN),
            BuildOption::new("IPHONESDK", "path to the iphone SDK", DEFAULT_SDK),
            BuildOption::new("SDKVERSION", "SDK version to link against", "12.1"),
            BuildOption::flag("game_center", "Support for game center", true),
            BuildOption::flag("store_kit", "Support for in-app store", true),
            BuildOption::flag("icloud", "Support for iCloud", true),
            BuildOption::flag("ios_gles22_override", "Force GLES2.0 on iOS", true),
            BuildOption::flag("ios_exceptions", "Enable exceptions", false),
            BuildOption::new("ios_triple", "Triple for ios toolchain", ""),
            BuildOption::flag("ios_sim", "Build simulator binary", false),
            BuildOption::flag("use_lto", "Use link time optimization", false),
        ]
    }

    fn flags(&self) -> Vec<FeatureFlag> {
        vec![FeatureFlag::new("tools", false)]
    }

    fn configure(&self, config: &mut BuildConfiguration, values: &OptionValues, host: &HostEnv) {
        let arch = IosArch::from_values(values);

        // The SDK path is derived from the platform name, which the simulator overrides.
        let mut values = values.clone();
        if arch.is_simulator() {
            values.set("IPHONEPLATFORM", "iPhoneSimulator");
        }
        let iphone_path = values.expand(&values.text("IPHONEPATH"));
        let sdk = values.expand(&values.text("IPHONESDK"));
        let sdk_version = values.expand(&values.text("SDKVERSION"));

        config.append_include_paths(["#platform/iphone"]);
        config.prepend_env_path("PATH", &format!("{iphone_path}/Developer/usr/bin/"));

        select_toolchain(config, &iphone_path, &values.text("ios_triple"), host);

        config.set_arch(arch.name());
        config.set_bits(arch.bits());
        config.append_cc_flags(arch.compile_flags(&sdk));
        config.append_defines(arch.defines());
        config.append_link_flags(arch.link_flags(&sdk, &sdk_version));

        if values.flag("game_center") {
            config.append_defines(["GAME_CENTER_ENABLED"]);
            config.append_link_flags(["-framework", "GameKit"]);
        }
        if values.flag("store_kit") {
            config.append_defines(["STOREKIT_ENABLED"]);
            config.append_link_flags(["-framework", "StoreKit"]);
        }
        if values.flag("icloud") {
            config.append_defines(["ICLOUD_ENABLED"]);
        }

        config.append_include_paths([
            format!("{sdk}/usr/include"),
            format!("{sdk}/System/Library/Frameworks/OpenGLES.framework/Headers"),
            format!("{sdk}/System/Library/Frameworks/AudioUnit.framework/Headers"),
        ]);

        let target = config.target();
        if target.is_release() {
            config.append_defines(["NDEBUG", "NS_BLOCK_ASSERTIONS=1"]);
            config.append_cpp_flags([
                "-O2",
                "-ftree-vectorize",
                "-fomit-frame-pointer",
                "-ffast-math",
                "-funsafe-math-optimizations",
            ]);
            config.append_link_flags(["-O2"]);
            if values.flag("use_lto") {
                config.append_cpp_flags(["-flto"]);
                config.append_link_flags(["-flto"]);
            }
            if target == BuildTarget::ReleaseDebug {
                config.append_defines(["DEBUG_ENABLED"]);
            }
        } else {
            config.append_defines(["_DEBUG", "DEBUG=1", "DEBUG_ENABLED", "DEBUG_MEMORY_ENABLED"]);
            config.append_cpp_flags(["-gdwarf-2", "-O0"]);
        }

        // Only an explicit simulator build pins the deployment target, not `arch=x86`.
        if values.flag("ios_sim") {
            config.set_env("MACOSX_DEPLOYMENT_TARGET", "10.6");
        }
        config.set_env("CODESIGN_ALLOCATE", CODESIGN_ALLOCATE);
        config.append_defines([
            "IPHONE_ENABLED",
            "UNIX_ENABLED",
            "GLES2_ENABLED",
            "MPC_FIXED_POINT",
        ]);

        if config.module_enabled("opus") {
            config.set_custom("opus_fixed_point", "yes");
            match arch {
                IosArch::Simulator => {}
                IosArch::Arm64 => config.append_c_flags(["-DOPUS_ARM64_OPT"]),
                IosArch::Armv7 => config.append_c_flags(["-DOPUS_ARM_OPT"]),
            }
        }

        if values.flag("ios_exceptions") {
            config.append_cpp_flags(["-fexceptions"]);
        } else {
            config.append_cpp_flags(["-fno-exceptions"]);
        }

        config.set_custom("s_compiler", format!("{iphone_path}/Developer/usr/bin/gcc"));

        for (name, kind) in [
            ("GLSL120", BuilderKind::LegacyGlHeaders),
            ("GLSL", BuilderKind::GlslHeaders),
            ("GLSL120GLES", BuilderKind::Gles2Headers),
        ] {
            config.add_builder(BuilderSpec::new(name, kind, "glsl.gen.h", ".glsl"));
        }

        debug!(
            "iOS configured for {} ({}-bit, {})",
            arch.name(),
            arch.bits(),
            config.target()
        );
    }
}

/// Point the compilers at the toolchain, behind the compiler cache if one is set.
fn select_toolchain(config: &mut BuildConfiguration, iphone_path: &str, triple: &str, host: &HostEnv) {
    let compiler_path = format!("{iphone_path}/usr/bin/{triple}");

    // No ccache wrappers exist for iOS, so the cache binary is prefixed instead.
    match host.var("CCACHE") {
        Some(ccache) => {
            config.set_tool(Tool::Cc, format!("{ccache} {compiler_path}clang"));
            config.set_tool(Tool::Cxx, format!("{ccache} {compiler_path}clang++"));
        }
        None => {
            config.set_tool(Tool::Cc, format!("{compiler_path}clang"));
            config.set_tool(Tool::Cxx, format!("{compiler_path}clang++"));
        }
    }
    config.set_tool(Tool::Ar, format!("{compiler_path}ar"));
    config.set_tool(Tool::Ranlib, format!("{compiler_path}ranlib"));
}
