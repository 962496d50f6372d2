use porter_protocol::OptionValues;

const FRAMEWORKS_SIMULATOR: &[&str] = &[
    "AudioToolbox",
    "AVFoundation",
    "CoreAudio",
    "CoreGraphics",
    "CoreMedia",
    "CoreMotion",
    "Foundation",
    "Security",
    "UIKit",
    "MediaPlayer",
    "OpenGLES",
    "QuartzCore",
    "SystemConfiguration",
    "GameController",
];

const FRAMEWORKS_DEVICE: &[&str] = &[
    "Foundation",
    "UIKit",
    "CoreGraphics",
    "OpenGLES",
    "QuartzCore",
    "CoreAudio",
    "AudioToolbox",
    "SystemConfiguration",
    "Security",
    "MediaPlayer",
    "AVFoundation",
    "CoreMedia",
    "CoreMotion",
    "GameController",
];

/// The mutually exclusive iOS architectures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IosArch {
    /// 32-bit x86 simulator.
    Simulator,
    Arm64,
    /// 32-bit ARMv7 devices. The fallback when nothing else is requested.
    Armv7,
}

impl IosArch {
    /// Pick the architecture from the `ios_sim` and `arch` options.
    pub fn from_values(values: &OptionValues) -> Self {
        let arch = values.text("arch");
        if values.flag("ios_sim") || arch == "x86" {
            Self::Simulator
        } else if arch == "arm64" {
            Self::Arm64
        } else {
            Self::Armv7
        }
    }

    /// Name recorded as the configuration's `arch`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Simulator => "x86",
            Self::Arm64 => "arm64",
            Self::Armv7 => "arm",
        }
    }

    pub fn bits(&self) -> &'static str {
        match self {
            Self::Arm64 => "64",
            Self::Simulator | Self::Armv7 => "32",
        }
    }

    /// Argument passed to clang's `-arch`.
    pub fn clang_arch(&self) -> &'static str {
        match self {
            Self::Simulator => "i386",
            Self::Arm64 => "arm64",
            Self::Armv7 => "armv7",
        }
    }

    pub fn is_simulator(&self) -> bool {
        matches!(self, Self::Simulator)
    }

    pub fn compile_flags(&self, sdk: &str) -> Vec<String> {
        let flags: Vec<&str> = match self {
            Self::Simulator => vec![
                "-arch",
                "i386",
                "-fobjc-abi-version=2",
                "-fobjc-legacy-dispatch",
                "-fmessage-length=0",
                "-fpascal-strings",
                "-fblocks",
                "-fasm-blocks",
                "-isysroot",
                sdk,
                "-mios-simulator-version-min=4.3",
            ],
            Self::Arm64 => vec![
                "-fno-objc-arc",
                "-arch",
                "arm64",
                "-fmessage-length=0",
                "-fno-strict-aliasing",
                "-fdiagnostics-print-source-range-info",
                "-fdiagnostics-show-category=id",
                "-fdiagnostics-parseable-fixits",
                "-fpascal-strings",
                "-fblocks",
                "-fvisibility=hidden",
                "-MMD",
                "-MT",
                "dependencies",
                "-miphoneos-version-min=9.0",
                "-isysroot",
                sdk,
            ],
            Self::Armv7 => vec![
                "-fno-objc-arc",
                "-arch",
                "armv7",
                "-fmessage-length=0",
                "-fno-strict-aliasing",
                "-fdiagnostics-print-source-range-info",
                "-fdiagnostics-show-category=id",
                "-fdiagnostics-parseable-fixits",
                "-fpascal-strings",
                "-fblocks",
                "-isysroot",
                sdk,
                "-fvisibility=hidden",
                "-mthumb",
                "-miphoneos-version-min=9.0",
                "-MMD",
                "-MT",
                "dependencies",
            ],
        };
        flags.into_iter().map(str::to_string).collect()
    }

    pub fn defines(&self) -> Vec<&'static str> {
        match self {
            Self::Simulator => vec![
                "__IPHONE_OS_VERSION_MIN_REQUIRED=40100",
                r#"CUSTOM_MATRIX_TRANSFORM_H="build/iphone/matrix4_iphone.h""#,
                r#"CUSTOM_VECTOR3_TRANSFORM_H="build/iphone/vector3_iphone.h""#,
            ],
            Self::Arm64 => vec!["NEED_LONG_INT", "LIBYUV_DISABLE_NEON"],
            // Interface Builder annotations compile to plain attributes.
            Self::Armv7 => vec![
                "IBOutlet=__attribute__((iboutlet))",
                "IBOutletCollection(ClassName)=__attribute__((iboutletcollection(ClassName)))",
                "IBAction=void)__attribute__((ibaction)",
            ],
        }
    }

    pub fn link_flags(&self, sdk: &str, sdk_version: &str) -> Vec<String> {
        let mut flags: Vec<String> = vec!["-arch".into(), self.clang_arch().into()];

        if self.is_simulator() {
            flags.push("-mios-simulator-version-min=9.0".into());
        } else {
            flags.push("-Wl,-dead_strip".into());
            flags.push("-miphoneos-version-min=9.0".into());
        }

        flags.extend(
            [
                "-isysroot",
                sdk,
                "-Xlinker",
                "-sdk_version",
                "-Xlinker",
                sdk_version,
            ]
            .map(str::to_string),
        );

        let frameworks = if self.is_simulator() {
            flags.extend(
                ["-Xlinker", "-objc_abi_version", "-Xlinker", "2"].map(str::to_string),
            );
            FRAMEWORKS_SIMULATOR
        } else {
            FRAMEWORKS_DEVICE
        };

        for framework in frameworks {
            flags.push("-framework".into());
            flags.push((*framework).to_string());
        }

        if self.is_simulator() {
            flags.push(format!("-F{sdk}"));
        }

        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use porter_protocol::BuildTarget;

    #[test]
    fn test_simulator_wins_over_arch() {
        let values = OptionValues::new(BuildTarget::Debug)
            .with("ios_sim", true)
            .with("arch", "arm64");
        assert_eq!(IosArch::from_values(&values), IosArch::Simulator);
    }

    #[test]
    fn test_arch_selection() {
        let pick = |arch: &str| {
            let values = OptionValues::new(BuildTarget::Debug)
                .with("ios_sim", false)
                .with("arch", arch);
            IosArch::from_values(&values)
        };
        assert_eq!(pick("x86"), IosArch::Simulator);
        assert_eq!(pick("arm64"), IosArch::Arm64);
        assert_eq!(pick("arm"), IosArch::Armv7);
        assert_eq!(pick(""), IosArch::Armv7);
    }

    #[test]
    fn test_simulator_link_flags_end_with_framework_search_path() {
        let flags = IosArch::Simulator.link_flags("/sdk", "12.1");
        assert_eq!(flags.first().map(String::as_str), Some("-arch"));
        assert_eq!(flags.get(1).map(String::as_str), Some("i386"));
        assert_eq!(flags.last().map(String::as_str), Some("-F/sdk"));
        assert!(flags.iter().any(|f| f == "-objc_abi_version"));
        assert!(!flags.iter().any(|f| f == "-Wl,-dead_strip"));
    }

    #[test]
    fn test_device_link_flags_strip_dead_code() {
        let flags = IosArch::Arm64.link_flags("/sdk", "12.1");
        assert!(flags.iter().any(|f| f == "-Wl,-dead_strip"));
        assert!(flags.iter().any(|f| f == "12.1"));
        assert!(!flags.iter().any(|f| f.starts_with("-F")));
        assert_eq!(
            flags.iter().filter(|f| *f == "-framework").count(),
            FRAMEWORKS_DEVICE.len()
        );
    }
}
