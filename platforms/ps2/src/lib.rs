//! Playstation 2 platform module.
//!
//! Cross-compiles for the Emotion Engine with the ps2dev `mips64r5900el-ps2-elf`
//! toolchain. Both `PS2SDK` and `PS2DEV` must be set.

use log::debug;
use porter_protocol::{
    Availability, BuildConfiguration, BuildTarget, FeatureFlag, HostEnv, OptionValues,
    PlatformDescriptor, Tool,
};

const TOOLCHAIN_PREFIX: &str = "mips64r5900el-ps2-elf-";
const REQUIRED_VARS: [&str; 2] = ["PS2SDK", "PS2DEV"];

const LIBS: &[&str] = &[
    "stdc++", "dma", "packet2", "graph", "draw", "math3d", "pad", "audsrv", "patches", "cdvd",
    "debug",
];

/// Engine modules that do not build for the Emotion Engine.
const UNSUPPORTED_MODULES: &[&str] = &[
    "cscript", "dds", "mpc", "openssl", "opus", "pvr", "speex", "theora", "webp", "squish",
];

/// The Playstation 2 descriptor.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ps2Platform;

impl Ps2Platform {
    pub const KEY: &'static str = "ps2";
}

impl PlatformDescriptor for Ps2Platform {
    fn key(&self) -> &str {
        Self::KEY
    }

    fn name(&self) -> &str {
        "Playstation 2"
    }

    fn probe(&self, host: &HostEnv) -> Availability {
        match REQUIRED_VARS.iter().find(|var| !host.has_var(var)) {
            Some(var) => Availability::missing(format!("{var} not defined in environment")),
            None => Availability::Available,
        }
    }

    fn flags(&self) -> Vec<FeatureFlag> {
        vec![FeatureFlag::new("tools", false), FeatureFlag::new("bits", "32")]
    }

    fn disabled_modules(&self) -> Vec<&'static str> {
        UNSUPPORTED_MODULES.to_vec()
    }

    fn configure(&self, config: &mut BuildConfiguration, values: &OptionValues, host: &HostEnv) {
        for tool in Tool::ALL {
            config.set_tool(tool, toolchain_program(tool));
        }

        let ps2dev = host.var("PS2DEV").unwrap_or_default();

        config.prepend_include_paths([
            format!("{ps2dev}/ps2sdk/ee/include"),
            format!("{ps2dev}/ps2sdk/common/include"),
            format!("{ps2dev}/ps2sdk/ports/include"),
        ]);
        config.append_defines(["_EE", "__PS2__"]);
        config.append_as_flags(["-O3"]);
        config.append_libs(LIBS.iter().copied());
        config.append_link_flags([
            "-Wl,-zmax-page-size=128".to_string(),
            format!("-L{ps2dev}/ps2sdk/ee/lib"),
            format!("-L{ps2dev}/ports/lib"),
            format!("-T{ps2dev}/ps2sdk/ee/startup/linkfile"),
        ]);

        config.set_arch("mips64r5900el");
        config.set_bits("32");

        let debug_symbols = values.flag("debug_release");
        match config.target() {
            BuildTarget::Release => {
                config.prepend_cc_flags(["-Ofast"]);
                if debug_symbols {
                    config.prepend_cc_flags(["-g2"]);
                }
            }
            BuildTarget::ReleaseDebug => {
                config.prepend_cc_flags(["-O2", "-ffast-math"]);
                config.append_defines(["DEBUG_ENABLED"]);
                if debug_symbols {
                    config.prepend_cc_flags(["-g2"]);
                }
            }
            BuildTarget::Debug => {
                config.prepend_cc_flags(["-g2"]);
                config.append_defines(["DEBUG_ENABLED", "DEBUG_MEMORY_ENABLED"]);
            }
        }

        config.append_defines(["NEED_LONG_INT", "NO_THREADS", "DEBUG_INIT"]);
        config.prepend_include_paths(["#platform/ps2"]);

        debug!("CCFLAGS={:?}", config.cc_flags());
        debug!("LINKFLAGS={:?}", config.link_flags());
    }
}

fn toolchain_program(tool: Tool) -> String {
    let name = match tool {
        Tool::Cc => "gcc",
        Tool::Cxx => "g++",
        other => other.as_str(),
    };
    format!("{TOOLCHAIN_PREFIX}{name}")
}
