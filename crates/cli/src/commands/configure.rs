use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::*;
use porter_core::configs::build_file::load_build_file;
use porter_core::{BuildDriver, BuildRequest};
use porter_protocol::{BuildConfiguration, BuildTarget, HostEnv};

pub struct ConfigureArgs {
    pub platform: String,
    pub target: Option<BuildTarget>,
    pub overrides: Vec<(String, String)>,
    pub file: Option<PathBuf>,
    pub json: bool,
}

pub fn execute(driver: &BuildDriver, host: &HostEnv, args: ConfigureArgs) -> Result<()> {
    let request = build_request(&args)?;

    let config = driver
        .configure(&args.platform, &request, host)
        .with_context(|| format!("Failed to configure '{}'", args.platform))?;

    if args.json {
        let json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize configuration")?;
        println!("{json}");
    } else {
        print_summary(&args.platform, &config);
    }

    Ok(())
}

/// Build file settings first, command-line settings on top.
fn build_request(args: &ConfigureArgs) -> Result<BuildRequest> {
    let mut request = match &args.file {
        Some(path) => {
            let file = load_build_file(path)
                .with_context(|| format!("Failed to load build file {}", path.display()))?;

            if let Some(platform) = &file.platform {
                if platform != &args.platform {
                    bail!(
                        "Build file {} is for '{}', not '{}'",
                        path.display(),
                        platform,
                        args.platform
                    );
                }
            }
            BuildRequest::from_build_file(&file)?
        }
        None => BuildRequest::new(),
    };

    if let Some(target) = args.target {
        request = request.with_target(target);
    }
    for (key, value) in &args.overrides {
        request = request.with_override(key.as_str(), value.as_str());
    }

    Ok(request)
}

fn print_summary(platform: &str, config: &BuildConfiguration) {
    println!(
        "{} {}",
        platform.blue().bold(),
        format!("({})", config.target()).dimmed()
    );

    let arch = config.arch().unwrap_or("default");
    let bits = config.bits().unwrap_or("default");
    println!("  {} {} ({}-bit)", "arch:".bold(), arch.cyan(), bits);

    if !config.tools().is_empty() {
        println!("  {}", "tools:".bold());
        for (tool, program) in config.tools() {
            println!("    {} = {}", tool.as_str().cyan(), program);
        }
    }

    print_list("include paths", config.include_paths());
    print_list("defines", config.defines());
    print_list("cc flags", config.cc_flags());
    print_list("c flags", config.c_flags());
    print_list("cpp flags", config.cpp_flags());
    print_list("as flags", config.as_flags());
    print_list("link flags", config.link_flags());
    print_list("libs", config.libs());

    let disabled: Vec<&str> = config
        .modules()
        .iter()
        .filter(|(_, enabled)| !**enabled)
        .map(|(module, _)| module.as_str())
        .collect();
    if !disabled.is_empty() {
        println!("  {} {}", "disabled modules:".bold(), disabled.join(", ").dimmed());
    }

    if !config.env().is_empty() {
        println!("  {}", "env:".bold());
        for (key, value) in config.env() {
            println!("    {} = {}", key.cyan(), value);
        }
    }
}

fn print_list(label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("  {} {}", format!("{label}:").bold(), items.join(" "));
}
