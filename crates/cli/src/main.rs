use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use porter_core::BuildDriver;
use porter_protocol::{BuildTarget, HostEnv};

mod commands;

/// Porter - A cross-platform build configurator
#[derive(Parser)]
#[command(name = "porter")]
#[command(about = "Describe how to build for a target platform")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered platforms and whether this host can build them
    List,
    /// Show the options a platform accepts
    Options {
        /// Platform key, e.g. "iphone" or "ps2"
        platform: String,
    },
    /// Resolve options and print the build configuration for a platform
    Configure {
        /// Platform key, e.g. "iphone" or "ps2"
        platform: String,
        /// Build mode (release, release_debug, debug)
        #[arg(long)]
        target: Option<BuildTarget>,
        /// Override an option, may be repeated
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        overrides: Vec<(String, String)>,
        /// Build file (YAML or TOML) with the platform, target and options
        #[arg(long)]
        file: Option<PathBuf>,
        /// Print the configuration as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the JSON schema of the build file
    Schema,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let driver = BuildDriver::with_builtin();
    let host = HostEnv::current();

    match cli.command {
        Commands::List => commands::list::execute(&driver, &host),
        Commands::Options { platform } => commands::options::execute(&driver, &platform),
        Commands::Configure {
            platform,
            target,
            overrides,
            file,
            json,
        } => {
            let args = commands::configure::ConfigureArgs {
                platform,
                target,
                overrides,
                file,
                json,
            };
            commands::configure::execute(&driver, &host, args)
        }
        Commands::Schema => commands::schema::execute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn set_values_split_on_first_equals() {
        assert_eq!(
            parse_key_value("IPHONESDK=/sdk/a=b"),
            Ok(("IPHONESDK".to_string(), "/sdk/a=b".to_string()))
        );
        assert_eq!(
            parse_key_value("ios_sim="),
            Ok(("ios_sim".to_string(), String::new()))
        );
        assert!(parse_key_value("ios_sim").is_err());
        assert!(parse_key_value("=yes").is_err());
    }

    #[test]
    fn repeated_set_flags_keep_order() {
        let cli = Cli::try_parse_from([
            "porter",
            "configure",
            "ps2",
            "--target",
            "debug",
            "--set",
            "debug_release=yes",
            "--set",
            "debug_release=no",
        ])
        .expect("arguments parse");

        match cli.command {
            Commands::Configure {
                platform,
                target,
                overrides,
                ..
            } => {
                assert_eq!(platform, "ps2");
                assert_eq!(target, Some(BuildTarget::Debug));
                assert_eq!(overrides.len(), 2);
                assert_eq!(overrides[1].1, "no");
            }
            _ => panic!("expected configure"),
        }
    }
}
