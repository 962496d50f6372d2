use anyhow::Result;
use colored::*;
use porter_core::BuildDriver;
use porter_protocol::{Availability, HostEnv};

pub fn execute(driver: &BuildDriver, host: &HostEnv) -> Result<()> {
    println!("{}", "Platforms".bold().underline());

    if driver.registry().is_empty() {
        println!("  {}", "No platforms registered".dimmed());
        return Ok(());
    }

    for status in driver.detect(host) {
        match &status.availability {
            Availability::Available => {
                println!(
                    "{} {} {}",
                    status.key.blue().bold(),
                    format!("({})", status.name).dimmed(),
                    "[available]".green()
                );
            }
            Availability::Missing(reason) => {
                println!(
                    "{} {} {}",
                    status.key.cyan(),
                    format!("({})", status.name).dimmed(),
                    format!("[unavailable: {reason}]").yellow()
                );
            }
        }
    }

    Ok(())
}
