use anyhow::Result;
use colored::*;
use porter_core::BuildDriver;
use porter_protocol::BuildOption;

pub fn execute(driver: &BuildDriver, platform: &str) -> Result<()> {
    let schema = driver.option_schema(platform)?;

    println!(
        "{}",
        format!("{} options", schema.name).bold().underline()
    );
    print_options(&schema.options);

    if !schema.flags.is_empty() {
        println!();
        println!("{}", "Platform flags".bold());
        for flag in &schema.flags {
            println!("  {} = {}", flag.key.cyan(), flag.default.to_string().green());
        }
    }

    println!();
    println!("{}", "Driver options".bold());
    print_options(&schema.driver_options);

    if !schema.disabled_modules.is_empty() {
        println!();
        println!(
            "{} {}",
            "Always disabled modules:".bold(),
            schema.disabled_modules.join(", ").dimmed()
        );
    }

    Ok(())
}

fn print_options(options: &[BuildOption]) {
    if options.is_empty() {
        println!("  {}", "None".dimmed());
        return;
    }

    for option in options {
        println!(
            "  {} = {}  {}",
            option.key.blue().bold(),
            option.default.to_string().green(),
            option.description.dimmed()
        );
    }
}
