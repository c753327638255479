use std::path::Path;

use miette::{IntoDiagnostic, Result};
use neobookings_core::config::{self, NeobookingsConfig};
use owo_colors::OwoColorize;

use crate::output::Output;

/// Show current configuration, password masked
pub fn show(config: &NeobookingsConfig) -> Result<()> {
    let output = Output::new();

    output.section("Current Configuration");
    println!();

    let toml_str = toml::to_string_pretty(&config.redacted()).into_diagnostic()?;
    println!("{}", toml_str);

    Ok(())
}

/// Save current configuration to file
pub async fn save(config: &NeobookingsConfig, path: &Path) -> Result<()> {
    let output = Output::new();

    output.info("💾", &format!("Saving configuration to: {}", path.display()));

    config::save_config(config, path).await?;

    output.success("Configuration saved successfully!");
    output.warning("The file holds the API password; keep it out of version control.");
    println!();
    println!("To use this configuration, run:");
    println!("  {} --config {} serve", "neobookings".bright_green(), path.display());

    Ok(())
}
