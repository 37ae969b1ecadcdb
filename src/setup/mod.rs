//! Setup Wizard
//!
//! Interactive first-run configuration: name, API credential, model and
//! sampling defaults. Writes `~/.trove/trove.json`.

pub mod prompts;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::{get_config_path, save_config, API_KEY_ENV};
use crate::types::{default_config, TroveConfig};

use prompts::{prompt_optional, prompt_required, prompt_with_default};

/// Run the interactive setup wizard.
/// Returns a fully populated `TroveConfig`.
pub fn run_setup_wizard() -> Result<TroveConfig> {
    println!();
    println!("{}", "  Trove first-run setup.\n".white());

    // ---- 1. Naming ----------------------------------------------------------
    println!("{}", "  [1/3] Naming".cyan());

    let name = prompt_required("What do you want to call this runtime?")?;
    println!("{}", format!("  Name: {}\n", name).green());

    // ---- 2. Credential ------------------------------------------------------
    println!("{}", "  [2/3] API credential".cyan());
    println!(
        "{}",
        format!(
            "  Leave empty to provide it via {} or a .env file instead.",
            API_KEY_ENV
        )
        .dimmed()
    );

    let api_key = prompt_optional("API key (sk-...)")?;
    if api_key.is_empty() {
        println!(
            "{}",
            "  No key stored. The runtime will read it from the environment.\n".yellow()
        );
    } else {
        println!("{}", "  API key will be stored in the config file.\n".green());
    }

    // ---- 3. Model defaults --------------------------------------------------
    println!("{}", "  [3/3] Model defaults".cyan());

    let defaults = default_config();
    let model = prompt_with_default("Default model", &defaults.model)?;
    let temperature: f64 = prompt_with_default("Sampling temperature", "0.1")?
        .parse()
        .context("Temperature must be a number")?;

    let mut config = defaults;
    config.name = name;
    config.api_key = api_key;
    config.model = model;
    config.temperature = temperature;

    save_config(&config).context("Failed to write config")?;
    println!(
        "{}",
        format!("\n  Config written to {}\n", get_config_path().display()).green()
    );

    Ok(config)
}
