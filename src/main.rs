//! Trove Runtime
//!
//! The entry point for the mixture-of-agents runtime. Handles CLI args,
//! configuration and credential loading, and running a declarative pipeline
//! end to end.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use trove::config::{load_config, load_pipeline, require_api_key, resolve_path};
use trove::inference::OpenAiClient;
use trove::moa::MixtureOfAgents;
use trove::registry::AgentRegistry;
use trove::report::ReportDocument;
use trove::tools::ToolRegistry;
use trove::types::{default_config, InferenceClient, TroveConfig};

const VERSION: &str = "0.1.0";

/// Trove -- Layered Mixture-of-Agents Runtime
#[derive(Parser, Debug)]
#[command(
    name = "trove",
    version = VERSION,
    about = "Trove -- Layered Mixture-of-Agents Runtime",
    long_about = "Runs a task through layered member agents and aggregates their outputs into a final report."
)]
struct Cli {
    /// Run a task through the pipeline
    #[arg(long)]
    run: Option<String>,

    /// Path to the pipeline definition JSON (required with --run)
    #[arg(long)]
    pipeline: Option<PathBuf>,

    /// Re-run the interactive setup wizard
    #[arg(long)]
    setup: bool,

    /// Show current configuration
    #[arg(long)]
    status: bool,
}

// ---- Status Command ---------------------------------------------------------

/// Display the current configuration.
fn show_status() {
    let config = match load_config() {
        Some(config) => config,
        None => {
            println!("Trove is not configured. Run: trove --setup");
            return;
        }
    };

    println!(
        r#"
=== TROVE STATUS ===
Name:       {}
API URL:    {}
Model:      {}
Max tokens: {}
Reports:    {}
Version:    {}
====================
"#,
        config.name,
        config.api_url,
        config.model,
        config.max_tokens,
        config.report_dir,
        config.version,
    );
}

// ---- Run Command ------------------------------------------------------------

/// Load config + credential, build the pipeline's agents through the
/// registry, run the mixture, and write the report.
async fn run(task: &str, pipeline_path: &PathBuf) -> Result<()> {
    let config = load_config().unwrap_or_else(default_config);

    let api_key = require_api_key(&config)?;

    let pipeline = load_pipeline(pipeline_path)?;

    // Shared collaborators, constructed once and passed by reference.
    let inference: Arc<dyn InferenceClient> = Arc::new(OpenAiClient::new(
        config.api_url.clone(),
        api_key,
        config.model.clone(),
        config.max_tokens,
    ));
    let tools = Arc::new(ToolRegistry::new());

    let mut registry = AgentRegistry::new();
    for blueprint in &pipeline.agents {
        registry.register(blueprint.clone());
    }
    registry.register(pipeline.final_agent.clone());

    let mut members = Vec::with_capacity(pipeline.agents.len());
    for blueprint in &pipeline.agents {
        members.push(registry.build(&blueprint.name, inference.clone(), tools.clone())?);
    }
    let final_agent =
        registry.build(&pipeline.final_agent.name, inference.clone(), tools.clone())?;

    let mut mixture =
        MixtureOfAgents::new(pipeline.name.clone(), members, pipeline.layers, final_agent)?;

    let result = mixture.run(task).await;

    let report = ReportDocument::from_run(task, mixture.name(), &result, mixture.history());
    let report_path = write_report(&config, &report)?;

    println!("{}", "Final report:".cyan());
    println!("{}", result);
    println!();
    println!("Report written to {}", report_path.display());

    Ok(())
}

/// Write the report into the configured report directory, named by the
/// mixture and a timestamp.
fn write_report(config: &TroveConfig, report: &ReportDocument) -> Result<PathBuf> {
    let dir = PathBuf::from(resolve_path(&config.report_dir));
    fs::create_dir_all(&dir).context("Failed to create report directory")?;

    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%S");
    let path = dir.join(format!("{}-{}.md", report.generated_by, stamp));
    report.save_markdown(&path)?;

    Ok(path)
}

// ---- Entry Point ------------------------------------------------------------

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if cli.setup {
        if let Err(e) = trove::setup::run_setup_wizard() {
            eprintln!("Setup failed: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    if cli.status {
        show_status();
        return;
    }

    if let Some(task) = cli.run {
        let pipeline_path = match cli.pipeline {
            Some(path) => path,
            None => {
                eprintln!("--run requires --pipeline <file>");
                std::process::exit(1);
            }
        };

        if let Err(e) = run(&task, &pipeline_path).await {
            eprintln!("Run failed: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    println!(
        "Trove v{}. Use --run <task> --pipeline <file>, --setup, or --status.",
        VERSION
    );
}
