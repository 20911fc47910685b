mod cli;
mod logging;

use anyhow::Context;
use backup_retention::config::{self, AppSettings};
use backup_retention::name::{self, Timestamp};
use backup_retention::{FileRecord, PathPlan, RetentionEngine};
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use colored::*;
use dotenv::dotenv;
use std::process;
use tracing::{error, info, warn};

fn main() {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    let mut settings = match config::load_settings() {
        Ok(settings) => settings,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };
    if let Some(path) = args.config {
        settings.config_file = path;
    }
    if let Some(keep) = args.keep {
        settings.keep_last = keep;
    }

    let Some(command) = args.command else {
        let _ = Cli::command().print_long_help();
        return;
    };

    if let Err(err) = run(command, settings) {
        error!("Error: {:#}", err);
        process::exit(1);
    }
}

fn run(command: Commands, settings: AppSettings) -> anyhow::Result<()> {
    let entries = config::read_config(&settings.config_file)
        .with_context(|| format!("reading backup list {}", settings.config_file))?;
    info!("{} configuration lines in {}", entries.len(), settings.config_file);

    let engine = RetentionEngine::new(entries, settings);

    match command {
        Commands::Plan => {
            let report = engine.run();
            for path in &report.skipped_paths {
                warn!("{} was not scanned", path);
            }
            for plan in &report.plans {
                print_plan(plan);
            }
            for entry in report.entries.iter().filter(|e| !e.has_any_files) {
                println!(
                    "{} {} in {}",
                    "no files for".yellow(),
                    format!("{}*{}", entry.series, entry.suffix).yellow(),
                    entry.path
                );
            }
            info!("Scan: {}", format!("{:.2}s", report.scan_duration.as_secs_f64()).green());
        }
        Commands::Uncovered => {
            let report = engine.run();
            for plan in &report.plans {
                for file in &plan.not_covered {
                    println!("{}", full_path(&plan.path, file));
                }
            }
        }
        Commands::Lookup { filename } => {
            match engine.find_entry(&filename) {
                Some(entry) => println!("{}", serde_json::to_string_pretty(entry)?),
                None => println!("{} is not covered by {}", filename, engine.settings().config_file),
            }
            match name::extract_timestamp(&filename) {
                Some(Timestamp { parsed: Some(at), .. }) => println!("Timestamp: {}", at),
                Some(Timestamp { literal, .. }) => println!("Timestamp: {} {}", literal, "(unparsable)".yellow()),
                None => println!("Timestamp: {}", "none".yellow()),
            }
        }
        Commands::PrintConfig => {
            println!("Settings: {:?}", engine.settings());
            println!("{}", serde_json::to_string_pretty(engine.entries())?);
        }
    }

    Ok(())
}

fn full_path(dir: &str, file: &FileRecord) -> String {
    std::path::Path::new(dir)
        .join(&file.name)
        .to_string_lossy()
        .into_owned()
}

fn print_plan(plan: &PathPlan) {
    println!("{}", plan.path.bold());
    for file in &plan.retained {
        println!("  {} {}", "keep   ".green(), file.name);
    }
    for file in &plan.deletable {
        println!("  {} {}", "delete ".red(), file.name);
    }
    for file in &plan.pending_action {
        println!("  {} {}", "pending".yellow(), file.name);
    }
    for file in &plan.not_covered {
        println!("  {} {}", "foreign".cyan(), file.name);
    }
}
