//! Multi-Cloud Billing Simulator CLI
//!
//! A command-line tool for running billing simulations, inspecting the
//! daily cloud share of a project, and listing the built-in project
//! catalog.

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Days, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use mcsim_lib::catalog;
use mcsim_lib::models::MultiCloudProject;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Multi-Cloud Billing Simulator CLI
#[derive(Parser)]
#[command(name = "mcsim")]
#[command(author, version, about = "Simulate multi-cloud billing data", long_about = None)]
pub struct Cli {
    /// Path to a JSON project file (uses the built-in catalog if not set)
    #[arg(long, env = "MCSIM_PROJECT_FILE", global = true)]
    pub projects: Option<PathBuf>,

    /// Output format
    #[arg(long, short, global = true, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a full simulation and print the report bundle
    Simulate {
        /// Number of days to simulate
        #[arg(long, short)]
        days: Option<u32>,

        /// Total annual budget across all platforms, in USD
        #[arg(long)]
        annual_budget: Option<f64>,

        /// First simulated day (YYYY-MM-DD); defaults to `days` before today
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Upper bound on the number of projects processed
        #[arg(long)]
        max_projects: Option<usize>,

        /// Relative cost volatility applied by the generators
        #[arg(long)]
        volatility: Option<f64>,

        /// Seed for volatility and on-premises cost estimation
        #[arg(long)]
        seed: Option<u64>,

        /// Skip the cloud vs on-premises comparison report
        #[arg(long)]
        no_on_prem: bool,
    },

    /// Show the daily cloud share curve of one project
    Shares {
        /// Project name
        project: String,

        /// Number of days in the simulated timeline
        #[arg(long, short)]
        days: Option<u32>,

        /// Sampling step in days
        #[arg(long, default_value_t = 30)]
        step: u32,
    },

    /// List the configured projects and their workload patterns
    Patterns,
}

fn load_projects(path: Option<&PathBuf>) -> Result<Vec<MultiCloudProject>> {
    match path {
        Some(path) => catalog::load_projects(path),
        None => Ok(catalog::builtin_projects()),
    }
}

fn default_start_date(days: u32) -> NaiveDate {
    Utc::now().date_naive() - Days::new(u64::from(days))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let file_config = config::SimConfig::load()?;
    let projects = load_projects(cli.projects.as_ref())?;

    match cli.command {
        Commands::Simulate {
            days,
            annual_budget,
            start_date,
            max_projects,
            volatility,
            seed,
            no_on_prem,
        } => {
            let mut settings = file_config.settings();
            if let Some(days) = days {
                settings.days_to_generate = days;
            }
            if let Some(budget) = annual_budget {
                settings.annual_budget = budget;
            }
            if let Some(max) = max_projects {
                settings.max_projects = max;
            }
            if let Some(volatility) = volatility {
                settings.volatility_factor = volatility;
            }
            if let Some(seed) = seed {
                settings.seed = seed;
            }
            if no_on_prem {
                settings.on_prem_cost_simulation = false;
            }
            settings.start_date =
                start_date.unwrap_or_else(|| default_start_date(settings.days_to_generate));

            commands::simulate::run(projects, settings, cli.format).await?;
        }
        Commands::Shares {
            project,
            days,
            step,
        } => {
            let days = days.unwrap_or(file_config.days_to_generate);
            commands::shares::show_shares(&projects, &project, days, step, cli.format)?;
        }
        Commands::Patterns => {
            commands::patterns::list_patterns(&projects, cli.format)?;
        }
    }

    Ok(())
}
