use clap::{Parser, Subcommand};

mod commands;
mod errors;
mod report;

use commands::apply_cmd::{self, ApplyArgs};
use commands::defaults_cmd;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// PolicyRoller CLI: Apply a policy baseline to many GitLab projects
#[derive(Parser)]
#[command(name = "policy-roller")]
#[command(about = "Apply a policy baseline to many GitLab projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the policy to the selected projects
    #[command()]
    Apply(ApplyArgs),

    /// Print the default policy as a TOML document
    Defaults,

    /// Show the CLI version
    Version,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().pretty())
        .with(EnvFilter::from_env("POLICY_ROLLER_LOG"))
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Apply(args) => {
            if let Err(e) = apply_cmd::execute(args).await {
                eprintln!("Error: {e}");
                std::process::exit(e.exit_code());
            }
        }
        Commands::Defaults => {
            if let Err(e) = defaults_cmd::execute() {
                eprintln!("Error: {e}");
                std::process::exit(e.exit_code());
            }
        }
        Commands::Version => {
            // Print version info from baked-in value
            println!(
                "policy-roller version {}",
                option_env!("POLICY_ROLLER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
            std::process::exit(0);
        }
    }
}
