use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use codetally::combined::AnalyticsService;
use codetally::config::Config;
use codetally::error::AnalyticsError;
use codetally::output::envelope::{ApiFailure, ApiSuccess};
use codetally::output::terminal;

/// codetally: one report for your LeetCode and Codeforces activity.
///
/// Fetches both profiles, merges activity calendars and topic counts, and
/// prints a combined summary (or the JSON report with --json).
#[derive(Parser)]
#[command(name = "codetally", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the combined report for a LeetCode user and/or Codeforces handle
    Combined {
        /// LeetCode username
        #[arg(long)]
        leetcode: Option<String>,

        /// Codeforces handle
        #[arg(long)]
        codeforces: Option<String>,

        /// Print the JSON report instead of the terminal summary
        #[arg(long)]
        json: bool,
    },

    /// Show LeetCode analytics for one user
    Leetcode {
        username: String,

        #[arg(long)]
        json: bool,
    },

    /// Show Codeforces analytics for one handle
    Codeforces {
        handle: String,

        #[arg(long)]
        json: bool,
    },

    /// Serve the JSON API
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: 5000)
        #[arg(long, default_value = "5000")]
        port: u16,

        /// Address to bind (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("codetally=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let service = AnalyticsService::from_config(&config)?;

    let ok = match cli.command {
        Commands::Combined {
            leetcode,
            codeforces,
            json,
        } => {
            let spinner = spinner("Fetching LeetCode and Codeforces analytics...");
            let result = service
                .combine(leetcode.as_deref(), codeforces.as_deref())
                .await;
            spinner.finish_and_clear();
            report_result(result, json, terminal::display_report)
        }

        Commands::Leetcode { username, json } => {
            let spinner = spinner("Fetching LeetCode analytics...");
            let result = service.leetcode(&username).await;
            spinner.finish_and_clear();
            report_result(result, json, terminal::display_platform)
        }

        Commands::Codeforces { handle, json } => {
            let spinner = spinner("Fetching Codeforces analytics...");
            let result = service.codeforces(&handle).await;
            spinner.finish_and_clear();
            report_result(result, json, terminal::display_platform)
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            tracing::info!(port = port, bind = bind.as_str(), "Starting web server");
            codetally::web::run_server(service, port, &bind).await?;
            true
        }
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Print a result either as `{success, data|message}` JSON or through the
/// terminal renderer. Returns whether the result was a success.
fn report_result<T: Serialize>(
    result: Result<T, AnalyticsError>,
    json: bool,
    display: fn(&T),
) -> bool {
    match (result, json) {
        (Ok(data), true) => {
            print_json(&ApiSuccess::new(data));
            true
        }
        (Ok(data), false) => {
            display(&data);
            true
        }
        (Err(e), true) => {
            print_json(&ApiFailure::new(e.to_string()));
            false
        }
        (Err(e), false) => {
            eprintln!("{} {e}", "Error:".red().bold());
            if let AnalyticsError::BothPlatformsFailed {
                leetcode,
                codeforces,
            } = &e
            {
                if let Some(reason) = leetcode {
                    eprintln!("  LeetCode: {}", reason.dimmed());
                }
                if let Some(reason) = codeforces {
                    eprintln!("  Codeforces: {}", reason.dimmed());
                }
            }
            false
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
