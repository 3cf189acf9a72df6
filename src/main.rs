use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use trainctl::api::{HttpClient, JobsApi, Stage};
use trainctl::core::{display_text, short_id};
use trainctl::{config, logging, tui};

#[derive(Parser)]
#[command(name = "trainctl")]
#[command(about = "Terminal control panel for the training pipeline service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    overrides: ClientArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive dashboard (the default).
    Tui,
    /// Print the current job list once and exit.
    Jobs,
    /// Trigger a pipeline stage and exit.
    Trigger {
        #[arg(value_enum)]
        stage: Stage,
    },
}

#[derive(Args, Serialize)]
struct ClientArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    poll_interval_secs: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    verbose: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[arg(long)]
    log_json: Option<bool>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::AppConfig::new(Some(&cli.overrides))?;
    logging::init(logging::LogConfig {
        json: config.log_json,
        verbose: config.verbose,
    });

    let client = HttpClient::new(&config.base_url);

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let poll_interval = Duration::from_secs(config.poll_interval_secs.max(1));
            tui::run(client, poll_interval)
                .await
                .context("Failed to run dashboard")?
        }
        Commands::Jobs => print_jobs(&client).await.context("Failed to list jobs")?,
        Commands::Trigger { stage } => {
            let ack = client
                .trigger(stage)
                .await
                .with_context(|| format!("Failed to trigger {}", stage.label()))?;
            println!("{}: job {} {}", stage.label(), ack.job_id, ack.status);
        }
    }

    Ok(())
}

async fn print_jobs(client: &HttpClient) -> Result<()> {
    let jobs = client.list_jobs().await?;

    if jobs.is_empty() {
        println!("No jobs found.");
        return Ok(());
    }

    println!("{:<20}  {:<12}  {:<10}  EXIT", "NAME", "ID", "STATUS");
    // Most recent first, matching the dashboard.
    for job in jobs.iter().rev() {
        let exit = job
            .return_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<20}  {:<12}  {:<10}  {}",
            job.name,
            short_id(&job.id),
            display_text(&job.status),
            exit
        );
    }

    Ok(())
}
