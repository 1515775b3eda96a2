//! launchtrack - SpaceX launches, rockets, and launchpads from your terminal
//!
//! Fetches records from the public SpaceX v4 API, caches them on disk, and
//! renders filtered listings, statistics, and JSON/CSV exports.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use launchtrack::cache::CacheStore;
use launchtrack::cli::{Cli, Command, OutputFormat};
use launchtrack::data::SpaceXClient;
use launchtrack::filter::LaunchFilter;
use launchtrack::output;
use launchtrack::repo::Repository;
use launchtrack::stats;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cache = CacheStore::with_dir(cli.cache_dir.clone());
    let repo = Repository::new(SpaceXClient::new(), cache);

    let rendered = match &cli.command {
        Command::Launches(args) => {
            let launches = repo
                .launches(cli.refresh)
                .await
                .context("failed to load launches")?;
            let mut launches = LaunchFilter::from(args).apply(launches);
            if let Some(limit) = args.limit {
                launches.truncate(limit);
            }
            match cli.format {
                OutputFormat::Table => output::launches_table(&launches).to_string(),
                OutputFormat::Json => output::to_json(&launches)?,
                OutputFormat::Csv => {
                    let mut buffer = Vec::new();
                    output::launches_csv(&launches, &mut buffer)?;
                    String::from_utf8(buffer).context("CSV output was not valid UTF-8")?
                }
            }
        }
        Command::Rockets => {
            let rockets = repo
                .rockets(cli.refresh)
                .await
                .context("failed to load rockets")?;
            match cli.format {
                OutputFormat::Table => output::rockets_table(&rockets).to_string(),
                OutputFormat::Json => output::to_json(&rockets)?,
                OutputFormat::Csv => {
                    let mut buffer = Vec::new();
                    output::rockets_csv(&rockets, &mut buffer)?;
                    String::from_utf8(buffer).context("CSV output was not valid UTF-8")?
                }
            }
        }
        Command::Launchpads => {
            let launchpads = repo
                .launchpads(cli.refresh)
                .await
                .context("failed to load launchpads")?;
            match cli.format {
                OutputFormat::Table => output::launchpads_table(&launchpads).to_string(),
                OutputFormat::Json => output::to_json(&launchpads)?,
                OutputFormat::Csv => {
                    let mut buffer = Vec::new();
                    output::launchpads_csv(&launchpads, &mut buffer)?;
                    String::from_utf8(buffer).context("CSV output was not valid UTF-8")?
                }
            }
        }
        Command::Stats => {
            let (launches, rockets, launchpads) = tokio::try_join!(
                repo.launches(cli.refresh),
                repo.rockets(cli.refresh),
                repo.launchpads(cli.refresh),
            )
            .context("failed to load statistics inputs")?;
            let report = stats::stats_report(&launches, &rockets, &launchpads);
            match cli.format {
                OutputFormat::Table => output::stats_tables(&report),
                OutputFormat::Json => output::to_json(&report)?,
                OutputFormat::Csv => bail!("CSV output is not supported for stats; use --format json"),
            }
        }
    };

    emit(cli.output.as_ref(), &rendered)
}

/// Writes the rendered output to the requested file, or stdout
fn emit(target: Option<&PathBuf>, rendered: &str) -> anyhow::Result<()> {
    match target {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{}", rendered.trim_end());
            Ok(())
        }
    }
}
