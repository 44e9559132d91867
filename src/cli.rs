use std::path::{Path, PathBuf};

use artist_reconciler::classifier::DEFAULT_THRESHOLD;
use artist_reconciler::clients::{SpotifyClient, errors::Result};
use artist_reconciler::reconciler::Reconciler;
use clap::{Parser, Subcommand};
use log::info;

#[derive(Parser)]
#[command(name = "artist-reconciler")]
#[command(version, about = "Flag spam artist entries in a CSV by matching them against Spotify", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up every `content` entry and write the annotated CSV
    Reconcile {
        /// CSV file with a `content` column
        #[arg(short, long, default_value = "malicious-artists.csv")]
        input: PathBuf,
        /// Where the annotated CSV is written
        #[arg(short, long, default_value = "updated-artists.csv")]
        output: PathBuf,
        /// Minimum similarity (0-100) for a row to be kept
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD, value_parser = clap::value_parser!(u8).range(0..=100))]
        threshold: u8,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Reconcile {
            input,
            output,
            threshold,
        } => {
            reconcile(input, output, *threshold).await?;
        }
    }
    Ok(())
}

async fn reconcile(input: &Path, output: &Path, threshold: u8) -> Result<()> {
    info!("Building config ...");
    let mut spotify = SpotifyClient::try_default()?;
    info!("Authorizing Spotify client ...");
    spotify.authorize_client().await?;

    let reconciler = Reconciler::new(spotify, threshold);
    reconciler.reconcile(input, output).await?;
    info!("Updated CSV saved to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["artist-reconciler", "reconcile"]).unwrap();
        let Commands::Reconcile {
            input,
            output,
            threshold,
        } = cli.command;
        assert_eq!(input, PathBuf::from("malicious-artists.csv"));
        assert_eq!(output, PathBuf::from("updated-artists.csv"));
        assert_eq!(threshold, 40);
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["artist-reconciler", "reconcile", "-t", "101"]).is_err());
    }
}
