//! Booster Audit - validation and Scryfall audit for the booster dataset
//!
//! `validate` checks every booster document and the index manifest;
//! `audit` cross-checks declared CN ranges against Scryfall booster data.

use booster_audit::audit::run_audit;
use booster_audit::reconcile::ReconcileConfig;
use booster_audit::report::Report;
use booster_audit::scryfall::ScryfallClient;
use booster_audit::validate::{check_scryfall_counts, check_source_urls, run_validation};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Booster data validation and Scryfall range audit
#[derive(Parser, Debug)]
#[command(name = "booster_audit")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate booster documents and reconcile the index manifest
    Validate {
        /// Directory containing the booster JSON files
        #[arg(long, default_value = "boosters")]
        boosters_dir: PathBuf,

        /// Path to the index manifest
        #[arg(long, default_value = "index.json")]
        index: PathBuf,

        /// Check that provenance source URLs are reachable
        #[arg(long)]
        check_urls: bool,

        /// Cross-check max CNs against Scryfall card counts
        #[arg(long)]
        check_scryfall: bool,

        /// Include informational findings in the report
        #[arg(short, long)]
        verbose: bool,
    },
    /// Audit declared CN ranges against Scryfall booster:true data
    Audit {
        /// Directory containing the booster JSON files
        #[arg(long, default_value = "boosters")]
        boosters_dir: PathBuf,

        /// Where to write the per-set issue records
        #[arg(long, default_value = "audit-results.json")]
        output: PathBuf,

        /// Include informational findings in the report
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut report = Report::new();

    let verbose = match args.command {
        Command::Validate {
            boosters_dir,
            index,
            check_urls,
            check_scryfall,
            verbose,
        } => {
            log::info!("Validating booster data...");
            if check_urls {
                log::info!("  --check-urls enabled");
            }
            if check_scryfall {
                log::info!("  --check-scryfall enabled");
            }

            run_validation(&boosters_dir, &index, &ReconcileConfig::default(), &mut report);

            if check_urls || check_scryfall {
                let client = ScryfallClient::new();
                if check_urls {
                    check_source_urls(&boosters_dir, &client, &mut report).await;
                }
                if check_scryfall {
                    check_scryfall_counts(&boosters_dir, &client, &mut report).await;
                }
            }
            verbose
        }
        Command::Audit {
            boosters_dir,
            output,
            verbose,
        } => {
            let client = ScryfallClient::new();
            if let Err(e) = run_audit(&boosters_dir, &client, &output, &mut report).await {
                log::error!("Audit failed: {}", e);
                std::process::exit(1);
            }
            verbose
        }
    };

    report.print(verbose);
    std::process::exit(report.exit_code());
}
