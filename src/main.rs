use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use lumi_reporter::report::json::read_results;
use lumi_reporter::reporter::stats::RunStats;
use lumi_reporter::{JsonFileSink, Reporter, ReporterOptions, RunnerEvent};

#[derive(Parser)]
#[command(name = "lumi-reporter")]
#[command(author = "NL Team")]
#[command(version = "0.1.0")]
#[command(about = "Aggregates test runner events into a JSON report", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded run and write the JSON report
    Replay {
        /// Path to a recorded run file ({ "stats": ..., "events": [...] })
        run: PathBuf,

        /// Output directory for the report
        #[arg(short = 'd', long)]
        results_dir: Option<PathBuf>,

        /// Report file name
        #[arg(short = 'f', long)]
        results_file: Option<String>,
    },

    /// Print a summary of a written report
    Summary {
        /// Path to a report JSON file
        report: PathBuf,
    },
}

/// A recorded run: the statistics collector snapshot plus the raw event
/// stream, as captured from the host runner.
#[derive(Deserialize)]
struct RecordedRun {
    #[serde(default)]
    stats: RunStats,
    events: Vec<RunnerEvent>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            run,
            results_dir,
            results_file,
        } => {
            println!(
                "{} Replaying run from: {}",
                "▶".green().bold(),
                run.display()
            );
            replay(&run, results_dir, results_file)?;
        }

        Commands::Summary { report } => {
            summary(&report)?;
        }
    }

    Ok(())
}

fn replay(
    run_path: &Path,
    results_dir: Option<PathBuf>,
    results_file: Option<String>,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(run_path)?;
    let run: RecordedRun = serde_json::from_str(&raw)?;

    let options = ReporterOptions {
        results_dir,
        results_file,
    };
    let report_path = options.report_path();
    let mut reporter = Reporter::new(options, Box::new(JsonFileSink));

    let mut saw_end = false;
    for event in run.events {
        saw_end |= matches!(event, RunnerEvent::End);
        reporter.handle(event, &run.stats)?;
    }

    // Recordings cut off before the terminal event still get a report
    if !saw_end {
        log::warn!("Recorded run has no terminal end event; finishing the run now");
        reporter.handle(RunnerEvent::End, &run.stats)?;
    }

    match reporter.persistence_failure() {
        Some(failure) => println!("{} {}", "⚠".yellow(), failure),
        None => println!(
            "{} Report saved to: {}",
            "✅".green(),
            report_path.display().to_string().cyan()
        ),
    }

    Ok(())
}

fn summary(report_path: &Path) -> anyhow::Result<()> {
    let results = read_results(report_path)?;

    let mut totals = (0u32, 0u32, 0u32);
    for runner in &results {
        let n = &runner.runner_tests_number;
        println!(
            "{} {} [{}] {}",
            "▶".green().bold(),
            runner.cid.cyan(),
            runner.capabilities.browser_name,
            runner.spec_file_path.join(", ").dimmed()
        );
        println!(
            "    {} passed, {} pending, {} failed ({} suites)",
            n.passing.to_string().green(),
            n.pending.to_string().yellow(),
            n.failing.to_string().red(),
            runner.suites.len()
        );
        totals.0 += n.passing;
        totals.1 += n.pending;
        totals.2 += n.failing;
    }

    println!("\n{} {} runners", "■".blue().bold(), results.len());
    println!(
        "  {} passed, {} pending, {} failed",
        totals.0.to_string().green(),
        totals.1.to_string().yellow(),
        totals.2.to_string().red()
    );

    Ok(())
}
