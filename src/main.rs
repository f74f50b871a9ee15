use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use costwatch::config::{CostwatchPaths, Settings};
use costwatch::mail::OutboxMailer;
use costwatch::models::PeriodIndex;
use costwatch::pipeline::{build_report, render_email, run_report};
use costwatch::query::CsvCostSource;
use costwatch::render::render_summary_text;

#[derive(Parser)]
#[command(
    name = "costwatch",
    version,
    about = "Periodic cloud-cost ledger and HTML report generator",
    long_about = "costwatch builds a cross-period cost comparison report from \
                  raw per-entity cost observations: a summary ledger with \
                  percent-change annotations and an optional tagged-vs-overall \
                  breakdown by sub-category, delivered as an HTML document."
)]
struct Cli {
    /// Reference date for the reporting window (defaults to today)
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    as_of: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the report and deliver it to the outbox
    Run {
        /// CSV cost-data export to query
        #[arg(long, env = "COSTWATCH_DATA")]
        data: String,

        /// Outbox directory (defaults to the config outbox)
        #[arg(long, env = "COSTWATCH_OUTBOX")]
        outbox: Option<String>,
    },

    /// Build the report and print it without delivering
    Preview {
        /// CSV cost-data export to query
        #[arg(long, env = "COSTWATCH_DATA")]
        data: String,

        /// Write the HTML body to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Print the summary ledger as a terminal table instead of HTML
        #[arg(long)]
        text: bool,
    },

    /// Show the resolved configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = CostwatchPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let reference = cli
        .as_of
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let window = PeriodIndex::trailing(settings.granularity, settings.window_periods, reference);

    match cli.command {
        Commands::Run { data, outbox } => {
            let query = CsvCostSource::new(&data);
            let outbox_dir = outbox.map_or_else(|| paths.outbox_dir(), Into::into);
            let mailer = OutboxMailer::new(&outbox_dir);

            run_report(&settings, &window, &query, &mailer)
                .context("report run failed")?;
            println!("Report written to {}", outbox_dir.display());
        }
        Commands::Preview { data, output, text } => {
            let query = CsvCostSource::new(&data);
            let report = build_report(&settings, &window, &query)
                .context("report build failed")?;

            if text {
                println!("{}", render_summary_text(&report.summary, &settings));
            } else {
                let email = render_email(&report, &settings);
                match output {
                    Some(path) => {
                        std::fs::write(&path, &email.html_body)
                            .with_context(|| format!("cannot write {}", path))?;
                        println!("HTML report written to {}", path);
                    }
                    None => println!("{}", email.html_body),
                }
            }
        }
        Commands::Config => {
            println!("Config file: {}", paths.settings_file().display());
            println!("Outbox:      {}", paths.outbox_dir().display());
            println!(
                "Window:      {} trailing {:?} periods as of {}",
                settings.window_periods, settings.granularity, reference
            );
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
