//! planvis CLI - Project Plan Visualiser
//!
//! Command-line interface for checking plan documents and rendering them to SVG.

mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use planvis_core::PlotableElement;
use planvis_input::load_plan;
use planvis_layout::{DateRange, PlanVisualiser, SwimlaneExtent};
use planvis_render::{SvgBackend, SLIDE_HEIGHT, SLIDE_WIDTH};

use report::{CliObserver, ExitCode, NoticeRecord};

#[derive(Parser)]
#[command(name = "planvis")]
#[command(author, version, about = "Project plan visualiser", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a plan, lay it out and summarise the result
    Check {
        /// Plan file (.toml or .json)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Reference date instead of the configured or current date
        #[arg(long, value_name = "YYYY-MM-DD")]
        today: Option<NaiveDate>,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Render a plan to SVG
    Render {
        /// Plan file (.toml or .json)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Reference date instead of the configured or current date
        #[arg(long, value_name = "YYYY-MM-DD")]
        today: Option<NaiveDate>,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    let exit = match cli.command {
        Commands::Check {
            file,
            format,
            today,
            strict,
        } => cmd_check(&file, format, today, strict)?,
        Commands::Render {
            file,
            output,
            today,
            strict,
        } => cmd_render(&file, &output, today, strict)?,
    };

    if exit != ExitCode::Success {
        std::process::exit(exit.code());
    }
    Ok(())
}

/// Load, resolve and prepare a plan for layout
fn prepare(file: &Path, today: Option<NaiveDate>, observer: &mut CliObserver) -> Result<PlanVisualiser> {
    let mut plan =
        load_plan(file, observer).with_context(|| format!("Failed to load {}", file.display()))?;
    if today.is_some() {
        plan.config.today = today;
    }
    plan.into_visualiser(observer)
        .with_context(|| format!("Failed to lay out {}", file.display()))
}

/// Machine-readable result of `check`
#[derive(Serialize)]
struct CheckReport<'a> {
    file: String,
    date_range: DateRange,
    swimlanes: Vec<&'a SwimlaneExtent>,
    elements: &'a [PlotableElement],
    notices: Vec<NoticeRecord>,
}

fn cmd_check(file: &Path, format: OutputFormat, today: Option<NaiveDate>, strict: bool) -> Result<ExitCode> {
    let mut observer = CliObserver::new();
    let visualiser = prepare(file, today, &mut observer)?;
    let elements = visualiser.layout().context("Layout failed")?;
    let range = visualiser.date_range()?;

    match format {
        OutputFormat::Json => {
            let report = CheckReport {
                file: file.display().to_string(),
                date_range: range,
                swimlanes: visualiser.swimlanes().iter().collect(),
                elements: &elements,
                notices: observer.records(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("Plan: {}", file.display());
            println!(
                "Date range: {} to {} ({} days)",
                range.min_start, range.max_end, range.num_days
            );
            println!("Swimlanes:");
            for extent in visualiser.swimlanes().iter() {
                println!(
                    "  {:<24} tracks {}-{}",
                    extent.name, extent.start_track, extent.end_track
                );
            }
            println!("Activities: {}", visualiser.activities().len());
            println!("Elements: {}", elements.len());
            println!(
                "Notices: {} ({} warnings)",
                observer.notices().len(),
                observer.warning_count()
            );
        }
    }

    Ok(ExitCode::from_warnings(observer.warning_count(), strict))
}

fn cmd_render(file: &Path, output: &Path, today: Option<NaiveDate>, strict: bool) -> Result<ExitCode> {
    let mut observer = CliObserver::new();
    let visualiser = prepare(file, today, &mut observer)?;

    let config = visualiser.driver().config();
    let mut backend = SvgBackend::new(
        SLIDE_WIDTH.max(config.right + config.left),
        SLIDE_HEIGHT.max(config.bottom + config.top / 2),
    );
    let handles = visualiser.render(&mut backend).context("Rendering failed")?;
    let svg = backend.finish()?;

    std::fs::write(output, svg).with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Rendered {} elements to {}", handles.len(), output.display());

    Ok(ExitCode::from_warnings(observer.warning_count(), strict))
}
