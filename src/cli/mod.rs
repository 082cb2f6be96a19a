//! Command-line interface
//!
//! `titanic analyze` runs the full pipeline; `titanic info` only prints the
//! head and column summary. With no subcommand, `analyze` runs with
//! defaults, matching the original one-shot script.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::time::Instant;

use crate::analysis::{self, AnalysisConfig};
use crate::data;

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}
fn muted(s: &str) -> ColoredString {
    s.truecolor(140, 140, 140)
}
fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}
fn accent(s: &str) -> ColoredString {
    s.truecolor(120, 170, 255)
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "titanic")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Titanic survival analysis: EDA + logistic regression")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full analysis: clean, encode, train, evaluate, plot
    Analyze {
        /// Input CSV file with Titanic-schema columns
        #[arg(short, long, default_value = "titanic.csv")]
        data: PathBuf,

        /// Directory for the rendered PNG charts
        #[arg(short, long, default_value = "plots")]
        out_dir: PathBuf,

        /// Held-out test fraction
        #[arg(long, default_value = "0.2")]
        test_size: f64,

        /// Random seed for the train/test shuffle
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Skip chart rendering
        #[arg(long)]
        no_plots: bool,

        /// Write the evaluation report as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Show dataset head and per-column summary
    Info {
        /// Input CSV file
        #[arg(short, long)]
        data: PathBuf,
    },
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_analyze(
    data_path: &PathBuf,
    out_dir: &PathBuf,
    test_size: f64,
    seed: u64,
    no_plots: bool,
    report_path: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    section("Explore");

    step_run("Loading data");
    let start = Instant::now();
    let df = data::load_csv(data_path)?;
    step_done(&format!(
        "{} rows × {} cols in {:?}",
        df.height(),
        df.width(),
        start.elapsed()
    ));

    println!();
    println!("{}", df.head(Some(5)));
    print_info_table(&df);

    let config = AnalysisConfig {
        data_path: data_path.clone(),
        out_dir: out_dir.clone(),
        test_size,
        seed,
        render_plots: !no_plots,
    };

    section("Train & Evaluate");
    step_run("Running pipeline");
    let start = Instant::now();
    let outcome = analysis::analyze_frame(&df, &config)?;
    step_done(&format!("{:?}", start.elapsed()));

    let report = &outcome.report;
    println!();
    println!(
        "  {:<16} {}",
        muted("Rows kept"),
        format!("{} / {}", report.n_rows_after_drop, report.n_rows).white()
    );
    println!(
        "  {:<16} {}",
        muted("Split"),
        format!("{} train / {} test", report.n_train, report.n_test).white()
    );
    println!(
        "  {:<16} {}",
        muted("Accuracy"),
        format!("{:.4}", report.accuracy).white().bold()
    );
    println!(
        "  {:<16} {}",
        muted("AUC"),
        format!("{:.4}", report.auc).white().bold()
    );
    println!();
    println!("  {}", muted("Confusion matrix"));
    for line in outcome.confusion.to_string().lines() {
        println!("  {}", line);
    }

    if !no_plots {
        section("Plots");
        for name in ["distributions.png", "confusion_matrix.png", "roc_curve.png"] {
            println!("  {} {}", ok("✓"), out_dir.join(name).display());
        }
    }

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(path, json)?;
        println!();
        println!("  {} report → {}", ok("✓"), path.display());
    }

    println!();
    Ok(())
}

pub fn cmd_info(data_path: &PathBuf) -> anyhow::Result<()> {
    section("Data Info");

    let df = data::load_csv(data_path)?;

    println!("  {:<12} {}", muted("File"), data_path.display());
    println!("  {:<12} {}", muted("Rows"), df.height());
    println!("  {:<12} {}", muted("Columns"), df.width());
    println!();
    println!("{}", df.head(Some(5)));

    print_info_table(&df);
    println!();
    Ok(())
}

fn print_info_table(df: &polars::prelude::DataFrame) {
    println!(
        "  {:<14} {:<12} {:>6} {:>8}",
        muted("Column"),
        muted("Type"),
        muted("Nulls"),
        muted("Unique")
    );
    println!("  {}", dim(&"─".repeat(44)));

    for info in data::dataset_info(df) {
        println!(
            "  {:<14} {:<12} {:>6} {:>8}",
            info.name,
            info.dtype.truecolor(140, 140, 140),
            info.null_count,
            info.unique_count
        );
    }
}
