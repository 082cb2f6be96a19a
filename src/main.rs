//! Titanic survival analysis - main entry point

use clap::Parser;
use titanic_survival::cli::{cmd_analyze, cmd_info, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "titanic=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze {
            data,
            out_dir,
            test_size,
            seed,
            no_plots,
            report,
        }) => {
            cmd_analyze(&data, &out_dir, test_size, seed, no_plots, report.as_deref())?;
        }
        Some(Commands::Info { data }) => {
            cmd_info(&data)?;
        }
        None => {
            // Default: full analysis with defaults (matches the one-shot script)
            cmd_analyze(
                &"titanic.csv".into(),
                &"plots".into(),
                0.2,
                42,
                false,
                None,
            )?;
        }
    }

    Ok(())
}
