use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::ArgAction;
use demarkup::{Config, Pipeline, storage};
use tracing::instrument;

mod terminal;

use terminal::Colorize;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to the input file containing markup
    input_file: PathBuf,

    /// Path to the output file for plain text
    output_file: PathBuf,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<ExitCode> {
        Self::setup_logging(self.verbose);

        let config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => Config::default(),
        };

        Ok(self.convert(&config))
    }

    #[instrument(level = "debug", skip(self, config))]
    fn convert(&self, config: &Config) -> ExitCode {
        let pipeline = Pipeline::new(config);
        let outcome = storage::convert(&self.input_file, &self.output_file, &pipeline);

        match &outcome {
            Ok(()) => println!("{}", self.message(&outcome).success()),
            Err(e) => {
                tracing::debug!(error = ?e, "conversion failed");
                println!("{}", self.message(&outcome).error());
            }
        }

        if fails(&outcome, config) {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }

    /// The status line reported for a conversion outcome.
    fn message(&self, outcome: &Result<(), storage::Error>) -> String {
        match outcome {
            Ok(()) => format!(
                "Markup removed. Plain text written to {}",
                self.output_file.display()
            ),
            Err(e) => format!("Error: {e}"),
        }
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Failures exit successfully unless the configuration asks otherwise.
const fn fails(outcome: &Result<(), storage::Error>, config: &Config) -> bool {
    outcome.is_err() && config.fail_on_error
}
