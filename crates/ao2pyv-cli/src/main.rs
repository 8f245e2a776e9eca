//! ao2pyv CLI
//!
//! Converts archive.org video searches into pyvideo.org API submissions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use ao2pyv_core::inputs::Input;
use ao2pyv_core::outputs::Output;
use ao2pyv_core::transforms::Transform;
use ao2pyv_core::{Config, Pipeline, Registry, RunRequest, Selection, State, Strategies};
use clap::builder::{PossibleValue, PossibleValuesParser};
use clap::{Arg, Command, CommandFactory, FromArgMatches, Parser};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Convert archive.org video searches into pyvideo.org API submissions
#[derive(Parser)]
#[command(name = "ao2pyv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// pyvideo.org category assigned to every video
    category: String,

    /// Search query or input file, depending on the input strategy
    source: String,

    /// Output file, depending on the output strategy
    destination: String,

    /// Where videos are read from
    #[arg(long, value_name = "NAME")]
    input: Option<String>,

    /// How each video is converted
    #[arg(long, value_name = "NAME")]
    transform: Option<String>,

    /// Where converted videos are written
    #[arg(long, value_name = "NAME")]
    output: Option<String>,

    /// Submit videos as drafts (default)
    #[arg(long, conflicts_with = "live")]
    draft: bool,

    /// Submit videos as live
    #[arg(long)]
    live: bool,

    /// Configuration file overriding the archive.org endpoints
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn state(&self) -> State {
        // clap rejects --draft together with --live
        match (self.draft, self.live) {
            (false, true) => State::Live,
            _ => State::Draft,
        }
    }
}

/// Restrict a strategy option to the names in `registry`
fn with_choices<S: ?Sized>(
    arg: Arg,
    registry: &Registry<S>,
    default: &str,
    describe: impl Fn(&S) -> &'static str,
) -> Arg {
    let values: Vec<PossibleValue> = registry
        .iter()
        .map(|(name, strategy)| PossibleValue::new(name.to_string()).help(describe(strategy)))
        .collect();
    arg.value_parser(PossibleValuesParser::new(values))
        .default_value(default.to_string())
}

/// Build the argument parser with strategy choices taken from `catalog`
fn command(catalog: &Strategies) -> Result<Command> {
    let input_default = catalog.inputs.default_name()?;
    let transform_default = catalog.transforms.default_name()?;
    let output_default = catalog.outputs.default_name()?;

    Ok(Cli::command()
        .mut_arg("input", |arg| {
            with_choices(arg, &catalog.inputs, input_default, |s| s.describe())
        })
        .mut_arg("transform", |arg| {
            with_choices(arg, &catalog.transforms, transform_default, |s| {
                s.describe()
            })
        })
        .mut_arg("output", |arg| {
            with_choices(arg, &catalog.outputs, output_default, |s| s.describe())
        }))
}

fn main() -> Result<()> {
    // Strategy names and defaults do not depend on configuration
    let catalog =
        Strategies::builtin(&Config::default()).context("Failed to register strategies")?;
    let matches = command(&catalog)?.get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());

    // Initialize logging; stdout is reserved for console output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config =
        Config::load_optional(cli.config.as_deref()).context("Failed to load configuration")?;
    let strategies = Strategies::builtin(&config).context("Failed to register strategies")?;

    let state = cli.state();
    let selection = Selection {
        input: cli.input,
        transform: cli.transform,
        output: cli.output,
    };
    let pipeline = Pipeline::resolve(&strategies, &selection)?;
    let (input, transform, output) = pipeline.names();
    tracing::info!(input, transform, output, %state, "converting videos");

    let request = RunRequest {
        category: cli.category,
        source: cli.source,
        destination: cli.destination,
        state,
    };
    let summary = pipeline
        .run(&request)
        .with_context(|| format!("Failed to convert videos from '{}'", request.source))?;

    tracing::info!(
        fetched = summary.fetched,
        written = summary.written,
        "conversion complete"
    );
    Ok(())
}
