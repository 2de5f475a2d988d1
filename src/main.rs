use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, error, trace};
use transform_kit::pipeline::{self, PipelineInput};

/// Run map, filter and reduce pipelines over JSON data
#[derive(Parser)]
#[command(name = "transform-kit")]
#[command(about = "Run map, filter and reduce pipelines over JSON data", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a pipeline over a JSON array or object
    Run {
        /// Pipeline definition (.toml or .json)
        #[arg(short, long)]
        pipeline: PathBuf,

        /// JSON input file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the result on a single line
        #[arg(long)]
        compact: bool,
    },
    /// Validate a pipeline definition without running it
    Check {
        /// Pipeline definition (.toml or .json)
        #[arg(short, long)]
        pipeline: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    // stdout carries the pipeline result, so diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("transform-kit started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let result = match cli.command {
        Commands::Run {
            pipeline,
            input,
            compact,
        } => run_pipeline(&pipeline, input.as_deref(), compact),
        Commands::Check { pipeline } => check_pipeline(&pipeline),
    };

    if let Err(e) = result {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn read_input(input: Option<&Path>) -> anyhow::Result<PipelineInput> {
    match input {
        Some(path) => pipeline::load_input(path)
            .with_context(|| format!("Failed to load input from {}", path.display())),
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read input from stdin")?;
            pipeline::parse_input(&content).context("Failed to parse input from stdin")
        }
    }
}

fn run_pipeline(path: &Path, input: Option<&Path>, compact: bool) -> anyhow::Result<()> {
    let definition = pipeline::load_pipeline(path)?;
    let data = read_input(input)?;

    let output = definition.run(data).with_context(|| {
        format!(
            "Pipeline '{}' failed",
            definition.name.as_deref().unwrap_or("unnamed")
        )
    })?;

    let json = output.to_json();
    let rendered = if compact {
        serde_json::to_string(&json)?
    } else {
        serde_json::to_string_pretty(&json)?
    };
    println!("{rendered}");
    Ok(())
}

fn check_pipeline(path: &Path) -> anyhow::Result<()> {
    let definition = pipeline::load_pipeline(path)?;
    definition.validate()?;

    let name = definition.name.as_deref().unwrap_or("unnamed");
    println!(
        "Pipeline '{}' is valid: {}",
        name,
        definition.summary().join(" -> ")
    );
    Ok(())
}
