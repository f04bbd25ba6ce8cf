#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "skein: turn delimiter-separated edge lists into graphs",
    long_about = None
)]
struct Cli {
    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Pipeline",
        about = "Parse an input and preview its table",
        long_about = "Parse an edge list and report its header, row count, and first rows.",
        after_help = "EXAMPLES:\n    # Preview a local file\n    sk inspect edges.csv\n\n    # Preview a remote file, tab-separated\n    sk inspect https://example.test/edges.tsv -d $'\\t'\n\n    # Emit machine-readable output\n    sk inspect edges.csv --json"
    )]
    Inspect(cmd::inspect::InspectArgs),

    #[command(
        next_help_heading = "Pipeline",
        about = "Report feasible graph orientations",
        long_about = "Report whether the edge list can be represented as a directed and/or undirected graph.",
        after_help = "EXAMPLES:\n    # Classify using header names\n    sk classify edges.csv -s from -t to\n\n    # Classify using column indices\n    sk classify edges.csv -s 0 -t 1 --json"
    )]
    Classify(cmd::classify::ClassifyArgs),

    #[command(
        next_help_heading = "Pipeline",
        about = "Materialize an input as a graph",
        long_about = "Parse, classify, and build a graph, then report its node and edge counts.",
        after_help = "EXAMPLES:\n    # Import with automatic orientation\n    sk import edges.csv -s from -t to\n\n    # Force an undirected graph\n    sk import edges.csv -s from -t to --undirected\n\n    # Emit machine-readable output\n    sk import edges.csv -s from -t to --json"
    )]
    Import(cmd::import::ImportArgs),

    #[command(
        next_help_heading = "Pipeline",
        about = "Degree distribution for an input",
        long_about = "Import an edge list and report how many nodes have each degree.",
        after_help = "EXAMPLES:\n    # Out-degree distribution of a directed import\n    sk degrees edges.csv -s from -t to\n\n    # In-degrees plus the five best-connected nodes\n    sk degrees edges.csv -s from -t to --kind in --top 5"
    )]
    Degrees(cmd::degrees::DegreesArgs),

    #[command(
        next_help_heading = "Utility",
        about = "List the embedded sample edge lists",
        long_about = "List the sample edge lists compiled into the binary; use them with --sample NAME.",
        after_help = "EXAMPLES:\n    # List samples\n    sk samples\n\n    # Run the pipeline on one\n    sk degrees --sample star -s source -t target --undirected"
    )]
    Samples(cmd::samples::SamplesArgs),

    #[command(
        next_help_heading = "Utility",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    sk completions bash\n\n    # Generate zsh completions\n    sk completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SKEIN_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "skein_core=debug,skein_session=debug,skein_cli=debug,info"
        } else {
            "info"
        })
    });

    let format = env::var("SKEIN_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let output = cli.output_mode();

    match cli.command {
        Commands::Inspect(ref args) => cmd::inspect::run_inspect(args, output).await,
        Commands::Classify(ref args) => cmd::classify::run_classify(args, output).await,
        Commands::Import(ref args) => cmd::import::run_import(args, output).await,
        Commands::Degrees(ref args) => cmd::degrees::run_degrees(args, output).await,
        Commands::Samples(ref args) => cmd::samples::run_samples(args, output),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}
