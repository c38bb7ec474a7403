//! itemforge CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::EXIT_ERROR;

#[derive(Parser)]
#[command(
    name = "itemforge",
    version,
    about = "Deterministic math item generator, grader and eval harness"
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an agent over a case file and write one result row per case
    Run {
        /// JSONL case file, or a directory of them
        #[arg(long)]
        cases: PathBuf,

        /// JSONL report path
        #[arg(long)]
        out: PathBuf,

        /// Agent name (see `list-agents`)
        #[arg(long)]
        agent: Option<String>,

        /// Accuracy required to exit 0, in [0, 1]
        #[arg(long)]
        min_accuracy: Option<f64>,

        /// Max cases in flight
        #[arg(long)]
        parallelism: Option<usize>,

        /// Also write the full JSON report (summary + rows) here
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Extra output: text, markdown, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate an item and print it as JSON
    Generate {
        #[arg(long)]
        skill: String,

        #[arg(long)]
        difficulty: String,

        #[arg(long, default_value = "0")]
        seed: u64,

        /// Number of items; seeds count up from --seed
        #[arg(long, default_value = "1")]
        count: usize,

        /// Draw curated entries without repeats until the pool is exhausted
        #[arg(long)]
        cycle: bool,
    },

    /// Grade a choice against a generated item
    Grade {
        #[arg(long)]
        skill: String,

        #[arg(long)]
        difficulty: String,

        #[arg(long, default_value = "0")]
        seed: u64,

        /// Choice id, A-D
        #[arg(long)]
        choice: String,
    },

    /// Check a case file and dry-run generation for every case
    Validate {
        /// JSONL case file, or a directory of them
        #[arg(long)]
        cases: PathBuf,
    },

    /// Compare two JSONL reports
    Compare {
        /// Baseline JSONL report
        #[arg(long)]
        baseline: PathBuf,

        /// Current JSONL report
        #[arg(long)]
        current: PathBuf,

        /// Exit code 1 if regressions or stem drift are found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List available agents
    ListAgents,

    /// List the skill catalog
    ListSkills,

    /// Create a starter config and example case file
    Init,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for target in [
        "itemforge",
        "itemforge_core",
        "itemforge_agents",
        "itemforge_report",
    ] {
        if let Ok(directive) = format!("{target}={level}").parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Run {
            cases,
            out,
            agent,
            min_accuracy,
            parallelism,
            summary,
            format,
            config,
        } => {
            commands::run::execute(commands::run::RunArgs {
                cases,
                out,
                agent,
                min_accuracy,
                parallelism,
                summary,
                format,
                config,
                verbose: cli.verbose,
            })
            .await
        }
        Commands::Generate {
            skill,
            difficulty,
            seed,
            count,
            cycle,
        } => commands::generate::execute(&skill, &difficulty, seed, count, cycle),
        Commands::Grade {
            skill,
            difficulty,
            seed,
            choice,
        } => commands::grade::execute(&skill, &difficulty, seed, &choice),
        Commands::Validate { cases } => commands::validate::execute(cases),
        Commands::Compare {
            baseline,
            current,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, fail_on_regression, format),
        Commands::ListAgents => commands::list_agents::execute(),
        Commands::ListSkills => commands::list_skills::execute(),
        Commands::Init => commands::init::execute(),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(EXIT_ERROR);
        }
    }
}
