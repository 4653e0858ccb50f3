use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "pmap",
    version,
    about = "Profile-driven intent mapper with deterministic guardrails"
)]
pub struct Args {
    /// Debug logging on stderr
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Errors only on stderr
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Map an intent document to a report and, when permitted, task.yaml
    Map {
        /// Path to the intent JSON document
        input: PathBuf,

        /// Directory receiving mapper_report.json, task.yaml and summary.md
        #[arg(long, default_value = "output")]
        out_dir: PathBuf,

        /// Directory holding <profile>.yaml policy documents
        #[arg(long, default_value = "profiles")]
        profiles_dir: PathBuf,

        /// What to print on stdout
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },

    /// Render the human summary of an existing mapper_report.json
    Summary {
        /// Path to mapper_report.json
        report: PathBuf,

        /// Write the summary to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Validate a task.yaml against the v1 contract
    ValidateTask {
        /// Path to task.yaml
        task: PathBuf,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
