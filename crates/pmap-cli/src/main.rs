use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{Value, json};

use pmap_core::config::MapperConfig;
use pmap_core::report::render::{MISSING_REPORT_SUMMARY, SummaryView, render_summary};
use pmap_core::task::validate_task;

mod args;

use args::{Args, Command, OutputFormat};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let code = match args.command {
        Command::Map {
            input,
            out_dir,
            profiles_dir,
            format,
        } => map(&input, MapperConfig::new(profiles_dir, out_dir), format)?,
        Command::Summary { report, out } => {
            let text = summary(&report)?;
            match out {
                Some(path) => std::fs::write(&path, &text)
                    .with_context(|| format!("write {}", path.display()))?,
                None => print!("{text}"),
            }
            0
        }
        Command::ValidateTask { task } => validate(&task)?,
    };

    std::process::exit(code);
}

fn init_logging(args: &Args) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if args.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if args.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn map(input: &Path, config: MapperConfig, format: OutputFormat) -> Result<i32> {
    let outcome = pmap_core::run(input, &config)?;

    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&outcome.report)? + "\n",
        OutputFormat::Text => render_summary(&SummaryView::from(&outcome.report)),
    };
    print!("{output}");

    Ok(outcome.report.status.exit_code())
}

fn summary(report_path: &Path) -> Result<String> {
    if !report_path.exists() {
        return Ok(MISSING_REPORT_SUMMARY.to_string());
    }
    let raw = std::fs::read_to_string(report_path)
        .with_context(|| format!("read {}", report_path.display()))?;
    let view: SummaryView = serde_json::from_str(&raw)
        .with_context(|| format!("parse {}", report_path.display()))?;
    Ok(render_summary(&view))
}

fn validate(task_path: &Path) -> Result<i32> {
    let raw = std::fs::read_to_string(task_path)
        .with_context(|| format!("read {}", task_path.display()))?;
    let doc: Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("parse {}", task_path.display()))?;

    match validate_task(&doc) {
        Ok(normalized) => {
            println!("{}", serde_json::to_string_pretty(&normalized)?);
            Ok(0)
        }
        Err(err) => {
            let body = json!({ "error": err.to_string(), "details": err.errors });
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(1)
        }
    }
}
