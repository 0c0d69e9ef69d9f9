mod app;
mod config;
mod domain;
mod error;
mod infra;
mod platform;
mod ui;
mod usecase;


use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::app::{run, RunOptions, RunOutcome};
use crate::config::{default_base_dir, AppConfig};
use crate::error::WizardAbort;
use crate::ui::console::prompt::{ConsolePrompter, RULE};

#[derive(Parser, Debug)]
#[command(name = "defect_table")]
#[command(about = "Builds a Word table of defects from rows of an Excel sheet", long_about = None)]
struct Cli {
    /// Directory holding the data/ and output/ folders (defaults to the executable's folder)
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Workbook to use instead of choosing from data/
    #[arg(long)]
    file: Option<PathBuf>,

    /// Sheet to read instead of the first one
    #[arg(long)]
    sheet: Option<String>,

    /// Structures to include, e.g. "all", "1,3" or "2-4"
    #[arg(long)]
    groups: Option<String>,

    /// Rows to include, e.g. "all", "1,3,7" or "2-5"
    #[arg(long)]
    rows: Option<String>,

    /// Do not open the document after saving it
    #[arg(long)]
    no_open: bool,

    /// Log debug details
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn build_config(cli: &Cli) -> Result<AppConfig> {
    let base_dir = match &cli.base_dir {
        Some(dir) => dir.clone(),
        None => default_base_dir()?,
    };
    Ok(AppConfig::from_base_dir(base_dir, !cli.no_open))
}

const CANCELLED: &str = "Operation cancelled by user.";

/// Ctrl+C ends the session the same way closing stdin does.
fn install_interrupt_handler() {
    let installed = ctrlc::set_handler(|| {
        println!();
        println!("{CANCELLED}");
        std::process::exit(0);
    });
    if let Err(err) = installed {
        log::warn!("could not install the Ctrl+C handler: {err}");
    }
}

fn exit_status(result: &Result<RunOutcome>) -> u8 {
    match result {
        Ok(RunOutcome::Saved(_)) | Ok(RunOutcome::Ended(_)) => 0,
        Err(err) if err.is::<WizardAbort>() => {
            println!();
            println!("{CANCELLED}");
            0
        }
        Err(err) => {
            eprintln!("Critical error: {err:#}");
            1
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    install_interrupt_handler();

    println!("{RULE}");
    println!("WORD DOCUMENT GENERATOR FROM EXCEL");
    println!("{RULE}");

    let options = RunOptions {
        file: cli.file.clone(),
        sheet: cli.sheet.clone(),
        groups: cli.groups.clone(),
        rows: cli.rows.clone(),
    };
    let result = build_config(&cli).and_then(|config| {
        log::info!("working directory: {}", config.base_dir.display());
        let mut prompter = ConsolePrompter::new(io::stdin().lock(), io::stdout());
        run(&config, &options, &mut prompter)
    });

    ExitCode::from(exit_status(&result))
}
