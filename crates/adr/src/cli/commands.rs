//! # CLI Layer
//!
//! The only place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the log subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! Flow: parse arguments, set up logging, open the records directory (not
//! needed by `init` and `completions`), call the API and print the rendered
//! result.

use super::render;
use super::setup::{build_command, Cli, Commands, CompletionShell};
use adrapp::api::{init_project, AdrApi};
use adrapp::commands::{CmdResult, NewRecord, RecordUpdate};
use adrapp::filter::RecordFilter;
use adrapp::init::initialize;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().context("cannot read the current directory")?;

    match cli.command {
        Commands::Completions { shell } => print_completions(shell),
        Commands::Init { directory } => {
            let result = init_project(&cwd, &directory)?;
            print_result(&result);
        }
        Commands::New {
            author,
            status,
            tags,
            title,
        } => {
            let new = NewRecord {
                author,
                status: status.map(Into::into),
                tags,
                superseders: Vec::new(),
            };
            let result = open_api(&cwd, cli.dir)?.create_record(&title.join(" "), new)?;
            print_result(&result);
        }
        Commands::List {
            authors,
            statuses,
            tags,
            json,
        } => {
            let filter = RecordFilter {
                authors,
                statuses: statuses.into_iter().map(Into::into).collect(),
                tags,
            };
            let result = open_api(&cwd, cli.dir)?.list_records(&filter)?;
            if json {
                print!("{}", render::render_json(&result.listed_records)?);
            } else {
                print!("{}", render::render_record_table(&result.listed_records));
            }
        }
        Commands::Update {
            id,
            author,
            status,
            tags,
            add_tags,
            remove_tags,
            superseders,
            add_superseders,
            remove_superseders,
        } => {
            let update = RecordUpdate {
                author,
                status: status.map(Into::into),
                tags,
                add_tags,
                remove_tags,
                superseders,
                add_superseders,
                remove_superseders,
            };
            let result = open_api(&cwd, cli.dir)?.update_record(&id, &update)?;
            print_result(&result);
        }
    }
    Ok(())
}

fn open_api(cwd: &Path, dir_override: Option<PathBuf>) -> Result<AdrApi> {
    let ctx = initialize(cwd, dir_override)?;
    tracing::debug!(dir = %ctx.records_dir.display(), "using records directory");
    Ok(ctx.api)
}

/// `RUST_LOG` picks the filter, `-v` forces debug, otherwise warnings only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}

fn print_result(result: &CmdResult) {
    print!("{}", render::render_messages(&result.messages));
}

fn print_completions(shell: CompletionShell) {
    let mut cmd = build_command();
    clap_complete::generate(
        clap_complete::Shell::from(shell),
        &mut cmd,
        "adr",
        &mut io::stdout(),
    );
}
