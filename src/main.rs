//! gitstats - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use gitstats::{Repo, RepoConfig};

/// Extract authors, commits and the project version from a git repository.
#[derive(Parser, Debug)]
#[command(name = "gitstats")]
#[command(about = "Extract authors, commits and the project version from git")]
#[command(version)]
struct Cli {
    /// Path to the git repository
    #[arg(short = 'p', long, default_value = ".")]
    path: PathBuf,

    /// First commit of the range (exclusive)
    #[arg(long)]
    first: Option<String>,

    /// Last commit of the range (inclusive, defaults to HEAD)
    #[arg(long)]
    last: Option<String>,

    /// Echo every git command to stderr
    #[arg(long)]
    trace_commands: bool,

    /// Print JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the resolved commit range
    Range,
    /// List authors in shortlog order
    Authors,
    /// List commits, oldest first
    Commits,
    /// Show the abbreviated identifier of the range's last commit
    Version,
    /// Authors and commits together
    History,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "gitstats=debug" } else { "gitstats=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RepoConfig {
        path: cli.path.clone(),
        first_commit_hash: cli.first.clone(),
        last_commit_hash: cli.last.clone(),
    };

    let mut repo = Repo::open(config);
    if cli.trace_commands {
        repo.add_command_observer(|command: &str, _: &str| {
            eprintln!("$ {}", command);
        });
    }

    match cli.command {
        Command::Range => {
            let range = repo.commit_range();
            print_output(cli.json, &range, || range.clone())?;
        }
        Command::Authors => {
            let authors = repo.authors().context("Failed to list authors")?;
            print_output(cli.json, &authors, || {
                authors
                    .iter()
                    .map(|a| a.to_string())
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Command::Commits => {
            let commits = repo.commits().context("Failed to list commits")?;
            print_output(cli.json, &commits, || {
                commits
                    .iter()
                    .map(|c| format!("{} {} {}", c.hash, c.date, c.author_email()))
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Command::Version => {
            let version = repo
                .project_version()
                .context("Failed to determine project version")?;
            print_output(cli.json, &version, || version.clone())?;
        }
        Command::History => {
            let history = repo.history().context("Failed to read history")?;
            print_output(cli.json, &history, || {
                history
                    .commits
                    .iter()
                    .map(|c| {
                        let author = c
                            .author(&history.authors)
                            .map(|a| a.to_string())
                            .unwrap_or_else(|| c.author_email().to_string());
                        format!("{} {} {}", c.hash, c.date, author)
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
    }

    Ok(())
}

/// Print `value` as JSON, or the plain rendering otherwise.
fn print_output<T, F>(json: bool, value: &T, plain: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce() -> String,
{
    if json {
        let rendered =
            serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{}", rendered);
    } else {
        let rendered = plain();
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
    }
    Ok(())
}
