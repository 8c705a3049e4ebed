pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::exit;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::{RootResolver, RootsConfig};
use commands::{GetCommand, ListCommand, RootCommand};

/// Output format options for the list command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One repository per line (default)
    Text,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// grove - keep repository clones under a predictable layout
#[derive(Parser)]
#[command(name = "grove")]
#[command(about = "Keep clones of remote repositories under <root>/<host>/<path>")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), " ", env!("BUILD_DATE"), ")"
))]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Root directory to use instead of GROVE_ROOT (repeatable)
    #[arg(long = "root", global = true, value_name = "DIR")]
    pub roots: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the repository roots
    Root {
        /// Print every root, not only the primary one
        #[arg(short, long)]
        all: bool,
    },

    /// List local repositories
    List {
        /// Only repositories matching this name or path fragment
        query: Option<String>,

        /// Print full paths instead of relative paths
        #[arg(short = 'p', long)]
        full_path: bool,

        /// Print the shortest unambiguous name of each repository
        #[arg(short, long, conflicts_with = "full_path")]
        unique: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Clone a remote repository, or update it when already present
    Get {
        /// Remote repository URL
        url: String,

        /// Update the local copy if it already exists
        #[arg(short, long)]
        update: bool,

        /// Request a shallow clone where the VCS supports it
        #[arg(long)]
        shallow: bool,

        /// VCS to use (git, svn, git-svn, hg, darcs, fossil, ...)
        #[arg(long)]
        vcs: Option<String>,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    /// Install the tracing subscriber; `RUST_LOG` overrides the default level
    pub fn init_logging(&self) {
        let default_level = if self.cli.verbose { "debug" } else { "warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    pub async fn run(self) -> anyhow::Result<()> {
        colored::control::set_override(!self.cli.no_color);

        match self.handle_command().await {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    fn root_resolver(&self) -> RootResolver {
        let mut config = RootsConfig::new();
        if !self.cli.roots.is_empty() {
            config = config.with_roots(self.cli.roots.clone());
        }
        RootResolver::new(config)
    }

    async fn handle_command(&self) -> anyhow::Result<()> {
        let resolver = self.root_resolver();

        match &self.cli.command {
            Commands::Root { all } => RootCommand::new(*all).execute(&resolver),
            Commands::List {
                query,
                full_path,
                unique,
                format,
            } => ListCommand::new(query.clone(), *full_path, *unique, *format).execute(&resolver),
            Commands::Get {
                url,
                update,
                shallow,
                vcs,
            } => {
                GetCommand::new(url.clone(), *update, *shallow, vcs.clone())
                    .execute(&resolver)
                    .await
            }
        }
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
