//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use deliver::config::{RunOptions, WorkspaceOptions};
use deliver::output::{self, ColorMode};

use crate::commands::{self, Globals};

/// Deliver - fetch git package dependencies and report version conflicts
#[derive(Parser, Debug)]
#[command(name = "deliver")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Print the commands but do not run them
    #[arg(short = 'n', long, global = true)]
    dry_run: bool,

    /// Print the commands while running them
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Where to create the deliver workspaces directory (defaults to the home directory)
    #[arg(long, global = true, value_name = "DIR", env = "DELIVER_ROOT")]
    root: Option<PathBuf>,

    /// Use a project-specific workspace instead of $GOPATH
    #[arg(long, global = true, env = "DELIVER_WORKSPACE")]
    deliver_workspace: bool,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the workspace path
    Path,

    /// Install all packages in packages.lock, or a single package
    Install(commands::install::InstallArgs),

    /// Update packages in packages.json to their latest revisions and save them to packages.lock
    Update(commands::update::UpdateArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        output::configure(ColorMode::from_flag(&self.color));

        let globals = Globals {
            run: RunOptions::new(self.dry_run, self.verbose),
            workspace: WorkspaceOptions {
                root: self.root,
                project_workspace: self.deliver_workspace,
            },
        };

        match self.command {
            Commands::Path => commands::path::execute(&globals),
            Commands::Install(args) => commands::install::execute(args, &globals),
            Commands::Update(args) => commands::update::execute(args, &globals),
        }
    }
}

/// Initialize `env_logger` at `level`, letting `RUST_LOG` override it.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
