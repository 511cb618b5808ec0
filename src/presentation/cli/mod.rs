pub mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;

use crate::application::services::RepositoryQueryService;
use crate::common::config::VcsConfig;
use crate::domain::value_objects::{HistoryQuery, VcsType};
use crate::infrastructure::vcs::VcsFactory;

use output::{format_branch, format_commit_details, format_commit_line, to_json};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("VCSVIEW_GIT_HASH"),
    "\nbuilt:  ",
    env!("VCSVIEW_BUILD_DATE"),
    "\ntarget: ",
    env!("VCSVIEW_BUILD_TARGET"),
);

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    Text,
    /// JSON output
    Json,
}

/// vcsview - Read-only queries over Git and Mercurial repositories
#[derive(Parser)]
#[command(name = "vcsview")]
#[command(about = "Read-only queries over Git and Mercurial repositories")]
#[command(version, long_version = LONG_VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (prints every command issued)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Repository directory (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<String>,

    /// Version control system (detected from .git/.hg when omitted)
    #[arg(long, global = true)]
    pub vcs: Option<VcsType>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Git executable
    #[arg(long, global = true, env = "VCSVIEW_GIT")]
    pub git_executable: Option<String>,

    /// Mercurial executable
    #[arg(long, global = true, env = "VCSVIEW_HG")]
    pub hg_executable: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the versions of the installed tools
    Version,

    /// Show working tree status
    Status,

    /// List local and remote branches
    Branches,

    /// Show a single commit
    Show {
        /// Commit hash, revision or reference
        commit: String,
    },

    /// Show commit history, newest first
    Log {
        /// Only commits touching this path
        #[arg(long)]
        path: Option<String>,

        /// Only commits on this branch
        #[arg(short, long)]
        branch: Option<String>,

        /// Number of commits to skip
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Maximum number of commits to show
        #[arg(short = 'n', long)]
        max_count: Option<usize>,
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

    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    pub async fn run(self) -> Result<()> {
        // Set up colored output
        colored::control::set_override(!self.cli.no_color);

        match self.handle_command().await {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    async fn handle_command(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Version => self.handle_version_command().await,
            Commands::Status => self.handle_status_command().await,
            Commands::Branches => self.handle_branches_command().await,
            Commands::Show { commit } => self.handle_show_command(commit).await,
            Commands::Log {
                path,
                branch,
                offset,
                max_count,
            } => {
                let mut query = HistoryQuery::new().with_offset(*offset);
                if let Some(path) = path {
                    query = query.with_path(path);
                }
                if let Some(branch) = branch {
                    query = query.with_branch(branch);
                }
                if let Some(limit) = max_count {
                    query = query.with_limit(*limit);
                }
                self.handle_log_command(&query).await
            }
        }
    }

    fn config(&self) -> VcsConfig {
        let mut config = VcsConfig::from_env();

        if let Some(git) = &self.cli.git_executable {
            config = config.with_git_executable(git);
        }
        if let Some(hg) = &self.cli.hg_executable {
            config = config.with_hg_executable(hg);
        }
        if self.cli.verbose {
            config = config.with_debug_sink(Arc::new(|message: &str| {
                eprintln!("{} {}", "::".blue().bold(), message);
            }));
        }

        config
    }

    fn directory(&self) -> Result<PathBuf> {
        match &self.cli.directory {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => std::env::current_dir().context("Failed to read current directory"),
        }
    }

    fn open_repository(&self) -> Result<RepositoryQueryService> {
        let config = self.config();
        let directory = self.directory()?;

        let backend = match self.cli.vcs {
            Some(vcs_type) => VcsFactory::create(vcs_type, &config),
            None => VcsFactory::for_path(&directory, &config)?,
        };

        Ok(RepositoryQueryService::open(&directory, backend)?)
    }

    async fn handle_version_command(&self) -> Result<()> {
        let config = self.config();
        let mut versions = VcsFactory::versions(&config).await;
        if let Some(only) = self.cli.vcs {
            versions.retain(|(vcs_type, _)| *vcs_type == only);
        }

        if self.cli.format == OutputFormat::Json {
            let report: serde_json::Map<String, serde_json::Value> = versions
                .iter()
                .map(|(vcs_type, version)| {
                    let value = match version {
                        Ok(v) => serde_json::Value::String(v.clone()),
                        Err(_) => serde_json::Value::Null,
                    };
                    (vcs_type.to_string(), value)
                })
                .collect();
            println!("{}", to_json(&report)?);
            return Ok(());
        }

        println!("vcsview {}", env!("CARGO_PKG_VERSION"));
        for (vcs_type, version) in versions {
            match version {
                Ok(version) => println!(
                    "  {} {} {}",
                    "✓".green().bold(),
                    vcs_type.display_name(),
                    version
                ),
                Err(e) => {
                    println!("  {} {} unavailable", "✗".red().bold(), vcs_type.display_name());
                    if self.cli.verbose {
                        println!("    {}", e.to_string().dimmed());
                    }
                }
            }
        }
        Ok(())
    }

    async fn handle_status_command(&self) -> Result<()> {
        let service = self.open_repository()?;
        let status = service.status().await?;

        if self.cli.format == OutputFormat::Json {
            let report = serde_json::json!({
                "vcs": service.location().vcs_type,
                "path": service.location().project_path,
                "clean": status.trim().is_empty(),
                "status": status,
            });
            println!("{}", to_json(&report)?);
        } else if status.trim().is_empty() {
            println!("{} Working tree clean", "✓".green().bold());
        } else {
            print!("{}", status);
        }
        Ok(())
    }

    async fn handle_branches_command(&self) -> Result<()> {
        let service = self.open_repository()?;

        if self.cli.format == OutputFormat::Json {
            let branches = service.branches().await.into_result()?;
            println!("{}", to_json(&branches)?);
            return Ok(());
        }

        service
            .visit_branches(|branch| println!("{}", format_branch(&branch)))
            .await?;
        Ok(())
    }

    async fn handle_show_command(&self, commit_id: &str) -> Result<()> {
        let service = self.open_repository()?;
        let commit = service
            .commit(commit_id)
            .await
            .with_context(|| format!("Failed to read commit {}", commit_id))?
            .with_context(|| format!("Commit {} not found", commit_id))?;

        match self.cli.format {
            OutputFormat::Json => println!("{}", to_json(&commit)?),
            OutputFormat::Text => println!("{}", format_commit_details(&commit)),
        }
        Ok(())
    }

    async fn handle_log_command(&self, query: &HistoryQuery) -> Result<()> {
        let service = self.open_repository()?;

        if self.cli.format == OutputFormat::Json {
            let outcome = service.history(query).await;
            println!("{}", to_json(&outcome.records)?);
            if let Some(error) = outcome.error {
                return Err(error).context("History is incomplete");
            }
            return Ok(());
        }

        service
            .visit_history(query, |commit| println!("{}", format_commit_line(&commit)))
            .await
            .context("History is incomplete")?;
        Ok(())
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}
