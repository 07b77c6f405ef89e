//! ctxprobe: context-passing experiments for the Claude Code CLI.
//!
//! ## Commands
//!
//! - `run`: execute the agent experiment against a target document
//! - `edit`: send a single edit request (the host-integration path)
//! - `agents`: list registered agents and their strategies

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};

use ctxprobe_agents::{agents_by_name, default_agents, Experiment, ExperimentConfig};
use ctxprobe_core::{edit_file, init_tracing, Model, Settings};

#[derive(Parser)]
#[command(name = "ctxprobe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Experiment harness for passing documents to the Claude Code CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Path to the claude binary (default: HOME-derived detection)
    #[arg(long, global = true, env = "CTXPROBE_CLAUDE_PATH")]
    claude_path: Option<String>,

    /// PATH value exported to spawned commands
    #[arg(long, global = true, env = "CTXPROBE_SEARCH_PATH")]
    search_path: Option<String>,

    /// Model tier: opus, sonnet, or haiku
    #[arg(long, global = true, default_value = "sonnet")]
    model: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the agent experiment against a target document
    Run {
        /// Target document the agents edit
        target: PathBuf,

        /// Agents to run in order (default: all, context strategies first)
        #[arg(long = "agent")]
        agents: Vec<String>,

        /// Seconds to wait between agents
        #[arg(long, default_value_t = 2)]
        agent_delay: u64,

        /// Seconds to wait between invocations of one agent
        #[arg(long, default_value_t = 2)]
        step_delay: u64,

        /// Write the JSON report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Send a single edit request for a file
    Edit {
        /// File to modify
        file: PathBuf,

        /// Edit instruction
        prompt: String,
    },

    /// List registered agents
    Agents,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    init_tracing(cli.json_logs, level);

    let model: Model = cli
        .model
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let mut settings = Settings::default().with_model(model);
    if let Some(path) = cli.claude_path {
        settings.claude_path = path;
    }
    if let Some(path) = cli.search_path {
        settings.search_path = path;
    }

    match cli.command {
        Commands::Run {
            target,
            agents,
            agent_delay,
            step_delay,
            report,
        } => {
            let selected = if agents.is_empty() {
                default_agents()
            } else {
                agents_by_name(&agents)?
            };
            let config = ExperimentConfig {
                agent_delay: Duration::from_secs(agent_delay),
                step_delay: Duration::from_secs(step_delay),
            };

            let result = Experiment::run(&settings, &target, selected, &config)
                .await
                .context("experiment aborted")?;

            println!("{}", result.render_markdown());

            if let Some(path) = report {
                let json = serde_json::to_string_pretty(&result)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("writing report to {}", path.display()))?;
                info!(path = %path.display(), "wrote JSON report");
            }
            if result.failed > 0 {
                warn!(failed = result.failed, "some agents failed");
            }
            Ok(())
        }

        Commands::Edit { file, prompt } => {
            let outcome = edit_file(&prompt, &file, &settings).await;
            if outcome.success {
                println!("Edit completed. Check {} for changes.", file.display());
                Ok(())
            } else {
                bail!(
                    "{}",
                    outcome.error.unwrap_or_else(|| "unknown error".to_string())
                );
            }
        }

        Commands::Agents => {
            for agent in default_agents() {
                println!(
                    "{:<18} {:<16} {}",
                    agent.name(),
                    format!("{:?}", agent.strategy()),
                    agent.description()
                );
            }
            Ok(())
        }
    }
}
