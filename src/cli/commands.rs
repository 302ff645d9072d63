use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `rewoo` - plan once, execute tools, solve.
#[derive(Parser, Debug)]
#[command(name = "rewoo")]
#[command(version)]
#[command(about = "Plan-execute-solve agent runner (Reasoning WithOut Observation).", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.rewoo/config.toml, created on first use)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plan, execute and answer a task
    Run {
        /// The task to solve
        task: String,

        /// Execute recorded plan text instead of calling the planner
        #[arg(long)]
        plan_file: Option<PathBuf>,

        /// Print the full run result as JSON
        #[arg(long)]
        json: bool,

        /// Override engine.max_steps
        #[arg(long)]
        max_steps: Option<usize>,

        /// Override engine.run_timeout_secs
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Parse a plan file and print its steps without executing anything
    Parse {
        file: PathBuf,

        /// Override engine.max_steps
        #[arg(long)]
        max_steps: Option<usize>,

        /// Print the parsed plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the tool catalog given to the planner
    Tools,
}
