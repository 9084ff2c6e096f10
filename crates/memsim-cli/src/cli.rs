use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "memsim",
    about = "memsim: addressable-memory simulator with pointer chasing",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub space: SpaceArgs,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// How the address space is seeded before any command runs.
#[derive(Args)]
pub struct SpaceArgs {
    /// Number of seeded addresses
    #[arg(long, global = true, default_value = "16")]
    pub size: usize,
    /// Value stored at every seeded address
    #[arg(long = "default", global = true, default_value = "0")]
    pub default_value: String,
    /// TOML file with address_width / max_hops
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Override the chase hop limit
    #[arg(long, global = true)]
    pub max_hops: Option<usize>,
    /// Run against a shared handle instead of an owned table
    #[arg(long, global = true)]
    pub shared: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print every address and value
    List,
    /// Run operations from a script file
    Run(RunArgs),
    /// Read operations from stdin, one per line
    Repl,
    /// Run a single operation, e.g. `exec write 0x0001 5`
    Exec(ExecArgs),
    /// Show where a chase from ADDRESS would land
    Resolve(ResolveArgs),
}

#[derive(Args)]
pub struct RunArgs {
    pub script: PathBuf,
    /// Print the table after the script finishes
    #[arg(long)]
    pub list: bool,
}

#[derive(Args)]
pub struct ExecArgs {
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub op: Vec<String>,
}

#[derive(Args)]
pub struct ResolveArgs {
    pub address: String,
    /// Script to run before resolving
    #[arg(long)]
    pub script: Option<PathBuf>,
}
