use anyhow::Result;
use clap::Parser;

use reward_purge::commands;

/// Report known environment-configuration keys found in YAML files.
#[derive(Parser, Debug)]
#[command(
    name = "scan-configs",
    version,
    about = "Finds environment configuration entries in YAML files",
    long_about = None
)]
struct Cli {
    /// Root directory to scan. Defaults to the current directory.
    #[arg(default_value = ".")]
    root: String,

    /// Emit JSON instead of human-readable text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::scan_command(&cli.root, cli.json)
}
