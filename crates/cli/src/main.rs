use clap::Parser;

use reward_purge::commands;

/// Strip `compute_rewards` function bodies across a Python source tree.
///
/// This binary is a thin wrapper around `purge-core` (exposed in code as
/// `purge_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
///
/// Every modified file keeps a `.backup` copy beside it holding the original
/// content; errored files are rolled back from that copy.
#[derive(Parser, Debug)]
#[command(
    name = "reward-purge",
    version,
    about = "Strips compute_rewards bodies down to signature and final return",
    long_about = None
)]
struct Cli {
    /// Root directory to scan. Defaults to the current directory.
    #[arg(default_value = ".")]
    root: String,
}

fn main() {
    let cli = Cli::parse();

    // Errors are reported on stdout; the exit status stays 0 either way.
    if let Err(err) = commands::purge_command(&cli.root) {
        println!("Error: {err:#}");
    }
}
