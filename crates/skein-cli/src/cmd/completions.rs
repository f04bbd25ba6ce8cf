//! `sk completions` — emit completion scripts for supported shells.

use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

/// Arguments for `sk completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate a completion script for.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute `sk completions`, writing the script to stdout.
pub fn run_completions(shell: Shell, command: &mut clap::Command) -> Result<()> {
    write_completions(shell, command, &mut std::io::stdout());
    Ok(())
}

fn write_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn std::io::Write) {
    generate(shell, command, "sk", out);
}
