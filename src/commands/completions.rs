//! # Completions Command Implementation
//!
//! Prints a shell completion script for `dubboctl`, generated by
//! `clap_complete` from the same clap definition the binary parses with.
//!
//! ```bash
//! dubboctl completions bash > ~/.local/share/bash-completion/completions/dubboctl
//! dubboctl completions zsh > ~/.zfunc/_dubboctl
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io::{self, Write};

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    write_completions(args.shell, &mut io::stdout())
}

fn write_completions<W: Write>(shell: Shell, out: &mut W) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
    Ok(())
}
