//! Profile command implementation
//!
//! - `dubboctl profile list` prints the available profile names.
//! - `dubboctl profile show [NAME]` prints the configuration document that
//!   `manifest generate` would render from: the profile, overlaid by any
//!   `-f` files and `--set` flags.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

use dubboctl::phases::orchestrator::{generate_values, GenerateOptions};
use dubboctl::phases::profile::{DirProfileSource, ProfileSource};

/// Arguments for the profile command
#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[command(subcommand)]
    command: ProfileCommands,
}

#[derive(Subcommand, Debug)]
enum ProfileCommands {
    /// List available profiles
    List(ListArgs),
    /// Show the merged configuration for a profile
    Show(ShowArgs),
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Directory holding <profile>.yaml files
    #[arg(long, value_name = "PATH", env = "DUBBOCTL_PROFILES")]
    pub profiles: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct ShowArgs {
    /// Profile to show; overrides any profile named by files or flags
    pub name: Option<String>,

    /// Directory holding <profile>.yaml files
    #[arg(long, value_name = "PATH", env = "DUBBOCTL_PROFILES")]
    pub profiles: Option<PathBuf>,

    /// Configuration file; repeat to layer several, later files win
    #[arg(short = 'f', long = "filename", value_name = "PATH")]
    pub filenames: Vec<PathBuf>,

    /// Override a value, e.g. --set admin.replicas=3
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

/// Execute the profile command
pub fn execute(args: ProfileArgs) -> Result<()> {
    let mut stdout = io::stdout();
    match args.command {
        ProfileCommands::List(args) => list(args, &mut stdout),
        ProfileCommands::Show(args) => show(args, &mut stdout),
    }
}

fn list<W: Write>(args: ListArgs, out: &mut W) -> Result<()> {
    let root = GenerateOptions {
        profiles_path: args.profiles.unwrap_or_default(),
        ..Default::default()
    }
    .with_defaults()
    .profiles_path;
    let names = DirProfileSource::new(&root)
        .list()
        .with_context(|| format!("Failed to list profiles in {}", root.display()))?;

    for name in names {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}

fn show<W: Write>(args: ShowArgs, out: &mut W) -> Result<()> {
    let mut opts = GenerateOptions {
        files: args.filenames,
        profiles_path: args.profiles.unwrap_or_default(),
        set_flags: args.set,
        ..Default::default()
    }
    .with_defaults();
    if let Some(name) = args.name {
        opts.set_flags.push(format!("profile={}", name));
    }

    let source = DirProfileSource::new(&opts.profiles_path);
    let (_, document) = generate_values(&opts, &source).context("Failed to resolve profile")?;

    out.write_all(serde_yaml::to_string(&document)?.as_bytes())?;
    Ok(())
}
