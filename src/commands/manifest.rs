//! Manifest command implementation
//!
//! `dubboctl manifest generate` runs the full pipeline:
//! 1. Load the user's configuration files and pick the profile
//! 2. Overlay the files on the profile and apply `--set` flags
//! 3. Decode the result and render every enabled component
//! 4. Print the manifests, or write one file per component with `--output`
//!
//! Only dry rendering is supported; nothing is applied to a cluster.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

use dubboctl::phases::orchestrator::{execute_generate, GenerateOptions, GenerateOutput};

/// Arguments for the manifest command
#[derive(Args, Debug)]
pub struct ManifestArgs {
    #[command(subcommand)]
    command: ManifestCommands,
}

#[derive(Subcommand, Debug)]
enum ManifestCommands {
    /// Generate control plane manifests to apply
    Generate(GenerateArgs),
}

/// Arguments for `manifest generate`
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Configuration file; repeat to layer several, later files win
    #[arg(short = 'f', long = "filename", value_name = "PATH")]
    pub filenames: Vec<PathBuf>,

    /// Directory holding one chart per component
    #[arg(long, value_name = "PATH", env = "DUBBOCTL_CHARTS")]
    pub charts: Option<PathBuf>,

    /// Directory holding <profile>.yaml files
    #[arg(long, value_name = "PATH", env = "DUBBOCTL_PROFILES")]
    pub profiles: Option<PathBuf>,

    /// Write one <component>.yaml per component here instead of printing
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Override a value, e.g. --set admin.replicas=3; applied last, in order
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

impl From<GenerateArgs> for GenerateOptions {
    fn from(args: GenerateArgs) -> Self {
        GenerateOptions {
            files: args.filenames,
            charts_path: args.charts.unwrap_or_default(),
            profiles_path: args.profiles.unwrap_or_default(),
            output: args.output,
            set_flags: args.set,
        }
        .with_defaults()
    }
}

/// Execute the manifest command
pub fn execute(args: ManifestArgs) -> Result<()> {
    match args.command {
        ManifestCommands::Generate(args) => generate(args, &mut io::stdout()),
    }
}

fn generate<W: Write>(args: GenerateArgs, out: &mut W) -> Result<()> {
    let opts = GenerateOptions::from(args);

    match execute_generate(&opts).context("Failed to generate manifests")? {
        GenerateOutput::Printed(stream) => out.write_all(stream.as_bytes())?,
        GenerateOutput::Written(paths) => {
            if let Some(dir) = &opts.output {
                writeln!(out, "Wrote {} manifest(s) to {}", paths.len(), dir.display())?;
            }
        }
    }
    Ok(())
}
