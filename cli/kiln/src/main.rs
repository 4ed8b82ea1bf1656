//! Kiln CLI — inspect the build targets a project is generated for.

mod commands;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use kiln_targets::{default_targets, Manifest, TargetTemplate};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kiln", version, about = "Build-target descriptors for project generation")]
struct Cli {
    /// Manifest to use instead of searching for kiln.toml
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a template kiln.toml in the current directory
    Init,
    /// Inspect templates and concrete targets
    Targets {
        #[command(subcommand)]
        action: TargetsAction,
    },
}

#[derive(Subcommand)]
enum TargetsAction {
    /// List templates before expansion
    Templates,
    /// Expand templates and list concrete targets
    List {
        /// Output format (text, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Show details of one concrete target
    Describe {
        /// Directory name of the target (e.g., ios_debug_fastbuild)
        name: String,
    },
    /// Validate the template set
    Validate,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init => commands::init::run(&cwd),

        Commands::Targets { action } => {
            let templates = load_templates(cli.manifest.as_deref(), &cwd)?;
            match action {
                TargetsAction::Templates => commands::targets::templates(&templates),
                TargetsAction::List { format } => {
                    commands::targets::list(&templates, format.as_deref())
                }
                TargetsAction::Describe { name } => {
                    commands::targets::describe(&templates, &name)
                }
                TargetsAction::Validate => commands::targets::validate(&templates),
            }
        }
    }
}

/// Templates from an explicit manifest, a discovered one, or the defaults.
fn load_templates(manifest: Option<&Path>, cwd: &Path) -> anyhow::Result<Vec<TargetTemplate>> {
    let manifest = match manifest {
        Some(path) => {
            Some(Manifest::load(path).with_context(|| format!("loading {}", path.display()))?)
        }
        None => Manifest::find_and_load(cwd)?.map(|(manifest, dir)| {
            debug!(dir = %dir.display(), "using discovered manifest");
            manifest
        }),
    };
    match manifest {
        Some(manifest) => Ok(manifest.templates()?),
        None => Ok(default_targets()),
    }
}
