// SPDX-License-Identifier: MIT OR Apache-2.0
//! Lineage Editor headless CLI.
//!
//! Companion binary for working with saved project documents outside
//! the browser: create a fresh document, inspect one, or render it to
//! SVG.

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use lineage_editor_app::export;
use lineage_editor_graph::Project;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "lineage_editor", version, about = "Data-pipeline diagram tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a new project document
    New {
        /// Project name
        #[arg(long, default_value = "New Project")]
        name: String,
        /// Seed the document with the demo pipeline
        #[arg(long)]
        demo: bool,
        /// Output path; defaults to a dated file name in the current directory
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Load a project document and report what it contains
    Inspect {
        /// Path to a saved project document
        input: PathBuf,
    },
    /// Render a project document to a standalone SVG file
    ExportSvg {
        /// Path to a saved project document
        input: PathBuf,
        /// Output path; defaults to a dated file name next to the input
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(Cli::parse()) {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::New { name, demo, output } => {
            let project = if demo {
                let mut project = Project::demo();
                project.name = name;
                project
            } else {
                Project::new(name)
            };
            let path = output.unwrap_or_else(|| default_output(&project, "json"));
            export::json::save_to(&project, &path)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("{}", path.display());
        }
        Command::Inspect { input } => {
            let project = export::json::load_from(&input)
                .with_context(|| format!("loading {}", input.display()))?;
            println!(
                "{}: {} nodes, {} edges",
                project.name,
                project.graph.node_count(),
                project.graph.edge_count()
            );
        }
        Command::ExportSvg { input, output } => {
            let project = export::json::load_from(&input)
                .with_context(|| format!("loading {}", input.display()))?;
            let svg = export::to_svg(&project)?;
            let path = output.unwrap_or_else(|| {
                let name = default_output(&project, "svg");
                input.parent().map_or_else(|| name.clone(), |dir| dir.join(&name))
            });
            std::fs::write(&path, svg)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn default_output(project: &Project, extension: &str) -> PathBuf {
    PathBuf::from(export::download_file_name(
        &project.name,
        extension,
        Utc::now().date_naive(),
    ))
}
