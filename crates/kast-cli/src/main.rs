//! kast CLI — assemble the parametric closet and report on it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use kast::{assemble, extract_wood_parts, ClosetConfig};

#[derive(Parser)]
#[command(name = "kast")]
#[command(about = "Parametric closet design and cut-list generator", long_about = None)]
struct Cli {
    /// TOML parameter file; omitted means the reference design
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cut list of unique wooden parts
    Cutlist {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print overall dimensions and part counts
    Info,
}

#[derive(ValueEnum, Clone, Copy)]
enum Format {
    /// Human-readable, column-aligned report
    Text,
    /// Machine-readable JSON
    Json,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => {
            let config = ClosetConfig::load(path)?;
            info!("loaded config from {}", path.display());
            config
        }
        None => ClosetConfig::default(),
    };

    match cli.command {
        Commands::Cutlist { format } => print_cutlist(&config, format),
        Commands::Info => print_info(&config),
    }
}

fn print_cutlist(config: &ClosetConfig, format: Format) -> Result<()> {
    let closet = assemble(config)?;
    let list = extract_wood_parts(&closet, &config.panel_stock());
    match format {
        Format::Text => print!("{list}"),
        Format::Json => println!("{}", serde_json::to_string_pretty(&list)?),
    }
    Ok(())
}

fn print_info(config: &ClosetConfig) -> Result<()> {
    let closet = assemble(config)?;
    let list = extract_wood_parts(&closet, &config.panel_stock());

    let bb = closet
        .bounding_box()
        .context("assembled closet has no geometry")?;
    let ext = bb.extents();

    let mut dowels = 0;
    closet.visit_leaves(&mut |shape| {
        if shape.label().map(|l| l.starts_with("Dowel")).unwrap_or(false) {
            dowels += 1;
        }
    });

    println!(
        "Closet envelope: {:.1} x {:.1} x {:.1} cm",
        ext.x, ext.y, ext.z
    );
    println!("Solids in scene: {}", closet.leaf_count());
    println!(
        "Wooden panels:   {} ({} unique sizes)",
        list.panel_count(),
        list.entries.len()
    );
    println!("Dowels:          {}", dowels);
    Ok(())
}
