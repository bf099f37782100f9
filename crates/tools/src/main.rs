use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::info;
use nest_core::nestgen::verify;
use nest_core::{NestConfig, generate_nest};
use nest_tools::config_file::{load_config, write_config_atomic};
use nest_tools::render::{OutputFormat, render};
use nest_tools::seed::SeedChoice;
use nest_tools::{format_fingerprint, logger};

#[derive(Parser)]
#[command(author, version, about = "Generate an ant nest layout", long_about = None)]
struct Args {
    /// Run seed; a fresh one is generated and printed when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// Level index within the run
    #[arg(short, long, default_value_t = 1)]
    level: u32,
    /// TOML file overriding the default tuning
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Summary)]
    format: OutputFormat,
    /// Write the effective tuning to this TOML file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
    /// Re-check structural invariants on the generated nest
    #[arg(long)]
    verify: bool,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose).context("Failed to install logger")?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => NestConfig::default(),
    };
    if let Some(path) = &args.write_config {
        write_config_atomic(&config, path)?;
        println!("Wrote nest config to {}", path.display());
        return Ok(());
    }

    let seed = SeedChoice::resolve(args.seed);
    match seed {
        SeedChoice::Cli(value) => eprintln!("Seed: {value}"),
        SeedChoice::Generated(value) => eprintln!("Seed: {value} (generated)"),
    }

    let nest = generate_nest(seed.value(), args.level, &config)
        .with_context(|| format!("Failed to generate level {}", args.level))?;
    if args.verify {
        verify(&nest, &config).with_context(|| {
            format!("Nest for seed {} level {} broke an invariant", seed.value(), args.level)
        })?;
        info!("invariants hold for {}", format_fingerprint(nest.fingerprint()));
    }

    let output = render(&nest, args.format).context("Failed to render nest")?;
    print!("{output}");
    Ok(())
}
