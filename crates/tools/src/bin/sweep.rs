use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{ArgAction, Parser};
use nest_core::nestgen::verify;
use nest_core::{NestConfig, generate_nest};
use nest_tools::config_file::load_config;
use nest_tools::{format_fingerprint, logger};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generate many nests and check every invariant",
    long_about = None
)]
struct Args {
    #[arg(short, long, default_value_t = 0)]
    start: u64,
    #[arg(short = 'n', long, default_value_t = 1000)]
    count: u64,
    #[arg(short, long, default_value_t = 1)]
    level: u32,
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Default)]
struct Tally {
    nests: u64,
    rooms: u64,
    min_rooms: Option<usize>,
    max_rooms: usize,
    spawn_points: u64,
    branch_attempts: u64,
    rejected_corridors: u64,
    rejected_rooms: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose)?;
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => NestConfig::default(),
    };

    println!("Sweeping {} seeds from {} at level {}...", args.count, args.start, args.level);
    let mut tally = Tally::default();
    let mut failures = Vec::new();

    for seed in args.start..args.start.saturating_add(args.count) {
        let nest = generate_nest(seed, args.level, &config)?;
        if let Err(violation) = verify(&nest, &config) {
            println!("seed {seed} ({}): {violation}", format_fingerprint(nest.fingerprint()));
            failures.push(seed);
            continue;
        }

        let rooms = nest.graph.len();
        tally.nests += 1;
        tally.rooms += rooms as u64;
        tally.min_rooms = Some(tally.min_rooms.map_or(rooms, |low| low.min(rooms)));
        tally.max_rooms = tally.max_rooms.max(rooms);
        tally.spawn_points += nest.spawn_points.len() as u64;
        tally.branch_attempts += u64::from(nest.stats.branch_attempts);
        tally.rejected_corridors += u64::from(nest.stats.rejected_corridors);
        tally.rejected_rooms += u64::from(nest.stats.rejected_rooms);
    }

    if tally.nests > 0 {
        let mean = tally.rooms as f64 / tally.nests as f64;
        println!(
            "Rooms per nest: min {}, max {}, mean {mean:.2}",
            tally.min_rooms.unwrap_or(0),
            tally.max_rooms,
        );
        println!("Spawn points: {}", tally.spawn_points);
        println!(
            "Branches: {} attempted, {} corridor and {} room rejections",
            tally.branch_attempts, tally.rejected_corridors, tally.rejected_rooms,
        );
    }

    if !failures.is_empty() {
        bail!("{} of {} seeds broke an invariant: {failures:?}", failures.len(), args.count);
    }
    println!("Sweep completed successfully.");
    Ok(())
}
