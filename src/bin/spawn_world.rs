//! Spawn driver binary — stands in for a host session: feeds the scheduler
//! a request stream, runs the tick loop, and reports what was generated.
//!
//! Usage: cargo run --release --bin spawn_world -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   Load SpawnConfig from a JSON file
//!   --seed <SEED>     World seed (default: 12345)
//!   --side <N>        Blocks per chunk side (default: 16)
//!   --cap <N>         Max chunk spawns per tick (default: 10)
//!   --radius <R>      Request radius in chunks around the origin (default: 4)
//!   --jobs <N>        Max parallel populate workers (default: 4)
//!   --manifest <PATH> Write a JSON run summary to this path
//!
//! The solid-voxel digest printed at the end is deterministic for a given
//! seed and configuration — two runs (or two peers) must print the same
//! number.

use std::time::Instant;

use serde_json::json;

use terraseed::generation::{ChunkScheduler, PerlinNoiseField, SpawnConfig};
use terraseed::voxel::chunk::ChunkCoord;

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .init();

    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => {
            let json = std::fs::read_to_string(&path).expect("Failed to read config file");
            serde_json::from_str(&json).expect("Failed to parse config file")
        }
        None => SpawnConfig::default(),
    };
    if let Some(seed) = parse_i32_arg(&args, "--seed") {
        config.seed = seed;
    }
    if let Some(side) = parse_i32_arg(&args, "--side") {
        config.blocks_per_side = side;
    }
    if let Some(cap) = parse_usize_arg(&args, "--cap") {
        config.max_chunk_spawns_per_tick = cap;
    }
    let radius = parse_i32_arg(&args, "--radius").unwrap_or(4);
    let jobs = parse_usize_arg(&args, "--jobs").unwrap_or(4);

    // Cap the populate fan-out
    rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build_global()
        .expect("Failed to configure thread pool");

    println!("=== Terraseed Spawn Driver ===");
    println!("Seed:   {}", config.seed);
    println!("Chunk:  {} blocks per side", config.blocks_per_side);
    println!(
        "Bounds: sea {} / sky {}",
        config.y_bounds.sea_level, config.y_bounds.sky_level
    );
    println!("Cap:    {} spawns per tick", config.max_chunk_spawns_per_tick);
    println!("Radius: {} chunks", radius);
    println!("Jobs:   {} parallel", jobs);
    println!();

    let field = PerlinNoiseField::new(config.seed);
    let mut scheduler =
        ChunkScheduler::new(config.clone(), Box::new(field)).expect("Invalid spawn configuration");

    // Emulate the host's request stream: every chunk column within the
    // radius, across the vertical band the terrain can occupy.
    let side = config.blocks_per_side;
    let y_min = config.y_bounds.sea_level.div_euclid(side);
    let y_max = config.y_bounds.sky_level.div_euclid(side);
    for x in -radius..=radius {
        for z in -radius..=radius {
            for y in y_min..=y_max {
                scheduler.enqueue(ChunkCoord::new(x, y, z));
            }
        }
    }

    let requested = scheduler.backlog_len();
    println!("Requested {} chunks, draining backlog...", requested);

    if config.max_chunk_spawns_per_tick == 0 {
        println!("Spawn cap is 0 — nothing will ever be admitted, stopping.");
        return;
    }

    let start = Instant::now();
    let mut ticks = 0usize;
    while scheduler.backlog_len() > 0 {
        let stats = scheduler.tick();
        ticks += 1;

        let fresh_solid: usize = scheduler
            .store()
            .fresh()
            .map(|(_, chunk)| chunk.solid_count())
            .sum();
        log::info!(
            "tick {}: +{} chunks ({} solid voxels), {} pending",
            ticks,
            stats.admitted,
            fresh_solid,
            stats.backlog_remaining
        );
    }
    // One more tick to retire the last batch's freshness flags
    scheduler.tick();
    ticks += 1;

    let elapsed = start.elapsed();
    let chunks = scheduler.store().len();
    let solid_voxels: usize = scheduler
        .store()
        .iter()
        .map(|(_, chunk)| chunk.solid_count())
        .sum();

    println!();
    println!("=== Run Complete ===");
    println!(
        "Chunks: {} in {} ticks ({:.1}s, {:.0} chunks/sec)",
        chunks,
        ticks,
        elapsed.as_secs_f64(),
        chunks as f64 / elapsed.as_secs_f64().max(1e-9)
    );
    println!("Solid voxel digest: {}", solid_voxels);

    if let Some(path) = parse_str_arg(&args, "--manifest") {
        let manifest = json!({
            "seed": config.seed,
            "blocks_per_side": config.blocks_per_side,
            "y_bounds": {
                "sea_level": config.y_bounds.sea_level,
                "sky_level": config.y_bounds.sky_level,
            },
            "max_chunk_spawns_per_tick": config.max_chunk_spawns_per_tick,
            "radius": radius,
            "requested": requested,
            "ticks": ticks,
            "chunks": chunks,
            "solid_voxels": solid_voxels,
            "elapsed_secs": elapsed.as_secs_f64(),
        });
        std::fs::write(&path, serde_json::to_string_pretty(&manifest).unwrap())
            .expect("Failed to write manifest");
        println!("Manifest: {}", path);
    }
}

fn parse_i32_arg(args: &[String], flag: &str) -> Option<i32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.clone())
}
