// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Grow a two-layer organoid and report how it wired itself.
//!
//! A retina of simple cells sits at depth 0 and a cortex of neurons at
//! depth 1. A diagonal stripe of retina cells is activated, every cortex
//! neuron sprouts dendrites toward the retina, and growth rounds run until
//! the tissue settles, stalls or the round budget runs out.
//!
//! Usage:
//!   cargo run --bin grow_organoid -- [--config <path>] [--rounds <n>] [--per-neuron <n>] [--debug-all]

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use noggin::config::{
    apply_environment_overrides, load_config, ConfigError, NogginConfig, CONFIG_FILE_NAME,
};
use noggin::observability::{
    debug_flags_help, init_console_logging, parse_debug_flags, ObservabilityConfig,
};
use noggin::prelude::*;

const RETINA_SIDE: u16 = 16;
const CORTEX_SIDE: u16 = 8;

struct Args {
    config: Option<PathBuf>,
    rounds: u64,
    per_neuron: usize,
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: grow_organoid [--config <path>] [--rounds <n>] [--per-neuron <n>]\n\n\
         Defaults:\n\
         - config: {CONFIG_FILE_NAME} if found, built-in defaults otherwise\n\
         - rounds: 200\n\
         - per-neuron: 2\n\n\
         {}",
        debug_flags_help()
    );
    process::exit(2);
}

fn parse_args() -> Args {
    let mut parsed = Args {
        config: None,
        rounds: 200,
        per_neuron: 2,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.config = Some(PathBuf::from(v));
            }
            "--rounds" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.rounds = v.parse().unwrap_or_else(|_| usage_and_exit());
            }
            "--per-neuron" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.per_neuron = v.parse().unwrap_or_else(|_| usage_and_exit());
            }
            "-h" | "--help" => usage_and_exit(),
            other if other.starts_with("--debug-") => {}
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }

    parsed
}

fn load(args: &Args) -> Result<NogginConfig> {
    match &args.config {
        Some(path) => load_config(Some(path), None)
            .with_context(|| format!("failed to load {}", path.display())),
        // No file anywhere is fine, a broken one is not
        None => match load_config(None, None) {
            Err(ConfigError::FileNotFound(_)) => {
                let mut config = NogginConfig::default();
                apply_environment_overrides(&mut config);
                Ok(config)
            }
            other => other.context("failed to load configuration"),
        },
    }
}

fn grow(config: &NogginConfig, args: &Args) -> Result<Organoid> {
    let mut organoid = build_organoid(config)?;
    let spacing = config.placement.spacing;

    let retina_size = RETINA_SIDE as usize * RETINA_SIDE as usize;
    let cortex_size = CORTEX_SIDE as usize * CORTEX_SIDE as usize;
    let mut retina = Layer::cells("retina", 0, retina_size);
    // Spread the smaller cortex over the same footprint as the retina
    let mut cortex = Layer::neurons("cortex", 1, cortex_size).growing_toward(0);
    organoid.cell_grid(&mut retina, RETINA_SIDE, RETINA_SIDE, spacing)?;
    organoid.neuron_grid(&mut cortex, CORTEX_SIDE, CORTEX_SIDE, spacing.saturating_mul(2))?;

    let stripe: Vec<CellId> = retina
        .cell_ids()?
        .filter(|id| {
            let (row, col) = (id.0 / RETINA_SIDE as u32, id.0 % RETINA_SIDE as u32);
            row.abs_diff(col) <= 1
        })
        .collect();
    for id in &stripe {
        organoid.set_activation(Target::Cell(*id), 80)?;
    }

    organoid.add_layer(retina, 0)?;
    organoid.add_layer(cortex, 1)?;
    organoid.sprout_layer(1, args.per_neuron)?;

    tracing::info!(
        target: "noggin",
        "Activated {} retina cells, sprouted {} dendrites per neuron",
        stripe.len(),
        args.per_neuron
    );
    Ok(organoid)
}

fn run() -> Result<()> {
    let args = parse_args();
    let config = load(&args)?;

    let flags = parse_debug_flags();
    let observability = ObservabilityConfig {
        level: config.system.log_level.clone(),
        with_target: true,
        ..Default::default()
    };
    init_console_logging(&flags, &observability)?;

    let mut organoid = grow(&config, &args)?;
    let progress = organoid.develop(args.rounds)?;
    let stats = organoid.stats();

    println!("Organoid '{}'", organoid.name());
    println!("  stage:      {:?}", progress.stage);
    println!("  rounds:     {}", progress.rounds);
    println!("  moves:      {}", progress.moves);
    println!(
        "  dendrites:  {} attached, {} growing ({} / {} capacity)",
        stats.attached_dendrites, stats.growing_dendrites, stats.dendrites, stats.dendrite_capacity
    );
    println!("  elapsed:    {} ms", progress.duration_ms);

    let cortex = organoid.layer_at(1)?;
    for neuron in cortex.neuron_ids()? {
        let synapses: Vec<String> = organoid
            .dendrites_of(neuron)?
            .iter()
            .filter_map(|(_, dendrite)| dendrite.synapse())
            .map(|(target, weight)| format!("{target}@{weight}"))
            .collect();
        if !synapses.is_empty() {
            println!("  {neuron}: {}", synapses.join(", "));
        }
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("grow_organoid: {e:#}");
        process::exit(1);
    }
}
