//! Headless Battle Runner
//!
//! Runs one stage against a player profile and prints a JSON summary.

use std::path::PathBuf;

use autobattler::battle::{Battle, BattleEvent, BattleResult, EventLog};
use autobattler::core::{BattleConfig, BattlerError, Result};
use autobattler::player::PlayerProfile;
use autobattler::stages::{load_stages, StageCatalog, StageResult};
use clap::Parser;
use serde::Serialize;

/// Headless Battle Runner - run a stage and report the outcome
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
#[command(about = "Run a stage headlessly and print the outcome as JSON")]
struct Args {
    /// Stage id to play
    #[arg(long, default_value = "1-1")]
    stage: String,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated milliseconds per tick
    #[arg(long, default_value_t = 16.0)]
    tick_ms: f32,

    /// Maximum ticks before giving up
    #[arg(long, default_value_t = 20_000)]
    max_ticks: u64,

    /// Stage table (TOML); the builtin table is used when absent
    #[arg(long)]
    stages: Option<PathBuf>,

    /// Battle config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Player profile (JSON); created if missing, saved after the battle
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Include every battle event in the output
    #[arg(long)]
    events: bool,
}

#[derive(Serialize)]
struct RunSummary {
    outcome: &'static str,
    seed: u64,
    ticks: u64,
    stage: StageResult,
    rewards: Option<BattleResult>,
    player_level: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<Vec<BattleEvent>>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("autobattler=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let config = match &args.config {
        Some(path) => BattleConfig::load(path)?,
        None => BattleConfig::default(),
    };
    let catalog = match &args.stages {
        Some(path) => load_stages(path)?,
        None => StageCatalog::builtin(),
    };
    let stage = catalog
        .get_or_default(&args.stage)
        .cloned()
        .ok_or_else(|| BattlerError::UnknownStage(args.stage.clone()))?;

    let profile = match &args.profile {
        Some(path) if path.exists() => PlayerProfile::load_json(path)?,
        _ => PlayerProfile::default(),
    };
    if !catalog.is_unlocked(&stage.id, profile.level()) {
        tracing::warn!(stage = %stage.id, level = profile.level(), "Stage is above the player's level");
    }

    let mut battle = Battle::new(config, stage, seed).with_observer(EventLog::new());
    battle.deploy_profile(profile);
    battle.start();
    battle.run_until_finished(args.tick_ms, args.max_ticks);

    let outcome = match battle.result() {
        Some(result) if result.victory => "victory",
        Some(_) => "defeat",
        None => "timeout",
    };
    let summary = RunSummary {
        outcome,
        seed,
        ticks: battle.ticks(),
        stage: battle.stage().get_result(),
        rewards: battle.result().cloned(),
        player_level: battle.player_unit().map_or(1, |unit| unit.level()),
        events: args.events.then(|| battle.observer().events().to_vec()),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let (Some(path), Some(profile)) = (&args.profile, battle.into_profile()) {
        profile.save_json(path)?;
    }
    Ok(())
}
