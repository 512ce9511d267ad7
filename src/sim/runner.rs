use std::path::PathBuf;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use super::config::EconomyConfig;
use super::context::TickContext;
use super::system::{SimSystem, TickFrequency};
use crate::error::{PersistenceError, SimError};
use crate::flush::flush_to_jsonl;
use crate::model::{GameDate, World};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub start_year: u32,
    pub num_days: u32,
    pub seed: u64,
    /// If set, the world is flushed here once the run ends.
    pub flush_dir: Option<PathBuf>,
}

impl SimConfig {
    pub fn new(start_year: u32, num_days: u32, seed: u64) -> Self {
        Self {
            start_year,
            num_days,
            seed,
            flush_dir: None,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new(1, 360, 0)
    }
}

/// Returns true if a system with the given frequency should fire on this date.
pub fn should_fire(freq: TickFrequency, date: GameDate) -> bool {
    match freq {
        TickFrequency::Daily => true,
        TickFrequency::Monthly => date.is_month_start(),
    }
}

/// Set `world.current_date` and call each system whose frequency matches, in
/// registration order. The first failing system aborts the day.
pub fn dispatch_systems(
    world: &mut World,
    systems: &mut [Box<dyn SimSystem>],
    rng: &mut dyn RngCore,
    config: &EconomyConfig,
    date: GameDate,
) -> Result<(), SimError> {
    world.current_date = date;

    for system in systems.iter_mut() {
        if should_fire(system.frequency(), date) {
            let mut ctx = TickContext { world, rng, config };
            system.tick(&mut ctx).inspect_err(|err| {
                tracing::error!(system = system.name(), %date, %err, "system failed");
            })?;
        }
    }
    Ok(())
}

/// Run the simulation for the configured number of days.
///
/// Creates a deterministic RNG from `config.seed`, so the same seed always
/// produces the same simulation.
pub fn run(
    world: &mut World,
    systems: &mut [Box<dyn SimSystem>],
    config: &SimConfig,
    economy: &EconomyConfig,
) -> Result<(), SimError> {
    if systems.is_empty() || config.num_days == 0 {
        return Ok(());
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut date = GameDate::from_year(config.start_year);
    for day in 0..config.num_days {
        if day > 0 {
            date = date.next_day();
        }
        dispatch_systems(world, systems, &mut rng, economy, date)?;
    }
    tracing::info!(days = config.num_days, until = %date, "simulation finished");

    if let Some(dir) = &config.flush_dir {
        flush_to_jsonl(world, dir).map_err(|source| PersistenceError::Io {
            path: dir.display().to_string(),
            source,
        })?;
    }
    Ok(())
}
