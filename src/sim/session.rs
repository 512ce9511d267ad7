use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::EconomyConfig;
use super::context::TickContext;
use super::day::{DayReport, advance_day};
use super::system::{SimSystem, TickFrequency};
use crate::error::SimError;
use crate::model::{GameDate, World};

/// Daily system advancing every settlement, in ascending id order.
///
/// Reports of the most recent day are kept for inspection.
#[derive(Debug, Default)]
pub struct ArchitectureSystem {
    last_reports: Vec<DayReport>,
}

impl ArchitectureSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_reports(&self) -> &[DayReport] {
        &self.last_reports
    }
}

impl SimSystem for ArchitectureSystem {
    fn name(&self) -> &str {
        "architecture"
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::Daily
    }

    fn tick(&mut self, ctx: &mut TickContext) -> Result<(), SimError> {
        self.last_reports.clear();
        let date = ctx.world.current_date;
        let ids: Vec<u64> = ctx.world.architectures.keys().copied().collect();
        for id in ids {
            let report = advance_day(ctx.world, id, date, ctx.rng, ctx.config)?;
            self.last_reports.push(report);
        }
        Ok(())
    }
}

/// A world together with its seeded RNG and economy constants, driven one
/// day at a time.
pub struct SimSession {
    world: World,
    rng: SmallRng,
    config: EconomyConfig,
    system: ArchitectureSystem,
    next_date: GameDate,
}

impl SimSession {
    /// Start at the world's current date.
    pub fn new(world: World, seed: u64, config: EconomyConfig) -> Self {
        let next_date = world.current_date;
        Self {
            world,
            rng: SmallRng::seed_from_u64(seed),
            config,
            system: ArchitectureSystem::new(),
            next_date,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn into_world(self) -> World {
        self.world
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    /// Date the next call to [`advance_day`](Self::advance_day) will simulate.
    pub fn next_date(&self) -> GameDate {
        self.next_date
    }

    /// Simulate one day for every settlement and move the calendar forward.
    pub fn advance_day(&mut self) -> Result<&[DayReport], SimError> {
        self.world.current_date = self.next_date;
        let mut ctx = TickContext {
            world: &mut self.world,
            rng: &mut self.rng,
            config: &self.config,
        };
        self.system.tick(&mut ctx)?;
        self.next_date = self.next_date.next_day();
        Ok(self.system.last_reports())
    }

    /// Simulate `days` consecutive days.
    pub fn advance_days(&mut self, days: u32) -> Result<(), SimError> {
        for _ in 0..days {
            self.advance_day()?;
        }
        Ok(())
    }
}
