use super::config::EconomyConfig;
use super::diminishing::{diminishing_growth, diminishing_sum};
use super::workforce::Workforce;
use crate::error::SimError;
use crate::model::{ArchitectureKind, DevelopmentStat, World};

/// Fund and food credited by one monthly income step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Income {
    pub fund: u32,
    pub food: u32,
}

fn kind_of(world: &World, architecture_id: u64) -> Result<&ArchitectureKind, SimError> {
    let arch = world
        .architectures
        .get(&architecture_id)
        .ok_or(SimError::UnknownArchitecture(architecture_id))?;
    world
        .architecture_kinds
        .get(&arch.kind_id)
        .ok_or(SimError::UnknownArchitectureKind(arch.kind_id))
}

/// Lower every development stat by `config.daily_decay`, then clamp into
/// `[0, cap]` so the stats are in bounds even on days without growth.
pub fn decay(world: &mut World, architecture_id: u64, config: &EconomyConfig) -> Result<(), SimError> {
    let kind = kind_of(world, architecture_id)?.clone();
    let arch = world
        .architectures
        .get_mut(&architecture_id)
        .ok_or(SimError::UnknownArchitecture(architecture_id))?;
    for &stat in DevelopmentStat::ALL {
        let value = arch.development.get_mut(stat);
        *value -= config.daily_decay;
    }
    arch.clamp_development(&kind);
    Ok(())
}

/// Move each stat toward its kind cap, driven by the mayor and the workers
/// assigned to that stat.
pub fn grow(
    world: &mut World,
    architecture_id: u64,
    workforce: &Workforce,
    config: &EconomyConfig,
) -> Result<(), SimError> {
    let kind = kind_of(world, architecture_id)?.clone();
    let mayor = workforce.mayor.and_then(|id| world.persons.get(&id));

    let mut targets = Vec::with_capacity(DevelopmentStat::ALL.len());
    for &stat in DevelopmentStat::ALL {
        let workers: Vec<f64> = workforce
            .development_workers(stat)
            .iter()
            .filter_map(|id| world.persons.get(id))
            .map(|p| p.abilities.development(stat) as f64)
            .collect();
        let mayor_ability =
            mayor.map_or(0.0, |p| p.abilities.development(stat) as f64 * config.mayor_efficiency);
        targets.push((stat, diminishing_sum(&workers, config.diminishing_factor) + mayor_ability));
    }

    let arch = world
        .architectures
        .get_mut(&architecture_id)
        .ok_or(SimError::UnknownArchitecture(architecture_id))?;
    for (stat, ability) in targets {
        if ability <= 0.0 {
            continue;
        }
        let value = arch.development.get_mut(stat);
        *value = diminishing_growth(*value, kind.cap(stat), ability, config.growth_half_saturation);
    }
    arch.clamp_development(&kind);
    Ok(())
}

/// Credit a month of fund and food, clamped to the kind's maximums.
pub fn monthly_income(
    world: &mut World,
    architecture_id: u64,
    config: &EconomyConfig,
) -> Result<Income, SimError> {
    let kind = kind_of(world, architecture_id)?;
    let (max_fund, max_food) = (kind.max_fund, kind.max_food);
    let arch = world
        .architectures
        .get_mut(&architecture_id)
        .ok_or(SimError::UnknownArchitecture(architecture_id))?;

    let population = arch.population as f64;
    let fund_gain = (arch.development.commerce * config.commerce_income
        + population * config.population_fund_income)
        .floor()
        .max(0.0) as u32;
    let food_gain = (arch.development.agriculture * config.agriculture_income
        + population * config.population_food_income)
        .floor()
        .max(0.0) as u32;

    let fund = arch.fund.saturating_add(fund_gain).min(max_fund);
    let food = arch.food.saturating_add(food_gain).min(max_food);
    let income = Income {
        fund: fund.saturating_sub(arch.fund),
        food: food.saturating_sub(arch.food),
    };
    arch.fund = fund;
    arch.food = food;
    Ok(income)
}
