use std::collections::BTreeSet;

use super::config::EconomyConfig;
use super::diminishing::diminishing_sum;
use super::workforce::{Workforce, idle};
use crate::error::SimError;
use crate::model::World;

/// What one settlement's training achieved today.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingReport {
    /// Militaries that received a gain, in processing order.
    pub militaries: Vec<u64>,
    /// Combativity added across all militaries.
    pub combativity_gained: f64,
    /// Training workers sent back to no assignment.
    pub idled: Vec<u64>,
}

/// Raise combativity and morale of the settlement's militaries.
///
/// Militaries with their leader present are drilled by that leader alone;
/// the rest share the pooled training workers and the mayor.
pub fn train(
    world: &mut World,
    architecture_id: u64,
    workforce: &Workforce,
    config: &EconomyConfig,
) -> Result<TrainingReport, SimError> {
    if !world.architectures.contains_key(&architecture_id) {
        return Err(SimError::UnknownArchitecture(architecture_id));
    }
    let mut report = TrainingReport::default();

    let mut leader_led: Vec<(u64, u64)> = Vec::new();
    let mut pooled: Vec<u64> = Vec::new();
    for military_id in world.militaries_at(architecture_id) {
        let military = &world.militaries[&military_id];
        let kind = world
            .military_kinds
            .get(&military.kind_id)
            .ok_or(SimError::UnknownMilitaryKind(military.kind_id))?;
        if !military.is_trainable(kind) {
            continue;
        }
        match military.leader_id {
            Some(leader_id) if world.leader_present(military) => {
                leader_led.push((military_id, leader_id))
            }
            _ => pooled.push(military_id),
        }
    }

    if leader_led.is_empty() && pooled.is_empty() {
        report.idled = workforce.training.clone();
        idle(world, &report.idled);
        return Ok(report);
    }

    let batch_len = leader_led.len() as f64;
    let mut drilling_leaders: BTreeSet<u64> = BTreeSet::new();
    for &(military_id, leader_id) in &leader_led {
        let ability = world.persons[&leader_id].abilities.training as f64 * config.leader_efficiency;
        drill(world, military_id, ability / batch_len, config, &mut report);
        drilling_leaders.insert(leader_id);
    }

    let trainers: Vec<f64> = workforce
        .training
        .iter()
        .filter(|id| !drilling_leaders.contains(id))
        .filter_map(|id| world.persons.get(id))
        .map(|p| p.abilities.training as f64)
        .collect();
    if !pooled.is_empty() && !trainers.is_empty() {
        let mayor_ability = workforce
            .mayor
            .and_then(|id| world.persons.get(&id))
            .map_or(0.0, |p| p.abilities.training as f64 * config.mayor_efficiency);
        let aggregate = diminishing_sum(&trainers, config.diminishing_factor) + mayor_ability;
        let share = aggregate / pooled.len() as f64;
        for &military_id in &pooled {
            drill(world, military_id, share, config, &mut report);
        }
    }

    tracing::debug!(
        architecture_id,
        militaries = report.militaries.len(),
        combativity = report.combativity_gained,
        "training finished"
    );
    Ok(report)
}

/// Spread `ability` over the military's units and apply the gain.
fn drill(
    world: &mut World,
    military_id: u64,
    ability: f64,
    config: &EconomyConfig,
    report: &mut TrainingReport,
) {
    let Some(military) = world.militaries.get_mut(&military_id) else {
        return;
    };
    let kind = &world.military_kinds[&military.kind_id];
    let units = kind.units(military.quantity).max(1) as f64;
    let gain = ability / units;

    let before = military.combativity;
    military.add_combativity(gain, kind);
    military.add_morale(gain * config.training_morale_factor, kind);

    report.combativity_gained += military.combativity - before;
    report.militaries.push(military_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WorkKind;
    use crate::scenario::Scenario;

    fn config() -> EconomyConfig {
        EconomyConfig {
            leader_efficiency: 1.0,
            mayor_efficiency: 0.0,
            training_morale_factor: 0.5,
            ..EconomyConfig::default()
        }
    }

    fn run(world: &mut World, city: u64) -> TrainingReport {
        let workforce = Workforce::classify(world, city);
        train(world, city, &workforce, &config()).unwrap()
    }

    #[test]
    fn leader_drills_own_military() {
        let mut s = Scenario::new();
        let wei = s.add_faction("Wei");
        let city = s.architecture("Xuchang").owned_by(wei).id();
        let kind = s.military_kind("Spearmen").id();
        let leader = s.person("Xiahou Dun").at(city).training(20).id();
        // 200 soldiers of 100 per unit: 2 units.
        let corps = s
            .military("Vanguard", city, kind)
            .leader(leader)
            .quantity(200)
            .combativity(30.0)
            .morale(30.0)
            .id();
        let mut world = s.build();

        let report = run(&mut world, city);

        assert_eq!(report.militaries, vec![corps]);
        let military = &world.militaries[&corps];
        assert!((military.combativity - 40.0).abs() < 1e-9);
        assert!((military.morale - 35.0).abs() < 1e-9);
    }

    #[test]
    fn pooled_trainers_share_gain() {
        let mut s = Scenario::new();
        let wei = s.add_faction("Wei");
        let city = s.architecture("Xuchang").owned_by(wei).id();
        let kind = s.military_kind("Spearmen").id();
        s.person("Drillmaster").at(city).work(WorkKind::Training).training(40);
        let a = s.military("A", city, kind).quantity(100).id();
        let b = s.military("B", city, kind).quantity(100).id();
        let mut world = s.build();

        run(&mut world, city);

        // 40 over two militaries of one unit each.
        assert!((world.militaries[&a].combativity - 50.0).abs() < 1e-9);
        assert!((world.militaries[&b].combativity - 50.0).abs() < 1e-9);
    }

    #[test]
    fn pooled_training_needs_a_trainer() {
        let mut s = Scenario::new();
        let wei = s.add_faction("Wei");
        let city = s.architecture("Xuchang").owned_by(wei).id();
        let kind = s.military_kind("Spearmen").id();
        s.person("Mayor").at(city).work(WorkKind::Mayor);
        let corps = s.military("A", city, kind).quantity(100).id();
        let mut world = s.build();

        let report = run(&mut world, city);

        assert!(report.militaries.is_empty());
        assert_eq!(world.militaries[&corps].combativity, 30.0);
    }

    #[test]
    fn gains_stop_at_kind_caps() {
        let mut s = Scenario::new();
        let wei = s.add_faction("Wei");
        let city = s.architecture("Xuchang").owned_by(wei).id();
        let kind = s.military_kind("Spearmen").id();
        s.person("Drillmaster").at(city).work(WorkKind::Training).training(1000);
        let corps = s.military("A", city, kind).quantity(100).combativity(95.0).morale(99.0).id();
        let mut world = s.build();

        run(&mut world, city);

        assert_eq!(world.militaries[&corps].combativity, 100.0);
        assert_eq!(world.militaries[&corps].morale, 100.0);
    }

    #[test]
    fn no_trainable_military_idles_trainers() {
        let mut s = Scenario::new();
        let wei = s.add_faction("Wei");
        let city = s.architecture("Xuchang").owned_by(wei).id();
        let kind = s.military_kind("Spearmen").id();
        let trainer = s.person("Drillmaster").at(city).work(WorkKind::Training).id();
        // Empty militaries cannot train.
        s.military("Depot", city, kind);
        let mut world = s.build();

        let report = run(&mut world, city);

        assert_eq!(report.idled, vec![trainer]);
        assert_eq!(world.persons[&trainer].work, WorkKind::None);
    }

    #[test]
    fn absent_leader_falls_back_to_pool() {
        let mut s = Scenario::new();
        let wei = s.add_faction("Wei");
        let city = s.architecture("Xuchang").owned_by(wei).id();
        let elsewhere = s.architecture("Ye").owned_by(wei).id();
        let kind = s.military_kind("Spearmen").id();
        let leader = s.person("Away").at(elsewhere).training(100).id();
        s.person("Drillmaster").at(city).work(WorkKind::Training).training(10);
        let corps = s.military("A", city, kind).leader(leader).quantity(100).id();
        let mut world = s.build();

        run(&mut world, city);

        assert!((world.militaries[&corps].combativity - 40.0).abs() < 1e-9);
    }
}
