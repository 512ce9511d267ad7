use std::collections::BTreeSet;

use super::config::EconomyConfig;
use super::diminishing::diminishing_sum;
use super::workforce::{Workforce, idle};
use crate::error::SimError;
use crate::model::{Military, WorkKind, World};

/// What one settlement's recruitment achieved today.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecruitmentReport {
    /// Soldiers added across all militaries.
    pub recruited: u32,
    /// Fund spent on recruitment batches.
    pub spent: u32,
    /// Militaries admitted to a batch, in processing order.
    pub militaries: Vec<u64>,
    /// Recruit-workers sent back to no assignment.
    pub idled: Vec<u64>,
    /// Population ran out during the call.
    pub population_exhausted: bool,
}

struct Candidate {
    military_id: u64,
    cost: u32,
    room: u32,
}

/// Convert population into soldiers at one settlement, leader-led militaries
/// first, then the pooled recruit-workers for the rest.
pub fn recruit(
    world: &mut World,
    architecture_id: u64,
    workforce: &Workforce,
    config: &EconomyConfig,
) -> Result<RecruitmentReport, SimError> {
    let arch = world
        .architectures
        .get(&architecture_id)
        .ok_or(SimError::UnknownArchitecture(architecture_id))?;
    let mut report = RecruitmentReport::default();

    let owned = world.faction_of(architecture_id).is_some();
    let mut recruitable: Vec<&Military> = Vec::new();
    if owned {
        for military_id in world.militaries_at(architecture_id) {
            let military = &world.militaries[&military_id];
            let kind = world
                .military_kinds
                .get(&military.kind_id)
                .ok_or(SimError::UnknownMilitaryKind(military.kind_id))?;
            if military.is_recruitable(kind) {
                recruitable.push(military);
            }
        }
    }

    if recruitable.is_empty() || arch.population == 0 || arch.fund == 0 {
        report.idled = workforce.recruit.clone();
        idle(world, &report.idled);
        return Ok(report);
    }

    // -- Phase 1: militaries led by a present recruiter or mayor --

    let leader_led: Vec<Candidate> = recruitable
        .iter()
        .filter(|m| leads_recruitment(world, m, architecture_id))
        .map(|m| candidate(world, m, config))
        .collect();
    let pooled_militaries: Vec<Candidate> = recruitable
        .iter()
        .filter(|m| !world.leader_present(m))
        .map(|m| candidate(world, m, config))
        .collect();

    let batch = admit(leader_led, arch.fund);
    let batch_len = batch.len() as f64;
    let mut consumed: BTreeSet<u64> = BTreeSet::new();

    for c in &batch {
        let Some(leader_id) = world.militaries[&c.military_id].leader_id else {
            continue;
        };
        let ability = world.persons[&leader_id].abilities.recruit as f64 * config.leader_efficiency;
        let headcount = (ability / batch_len).floor() as u32;
        apply_recruitment(world, architecture_id, c, headcount, config, &mut report);
        consumed.insert(leader_id);

        if population(world, architecture_id) == 0 {
            report.population_exhausted = true;
            report.idled = workforce.recruit.clone();
            idle(world, &report.idled);
            tracing::warn!(architecture_id, "population exhausted by leader-led recruitment");
            return Ok(report);
        }
    }

    // -- Phase 2: pooled recruit-workers for militaries without a present leader --

    let pooled_workers: Vec<u64> = workforce
        .recruit
        .iter()
        .copied()
        .filter(|id| !consumed.contains(id))
        .collect();
    if pooled_workers.is_empty() {
        return Ok(report);
    }

    let fund = world.architectures[&architecture_id].fund;
    let batch = admit(pooled_militaries, fund);
    if batch.is_empty() {
        report.idled = pooled_workers;
        idle(world, &report.idled);
        return Ok(report);
    }

    let worker_abilities: Vec<f64> = pooled_workers
        .iter()
        .filter_map(|id| world.persons.get(id))
        .map(|p| p.abilities.recruit as f64)
        .collect();
    let mayor_ability = workforce
        .mayor
        .and_then(|id| world.persons.get(&id))
        .map_or(0.0, |p| p.abilities.recruit as f64 * config.mayor_efficiency);
    let aggregate = diminishing_sum(&worker_abilities, config.diminishing_factor) + mayor_ability;
    let headcount = (aggregate / batch.len() as f64).floor() as u32;

    for c in &batch {
        apply_recruitment(world, architecture_id, c, headcount, config, &mut report);
        if population(world, architecture_id) == 0 {
            report.population_exhausted = true;
            report.idled = pooled_workers;
            idle(world, &report.idled);
            tracing::warn!(architecture_id, "population exhausted by pooled recruitment");
            break;
        }
    }

    tracing::debug!(
        architecture_id,
        recruited = report.recruited,
        spent = report.spent,
        "recruitment finished"
    );
    Ok(report)
}

/// The leader is at the settlement and working as recruiter or mayor.
fn leads_recruitment(world: &World, military: &Military, architecture_id: u64) -> bool {
    military
        .leader_id
        .and_then(|id| world.persons.get(&id))
        .is_some_and(|p| {
            p.is_resident_at(architecture_id)
                && matches!(p.work, WorkKind::Recruit | WorkKind::Mayor)
        })
}

fn candidate(world: &World, military: &Military, config: &EconomyConfig) -> Candidate {
    let kind = &world.military_kinds[&military.kind_id];
    let arch = &world.architectures[&military.architecture_id];
    let cost = (kind.cost(arch) as f64 * config.recruit_cost_factor).round().max(0.0) as u32;
    Candidate {
        military_id: military.id,
        cost,
        room: military.room(kind),
    }
}

/// Cheapest first (ties by id); admit while the running cost fits the fund.
fn admit(mut candidates: Vec<Candidate>, fund: u32) -> Vec<Candidate> {
    candidates.sort_by_key(|c| (c.cost, c.military_id));
    let mut running: u64 = 0;
    candidates
        .into_iter()
        .take_while(|c| {
            running += c.cost as u64;
            running <= fund as u64
        })
        .collect()
}

fn population(world: &World, architecture_id: u64) -> u32 {
    world
        .architectures
        .get(&architecture_id)
        .map_or(0, |a| a.population)
}

fn apply_recruitment(
    world: &mut World,
    architecture_id: u64,
    candidate: &Candidate,
    headcount: u32,
    config: &EconomyConfig,
    report: &mut RecruitmentReport,
) {
    let Some(arch) = world.architectures.get_mut(&architecture_id) else {
        return;
    };
    let headcount = headcount.min(arch.population).min(candidate.room);
    let cost = candidate.cost.min(arch.fund);
    arch.population -= headcount;
    arch.fund -= cost;

    let Some(military) = world.militaries.get_mut(&candidate.military_id) else {
        return;
    };
    let kind = &world.military_kinds[&military.kind_id];
    military.add_quantity(headcount, kind);
    military.add_morale(config.recruit_morale_delta, kind);
    military.add_combativity(config.recruit_combativity_delta, kind);

    report.recruited += headcount;
    report.spent += cost;
    report.militaries.push(candidate.military_id);
}

/// Raise a new, empty military at an owned settlement.
///
/// Licensed-only kinds require the settlement to list the kind among the
/// ones it may create.
pub fn create_military(
    world: &mut World,
    architecture_id: u64,
    kind_id: u64,
    leader_id: Option<u64>,
) -> Result<u64, SimError> {
    let arch = world
        .architectures
        .get(&architecture_id)
        .ok_or(SimError::UnknownArchitecture(architecture_id))?;
    let kind = world
        .military_kinds
        .get(&kind_id)
        .ok_or(SimError::UnknownMilitaryKind(kind_id))?;
    if world.faction_of(architecture_id).is_none() {
        return Err(SimError::Unowned(architecture_id));
    }
    if kind.licensed_only && !arch.can_create(kind_id) {
        return Err(SimError::NotLicensed {
            architecture_id,
            kind_id,
        });
    }
    if let Some(person_id) = leader_id
        && !world.persons.contains_key(&person_id)
    {
        return Err(SimError::UnknownPerson(person_id));
    }

    let name = format!("{} {}", arch.name, kind.name);
    let (morale, combativity) = (kind.initial_morale, kind.initial_combativity);
    let id = world.id_gen.next_id();
    world.add_military(Military {
        id,
        name,
        architecture_id,
        leader_id,
        kind_id,
        quantity: 0,
        morale,
        combativity,
    });
    tracing::info!(architecture_id, kind_id, military_id = id, "military created");
    Ok(id)
}
