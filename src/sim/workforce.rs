use std::collections::BTreeMap;

use rand::RngCore;
use rand::seq::SliceRandom;

use crate::error::SimError;
use crate::model::{DevelopmentStat, WorkKind, World};

/// Active workers of one settlement, partitioned by assignment. Ids are in
/// ascending order within every group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workforce {
    pub mayor: Option<u64>,
    pub development: BTreeMap<DevelopmentStat, Vec<u64>>,
    pub recruit: Vec<u64>,
    pub training: Vec<u64>,
}

impl Workforce {
    /// Classify the persons resident at the settlement by work type.
    ///
    /// Persons in transit, on a move order, or without an assignment are left out.
    pub fn classify(world: &World, architecture_id: u64) -> Self {
        let mut workforce = Workforce::default();
        for person in world.persons.values() {
            if !person.is_resident_at(architecture_id) {
                continue;
            }
            match person.work {
                WorkKind::None => {}
                WorkKind::Mayor => {
                    // More than one is a governance problem and is reported there.
                    workforce.mayor.get_or_insert(person.id);
                }
                WorkKind::Recruit => workforce.recruit.push(person.id),
                WorkKind::Training => workforce.training.push(person.id),
                work => {
                    if let Some(stat) = work.development_stat() {
                        workforce.development.entry(stat).or_default().push(person.id);
                    }
                }
            }
        }
        workforce
    }

    pub fn development_workers(&self, stat: DevelopmentStat) -> &[u64] {
        self.development.get(&stat).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn development_count(&self) -> usize {
        self.development.values().map(Vec::len).sum()
    }

    fn remove(&mut self, person_id: u64) {
        for workers in self.development.values_mut() {
            workers.retain(|&id| id != person_id);
        }
        self.recruit.retain(|&id| id != person_id);
        self.training.retain(|&id| id != person_id);
    }
}

/// Outcome of paying the day's development workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payroll {
    /// Everyone was paid.
    Paid { charged: u32 },
    /// Some workers were furloughed so the rest could be paid.
    Reduced { charged: u32, furloughed: Vec<u64> },
    /// Not even one worker was affordable; development is skipped today.
    Skipped,
}

impl Payroll {
    pub fn charged(&self) -> u32 {
        match self {
            Payroll::Paid { charged } | Payroll::Reduced { charged, .. } => *charged,
            Payroll::Skipped => 0,
        }
    }

    pub fn furloughed(&self) -> &[u64] {
        match self {
            Payroll::Reduced { furloughed, .. } => furloughed,
            _ => &[],
        }
    }
}

/// Charge the settlement for its development workers, furloughing a random
/// subset when the fund cannot cover all of them.
///
/// The mayor is never part of the paid pool and is never furloughed.
pub fn pay_development_workers(
    world: &mut World,
    architecture_id: u64,
    workforce: &mut Workforce,
    cost_per_worker: u32,
    rng: &mut dyn RngCore,
) -> Result<Payroll, SimError> {
    let fund = world
        .architectures
        .get(&architecture_id)
        .ok_or(SimError::UnknownArchitecture(architecture_id))?
        .fund;

    let worker_count = workforce.development_count() as u64;
    let required = cost_per_worker as u64 * worker_count;

    let payroll = if required <= fund as u64 {
        Payroll::Paid {
            charged: required as u32,
        }
    } else {
        // cost_per_worker > 0 here, otherwise required would be 0.
        let affordable = (fund / cost_per_worker) as u64;
        if affordable < 1 {
            tracing::warn!(
                architecture_id,
                fund,
                cost_per_worker,
                "cannot pay any development worker, skipping development"
            );
            return Ok(Payroll::Skipped);
        }

        let mut pool: Vec<u64> = DevelopmentStat::ALL
            .iter()
            .flat_map(|&stat| workforce.development_workers(stat).iter().copied())
            .filter(|&id| Some(id) != workforce.mayor)
            .collect();
        pool.sort_unstable();
        pool.shuffle(rng);

        let excess = (worker_count - affordable) as usize;
        let furloughed: Vec<u64> = pool.into_iter().take(excess).collect();
        for &person_id in &furloughed {
            if let Some(person) = world.persons.get_mut(&person_id) {
                person.work = WorkKind::None;
            }
            workforce.remove(person_id);
        }
        tracing::debug!(
            architecture_id,
            furloughed = furloughed.len(),
            "furloughed development workers"
        );
        Payroll::Reduced {
            charged: (cost_per_worker as u64 * affordable) as u32,
            furloughed,
        }
    };

    if let Some(arch) = world.architectures.get_mut(&architecture_id) {
        arch.fund -= payroll.charged();
    }
    Ok(payroll)
}

/// Reset the given persons' assignments to `None`.
pub fn idle(world: &mut World, person_ids: &[u64]) {
    for id in person_ids {
        if let Some(person) = world.persons.get_mut(id) {
            person.work = WorkKind::None;
        }
    }
}
