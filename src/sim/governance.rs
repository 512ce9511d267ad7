//! The "exactly one mayor" rule.
//!
//! Every change of a person's mayor assignment goes through this module. An
//! owned settlement with at least one resident has exactly one resident
//! mayor; an unowned or empty settlement has none.

use std::cmp::Reverse;

use crate::error::{GovernanceError, SimError};
use crate::model::{WorkKind, World};

/// Context of a mayor appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MayorTransition {
    /// Ordinary appointment; blocked while the faction leader is present.
    Appointment,
    /// The faction leader is leaving and hands the office to someone else.
    LeaderDeparting,
}

/// Make `person_id` the mayor of `architecture_id`, demoting any previous mayor.
pub fn assign_mayor(
    world: &mut World,
    architecture_id: u64,
    person_id: u64,
    transition: MayorTransition,
) -> Result<(), SimError> {
    if !world.architectures.contains_key(&architecture_id) {
        return Err(SimError::UnknownArchitecture(architecture_id));
    }
    let person = world
        .persons
        .get(&person_id)
        .ok_or(SimError::UnknownPerson(person_id))?;
    if !person.is_resident_at(architecture_id) {
        return Err(GovernanceError::NotResident {
            person_id,
            architecture_id,
        }
        .into());
    }
    if world.faction_of(architecture_id).is_none() {
        return Err(GovernanceError::Unowned { architecture_id }.into());
    }
    if let Some(leader_id) = world.faction_leader_at(architecture_id)
        && leader_id != person_id
        && transition != MayorTransition::LeaderDeparting
    {
        return Err(GovernanceError::LeaderPresent {
            architecture_id,
            leader_id,
        }
        .into());
    }

    clear_mayor(world, architecture_id);
    if let Some(person) = world.persons.get_mut(&person_id) {
        person.work = WorkKind::Mayor;
    }
    tracing::info!(architecture_id, person_id, "mayor appointed");
    Ok(())
}

/// Appoint a mayor if the settlement is owned, occupied, and has none.
///
/// The faction leader is preferred when present; otherwise the resident with
/// the highest total ability wins, lower id breaking ties. Returns the person
/// appointed, if any.
pub fn ensure_mayor(world: &mut World, architecture_id: u64) -> Result<Option<u64>, SimError> {
    ensure_mayor_with(world, architecture_id, MayorTransition::Appointment)
}

fn ensure_mayor_with(
    world: &mut World,
    architecture_id: u64,
    transition: MayorTransition,
) -> Result<Option<u64>, SimError> {
    if !world.architectures.contains_key(&architecture_id) {
        return Err(SimError::UnknownArchitecture(architecture_id));
    }
    if world.faction_of(architecture_id).is_none() {
        return Ok(None);
    }
    if has_exactly_one_mayor(world, architecture_id)? && world.mayor(architecture_id).is_some() {
        return Ok(None);
    }

    let candidate = world.faction_leader_at(architecture_id).or_else(|| {
        world
            .residents(architecture_id)
            .into_iter()
            .filter_map(|id| world.persons.get(&id))
            .max_by_key(|p| (p.abilities.total(), Reverse(p.id)))
            .map(|p| p.id)
    });

    match candidate {
        Some(person_id) => {
            assign_mayor(world, architecture_id, person_id, transition)?;
            Ok(Some(person_id))
        }
        None => Ok(None),
    }
}

/// `Ok(true)` for one mayor, `Ok(false)` for none; more than one is fatal.
pub fn has_exactly_one_mayor(world: &World, architecture_id: u64) -> Result<bool, GovernanceError> {
    let mayors = world.mayors(architecture_id);
    match mayors.len() {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(GovernanceError::MultipleMayors {
            architecture_id,
            mayors,
        }),
    }
}

/// Full invariant check for one settlement.
pub fn validate(world: &World, architecture_id: u64) -> Result<(), GovernanceError> {
    has_exactly_one_mayor(world, architecture_id)?;

    let owned = world.faction_of(architecture_id).is_some();
    let occupied = !world.residents(architecture_id).is_empty();
    let mayor = world.mayor(architecture_id).map(|p| p.id);

    match (owned && occupied, mayor) {
        (true, Some(_)) | (false, None) => Ok(()),
        (true, None) => Err(GovernanceError::MissingMayor { architecture_id }),
        (false, Some(person_id)) => Err(GovernanceError::UnexpectedMayor {
            architecture_id,
            person_id,
        }),
    }
}

/// Check every settlement in the world.
pub fn validate_all(world: &World) -> Result<(), GovernanceError> {
    world
        .architectures
        .keys()
        .try_for_each(|&id| validate(world, id))
}

/// Demote everyone holding the mayor assignment at the settlement.
fn clear_mayor(world: &mut World, architecture_id: u64) {
    for person_id in world.mayors(architecture_id) {
        if let Some(person) = world.persons.get_mut(&person_id) {
            person.work = WorkKind::None;
        }
    }
}

/// Place a person at a settlement. An arriving faction leader takes over as
/// mayor; otherwise a mayor is appointed only if the office is vacant. A
/// settlement the person moved away from directly gets a successor as well.
pub fn person_arrive(
    world: &mut World,
    person_id: u64,
    architecture_id: u64,
) -> Result<Option<u64>, SimError> {
    if !world.architectures.contains_key(&architecture_id) {
        return Err(SimError::UnknownArchitecture(architecture_id));
    }
    let person = world
        .persons
        .get_mut(&person_id)
        .ok_or(SimError::UnknownPerson(person_id))?;
    let from = person.location.replace(architecture_id);
    person.moving = false;
    person.work = WorkKind::None;

    if let Some(origin) = from
        && origin != architecture_id
    {
        refill_vacated(world, origin, person_id)?;
    }

    if world.faction_leader_at(architecture_id) == Some(person_id) {
        assign_mayor(world, architecture_id, person_id, MayorTransition::Appointment)?;
        return Ok(Some(person_id));
    }
    ensure_mayor(world, architecture_id)
}

/// Send a person into transit. If they were mayor, a successor is chosen.
pub fn person_depart(world: &mut World, person_id: u64) -> Result<Option<u64>, SimError> {
    let person = world
        .persons
        .get_mut(&person_id)
        .ok_or(SimError::UnknownPerson(person_id))?;
    let from = person.location.take();
    person.moving = true;
    person.work = WorkKind::None;

    match from {
        Some(architecture_id) => refill_vacated(world, architecture_id, person_id),
        None => Ok(None),
    }
}

/// Restore the mayor of a settlement `person_id` has just left.
fn refill_vacated(
    world: &mut World,
    architecture_id: u64,
    person_id: u64,
) -> Result<Option<u64>, SimError> {
    let was_leader = world
        .faction_of(architecture_id)
        .and_then(|f| f.leader_id)
        == Some(person_id);
    let transition = if was_leader {
        MayorTransition::LeaderDeparting
    } else {
        MayorTransition::Appointment
    };
    ensure_mayor_with(world, architecture_id, transition)
}

/// Hand a settlement to another section (or leave it unowned) and restore
/// the mayor invariant for the new owner.
pub fn transfer_architecture(
    world: &mut World,
    architecture_id: u64,
    section_id: Option<u64>,
) -> Result<Option<u64>, SimError> {
    if let Some(section_id) = section_id
        && !world.sections.contains_key(&section_id)
    {
        return Err(SimError::UnknownSection(section_id));
    }
    let arch = world
        .architectures
        .get_mut(&architecture_id)
        .ok_or(SimError::UnknownArchitecture(architecture_id))?;
    arch.section_id = section_id;

    clear_mayor(world, architecture_id);
    ensure_mayor(world, architecture_id)
}
