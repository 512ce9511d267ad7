use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::architecture::{Architecture, ArchitectureKind};
use super::date::GameDate;
use super::faction::{Faction, Section};
use super::military::{Military, MilitaryKind};
use super::person::Person;
use crate::id::IdGenerator;

/// Id-keyed arena holding every entity of a scenario.
///
/// Cross-entity relations are stored as ids and resolved through the maps
/// here; no entity owns another.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    pub factions: BTreeMap<u64, Faction>,
    pub sections: BTreeMap<u64, Section>,
    pub architecture_kinds: BTreeMap<u64, ArchitectureKind>,
    pub architectures: BTreeMap<u64, Architecture>,
    pub persons: BTreeMap<u64, Person>,
    pub military_kinds: BTreeMap<u64, MilitaryKind>,
    pub militaries: BTreeMap<u64, Military>,
    pub id_gen: IdGenerator,
    pub current_date: GameDate,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Insertion (scenario load) --

    pub fn add_faction(&mut self, faction: Faction) -> u64 {
        let id = faction.id;
        self.id_gen.reserve(id);
        self.factions.insert(id, faction);
        id
    }

    pub fn add_section(&mut self, section: Section) -> u64 {
        let id = section.id;
        self.id_gen.reserve(id);
        self.sections.insert(id, section);
        id
    }

    pub fn add_architecture_kind(&mut self, kind: ArchitectureKind) -> u64 {
        let id = kind.id;
        self.architecture_kinds.insert(id, kind);
        id
    }

    pub fn add_architecture(&mut self, architecture: Architecture) -> u64 {
        let id = architecture.id;
        self.id_gen.reserve(id);
        self.architectures.insert(id, architecture);
        id
    }

    pub fn add_person(&mut self, person: Person) -> u64 {
        let id = person.id;
        self.id_gen.reserve(id);
        self.persons.insert(id, person);
        id
    }

    pub fn add_military_kind(&mut self, kind: MilitaryKind) -> u64 {
        let id = kind.id;
        self.military_kinds.insert(id, kind);
        id
    }

    pub fn add_military(&mut self, military: Military) -> u64 {
        let id = military.id;
        self.id_gen.reserve(id);
        self.militaries.insert(id, military);
        id
    }

    // -- Ownership queries --

    pub fn section_of(&self, architecture_id: u64) -> Option<&Section> {
        let section_id = self.architectures.get(&architecture_id)?.section_id?;
        self.sections.get(&section_id)
    }

    pub fn faction_of(&self, architecture_id: u64) -> Option<&Faction> {
        let section = self.section_of(architecture_id)?;
        self.factions.get(&section.faction_id)
    }

    pub fn architecture_kind_of(&self, architecture_id: u64) -> Option<&ArchitectureKind> {
        let kind_id = self.architectures.get(&architecture_id)?.kind_id;
        self.architecture_kinds.get(&kind_id)
    }

    pub fn architectures_of_section(&self, section_id: u64) -> Vec<u64> {
        self.architectures
            .values()
            .filter(|a| a.section_id == Some(section_id))
            .map(|a| a.id)
            .collect()
    }

    pub fn architectures_of_faction(&self, faction_id: u64) -> Vec<u64> {
        self.architectures
            .values()
            .filter(|a| {
                a.section_id
                    .and_then(|s| self.sections.get(&s))
                    .is_some_and(|s| s.faction_id == faction_id)
            })
            .map(|a| a.id)
            .collect()
    }

    // -- Residents --

    /// Persons staying at the settlement and not on the move, in id order.
    pub fn residents(&self, architecture_id: u64) -> Vec<u64> {
        self.persons
            .values()
            .filter(|p| p.is_resident_at(architecture_id))
            .map(|p| p.id)
            .collect()
    }

    /// Everyone holding the mayor assignment at this settlement, resident or not.
    pub fn mayors(&self, architecture_id: u64) -> Vec<u64> {
        self.persons
            .values()
            .filter(|p| p.location == Some(architecture_id) && p.is_mayor())
            .map(|p| p.id)
            .collect()
    }

    pub fn mayor(&self, architecture_id: u64) -> Option<&Person> {
        self.persons
            .values()
            .find(|p| p.is_resident_at(architecture_id) && p.is_mayor())
    }

    /// The owning faction's leader, if they are resident at the settlement.
    pub fn faction_leader_at(&self, architecture_id: u64) -> Option<u64> {
        let leader_id = self.faction_of(architecture_id)?.leader_id?;
        self.persons
            .get(&leader_id)
            .filter(|p| p.is_resident_at(architecture_id))
            .map(|p| p.id)
    }

    pub fn militaries_at(&self, architecture_id: u64) -> Vec<u64> {
        self.militaries
            .values()
            .filter(|m| m.architecture_id == architecture_id)
            .map(|m| m.id)
            .collect()
    }

    /// Whether the military's leader is resident where the military is.
    pub fn leader_present(&self, military: &Military) -> bool {
        military
            .leader_id
            .and_then(|id| self.persons.get(&id))
            .is_some_and(|p| p.is_resident_at(military.architecture_id))
    }

    // -- Adjacency --

    /// Undirected adjacency: either side listing the other counts.
    pub fn are_connected(&self, a: u64, b: u64) -> bool {
        if a == b {
            return false;
        }
        let lists = |from: u64, to: u64| {
            self.architectures
                .get(&from)
                .is_some_and(|arch| arch.connected.contains(&to))
        };
        lists(a, b) || lists(b, a)
    }

    pub fn neighbours(&self, architecture_id: u64) -> BTreeSet<u64> {
        let mut result: BTreeSet<u64> = self
            .architectures
            .get(&architecture_id)
            .map(|a| a.connected.clone())
            .unwrap_or_default();
        result.extend(
            self.architectures
                .values()
                .filter(|a| a.connected.contains(&architecture_id))
                .map(|a| a.id),
        );
        result.remove(&architecture_id);
        result
    }
}
