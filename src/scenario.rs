use std::collections::BTreeMap;

use crate::model::*;

/// Stat cap of the architecture kind every [`Scenario`] starts with.
pub const DEFAULT_KIND_CAP: f64 = 1000.0;

/// Fluent builder for small worlds, used by tests and tooling.
///
/// Every entity gets its id from the world's id generator, so ids are
/// increasing in creation order.
pub struct Scenario {
    world: World,
    default_kind: u64,
    /// First section created for each faction.
    home_sections: BTreeMap<u64, u64>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario {
    pub fn new() -> Self {
        let mut world = World::new();
        let default_kind = world.id_gen.next_id();
        world.add_architecture_kind(ArchitectureKind {
            id: default_kind,
            name: "city".to_string(),
            caps: Development::uniform(DEFAULT_KIND_CAP),
            max_fund: 100_000,
            max_food: 100_000,
        });
        Self {
            world,
            default_kind,
            home_sections: BTreeMap::new(),
        }
    }

    pub fn default_kind(&self) -> u64 {
        self.default_kind
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn build(self) -> World {
        self.world
    }

    // -- Factions and sections --

    /// Add a leaderless faction with one section. Returns the faction id.
    pub fn add_faction(&mut self, name: &str) -> u64 {
        let id = self.world.id_gen.next_id();
        self.world.add_faction(Faction {
            id,
            name: name.to_string(),
            leader_id: None,
        });
        let section = self.add_section(id, &format!("{name} Central"));
        self.home_sections.insert(id, section);
        id
    }

    pub fn add_section(&mut self, faction_id: u64, name: &str) -> u64 {
        let id = self.world.id_gen.next_id();
        self.world.add_section(Section {
            id,
            name: name.to_string(),
            faction_id,
        })
    }

    pub fn home_section(&self, faction_id: u64) -> Option<u64> {
        self.home_sections.get(&faction_id).copied()
    }

    pub fn set_leader(&mut self, faction_id: u64, person_id: u64) {
        if let Some(faction) = self.world.factions.get_mut(&faction_id) {
            faction.leader_id = Some(person_id);
        }
    }

    pub fn add_architecture_kind(&mut self, name: &str, cap: f64, max_fund: u32, max_food: u32) -> u64 {
        let id = self.world.id_gen.next_id();
        self.world.add_architecture_kind(ArchitectureKind {
            id,
            name: name.to_string(),
            caps: Development::uniform(cap),
            max_fund,
            max_food,
        })
    }

    // -- Entities --

    pub fn architecture(&mut self, name: &str) -> ArchitectureRef<'_> {
        let id = self.world.id_gen.next_id();
        let index = self.world.architectures.len() as i32;
        self.world.add_architecture(Architecture::new(
            id,
            name,
            self.default_kind,
            Point::new(index * 10, index * 10),
        ));
        ArchitectureRef { scenario: self, id }
    }

    pub fn architecture_mut(&mut self, id: u64) -> ArchitectureRef<'_> {
        ArchitectureRef { scenario: self, id }
    }

    pub fn person(&mut self, name: &str) -> PersonRef<'_> {
        let id = self.world.id_gen.next_id();
        self.world
            .add_person(Person::new(id, name, Abilities::uniform(50)));
        PersonRef { scenario: self, id }
    }

    pub fn person_mut(&mut self, id: u64) -> PersonRef<'_> {
        PersonRef { scenario: self, id }
    }

    pub fn military_kind(&mut self, name: &str) -> MilitaryKindRef<'_> {
        let id = self.world.id_gen.next_id();
        self.world.add_military_kind(MilitaryKind {
            id,
            ai_tags: String::new(),
            name: name.to_string(),
            base_cost: 10,
            cost_reduction_per_technology: 0.0,
            unit_quantity: 100,
            max_quantity: 10_000,
            max_morale: 100.0,
            max_combativity: 100.0,
            initial_morale: 30.0,
            initial_combativity: 30.0,
            licensed_only: false,
        });
        MilitaryKindRef { scenario: self, id }
    }

    pub fn military(&mut self, name: &str, architecture_id: u64, kind_id: u64) -> MilitaryRef<'_> {
        let id = self.world.id_gen.next_id();
        self.world.add_military(Military {
            id,
            name: name.to_string(),
            architecture_id,
            leader_id: None,
            kind_id,
            quantity: 0,
            morale: 30.0,
            combativity: 30.0,
        });
        MilitaryRef { scenario: self, id }
    }
}

// -- Builder-style ref types --

pub struct ArchitectureRef<'a> {
    scenario: &'a mut Scenario,
    id: u64,
}

impl ArchitectureRef<'_> {
    fn data_mut(&mut self) -> &mut Architecture {
        self.scenario
            .world
            .architectures
            .get_mut(&self.id)
            .expect("architecture created by scenario")
    }

    pub fn population(mut self, v: u32) -> Self { self.data_mut().population = v; self }
    pub fn fund(mut self, v: u32) -> Self { self.data_mut().fund = v; self }
    pub fn food(mut self, v: u32) -> Self { self.data_mut().food = v; self }
    pub fn kind(mut self, v: u64) -> Self { self.data_mut().kind_id = v; self }
    pub fn ai_tags(mut self, v: &str) -> Self { self.data_mut().ai_tags = v.to_string(); self }
    pub fn stat(mut self, stat: DevelopmentStat, v: f64) -> Self { *self.data_mut().development.get_mut(stat) = v; self }
    pub fn development(mut self, v: f64) -> Self { self.data_mut().development = Development::uniform(v); self }
    pub fn tile(mut self, x: i32, y: i32) -> Self { self.data_mut().locations.push(Point::new(x, y)); self }
    pub fn connect_to(mut self, other: u64) -> Self { self.data_mut().connected.insert(other); self }
    pub fn licensed_for(mut self, kind_id: u64) -> Self { self.data_mut().creatable_military_kinds.push(kind_id); self }
    pub fn section(mut self, section_id: u64) -> Self { self.data_mut().section_id = Some(section_id); self }

    /// Hand the settlement to the faction's home section.
    pub fn owned_by(mut self, faction_id: u64) -> Self {
        let section = self.scenario.home_section(faction_id);
        self.data_mut().section_id = section;
        self
    }

    /// Escape hatch: apply an arbitrary closure to the architecture.
    pub fn with(mut self, f: impl FnOnce(&mut Architecture)) -> Self { f(self.data_mut()); self }

    pub fn id(self) -> u64 { self.id }
}

pub struct PersonRef<'a> {
    scenario: &'a mut Scenario,
    id: u64,
}

impl PersonRef<'_> {
    fn data_mut(&mut self) -> &mut Person {
        self.scenario
            .world
            .persons
            .get_mut(&self.id)
            .expect("person created by scenario")
    }

    pub fn at(mut self, architecture_id: u64) -> Self { self.data_mut().location = Some(architecture_id); self }
    pub fn work(mut self, v: WorkKind) -> Self { self.data_mut().work = v; self }
    pub fn moving(mut self, v: bool) -> Self { self.data_mut().moving = v; self }
    pub fn abilities(mut self, v: Abilities) -> Self { self.data_mut().abilities = v; self }
    pub fn ability(mut self, v: u32) -> Self { self.data_mut().abilities = Abilities::uniform(v); self }
    pub fn recruit(mut self, v: u32) -> Self { self.data_mut().abilities.recruit = v; self }
    pub fn training(mut self, v: u32) -> Self { self.data_mut().abilities.training = v; self }

    /// Make this person the leader of `faction_id`.
    pub fn leads(mut self, faction_id: u64) -> Self {
        let id = self.id;
        self.scenario.set_leader(faction_id, id);
        self
    }

    pub fn with(mut self, f: impl FnOnce(&mut Person)) -> Self { f(self.data_mut()); self }

    pub fn id(self) -> u64 { self.id }
}

pub struct MilitaryKindRef<'a> {
    scenario: &'a mut Scenario,
    id: u64,
}

impl MilitaryKindRef<'_> {
    fn data_mut(&mut self) -> &mut MilitaryKind {
        self.scenario
            .world
            .military_kinds
            .get_mut(&self.id)
            .expect("military kind created by scenario")
    }

    pub fn cost(mut self, v: u32) -> Self { self.data_mut().base_cost = v; self }
    pub fn unit_quantity(mut self, v: u32) -> Self { self.data_mut().unit_quantity = v; self }
    pub fn max_quantity(mut self, v: u32) -> Self { self.data_mut().max_quantity = v; self }
    pub fn licensed_only(mut self) -> Self { self.data_mut().licensed_only = true; self }
    pub fn with(mut self, f: impl FnOnce(&mut MilitaryKind)) -> Self { f(self.data_mut()); self }

    pub fn id(self) -> u64 { self.id }
}

pub struct MilitaryRef<'a> {
    scenario: &'a mut Scenario,
    id: u64,
}

impl MilitaryRef<'_> {
    fn data_mut(&mut self) -> &mut Military {
        self.scenario
            .world
            .militaries
            .get_mut(&self.id)
            .expect("military created by scenario")
    }

    pub fn leader(mut self, person_id: u64) -> Self { self.data_mut().leader_id = Some(person_id); self }
    pub fn quantity(mut self, v: u32) -> Self { self.data_mut().quantity = v; self }
    pub fn morale(mut self, v: f64) -> Self { self.data_mut().morale = v; self }
    pub fn combativity(mut self, v: f64) -> Self { self.data_mut().combativity = v; self }

    pub fn id(self) -> u64 { self.id }
}
