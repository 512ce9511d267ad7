use serde::{Deserialize, Serialize};

use super::architecture::Architecture;

/// Static template for a troop type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilitaryKind {
    pub id: u64,
    #[serde(default)]
    pub ai_tags: String,
    pub name: String,
    pub base_cost: u32,
    /// Fund saved per point of settlement technology.
    #[serde(default)]
    pub cost_reduction_per_technology: f64,
    /// Soldiers per unit; training gains are spread over units.
    pub unit_quantity: u32,
    pub max_quantity: u32,
    pub max_morale: f64,
    pub max_combativity: f64,
    pub initial_morale: f64,
    pub initial_combativity: f64,
    /// Only settlements listing this kind may create it.
    #[serde(default)]
    pub licensed_only: bool,
}

impl MilitaryKind {
    /// Fund needed for one recruitment batch at `architecture`; never below 1.
    pub fn cost(&self, architecture: &Architecture) -> u32 {
        let reduced = self.base_cost as f64
            - architecture.development.technology * self.cost_reduction_per_technology;
        reduced.round().max(1.0) as u32
    }

    /// Number of units a military of this kind with `quantity` soldiers forms.
    pub fn units(&self, quantity: u32) -> u32 {
        quantity.div_ceil(self.unit_quantity.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Military {
    pub id: u64,
    pub name: String,
    pub architecture_id: u64,
    pub leader_id: Option<u64>,
    pub kind_id: u64,
    pub quantity: u32,
    pub morale: f64,
    pub combativity: f64,
}

impl Military {
    /// Room left before the kind's quantity cap.
    pub fn room(&self, kind: &MilitaryKind) -> u32 {
        kind.max_quantity.saturating_sub(self.quantity)
    }

    pub fn is_recruitable(&self, kind: &MilitaryKind) -> bool {
        self.quantity < kind.max_quantity
    }

    pub fn is_trainable(&self, kind: &MilitaryKind) -> bool {
        self.quantity > 0
            && (self.combativity < kind.max_combativity || self.morale < kind.max_morale)
    }

    pub fn add_quantity(&mut self, amount: u32, kind: &MilitaryKind) {
        self.quantity = (self.quantity + amount).min(kind.max_quantity);
    }

    pub fn add_morale(&mut self, delta: f64, kind: &MilitaryKind) {
        self.morale = (self.morale + delta).clamp(0.0, kind.max_morale);
    }

    pub fn add_combativity(&mut self, delta: f64, kind: &MilitaryKind) {
        self.combativity = (self.combativity + delta).clamp(0.0, kind.max_combativity);
    }
}
