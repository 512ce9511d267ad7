use serde::{Deserialize, Serialize};

/// Tunable constants of the daily settlement economy.
///
/// Every missing field falls back to its default when read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Fund charged per development worker per day.
    pub worker_daily_cost: u32,
    /// Amount each development stat loses per day.
    pub daily_decay: f64,
    /// Weight applied to the mayor's ability in every aggregate.
    pub mayor_efficiency: f64,
    /// Weight applied to a military leader's own ability.
    pub leader_efficiency: f64,
    /// Geometric falloff of the i-th strongest contributor (0 < factor < 1).
    pub diminishing_factor: f64,
    /// Aggregated ability at which growth closes half the gap to the cap.
    pub growth_half_saturation: f64,

    pub commerce_income: f64,
    pub population_fund_income: f64,
    pub agriculture_income: f64,
    pub population_food_income: f64,

    /// Multiplier on `MilitaryKind::cost` when recruiting.
    pub recruit_cost_factor: f64,
    pub recruit_morale_delta: f64,
    pub recruit_combativity_delta: f64,

    /// Morale gained per point of combativity gained in training.
    pub training_morale_factor: f64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            worker_daily_cost: 10,
            daily_decay: 0.2,
            mayor_efficiency: 0.5,
            leader_efficiency: 0.3,
            diminishing_factor: 0.8,
            growth_half_saturation: 5000.0,
            commerce_income: 1.0,
            population_fund_income: 0.01,
            agriculture_income: 1.5,
            population_food_income: 0.02,
            recruit_cost_factor: 1.0,
            recruit_morale_delta: -1.0,
            recruit_combativity_delta: -1.0,
            training_morale_factor: 0.5,
        }
    }
}

impl EconomyConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EconomyConfig::from_json(r#"{"worker_daily_cost": 25}"#).unwrap();
        assert_eq!(config.worker_daily_cost, 25);
        assert_eq!(config.daily_decay, EconomyConfig::default().daily_decay);
    }

    #[test]
    fn default_factor_is_diminishing() {
        let config = EconomyConfig::default();
        assert!(config.diminishing_factor > 0.0 && config.diminishing_factor < 1.0);
    }
}
