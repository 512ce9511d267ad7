use rand::RngCore;

use super::config::EconomyConfig;
use crate::model::World;

/// Context passed to each system on every tick.
///
/// Bundled so we can add fields later without changing the `SimSystem`
/// trait signature.
pub struct TickContext<'a> {
    pub world: &'a mut World,
    pub rng: &'a mut dyn RngCore,
    pub config: &'a EconomyConfig,
}
