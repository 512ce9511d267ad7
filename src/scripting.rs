//! What an AI script may see and touch of a settlement.
//!
//! Scripts get an [`ArchitectureScript`] handle rather than the entity
//! itself, so the only writable field is the AI tag string.

use crate::error::SimError;
use crate::model::{DevelopmentStat, World};

pub trait ArchitectureScript {
    fn id(&self) -> u64;
    fn name(&self) -> &str;
    fn ai_tags(&self) -> &str;
    fn population(&self) -> u32;
    fn fund(&self) -> u32;
    fn food(&self) -> u32;
    fn development(&self, stat: DevelopmentStat) -> f64;
    /// Directly connected settlements, either side listing the other.
    fn connected(&self) -> Vec<u64>;
    fn mayor(&self) -> Option<u64>;

    fn set_ai_tags(&mut self, tags: &str);
}

/// Script handle for one settlement of a borrowed world.
pub struct ScriptView<'a> {
    world: &'a mut World,
    architecture_id: u64,
}

impl<'a> ScriptView<'a> {
    pub fn new(world: &'a mut World, architecture_id: u64) -> Result<Self, SimError> {
        if !world.architectures.contains_key(&architecture_id) {
            return Err(SimError::UnknownArchitecture(architecture_id));
        }
        Ok(Self {
            world,
            architecture_id,
        })
    }

    fn arch(&self) -> &crate::model::Architecture {
        &self.world.architectures[&self.architecture_id]
    }
}

impl ArchitectureScript for ScriptView<'_> {
    fn id(&self) -> u64 {
        self.architecture_id
    }

    fn name(&self) -> &str {
        &self.arch().name
    }

    fn ai_tags(&self) -> &str {
        &self.arch().ai_tags
    }

    fn population(&self) -> u32 {
        self.arch().population
    }

    fn fund(&self) -> u32 {
        self.arch().fund
    }

    fn food(&self) -> u32 {
        self.arch().food
    }

    fn development(&self, stat: DevelopmentStat) -> f64 {
        self.arch().development.get(stat)
    }

    fn connected(&self) -> Vec<u64> {
        self.world
            .neighbours(self.architecture_id)
            .into_iter()
            .collect()
    }

    fn mayor(&self) -> Option<u64> {
        self.world.mayor(self.architecture_id).map(|p| p.id)
    }

    fn set_ai_tags(&mut self, tags: &str) {
        if let Some(arch) = self.world.architectures.get_mut(&self.architecture_id) {
            arch.ai_tags = tags.to_string();
        }
    }
}
