pub mod error;
pub mod flush;
pub mod id;
pub mod model;
pub mod record;
pub mod scenario;
pub mod scripting;
pub mod sim;

pub use error::{GovernanceError, PersistenceError, SimError};
pub use id::IdGenerator;
pub use model::{
    Abilities, Architecture, ArchitectureKind, Development, DevelopmentStat, Faction, GameDate,
    Military, MilitaryKind, Person, Point, Section, WorkKind, World,
};
pub use scripting::{ArchitectureScript, ScriptView};
