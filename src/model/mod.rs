#[macro_use]
mod macros;

pub mod architecture;
pub mod date;
pub mod faction;
pub mod military;
pub mod person;
pub mod world;

pub use architecture::{Architecture, ArchitectureKind, Development, DevelopmentStat, Point};
pub use date::GameDate;
pub use faction::{Faction, Section};
pub use military::{Military, MilitaryKind};
pub use person::{Abilities, Person, WorkKind};
pub use world::World;
