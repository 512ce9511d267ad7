mod config;
mod context;
mod day;
mod development;
mod diminishing;
pub mod governance;
mod recruitment;
mod runner;
mod session;
mod system;
mod training;
mod workforce;

pub use config::EconomyConfig;
pub use context::TickContext;
pub use day::{DayReport, advance_day};
pub use development::{Income, decay, grow, monthly_income};
pub use diminishing::{diminishing_growth, diminishing_sum};
pub use governance::{
    MayorTransition, assign_mayor, ensure_mayor, has_exactly_one_mayor, person_arrive,
    person_depart, transfer_architecture, validate, validate_all,
};
pub use recruitment::{RecruitmentReport, create_military, recruit};
pub use runner::{SimConfig, dispatch_systems, run, should_fire};
pub use session::{ArchitectureSystem, SimSession};
pub use system::{SimSystem, TickFrequency};
pub use training::{TrainingReport, train};
pub use workforce::{Payroll, Workforce, idle, pay_development_workers};
