use rand::RngCore;

use super::config::EconomyConfig;
use super::development::{self, Income};
use super::governance;
use super::recruitment::{self, RecruitmentReport};
use super::training::{self, TrainingReport};
use super::workforce::{Payroll, Workforce, pay_development_workers};
use crate::error::SimError;
use crate::model::{GameDate, World};

/// Everything that happened to one settlement during one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayReport {
    pub architecture_id: u64,
    pub date: GameDate,
    /// Set when governance had to appoint a mayor before the day could run.
    pub mayor_appointed: Option<u64>,
    pub payroll: Payroll,
    /// Present on the first day of a month.
    pub income: Option<Income>,
    pub recruitment: RecruitmentReport,
    pub training: TrainingReport,
}

impl DayReport {
    /// Development work was cancelled for lack of fund.
    pub fn development_skipped(&self) -> bool {
        self.payroll == Payroll::Skipped
    }

    pub fn furloughed(&self) -> &[u64] {
        self.payroll.furloughed()
    }
}

/// Run one settlement through one day.
///
/// Order: governance check, decay, payroll and growth, monthly income on
/// the first of the month, recruitment, training, governance check again.
pub fn advance_day(
    world: &mut World,
    architecture_id: u64,
    date: GameDate,
    rng: &mut dyn RngCore,
    config: &EconomyConfig,
) -> Result<DayReport, SimError> {
    if !world.architectures.contains_key(&architecture_id) {
        return Err(SimError::UnknownArchitecture(architecture_id));
    }

    let mayor_appointed = governance::ensure_mayor(world, architecture_id)?;
    governance::validate(world, architecture_id)?;

    development::decay(world, architecture_id, config)?;

    let mut workforce = Workforce::classify(world, architecture_id);
    let payroll = pay_development_workers(
        world,
        architecture_id,
        &mut workforce,
        config.worker_daily_cost,
        rng,
    )?;
    if payroll != Payroll::Skipped {
        development::grow(world, architecture_id, &workforce, config)?;
    }

    let income = if date.is_month_start() {
        Some(development::monthly_income(world, architecture_id, config)?)
    } else {
        None
    };

    let recruitment = recruitment::recruit(world, architecture_id, &workforce, config)?;
    // Recruitment may have idled people; training sees the current state.
    let workforce = Workforce::classify(world, architecture_id);
    let training = training::train(world, architecture_id, &workforce, config)?;

    governance::validate(world, architecture_id)?;

    let report = DayReport {
        architecture_id,
        date,
        mayor_appointed,
        payroll,
        income,
        recruitment,
        training,
    };
    tracing::debug!(
        architecture_id,
        %date,
        charged = report.payroll.charged(),
        furloughed = report.furloughed().len(),
        recruited = report.recruitment.recruited,
        trained = report.training.militaries.len(),
        "day advanced"
    );
    Ok(report)
}
