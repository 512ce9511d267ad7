use serde::{Deserialize, Serialize};

use super::architecture::DevelopmentStat;

/// What a person is currently assigned to do at their settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum WorkKind {
    #[default]
    None,
    Mayor,
    Agriculture,
    Commerce,
    Technology,
    Endurance,
    Morale,
    Recruit,
    Training,
}

string_enum!(WorkKind {
    None => "none",
    Mayor => "mayor",
    Agriculture => "agriculture",
    Commerce => "commerce",
    Technology => "technology",
    Endurance => "endurance",
    Morale => "morale",
    Recruit => "recruit",
    Training => "training",
});

impl WorkKind {
    /// The development stat this work raises, if it is development work.
    pub fn development_stat(self) -> Option<DevelopmentStat> {
        match self {
            WorkKind::Agriculture => Some(DevelopmentStat::Agriculture),
            WorkKind::Commerce => Some(DevelopmentStat::Commerce),
            WorkKind::Technology => Some(DevelopmentStat::Technology),
            WorkKind::Endurance => Some(DevelopmentStat::Endurance),
            WorkKind::Morale => Some(DevelopmentStat::Morale),
            _ => None,
        }
    }
}

impl From<DevelopmentStat> for WorkKind {
    fn from(stat: DevelopmentStat) -> Self {
        match stat {
            DevelopmentStat::Agriculture => WorkKind::Agriculture,
            DevelopmentStat::Commerce => WorkKind::Commerce,
            DevelopmentStat::Technology => WorkKind::Technology,
            DevelopmentStat::Endurance => WorkKind::Endurance,
            DevelopmentStat::Morale => WorkKind::Morale,
        }
    }
}

/// Per-domain ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Abilities {
    pub agriculture: u32,
    pub commerce: u32,
    pub technology: u32,
    pub endurance: u32,
    pub morale: u32,
    pub recruit: u32,
    pub training: u32,
}

impl Abilities {
    pub fn uniform(value: u32) -> Self {
        Self {
            agriculture: value,
            commerce: value,
            technology: value,
            endurance: value,
            morale: value,
            recruit: value,
            training: value,
        }
    }

    pub fn development(&self, stat: DevelopmentStat) -> u32 {
        match stat {
            DevelopmentStat::Agriculture => self.agriculture,
            DevelopmentStat::Commerce => self.commerce,
            DevelopmentStat::Technology => self.technology,
            DevelopmentStat::Endurance => self.endurance,
            DevelopmentStat::Morale => self.morale,
        }
    }

    /// Sum over every domain; used to rank mayor candidates.
    /// Sum of every domain, widened so loaded scores cannot overflow.
    pub fn total(&self) -> u64 {
        [
            self.agriculture,
            self.commerce,
            self.technology,
            self.endurance,
            self.morale,
            self.recruit,
            self.training,
        ]
        .into_iter()
        .map(u64::from)
        .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    /// Settlement the person is staying in; `None` while travelling.
    pub location: Option<u64>,
    /// Set while a move order is in progress, even before leaving the city.
    #[serde(default)]
    pub moving: bool,
    #[serde(default)]
    pub work: WorkKind,
    pub abilities: Abilities,
}

impl Person {
    pub fn new(id: u64, name: impl Into<String>, abilities: Abilities) -> Self {
        Self {
            id,
            name: name.into(),
            location: None,
            moving: false,
            work: WorkKind::None,
            abilities,
        }
    }

    /// Staying at `architecture_id` and not on the move.
    pub fn is_resident_at(&self, architecture_id: u64) -> bool {
        self.location == Some(architecture_id) && !self.moving
    }

    pub fn is_mayor(&self) -> bool {
        self.work == WorkKind::Mayor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_person_is_not_resident() {
        let mut p = Person::new(1, "Xun Yu", Abilities::uniform(80));
        p.location = Some(3);
        assert!(p.is_resident_at(3));
        p.moving = true;
        assert!(!p.is_resident_at(3));
    }

    #[test]
    fn development_work_maps_to_stat() {
        for &stat in DevelopmentStat::ALL {
            assert_eq!(WorkKind::from(stat).development_stat(), Some(stat));
        }
        assert_eq!(WorkKind::Mayor.development_stat(), None);
        assert_eq!(WorkKind::Recruit.development_stat(), None);
    }

    #[test]
    fn work_kind_serializes_as_string() {
        assert_eq!(
            serde_json::to_string(&WorkKind::Recruit).unwrap(),
            "\"recruit\""
        );
        let back: WorkKind = serde_json::from_str("\"mayor\"").unwrap();
        assert_eq!(back, WorkKind::Mayor);
        assert!(serde_json::from_str::<WorkKind>("\"fishing\"").is_err());
    }

    #[test]
    fn total_ability_sums_domains() {
        let a = Abilities {
            agriculture: 1,
            commerce: 2,
            technology: 3,
            endurance: 4,
            morale: 5,
            recruit: 6,
            training: 7,
        };
        assert_eq!(a.total(), 28);
    }

    #[test]
    fn total_ability_does_not_overflow() {
        let a = Abilities::uniform(u32::MAX);
        assert_eq!(a.total(), 7 * u64::from(u32::MAX));
    }

    #[test]
    fn mayor_work_marks_the_mayor() {
        let mut p = Person::new(1, "Xun Yu", Abilities::uniform(80));
        assert!(!p.is_mayor());
        p.work = WorkKind::Mayor;
        assert!(p.is_mayor());
    }
}
