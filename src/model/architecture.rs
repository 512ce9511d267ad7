use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A map tile coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The five internal development statistics of a settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DevelopmentStat {
    Agriculture,
    Commerce,
    Technology,
    Endurance,
    Morale,
}

string_enum!(DevelopmentStat {
    Agriculture => "agriculture",
    Commerce => "commerce",
    Technology => "technology",
    Endurance => "endurance",
    Morale => "morale",
});

/// One value per [`DevelopmentStat`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Development {
    pub agriculture: f64,
    pub commerce: f64,
    pub technology: f64,
    pub endurance: f64,
    pub morale: f64,
}

impl Development {
    pub fn uniform(value: f64) -> Self {
        Self {
            agriculture: value,
            commerce: value,
            technology: value,
            endurance: value,
            morale: value,
        }
    }

    pub fn get(&self, stat: DevelopmentStat) -> f64 {
        match stat {
            DevelopmentStat::Agriculture => self.agriculture,
            DevelopmentStat::Commerce => self.commerce,
            DevelopmentStat::Technology => self.technology,
            DevelopmentStat::Endurance => self.endurance,
            DevelopmentStat::Morale => self.morale,
        }
    }

    pub fn get_mut(&mut self, stat: DevelopmentStat) -> &mut f64 {
        match stat {
            DevelopmentStat::Agriculture => &mut self.agriculture,
            DevelopmentStat::Commerce => &mut self.commerce,
            DevelopmentStat::Technology => &mut self.technology,
            DevelopmentStat::Endurance => &mut self.endurance,
            DevelopmentStat::Morale => &mut self.morale,
        }
    }
}

/// Static template shared by settlements of the same kind (village, city, pass...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureKind {
    pub id: u64,
    pub name: String,
    /// Upper bound for each development stat.
    pub caps: Development,
    pub max_fund: u32,
    pub max_food: u32,
}

impl ArchitectureKind {
    pub fn cap(&self, stat: DevelopmentStat) -> f64 {
        self.caps.get(stat)
    }
}

/// A settlement: the unit of economic simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Architecture {
    pub id: u64,
    /// Free-form tags read and written by the AI scripting layer.
    #[serde(default)]
    pub ai_tags: String,
    pub name_image_name: String,
    pub name: String,
    pub kind_id: u64,
    /// Occupied tiles; never empty for a loaded settlement.
    pub locations: Vec<Point>,
    pub section_id: Option<u64>,
    pub population: u32,
    pub fund: u32,
    pub food: u32,
    pub development: Development,
    #[serde(default)]
    pub creatable_military_kinds: Vec<u64>,
    #[serde(default)]
    pub connected: BTreeSet<u64>,
}

impl Architecture {
    pub fn new(id: u64, name: impl Into<String>, kind_id: u64, location: Point) -> Self {
        Self {
            id,
            ai_tags: String::new(),
            name_image_name: String::new(),
            name: name.into(),
            kind_id,
            locations: vec![location],
            section_id: None,
            population: 0,
            fund: 0,
            food: 0,
            development: Development::default(),
            creatable_military_kinds: Vec::new(),
            connected: BTreeSet::new(),
        }
    }

    /// Logical position: the centroid of all occupied tiles.
    pub fn position(&self) -> Option<(f64, f64)> {
        if self.locations.is_empty() {
            return None;
        }
        let n = self.locations.len() as f64;
        let (sx, sy) = self
            .locations
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x as f64, sy + p.y as f64));
        Some((sx / n, sy / n))
    }

    pub fn can_create(&self, military_kind_id: u64) -> bool {
        self.creatable_military_kinds.contains(&military_kind_id)
    }

    /// Clamp every development stat into `[0, cap]`.
    pub fn clamp_development(&mut self, kind: &ArchitectureKind) {
        for &stat in DevelopmentStat::ALL {
            let cap = kind.cap(stat);
            let value = self.development.get_mut(stat);
            *value = value.clamp(0.0, cap);
        }
    }
}
