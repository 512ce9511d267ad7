use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::PersistenceError;
use crate::model::{Architecture, ArchitectureKind, Development, DevelopmentStat, Point, World};

/// File name of the settlement table inside a save directory.
pub const ARCHITECTURE_FILE: &str = "Architecture.csv";

/// Column names of the legacy layout, in record order.
pub const LEGACY_HEADER: [&str; 17] = [
    "id",
    "aiTags",
    "displayImageName",
    "name",
    "kindId",
    "locationList",
    "sectionId",
    "population",
    "fund",
    "food",
    "agriculture",
    "commerce",
    "technology",
    "morale",
    "endurance",
    "creatableMilitaryKindIds",
    "connectedArchitectureIds",
];

/// Field layouts a save may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordVersion {
    Legacy,
}

impl RecordVersion {
    fn field_count(self) -> usize {
        match self {
            RecordVersion::Legacy => LEGACY_HEADER.len(),
        }
    }
}

impl TryFrom<u32> for RecordVersion {
    type Error = PersistenceError;

    fn try_from(version: u32) -> Result<Self, Self::Error> {
        match version {
            1 => Ok(RecordVersion::Legacy),
            other => Err(PersistenceError::UnsupportedVersion(other)),
        }
    }
}

// -- Loading --

/// Parse a settlement table. The first record is a header and is skipped;
/// blank lines are ignored. Quoted fields may span lines.
///
/// Kind, section and creatable military kind ids must already exist in
/// `world`. Connected settlement ids are kept as-is since they may point at
/// records further down the table.
pub fn parse_architectures(
    text: &str,
    version: u32,
    world: &World,
) -> Result<Vec<Architecture>, PersistenceError> {
    let version = RecordVersion::try_from(version)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut result = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| PersistenceError::Malformed {
            line: err.position().map_or(0, |p| p.line() as usize),
            reason: err.to_string(),
        })?;
        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }
        let line_no = record.position().map_or(0, |p| p.line() as usize);
        if record.len() != version.field_count() {
            return Err(PersistenceError::FieldCount {
                line: line_no,
                expected: version.field_count(),
                found: record.len(),
            });
        }
        result.push(parse_legacy(&record, line_no, world)?);
    }
    Ok(result)
}

/// Parse a settlement table and insert every settlement into `world`.
/// Returns the number of settlements loaded.
pub fn load_architectures(world: &mut World, text: &str, version: u32) -> Result<usize, PersistenceError> {
    let architectures = parse_architectures(text, version, world)?;
    let count = architectures.len();
    for arch in architectures {
        world.add_architecture(arch);
    }
    tracing::info!(count, version, "architectures loaded");
    Ok(count)
}

/// Load `Architecture.csv` from a save directory.
pub fn read_architectures(world: &mut World, dir: &Path, version: u32) -> Result<usize, PersistenceError> {
    let path = dir.join(ARCHITECTURE_FILE);
    let text = fs::read_to_string(&path).map_err(|source| PersistenceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_architectures(world, &text, version)
}

struct Fields<'a> {
    fields: &'a StringRecord,
    line: usize,
}

impl Fields<'_> {
    fn text(&self, index: usize) -> &str {
        &self.fields[index]
    }

    fn parse<T: std::str::FromStr>(&self, index: usize) -> Result<T, PersistenceError> {
        let value = self.fields[index].trim();
        value.parse().map_err(|_| self.invalid(index))
    }

    /// A development stat, which must lie within the kind's cap.
    fn stat(
        &self,
        index: usize,
        kind: &ArchitectureKind,
        stat: DevelopmentStat,
    ) -> Result<f64, PersistenceError> {
        let value: f64 = self.parse(index)?;
        if !value.is_finite() || value < 0.0 || value > kind.cap(stat) {
            return Err(self.invalid(index));
        }
        Ok(value)
    }

    fn ids(&self, index: usize) -> Result<Vec<u64>, PersistenceError> {
        let value = self.fields[index].trim();
        if value.is_empty() {
            return Ok(Vec::new());
        }
        value
            .split(',')
            .map(|id| id.trim().parse().map_err(|_| self.invalid(index)))
            .collect()
    }

    fn points(&self, index: usize) -> Result<Vec<Point>, PersistenceError> {
        let value = self.fields[index].trim();
        if value.is_empty() {
            return Ok(Vec::new());
        }
        value
            .split(',')
            .map(|pair| {
                let mut coords = pair.split_whitespace().map(str::parse::<i32>);
                match (coords.next(), coords.next(), coords.next()) {
                    (Some(Ok(x)), Some(Ok(y)), None) => Ok(Point::new(x, y)),
                    _ => Err(self.invalid(index)),
                }
            })
            .collect()
    }

    fn invalid(&self, index: usize) -> PersistenceError {
        PersistenceError::InvalidField {
            line: self.line,
            field: LEGACY_HEADER[index],
            value: self.fields[index].to_string(),
        }
    }

    fn unresolved(&self, table: &'static str, id: u64) -> PersistenceError {
        PersistenceError::UnresolvedReference {
            line: self.line,
            table,
            id,
        }
    }
}

fn parse_legacy(fields: &StringRecord, line: usize, world: &World) -> Result<Architecture, PersistenceError> {
    let f = Fields { fields, line };

    let kind_id: u64 = f.parse(4)?;
    let kind = world
        .architecture_kinds
        .get(&kind_id)
        .ok_or_else(|| f.unresolved("architecture kind", kind_id))?;

    let locations = f.points(5)?;
    if locations.is_empty() {
        return Err(PersistenceError::Malformed {
            line,
            reason: "settlement occupies no tile".to_string(),
        });
    }

    let section_id = match f.parse::<i64>(6)? {
        -1 => None,
        id if id < 0 => return Err(f.invalid(6)),
        id => {
            let id = id as u64;
            if !world.sections.contains_key(&id) {
                return Err(f.unresolved("section", id));
            }
            Some(id)
        }
    };

    let creatable_military_kinds = f.ids(15)?;
    if let Some(&missing) = creatable_military_kinds
        .iter()
        .find(|&&id| !world.military_kinds.contains_key(&id))
    {
        return Err(f.unresolved("military kind", missing));
    }

    Ok(Architecture {
        id: f.parse(0)?,
        ai_tags: f.text(1).to_string(),
        name_image_name: f.text(2).to_string(),
        name: f.text(3).to_string(),
        kind_id,
        locations,
        section_id,
        population: f.parse(7)?,
        fund: f.parse(8)?,
        food: f.parse(9)?,
        development: Development {
            agriculture: f.stat(10, kind, DevelopmentStat::Agriculture)?,
            commerce: f.stat(11, kind, DevelopmentStat::Commerce)?,
            technology: f.stat(12, kind, DevelopmentStat::Technology)?,
            morale: f.stat(13, kind, DevelopmentStat::Morale)?,
            endurance: f.stat(14, kind, DevelopmentStat::Endurance)?,
        },
        creatable_military_kinds,
        connected: f.ids(16)?.into_iter().collect::<BTreeSet<u64>>(),
    })
}

// -- Saving --

/// Render every settlement of `world` in the legacy layout, header first.
/// Every field is quoted.
pub fn format_architectures(world: &World) -> Result<String, PersistenceError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());
    writer.write_record(LEGACY_HEADER)?;
    for arch in world.architectures.values() {
        writer.write_record(legacy_fields(arch))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write `Architecture.csv` into a save directory, creating it if needed.
pub fn write_architectures(world: &World, dir: &Path) -> Result<(), PersistenceError> {
    let io_error = |path: &Path| {
        let path = path.display().to_string();
        move |source: std::io::Error| PersistenceError::Io { path, source }
    };
    fs::create_dir_all(dir).map_err(io_error(dir))?;
    let path = dir.join(ARCHITECTURE_FILE);
    fs::write(&path, format_architectures(world)?).map_err(io_error(&path))?;
    tracing::debug!(count = world.architectures.len(), path = %path.display(), "architectures saved");
    Ok(())
}

fn join_ids(ids: impl IntoIterator<Item = u64>) -> String {
    ids.into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn legacy_fields(arch: &Architecture) -> Vec<String> {
    let locations = arch
        .locations
        .iter()
        .map(|p| format!("{} {}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(",");
    let dev = &arch.development;

    vec![
        arch.id.to_string(),
        arch.ai_tags.clone(),
        arch.name_image_name.clone(),
        arch.name.clone(),
        arch.kind_id.to_string(),
        locations,
        arch.section_id.map_or_else(|| "-1".to_string(), |id| id.to_string()),
        arch.population.to_string(),
        arch.fund.to_string(),
        arch.food.to_string(),
        dev.agriculture.to_string(),
        dev.commerce.to_string(),
        dev.technology.to_string(),
        dev.morale.to_string(),
        dev.endurance.to_string(),
        join_ids(arch.creatable_military_kinds.iter().copied()),
        join_ids(arch.connected.iter().copied()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;

    const HEADER: &str = "id,aiTags,displayImageName,name,kindId,locationList,sectionId,population,fund,food,agriculture,commerce,technology,morale,endurance,creatableMilitaryKindIds,connectedArchitectureIds";

    /// World with kind 1, faction 2, section 3 and military kind 4.
    fn reference_world() -> World {
        let mut s = Scenario::new();
        let wei = s.add_faction("Wei");
        s.military_kind("Spearmen");
        assert_eq!((s.default_kind(), wei, s.home_section(wei)), (1, 2, Some(3)));
        s.build()
    }

    fn table(records: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for r in records {
            text.push('\n');
            text.push_str(r);
        }
        text
    }

    #[test]
    fn parses_legacy_record() {
        let world = reference_world();
        let text = table(&[r#"10,"aggressive","xc","Xuchang",1,"5 6,5 7",3,12000,800,3000,120.5,90,40,55,70,"4","11,12""#]);

        let archs = parse_architectures(&text, 1, &world).unwrap();
        assert_eq!(archs.len(), 1);
        let a = &archs[0];
        assert_eq!(a.id, 10);
        assert_eq!(a.ai_tags, "aggressive");
        assert_eq!(a.name_image_name, "xc");
        assert_eq!(a.locations, vec![Point::new(5, 6), Point::new(5, 7)]);
        assert_eq!(a.section_id, Some(3));
        assert_eq!((a.population, a.fund, a.food), (12000, 800, 3000));
        assert_eq!(a.development.agriculture, 120.5);
        assert_eq!(a.development.morale, 55.0);
        assert_eq!(a.development.endurance, 70.0);
        assert_eq!(a.creatable_military_kinds, vec![4]);
        assert_eq!(a.connected, BTreeSet::from([11, 12]));
    }

    #[test]
    fn minus_one_section_means_unowned() {
        let world = reference_world();
        let text = table(&["10,,,Free City,1,0 0,-1,0,0,0,0,0,0,0,0,,"]);
        let archs = parse_architectures(&text, 1, &world).unwrap();
        assert_eq!(archs[0].section_id, None);
        assert!(archs[0].connected.is_empty());
    }

    #[test]
    fn unknown_version_is_rejected() {
        let world = reference_world();
        let err = parse_architectures(&table(&[]), 2, &world).unwrap_err();
        assert!(matches!(err, PersistenceError::UnsupportedVersion(2)));
    }

    #[test]
    fn missing_kind_is_unresolved() {
        let world = reference_world();
        let text = table(&["10,,,X,99,0 0,-1,0,0,0,0,0,0,0,0,,"]);
        let err = parse_architectures(&text, 1, &world).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::UnresolvedReference { line: 2, id: 99, .. }
        ));
    }

    #[test]
    fn missing_section_and_military_kind_are_unresolved() {
        let world = reference_world();
        let bad_section = table(&["10,,,X,1,0 0,42,0,0,0,0,0,0,0,0,,"]);
        assert!(matches!(
            parse_architectures(&bad_section, 1, &world),
            Err(PersistenceError::UnresolvedReference { table: "section", .. })
        ));
        let bad_kind = table(&["10,,,X,1,0 0,-1,0,0,0,0,0,0,0,0,\"4,5\","]);
        assert!(matches!(
            parse_architectures(&bad_kind, 1, &world),
            Err(PersistenceError::UnresolvedReference { id: 5, .. })
        ));
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        let world = reference_world();
        let err = parse_architectures(&table(&["10,,,X,1"]), 1, &world).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::FieldCount { expected: 17, found: 5, .. }
        ));
    }

    #[test]
    fn unparsable_number_names_the_field() {
        let world = reference_world();
        let err = parse_architectures(&table(&["10,,,X,1,0 0,-1,lots,0,0,0,0,0,0,0,,"]), 1, &world)
            .unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::InvalidField { field: "population", .. }
        ));
    }

    #[test]
    fn saved_table_starts_with_quoted_header() {
        let mut world = reference_world();
        world.add_architecture(Architecture::new(10, "Ye", 1, Point::new(1, 2)));
        let text = format_architectures(&world).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            r#""id","aiTags","displayImageName","name","kindId","locationList","sectionId","population","fund","food","agriculture","commerce","technology","morale","endurance","creatableMilitaryKindIds","connectedArchitectureIds""#
        );
        assert_eq!(
            lines.next().unwrap(),
            r#""10","","","Ye","1","1 2","-1","0","0","0","0","0","0","0","0","","""#
        );
    }

    #[test]
    fn stat_above_kind_cap_is_rejected() {
        let world = reference_world();
        let err = parse_architectures(&table(&["10,,,X,1,0 0,-1,0,0,0,5000,0,0,0,0,,"]), 1, &world)
            .unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::InvalidField { line: 2, field: "agriculture", .. }
        ));
    }

    #[test]
    fn quoted_fields_may_hold_newlines_and_commas() {
        let mut world = reference_world();
        let mut arch = Architecture::new(10, "Ye", 1, Point::new(1, 2));
        arch.ai_tags = "attack\nhold, then \"retreat\"".to_string();
        world.add_architecture(arch.clone());

        let text = format_architectures(&world).unwrap();
        let archs = parse_architectures(&text, 1, &world).unwrap();
        assert_eq!(archs, vec![arch]);
    }

    #[test]
    fn records_after_a_multiline_field_keep_their_line_numbers() {
        let world = reference_world();
        let text = table(&[
            "10,\"a\nb\",,X,1,0 0,-1,0,0,0,0,0,0,0,0,,",
            "11,,,Y,99,0 0,-1,0,0,0,0,0,0,0,0,,",
        ]);
        let err = parse_architectures(&text, 1, &world).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::UnresolvedReference { line: 4, id: 99, .. }
        ));
    }

    #[test]
    fn load_reserves_ids_above_loaded_settlements() {
        let mut world = reference_world();
        let text = table(&["50,,,X,1,0 0,-1,0,0,0,0,0,0,0,0,,"]);
        load_architectures(&mut world, &text, 1).unwrap();
        assert!(world.id_gen.next_id() > 50);
    }
}
