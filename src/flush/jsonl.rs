use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::model::World;

/// Write an iterator of serializable items to a JSONL file (one JSON object per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Flush the world state to JSONL files in the given output directory.
///
/// Creates the output directory if it does not exist. Writes one file per
/// entity table, rows in ascending id order:
/// - `factions.jsonl`, `sections.jsonl`
/// - `architecture_kinds.jsonl`, `architectures.jsonl`
/// - `persons.jsonl`
/// - `military_kinds.jsonl`, `militaries.jsonl`
pub fn flush_to_jsonl(world: &World, output_dir: &Path) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    write_jsonl(&output_dir.join("factions.jsonl"), world.factions.values())?;
    write_jsonl(&output_dir.join("sections.jsonl"), world.sections.values())?;
    write_jsonl(
        &output_dir.join("architecture_kinds.jsonl"),
        world.architecture_kinds.values(),
    )?;
    write_jsonl(
        &output_dir.join("architectures.jsonl"),
        world.architectures.values(),
    )?;
    write_jsonl(&output_dir.join("persons.jsonl"), world.persons.values())?;
    write_jsonl(
        &output_dir.join("military_kinds.jsonl"),
        world.military_kinds.values(),
    )?;
    write_jsonl(&output_dir.join("militaries.jsonl"), world.militaries.values())?;

    tracing::debug!(dir = %output_dir.display(), "world flushed");
    Ok(())
}
