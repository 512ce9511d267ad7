mod common;

use common::{build_test_world, read_lines};
use settlement_sim::flush::flush_to_jsonl;

const TABLES: [&str; 7] = [
    "factions",
    "sections",
    "architecture_kinds",
    "architectures",
    "persons",
    "military_kinds",
    "militaries",
];

#[test]
fn flush_produces_one_file_per_table() {
    let t = build_test_world();
    let dir = tempfile::tempdir().unwrap();

    flush_to_jsonl(&t.world, dir.path()).unwrap();

    for table in TABLES {
        let path = dir.path().join(format!("{table}.jsonl"));
        assert!(path.exists(), "missing {table}.jsonl");
        for line in read_lines(&path) {
            let v: serde_json::Value = serde_json::from_str(&line).unwrap();
            assert!(v.get("id").is_some(), "{table} row without id");
        }
    }

    assert_eq!(read_lines(&dir.path().join("factions.jsonl")).len(), 2);
    assert_eq!(read_lines(&dir.path().join("architectures.jsonl")).len(), 4);
    assert_eq!(read_lines(&dir.path().join("militaries.jsonl")).len(), 3);
}

#[test]
fn flush_preserves_field_values() {
    let t = build_test_world();
    let dir = tempfile::tempdir().unwrap();

    flush_to_jsonl(&t.world, dir.path()).unwrap();

    let architectures = read_lines(&dir.path().join("architectures.jsonl"));
    let xuchang: serde_json::Value = serde_json::from_str(&architectures[0]).unwrap();
    assert_eq!(xuchang["name"], "Xuchang");
    assert_eq!(xuchang["population"], 20_000);
    assert_eq!(xuchang["development"]["commerce"], 300.0);

    let persons = read_lines(&dir.path().join("persons.jsonl"));
    let xun_yu: serde_json::Value = serde_json::from_str(&persons[1]).unwrap();
    assert_eq!(xun_yu["name"], "Xun Yu");
    assert_eq!(xun_yu["work"], "commerce");

    let free_city: serde_json::Value = serde_json::from_str(&architectures[3]).unwrap();
    assert!(free_city["section_id"].is_null());
}
