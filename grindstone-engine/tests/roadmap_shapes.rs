use std::collections::HashSet;
use std::hash::Hasher;

use grindstone_engine::roadmap::{Roadmap, catalog};
use serde_json::{Map, Value};
use twox_hash::XxHash64;

#[test]
fn catalog_round_trips_the_embedded_asset_losslessly() {
    let asset = include_str!("../assets/roadmap.json");
    let raw: Value = serde_json::from_str(asset).unwrap();
    let parsed = Roadmap::from_json(asset).unwrap();
    let modeled = serde_json::to_value(&parsed).unwrap();

    assert_eq!(
        canonicalize_value(modeled),
        canonicalize_value(raw),
        "typed model dropped or renamed asset fields"
    );
}

#[test]
fn catalog_digest_is_deterministic_across_loads() {
    let first = snapshot_hash(&canonical_json(catalog()));
    let second = snapshot_hash(&canonical_json(&Roadmap::load_from_static()));
    assert_eq!(first, second, "catalog serialization is nondeterministic");
}

#[test]
fn catalog_structure_matches_the_published_plan() {
    let roadmap = catalog();

    let phase_ids: Vec<&str> = roadmap
        .phases
        .iter()
        .map(|phase| phase.id.as_str())
        .collect();
    assert_eq!(
        phase_ids,
        ["phase1", "phase2", "phase3", "phase4", "deliverables"]
    );

    assert_eq!(roadmap.task_count(), 67);
    assert_eq!(roadmap.total_xp(), 3_535);

    let ids: HashSet<&str> = roadmap.tasks().map(|task| task.id.as_str()).collect();
    assert_eq!(ids.len(), 67, "duplicate task ids in the catalog");
    assert!(roadmap.tasks().all(|task| task.xp > 0));

    let course = roadmap.find_task("p1c2i1").unwrap();
    assert!(course.url.as_deref().unwrap().starts_with("https://"));
    assert_eq!(course.sub_text.as_deref(), Some("Python, algorithms, data structures."));
}

fn canonical_json(roadmap: &Roadmap) -> Vec<u8> {
    let value = canonicalize_value(serde_json::to_value(roadmap).unwrap());
    serde_json::to_string_pretty(&value).unwrap().into_bytes()
}

fn canonicalize_value(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(canonicalize_value)
                .collect::<Vec<_>>(),
        ),
        Value::Object(map) => {
            let mut result = Map::with_capacity(map.len());
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (key, value) in entries {
                result.insert(key, canonicalize_value(value));
            }
            Value::Object(result)
        }
        other => other,
    }
}

fn snapshot_hash(bytes: &[u8]) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(bytes);
    hasher.finish()
}
