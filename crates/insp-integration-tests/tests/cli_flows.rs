//! # CLI Flows
//!
//! Snapshot files driven through the `insp` subcommand handlers the way a
//! persistence layer would: evaluate, complete in place, prefill the next
//! visit from the exported history.

use std::path::Path;

use chrono::NaiveDate;
use insp_cli::evaluate::{run_evaluate, EvaluateArgs};
use insp_cli::prefill::{run_prefill, PrefillArgs};
use insp_cli::transition::{run_transition, TransitionArgs};
use insp_cli::{load_engine, read_json, write_json, EXIT_FATAL, EXIT_OK};
use insp_core::{
    FieldValue, Inspection, InspectionSnapshot, InspectionStatus, Unit, UnitConfiguration,
    UnitType, ValueKind,
};
use insp_engine::{InspectionEngine, SectionUpdate};

fn filled(engine: &InspectionEngine, unit: &Unit) -> InspectionSnapshot {
    let mut snapshot =
        InspectionSnapshot::new(unit.configuration.clone(), Inspection::new_draft(Some(unit.id)));
    let tabs = engine.resolve_tabs(&unit.configuration).unwrap();
    for kind in tabs.tabs() {
        let mut update = SectionUpdate::new(*kind);
        for spec in insp_schema::schema_for(*kind).required_fields(true) {
            let value = match spec.value_kind() {
                Some(ValueKind::Bool) => FieldValue::Bool(true),
                Some(ValueKind::Integer) => FieldValue::Integer(5),
                Some(ValueKind::Number) => FieldValue::Number(3.0),
                Some(ValueKind::Text) => FieldValue::Text("ok".into()),
                Some(ValueKind::Date) => {
                    FieldValue::Date(NaiveDate::from_ymd_opt(2026, 8, 2).unwrap())
                }
                None => continue,
            };
            update = update.set(spec.id, value);
        }
        engine
            .apply_update(&snapshot.configuration, &mut snapshot.inspection, &update)
            .unwrap();
    }
    snapshot
}

fn evaluate(path: &Path, engine: &InspectionEngine) -> u8 {
    run_evaluate(
        &EvaluateArgs {
            snapshot: path.to_path_buf(),
        },
        engine,
    )
    .unwrap()
}

#[test]
fn evaluate_complete_prefill_round() {
    let dir = tempfile::tempdir().unwrap();
    let engine = load_engine(None).unwrap();
    let unit = Unit::new(
        "Obstacle run",
        UnitConfiguration::new(UnitType::ObstacleCourse),
    );

    let snapshot_path = dir.path().join("snapshot.json");
    write_json(&snapshot_path, &filled(&engine, &unit)).unwrap();
    assert_eq!(evaluate(&snapshot_path, &engine), EXIT_OK);

    let code = run_transition(
        &TransitionArgs {
            snapshot: snapshot_path.clone(),
            to: InspectionStatus::Complete,
            in_place: true,
        },
        &engine,
    )
    .unwrap();
    assert_eq!(code, EXIT_OK);
    let completed: InspectionSnapshot = read_json(&snapshot_path).unwrap();
    assert!(completed.inspection.is_complete());
    assert!(completed.inspection.complete_date.is_some());
    assert_eq!(evaluate(&snapshot_path, &engine), EXIT_OK);

    let history_path = dir.path().join("history.json");
    let unit_path = dir.path().join("unit.json");
    write_json(
        &history_path,
        &serde_json::json!({ "inspections": [completed.inspection] }),
    )
    .unwrap();
    write_json(&unit_path, &unit).unwrap();
    let code = run_prefill(
        &PrefillArgs {
            history: history_path,
            unit: unit_path,
            as_inspection: true,
        },
        &engine,
    )
    .unwrap();
    assert_eq!(code, EXIT_OK);
}

#[test]
fn hand_edited_completion_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let engine = load_engine(None).unwrap();
    let path = dir.path().join("snapshot.json");
    let json = serde_json::json!({
        "configuration": { "unit_type": "bounce_house", "has_slide": null },
        "inspection": {
            "id": "6f1c2a9e-57a4-4b8e-9d0b-2f1f3c4d5e6a",
            "status": "complete",
            "complete_date": "2026-03-01T09:30:00Z",
            "general": { "values": { "width": 5.5 } }
        }
    });
    std::fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();
    assert_eq!(evaluate(&path, &engine), EXIT_FATAL);
}

#[test]
fn unknown_unit_type_in_snapshot_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let engine = load_engine(None).unwrap();
    let path = dir.path().join("snapshot.json");
    let json = serde_json::json!({
        "configuration": { "unit_type": "ball_pit" },
        "inspection": {
            "id": "6f1c2a9e-57a4-4b8e-9d0b-2f1f3c4d5e6a",
            "status": "draft"
        }
    });
    std::fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();
    assert_eq!(evaluate(&path, &engine), EXIT_FATAL);

    let code = run_transition(
        &TransitionArgs {
            snapshot: path,
            to: InspectionStatus::Complete,
            in_place: false,
        },
        &engine,
    )
    .unwrap();
    assert_eq!(code, EXIT_FATAL);
}

#[test]
fn custom_policy_file_changes_anchor_requirement() {
    let dir = tempfile::tempdir().unwrap();
    let policy_path = dir.path().join("policy.yaml");
    std::fs::write(
        &policy_path,
        "anchors:\n  method: table\n  bands:\n    - max_area_m2: null\n      anchors: 40\n",
    )
    .unwrap();
    let engine = load_engine(Some(&policy_path)).unwrap();
    let unit = Unit::new("Castle", UnitConfiguration::new(UnitType::BounceHouse));
    let snapshot = filled(&engine, &unit);
    let eval = engine.evaluate(&snapshot).unwrap();
    let anchors = eval.compliance.anchors.as_ref().unwrap();
    assert_eq!(anchors.required, 40);
    assert!(!anchors.meets);
    assert!(eval.complete_eligible);

    let path = dir.path().join("snapshot.json");
    write_json(&path, &snapshot).unwrap();
    assert_eq!(evaluate(&path, &engine), EXIT_OK);
}
