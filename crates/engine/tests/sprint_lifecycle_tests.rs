//! Sprint lifecycle scenarios
//!
//! End-to-end flows through `SprintManager` against in-memory and
//! file-backed stores.

use serde_json::{json, Value};
use tempfile::TempDir;
use ticketmaster_core::{now_millis, Error, TicketStatus};
use ticketmaster_engine::{Database, StorageConfig};

fn open_event(ticket_id: &str, timestamp: i64) -> Value {
    json!({
        "ticket_id": ticket_id,
        "timestamp": timestamp,
        "description": "d",
        "status": "open",
        "priority": "low"
    })
}

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_create_without_params_uses_now() {
    let db = Database::in_memory();
    let before = now_millis();
    let sprint = db.sprints().create(None, None).unwrap();
    let after = now_millis();

    assert!(before <= sprint.start_time && sprint.start_time <= after);
    assert_eq!(sprint.end_time, None);
    assert!(sprint.events.is_empty());
}

#[test]
fn test_created_sprint_serializes_without_end_time() {
    let db = Database::in_memory();
    let sprint = db.sprints().create(Some(100), Some(50)).unwrap();
    let json = serde_json::to_value(&sprint).unwrap();
    assert!(json.get("end_time").is_none());
    assert_eq!(json["events"], json!([]));
    assert_eq!(json["id"], json!(sprint.id.as_str()));
}

// ============================================================================
// Full Lifecycle
// ============================================================================

#[test]
fn test_create_append_update_get() {
    let db = Database::in_memory();
    let sprints = db.sprints();

    let sprint = sprints.create(Some(1_000), None).unwrap();
    let id = sprint.id.as_str();

    sprints.append_event(id, &open_event("t1", 1_100)).unwrap();
    let mut done = open_event("t1", 1_200);
    done["status"] = json!("done");
    sprints.append_event(id, &done).unwrap();

    let updated = sprints.update(id, &json!({"end_time": 2_000})).unwrap();
    assert_eq!(updated.start_time, 1_000);
    assert_eq!(updated.end_time, Some(2_000));
    assert_eq!(updated.event_count(), 2);
    assert_eq!(updated.events[0].status, TicketStatus::Open);
    assert_eq!(updated.events[1].status, TicketStatus::Done);

    assert_eq!(sprints.get(id).unwrap(), updated);
}

#[test]
fn test_append_to_nonexistent_sprint_creates_nothing() {
    let db = Database::in_memory();
    let err = db
        .sprints()
        .append_event("does-not-exist", &open_event("t1", 100))
        .unwrap_err();
    assert!(matches!(err, Error::SprintNotFound { .. }));
    assert!(db.sprints().list().unwrap().is_empty());
}

#[test]
fn test_integer_valued_floats_accepted() {
    let db = Database::in_memory();
    let sprint = db.sprints().create(Some(1), None).unwrap();
    let mut payload = open_event("t1", 0);
    payload["timestamp"] = json!(100.0);

    let after = db
        .sprints()
        .append_event(sprint.id.as_str(), &payload)
        .unwrap();
    assert_eq!(after.events[0].timestamp, 100);
}

#[test]
fn test_patch_null_end_time_leaves_it_untouched() {
    let db = Database::in_memory();
    let sprint = db.sprints().create(Some(1), Some(9)).unwrap();
    let updated = db
        .sprints()
        .update(sprint.id.as_str(), &json!({"end_time": null}))
        .unwrap();
    assert_eq!(updated.end_time, Some(9));
}

#[test]
fn test_patch_start_past_stored_end_clears_end() {
    let db = Database::in_memory();
    let sprint = db.sprints().create(Some(100), Some(500)).unwrap();

    let updated = db
        .sprints()
        .update(sprint.id.as_str(), &json!({"start_time": 1_000}))
        .unwrap();
    assert_eq!(updated.start_time, 1_000);
    assert_eq!(updated.end_time, None);
    assert_eq!(db.sprints().get(sprint.id.as_str()).unwrap(), updated);
}

#[test]
fn test_patch_end_before_stored_start_is_dropped() {
    let db = Database::in_memory();
    let sprint = db.sprints().create(Some(100), None).unwrap();

    let updated = db
        .sprints()
        .update(sprint.id.as_str(), &json!({"end_time": 50}))
        .unwrap();
    assert_eq!(updated.start_time, 100);
    assert_eq!(updated.end_time, None);

    // A stored end is cleared too, not kept
    let sprint = db.sprints().create(Some(100), Some(300)).unwrap();
    let updated = db
        .sprints()
        .update(sprint.id.as_str(), &json!({"end_time": 100}))
        .unwrap();
    assert_eq!(updated.end_time, None);
}

#[test]
fn test_patch_start_before_stored_end_keeps_end() {
    let db = Database::in_memory();
    let sprint = db.sprints().create(Some(100), Some(500)).unwrap();
    let updated = db
        .sprints()
        .update(sprint.id.as_str(), &json!({"start_time": 400}))
        .unwrap();
    assert_eq!(updated.start_time, 400);
    assert_eq!(updated.end_time, Some(500));
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_file_store_lifecycle_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let config = StorageConfig {
        mode: "file".into(),
        data_dir: temp.path().to_path_buf(),
    };

    let id = {
        let db = Database::open(&config).unwrap();
        let sprint = db.sprints().create(Some(10), Some(20)).unwrap();
        db.sprints()
            .append_event(sprint.id.as_str(), &open_event("t1", 15))
            .unwrap();
        db.sprints()
            .update(sprint.id.as_str(), &json!({"start_time": 30, "end_time": 25}))
            .unwrap();
        sprint.id
    };

    let db = Database::open(&config).unwrap();
    let sprint = db.sprints().get(id.as_str()).unwrap();
    assert_eq!(sprint.start_time, 30);
    assert_eq!(sprint.end_time, None);
    assert_eq!(sprint.event_count(), 1);
    assert_eq!(sprint.events[0].ticket_id, "t1");
}
