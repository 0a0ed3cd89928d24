//! Unit tests for the JSON shapes the API sends and accepts.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::NaiveDate;
use lifeos::api::{
    DeleteResponse, ErrorResponse, HealthResponse, RegisterRequest, ToggleHabitRequest, XpRequest,
};
use lifeos_core::services::{NewFocusSession, NewHabit, NewTransaction, TaskFilter};
use lifeos_core::{FocusKind, Priority, Progression, Rewarded, Task, TransactionKind};
use serde_json::json;

// =============================================================================
// BOUNDARY TYPES
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_error_response_shape() {
    let json = serde_json::to_value(ErrorResponse::new("Task not found: 7")).unwrap();
    assert_eq!(json, json!({ "success": false, "error": "Task not found: 7" }));
}

#[test]
fn test_delete_response_shape() {
    let json = serde_json::to_value(DeleteResponse::deleted("Habit")).unwrap();
    assert_eq!(json, json!({ "success": true, "message": "Habit deleted" }));
}

#[test]
fn test_register_request_deserialization() {
    let request: RegisterRequest =
        serde_json::from_str(r#"{"name":"Ada","email":"ada@example.com"}"#).unwrap();
    assert_eq!(request.name, "Ada");
    assert_eq!(request.email, "ada@example.com");
}

#[test]
fn test_xp_request_accepts_negative_for_rejection_downstream() {
    let request: XpRequest = serde_json::from_str(r#"{"amount":-3}"#).unwrap();
    assert_eq!(request.amount, -3);
}

#[test]
fn test_toggle_request_date_is_optional() {
    let empty: ToggleHabitRequest = serde_json::from_str("{}").unwrap();
    assert!(empty.date.is_none());

    let dated: ToggleHabitRequest = serde_json::from_str(r#"{"date":"2026-03-10"}"#).unwrap();
    assert_eq!(dated.date, NaiveDate::from_ymd_opt(2026, 3, 10));
}

#[test]
fn test_toggle_request_rejects_impossible_date() {
    assert!(serde_json::from_str::<ToggleHabitRequest>(r#"{"date":"2026-02-30"}"#).is_err());
    assert!(serde_json::from_str::<ToggleHabitRequest>(r#"{"date":"10/03/2026"}"#).is_err());
}

// =============================================================================
// CORE PAYLOADS ON THE WIRE
// =============================================================================

#[test]
fn test_progression_is_camel_case() {
    let progression = Progression {
        xp_added: 10,
        previous_level: 1,
        level: 1,
        current_xp: 10,
        leveled_up: false,
    };
    let json = serde_json::to_value(progression).unwrap();
    assert_eq!(
        json,
        json!({
            "xpAdded": 10,
            "previousLevel": 1,
            "level": 1,
            "currentXp": 10,
            "leveledUp": false
        })
    );
}

#[test]
fn test_rewarded_flattens_entity() {
    let created = NaiveDate::from_ymd_opt(2026, 3, 10)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
        .and_utc();
    let task = Task {
        id: lifeos_core::RecordId(3),
        title: "Write".to_string(),
        description: None,
        priority: Priority::High,
        category: "work".to_string(),
        due_date: None,
        completed: false,
        completed_at: None,
        created_at: created,
    };
    let rewarded = Rewarded {
        item: task,
        reward: None,
        progression: None,
    };

    let json = serde_json::to_value(&rewarded).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["title"], "Write");
    assert_eq!(json["priority"], "high");
    assert!(json["progression"].is_null());
    assert!(json.get("reward").is_none());
}

#[test]
fn test_wire_names_of_inputs() {
    let habit: NewHabit = serde_json::from_str(r#"{"name":"Read","frequency":"weekly"}"#).unwrap();
    assert_eq!(habit.name, "Read");

    let focus: NewFocusSession =
        serde_json::from_str(r#"{"duration":5,"type":"longBreak"}"#).unwrap();
    assert_eq!(focus.duration_minutes, 5);
    assert_eq!(focus.kind, FocusKind::LongBreak);

    let transaction: NewTransaction = serde_json::from_str(
        r#"{"type":"expense","amountCents":1999,"category":"books"}"#,
    )
    .unwrap();
    assert_eq!(transaction.kind, TransactionKind::Expense);
    assert_eq!(transaction.amount_cents, 1999);
}

#[test]
fn test_unknown_enum_values_are_rejected() {
    assert!(serde_json::from_str::<NewFocusSession>(r#"{"duration":5,"type":"nap"}"#).is_err());
    assert!(serde_json::from_str::<TaskFilter>(r#"{"priority":"someday"}"#).is_err());
}
