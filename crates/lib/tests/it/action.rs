//! Action and Event wire-shape tests

use roz::{
    Action, Event,
    action::{ActionError, SET_STATE},
    doc::PathBuf,
    event::STATE_CHANGED,
};
use serde_json::json;

#[test]
fn test_set_state_from_json() {
    let action: Action = serde_json::from_value(json!({
        "type": "SET_STATE",
        "path": "user_settings.theme",
        "value": "light"
    }))
    .unwrap();

    assert_eq!(action, Action::set_state("user_settings.theme", "light"));
    assert_eq!(action.kind(), SET_STATE);
}

#[test]
fn test_set_state_without_value_writes_null() {
    let raw = json!({"type": "SET_STATE", "path": "a.b"});
    let action = Action::from_value(raw.clone()).unwrap();
    assert_eq!(
        action,
        Action::SetState {
            path: PathBuf::from("a.b"),
            value: None,
            extra: Default::default(),
        }
    );
    assert_eq!(action.value(), Some(&json!(null)));

    // The missing value is not invented on the way back out
    assert_eq!(action.to_value(), raw);
}

#[test]
fn test_set_state_keeps_extra_fields() {
    let raw = json!({
        "type": "SET_STATE",
        "path": "a",
        "value": 1,
        "request_id": "r-42",
        "meta": {"origin": "saga"}
    });
    let action = Action::from_value(raw.clone()).unwrap();

    assert_eq!(action.kind(), SET_STATE);
    assert_eq!(action.value(), Some(&json!(1)));
    match &action {
        Action::SetState { path, extra, .. } => {
            assert_eq!(path.as_str(), "a");
            assert_eq!(extra.get("request_id"), Some(&json!("r-42")));
            assert!(!extra.contains_key("path"));
            assert!(!extra.contains_key("value"));
        }
        other => panic!("expected Action::SetState, got {other:?}"),
    }

    assert_eq!(action.to_value(), raw);
    let reparsed: Action = serde_json::to_string(&action).unwrap().parse().unwrap();
    assert_eq!(reparsed, action);
}

#[test]
fn test_with_field() {
    let action = Action::set_state("a", 1).with_field("request_id", "r-1");
    assert_eq!(
        action.to_value(),
        json!({"type": "SET_STATE", "path": "a", "value": 1, "request_id": "r-1"})
    );

    // Reserved keys never override the action's own fields
    let action = Action::set_state("a", 1).with_field("path", "b");
    assert_eq!(action.to_value()["path"], json!("a"));

    let action = Action::from_value(json!({"type": "PING"}))
        .unwrap()
        .with_field("seq", 3);
    assert_eq!(action.to_value(), json!({"type": "PING", "seq": 3}));
}

#[test]
fn test_set_state_without_path_is_kept_as_other() {
    let action = Action::from_value(json!({"type": "SET_STATE", "value": 1})).unwrap();
    assert_eq!(action.value(), None);
    match &action {
        Action::Other { kind, payload } => {
            assert_eq!(kind, SET_STATE);
            assert_eq!(payload.get("value"), Some(&json!(1)));
        }
        other => panic!("expected Action::Other, got {other:?}"),
    }

    // A non-string path is not a path either, and stays in the payload
    let action = Action::from_value(json!({"type": "SET_STATE", "path": 7})).unwrap();
    match action {
        Action::Other { payload, .. } => assert_eq!(payload.get("path"), Some(&json!(7))),
        other => panic!("expected Action::Other, got {other:?}"),
    }
}

#[test]
fn test_unknown_type_keeps_payload() {
    let raw = json!({"type": "MOVE_PLAYER", "player": "player_alpha", "to": "room_forest"});
    let action = Action::from_value(raw.clone()).unwrap();

    assert_eq!(action.kind(), "MOVE_PLAYER");
    assert_eq!(action.to_value(), raw);
}

#[test]
fn test_rejects_values_that_are_not_actions() {
    assert!(matches!(
        Action::from_value(json!(["SET_STATE"])),
        Err(ActionError::NotAnObject)
    ));
    assert!(matches!(
        Action::from_value(json!({"path": "a", "value": 1})),
        Err(ActionError::MissingType)
    ));
    assert!(matches!(
        Action::from_value(json!({"type": 3})),
        Err(ActionError::MissingType)
    ));
    assert!(matches!(
        "{not json".parse::<Action>(),
        Err(ActionError::Deserialize(_))
    ));

    let err = serde_json::from_value::<Action>(json!("SET_STATE")).unwrap_err();
    assert!(err.to_string().contains("JSON object"));
}

#[test]
fn test_parse_action_line() {
    let action: Action = r#"{"type":"SET_STATE","path":"list.0","value":[1,2]}"#
        .parse()
        .unwrap();
    assert_eq!(action, Action::set_state("list.0", json!([1, 2])));
}

#[test]
fn test_set_state_serializes_with_type_tag() {
    let action = Action::set_state("players.player_alpha.username", "Nehsamud");
    assert_eq!(
        serde_json::to_value(&action).unwrap(),
        json!({
            "type": "SET_STATE",
            "path": "players.player_alpha.username",
            "value": "Nehsamud"
        })
    );
}

#[test]
fn test_event_serializes_to_state_changed_shape() {
    let event = Event::StateChanged {
        path: PathBuf::from("user_settings.theme"),
        old_value: Some(json!("dark")),
        new_value: json!("light"),
        action_source: Action::set_state("user_settings.theme", "light"),
    };

    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "STATE_CHANGED",
            "path": "user_settings.theme",
            "old_value": "dark",
            "new_value": "light",
            "action_source": {
                "type": "SET_STATE",
                "path": "user_settings.theme",
                "value": "light"
            }
        })
    );

    let back: Event = serde_json::from_value(value).unwrap();
    assert_eq!(back, event);
    assert_eq!(back.kind(), STATE_CHANGED);
}

#[test]
fn test_event_missing_old_value_is_null() {
    let event = Event::StateChanged {
        path: PathBuf::from("players.player_alpha.username"),
        old_value: None,
        new_value: json!("Nehsamud"),
        action_source: Action::set_state("players.player_alpha.username", "Nehsamud"),
    };

    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["old_value"], json!(null));
    assert_eq!(event.old_value(), None);
    assert_eq!(event.path().as_str(), "players.player_alpha.username");
}
