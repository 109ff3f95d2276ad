use fieldplay_core::{
    parse_stored_choreography_json, ChoreoError, EntityType, PathId, PathLibrary, Vec3,
};

const DOC: &str = r#"{
  "paths": [
    {
      "id": "path-ball",
      "entityId": "ball",
      "entityType": "ball",
      "duration": 99,
      "keyframes": [
        { "timestamp": 5, "position": { "x": 5, "y": 0, "z": 0 } },
        { "timestamp": 0, "position": [0, 0, 0] },
        { "timestamp": 10, "position": { "x": 10, "y": 1.5, "z": 0 } }
      ]
    },
    {
      "id": "path-p7",
      "entityId": "p7",
      "entityType": "player",
      "keyframes": [
        { "timestamp": 0, "position": [0, 0, -3] },
        { "timestamp": 2.5, "position": [4, 0, -3] }
      ]
    }
  ],
  "events": [
    {
      "id": "ev-1",
      "name": "Set piece",
      "duration": 8000,
      "createdAt": 1700000000000,
      "playerPaths": [
        { "playerId": "ball", "pathId": "path-ball", "startTimeOffset": 0 },
        { "playerId": "p7", "pathId": "path-p7", "startTimeOffset": 1000 },
        { "playerId": "p7", "pathId": "path-p7", "startTimeOffset": 7000 }
      ],
      "phases": [
        { "id": "b", "name": "Pass", "startTime": 4000 },
        { "id": "a", "name": "Setup", "startTime": 0, "description": "Line up" }
      ]
    }
  ]
}"#;

#[test]
fn parses_paths_sorting_keyframes_and_recomputing_duration() {
    let doc = parse_stored_choreography_json(DOC).expect("parse document");
    assert_eq!(doc.paths.len(), 2);

    let ball = &doc.paths[0];
    assert_eq!(ball.entity_type, EntityType::Ball);
    let stamps: Vec<f32> = ball.keyframes.iter().map(|k| k.timestamp).collect();
    assert_eq!(stamps, vec![0.0, 5.0, 10.0]);
    assert_eq!(ball.duration, 10.0);
    assert_eq!(ball.keyframes[2].position, Vec3::new(10.0, 1.5, 0.0));
}

#[test]
fn parses_events_deduplicating_players_and_sorting_phases() {
    let doc = parse_stored_choreography_json(DOC).expect("parse document");
    let ev = &doc.events[0];
    assert_eq!(ev.player_paths.len(), 2);
    assert_eq!(ev.player_paths[1].start_time_offset, 7000.0);
    assert_eq!(ev.phases[0].id.as_str(), "a");
    assert_eq!(ev.phases[0].description.as_deref(), Some("Line up"));
    assert!(ev.is_valid_event());

    let lib: PathLibrary = doc.paths.iter().cloned().collect();
    // p7 runs 2.5s from 7000ms
    assert_eq!(ev.resolve_end_time(&lib), 10_000.0);
    assert_eq!(ev.resolve_end_time(doc.paths.as_slice()), 10_000.0);
    assert!(ev.references_path(&PathId::from("path-p7")));
}

#[test]
fn single_keyframe_path_is_rejected() {
    let json = r#"{ "paths": [ { "id": "x", "entityId": "p1", "entityType": "player",
        "keyframes": [ { "timestamp": 0, "position": [0, 0, 0] } ] } ] }"#;
    let err = parse_stored_choreography_json(json).unwrap_err();
    assert_eq!(
        err,
        ChoreoError::InvalidPath {
            provided: 1,
            required: 2
        }
    );
}

#[test]
fn negative_times_are_rejected() {
    let json = r#"{ "paths": [ { "id": "x", "entityId": "p1", "entityType": "player",
        "keyframes": [ { "timestamp": -1, "position": [0, 0, 0] },
                       { "timestamp": 1, "position": [1, 0, 0] } ] } ] }"#;
    let err = parse_stored_choreography_json(json).unwrap_err();
    assert!(matches!(err, ChoreoError::InvariantViolation { .. }));

    let json = r#"{ "events": [ { "id": "e", "name": "E", "duration": 10,
        "playerPaths": [ { "playerId": "p1", "pathId": "x", "startTimeOffset": -5 } ] } ] }"#;
    let err = parse_stored_choreography_json(json).unwrap_err();
    assert!(matches!(err, ChoreoError::InvariantViolation { .. }));
}

#[test]
fn times_overflowing_f32_are_rejected() {
    let json = r#"{ "paths": [ { "id": "x", "entityId": "p1", "entityType": "player",
        "keyframes": [ { "timestamp": 0, "position": [0, 0, 0] },
                       { "timestamp": 1e39, "position": [1, 0, 0] } ] } ] }"#;
    let err = parse_stored_choreography_json(json).unwrap_err();
    assert!(matches!(err, ChoreoError::InvariantViolation { .. }));

    let json = r#"{ "events": [ { "id": "e", "name": "E", "duration": 1e39 } ] }"#;
    let err = parse_stored_choreography_json(json).unwrap_err();
    assert!(matches!(err, ChoreoError::InvariantViolation { .. }));

    let json = r#"{ "events": [ { "id": "e", "name": "E", "duration": 10,
        "playerPaths": [ { "playerId": "p1", "pathId": "x", "startTimeOffset": 1e39 } ] } ] }"#;
    let err = parse_stored_choreography_json(json).unwrap_err();
    assert!(matches!(err, ChoreoError::InvariantViolation { .. }));

    let json = r#"{ "events": [ { "id": "e", "name": "E", "duration": 10,
        "phases": [ { "id": "a", "name": "A", "startTime": 1e39 } ] } ] }"#;
    let err = parse_stored_choreography_json(json).unwrap_err();
    assert!(matches!(err, ChoreoError::InvariantViolation { .. }));
}

#[test]
fn malformed_json_is_a_serialization_error() {
    let err = parse_stored_choreography_json("{ \"paths\": [").unwrap_err();
    assert_eq!(err.category(), "serialization");

    let err = parse_stored_choreography_json(r#"{ "paths": [ { "id": "x", "entityId": "p1",
        "entityType": "referee", "keyframes": [] } ] }"#)
    .unwrap_err();
    assert!(matches!(err, ChoreoError::Serialization { .. }));
}

#[test]
fn empty_document_is_fine() {
    let doc = parse_stored_choreography_json("{}").expect("empty doc");
    assert!(doc.paths.is_empty());
    assert!(doc.events.is_empty());
}
