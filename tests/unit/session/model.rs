use super::*;

const SAMPLE: &str = r#"{
    "LVC21-101": {
        "session_id": "LVC21-101",
        "name": "Kernel Debugging",
        "event_type": "Technical Talk",
        "abstract": "ignored",
        "speakers": [
            {"name": "Jane Doe", "avatar": "https://example.com/jane.jpg", "company": "Linaro"}
        ]
    },
    "LVC21-001": {
        "session_id": "LVC21-001",
        "name": "Keynote",
        "event_type": "Keynote",
        "speakers": []
    }
}"#;

#[test]
fn parses_sessions_ignoring_unknown_fields() {
    let sessions = parse_sessions(SAMPLE.as_bytes()).unwrap();
    assert_eq!(sessions.len(), 2);
    let s = &sessions["LVC21-101"];
    assert_eq!(s.name, "Kernel Debugging");
    assert_eq!(s.event_type, "Technical Talk");
    assert_eq!(
        s.speakers,
        vec![SpeakerRecord::new("Jane Doe", "https://example.com/jane.jpg")]
    );
}

#[test]
fn sessions_iterate_in_id_order() {
    let sessions = parse_sessions(SAMPLE.as_bytes()).unwrap();
    let ids: Vec<_> = sessions.keys().cloned().collect();
    assert_eq!(ids, vec!["LVC21-001", "LVC21-101"]);
}

#[test]
fn missing_speaker_fields_default() {
    let sessions = parse_sessions(
        r#"{"X-1": {"session_id": "X-1", "name": "n", "speakers": [{"name": "A"}]}}"#.as_bytes(),
    )
    .unwrap();
    let s = &sessions["X-1"];
    assert_eq!(s.event_type, "");
    assert_eq!(s.speakers[0].avatar, "");
    assert_eq!(s.speakers[0].image, None);
}

#[test]
fn load_sessions_reports_bad_json_as_serde_error() {
    let dir = std::path::PathBuf::from("target").join("session_model_bad_json");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("sessions.json");
    std::fs::write(&path, "[1, 2").unwrap();

    let err = load_sessions(&path).unwrap_err();
    assert!(matches!(err, SharecardError::Serde(_)), "{err}");
}
