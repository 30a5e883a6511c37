use super::*;

#[test]
fn default_table_matches_card_design() {
    let t = StyleTable::default();
    t.validate().unwrap();

    assert_eq!(t.avatar.size, Size { width: 300, height: 300 });
    assert_eq!((t.avatar.x, t.avatar.y), (820, 80));
    assert_eq!(t.avatar.mask, ImageMask::Circle);

    assert_eq!(t.caption.position, Position::centered(920.0, 970.0, 400.0));
    assert!(t.caption.multiline);
    assert_eq!(t.caption.font.family, "fonts/Lato-Regular.ttf");
    assert_eq!(t.caption.font.size, 32.0);

    assert_eq!(t.session_id.position, Position::point(80.0, 340.0));
    assert!(!t.session_id.multiline);
    assert_eq!(t.session_id.font.family, "fonts/Lato-Bold.ttf");
    assert_eq!(t.session_id.font.size, 48.0);

    assert_eq!(t.track.position, Position::point(80.0, 400.0));
    assert_eq!(t.track.font.size, 28.0);

    assert_eq!(t.title.position, Position::point(80.0, 440.0));
    assert!(t.title.multiline);

    for role in TextRole::ALL {
        let s = t.text_style(role);
        assert_eq!(s.wrap_width, 28);
        assert_eq!(s.font.color, Rgb8::WHITE);
    }
}

#[test]
fn element_copies_style_and_takes_content() {
    let t = StyleTable::default();
    let el = t.title.element("Kernel Debugging");
    assert_eq!(el.content, "Kernel Debugging");
    assert_eq!(el.position, t.title.position);
    assert_eq!(el.font, t.title.font);
    assert!(el.multiline);

    let img = t.avatar.element("avatars/jane-doe.jpg");
    assert_eq!(img.source, "avatars/jane-doe.jpg");
    assert_eq!(img.mask, ImageMask::Circle);
}

#[test]
fn table_round_trips_through_json_file() {
    let dir = std::path::PathBuf::from("target").join("style_table_json");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("styles.json");

    let mut t = StyleTable::default();
    t.track.font.color = Rgb8::new(10, 20, 30);
    t.caption_source = CaptionSource::Literal("Linaro Connect".to_string());
    std::fs::write(&path, serde_json::to_string_pretty(&t).unwrap()).unwrap();

    let loaded = StyleTable::from_json_file(&path).unwrap();
    assert_eq!(loaded, t);
}

#[test]
fn invalid_table_is_rejected_on_load() {
    let dir = std::path::PathBuf::from("target").join("style_table_invalid");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("styles.json");

    let mut t = StyleTable::default();
    t.caption.wrap_width = 0;
    std::fs::write(&path, serde_json::to_string(&t).unwrap()).unwrap();

    let err = StyleTable::from_json_file(&path).unwrap_err();
    assert!(err.to_string().contains("wrap_width"));
}

#[test]
fn caption_source_defaults_to_speaker_names() {
    let json = serde_json::to_value(StyleTable::default()).unwrap();
    let mut obj = json.as_object().unwrap().clone();
    obj.remove("caption_source");
    let t: StyleTable = serde_json::from_value(serde_json::Value::Object(obj)).unwrap();
    assert_eq!(t.caption_source, CaptionSource::SpeakerNames);
}
