use super::*;

struct Fixed(Option<PathBuf>);

impl AvatarResolver for Fixed {
    fn resolve(&self, _speaker_name: &str, _avatar_url: &str) -> Option<PathBuf> {
        self.0.clone()
    }
}

#[test]
fn short_references_use_placeholder_without_asking_resolver() {
    let resolver = Fixed(Some(PathBuf::from("should/not/be/used.jpg")));
    for avatar in ["", "a", "ab", "  ab  "] {
        let speaker = SpeakerRecord::new("Jane Doe", avatar);
        assert_eq!(resolve_avatar(&resolver, &speaker), PLACEHOLDER_AVATAR);
    }
}

#[test]
fn three_characters_are_enough_to_ask_resolver() {
    let resolver = Fixed(Some(PathBuf::from("avatars/jane-doe.jpg")));
    let speaker = SpeakerRecord::new("Jane Doe", "abc");
    assert_eq!(resolve_avatar(&resolver, &speaker), "avatars/jane-doe.jpg");
}

#[test]
fn resolver_miss_falls_back_to_placeholder() {
    let speaker = SpeakerRecord::new("Jane Doe", "https://example.com/jane.jpg");
    assert_eq!(resolve_avatar(&Fixed(None), &speaker), PLACEHOLDER_AVATAR);
}

#[test]
fn resolve_speakers_fills_every_image() {
    let mut session = SessionRecord {
        session_id: "LVC21-101".to_string(),
        name: "Kernel Debugging".to_string(),
        event_type: "Technical Talk".to_string(),
        speakers: vec![
            SpeakerRecord::new("Jane Doe", "https://example.com/jane.jpg"),
            SpeakerRecord::new("John Roe", ""),
        ],
    };
    resolve_speakers(&mut session, &Fixed(Some(PathBuf::from("a.png"))));
    assert_eq!(session.speakers[0].image.as_deref(), Some("a.png"));
    assert_eq!(session.speakers[1].image.as_deref(), Some(PLACEHOLDER_AVATAR));
}

#[test]
fn slugify_matches_file_naming() {
    assert_eq!(slugify("Jane Doe"), "jane-doe");
    assert_eq!(slugify("  Dr. Jane   O'Doe  "), "dr-jane-o-doe");
    assert_eq!(slugify("---"), "");
}

#[test]
fn slugify_transliterates_accented_names() {
    assert_eq!(slugify("José Müller"), "jose-muller");
    assert_eq!(slugify("Zoë SMITH"), "zoe-smith");
    assert_eq!(slugify("Łukasz Øster-Straße"), "lukasz-oster-strasse");
    assert_eq!(slugify("李 Wei"), "wei");
}

#[test]
fn url_extension_ignores_query_and_unknown_types() {
    assert_eq!(
        url_extension("https://x/avatars/jane.PNG?size=300"),
        Some("png".to_string())
    );
    assert_eq!(url_extension("https://x/avatars/jane"), None);
    assert_eq!(url_extension("https://x/a.svg"), None);
}

#[test]
fn directory_resolver_finds_prefetched_file() {
    let dir = PathBuf::from("target").join("avatar_dir_resolver");
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("jane-doe.png");
    std::fs::write(&file, b"not really a png").unwrap();

    let resolver = DirectoryAvatarResolver::new(&dir);
    assert_eq!(
        resolver.resolve("Jane Doe", "https://example.com/jane.png"),
        Some(file.clone())
    );
    // The extension in the URL is only a hint.
    assert_eq!(
        resolver.resolve("Jane Doe", "https://example.com/jane.jpg"),
        Some(file)
    );
    assert_eq!(
        resolver.resolve("Nobody Here", "https://example.com/x.jpg"),
        None
    );
}
