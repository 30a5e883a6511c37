use super::*;

const SYSTEM_FONTS: [&str; 3] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

fn system_font() -> Option<PathBuf> {
    SYSTEM_FONTS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

#[test]
fn missing_font_is_an_asset_error_and_cached() {
    let mut cache = FontCache::new();
    let path = Path::new("target/fonts/does-not-exist.ttf");
    let err = cache.load(path).unwrap_err();
    assert!(matches!(err, SharecardError::AssetLoad(_)), "{err}");
    assert!(err.to_string().contains("does-not-exist.ttf"));
    assert!(cache.load(path).is_err());
    assert_eq!(cache.fonts.len(), 1);
}

#[test]
fn empty_font_file_is_rejected() {
    let dir = PathBuf::from("target").join("font_cache_empty");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("empty.ttf");
    std::fs::write(&path, b"").unwrap();

    let err = FontCache::new().load(&path).unwrap_err();
    assert!(err.to_string().contains("empty"));
}

#[test]
fn garbage_bytes_do_not_register_a_family() {
    let mut engine = TextLayoutEngine::new();
    let bytes = Arc::new(b"not a font at all".to_vec());
    // `parley::Layout` is not `Debug`, so match instead of `unwrap_err`.
    let Err(err) = engine.layout_plain("x", &bytes, 16.0, Rgb8::WHITE.into()) else {
        panic!("garbage bytes must not shape");
    };
    assert!(matches!(err, SharecardError::AssetLoad(_)), "{err}");
    assert!(engine.families.is_empty());
}

#[test]
fn invalid_size_is_rejected_before_shaping() {
    let mut engine = TextLayoutEngine::new();
    let bytes = Arc::new(Vec::new());
    assert!(matches!(
        engine.layout_plain("x", &bytes, 0.0, TextBrushRgba8::default()),
        Err(SharecardError::Validation(_))
    ));
}

#[test]
fn system_font_lays_out_with_width() {
    let Some(path) = system_font() else {
        eprintln!("no system font found, skipping");
        return;
    };
    let font = FontCache::new().load(&path).unwrap();
    let mut engine = TextLayoutEngine::new();

    let short = engine
        .layout_plain("LVC21", &font.bytes, 32.0, Rgb8::WHITE.into())
        .unwrap();
    let long = engine
        .layout_plain("LVC21-101 Kernel", &font.bytes, 32.0, Rgb8::WHITE.into())
        .unwrap();
    assert!(short.width() > 0.0);
    assert!(long.width() > short.width());
    // Same buffer, one registration.
    assert_eq!(engine.families.len(), 1);
}

#[test]
fn brush_from_rgb_is_opaque() {
    let b: TextBrushRgba8 = Rgb8::new(1, 2, 3).into();
    assert_eq!(
        b,
        TextBrushRgba8 {
            r: 1,
            g: 2,
            b: 3,
            a: 255
        }
    );
}
