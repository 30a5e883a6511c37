use std::path::PathBuf;

use super::*;
use crate::{
    assets::text::FontCache,
    foundation::core::{Position, Rgb8},
    layout::descriptor::FontSpec,
};

fn system_font() -> Option<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|p| p.is_file())
}

fn element(content: &str, position: Position, multiline: bool) -> TextElement {
    TextElement {
        content: content.to_string(),
        position,
        multiline,
        wrap_width: 10,
        font: FontSpec {
            family: String::new(),
            size: 20.0,
            color: Rgb8::WHITE,
        },
        line_advance: Some(30.0),
    }
}

fn opaque_rows(buf: &[u8], width: usize) -> Vec<usize> {
    buf.chunks_exact(width * 4)
        .enumerate()
        .filter(|(_, row)| row.chunks_exact(4).any(|px| px[3] > 0))
        .map(|(y, _)| y)
        .collect()
}

fn opaque_cols(buf: &[u8], width: usize) -> (usize, usize) {
    let mut min = usize::MAX;
    let mut max = 0;
    for row in buf.chunks_exact(width * 4) {
        for (x, px) in row.chunks_exact(4).enumerate() {
            if px[3] > 0 {
                min = min.min(x);
                max = max.max(x);
            }
        }
    }
    (min, max)
}

#[test]
fn oversized_canvas_is_rejected() {
    assert!(TextLayer::new(70_000, 10).is_err());
    assert!(TextLayer::new(10, 70_000).is_err());
}

#[test]
fn empty_layer_finishes_to_none() {
    let layer = TextLayer::new(16, 16).unwrap();
    assert!(layer.finish().is_none());
}

#[test]
fn multiline_text_stacks_lines_downward() {
    let Some(path) = system_font() else {
        eprintln!("no system font found, skipping");
        return;
    };
    let font = FontCache::new().load(&path).unwrap();
    let mut engine = TextLayoutEngine::new();
    let mut layer = TextLayer::new(200, 120).unwrap();

    let el = element("first line second", Position::point(5.0, 10.0), true);
    layer.draw_element(&mut engine, &el, &font).unwrap();

    let buf = layer.finish().unwrap();
    let rows = opaque_rows(&buf, 200);
    assert!(*rows.first().unwrap() >= 10);
    // Second line starts one advance below the first.
    assert!(*rows.last().unwrap() >= 40);
    assert!(*rows.last().unwrap() < 10 + 30 + 30);
}

#[test]
fn centered_text_is_centered_in_range() {
    let Some(path) = system_font() else {
        eprintln!("no system font found, skipping");
        return;
    };
    let font = FontCache::new().load(&path).unwrap();
    let mut engine = TextLayoutEngine::new();
    let mut layer = TextLayer::new(300, 60).unwrap();

    let el = element("Jane", Position::centered(100.0, 200.0, 10.0), true);
    layer.draw_element(&mut engine, &el, &font).unwrap();
    let buf = layer.finish().unwrap();

    let (min, max) = opaque_cols(&buf, 300);
    let mid = (min + max) as f64 / 2.0;
    assert!((mid - 150.0).abs() < 6.0, "ink centered at {mid}");
}
