use std::io::Cursor;

use super::*;

#[test]
fn decode_image_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let prepared = decode_image(&buf).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_garbage_fails() {
    assert!(decode_image(b"definitely not an image").is_err());
}

#[test]
fn opaque_pixels_survive_premul_round_trip() {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([12, 200, 77, 255]));
    let prepared = PreparedImage::from_rgba(img.clone());
    assert_eq!(prepared.to_rgba().unwrap(), img);
}

#[test]
fn mismatched_buffer_is_an_error_not_a_blank_image() {
    let truncated = PreparedImage {
        width: 4,
        height: 4,
        rgba8_premul: vec![255; 4 * 4 * 4 - 4],
    };
    let err = truncated.to_rgba().unwrap_err();
    assert!(matches!(err, SharecardError::Validation(_)), "{err}");
    assert!(err.to_string().contains("4x4"));
}

#[test]
fn unpremultiply_restores_translucent_color_approximately() {
    let mut px = vec![200u8, 100, 50, 128];
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    for (got, want) in px.iter().zip([200u8, 100, 50, 128]) {
        assert!(got.abs_diff(want) <= 1, "{px:?}");
    }
}

#[test]
fn transparent_pixels_premultiply_to_zero() {
    let mut px = vec![255u8, 255, 255, 0];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0]);
}

#[test]
fn load_rgba_image_reports_path() {
    let err = load_rgba_image(Path::new("target/nope/missing.png")).unwrap_err();
    assert!(format!("{err:#}").contains("missing.png"));
}
