use kurbo::Shape;

use crate::foundation::core::{Circle, Point};

/// Circle inscribed in a `width` x `height` box.
pub fn inscribed_circle(width: u32, height: u32) -> Circle {
    let (w, h) = (f64::from(width), f64::from(height));
    Circle::new(Point::new(w / 2.0, h / 2.0), w.min(h) / 2.0)
}

/// Make every pixel whose center lies outside the inscribed circle fully transparent.
pub fn apply_circle_mask(img: &mut image::RgbaImage) {
    let circle = inscribed_circle(img.width(), img.height());
    for (x, y, px) in img.enumerate_pixels_mut() {
        let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
        if !circle.contains(center) {
            px.0 = [0, 0, 0, 0];
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/mask.rs"]
mod tests;
