use crate::foundation::error::{SharecardError, SharecardResult};

pub use kurbo::{Circle, Point};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
/// Opaque RGB color.
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Construct a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pure white, the default text color.
    pub const WHITE: Self = Self::new(255, 255, 255);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Target size in pixels for a placed image.
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Construct a size; both sides must be positive.
    pub fn new(width: u32, height: u32) -> SharecardResult<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    pub(crate) fn validate(self) -> SharecardResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SharecardError::validation(format!(
                "image size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Where a text block is anchored.
pub enum Position {
    /// Top-left anchor; lines start at `x` and stack downward from `y`.
    Point {
        /// Left edge in canvas pixels.
        x: f64,
        /// Top of the first line in canvas pixels.
        y: f64,
    },
    /// Every line is centered horizontally between `x_min` and `x_max`.
    CenteredRange {
        /// Left edge of the centering range.
        x_min: f64,
        /// Right edge of the centering range.
        x_max: f64,
        /// Top of the first line in canvas pixels.
        y: f64,
    },
}

impl Position {
    /// Convenience constructor for [`Position::Point`].
    pub const fn point(x: f64, y: f64) -> Self {
        Self::Point { x, y }
    }

    /// Convenience constructor for [`Position::CenteredRange`].
    pub const fn centered(x_min: f64, x_max: f64, y: f64) -> Self {
        Self::CenteredRange { x_min, x_max, y }
    }

    /// Whether lines are centered inside a horizontal range.
    pub fn is_centered(self) -> bool {
        matches!(self, Self::CenteredRange { .. })
    }

    /// Top coordinate of the first line.
    pub fn top(self) -> f64 {
        match self {
            Self::Point { y, .. } | Self::CenteredRange { y, .. } => y,
        }
    }

    /// Left edge of a line that is `line_width` pixels wide.
    pub fn line_left(self, line_width: f64) -> f64 {
        match self {
            Self::Point { x, .. } => x,
            Self::CenteredRange { x_min, x_max, .. } => {
                x_min + ((x_max - x_min) - line_width) / 2.0
            }
        }
    }

    pub(crate) fn validate(self) -> SharecardResult<()> {
        let finite = match self {
            Self::Point { x, y } => x.is_finite() && y.is_finite(),
            Self::CenteredRange { x_min, x_max, y } => {
                x_min.is_finite() && x_max.is_finite() && y.is_finite()
            }
        };
        if !finite {
            return Err(SharecardError::validation("text position must be finite"));
        }
        if let Self::CenteredRange { x_min, x_max, .. } = self
            && x_min > x_max
        {
            return Err(SharecardError::validation(format!(
                "centered range is inverted: x_min {x_min} > x_max {x_max}"
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Alpha mask applied to a placed image.
pub enum ImageMask {
    /// Keep the whole rectangle.
    #[default]
    None,
    /// Keep only the circle inscribed in the target box.
    Circle,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
