use crate::foundation::{
    core::{ImageMask, Position, Rgb8, Size},
    error::{SharecardError, SharecardResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Declarative description of one output image.
///
/// Paint order is the element order: every image in `images`, then every text block in `texts`,
/// all over the background template.
pub struct LayoutDescriptor {
    /// File stem of the rendered PNG.
    pub output_key: String,
    /// Images composited first, in order.
    #[serde(default)]
    pub images: Vec<ImageElement>,
    /// Text blocks drawn after the images, in order.
    #[serde(default)]
    pub texts: Vec<TextElement>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A bitmap scaled into a box and composited at a fixed position.
pub struct ImageElement {
    /// Local image path.
    pub source: String,
    /// Box the source is scaled to.
    pub size: Size,
    /// Top-left corner of the box on the canvas.
    pub x: i64,
    /// Top-left corner of the box on the canvas.
    pub y: i64,
    /// Optional alpha mask.
    #[serde(default)]
    pub mask: ImageMask,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A styled text block, optionally wrapped onto several lines.
pub struct TextElement {
    /// Literal text.
    pub content: String,
    /// Anchor of the first line.
    pub position: Position,
    /// Wrap `content` at `wrap_width` characters.
    #[serde(default)]
    pub multiline: bool,
    /// Characters per line when `multiline` is set.
    pub wrap_width: usize,
    /// Font and color.
    pub font: FontSpec,
    /// Vertical distance between stacked lines; defaults to [`DEFAULT_LINE_ADVANCE`] times the
    /// font size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_advance: Option<f32>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Font file, size and fill color of a text block.
pub struct FontSpec {
    /// Path to a TrueType/OpenType file.
    pub family: String,
    /// Font size in pixels.
    pub size: f32,
    /// Fill color.
    pub color: Rgb8,
}

/// Line advance as a multiple of font size when a text element does not set one.
pub const DEFAULT_LINE_ADVANCE: f32 = 1.2;

impl TextElement {
    /// Whether lines are centered in a horizontal range.
    pub fn is_centered(&self) -> bool {
        self.position.is_centered()
    }

    /// Effective distance between consecutive lines.
    pub fn line_advance_px(&self) -> f32 {
        self.line_advance
            .unwrap_or(self.font.size * DEFAULT_LINE_ADVANCE)
    }

    /// Lines as they will be drawn.
    pub fn lines(&self) -> Vec<String> {
        if self.multiline {
            crate::layout::wrap::wrap_text(&self.content, self.wrap_width)
        } else {
            vec![self.content.clone()]
        }
    }

    fn validate(&self, index: usize) -> SharecardResult<()> {
        if self.wrap_width == 0 {
            return Err(SharecardError::validation(format!(
                "text {index}: wrap_width must be > 0"
            )));
        }
        if !self.font.size.is_finite() || self.font.size <= 0.0 {
            return Err(SharecardError::validation(format!(
                "text {index}: font size must be finite and > 0"
            )));
        }
        if let Some(adv) = self.line_advance
            && (!adv.is_finite() || adv <= 0.0)
        {
            return Err(SharecardError::validation(format!(
                "text {index}: line_advance must be finite and > 0"
            )));
        }
        if self.font.family.trim().is_empty() {
            return Err(SharecardError::validation(format!(
                "text {index}: font family path must be non-empty"
            )));
        }
        self.position
            .validate()
            .map_err(|e| SharecardError::validation(format!("text {index}: {e}")))
    }
}

impl LayoutDescriptor {
    /// Empty descriptor for `output_key`.
    pub fn new(output_key: impl Into<String>) -> Self {
        Self {
            output_key: output_key.into(),
            images: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// Check the structural invariants the renderer relies on.
    pub fn validate(&self) -> SharecardResult<()> {
        validate_output_key(&self.output_key)?;
        for (i, img) in self.images.iter().enumerate() {
            img.size
                .validate()
                .map_err(|e| SharecardError::validation(format!("image {i}: {e}")))?;
        }
        for (i, t) in self.texts.iter().enumerate() {
            t.validate(i)?;
        }
        Ok(())
    }

    /// Parse a descriptor from JSON.
    pub fn from_json_str(s: &str) -> SharecardResult<Self> {
        serde_json::from_str(s).map_err(|e| SharecardError::serde(e.to_string()))
    }

    /// Pretty JSON form, as printed by `sharecard describe`.
    pub fn to_json_pretty(&self) -> SharecardResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SharecardError::serde(e.to_string()))
    }
}

fn validate_output_key(key: &str) -> SharecardResult<()> {
    if key.trim().is_empty() {
        return Err(SharecardError::validation("output key must be non-empty"));
    }
    if key == "." || key == ".." || key.contains(['/', '\\']) {
        return Err(SharecardError::validation(format!(
            "output key '{key}' must be a plain file stem"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/descriptor.rs"]
mod tests;
