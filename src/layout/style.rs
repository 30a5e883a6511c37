use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;

use crate::{
    foundation::{
        core::{ImageMask, Position, Rgb8, Size},
        error::{SharecardError, SharecardResult},
    },
    layout::descriptor::{FontSpec, ImageElement, TextElement},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Text blocks every session card carries, in paint order.
pub enum TextRole {
    /// Centered block under the avatar.
    Caption,
    /// Session identifier, e.g. `LVC21-101`.
    SessionId,
    /// Event type or track label.
    Track,
    /// Session title.
    Title,
}

impl TextRole {
    /// Paint order of the text blocks.
    pub const ALL: [TextRole; 4] = [Self::Caption, Self::SessionId, Self::Track, Self::Title];
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Geometry and font of one text role.
pub struct TextStyle {
    /// Anchor of the first line.
    pub position: Position,
    /// Wrap content at `wrap_width` characters.
    pub multiline: bool,
    /// Characters per line.
    pub wrap_width: usize,
    /// Font and color.
    pub font: FontSpec,
    /// Optional explicit line advance in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_advance: Option<f32>,
}

impl TextStyle {
    /// Pair this style with per-session content.
    pub fn element(&self, content: impl Into<String>) -> TextElement {
        TextElement {
            content: content.into(),
            position: self.position,
            multiline: self.multiline,
            wrap_width: self.wrap_width,
            font: self.font.clone(),
            line_advance: self.line_advance,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Geometry of the speaker avatar.
pub struct ImageStyle {
    /// Box the avatar is scaled to.
    pub size: Size,
    /// Top-left corner on the canvas.
    pub x: i64,
    /// Top-left corner on the canvas.
    pub y: i64,
    /// Mask applied before compositing.
    #[serde(default)]
    pub mask: ImageMask,
}

impl ImageStyle {
    /// Pair this style with an image path.
    pub fn element(&self, source: impl Into<String>) -> ImageElement {
        ImageElement {
            source: source.into(),
            size: self.size,
            x: self.x,
            y: self.y,
            mask: self.mask,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
/// Where the caption under the avatar gets its text.
///
/// Defaults to [`CaptionSource::SpeakerNames`]. A session without speakers then gets an empty
/// caption and its card shows three text blocks; use [`CaptionSource::Literal`] to draw a fixed
/// placeholder caption on every card instead.
pub enum CaptionSource {
    /// Speaker display names joined with `", "`; empty when the session has no speakers.
    #[default]
    SpeakerNames,
    /// The same literal on every card.
    Literal(String),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Static design constants per role; nothing here depends on session data.
pub struct StyleTable {
    /// Speaker avatar.
    pub avatar: ImageStyle,
    /// Caption block.
    pub caption: TextStyle,
    /// Session identifier.
    pub session_id: TextStyle,
    /// Track label.
    pub track: TextStyle,
    /// Session title.
    pub title: TextStyle,
    /// Caption content source; speaker names unless set.
    #[serde(default)]
    pub caption_source: CaptionSource,
}

const REGULAR_FONT: &str = "fonts/Lato-Regular.ttf";
const BOLD_FONT: &str = "fonts/Lato-Bold.ttf";
const WRAP_WIDTH: usize = 28;

fn font(family: &str, size: f32) -> FontSpec {
    FontSpec {
        family: family.to_string(),
        size,
        color: Rgb8::WHITE,
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            avatar: ImageStyle {
                size: Size {
                    width: 300,
                    height: 300,
                },
                x: 820,
                y: 80,
                mask: ImageMask::Circle,
            },
            caption: TextStyle {
                position: Position::centered(920.0, 970.0, 400.0),
                multiline: true,
                wrap_width: WRAP_WIDTH,
                font: font(REGULAR_FONT, 32.0),
                line_advance: None,
            },
            session_id: TextStyle {
                position: Position::point(80.0, 340.0),
                multiline: false,
                wrap_width: WRAP_WIDTH,
                font: font(BOLD_FONT, 48.0),
                line_advance: None,
            },
            track: TextStyle {
                position: Position::point(80.0, 400.0),
                multiline: false,
                wrap_width: WRAP_WIDTH,
                font: font(BOLD_FONT, 28.0),
                line_advance: None,
            },
            title: TextStyle {
                position: Position::point(80.0, 440.0),
                multiline: true,
                wrap_width: WRAP_WIDTH,
                font: font(BOLD_FONT, 48.0),
                line_advance: None,
            },
            caption_source: CaptionSource::default(),
        }
    }
}

impl StyleTable {
    /// Style for a text role.
    pub fn text_style(&self, role: TextRole) -> &TextStyle {
        match role {
            TextRole::Caption => &self.caption,
            TextRole::SessionId => &self.session_id,
            TextRole::Track => &self.track,
            TextRole::Title => &self.title,
        }
    }

    /// Read a style table from JSON, e.g. to restyle cards for another event.
    pub fn from_json_file(path: &Path) -> SharecardResult<Self> {
        let f =
            File::open(path).with_context(|| format!("open style table '{}'", path.display()))?;
        let table: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            SharecardError::serde(format!("parse style table '{}': {e}", path.display()))
        })?;
        table.validate()?;
        Ok(table)
    }

    /// Reject styles that would produce invalid layout descriptors.
    pub fn validate(&self) -> SharecardResult<()> {
        self.avatar.size.validate()?;
        for role in TextRole::ALL {
            let style = self.text_style(role);
            if style.wrap_width == 0 {
                return Err(SharecardError::validation(format!(
                    "{role:?} style: wrap_width must be > 0"
                )));
            }
            if !style.font.size.is_finite() || style.font.size <= 0.0 {
                return Err(SharecardError::validation(format!(
                    "{role:?} style: font size must be finite and > 0"
                )));
            }
            style.position.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/style.rs"]
mod tests;
