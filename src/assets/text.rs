use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::foundation::{
    core::Rgb8,
    error::{SharecardError, SharecardResult, chain_message},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgb8> for TextBrushRgba8 {
    fn from(c: Rgb8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

/// Font bytes loaded for one render, ready for both shaping and rasterization.
#[derive(Clone)]
pub struct LoadedFont {
    /// Raw font file contents.
    pub bytes: Arc<Vec<u8>>,
    /// Glyph source for `vello_cpu`.
    pub data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// Fonts read during a single render, keyed by resolved path.
///
/// Failures are remembered too, so a missing font is reported once per text element but only
/// read from disk once.
#[derive(Debug, Default)]
pub struct FontCache {
    fonts: HashMap<PathBuf, Result<LoadedFont, String>>,
}

impl FontCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `path`, or return the cached result. Errors are [`SharecardError::AssetLoad`].
    pub fn load(&mut self, path: &Path) -> SharecardResult<LoadedFont> {
        let entry = self
            .fonts
            .entry(path.to_path_buf())
            .or_insert_with(|| read_font(path).map_err(|e| chain_message(&e)));
        entry.clone().map_err(SharecardError::asset_load)
    }
}

fn read_font(path: &Path) -> anyhow::Result<LoadedFont> {
    let bytes = std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
    if bytes.is_empty() {
        anyhow::bail!("font file '{}' is empty", path.display());
    }
    let data =
        vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), 0);
    Ok(LoadedFont {
        bytes: Arc::new(bytes),
        data,
    })
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: HashMap<usize, (Arc<Vec<u8>>, String)>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new layout engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    /// Register font bytes once per buffer and return the family name Parley knows them by.
    fn family_for(&mut self, font_bytes: &Arc<Vec<u8>>) -> SharecardResult<String> {
        let key = Arc::as_ptr(font_bytes) as usize;
        if let Some((_, name)) = self.families.get(&key) {
            return Ok(name.clone());
        }

        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font_bytes.as_ref().clone()),
            None,
        );
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            SharecardError::asset_load("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SharecardError::asset_load("registered font family has no name"))?
            .to_string();
        // Holding the Arc keeps the address from being reused by another buffer.
        self.families
            .insert(key, (Arc::clone(font_bytes), family_name.clone()));
        Ok(family_name)
    }

    /// Shape one unbroken line of plain text using provided font bytes and styling.
    pub fn layout_plain(
        &mut self,
        text: &str,
        font_bytes: &Arc<Vec<u8>>,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> SharecardResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SharecardError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family_name = self.family_for(font_bytes)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
