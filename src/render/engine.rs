use std::path::PathBuf;

use anyhow::Context;

use crate::{
    assets::{
        decode::{PreparedImage, decode_image, load_rgba_image},
        text::{FontCache, TextLayoutEngine},
    },
    foundation::{
        config::EngineConfig,
        core::ImageMask,
        error::{SharecardError, SharecardResult, chain_message},
    },
    layout::descriptor::{ImageElement, LayoutDescriptor},
    render::{
        composite::{Placement, over_at, over_in_place},
        mask::apply_circle_mask,
        text::TextLayer,
    },
};

const MAX_CANVAS_SIDE: u32 = u16::MAX as u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Element of a layout descriptor, by kind and index.
pub enum ElementRef {
    /// Index into [`LayoutDescriptor::images`].
    Image(usize),
    /// Index into [`LayoutDescriptor::texts`].
    Text(usize),
}

impl std::fmt::Display for ElementRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image(i) => write!(f, "image {i}"),
            Self::Text(i) => write!(f, "text {i}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// An element left out of a render because its image or font could not be loaded.
pub struct SkippedElement {
    /// Which element.
    pub element: ElementRef,
    /// Load error message.
    pub reason: String,
}

/// Canvas after compositing, before it is written out.
#[derive(Clone, Debug)]
pub struct RenderedImage {
    /// Premultiplied pixels; same size as the template.
    pub canvas: PreparedImage,
    /// Elements that were skipped.
    pub skipped: Vec<SkippedElement>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Result of a successful [`CompositionEngine::create_image`].
pub struct RenderOutcome {
    /// Written PNG.
    pub path: PathBuf,
    /// Width of the written image.
    pub width: u32,
    /// Height of the written image.
    pub height: u32,
    /// Elements that were skipped.
    pub skipped: Vec<SkippedElement>,
}

/// Renders layout descriptors over a fixed template into a fixed output directory.
#[derive(Clone, Debug)]
pub struct CompositionEngine {
    config: EngineConfig,
}

impl CompositionEngine {
    /// Engine bound to `config`.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Render `layout` and write `<output>/<output_key>.png`, replacing any previous file with
    /// that name.
    #[tracing::instrument(skip(self, layout), fields(key = %layout.output_key))]
    pub fn create_image(&self, layout: &LayoutDescriptor) -> SharecardResult<RenderOutcome> {
        let rendered = self.render(layout)?;
        let path = self.config.output_path_for(&layout.output_key);
        self.write_png(&rendered.canvas, &path)?;
        tracing::info!(path = %path.display(), skipped = rendered.skipped.len(), "wrote image");

        Ok(RenderOutcome {
            path,
            width: rendered.canvas.width,
            height: rendered.canvas.height,
            skipped: rendered.skipped,
        })
    }

    /// Composite `layout` over the template in memory.
    pub fn render(&self, layout: &LayoutDescriptor) -> SharecardResult<RenderedImage> {
        layout.validate()?;
        let mut canvas = self.load_template()?;
        let mut skipped = Vec::new();

        for (i, el) in layout.images.iter().enumerate() {
            let placed = match self.prepare_image(el) {
                Ok(img) => img,
                Err(e) => {
                    skip(&mut skipped, ElementRef::Image(i), &e);
                    continue;
                }
            };
            over_at(
                &mut canvas.rgba8_premul,
                &placed.rgba8_premul,
                Placement {
                    dst_width: canvas.width,
                    dst_height: canvas.height,
                    src_width: placed.width,
                    src_height: placed.height,
                    x: el.x,
                    y: el.y,
                },
            )?;
        }

        if !layout.texts.is_empty() {
            let mut fonts = FontCache::new();
            let mut engine = TextLayoutEngine::new();
            let mut layer = TextLayer::new(canvas.width, canvas.height)?;

            for (i, el) in layout.texts.iter().enumerate() {
                let font_path = self.config.resolve_asset(&el.font.family);
                let drawn = fonts
                    .load(&font_path)
                    .and_then(|font| layer.draw_element(&mut engine, el, &font));
                if let Err(e) = drawn {
                    skip(&mut skipped, ElementRef::Text(i), &e);
                }
            }

            if let Some(text_pixels) = layer.finish() {
                over_in_place(&mut canvas.rgba8_premul, &text_pixels, 1.0)?;
            }
        }

        Ok(RenderedImage { canvas, skipped })
    }

    fn load_template(&self) -> SharecardResult<PreparedImage> {
        let path = &self.config.template;
        let bytes = std::fs::read(path)
            .with_context(|| format!("read template '{}'", path.display()))
            .map_err(|e| SharecardError::template_load(chain_message(&e)))?;
        let canvas = decode_image(&bytes).map_err(|e| {
            SharecardError::template_load(format!("decode template '{}': {e}", path.display()))
        })?;
        if canvas.width > MAX_CANVAS_SIDE || canvas.height > MAX_CANVAS_SIDE {
            return Err(SharecardError::template_load(format!(
                "template '{}' is {}x{}, larger than {MAX_CANVAS_SIDE} px per side",
                path.display(),
                canvas.width,
                canvas.height
            )));
        }
        Ok(canvas)
    }

    /// Load, scale and mask one image element into premultiplied pixels of its target size.
    fn prepare_image(&self, el: &ImageElement) -> SharecardResult<PreparedImage> {
        let path = self.config.resolve_asset(&el.source);
        let source =
            load_rgba_image(&path).map_err(|e| SharecardError::asset_load(chain_message(&e)))?;

        let mut scaled = if source.dimensions() == (el.size.width, el.size.height) {
            source
        } else {
            image::imageops::resize(
                &source,
                el.size.width,
                el.size.height,
                image::imageops::FilterType::Lanczos3,
            )
        };

        match el.mask {
            ImageMask::Circle => apply_circle_mask(&mut scaled),
            ImageMask::None => {}
        }
        Ok(PreparedImage::from_rgba(scaled))
    }

    fn write_png(&self, canvas: &PreparedImage, path: &std::path::Path) -> SharecardResult<()> {
        let rgba = canvas.to_rgba()?;
        std::fs::create_dir_all(&self.config.output)
            .with_context(|| format!("create output dir '{}'", self.config.output.display()))
            .map_err(|e| SharecardError::write(chain_message(&e)))?;

        rgba.save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))
            .map_err(|e| SharecardError::write(chain_message(&e)))
    }
}

fn skip(skipped: &mut Vec<SkippedElement>, element: ElementRef, err: &SharecardError) {
    tracing::warn!(%element, error = %err, "skipping element");
    skipped.push(SkippedElement {
        element,
        reason: err.to_string(),
    });
}
