use crate::{
    assets::text::{LoadedFont, TextLayoutEngine},
    foundation::error::{SharecardError, SharecardResult},
    layout::descriptor::TextElement,
};

/// Transparent full-canvas layer that text elements are rasterized onto.
pub struct TextLayer {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    drawn: usize,
}

impl TextLayer {
    /// Layer matching a `width` x `height` canvas.
    pub fn new(width: u32, height: u32) -> SharecardResult<Self> {
        let width: u16 = width
            .try_into()
            .map_err(|_| SharecardError::validation("text layer width exceeds u16"))?;
        let height: u16 = height
            .try_into()
            .map_err(|_| SharecardError::validation("text layer height exceeds u16"))?;
        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            drawn: 0,
        })
    }

    /// Shape and draw every line of `element` with `font`.
    pub fn draw_element(
        &mut self,
        engine: &mut TextLayoutEngine,
        element: &TextElement,
        font: &LoadedFont,
    ) -> SharecardResult<()> {
        let advance = f64::from(element.line_advance_px());
        let top = element.position.top();

        // Shape everything first so a bad font leaves no partial block behind.
        let mut shaped = Vec::new();
        for line in element.lines() {
            if line.is_empty() {
                continue;
            }
            let layout = engine.layout_plain(
                &line,
                &font.bytes,
                element.font.size,
                element.font.color.into(),
            )?;
            shaped.push(layout);
        }

        for (i, layout) in shaped.iter().enumerate() {
            let x = element.position.line_left(f64::from(layout.width()));
            let y = top + advance * i as f64;
            self.draw_layout(layout, &font.data, x, y);
        }
        Ok(())
    }

    fn draw_layout(
        &mut self,
        layout: &parley::Layout<crate::assets::text::TextBrushRgba8>,
        font: &vello_cpu::peniko::FontData,
        x: f64,
        y: f64,
    ) {
        let ctx = &mut self.ctx;
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((x, y)));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        self.drawn += 1;
    }

    /// Rasterize into premultiplied RGBA8 bytes, or `None` if nothing was drawn.
    pub fn finish(mut self) -> Option<Vec<u8>> {
        if self.drawn == 0 {
            return None;
        }
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Some(pixmap.data_as_u8_slice().to_vec())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
