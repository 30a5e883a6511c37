use crate::foundation::error::{SharecardError, SharecardResult};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over for premultiplied pixels, with `src` scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// [`over`] applied pixel by pixel to two equal-length buffers.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> SharecardResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(SharecardError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Placement of a smaller premultiplied buffer on a larger one.
pub struct Placement {
    /// Destination width in pixels.
    pub dst_width: u32,
    /// Destination height in pixels.
    pub dst_height: u32,
    /// Source width in pixels.
    pub src_width: u32,
    /// Source height in pixels.
    pub src_height: u32,
    /// Source top-left on the destination; may be negative.
    pub x: i64,
    /// Source top-left on the destination; may be negative.
    pub y: i64,
}

/// Composite `src` over `dst` at an offset, clipping whatever falls outside `dst`.
pub fn over_at(dst: &mut [u8], src: &[u8], p: Placement) -> SharecardResult<()> {
    let dst_len = p.dst_width as usize * p.dst_height as usize * 4;
    let src_len = p.src_width as usize * p.src_height as usize * 4;
    if dst.len() != dst_len || src.len() != src_len {
        return Err(SharecardError::validation(
            "over_at buffer lengths do not match their dimensions",
        ));
    }

    let x0 = p.x.max(0);
    let y0 = p.y.max(0);
    let x1 = (p.x + i64::from(p.src_width)).min(i64::from(p.dst_width));
    let y1 = (p.y + i64::from(p.src_height)).min(i64::from(p.dst_height));
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    let span = (x1 - x0) as usize * 4;
    for dy in y0..y1 {
        let sy = (dy - p.y) as usize;
        let sx = (x0 - p.x) as usize;
        let d_start = (dy as usize * p.dst_width as usize + x0 as usize) * 4;
        let s_start = (sy * p.src_width as usize + sx) * 4;
        over_in_place(
            &mut dst[d_start..d_start + span],
            &src[s_start..s_start + span],
            1.0,
        )?;
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
