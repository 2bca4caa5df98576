//! Premultiplied RGBA8 blending used by the layer merge and the background cross-fade.
//!
//! Weights are 8-bit: `0` keeps the destination untouched, `255` takes the source in full.

use crate::foundation::error::{HengeError, HengeResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::surface::Surface;

fn weight(t: f32) -> u16 {
    (t.clamp(0.0, 1.0) * 255.0).round() as u16
}

fn scale(c: u8, w: u16) -> u16 {
    mul_div255_u16(u16::from(c), w)
}

fn over_px(dst: &mut [u8], src: &[u8], w: u16) {
    let sa = scale(src[3], w);
    if sa == 0 {
        return;
    }
    let keep = 255 - sa;
    for c in 0..4 {
        let s = if c == 3 { sa } else { scale(src[c], w) };
        dst[c] = (s + scale(dst[c], keep)).min(255) as u8;
    }
}

fn mix_px(out: &mut [u8], from: &[u8], to: &[u8], w: u16) {
    for c in 0..4 {
        out[c] = (scale(from[c], 255 - w) + scale(to[c], w)).min(255) as u8;
    }
}

/// Source-over of premultiplied `src` bytes onto `dst` (rasterized pixmaps land here).
pub(crate) fn over_bytes(dst: &mut [u8], src: &[u8], opacity: f32) -> HengeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(HengeError::render(format!(
            "cannot draw {} rgba8 bytes over {}",
            src.len(),
            dst.len()
        )));
    }
    let w = weight(opacity);
    if w == 0 {
        return Ok(());
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        over_px(d, s, w);
    }
    Ok(())
}

/// Draws a whole layer over `dest`.
pub(crate) fn layer_over(dest: &mut Surface, layer: &Surface, opacity: f32) -> HengeResult<()> {
    if !dest.same_size(layer) {
        return Err(HengeError::render(format!(
            "layer {}x{} does not match target {}x{}",
            layer.width(),
            layer.height(),
            dest.width(),
            dest.height()
        )));
    }
    over_bytes(dest.data_mut(), layer.data(), opacity)
}

/// Replaces `dest` with the blend of two background snapshots; `t = 0` is `from`, `t = 1` is `to`.
pub(crate) fn blend_into(
    dest: &mut Surface,
    from: &Surface,
    to: &Surface,
    t: f32,
) -> HengeResult<()> {
    if !(dest.same_size(from) && dest.same_size(to)) {
        return Err(HengeError::render("cross-fade snapshots differ in size"));
    }
    let w = weight(t);
    for ((d, a), b) in dest
        .data_mut()
        .chunks_exact_mut(4)
        .zip(from.data().chunks_exact(4))
        .zip(to.data().chunks_exact(4))
    {
        mix_px(d, a, b, w);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
