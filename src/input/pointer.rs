use crate::foundation::core::{Canvas, Point, Vec2};
use crate::foundation::error::{HengeError, HengeResult};

/// Converts raw pointer coordinates into design units, once, at the input boundary.
///
/// The canvas is fitted into the viewport preserving aspect ratio and centred (letterboxed).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerMapper {
    /// CSS pixels per design unit.
    scale: f64,
    /// CSS offset of the canvas origin inside the viewport.
    offset: Vec2,
    /// Device pixels per CSS pixel.
    device_pixel_ratio: f64,
}

impl PointerMapper {
    /// One CSS pixel per design unit, no offset.
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
            device_pixel_ratio: 1.0,
        }
    }

    /// Letterboxes `canvas` into a CSS viewport of the given size.
    pub fn fit(
        canvas: Canvas,
        viewport_width: f64,
        viewport_height: f64,
        device_pixel_ratio: f64,
    ) -> HengeResult<Self> {
        if !(viewport_width.is_finite()
            && viewport_height.is_finite()
            && viewport_width > 0.0
            && viewport_height > 0.0)
        {
            return Err(HengeError::validation("viewport size must be finite and > 0"));
        }
        if !(device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0) {
            return Err(HengeError::validation(
                "device pixel ratio must be finite and > 0",
            ));
        }
        let cw = f64::from(canvas.width);
        let ch = f64::from(canvas.height);
        let scale = (viewport_width / cw).min(viewport_height / ch);
        let offset = Vec2::new(
            (viewport_width - cw * scale) / 2.0,
            (viewport_height - ch * scale) / 2.0,
        );
        Ok(Self {
            scale,
            offset,
            device_pixel_ratio,
        })
    }

    /// CSS pixels per design unit.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// CSS pixel to design units.
    pub fn from_css(&self, x: f64, y: f64) -> Point {
        Point::new(
            (x - self.offset.x) / self.scale,
            (y - self.offset.y) / self.scale,
        )
    }

    /// Device pixel to design units.
    pub fn from_device(&self, x: f64, y: f64) -> Point {
        self.from_css(x / self.device_pixel_ratio, y / self.device_pixel_ratio)
    }
}

impl Default for PointerMapper {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/pointer.rs"]
mod tests;
