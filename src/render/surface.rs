use crate::effects::composite::layer_over;
use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{HengeError, HengeResult};

/// CPU drawing surface holding premultiplied RGBA8 pixels, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Surface {
    /// Transparent surface covering `canvas`.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0u8; canvas.byte_len()],
        }
    }

    /// Wraps premultiplied RGBA8 bytes; the length must match `width x height`.
    pub fn from_premul_bytes(width: u32, height: u32, data: Vec<u8>) -> HengeResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| HengeError::render("surface size overflow"))?;
        if data.len() != expected {
            return Err(HengeError::render(format!(
                "surface byte length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Canvas this surface covers.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable pixel bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// `true` when both surfaces cover the same canvas.
    pub fn same_size(&self, other: &Surface) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Transparent black everywhere.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Solid fill.
    pub fn fill(&mut self, color: Rgba8Premul) {
        let px = color.to_array();
        for d in self.data.chunks_exact_mut(4) {
            d.copy_from_slice(&px);
        }
    }

    /// Vertical gradient, `bottom` at the last row and `top` at the first (as canvas gradients
    /// drawn from `(0, h)` to `(0, 0)`).
    pub fn fill_vertical_gradient(&mut self, bottom: Rgba8Premul, top: Rgba8Premul) {
        let row_bytes = self.width as usize * 4;
        if row_bytes == 0 {
            return;
        }
        let last = self.height.saturating_sub(1).max(1) as f64;
        for (y, row) in self.data.chunks_exact_mut(row_bytes).enumerate() {
            let t = 1.0 - (y as f64 / last);
            let px = top.lerp(bottom, t).to_array();
            for d in row.chunks_exact_mut(4) {
                d.copy_from_slice(&px);
            }
        }
    }

    /// Pixel at `(x, y)`, or `None` off the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Overwrites this surface with `src`.
    pub fn copy_from(&mut self, src: &Surface) -> HengeResult<()> {
        if !self.same_size(src) {
            return Err(HengeError::render(format!(
                "copy_from size mismatch: {}x{} <- {}x{}",
                self.width, self.height, src.width, src.height
            )));
        }
        self.data.copy_from_slice(&src.data);
        Ok(())
    }

    /// Source-over blit of `src` onto this surface.
    pub fn blit_over(&mut self, src: &Surface, opacity: f32) -> HengeResult<()> {
        layer_over(self, src, opacity)
    }

    /// `true` when fully transparent; the compositor skips blank layers.
    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
