//! Layer painters.
//!
//! Sprite art, theme gradients and text shaping belong to the host. The traits here are the seams
//! the session draws through; the CPU implementations rasterize simple vector stand-ins with
//! `vello_cpu` so a session renders something meaningful without any host assets.

use vello_cpu::kurbo::Shape as _;

use crate::foundation::core::{Point, Rgba8Premul};
use crate::foundation::error::{HengeError, HengeResult};
use crate::geometry::ring::SlotGeometry;
use crate::render::surface::Surface;
use crate::sequence::family::Family;
use crate::view::machine::View;
use crate::view::status::StatusSnapshot;
use crate::view::text::TextLabel;

/// One sprite placement handed to a [`SpriteProvider`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteDraw {
    /// Centre, horizontal.
    pub x: f64,
    /// Centre, vertical.
    pub y: f64,
    /// Sprite width.
    pub width: f64,
    /// Sprite height.
    pub height: f64,
    /// Rotation in radians.
    pub angle: f64,
    /// Family of the slot.
    pub family: Family,
    /// Lit in the current state.
    pub active: bool,
}

impl SpriteDraw {
    /// Placement of `slot` for the current state.
    pub fn from_slot(slot: &SlotGeometry, family: Family, active: bool) -> Self {
        Self {
            x: slot.x,
            y: slot.y,
            width: slot.width,
            height: slot.height,
            angle: slot.angle,
            family,
            active,
        }
    }
}

/// Sprite bitmap source. Drawing before [`SpriteProvider::is_ready`] is skipped by the caller.
pub trait SpriteProvider {
    /// `false` until the provider can draw (e.g. its atlas is still loading).
    fn is_ready(&self) -> bool;

    /// Builds whatever the provider needs for these slots (atlas, cached paths).
    fn prepare(&mut self, slots: &[SlotGeometry]) -> HengeResult<()>;

    /// Draws every sprite onto the cleared sprite layer, in order.
    fn draw_ring(&mut self, surface: &mut Surface, sprites: &[SpriteDraw]) -> HengeResult<()>;
}

/// Renders the labels of a view into the text layer.
pub trait TextProvider {
    /// Draws `labels` for `view`; `snapshot` carries the live values.
    fn render_view(
        &mut self,
        surface: &mut Surface,
        view: View,
        labels: &[TextLabel],
        snapshot: &StatusSnapshot,
    ) -> HengeResult<()>;
}

/// Background theme painter.
pub trait BackdropPainter {
    /// `None` is the neutral theme.
    fn paint(&self, surface: &mut Surface, theme: Option<Family>) -> HengeResult<()>;
}

/// Fire-and-forget hook for audio. Failures are logged by the session and never change state.
pub trait TapListener {
    /// Called once per tap on a lit slot.
    fn on_family_tapped(&mut self, family: Family) -> anyhow::Result<()>;
}

/// Runs `draw` on a fresh transparent `vello_cpu` context and composites the result over
/// `surface`.
fn rasterize_over<F>(surface: &mut Surface, draw: F) -> HengeResult<()>
where
    F: FnOnce(&mut vello_cpu::RenderContext),
{
    let w: u16 = surface
        .width()
        .try_into()
        .map_err(|_| HengeError::render("surface width exceeds u16"))?;
    let h: u16 = surface
        .height()
        .try_into()
        .map_err(|_| HengeError::render("surface height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    draw(&mut ctx);
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    crate::effects::composite::over_bytes(surface.data_mut(), pixmap.data_as_u8_slice(), 1.0)
}

fn paint_color(c: Rgba8Premul) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

/// Rounded "phone" bodies: a dark case with a screen lit in the family colour when active.
#[derive(Debug, Default)]
pub struct VectorSprites {
    ready: bool,
}

impl VectorSprites {
    /// Not ready until [`SpriteProvider::prepare`] runs.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpriteProvider for VectorSprites {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn prepare(&mut self, slots: &[SlotGeometry]) -> HengeResult<()> {
        tracing::debug!(slots = slots.len(), "vector sprites prepared");
        self.ready = true;
        Ok(())
    }

    fn draw_ring(&mut self, surface: &mut Surface, sprites: &[SpriteDraw]) -> HengeResult<()> {
        if sprites.is_empty() {
            return Ok(());
        }
        rasterize_over(surface, |ctx| {
            for s in sprites {
                let (hw, hh) = (s.width / 2.0, s.height / 2.0);
                let corner = s.width.min(s.height) * 0.18;
                ctx.set_transform(
                    vello_cpu::kurbo::Affine::translate((s.x, s.y))
                        * vello_cpu::kurbo::Affine::rotate(s.angle),
                );

                let case = vello_cpu::kurbo::RoundedRect::new(-hw, -hh, hw, hh, corner);
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(24, 24, 28, 255));
                ctx.fill_path(&case.to_path(0.1));

                let inset = s.width * 0.12;
                let screen = vello_cpu::kurbo::Rect::new(
                    -hw + inset,
                    -hh + inset * 1.6,
                    hw - inset,
                    hh - inset * 1.6,
                );
                if s.active {
                    ctx.set_paint(paint_color(s.family.color()));
                    ctx.fill_rect(&screen);
                } else {
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(52, 52, 58, 255));
                    ctx.fill_rect(&screen);
                }
            }
        })
    }
}

/// Vertical gradients: a near-black neutral theme, or the family colour fading into black.
#[derive(Clone, Copy, Debug, Default)]
pub struct GradientBackdrop;

impl GradientBackdrop {
    /// `(bottom, top)` gradient colours for a theme.
    pub fn colors(theme: Option<Family>) -> (Rgba8Premul, Rgba8Premul) {
        let black = Rgba8Premul::opaque(0, 0, 0);
        match theme {
            None => (black, Rgba8Premul::opaque(28, 30, 40)),
            Some(f) => (black, f.color().lerp(black, 0.35)),
        }
    }
}

impl BackdropPainter for GradientBackdrop {
    fn paint(&self, surface: &mut Surface, theme: Option<Family>) -> HengeResult<()> {
        let (bottom, top) = Self::colors(theme);
        surface.fill_vertical_gradient(bottom, top);
        Ok(())
    }
}

/// Draws a translucent plate behind each label, sized from the label's length and font size.
///
/// Glyph shaping needs host fonts; hosts that have them install their own [`TextProvider`].
#[derive(Debug, Default)]
pub struct LabelPlates;

impl LabelPlates {
    /// Plate bounds for a label, centred on its anchor.
    pub fn plate_rect(label: &TextLabel) -> vello_cpu::kurbo::Rect {
        let chars = label.text.chars().count().max(1) as f64;
        let w = chars * label.size * 0.55 + label.size * 0.5;
        let h = label.size * 1.3;
        let Point { x, y } = label.position;
        vello_cpu::kurbo::Rect::new(x - w / 2.0, y - h / 2.0, x + w / 2.0, y + h / 2.0)
    }
}

impl TextProvider for LabelPlates {
    fn render_view(
        &mut self,
        surface: &mut Surface,
        view: View,
        labels: &[TextLabel],
        _snapshot: &StatusSnapshot,
    ) -> HengeResult<()> {
        if labels.is_empty() {
            return Ok(());
        }
        let alpha = if view == View::Running { 96 } else { 160 };
        rasterize_over(surface, |ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, alpha));
            for label in labels {
                let r = Self::plate_rect(label);
                let plate = vello_cpu::kurbo::RoundedRect::from_rect(r, label.size * 0.3);
                ctx.fill_path(&plate.to_path(0.1));
            }
        })
    }
}

/// Hotspot circles for every slot (lit ones brighter) plus the last tap point.
pub fn paint_debug_overlay(
    surface: &mut Surface,
    slots: &[SlotGeometry],
    lit_mask: u64,
    last_tap: Option<Point>,
) -> HengeResult<()> {
    rasterize_over(surface, |ctx| {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.push_opacity_layer(0.5);
        for s in slots {
            let lit = s.index < 64 && lit_mask & (1u64 << s.index) != 0;
            let color = if lit {
                vello_cpu::peniko::Color::from_rgba8(0, 255, 120, 200)
            } else {
                vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 90)
            };
            ctx.set_paint(color);
            let c = vello_cpu::kurbo::Circle::new((s.x, s.y), s.hotspot_radius);
            ctx.fill_path(&c.to_path(0.1));
        }
        if let Some(p) = last_tap {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 40, 40, 255));
            let c = vello_cpu::kurbo::Circle::new((p.x, p.y), 6.0);
            ctx.fill_path(&c.to_path(0.1));
        }
        ctx.pop_layer();
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/painters.rs"]
mod tests;
