//! Ring placement of sprite slots.
//!
//! Slots sit evenly spaced on a circle. Each sprite's "foot" (its inner short edge) touches the
//! incircle of radius `foot_radius`; the sprite center and its tap hotspot sit half a sprite
//! height further out. Choosing `foot_radius = w / (2·tan(π/N))` makes adjacent feet touch
//! edge-to-edge; any other radius is accepted and reported through [`RingLayout::gap`].

use std::f64::consts::PI;

use crate::foundation::core::Point;
use crate::foundation::error::{HengeError, HengeResult};
use crate::foundation::math::{is_inside_circle, wrap_tau};

/// Hotspots never exceed this fraction of the sprite's smaller side.
const HOTSPOT_SPRITE_CAP: f64 = 0.45;

/// Input parameters for [`compute_ring`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RingSpec {
    /// Number of slots; at least 3.
    pub count: usize,
    /// Radius of the circle the sprite feet touch.
    pub foot_radius: f64,
    /// Sprite footprint along the ring.
    pub sprite_width: f64,
    /// Sprite footprint pointing away from the centre.
    pub sprite_height: f64,
    /// Angle of slot 0 in radians (0 = 3 o'clock, -π/2 = 12 o'clock).
    pub start_angle: f64,
    /// Ring centre in design units.
    pub center: Point,
    /// Explicit hotspot radius; derived from spacing when `None`.
    pub hotspot_radius: Option<f64>,
    /// Fraction of the maximum non-overlapping hotspot radius used when deriving.
    pub hotspot_fraction: f64,
}

/// Placement of one slot. Immutable once computed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlotGeometry {
    /// Position in the ring; selects the slot family.
    pub index: usize,
    /// Sprite/hotspot center, horizontal.
    pub x: f64,
    /// Sprite/hotspot center, vertical.
    pub y: f64,
    /// Sprite width in design units.
    pub width: f64,
    /// Sprite height in design units.
    pub height: f64,
    /// Placement angle on the ring.
    pub theta: f64,
    /// Sprite orientation (radial: long axis points at the ring center), in `[0, 2π)`.
    pub angle: f64,
    /// Same for every slot of a ring.
    pub foot_radius: f64,
    /// Distance from the ring centre to the sprite centre.
    pub center_radius: f64,
    /// Tap radius around the centre.
    pub hotspot_radius: f64,
}

impl SlotGeometry {
    /// Sprite centre as a point.
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// `true` when `p` is inside this slot's hotspot.
    pub fn hit(&self, p: Point) -> bool {
        is_inside_circle(p.x, p.y, self.x, self.y, self.hotspot_radius)
    }
}

/// Computed ring plus the advisory packing diagnostics.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RingLayout {
    /// Parameters the layout was computed from.
    pub spec: RingSpec,
    /// Slots in ring order.
    pub slots: Vec<SlotGeometry>,
    /// Side of the regular N-gon whose incircle is the foot circle.
    pub implied_side: f64,
    /// `implied_side - sprite_width`; negative means neighbouring sprites overlap.
    pub gap: f64,
}

impl RingLayout {
    /// Slots in ring order, which is also draw order.
    pub fn slots(&self) -> &[SlotGeometry] {
        &self.slots
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false` for a computed ring; present for `len` symmetry.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `true` when neighbouring sprites overlap.
    pub fn overlaps(&self) -> bool {
        self.gap < 0.0
    }

    /// Angle between neighbouring slots, `2π/N`.
    pub fn angular_spacing(&self) -> f64 {
        2.0 * PI / self.spec.count as f64
    }

    /// Topmost slot whose hotspot contains `p`. Later slots are drawn on top, so they win.
    pub fn pick(&self, p: Point) -> Option<usize> {
        self.slots.iter().rev().find(|s| s.hit(p)).map(|s| s.index)
    }

    /// Outer radius reached by the sprite tips.
    pub fn outer_radius(&self) -> f64 {
        self.slots
            .first()
            .map(|s| s.foot_radius + s.height)
            .unwrap_or(0.0)
    }
}

/// Foot radius at which `count` sprites of `sprite_width` touch edge-to-edge.
pub fn feet_touch_radius(count: usize, sprite_width: f64) -> HengeResult<f64> {
    if count < 3 {
        return Err(HengeError::geometry(format!(
            "ring needs at least 3 slots, got {count}"
        )));
    }
    if !(sprite_width.is_finite() && sprite_width > 0.0) {
        return Err(HengeError::geometry("sprite width must be finite and > 0"));
    }
    Ok(sprite_width / (2.0 * (PI / count as f64).tan()))
}

/// Place `spec.count` slots evenly on the ring.
///
/// All slots share the same radii; only the angle differs. A non-touching foot radius is
/// accepted and reported through `gap`.
pub fn compute_ring(spec: &RingSpec) -> HengeResult<RingLayout> {
    validate(spec)?;

    let n = spec.count as f64;
    let step = 2.0 * PI / n;
    let r_feet = spec.foot_radius;
    let r_center = r_feet + spec.sprite_height / 2.0;

    let implied_side = 2.0 * r_feet * (PI / n).tan();
    let gap = implied_side - spec.sprite_width;

    let hotspot_radius = match spec.hotspot_radius {
        Some(r) => r,
        None => {
            let max_r = r_center * (PI / n).sin();
            let cap = HOTSPOT_SPRITE_CAP * spec.sprite_width.min(spec.sprite_height);
            (max_r * spec.hotspot_fraction).min(cap)
        }
    };

    let slots = (0..spec.count)
        .map(|i| {
            let theta = spec.start_angle + i as f64 * step;
            SlotGeometry {
                index: i,
                x: spec.center.x + r_center * theta.cos(),
                y: spec.center.y + r_center * theta.sin(),
                width: spec.sprite_width,
                height: spec.sprite_height,
                theta,
                angle: wrap_tau(theta + PI / 2.0),
                foot_radius: r_feet,
                center_radius: r_center,
                hotspot_radius,
            }
        })
        .collect();

    tracing::debug!(
        count = spec.count,
        r_feet,
        r_center,
        implied_side,
        gap,
        hotspot_radius,
        "computed ring"
    );

    Ok(RingLayout {
        spec: *spec,
        slots,
        implied_side,
        gap,
    })
}

fn validate(spec: &RingSpec) -> HengeResult<()> {
    if spec.count < 3 {
        return Err(HengeError::geometry(format!(
            "ring needs at least 3 slots, got {}",
            spec.count
        )));
    }
    if !(spec.foot_radius.is_finite() && spec.foot_radius > 0.0) {
        return Err(HengeError::geometry("foot radius must be finite and > 0"));
    }
    if !(spec.sprite_width.is_finite() && spec.sprite_width > 0.0) {
        return Err(HengeError::geometry("sprite width must be finite and > 0"));
    }
    if !(spec.sprite_height.is_finite() && spec.sprite_height > 0.0) {
        return Err(HengeError::geometry("sprite height must be finite and > 0"));
    }
    if !spec.start_angle.is_finite() {
        return Err(HengeError::geometry("start angle must be finite"));
    }
    if !(spec.hotspot_fraction > 0.0 && spec.hotspot_fraction <= 1.0) {
        return Err(HengeError::geometry("hotspot fraction must be in (0, 1]"));
    }
    if let Some(r) = spec.hotspot_radius
        && !(r.is_finite() && r > 0.0)
    {
        return Err(HengeError::geometry(
            "hotspot radius must be finite and > 0 when set",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/ring.rs"]
mod tests;
