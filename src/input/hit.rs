//! Pointer routing. A tap resolves to at most one [`Hit`], chosen first-match-wins from the
//! regions active in the current view.

use crate::foundation::core::{Canvas, Point};
use crate::foundation::math::is_inside_circle;
use crate::geometry::ring::RingLayout;
use crate::sequence::family::ActivationMapper;
use crate::show::config::HotspotConfig;
use crate::view::machine::View;
use crate::view::status::{Role, ShowStatus};

/// Logical target of one tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hit {
    /// Preview choice in mode select.
    ModeLeft,
    /// Concert choice in mode select.
    ModeRight,
    /// Confirm band under the mode choices.
    Confirm,
    /// The clock; starts a run from the start view.
    ClockCenter,
    /// Leader stop target in the top band while running.
    Stop,
    /// Anywhere on the clock row of the end screen.
    EndBand,
    /// A lit ring slot, by index.
    RingSlot(usize),
}

/// Fixed tap targets in design units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitRegions {
    /// Clock centre.
    pub center: Point,
    /// Preview choice.
    pub left: Point,
    /// Concert choice.
    pub right: Point,
    /// Mode confirm.
    pub confirm: Point,
    /// Leader stop.
    pub stop: Point,
    /// Radius around each target; also the half-height of the end band.
    pub tap_radius: f64,
}

impl HitRegions {
    /// Lays the targets out on `canvas`.
    pub fn new(canvas: Canvas, hotspots: &HotspotConfig) -> Self {
        let mid = canvas.mid();
        let h = f64::from(canvas.height);
        Self {
            center: mid,
            left: Point::new(mid.x - hotspots.lateral_offset, mid.y),
            right: Point::new(mid.x + hotspots.lateral_offset, mid.y),
            confirm: Point::new(mid.x, h * hotspots.low_frac),
            stop: Point::new(mid.x, h * hotspots.top_frac),
            tap_radius: hotspots.tap_radius,
        }
    }

    fn near(&self, p: Point, target: Point) -> bool {
        is_inside_circle(p.x, p.y, target.x, target.y, self.tap_radius)
    }

    /// Horizontal band through the clock used to leave the end screen.
    fn in_end_band(&self, p: Point) -> bool {
        (p.y - self.center.y).abs() <= self.tap_radius
    }
}

/// Everything the router reads besides the status record.
#[derive(Clone, Copy, Debug)]
pub struct HitContext<'a> {
    /// Fixed targets.
    pub regions: &'a HitRegions,
    /// Slot hotspots.
    pub ring: &'a RingLayout,
    /// Decides which slots are lit.
    pub activation: &'a ActivationMapper,
}

/// Resolves `p` to a hit for the current view.
pub fn route(p: Point, status: &ShowStatus, cx: HitContext<'_>) -> Option<Hit> {
    let regions = cx.regions;
    let hit = match View::derive(status) {
        View::ModeSelect => {
            if regions.near(p, regions.left) {
                Some(Hit::ModeLeft)
            } else if regions.near(p, regions.right) {
                Some(Hit::ModeRight)
            } else if regions.near(p, regions.confirm) {
                Some(Hit::Confirm)
            } else {
                None
            }
        }
        View::Start => regions.near(p, regions.center).then_some(Hit::ClockCenter),
        View::Running => {
            if regions.near(p, regions.center) {
                Some(Hit::ClockCenter)
            } else if status.role() == Role::Leader && regions.near(p, regions.stop) {
                Some(Hit::Stop)
            } else {
                active_slot_at(p, status.index(), cx).map(Hit::RingSlot)
            }
        }
        View::End => regions.in_end_band(p).then_some(Hit::EndBand),
    };
    tracing::debug!(x = p.x, y = p.y, ?hit, "pointer routed");
    hit
}

/// Topmost slot under `p` whose family is lit at `index`.
fn active_slot_at(p: Point, index: usize, cx: HitContext<'_>) -> Option<usize> {
    cx.ring
        .slots()
        .iter()
        .rev()
        .find(|s| s.hit(p) && cx.activation.is_slot_visible(s.index, index))
        .map(|s| s.index)
}

#[cfg(test)]
#[path = "../../tests/unit/input/hit.rs"]
mod tests;
