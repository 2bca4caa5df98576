use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::animation::ease::Ease;
use crate::foundation::core::Canvas;
use crate::foundation::error::{HengeError, HengeResult};
use crate::geometry::ring::{RingSpec, compute_ring, feet_touch_radius};
use crate::sequence::family::{ActivationMapper, FamilyBitLayout};
use crate::timeline::tempo::TempoConfig;

/// Ring section of [`ShowConfig`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Number of phones in the ring.
    pub count: usize,
    /// Sprite width in design units.
    pub sprite_width: f64,
    /// Sprite height in design units.
    pub sprite_height: f64,
    /// `None` places the feet exactly edge-to-edge.
    pub foot_radius: Option<f64>,
    /// Angle of slot 0 in radians; the default puts it at 12 o'clock.
    pub start_angle: f64,
    /// Explicit slot tap radius; derived from the spacing when `None`.
    pub hotspot_radius: Option<f64>,
    /// Share of the largest non-overlapping radius used when deriving.
    pub hotspot_fraction: f64,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            count: 25,
            sprite_width: 30.0,
            sprite_height: 56.0,
            foot_radius: None,
            start_angle: -std::f64::consts::FRAC_PI_2,
            hotspot_radius: None,
            hotspot_fraction: 0.9,
        }
    }
}

impl RingConfig {
    /// Ring centred on `canvas`.
    pub fn spec(&self, canvas: Canvas) -> HengeResult<RingSpec> {
        let foot_radius = match self.foot_radius {
            Some(r) => r,
            None => feet_touch_radius(self.count, self.sprite_width)?,
        };
        Ok(RingSpec {
            count: self.count,
            foot_radius,
            sprite_width: self.sprite_width,
            sprite_height: self.sprite_height,
            start_angle: self.start_angle,
            center: canvas.mid(),
            hotspot_radius: self.hotspot_radius,
            hotspot_fraction: self.hotspot_fraction,
        })
    }
}

/// Positions and sizes of the fixed tap targets and text bands.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HotspotConfig {
    /// Tap radius of every fixed target.
    pub tap_radius: f64,
    /// Horizontal distance of the mode-select targets from the centre.
    pub lateral_offset: f64,
    /// Height fraction of the top band (title, leader stop).
    pub top_frac: f64,
    /// Height fraction of the line under the title.
    pub sub_frac: f64,
    /// Height fraction of the low band (mode confirm, credit).
    pub low_frac: f64,
}

impl Default for HotspotConfig {
    fn default() -> Self {
        Self {
            tap_radius: 50.0,
            lateral_offset: 80.0,
            top_frac: 0.10,
            sub_frac: 0.17,
            low_frac: 0.90,
        }
    }
}

impl HotspotConfig {
    /// Rejects non-positive radii and fractions outside `[0, 1]`.
    pub fn validate(&self) -> HengeResult<()> {
        if !(self.tap_radius.is_finite() && self.tap_radius > 0.0) {
            return Err(HengeError::validation(
                "hotspots.tap_radius must be finite and > 0",
            ));
        }
        if !(self.lateral_offset.is_finite() && self.lateral_offset >= 0.0) {
            return Err(HengeError::validation(
                "hotspots.lateral_offset must be finite and >= 0",
            ));
        }
        for (name, v) in [
            ("top_frac", self.top_frac),
            ("sub_frac", self.sub_frac),
            ("low_frac", self.low_frac),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(HengeError::validation(format!(
                    "hotspots.{name} must be within [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Background theme cross-fade.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    /// Fade length; `0` switches themes instantly.
    pub duration_ms: f64,
    /// Fade curve.
    pub ease: Ease,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            duration_ms: 800.0,
            ease: Ease::InOutQuad,
        }
    }
}

/// Show-wide configuration, loaded once at startup.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShowConfig {
    /// Design canvas shared by every layer.
    pub canvas: Canvas,
    /// Ring layout.
    pub ring: RingConfig,
    /// Tempo modes and the pre-show state.
    pub tempo: TempoConfig,
    /// Fixed tap targets and text bands.
    pub hotspots: HotspotConfig,
    /// Theme cross-fade.
    pub fade: FadeConfig,
    /// Family to sequence-bit table.
    pub family_bits: FamilyBitLayout,
    /// Title on the start and end screens.
    pub title: String,
    /// Extra line on the end screen.
    pub credit: Option<String>,
    /// Draw the hotspot overlay.
    pub debug_hotspots: bool,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            ring: RingConfig::default(),
            tempo: TempoConfig::default(),
            hotspots: HotspotConfig::default(),
            fade: FadeConfig::default(),
            family_bits: FamilyBitLayout::default(),
            title: "Phonehenge".to_owned(),
            credit: None,
            debug_hotspots: false,
        }
    }
}

impl ShowConfig {
    /// Parses JSON from `r` without validating.
    pub fn from_reader<R: std::io::Read>(r: R) -> HengeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| HengeError::serde(format!("parse show config JSON: {e}")))
    }

    /// Parses a JSON string without validating.
    pub fn from_json_str(s: &str) -> HengeResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| HengeError::serde(format!("parse show config JSON: {e}")))
    }

    /// Loads and validates a config file.
    pub fn from_json_path(path: impl AsRef<Path>) -> HengeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open show config '{}'", path.display()))?;
        let cfg = Self::from_reader(BufReader::new(f))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Ring spec for this config's canvas.
    pub fn ring_spec(&self) -> HengeResult<RingSpec> {
        self.ring.spec(self.canvas)
    }

    /// Startup checks. Geometry and family-bit errors surface here instead of at first use.
    pub fn validate(&self) -> HengeResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        compute_ring(&self.ring_spec()?)?;
        self.tempo.validate()?;
        self.hotspots.validate()?;
        if !(self.fade.duration_ms.is_finite() && self.fade.duration_ms >= 0.0) {
            return Err(HengeError::validation(
                "fade.duration_ms must be finite and >= 0",
            ));
        }
        ActivationMapper::new(&self.family_bits)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/show/config.rs"]
mod tests;
