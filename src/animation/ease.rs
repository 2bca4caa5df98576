/// Shape of a background cross-fade over its normalised duration.
///
/// Config files name the curve in snake case (`"in_out_quad"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant blend speed.
    Linear,
    /// Quadratic, slow start.
    InQuad,
    /// Quadratic, slow finish.
    OutQuad,
    /// Quadratic, slow at both ends. Used unless the config picks another curve.
    #[default]
    InOutQuad,
    /// Cubic, slow start.
    InCubic,
    /// Cubic, slow finish.
    OutCubic,
    /// Cubic, slow at both ends.
    InOutCubic,
}

impl Ease {
    /// Maps linear fade progress `u` to a blend weight.
    ///
    /// `u` is clamped to `[0, 1]` and both ends map exactly, so a finished fade always shows the
    /// target snapshot untouched.
    pub fn apply(self, u: f64) -> f64 {
        let u = u.clamp(0.0, 1.0);
        match self {
            Self::Linear => u,
            Self::InQuad => u.powi(2),
            Self::OutQuad => ease_out(u, 2),
            Self::InOutQuad => ease_in_out(u, 2),
            Self::InCubic => u.powi(3),
            Self::OutCubic => ease_out(u, 3),
            Self::InOutCubic => ease_in_out(u, 3),
        }
    }
}

fn ease_out(u: f64, power: i32) -> f64 {
    1.0 - (1.0 - u).powi(power)
}

/// First half eases in, second half mirrors it.
fn ease_in_out(u: f64, power: i32) -> f64 {
    if u < 0.5 {
        2f64.powi(power - 1) * u.powi(power)
    } else {
        1.0 - (2.0 - 2.0 * u).powi(power) / 2.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
