use std::f64::consts::PI;

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Wrap an angle into `[0, 2π)`.
pub(crate) fn wrap_tau(angle: f64) -> f64 {
    angle.rem_euclid(2.0 * PI)
}

pub(crate) fn is_inside_circle(x: f64, y: f64, cx: f64, cy: f64, r: f64) -> bool {
    let dx = x - cx;
    let dy = y - cy;
    dx * dx + dy * dy <= r * r
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
