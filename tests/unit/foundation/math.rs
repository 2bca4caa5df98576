use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn wrap_tau_folds_negative_angles() {
    let w = wrap_tau(-PI / 2.0);
    assert!((w - 1.5 * PI).abs() < 1e-12);
    assert!(wrap_tau(2.0 * PI).abs() < 1e-12);
}

#[test]
fn circle_boundary_is_inside() {
    assert!(is_inside_circle(3.0, 4.0, 0.0, 0.0, 5.0));
    assert!(!is_inside_circle(3.0, 4.1, 0.0, 0.0, 5.0));
}
