use super::*;

fn px(rgba: [u8; 4]) -> Surface {
    Surface::from_premul_bytes(1, 1, rgba.to_vec()).unwrap()
}

fn layered(dst: [u8; 4], src: [u8; 4], opacity: f32) -> [u8; 4] {
    let mut d = px(dst);
    layer_over(&mut d, &px(src), opacity).unwrap();
    d.pixel(0, 0).unwrap()
}

fn blended(from: [u8; 4], to: [u8; 4], t: f32) -> [u8; 4] {
    let mut d = px([9, 9, 9, 9]);
    blend_into(&mut d, &px(from), &px(to), t).unwrap();
    d.pixel(0, 0).unwrap()
}

#[test]
fn zero_opacity_layer_leaves_target() {
    assert_eq!(layered([1, 2, 3, 4], [200, 200, 200, 200], 0.0), [1, 2, 3, 4]);
}

#[test]
fn transparent_layer_leaves_target() {
    assert_eq!(layered([10, 20, 30, 40], [255, 255, 255, 0], 1.0), [10, 20, 30, 40]);
}

#[test]
fn opaque_layer_replaces_target() {
    assert_eq!(layered([0, 0, 0, 255], [255, 0, 0, 255], 1.0), [255, 0, 0, 255]);
}

#[test]
fn half_opacity_layer_mixes_with_opaque_target() {
    assert_eq!(layered([0, 0, 255, 255], [255, 0, 0, 255], 0.5), [128, 0, 127, 255]);
}

#[test]
fn blend_endpoints_are_the_snapshots() {
    let from = [10, 20, 30, 40];
    let to = [200, 210, 220, 230];
    assert_eq!(blended(from, to, 0.0), from);
    assert_eq!(blended(from, to, 1.0), to);
}

#[test]
fn blend_midpoint_of_opaque_backgrounds_stays_opaque() {
    assert_eq!(blended([255, 0, 0, 255], [0, 0, 255, 255], 0.5), [127, 0, 128, 255]);
}

#[test]
fn mismatched_sizes_are_rejected() {
    let mut two = Surface::from_premul_bytes(2, 1, vec![0; 8]).unwrap();
    let one = px([0, 0, 0, 0]);
    assert!(layer_over(&mut two, &one, 1.0).is_err());
    assert!(blend_into(&mut two, &one, &one, 0.5).is_err());
    assert!(over_bytes(&mut [0u8; 8], &[0u8; 6], 1.0).is_err());
}
