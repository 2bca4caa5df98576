use super::*;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

#[test]
fn new_surface_is_transparent() {
    let s = Surface::new(canvas(4, 3));
    assert_eq!(s.data().len(), 48);
    assert!(s.is_blank());
    assert_eq!(s.pixel(3, 2), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(4, 0), None);
}

#[test]
fn from_bytes_checks_length() {
    assert!(Surface::from_premul_bytes(2, 2, vec![0; 15]).is_err());
    assert!(Surface::from_premul_bytes(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn gradient_runs_bottom_to_top() {
    let mut s = Surface::new(canvas(1, 3));
    let bottom = Rgba8Premul::opaque(0, 0, 0);
    let top = Rgba8Premul::opaque(200, 200, 200);
    s.fill_vertical_gradient(bottom, top);
    assert_eq!(s.pixel(0, 0), Some(top.to_array()));
    assert_eq!(s.pixel(0, 1), Some([100, 100, 100, 255]));
    assert_eq!(s.pixel(0, 2), Some(bottom.to_array()));
}

#[test]
fn copy_and_blit_require_equal_sizes() {
    let mut a = Surface::new(canvas(2, 2));
    let b = Surface::new(canvas(3, 2));
    assert!(a.copy_from(&b).is_err());
    assert!(a.blit_over(&b, 1.0).is_err());
}

#[test]
fn blit_over_opaque_replaces() {
    let mut dst = Surface::new(canvas(2, 1));
    dst.fill(Rgba8Premul::opaque(1, 2, 3));
    let mut src = Surface::new(canvas(2, 1));
    src.fill(Rgba8Premul::opaque(9, 8, 7));
    dst.blit_over(&src, 1.0).unwrap();
    assert_eq!(dst, src);
    dst.clear();
    assert!(dst.is_blank());
}
