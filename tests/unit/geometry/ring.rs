use super::*;

fn spec(count: usize, foot_radius: f64) -> RingSpec {
    RingSpec {
        count,
        foot_radius,
        sprite_width: 30.0,
        sprite_height: 56.0,
        start_angle: -PI / 2.0,
        center: Point::new(195.0, 422.0),
        hotspot_radius: None,
        hotspot_fraction: 0.9,
    }
}

#[test]
fn rejects_bad_parameters() {
    assert!(matches!(
        compute_ring(&spec(2, 100.0)),
        Err(HengeError::InvalidGeometry(_))
    ));
    assert!(compute_ring(&spec(25, 0.0)).is_err());
    assert!(compute_ring(&spec(25, f64::NAN)).is_err());

    let mut s = spec(25, 100.0);
    s.sprite_width = 0.0;
    assert!(compute_ring(&s).is_err());

    let mut s = spec(25, 100.0);
    s.sprite_height = -1.0;
    assert!(compute_ring(&s).is_err());

    let mut s = spec(25, 100.0);
    s.hotspot_radius = Some(0.0);
    assert!(compute_ring(&s).is_err());
}

#[test]
fn spacing_is_uniform_and_radii_shared() {
    for n in [3usize, 5, 15, 25] {
        let ring = compute_ring(&spec(n, 120.0)).unwrap();
        assert_eq!(ring.len(), n);
        let step = 2.0 * PI / n as f64;
        for w in ring.slots().windows(2) {
            assert!((w[1].theta - w[0].theta - step).abs() < 1e-12);
            assert_eq!(w[0].foot_radius, w[1].foot_radius);
            assert_eq!(w[0].center_radius, w[1].center_radius);
            assert_eq!(w[0].hotspot_radius, w[1].hotspot_radius);
        }
        assert!((ring.angular_spacing() - step).abs() < 1e-12);
    }
}

#[test]
fn slots_sit_on_center_radius() {
    let ring = compute_ring(&spec(25, 120.0)).unwrap();
    for s in ring.slots() {
        let d = (s.center() - ring.spec.center).hypot();
        assert!((d - (120.0 + 28.0)).abs() < 1e-9);
    }
    // Slot 0 starts at 12 o'clock.
    let s0 = ring.slots()[0];
    assert!((s0.x - 195.0).abs() < 1e-9);
    assert!(s0.y < 422.0);
}

#[test]
fn feet_touch_radius_zeroes_the_gap() {
    for n in [3usize, 7, 25, 60] {
        let r = feet_touch_radius(n, 30.0).unwrap();
        let ring = compute_ring(&spec(n, r)).unwrap();
        assert!(ring.gap.abs() < 1e-9, "n={n} gap={}", ring.gap);
        assert!(!ring.overlaps());
    }
}

#[test]
fn small_radius_reports_overlap_without_failing() {
    let r = feet_touch_radius(25, 30.0).unwrap();
    let ring = compute_ring(&spec(25, r * 0.8)).unwrap();
    assert!(ring.gap < 0.0);
    assert!(ring.overlaps());
    assert_eq!(ring.len(), 25);
}

#[test]
fn derived_hotspot_is_capped_by_sprite_size() {
    // Wide spacing: derived radius would be large, so the sprite cap applies.
    let ring = compute_ring(&spec(3, 300.0)).unwrap();
    assert!((ring.slots()[0].hotspot_radius - 0.45 * 30.0).abs() < 1e-12);

    // Small fraction: spacing-derived radius is below the cap.
    let r = feet_touch_radius(25, 30.0).unwrap();
    let mut s = spec(25, r);
    s.hotspot_fraction = 0.5;
    let ring = compute_ring(&s).unwrap();
    let r_center = r + 28.0;
    let expected = 0.5 * r_center * (PI / 25.0).sin();
    assert!(expected < 13.5);
    assert!((ring.slots()[0].hotspot_radius - expected).abs() < 1e-12);
}

#[test]
fn explicit_hotspot_is_used_verbatim() {
    let mut s = spec(25, 120.0);
    s.hotspot_radius = Some(18.0);
    let ring = compute_ring(&s).unwrap();
    assert!(ring.slots().iter().all(|sl| sl.hotspot_radius == 18.0));
}

#[test]
fn pick_finds_slot_under_point() {
    let ring = compute_ring(&spec(25, 120.0)).unwrap();
    let s7 = ring.slots()[7];
    assert_eq!(ring.pick(s7.center()), Some(7));
    assert_eq!(ring.pick(ring.spec.center), None);
}

#[test]
fn orientation_is_radial() {
    let ring = compute_ring(&spec(4, 100.0)).unwrap();
    // Slot 0 at 12 o'clock: theta = -π/2, orientation = 0.
    assert!(ring.slots()[0].angle.abs() < 1e-12);
    assert!((ring.slots()[1].angle - PI / 2.0).abs() < 1e-12);
}
