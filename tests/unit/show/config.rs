use super::*;

#[test]
fn defaults_validate() {
    let cfg = ShowConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.canvas, Canvas::default());
    assert_eq!(cfg.ring.count, 25);
    assert_eq!(cfg.fade.ease, Ease::InOutQuad);
}

#[test]
fn default_ring_is_feet_touch() {
    let spec = ShowConfig::default().ring_spec().unwrap();
    let ring = compute_ring(&spec).unwrap();
    assert!(ring.gap.abs() < 1e-9);
    assert_eq!(spec.center, Canvas::default().mid());
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = ShowConfig::from_json_str(
        r#"{ "ring": { "count": 12 }, "tempo": { "preview_ms_per_beat": 10 }, "credit": "x" }"#,
    )
    .unwrap();
    assert_eq!(cfg.ring.count, 12);
    assert_eq!(cfg.ring.sprite_width, 30.0);
    assert_eq!(cfg.tempo.preview_ms_per_beat, 10.0);
    assert_eq!(cfg.tempo.concert_ms_per_beat, 1000.0);
    assert_eq!(cfg.credit.as_deref(), Some("x"));
    assert_eq!(cfg.title, "Phonehenge");
    cfg.validate().unwrap();
}

#[test]
fn bad_ring_count_is_a_geometry_error() {
    let mut cfg = ShowConfig::default();
    cfg.ring.count = 2;
    assert!(matches!(cfg.validate(), Err(HengeError::InvalidGeometry(_))));
}

#[test]
fn incomplete_family_bits_fail_eagerly() {
    let cfg = ShowConfig::from_json_str(r#"{ "family_bits": { "yellow": 0, "red": 1 } }"#).unwrap();
    assert!(matches!(
        cfg.validate(),
        Err(HengeError::MissingFamilyBit { .. })
    ));
}

#[test]
fn hotspot_fractions_are_checked() {
    let mut cfg = ShowConfig::default();
    cfg.hotspots.low_frac = 1.5;
    assert!(matches!(cfg.validate(), Err(HengeError::Validation(_))));
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        ShowConfig::from_json_str("{ not json"),
        Err(HengeError::Serde(_))
    ));
}

#[test]
fn missing_file_is_reported() {
    let err = ShowConfig::from_json_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("not/here.json"));
    let HengeError::Other(inner) = &err else {
        panic!("expected an io failure, got {err:?}");
    };
    assert_eq!(
        inner.downcast_ref::<std::io::Error>().map(|e| e.kind()),
        Some(std::io::ErrorKind::NotFound)
    );
}
