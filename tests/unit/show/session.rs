use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::show::sync::ClockMessage;

fn consort() -> ShowSession {
    ShowSession::new(ShowConfig::default(), Role::Consort).unwrap()
}

fn slot_center(s: &ShowSession, i: usize) -> Point {
    s.ring().slots()[i].center()
}

struct Recorder(Rc<RefCell<Vec<Family>>>);

impl TapListener for Recorder {
    fn on_family_tapped(&mut self, family: Family) -> anyhow::Result<()> {
        self.0.borrow_mut().push(family);
        Ok(())
    }
}

struct Broken;

impl TapListener for Broken {
    fn on_family_tapped(&mut self, _family: Family) -> anyhow::Result<()> {
        anyhow::bail!("synth not loaded")
    }
}

#[derive(Default)]
struct NeverReady;

impl SpriteProvider for NeverReady {
    fn is_ready(&self) -> bool {
        false
    }

    fn prepare(&mut self, _slots: &[crate::geometry::ring::SlotGeometry]) -> HengeResult<()> {
        Ok(())
    }

    fn draw_ring(&mut self, _surface: &mut Surface, _sprites: &[SpriteDraw]) -> HengeResult<()> {
        panic!("draw_ring called before the provider was ready")
    }
}

#[test]
fn idle_session_shows_start_view_and_can_sleep() {
    let mut s = consort();
    let r = s.tick(0.0).unwrap();
    assert_eq!(r.view, View::Start);
    assert_eq!(r.index, 18);
    assert!(!r.needs_ticks);
    assert!(!s.frame().is_blank());
    assert!(!s.compositor().layer(LayerKind::Sprites).is_blank());
    assert!(s.compositor().layer(LayerKind::Debug).is_blank());
}

#[test]
fn clock_tap_starts_the_run() {
    let mut s = consort();
    s.tick(0.0).unwrap();
    let mid = s.config().canvas.mid();
    assert_eq!(s.pointer_up(mid, 0.0).unwrap(), Some(Hit::ClockCenter));
    assert!(s.status().running());

    let r = s.tick(23_999.0).unwrap();
    assert_eq!((r.view, r.index, r.needs_ticks), (View::Running, 0, true));
    let r = s.tick(24_000.0).unwrap();
    assert_eq!((r.index, r.steps), (1, 1));
}

#[test]
fn clock_tap_while_running_keeps_the_run() {
    let mut s = consort();
    s.tick(0.0).unwrap();
    let mid = s.config().canvas.mid();
    s.pointer_up(mid, 0.0).unwrap();
    s.tick(30_000.0).unwrap();

    assert_eq!(s.pointer_up(mid, 30_000.0).unwrap(), Some(Hit::ClockCenter));
    assert_eq!(s.status().clock().start_ms(), Some(0.0));
    assert_eq!(s.tick(48_000.0).unwrap().index, 2);
}

#[test]
fn active_slot_tap_notifies_and_fades_theme() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut s = consort().with_listener(Box::new(Recorder(seen.clone())));
    s.pointer_up(s.config().canvas.mid(), 0.0).unwrap();
    s.tick(10.0).unwrap();

    let p = slot_center(&s, 0);
    assert_eq!(s.pointer_up(p, 20.0).unwrap(), Some(Hit::RingSlot(0)));
    assert_eq!(*seen.borrow(), vec![Family::Yellow]);
    assert_eq!(s.status().background_family(), Some(Family::Yellow));

    let r = s.tick(30.0).unwrap();
    assert!(r.fade_active);
    let r = s.tick(20.0 + 800.0).unwrap();
    assert!(!r.fade_active);
    let top = GradientBackdrop::colors(Some(Family::Yellow)).1;
    assert_eq!(
        s.compositor().layer(LayerKind::Background).pixel(0, 0),
        Some(top.to_array())
    );
}

#[test]
fn listener_failure_is_swallowed() {
    let mut s = consort().with_listener(Box::new(Broken));
    s.pointer_up(s.config().canvas.mid(), 0.0).unwrap();
    s.tick(1.0).unwrap();
    let p = slot_center(&s, 0);
    assert_eq!(s.pointer_up(p, 2.0).unwrap(), Some(Hit::RingSlot(0)));
    assert!(s.status().running());
    assert!(s.status().is_consistent());
}

#[test]
fn unlit_slot_tap_is_inert_but_recorded() {
    let mut s = consort();
    s.pointer_up(s.config().canvas.mid(), 0.0).unwrap();
    s.tick(1.0).unwrap();
    let p = slot_center(&s, 1);
    assert_eq!(s.pointer_up(p, 2.0).unwrap(), None);
    assert_eq!(s.status().last_tap(), Some(p));
    assert_eq!(s.status().background_family(), None);
}

#[test]
fn preview_taps_keep_the_neutral_theme() {
    let mut s = ShowSession::new(ShowConfig::default(), Role::Leader).unwrap();
    s.tick(0.0).unwrap();
    assert_eq!(s.view(), View::ModeSelect);
    let left = Point::new(115.0, 422.0);
    assert_eq!(s.pointer_up(left, 0.0).unwrap(), Some(Hit::ModeLeft));
    let confirm = Point::new(195.0, 760.0);
    assert_eq!(s.pointer_up(confirm, 0.0).unwrap(), Some(Hit::Confirm));
    assert_eq!(s.status().ms_per_beat(), 42.0);

    s.pointer_up(s.config().canvas.mid(), 100.0).unwrap();
    s.tick(101.0).unwrap();
    let p = slot_center(&s, 0);
    assert_eq!(s.pointer_up(p, 102.0).unwrap(), Some(Hit::RingSlot(0)));
    assert_eq!(s.status().background_family(), None);
    assert!(!s.fade_active());
}

#[test]
fn end_screen_fades_back_to_neutral() {
    let mut s = consort();
    s.pointer_up(s.config().canvas.mid(), 0.0).unwrap();
    s.tick(1.0).unwrap();
    s.pointer_up(slot_center(&s, 0), 2.0).unwrap();
    let r = s.tick(1e9).unwrap();
    assert_eq!(r.view, View::End);
    assert_eq!(s.status().background_family(), None);
    assert!(r.fade_active);
    assert!(r.needs_ticks);
    assert!(s.compositor().layer(LayerKind::Sprites).is_blank());
}

#[test]
fn sprites_wait_for_the_provider() {
    let mut s = consort().with_sprites(Box::new(NeverReady)).unwrap();
    s.tick(0.0).unwrap();
    assert!(s.compositor().layer(LayerKind::Sprites).is_blank());
    assert!(!s.compositor().layer(LayerKind::Text).is_blank());
}

#[test]
fn debug_overlay_follows_config() {
    let cfg = ShowConfig {
        debug_hotspots: true,
        ..ShowConfig::default()
    };
    let mut s = ShowSession::new(cfg, Role::Consort).unwrap();
    s.tick(0.0).unwrap();
    assert!(!s.compositor().layer(LayerKind::Debug).is_blank());
}

#[test]
fn remote_start_checks_bpm() {
    let mut s = consort();
    assert!(s.remote_start(0.0, Some(0.0)).is_err());
    assert!(!s.status().running());
    assert!(s.remote_start(0.0, Some(120.0)).unwrap());
    assert_eq!(s.status().ms_per_beat(), 1000.0);
    assert_eq!(s.status().clock().state_duration_ms(), Some(12_000.0));
    assert!(!s.remote_start(5.0, None).unwrap());
    assert!(s.remote_stop());
    assert_eq!(s.view(), View::Start);
}

#[test]
fn remote_tempo_does_not_outlive_its_run() {
    let mut s = consort();
    s.tick(0.0).unwrap();
    ClockMessage::from_json(r#"{"type":"start","bpm":120}"#)
        .unwrap()
        .apply(&mut s, 0.0)
        .unwrap();
    assert_eq!(s.status().clock().state_duration_ms(), Some(12_000.0));
    assert_eq!(s.tick(12_000.0).unwrap().index, 1);

    ClockMessage::Stop.apply(&mut s, 13_000.0).unwrap();
    s.tick(13_100.0).unwrap();
    let mid = s.config().canvas.mid();
    assert_eq!(s.pointer_up(mid, 14_000.0).unwrap(), Some(Hit::ClockCenter));
    assert_eq!(s.status().ms_per_beat(), 1000.0);
    assert_eq!(s.status().clock().state_duration_ms(), Some(24_000.0));
    assert_eq!(s.tick(37_999.0).unwrap().index, 0);
    assert_eq!(s.tick(38_000.0).unwrap().index, 1);
}

#[test]
fn css_points_are_normalised_before_routing() {
    let mut s = consort();
    let canvas = s.config().canvas;
    s.set_pointer_mapper(PointerMapper::fit(canvas, 780.0, 1688.0, 2.0).unwrap());
    assert_eq!(
        s.pointer_up_css(390.0, 844.0, 0.0).unwrap(),
        Some(Hit::ClockCenter)
    );
}
