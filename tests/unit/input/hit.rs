use super::*;
use crate::geometry::ring::compute_ring;
use crate::show::config::ShowConfig;
use crate::timeline::tempo::TempoConfig;
use crate::view::machine::ViewStateMachine;

struct Fixture {
    regions: HitRegions,
    ring: RingLayout,
    activation: ActivationMapper,
}

impl Fixture {
    fn new() -> Self {
        let cfg = ShowConfig::default();
        Self {
            regions: HitRegions::new(cfg.canvas, &cfg.hotspots),
            ring: compute_ring(&cfg.ring_spec().unwrap()).unwrap(),
            activation: ActivationMapper::default(),
        }
    }

    fn cx(&self) -> HitContext<'_> {
        HitContext {
            regions: &self.regions,
            ring: &self.ring,
            activation: &self.activation,
        }
    }

    fn slot(&self, i: usize) -> Point {
        self.ring.slots()[i].center()
    }
}

fn running(role: Role) -> ShowStatus {
    let tempo = TempoConfig::default();
    let machine = ViewStateMachine::new(tempo);
    let mut s = ShowStatus::new(role, &tempo);
    machine.confirm_mode(&mut s);
    assert!(machine.start_run(&mut s, 0.0).unwrap());
    s
}

#[test]
fn mode_select_targets() {
    let f = Fixture::new();
    let s = ShowStatus::new(Role::Leader, &TempoConfig::default());
    assert_eq!(route(Point::new(115.0, 422.0), &s, f.cx()), Some(Hit::ModeLeft));
    assert_eq!(route(Point::new(280.0, 430.0), &s, f.cx()), Some(Hit::ModeRight));
    assert_eq!(route(Point::new(195.0, 760.0), &s, f.cx()), Some(Hit::Confirm));
    assert_eq!(route(Point::new(195.0, 422.0), &s, f.cx()), None);
}

#[test]
fn start_view_only_answers_the_clock() {
    let f = Fixture::new();
    let s = ShowStatus::new(Role::Consort, &TempoConfig::default());
    assert_eq!(route(f.regions.center, &s, f.cx()), Some(Hit::ClockCenter));
    assert_eq!(route(f.slot(0), &s, f.cx()), None);
    assert_eq!(route(Point::new(115.0, 422.0), &s, f.cx()), None);
}

#[test]
fn running_view_hits_active_slots_only() {
    let f = Fixture::new();
    let s = running(Role::Consort);
    assert_eq!(s.index(), 0);
    // Entry 0 lights only the first family.
    assert_eq!(route(f.slot(0), &s, f.cx()), Some(Hit::RingSlot(0)));
    assert_eq!(route(f.slot(5), &s, f.cx()), Some(Hit::RingSlot(5)));
    assert_eq!(route(f.slot(1), &s, f.cx()), None);
    assert_eq!(route(Point::new(5.0, 5.0), &s, f.cx()), None);
}

#[test]
fn clock_wins_over_slots() {
    let mut f = Fixture::new();
    let s = running(Role::Consort);
    f.regions.tap_radius = 500.0;
    assert_eq!(route(f.slot(0), &s, f.cx()), Some(Hit::ClockCenter));
}

#[test]
fn stop_is_leader_only() {
    let f = Fixture::new();
    let stop = f.regions.stop;
    assert_eq!(route(stop, &running(Role::Leader), f.cx()), Some(Hit::Stop));
    assert_eq!(route(stop, &running(Role::Consort), f.cx()), None);
}

#[test]
fn end_band_spans_the_width() {
    let f = Fixture::new();
    let mut s = running(Role::Consort);
    let machine = ViewStateMachine::new(TempoConfig::default());
    machine.tick(&mut s, 1e9);
    assert!(s.is_end_screen());
    assert_eq!(route(Point::new(5.0, 440.0), &s, f.cx()), Some(Hit::EndBand));
    assert_eq!(route(Point::new(385.0, 380.0), &s, f.cx()), Some(Hit::EndBand));
    assert_eq!(route(Point::new(195.0, 600.0), &s, f.cx()), None);
}
