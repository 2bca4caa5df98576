use super::*;

#[test]
fn role_comes_from_launch_path() {
    assert_eq!(Role::from_launch_path("/show/leader.html"), Role::Leader);
    assert_eq!(Role::from_launch_path("/LEADER"), Role::Leader);
    assert_eq!(Role::from_launch_path("/show/index.html"), Role::Consort);
    assert_eq!(Role::from_launch_path(""), Role::Consort);
}

#[test]
fn new_status_starts_idle_at_preshow() {
    let tempo = TempoConfig::default();
    let s = ShowStatus::new(Role::Leader, &tempo);
    assert!(!s.running());
    assert!(!s.is_end_screen());
    assert!(!s.mode_confirmed());
    assert_eq!(s.index(), 18);
    assert_eq!(s.ms_per_beat(), 1000.0);
    assert!(s.is_consistent());

    let c = ShowStatus::new(Role::Consort, &tempo);
    assert!(c.mode_confirmed());
}

#[test]
fn inconsistent_flags_are_detected() {
    let tempo = TempoConfig::default();
    let mut s = ShowStatus::new(Role::Consort, &tempo);
    s.running = true;
    assert!(!s.is_consistent());
    s.clock.arm(0.0, 1000.0).unwrap();
    assert!(s.is_consistent());
    s.is_end_screen = true;
    assert!(!s.is_consistent());
}

#[test]
fn snapshot_clock_reads_zero_before_start_and_full_run_at_end() {
    let tempo = TempoConfig::default();
    let mut s = ShowStatus::new(Role::Consort, &tempo);
    let snap = s.snapshot(5_000.0, &tempo);
    assert_eq!(snap.clock, "0:00");
    assert_eq!(snap.state_number, 19);

    s.is_end_screen = true;
    assert_eq!(s.snapshot(5_000.0, &tempo).clock, "12:00");
}

#[test]
fn snapshot_clock_tracks_elapsed_time_while_running() {
    let tempo = TempoConfig::default();
    let mut s = ShowStatus::new(Role::Consort, &tempo);
    s.clock.arm(1_000.0, 24_000.0).unwrap();
    s.running = true;
    assert_eq!(s.snapshot(62_000.0, &tempo).clock, "1:01");
}
