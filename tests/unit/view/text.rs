use super::*;
use crate::view::status::{Role, ShowStatus};

fn layout() -> TextLayout {
    TextLayout::new(Canvas::default(), HotspotConfig::default())
}

fn snapshot(role: Role) -> StatusSnapshot {
    let tempo = TempoConfig::default();
    ShowStatus::new(role, &tempo).snapshot(0.0, &tempo)
}

fn texts(labels: &[TextLabel]) -> Vec<&str> {
    labels.iter().map(|l| l.text.as_str()).collect()
}

#[test]
fn anchors_follow_hotspot_fractions() {
    let l = layout();
    assert!((l.position(LabelAnchor::Top).y - 84.4).abs() < 1e-9);
    assert_eq!(l.position(LabelAnchor::Top).x, 195.0);
    assert_eq!(l.position(LabelAnchor::Mid), Point::new(195.0, 422.0));
    assert_eq!(l.position(LabelAnchor::Left), Point::new(115.0, 422.0));
    assert_eq!(l.position(LabelAnchor::Right), Point::new(275.0, 422.0));
    assert!((l.position(LabelAnchor::Low).y - 759.6).abs() < 1e-9);
}

#[test]
fn mode_select_offers_both_modes() {
    let tempo = TempoConfig::default();
    let labels = layout().labels(View::ModeSelect, &snapshot(Role::Leader), "T", None, &tempo);
    assert_eq!(
        texts(&labels),
        ["select MODE", "PREVIEW", "CONCERT", "CONCERT MODE"]
    );
    assert_eq!(labels[1].size, 24.0);
}

#[test]
fn start_view_shows_zero_clock() {
    let tempo = TempoConfig::default();
    let labels = layout().labels(View::Start, &snapshot(Role::Consort), "Phonehenge", None, &tempo);
    assert_eq!(
        texts(&labels),
        ["Phonehenge", "tap clock to start", "0:00", "CONCERT MODE"]
    );
}

#[test]
fn end_view_reports_full_duration_and_credit() {
    let tempo = TempoConfig::default();
    let snap = snapshot(Role::Consort);
    let labels = layout().labels(View::End, &snap, "Phonehenge", Some("by us"), &tempo);
    assert_eq!(
        texts(&labels),
        ["Phonehenge", "Duration : 12:00", "by us"]
    );
    let no_credit = layout().labels(View::End, &snap, "Phonehenge", None, &tempo);
    assert_eq!(no_credit.len(), 2);
}
