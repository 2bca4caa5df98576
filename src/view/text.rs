use crate::foundation::core::{Canvas, Point};
use crate::show::config::HotspotConfig;
use crate::timeline::readout::ClockReadout;
use crate::timeline::tempo::{ShowMode, TempoConfig};
use crate::view::machine::View;
use crate::view::status::StatusSnapshot;

/// Fixed text anchors on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelAnchor {
    /// Top band: title, or the state number while running.
    Top,
    /// Line under the title.
    Sub,
    /// Canvas centre: the clock.
    Mid,
    /// Low band: mode line, confirm, credit.
    Low,
    /// Preview choice.
    Left,
    /// Concert choice.
    Right,
}

/// One centred line of text.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextLabel {
    /// Where the label sits.
    pub anchor: LabelAnchor,
    /// Label text.
    pub text: String,
    /// Centre of the label in design units.
    pub position: Point,
    /// Font size in design units.
    pub size: f64,
}

/// Resolves anchors to canvas positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextLayout {
    canvas: Canvas,
    hotspots: HotspotConfig,
}

impl TextLayout {
    /// Layout for `canvas` using the configured text bands.
    pub fn new(canvas: Canvas, hotspots: HotspotConfig) -> Self {
        Self { canvas, hotspots }
    }

    /// Canvas position of `anchor`.
    pub fn position(&self, anchor: LabelAnchor) -> Point {
        let mid = self.canvas.mid();
        let h = f64::from(self.canvas.height);
        match anchor {
            LabelAnchor::Top => Point::new(mid.x, h * self.hotspots.top_frac),
            LabelAnchor::Sub => Point::new(mid.x, h * self.hotspots.sub_frac),
            LabelAnchor::Mid => mid,
            LabelAnchor::Low => Point::new(mid.x, h * self.hotspots.low_frac),
            LabelAnchor::Left => Point::new(mid.x - self.hotspots.lateral_offset, mid.y),
            LabelAnchor::Right => Point::new(mid.x + self.hotspots.lateral_offset, mid.y),
        }
    }

    fn label(&self, anchor: LabelAnchor, text: impl Into<String>) -> TextLabel {
        let size = match anchor {
            LabelAnchor::Top | LabelAnchor::Mid => 30.0,
            LabelAnchor::Sub | LabelAnchor::Left | LabelAnchor::Right => 24.0,
            LabelAnchor::Low => 18.0,
        };
        TextLabel {
            anchor,
            text: text.into(),
            position: self.position(anchor),
            size,
        }
    }

    /// Labels shown in `view`.
    pub fn labels(
        &self,
        view: View,
        snapshot: &StatusSnapshot,
        title: &str,
        credit: Option<&str>,
        tempo: &TempoConfig,
    ) -> Vec<TextLabel> {
        let mode_line = format!("{} MODE", snapshot.mode.label());
        match view {
            View::ModeSelect => vec![
                self.label(LabelAnchor::Top, "select MODE"),
                self.label(LabelAnchor::Left, ShowMode::Preview.label()),
                self.label(LabelAnchor::Right, ShowMode::Concert.label()),
                self.label(LabelAnchor::Low, mode_line),
            ],
            View::Start => vec![
                self.label(LabelAnchor::Top, title),
                self.label(LabelAnchor::Sub, "tap clock to start"),
                self.label(LabelAnchor::Mid, snapshot.clock.clone()),
                self.label(LabelAnchor::Low, mode_line),
            ],
            View::Running => vec![
                self.label(LabelAnchor::Top, snapshot.state_number.to_string()),
                self.label(LabelAnchor::Mid, snapshot.clock.clone()),
                self.label(LabelAnchor::Low, mode_line),
            ],
            View::End => {
                let duration = ClockReadout::from_ms(tempo.concert_run_ms());
                let mut out = vec![
                    self.label(LabelAnchor::Top, title),
                    self.label(LabelAnchor::Mid, format!("Duration : {duration}")),
                ];
                if let Some(credit) = credit {
                    out.push(self.label(LabelAnchor::Low, credit));
                }
                out
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/text.rs"]
mod tests;
