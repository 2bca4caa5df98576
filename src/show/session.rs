use crate::effects::crossfade::CrossfadeController;
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{HengeError, HengeResult};
use crate::geometry::ring::{RingLayout, compute_ring};
use crate::input::hit::{Hit, HitContext, HitRegions, route};
use crate::input::pointer::PointerMapper;
use crate::render::layers::{LayerKind, LayeredCompositor};
use crate::render::painters::{
    BackdropPainter, GradientBackdrop, LabelPlates, SpriteDraw, SpriteProvider, TapListener,
    TextProvider, VectorSprites, paint_debug_overlay,
};
use crate::render::surface::Surface;
use crate::sequence::family::{ActivationMapper, Family, family_for_slot};
use crate::show::config::ShowConfig;
use crate::timeline::tempo::ShowMode;
use crate::view::machine::{TickOutcome, View, ViewStateMachine};
use crate::view::status::{Role, ShowStatus, StatusSnapshot};
use crate::view::text::TextLayout;

/// What one [`ShowSession::tick`] produced.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TickReport {
    /// View after the tick.
    pub view: View,
    /// 0-based sequence index after the tick.
    pub index: usize,
    /// A run is in progress.
    pub running: bool,
    /// The end screen is up.
    pub end_screen: bool,
    /// States crossed by this tick.
    pub steps: usize,
    /// A theme cross-fade is still in flight.
    pub fade_active: bool,
    /// `false` once the host may stop scheduling ticks (idle and no fade in flight).
    pub needs_ticks: bool,
}

/// One participant's show: status record, static geometry, layers and collaborators.
pub struct ShowSession {
    config: ShowConfig,
    status: ShowStatus,
    ring: RingLayout,
    activation: ActivationMapper,
    machine: ViewStateMachine,
    regions: HitRegions,
    text_layout: TextLayout,
    pointer: PointerMapper,
    compositor: LayeredCompositor,
    background: Surface,
    crossfade: CrossfadeController,
    sprites: Box<dyn SpriteProvider>,
    text: Box<dyn TextProvider>,
    backdrop: Box<dyn BackdropPainter>,
    listener: Option<Box<dyn TapListener>>,
}

impl std::fmt::Debug for ShowSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShowSession")
            .field("status", &self.status)
            .field("slots", &self.ring.len())
            .field("fade_active", &self.crossfade.is_active())
            .finish_non_exhaustive()
    }
}

impl ShowSession {
    /// Validates `config` and builds a session with the CPU painters.
    pub fn new(config: ShowConfig, role: Role) -> HengeResult<Self> {
        config.validate()?;
        let canvas = Canvas::new(config.canvas.width, config.canvas.height)?;
        let ring = compute_ring(&config.ring_spec()?)?;
        if ring.overlaps() {
            tracing::warn!(gap = ring.gap, "ring sprites overlap");
        }
        let activation = ActivationMapper::new(&config.family_bits)?;
        let status = ShowStatus::new(role, &config.tempo);

        let backdrop: Box<dyn BackdropPainter> = Box::new(GradientBackdrop);
        let mut background = Surface::new(canvas);
        backdrop.paint(&mut background, None)?;
        let crossfade = CrossfadeController::new(&background, config.fade.ease);

        let mut sprites: Box<dyn SpriteProvider> = Box::new(VectorSprites::new());
        sprites.prepare(ring.slots())?;

        tracing::info!(?role, slots = ring.len(), gap = ring.gap, "show session created");
        Ok(Self {
            machine: ViewStateMachine::new(config.tempo),
            regions: HitRegions::new(canvas, &config.hotspots),
            text_layout: TextLayout::new(canvas, config.hotspots),
            pointer: PointerMapper::identity(),
            compositor: LayeredCompositor::new(canvas),
            config,
            status,
            ring,
            activation,
            background,
            crossfade,
            sprites,
            text: Box::new(LabelPlates),
            backdrop,
            listener: None,
        })
    }

    /// Replaces the sprite provider. Its `prepare` runs immediately; drawing waits for `is_ready`.
    pub fn with_sprites(mut self, mut sprites: Box<dyn SpriteProvider>) -> HengeResult<Self> {
        sprites.prepare(self.ring.slots())?;
        self.sprites = sprites;
        Ok(self)
    }

    /// Replaces the text provider.
    pub fn with_text(mut self, text: Box<dyn TextProvider>) -> Self {
        self.text = text;
        self
    }

    /// Replaces the backdrop painter and repaints the settled background.
    pub fn with_backdrop(mut self, backdrop: Box<dyn BackdropPainter>) -> HengeResult<Self> {
        backdrop.paint(&mut self.background, self.status.background_family)?;
        self.backdrop = backdrop;
        Ok(self)
    }

    /// Installs the tap hook for audio.
    pub fn with_listener(mut self, listener: Box<dyn TapListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Sets the CSS to design-unit mapping used by [`ShowSession::pointer_up_css`].
    pub fn set_pointer_mapper(&mut self, pointer: PointerMapper) {
        self.pointer = pointer;
    }

    /// Validated config the session was built from.
    pub fn config(&self) -> &ShowConfig {
        &self.config
    }

    /// Current status record.
    pub fn status(&self) -> &ShowStatus {
        &self.status
    }

    /// Computed ring geometry.
    pub fn ring(&self) -> &RingLayout {
        &self.ring
    }

    /// View derived from the current status.
    pub fn view(&self) -> View {
        View::derive(&self.status)
    }

    /// Read-only status for text providers and hosts.
    pub fn snapshot(&self, now_ms: f64) -> StatusSnapshot {
        self.status.snapshot(now_ms, &self.config.tempo)
    }

    /// Visible surface as of the last tick.
    pub fn frame(&self) -> &Surface {
        self.compositor.visible()
    }

    /// Layers as of the last tick.
    pub fn compositor(&self) -> &LayeredCompositor {
        &self.compositor
    }

    /// `true` while a theme cross-fade is in flight.
    pub fn fade_active(&self) -> bool {
        self.crossfade.is_active()
    }

    /// Per-tick entry point: advance the clock, run view entry actions, repaint every layer and
    /// merge them into the visible surface.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, now_ms: f64) -> HengeResult<TickReport> {
        let outcome = self.machine.tick(&mut self.status, now_ms);
        if let Some(transition) = self.machine.observe(&self.status) {
            self.enter_view(transition.to, now_ms)?;
        }
        let view = self.view();

        let fade_t = self.crossfade.progress(now_ms);
        self.paint_background(fade_t)?;
        self.paint_sprites(view);
        self.paint_text(view, now_ms);
        self.paint_debug();
        self.compositor.compose()?;

        let steps = match outcome {
            TickOutcome::Advanced { steps, .. } => steps,
            _ => 0,
        };
        let fade_active = self.crossfade.is_active();
        Ok(TickReport {
            view,
            index: self.status.index(),
            running: self.status.running,
            end_screen: self.status.is_end_screen,
            steps,
            fade_active,
            needs_ticks: self.status.running || fade_active,
        })
    }

    /// Pointer release at `p` in design units.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn pointer_up(&mut self, p: Point, now_ms: f64) -> HengeResult<Option<Hit>> {
        self.status.last_tap = Some(p);
        let cx = HitContext {
            regions: &self.regions,
            ring: &self.ring,
            activation: &self.activation,
        };
        let Some(hit) = route(p, &self.status, cx) else {
            if self.view() == View::Running
                && let Some(slot) = self.ring.pick(p)
            {
                tracing::debug!(slot, "tap on unlit slot ignored");
            }
            return Ok(None);
        };

        match hit {
            Hit::ModeLeft => {
                self.machine.select_mode(&mut self.status, ShowMode::Preview);
            }
            Hit::ModeRight => {
                self.machine.select_mode(&mut self.status, ShowMode::Concert);
            }
            Hit::Confirm => {
                self.machine.confirm_mode(&mut self.status);
            }
            Hit::ClockCenter => {
                if !self.machine.start_run(&mut self.status, now_ms)? {
                    tracing::debug!(view = ?self.view(), "clock tap ignored: already running");
                }
            }
            Hit::Stop => {
                self.machine.stop_run(&mut self.status);
            }
            Hit::EndBand => {
                self.machine.leave_end(&mut self.status);
            }
            Hit::RingSlot(slot) => self.slot_tapped(slot, now_ms)?,
        }
        Ok(Some(hit))
    }

    /// Pointer release in CSS pixels, normalised through the session's [`PointerMapper`].
    pub fn pointer_up_css(&mut self, x: f64, y: f64, now_ms: f64) -> HengeResult<Option<Hit>> {
        let p = self.pointer.from_css(x, y);
        self.pointer_up(p, now_ms)
    }

    /// Starts a run from an external clock source.
    ///
    /// `bpm` sets the tempo of this run only; the tempo locked at mode confirm is kept for later
    /// local starts.
    pub fn remote_start(&mut self, at_ms: f64, bpm: Option<f64>) -> HengeResult<bool> {
        if self.view() != View::Start {
            return Ok(false);
        }
        let ms_per_beat = match bpm {
            Some(bpm) if !(bpm.is_finite() && bpm > 0.0) => {
                return Err(HengeError::validation(format!(
                    "remote start bpm must be finite and > 0, got {bpm}"
                )));
            }
            Some(bpm) => 60_000.0 / bpm,
            None => self.status.ms_per_beat,
        };
        self.machine
            .start_run_at_tempo(&mut self.status, at_ms, ms_per_beat)
    }

    /// Stops the run on behalf of an external clock source.
    pub fn remote_stop(&mut self) -> bool {
        self.machine.stop_run(&mut self.status)
    }

    fn slot_tapped(&mut self, slot: usize, now_ms: f64) -> HengeResult<()> {
        let family = family_for_slot(slot);
        tracing::debug!(slot, ?family, "slot tapped");
        if let Some(listener) = self.listener.as_mut()
            && let Err(err) = listener.on_family_tapped(family)
        {
            tracing::warn!(error = %err, ?family, "tap listener failed");
        }
        if self.status.mode_chosen == ShowMode::Concert
            && self.status.background_family != Some(family)
        {
            self.set_theme(Some(family), now_ms)?;
        }
        Ok(())
    }

    fn enter_view(&mut self, view: View, now_ms: f64) -> HengeResult<()> {
        match view {
            View::ModeSelect | View::Start | View::End => {
                if self.status.background_family.is_some() {
                    self.set_theme(None, now_ms)?;
                }
            }
            View::Running => {}
        }
        Ok(())
    }

    fn set_theme(&mut self, theme: Option<Family>, now_ms: f64) -> HengeResult<()> {
        self.status.background_family = theme;
        let backdrop = &self.backdrop;
        self.crossfade.begin(
            &mut self.background,
            now_ms,
            self.config.fade.duration_ms,
            |s| backdrop.paint(s, theme),
        )
    }

    fn paint_background(&mut self, fade_t: f64) -> HengeResult<()> {
        let layer = self.compositor.layer_mut(LayerKind::Background);
        if self.crossfade.is_active() {
            self.crossfade.render(layer, fade_t)
        } else {
            layer.copy_from(&self.background)
        }
    }

    fn paint_sprites(&mut self, view: View) {
        self.compositor.clear(LayerKind::Sprites);
        if matches!(view, View::ModeSelect | View::End) || !self.sprites.is_ready() {
            return;
        }
        let index = self.status.index();
        let draws: Vec<SpriteDraw> = self
            .ring
            .slots()
            .iter()
            .map(|s| {
                SpriteDraw::from_slot(
                    s,
                    family_for_slot(s.index),
                    self.activation.is_slot_visible(s.index, index),
                )
            })
            .collect();
        let layer = self.compositor.layer_mut(LayerKind::Sprites);
        if let Err(err) = self.sprites.draw_ring(layer, &draws) {
            tracing::warn!(error = %err, "sprite layer skipped");
            layer.clear();
        }
    }

    fn paint_text(&mut self, view: View, now_ms: f64) {
        self.compositor.clear(LayerKind::Text);
        let snapshot = self.status.snapshot(now_ms, &self.config.tempo);
        let labels = self.text_layout.labels(
            view,
            &snapshot,
            &self.config.title,
            self.config.credit.as_deref(),
            &self.config.tempo,
        );
        let layer = self.compositor.layer_mut(LayerKind::Text);
        if let Err(err) = self.text.render_view(layer, view, &labels, &snapshot) {
            tracing::warn!(error = %err, "text layer skipped");
            layer.clear();
        }
    }

    fn paint_debug(&mut self) {
        self.compositor.clear(LayerKind::Debug);
        if !self.config.debug_hotspots {
            return;
        }
        let mask = self
            .activation
            .slot_mask(self.ring.len(), self.status.index());
        let layer = self.compositor.layer_mut(LayerKind::Debug);
        if let Err(err) = paint_debug_overlay(layer, self.ring.slots(), mask, self.status.last_tap)
        {
            tracing::warn!(error = %err, "debug layer skipped");
            layer.clear();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/show/session.rs"]
mod tests;
