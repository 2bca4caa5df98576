use crate::animation::ease::Ease;
use crate::effects::composite::blend_into;
use crate::foundation::error::{HengeError, HengeResult};
use crate::render::surface::Surface;

/// Timed blend between two background snapshots.
///
/// `from` is the background as it looked when the fade began (including any partial blend of a
/// fade that was interrupted), `to` is the newly painted background.
#[derive(Debug)]
pub struct CrossfadeController {
    active: bool,
    start_ms: f64,
    duration_ms: f64,
    ease: Ease,
    from: Surface,
    to: Surface,
}

impl CrossfadeController {
    /// Idle controller with snapshot buffers sized like `template`.
    pub fn new(template: &Surface, ease: Ease) -> Self {
        Self {
            active: false,
            start_ms: 0.0,
            duration_ms: 0.0,
            ease,
            from: template.clone(),
            to: template.clone(),
        }
    }

    /// `true` while a fade is in flight.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Snapshot the fade starts from.
    pub fn from_surface(&self) -> &Surface {
        &self.from
    }

    /// Snapshot the fade ends on.
    pub fn to_surface(&self) -> &Surface {
        &self.to
    }

    /// Starts a fade at `now_ms`.
    ///
    /// `persistent` is the background surface that keeps the settled image. If a fade is still
    /// running, its blend at `now_ms` is baked into `persistent` first so the new fade starts from
    /// what is on screen. `paint` then draws the new background into `persistent`.
    pub fn begin<F>(
        &mut self,
        persistent: &mut Surface,
        now_ms: f64,
        duration_ms: f64,
        paint: F,
    ) -> HengeResult<()>
    where
        F: FnOnce(&mut Surface) -> HengeResult<()>,
    {
        if !persistent.same_size(&self.from) {
            return Err(HengeError::render("crossfade surface size mismatch"));
        }
        if self.active {
            let t = self.progress(now_ms);
            blend_into(persistent, &self.from, &self.to, t as f32)?;
            tracing::debug!(progress = t, "crossfade interrupted, baking current blend");
        }
        self.from.copy_from(persistent)?;
        paint(persistent)?;
        self.to.copy_from(persistent)?;

        self.active = true;
        self.start_ms = now_ms;
        self.duration_ms = duration_ms;
        tracing::debug!(now_ms, duration_ms, "crossfade started");
        Ok(())
    }

    /// Eased progress in `[0, 1]`; a non-positive duration completes immediately.
    pub fn progress(&self, now_ms: f64) -> f64 {
        if !self.active {
            return 1.0;
        }
        if self.duration_ms <= 0.0 || !self.duration_ms.is_finite() {
            return 1.0;
        }
        let u = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0);
        if u >= 1.0 {
            return 1.0;
        }
        self.ease.apply(u)
    }

    /// Writes the blend at progress `t` into `dest` (replacing its contents).
    ///
    /// Reaching `t >= 1` ends the fade.
    pub fn render(&mut self, dest: &mut Surface, t: f64) -> HengeResult<()> {
        blend_into(dest, &self.from, &self.to, t as f32)?;
        if t >= 1.0 {
            self.active = false;
            tracing::debug!("crossfade finished");
        }
        Ok(())
    }

    /// Drops the fade; the settled background shows on the next tick.
    pub fn cancel(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/crossfade.rs"]
mod tests;
