use eframe::egui;

use crate::ops::angle_ops::pointer_angle;
use crate::ops::seek_ops::{delta_time, initial_frame_time, seekable_duration, wrap_time};
use crate::types::loop_counter::LoopCounter;
use crate::types::media::MediaElement;
use crate::types::reset_transition::ResetTransition;
use crate::types::ring::{PointerId, RingKind, RingState};
use crate::types::settings::Settings;

/// Tuning of the scrubbing behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrubConfig {
    pub big_sensitivity: f64,
    pub small_sensitivity: f64,
    pub seek_epsilon: f64,
    pub initial_frame_max_secs: f64,
    pub initial_frame_fraction: f64,
    pub reset_animation_secs: f64,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for ScrubConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            big_sensitivity: settings.big_sensitivity,
            small_sensitivity: settings.small_sensitivity,
            seek_epsilon: settings.seek_epsilon,
            initial_frame_max_secs: settings.initial_frame_max_secs,
            initial_frame_fraction: settings.initial_frame_fraction,
            reset_animation_secs: settings.reset_animation_secs,
        }
    }
}

/// Turns ring drags into rotation, video seeks and loop counts.
///
/// Owns both ring trackers and the media element they scrub. Both rings seek
/// the same element; only one of them is dragged at a time.
pub struct RotationScrubController<M: MediaElement> {
    media: M,
    config: ScrubConfig,
    big: RingState,
    small: RingState,
    counter: LoopCounter,
    /// Cached fast-seek capability, probed once.
    fast_seek: Option<bool>,
    reset_transition: Option<ResetTransition>,
}

impl<M: MediaElement> RotationScrubController<M> {
    pub fn new(media: M, config: ScrubConfig) -> Self {
        Self {
            media,
            config,
            big: RingState::new(),
            small: RingState::new(),
            counter: LoopCounter::new(),
            fast_seek: None,
            reset_transition: None,
        }
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn ring(&self, kind: RingKind) -> &RingState {
        match kind {
            RingKind::Big => &self.big,
            RingKind::Small => &self.small,
        }
    }

    fn ring_mut(&mut self, kind: RingKind) -> &mut RingState {
        match kind {
            RingKind::Big => &mut self.big,
            RingKind::Small => &mut self.small,
        }
    }

    pub fn counter(&self) -> &LoopCounter {
        &self.counter
    }

    pub fn reset_transition(&self) -> Option<&ResetTransition> {
        self.reset_transition.as_ref()
    }

    /// The ring currently being dragged, if any.
    pub fn dragging_ring(&self) -> Option<RingKind> {
        [RingKind::Big, RingKind::Small]
            .into_iter()
            .find(|kind| self.ring(*kind).is_dragging)
    }

    /// Replaces the media element, e.g. after opening another file.
    /// Ring and counter state start over.
    pub fn replace_media(&mut self, media: M) -> M {
        let old = std::mem::replace(&mut self.media, media);
        self.big = RingState::new();
        self.small = RingState::new();
        self.counter.reset();
        self.fast_seek = None;
        self.reset_transition = None;
        old
    }

    /// Begins a drag of `kind` at `pos`, relative to the ring's bounding `rect`.
    pub fn start_drag(&mut self, kind: RingKind, pointer: PointerId, rect: egui::Rect, pos: egui::Pos2) {
        // programmatic rotation from here on must not be animated
        self.reset_transition = None;
        let angle = pointer_angle(rect, pos);
        self.ring_mut(kind).begin(pointer, angle);
        tracing::debug!(?kind, ?pointer, angle, "Ring drag started");
    }

    /// Feeds a pointer move. Returns the normalized delta applied, or `None`
    /// when `kind` is not being dragged.
    pub fn drag_move(&mut self, kind: RingKind, rect: egui::Rect, pos: egui::Pos2) -> Option<f64> {
        let angle = pointer_angle(rect, pos);
        let delta = self.ring_mut(kind).advance(angle)?;
        tracing::trace!(?kind, angle, delta, "Ring moved");
        self.after_rotation(kind, delta);
        Some(delta)
    }

    /// Applies an already-normalized rotation delta to `kind`, exactly as a
    /// drag move producing that delta would.
    pub fn apply_rotation(&mut self, kind: RingKind, delta_deg: f64) {
        self.ring_mut(kind).rotate_by(delta_deg);
        self.after_rotation(kind, delta_deg);
    }

    fn after_rotation(&mut self, kind: RingKind, delta_deg: f64) {
        let sensitivity = match kind {
            RingKind::Big => self.config.big_sensitivity,
            RingKind::Small => self.config.small_sensitivity,
        };
        self.scrub_by_degrees(delta_deg, sensitivity);

        if kind == RingKind::Small {
            let completed = self.counter.accumulate(delta_deg);
            if completed > 0 {
                tracing::debug!(count = self.counter.count, "Loop completed");
            }
        }
    }

    /// Ends any drag held by `pointer`. Capture release failures are ignored.
    pub fn end_drag(&mut self, pointer: PointerId) {
        for kind in [RingKind::Big, RingKind::Small] {
            let ring = self.ring_mut(kind);
            if !ring.is_dragging && ring.captured_pointer().is_none() {
                continue;
            }
            if let Err(err) = ring.finish(pointer) {
                tracing::trace!(?kind, %err, "Ignoring pointer capture release failure");
            }
            tracing::debug!(?kind, ?pointer, "Ring drag ended");
        }
    }

    /// A cancelled gesture ends the drag like a normal release.
    pub fn cancel_drag(&mut self, pointer: PointerId) {
        tracing::debug!(?pointer, "Ring drag cancelled");
        self.end_drag(pointer);
    }

    fn scrub_by_degrees(&mut self, delta_deg: f64, sensitivity: f64) {
        let Some(duration) = seekable_duration(self.media.duration()) else {
            return;
        };
        let target = self.media.current_time() + delta_time(delta_deg, duration, sensitivity);
        self.seek_safely(target);
    }

    /// Seeks to `time`, wrapped into the safe range.
    ///
    /// Does nothing until the duration is known. Returns whether a seek was
    /// issued successfully.
    pub fn seek_safely(&mut self, time: f64) -> bool {
        let Some(duration) = seekable_duration(self.media.duration()) else {
            return false;
        };
        if !time.is_finite() {
            return false;
        }
        let safe = wrap_time(time, duration, self.config.seek_epsilon);
        let fast = *self
            .fast_seek
            .get_or_insert_with(|| self.media.supports_fast_seek());

        let result = if fast {
            self.media.fast_seek(safe)
        } else {
            self.media.set_current_time(safe)
        };
        match result {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, time = safe, "Seek failed");
                false
            }
        }
    }

    /// Time of the initial stable frame, once the duration is known.
    pub fn initial_frame_time(&self) -> Option<f64> {
        seekable_duration(self.media.duration()).map(|duration| {
            initial_frame_time(
                duration,
                self.config.initial_frame_max_secs,
                self.config.initial_frame_fraction,
            )
        })
    }

    /// Metadata became available: probe seek capability, show the initial
    /// stable frame and make sure playback is paused.
    pub fn on_metadata_loaded(&mut self) {
        let fast = self.media.supports_fast_seek();
        self.fast_seek = Some(fast);
        tracing::info!(
            duration = ?self.media.duration(),
            fast_seek = fast,
            "Media metadata loaded"
        );

        if let Some(time) = self.initial_frame_time() {
            self.seek_safely(time);
        }
        if let Err(err) = self.media.pause() {
            tracing::warn!(%err, "Failed to pause media");
        }
    }

    /// Tap on the center: zero the counter and both rings, animate the rings
    /// back to 0 and return the video to its initial stable frame.
    pub fn reset(&mut self, now: f64) {
        let from_big = self.visual_angle(RingKind::Big, now);
        let from_small = self.visual_angle(RingKind::Small, now);

        self.counter.reset();
        self.big.reset_rotation();
        self.small.reset_rotation();

        self.reset_transition = (self.config.reset_animation_secs > 0.0
            && (from_big != 0.0 || from_small != 0.0))
            .then(|| {
                ResetTransition::new(now, self.config.reset_animation_secs, from_big, from_small)
            });

        if let Some(time) = self.initial_frame_time() {
            self.seek_safely(time);
        }
        tracing::debug!("Counter and rings reset");
    }

    /// Angle at which `kind` should be drawn, including any reset animation.
    pub fn visual_angle(&self, kind: RingKind, now: f64) -> f64 {
        match &self.reset_transition {
            Some(transition) if !transition.is_finished(now) => transition.angle(kind, now),
            _ => self.ring(kind).display_angle(),
        }
    }

    /// Drops a finished reset animation. Returns true while one is running.
    pub fn tick(&mut self, now: f64) -> bool {
        if self
            .reset_transition
            .as_ref()
            .is_some_and(|t| t.is_finished(now))
        {
            self.reset_transition = None;
        }
        self.reset_transition.is_some()
    }
}
