// SPDX-License-Identifier: MPL-2.0
//! Animated opacity values.
//!
//! A [`Fade`] never jumps: every write re-targets an interpolation that starts
//! from the value currently on screen and runs for a fixed [`FadeDuration`].
//! Writing again mid-flight redirects the running animation instead of
//! queueing a second one.
//!
//! Time is passed in explicitly so the same value can be sampled by `view`
//! and by tests without touching the clock.

use crate::config::{DEFAULT_FADE_DURATION_MS, MAX_FADE_DURATION_MS, MIN_FADE_DURATION_MS};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Easing curve applied to a fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    #[default]
    EaseOutCubic,
    EaseInOutCubic,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Duration of a fade, always within 50 ms – 5 s and never zero.
///
/// # Example
///
/// ```
/// use tsubame::ui::fade::FadeDuration;
/// use std::time::Duration;
///
/// assert_eq!(FadeDuration::from_millis(0).as_duration(), Duration::from_millis(50));
/// assert_eq!(FadeDuration::from_millis(300).as_duration(), Duration::from_millis(300));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeDuration(Duration);

impl FadeDuration {
    /// Creates a fade duration, clamping to the valid range.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(
            millis.clamp(MIN_FADE_DURATION_MS, MAX_FADE_DURATION_MS),
        ))
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        self.0
    }
}

impl Default for FadeDuration {
    fn default() -> Self {
        Self(Duration::from_millis(DEFAULT_FADE_DURATION_MS))
    }
}

/// An opacity whose writes are animated.
#[derive(Debug, Clone, PartialEq)]
pub struct Fade {
    from: f32,
    to: f32,
    started_at: Option<Instant>,
    duration: FadeDuration,
    easing: Easing,
}

impl Fade {
    /// Creates a fade resting at `initial`.
    #[must_use]
    pub fn new(initial: f32, duration: FadeDuration, easing: Easing) -> Self {
        let initial = sanitize(initial).unwrap_or(0.0);
        Self {
            from: initial,
            to: initial,
            started_at: None,
            duration,
            easing,
        }
    }

    /// Requests `target` as the new opacity.
    ///
    /// The change is animated from whatever [`value`](Self::value) shows at
    /// `now`. Requesting the target already being approached leaves the
    /// running animation untouched. Non-finite targets are ignored.
    pub fn set(&mut self, target: f32, now: Instant) {
        let Some(target) = sanitize(target) else {
            return;
        };
        if target == self.to {
            return;
        }

        self.from = self.value(now);
        self.to = target;
        self.started_at = Some(now);
    }

    /// Runs the animation toward the current target again, starting at
    /// `from`. Used when the content behind the opacity is replaced.
    pub fn replay_from(&mut self, from: f32, now: Instant) {
        let Some(from) = sanitize(from) else {
            return;
        };
        self.from = from;
        self.started_at = Some(now);
    }

    /// Opacity displayed at `now`.
    #[must_use]
    pub fn value(&self, now: Instant) -> f32 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        let eased = self.easing.apply(progress);
        self.from + (self.to - self.from) * eased
    }

    /// Opacity this fade rests at once the animation completes.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        self.progress(now) < 1.0
    }

    /// Marks a finished animation as settled. Returns `true` while still
    /// animating.
    pub fn settle(&mut self, now: Instant) -> bool {
        if self.started_at.is_some() && !self.is_animating(now) {
            self.from = self.to;
            self.started_at = None;
        }
        self.started_at.is_some()
    }

    #[must_use]
    pub fn duration(&self) -> FadeDuration {
        self.duration
    }

    /// Linear progress of the running animation in `[0, 1]`.
    fn progress(&self, now: Instant) -> f32 {
        match self.started_at {
            Some(start) => {
                let elapsed = now.saturating_duration_since(start);
                (elapsed.as_secs_f32() / self.duration.as_duration().as_secs_f32()).min(1.0)
            }
            None => 1.0,
        }
    }
}

fn sanitize(opacity: f32) -> Option<f32> {
    opacity.is_finite().then(|| opacity.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_opacity;

    fn fade(initial: f32) -> Fade {
        Fade::new(initial, FadeDuration::from_millis(200), Easing::Linear)
    }

    #[test]
    fn easing_endpoints_are_fixed() {
        for easing in [Easing::Linear, Easing::EaseOutCubic, Easing::EaseInOutCubic] {
            assert_opacity(easing.apply(0.0), 0.0);
            assert_opacity(easing.apply(1.0), 1.0);
            assert_opacity(easing.apply(2.0), 1.0);
        }
        assert_opacity(Easing::EaseInOutCubic.apply(0.5), 0.5);
    }

    #[test]
    fn duration_is_clamped() {
        assert_eq!(
            FadeDuration::from_millis(60_000).as_duration(),
            Duration::from_millis(MAX_FADE_DURATION_MS)
        );
        assert_eq!(
            FadeDuration::default().as_duration(),
            Duration::from_millis(DEFAULT_FADE_DURATION_MS)
        );
    }

    #[test]
    fn new_fade_rests_at_initial_value() {
        let now = Instant::now();
        let fade = fade(0.5);
        assert_opacity(fade.value(now), 0.5);
        assert!(!fade.is_animating(now));
    }

    #[test]
    fn write_is_animated_not_applied() {
        let start = Instant::now();
        let mut fade = fade(0.0);
        fade.set(1.0, start);

        assert_opacity(fade.value(start), 0.0);
        assert!(fade.is_animating(start));
        assert_opacity(fade.value(start + Duration::from_millis(100)), 0.5);
        assert_opacity(fade.value(start + Duration::from_millis(200)), 1.0);
        assert!(!fade.is_animating(start + Duration::from_millis(200)));
        assert_opacity(fade.target(), 1.0);
    }

    #[test]
    fn retarget_mid_flight_starts_from_displayed_value() {
        let start = Instant::now();
        let mut fade = fade(0.0);
        fade.set(1.0, start);

        let midway = start + Duration::from_millis(100);
        fade.set(0.0, midway);

        assert_opacity(fade.value(midway), 0.5);
        assert_opacity(fade.value(midway + Duration::from_millis(100)), 0.25);
        assert_opacity(fade.value(midway + Duration::from_millis(200)), 0.0);
    }

    #[test]
    fn repeating_current_target_does_not_restart() {
        let start = Instant::now();
        let mut fade = fade(0.0);
        fade.set(1.0, start);
        fade.set(1.0, start + Duration::from_millis(150));

        assert!(!fade.is_animating(start + Duration::from_millis(200)));
    }

    #[test]
    fn targets_are_clamped_and_nan_ignored() {
        let start = Instant::now();
        let mut fade = fade(0.5);
        fade.set(f32::NAN, start);
        assert_opacity(fade.target(), 0.5);

        fade.set(4.0, start);
        assert_opacity(fade.target(), 1.0);
    }

    #[test]
    fn replay_restarts_toward_same_target() {
        let start = Instant::now();
        let mut fade = fade(1.0);
        fade.replay_from(0.0, start);

        assert_opacity(fade.target(), 1.0);
        assert_opacity(fade.value(start), 0.0);
        assert_opacity(fade.value(start + Duration::from_millis(100)), 0.5);
        assert!(!fade.is_animating(start + Duration::from_millis(200)));
    }

    #[test]
    fn settle_clears_finished_animation() {
        let start = Instant::now();
        let mut fade = fade(0.0);
        fade.set(1.0, start);

        assert!(fade.settle(start + Duration::from_millis(50)));
        assert!(!fade.settle(start + Duration::from_millis(250)));
        assert_opacity(fade.value(start), 1.0);
    }
}
