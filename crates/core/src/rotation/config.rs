//! Per-instance rotation settings and the presets used by the site's carousels.

use std::time::Duration;

use crate::error::CoreError;

/// Hero slide rotator: one headline slide every five seconds.
pub const HERO_SLIDE_INTERVAL: Duration = Duration::from_millis(5000);

/// Testimonial rotator on the home page.
pub const TESTIMONIAL_INTERVAL: Duration = Duration::from_millis(5000);

/// 3D image carousels rotate faster than the text-heavy rotators.
pub const IMAGE_CAROUSEL_INTERVAL: Duration = Duration::from_millis(3500);

/// Default animated transition length for slide and fade effects.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(500);

/// Snap-scroll transition of the course carousel.
pub const COURSE_TRANSITION: Duration = Duration::from_millis(300);

/// Pause after a hover or gesture ends before auto-advance resumes.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Minimum horizontal travel (in CSS pixels) for a touch to count as a swipe.
pub const SWIPE_THRESHOLD_PX: f32 = 50.0;

/// Upper bound for every configured duration. Deadlines are computed as
/// `now + duration`, which must not overflow `Instant`.
pub const MAX_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Which real item a freshly initialized controller shows first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPosition {
    /// The first real item.
    First,
    /// The middle item, so an odd-length preview window is centered.
    Middle,
}

/// Settings for one carousel instance.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationConfig {
    /// Whether the timer drives the carousel at all.
    pub autoplay: bool,
    /// Delay between automatic advances.
    pub auto_advance_interval: Duration,
    /// How long an animated index change takes to finish.
    pub transition_duration: Duration,
    /// Pause after an interaction ends before the timer is re-armed.
    pub settle_delay: Duration,
    /// Minimum swipe distance in pixels.
    pub swipe_threshold: f32,
    /// Pad the display list with one clone at each end for infinite scrolling.
    pub loop_mode: bool,
    pub start: StartPosition,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            auto_advance_interval: HERO_SLIDE_INTERVAL,
            transition_duration: DEFAULT_TRANSITION,
            settle_delay: SETTLE_DELAY,
            swipe_threshold: SWIPE_THRESHOLD_PX,
            loop_mode: false,
            start: StartPosition::First,
        }
    }
}

impl RotationConfig {
    pub fn hero_slider() -> Self {
        Self::default()
    }

    pub fn testimonial_rotator() -> Self {
        Self {
            auto_advance_interval: TESTIMONIAL_INTERVAL,
            ..Self::default()
        }
    }

    /// 3D carousel: the current image sits in the middle of its neighbours.
    pub fn image_carousel() -> Self {
        Self {
            auto_advance_interval: IMAGE_CAROUSEL_INTERVAL,
            start: StartPosition::Middle,
            ..Self::default()
        }
    }

    /// Course-category carousel: manual snap-scroll with an infinite loop.
    pub fn course_carousel() -> Self {
        Self {
            autoplay: false,
            transition_duration: COURSE_TRANSITION,
            loop_mode: true,
            ..Self::default()
        }
    }

    /// Reject settings the controller cannot run with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.auto_advance_interval.is_zero() {
            return Err(CoreError::Validation(
                "auto_advance_interval must be greater than zero".to_string(),
            ));
        }
        for (name, value) in [
            ("auto_advance_interval", self.auto_advance_interval),
            ("transition_duration", self.transition_duration),
            ("settle_delay", self.settle_delay),
        ] {
            if value > MAX_DURATION {
                return Err(CoreError::Validation(format!(
                    "{name} must be at most {}s, got {value:?}",
                    MAX_DURATION.as_secs()
                )));
            }
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(CoreError::Validation(format!(
                "swipe_threshold must be a non-negative number, got {}",
                self.swipe_threshold
            )));
        }
        Ok(())
    }
}
