//! Index-management state machine behind every auto-advancing carousel.
//!
//! [`RotationController`] owns the current index into a list of display
//! items and every timer that can move it: the auto-advance tick, the
//! transition-completion timer, the loop-padding correction and the settle
//! delay after a user interaction. Timers are plain deadlines. The controller
//! never reads a clock; callers pass `now` into each operation and call
//! [`RotationController::poll`] when [`RotationController::next_deadline`]
//! has passed. [`driver::RotationDriver`] does exactly that on a tokio task.
//!
//! In loop mode the display list is the real list padded with a clone of the
//! last item in front and a clone of the first item at the end:
//!
//! ```text
//! items:   A B C
//! display: C A B C A
//!          0 1 2 3 4
//! ```
//!
//! Landing on a clone (0 or 4) is corrected by an unanimated jump to the
//! matching real slot (3 or 1) once the visible transition has finished.

mod config;
pub mod driver;

use std::time::Instant;

use serde::Serialize;

pub use config::{
    RotationConfig, StartPosition, COURSE_TRANSITION, DEFAULT_TRANSITION, HERO_SLIDE_INTERVAL,
    IMAGE_CAROUSEL_INTERVAL, MAX_DURATION, SETTLE_DELAY, SWIPE_THRESHOLD_PX, TESTIMONIAL_INTERVAL,
};

use crate::error::CoreError;

/// Navigation direction, `+1` or `-1` in display-index terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn offset(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Observable state of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Phase {
    /// No items; nothing is rendered and no timer runs.
    Empty,
    /// A single item; rendered, but there is nothing to rotate.
    Static,
    /// Resting on a real item.
    Idle { auto_advancing: bool },
    /// A hover or gesture is in progress, or the settle delay has not passed.
    Paused,
    /// An animated index change is in flight.
    Transitioning,
    /// Resting on a loop-padding clone, waiting for the unanimated jump back.
    PaddingCorrection,
}

/// What the host component has to render after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RotationEvent {
    /// An animated transition from one display index to another started.
    Moved { from: usize, to: usize },
    /// The transition towards `index` finished.
    Settled { index: usize },
    /// Unanimated loop-padding correction.
    Teleported { from: usize, to: usize },
}

/// Point-in-time copy of the controller state, published by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RotationSnapshot {
    pub phase: Phase,
    pub current_index: usize,
    pub real_index: Option<usize>,
    pub display_len: usize,
    pub item_count: usize,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    ends_at: Instant,
}

#[derive(Debug, Clone, Copy)]
struct Gesture {
    start_x: f32,
    last_x: Option<f32>,
}

/// Timers in the order they fire when they share a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Transition,
    Correction,
    Resume,
    Tick,
}

/// Rotation state for one carousel instance.
#[derive(Debug, Clone)]
pub struct RotationController {
    config: RotationConfig,
    item_count: usize,
    display_len: usize,
    current: usize,
    /// Cleared for the rest of the session by an explicit jump in non-loop mode.
    autoplay: bool,
    interacting: bool,
    transition: Option<Transition>,
    correction_at: Option<Instant>,
    resume_at: Option<Instant>,
    next_tick: Option<Instant>,
    gesture: Option<Gesture>,
}

impl RotationController {
    /// Initialize a controller for `item_count` logical items.
    pub fn new(config: RotationConfig, item_count: usize, now: Instant) -> Result<Self, CoreError> {
        config.validate()?;
        let autoplay = config.autoplay;
        let mut controller = Self {
            config,
            item_count: 0,
            display_len: 0,
            current: 0,
            autoplay,
            interacting: false,
            transition: None,
            correction_at: None,
            resume_at: None,
            next_tick: None,
            gesture: None,
        };
        controller.reset(item_count, now);
        Ok(controller)
    }

    /// Replace the underlying list (e.g. a category filter switch) and return
    /// to the canonical starting index. Pending timers are dropped.
    pub fn reset(&mut self, item_count: usize, now: Instant) {
        self.item_count = item_count;
        self.display_len = match item_count {
            0 => 0,
            n if self.config.loop_mode => n + 2,
            n => n,
        };
        self.current = self.start_index();
        self.transition = None;
        self.correction_at = None;
        self.resume_at = None;
        self.gesture = None;
        self.next_tick = None;

        if self.rotates() && !self.interacting {
            self.schedule_tick(now);
        }
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn display_len(&self) -> usize {
        self.display_len
    }

    /// Index into the display list, padding included.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The logical item currently shown, or `None` when there are no items.
    /// A padding clone reports the real item it mirrors.
    pub fn real_index(&self) -> Option<usize> {
        if self.item_count == 0 {
            return None;
        }
        if !self.config.loop_mode {
            return Some(self.current);
        }
        Some(match self.current {
            0 => self.item_count - 1,
            i if i == self.display_len - 1 => 0,
            i => i - 1,
        })
    }

    /// Whether the auto-advance timer is currently scheduled.
    pub fn is_auto_advancing(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn is_user_interacting(&self) -> bool {
        self.interacting
    }

    pub fn transition_in_flight(&self) -> bool {
        self.transition.is_some()
    }

    /// Whether `index` is one of the two loop-padding clones.
    pub fn is_padding(&self, index: usize) -> bool {
        self.config.loop_mode
            && self.item_count > 0
            && (index == 0 || index == self.display_len - 1)
    }

    pub fn phase(&self) -> Phase {
        match self.item_count {
            0 => return Phase::Empty,
            1 => return Phase::Static,
            _ => {}
        }
        if self.transition.is_some() {
            Phase::Transitioning
        } else if self.interacting {
            Phase::Paused
        } else if self.is_padding(self.current) {
            Phase::PaddingCorrection
        } else if self.resume_at.is_some() {
            Phase::Paused
        } else {
            Phase::Idle {
                auto_advancing: self.is_auto_advancing(),
            }
        }
    }

    pub fn snapshot(&self) -> RotationSnapshot {
        RotationSnapshot {
            phase: self.phase(),
            current_index: self.current,
            real_index: self.real_index(),
            display_len: self.display_len,
            item_count: self.item_count,
        }
    }

    /// Real indices of the current item and `radius` neighbours on each side,
    /// wrapping around the list. Used by the 3D carousel to render the
    /// preview window.
    pub fn visible(&self, radius: usize) -> Vec<usize> {
        let Some(center) = self.real_index() else {
            return Vec::new();
        };
        let n = self.item_count as isize;
        let radius = radius as isize;
        (-radius..=radius)
            .map(|offset| (center as isize + offset).rem_euclid(n) as usize)
            .collect()
    }

    /// Earliest pending timer, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers().map(|(_, at)| at).min()
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Move one item in `direction`. Ignored while a transition is in flight
    /// or when there is nothing to rotate. A manual advance pushes the next
    /// automatic tick a full interval away instead of racing it.
    pub fn advance(&mut self, direction: Direction, now: Instant) -> Vec<RotationEvent> {
        let events = self.step(direction, now);
        if !events.is_empty() && self.next_tick.is_some() {
            self.schedule_tick(now);
        }
        events
    }

    /// Explicit navigation to a real item (dot click). Out-of-range indices
    /// are clamped to the last item.
    ///
    /// In non-loop mode this turns auto-advance off for the rest of the
    /// session; in loop mode it re-centres the window and reschedules.
    pub fn jump_to(&mut self, real_index: usize, now: Instant) -> Vec<RotationEvent> {
        if !self.rotates() || self.transition.is_some() {
            return Vec::new();
        }

        let mut events = Vec::new();
        if self.is_padding(self.current) {
            events.push(self.teleport());
        }

        let target = self.display_index(real_index.min(self.item_count - 1));
        if target != self.current {
            events.push(self.begin_transition(target, now));
        }

        if self.config.loop_mode {
            if self.next_tick.is_some() {
                self.schedule_tick(now);
            }
        } else {
            self.autoplay = false;
            self.next_tick = None;
        }
        events
    }

    /// Timer callback. Equivalent to a forward advance, but skipped entirely
    /// unless the auto-advance timer is scheduled.
    pub fn tick(&mut self, now: Instant) -> Vec<RotationEvent> {
        if !self.is_auto_advancing() || self.interacting {
            return Vec::new();
        }
        self.schedule_tick(now);
        self.step(Direction::Forward, now)
    }

    // -----------------------------------------------------------------------
    // Interaction
    // -----------------------------------------------------------------------

    /// Hover, touch or drag began. Cancels auto-advance, any pending resume
    /// and any pending loop correction. Calling it twice is the same as once.
    pub fn interaction_start(&mut self, _now: Instant) {
        if self.interacting {
            return;
        }
        self.interacting = true;
        self.next_tick = None;
        self.resume_at = None;
        self.correction_at = None;
    }

    /// Hover, touch or drag ended. Auto-advance is re-armed after the settle
    /// delay; a padding clone left uncorrected during the interaction is
    /// corrected at the same moment.
    pub fn interaction_end(&mut self, now: Instant) {
        if !self.interacting {
            return;
        }
        self.interacting = false;
        if !self.rotates() {
            return;
        }
        let settle_at = now + self.config.settle_delay;
        self.resume_at = Some(settle_at);
        if self.transition.is_none() && self.is_padding(self.current) {
            self.correction_at = Some(settle_at);
        }
    }

    /// Touch or mouse press at horizontal position `x`.
    pub fn pointer_down(&mut self, x: f32, now: Instant) {
        self.gesture = Some(Gesture {
            start_x: x,
            last_x: None,
        });
        self.interaction_start(now);
    }

    pub fn pointer_move(&mut self, x: f32) {
        if let Some(gesture) = self.gesture.as_mut() {
            gesture.last_x = Some(x);
        }
    }

    /// Release. A left swipe longer than the threshold advances forward, a
    /// right swipe backward; anything shorter (or a tap without movement)
    /// does not navigate.
    pub fn pointer_up(&mut self, now: Instant) -> Vec<RotationEvent> {
        let gesture = self.gesture.take();
        self.interaction_end(now);

        let Some(Gesture {
            start_x,
            last_x: Some(end_x),
        }) = gesture
        else {
            return Vec::new();
        };

        let distance = start_x - end_x;
        if distance.abs() <= self.config.swipe_threshold {
            return Vec::new();
        }
        let direction = if distance > 0.0 {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.advance(direction, now)
    }

    // -----------------------------------------------------------------------
    // Timers
    // -----------------------------------------------------------------------

    /// Fire every timer whose deadline is at or before `now`, in deadline
    /// order. Each timer runs as of its own deadline, so a late poll produces
    /// the same state as timely ones.
    pub fn poll(&mut self, now: Instant) -> Vec<RotationEvent> {
        let mut events = Vec::new();
        while let Some((timer, at)) = self.next_due(now) {
            match timer {
                Timer::Transition => events.extend(self.finish_transition()),
                Timer::Correction => {
                    self.correction_at = None;
                    if self.transition.is_none()
                        && !self.interacting
                        && self.is_padding(self.current)
                    {
                        events.push(self.teleport());
                    }
                }
                Timer::Resume => {
                    self.resume_at = None;
                    if self.autoplay && !self.interacting {
                        self.schedule_tick(at);
                    }
                }
                Timer::Tick => events.extend(self.tick(at)),
            }
        }
        events
    }

    fn timers(&self) -> impl Iterator<Item = (Timer, Instant)> {
        [
            self.transition.map(|t| (Timer::Transition, t.ends_at)),
            self.correction_at.map(|at| (Timer::Correction, at)),
            self.resume_at.map(|at| (Timer::Resume, at)),
            self.next_tick.map(|at| (Timer::Tick, at)),
        ]
        .into_iter()
        .flatten()
    }

    fn next_due(&self, now: Instant) -> Option<(Timer, Instant)> {
        self.timers()
            .filter(|(_, at)| *at <= now)
            .min_by_key(|(_, at)| *at)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn rotates(&self) -> bool {
        self.item_count > 1
    }

    fn display_index(&self, real_index: usize) -> usize {
        if self.config.loop_mode {
            real_index + 1
        } else {
            real_index
        }
    }

    fn start_index(&self) -> usize {
        if self.item_count == 0 {
            return 0;
        }
        let real = match self.config.start {
            StartPosition::First => 0,
            StartPosition::Middle => self.item_count / 2,
        };
        self.display_index(real)
    }

    fn schedule_tick(&mut self, from: Instant) {
        self.next_tick = if self.autoplay && self.rotates() {
            Some(from + self.config.auto_advance_interval)
        } else {
            None
        };
    }

    fn step(&mut self, direction: Direction, now: Instant) -> Vec<RotationEvent> {
        if !self.rotates() || self.transition.is_some() {
            return Vec::new();
        }

        let mut events = Vec::new();
        // A clone left over from an interaction is corrected before the next
        // visible transition.
        if self.is_padding(self.current) {
            events.push(self.teleport());
        }

        let next = self.current as isize + direction.offset();
        let target = if self.config.loop_mode {
            // Current is a real slot here, so next stays within the padding.
            next as usize
        } else {
            next.rem_euclid(self.display_len as isize) as usize
        };
        events.push(self.begin_transition(target, now));
        events
    }

    fn begin_transition(&mut self, target: usize, now: Instant) -> RotationEvent {
        let from = self.current;
        self.current = target;
        self.correction_at = None;
        self.transition = Some(Transition {
            ends_at: now + self.config.transition_duration,
        });
        RotationEvent::Moved { from, to: target }
    }

    fn finish_transition(&mut self) -> Vec<RotationEvent> {
        self.transition = None;
        let mut events = vec![RotationEvent::Settled {
            index: self.current,
        }];
        // While the user holds the carousel the clone stays put;
        // `interaction_end` re-arms the correction.
        if self.is_padding(self.current) && !self.interacting {
            events.push(self.teleport());
        }
        events
    }

    fn teleport(&mut self) -> RotationEvent {
        let from = self.current;
        let to = if from == 0 { self.display_len - 2 } else { 1 };
        self.current = to;
        self.correction_at = None;
        RotationEvent::Teleported { from, to }
    }
}
