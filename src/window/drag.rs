//! Pointer press tracking for window and icon drags.
//!
//! A press on a titlebar or the desktop icon starts a [`DragState`]. Drag
//! events move it, release finishes it. The release is reported as a click
//! only when it came both quickly and without travel; the travel check uses
//! a watermark, so wiggling out and back still counts as a drag.

use std::time::{Duration, Instant};

use crate::window::Point;

#[derive(Debug, Clone, Copy)]
pub struct DragThresholds {
    /// Press-to-release time below which a release can be a click.
    pub click_time: Duration,
    /// Chebyshev travel limit, in cells, below which a release can be a
    /// click.
    pub click_travel: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Released quickly without travel.
    Click,
    /// Released after a real drag, at this target top-left position.
    Commit(Point),
}

#[derive(Debug, Clone, Copy)]
pub struct DragState {
    /// Pointer offset inside the dragged surface at press time, so the
    /// surface doesn't snap its corner to the pointer.
    grab: (i32, i32),
    /// Press cell, the origin for travel measurement.
    start: (u16, u16),
    current: Point,
    pressed_at: Instant,
    max_travel: u16,
}

impl DragState {
    pub fn begin(origin: Point, column: u16, row: u16, now: Instant) -> Self {
        Self {
            grab: (column as i32 - origin.x, row as i32 - origin.y),
            start: (column, row),
            current: origin,
            pressed_at: now,
            max_travel: 0,
        }
    }

    fn travel_to(&self, column: u16, row: u16) -> u16 {
        let dx = column.abs_diff(self.start.0);
        let dy = row.abs_diff(self.start.1);
        dx.max(dy)
    }

    /// Follow the pointer. Returns the unclamped target position; callers
    /// that constrain movement (the desktop icon) clamp the result and
    /// [`pin`](Self::pin) it back.
    pub fn track(&mut self, column: u16, row: u16) -> Point {
        self.max_travel = self.max_travel.max(self.travel_to(column, row));
        self.current = Point::new(column as i32 - self.grab.0, row as i32 - self.grab.1);
        self.current
    }

    /// Override the tracked position, typically with a clamped variant.
    pub fn pin(&mut self, position: Point) {
        self.current = position;
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn finish(
        mut self,
        column: u16,
        row: u16,
        now: Instant,
        thresholds: &DragThresholds,
    ) -> DragOutcome {
        self.track(column, row);
        let elapsed = now.duration_since(self.pressed_at);
        if elapsed < thresholds.click_time && self.max_travel < thresholds.click_travel {
            DragOutcome::Click
        } else {
            DragOutcome::Commit(self.current)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> DragThresholds {
        DragThresholds {
            click_time: Duration::from_millis(200),
            click_travel: 1,
        }
    }

    #[test]
    fn quick_stationary_release_is_a_click() {
        let start = Instant::now();
        let drag = DragState::begin(Point::new(10, 5), 12, 6, start);
        let outcome = drag.finish(12, 6, start + Duration::from_millis(100), &thresholds());
        assert_eq!(outcome, DragOutcome::Click);
    }

    #[test]
    fn slow_release_commits_even_in_place() {
        let start = Instant::now();
        let drag = DragState::begin(Point::new(10, 5), 12, 6, start);
        let outcome = drag.finish(12, 6, start + Duration::from_millis(200), &thresholds());
        assert_eq!(outcome, DragOutcome::Commit(Point::new(10, 5)));
    }

    #[test]
    fn movement_commits_even_when_quick() {
        let start = Instant::now();
        let mut drag = DragState::begin(Point::new(10, 5), 12, 6, start);
        drag.track(15, 6);
        let outcome = drag.finish(15, 6, start + Duration::from_millis(50), &thresholds());
        assert_eq!(outcome, DragOutcome::Commit(Point::new(13, 5)));
    }

    #[test]
    fn wiggle_and_return_still_commits() {
        let start = Instant::now();
        let mut drag = DragState::begin(Point::new(10, 5), 12, 6, start);
        drag.track(14, 8);
        drag.track(12, 6);
        let outcome = drag.finish(12, 6, start + Duration::from_millis(50), &thresholds());
        // Back where it started, but the travel watermark already tripped.
        assert_eq!(outcome, DragOutcome::Commit(Point::new(10, 5)));
    }

    #[test]
    fn track_preserves_grab_offset() {
        let start = Instant::now();
        let mut drag = DragState::begin(Point::new(10, 5), 13, 6, start);
        assert_eq!(drag.track(20, 9), Point::new(17, 8));
    }

    #[test]
    fn grab_offset_survives_negative_targets() {
        let start = Instant::now();
        let mut drag = DragState::begin(Point::new(0, 0), 5, 2, start);
        assert_eq!(drag.track(2, 1), Point::new(-3, -1));
    }

    #[test]
    fn pin_overrides_until_next_track() {
        let start = Instant::now();
        let mut drag = DragState::begin(Point::new(10, 5), 12, 6, start);
        drag.track(40, 20);
        drag.pin(Point::new(30, 15));
        assert_eq!(drag.current(), Point::new(30, 15));
        drag.track(41, 20);
        assert_eq!(drag.current(), Point::new(39, 19));
    }
}
