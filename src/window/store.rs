//! The window state store.
//!
//! All six windows exist for the whole session. "Closing" and "minimizing"
//! both return a window to the dock; they differ only in which animation
//! plays on the way out. Animated removal is two-phase: `begin_transition`
//! marks the window as leaving (it stays visible but inert), and
//! `commit_transitions` flips `minimized` once the animation deadline
//! passes. Restoring a window cancels any pending transition on it, so a
//! quick dock click can rescue a closing window.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::constants::Z_RENORMALIZE_LIMIT;
use crate::window::{Point, WindowRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Close,
    Minimize,
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    id: &'static str,
    kind: TransitionKind,
    started: Instant,
}

#[derive(Debug)]
pub struct WindowStore {
    records: Vec<WindowRecord>,
    transitions: Vec<Transition>,
    close_animation: Duration,
    minimize_animation: Duration,
}

impl WindowStore {
    pub fn new(
        records: Vec<WindowRecord>,
        close_animation: Duration,
        minimize_animation: Duration,
    ) -> Self {
        Self {
            records,
            transitions: Vec::new(),
            close_animation,
            minimize_animation,
        }
    }

    pub fn records(&self) -> &[WindowRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&WindowRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut WindowRecord> {
        self.records.iter_mut().find(|record| record.id == id)
    }

    fn max_z(&self) -> i32 {
        self.records.iter().map(|record| record.z).max().unwrap_or(0)
    }

    /// Reassign every z to `1..=n` preserving the current stacking order.
    /// Called before a focus allocation would cross the watermark, so z
    /// values stay well away from overflow no matter how long the session
    /// runs.
    fn renormalize_z(&mut self) {
        let mut order: Vec<usize> = (0..self.records.len()).collect();
        order.sort_by_key(|&index| self.records[index].z);
        for (rank, index) in order.into_iter().enumerate() {
            self.records[index].z = rank as i32 + 1;
        }
        debug!("renormalized window z values");
    }

    /// Raise the window above everything else. Unknown ids are ignored.
    pub fn focus_window(&mut self, id: &str) {
        if self.get(id).is_none() {
            debug!(id, "focus requested for unknown window");
            return;
        }
        if self.max_z() >= Z_RENORMALIZE_LIMIT {
            self.renormalize_z();
        }
        let top = self.max_z() + 1;
        if let Some(record) = self.get_mut(id) {
            record.z = top;
        }
    }

    /// Bring a minimized window back: visible, pending transition dropped,
    /// focused. Restoring an already-visible window just focuses it.
    pub fn restore_window(&mut self, id: &str) {
        if self.get(id).is_none() {
            debug!(id, "restore requested for unknown window");
            return;
        }
        self.transitions.retain(|transition| transition.id != id);
        if let Some(record) = self.get_mut(id) {
            record.minimized = false;
        }
        self.focus_window(id);
    }

    /// Instantly return the window to the dock, skipping any animation.
    pub fn minimize_window(&mut self, id: &str) {
        match self.get_mut(id) {
            Some(record) => record.minimized = true,
            None => debug!(id, "minimize requested for unknown window"),
        }
        self.transitions.retain(|transition| transition.id != id);
    }

    /// Restore if minimized, minimize otherwise. The dock's primitive;
    /// the shell substitutes an animated transition for the minimize half
    /// when it wants the shrink effect.
    pub fn toggle_window(&mut self, id: &str) {
        match self.get(id) {
            Some(record) if record.minimized => self.restore_window(id),
            Some(_) => self.minimize_window(id),
            None => debug!(id, "toggle requested for unknown window"),
        }
    }

    pub fn move_window(&mut self, id: &str, position: Point) {
        match self.get_mut(id) {
            Some(record) => record.position = position,
            None => debug!(id, "move requested for unknown window"),
        }
    }

    /// Instantly return every window to the dock.
    pub fn close_all_windows(&mut self) {
        for record in &mut self.records {
            record.minimized = true;
        }
        self.transitions.clear();
    }

    /// Start an animated removal. No-op for unknown ids and for windows
    /// already on the dock. A second begin on the same window replaces the
    /// pending transition, restarting its clock.
    pub fn begin_transition(&mut self, id: &'static str, kind: TransitionKind, now: Instant) {
        let Some(record) = self.get(id) else {
            debug!(id, "transition requested for unknown window");
            return;
        };
        if record.minimized {
            return;
        }
        self.transitions.retain(|transition| transition.id != id);
        self.transitions.push(Transition {
            id,
            kind,
            started: now,
        });
        debug!(id, kind = ?kind, "window transition started");
    }

    fn duration_for(&self, kind: TransitionKind) -> Duration {
        match kind {
            TransitionKind::Close => self.close_animation,
            TransitionKind::Minimize => self.minimize_animation,
        }
    }

    /// Commit every transition whose animation has finished. Returns the
    /// committed windows so callers can react.
    pub fn commit_transitions(&mut self, now: Instant) -> Vec<(&'static str, TransitionKind)> {
        let mut committed = Vec::new();
        let mut remaining = Vec::with_capacity(self.transitions.len());
        for transition in self.transitions.drain(..) {
            let duration = match transition.kind {
                TransitionKind::Close => self.close_animation,
                TransitionKind::Minimize => self.minimize_animation,
            };
            if now.duration_since(transition.started) >= duration {
                committed.push((transition.id, transition.kind));
            } else {
                remaining.push(transition);
            }
        }
        self.transitions = remaining;
        for (id, kind) in &committed {
            if let Some(record) = self.records.iter_mut().find(|record| record.id == *id) {
                record.minimized = true;
            }
            debug!(id, kind = ?kind, "window transition committed");
        }
        committed
    }

    /// Progress of the window's pending transition in `0.0..1.0`, or `None`
    /// when no transition is pending.
    pub fn transition_progress(&self, id: &str, now: Instant) -> Option<f32> {
        let transition = self
            .transitions
            .iter()
            .find(|transition| transition.id == id)?;
        let duration = self.duration_for(transition.kind);
        if duration.is_zero() {
            return Some(1.0);
        }
        let elapsed = now.duration_since(transition.started);
        Some((elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0))
    }

    pub fn transition_kind(&self, id: &str) -> Option<TransitionKind> {
        self.transitions
            .iter()
            .find(|transition| transition.id == id)
            .map(|transition| transition.kind)
    }

    /// Visible windows in paint order (back to front).
    pub fn paint_order(&self) -> Vec<WindowRecord> {
        let mut visible: Vec<WindowRecord> = self
            .records
            .iter()
            .filter(|record| !record.minimized)
            .copied()
            .collect();
        visible.sort_by_key(|record| record.z);
        visible
    }

    pub fn minimized(&self) -> Vec<WindowRecord> {
        self.records
            .iter()
            .filter(|record| record.minimized)
            .copied()
            .collect()
    }

    /// The visible window with the highest z, if any window is visible.
    pub fn focused(&self) -> Option<WindowRecord> {
        self.records
            .iter()
            .filter(|record| !record.minimized)
            .max_by_key(|record| record.z)
            .copied()
    }

    /// Raise the bottom-most visible window, cycling focus through the
    /// stack on repeated calls.
    pub fn cycle_focus(&mut self) {
        let Some(bottom) = self
            .records
            .iter()
            .filter(|record| !record.minimized)
            .min_by_key(|record| record.z)
            .map(|record| record.id)
        else {
            return;
        };
        self.focus_window(bottom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::PanelKind;

    fn store() -> WindowStore {
        let records = PanelKind::ALL
            .iter()
            .enumerate()
            .map(|(index, kind)| WindowRecord::new(*kind, index as i32 * 4, 2, index as i32 + 1))
            .collect();
        WindowStore::new(
            records,
            Duration::from_millis(300),
            Duration::from_millis(400),
        )
    }

    #[test]
    fn focus_raises_above_all_others() {
        let mut store = store();
        store.focus_window("about");
        let about = store.get("about").unwrap();
        assert!(store
            .records()
            .iter()
            .filter(|record| record.id != "about")
            .all(|record| record.z < about.z));
        assert_eq!(store.focused().unwrap().id, "about");
    }

    #[test]
    fn z_values_stay_unique_under_focus_churn() {
        let mut store = store();
        for id in ["about", "skills", "about", "contact", "terminal", "about"] {
            store.focus_window(id);
        }
        let mut zs: Vec<i32> = store.records().iter().map(|record| record.z).collect();
        zs.sort_unstable();
        zs.dedup();
        assert_eq!(zs.len(), store.records().len());
    }

    #[test]
    fn restore_makes_visible_and_focused() {
        let mut store = store();
        store.minimize_window("skills");
        assert!(store.get("skills").unwrap().minimized);
        store.restore_window("skills");
        let skills = store.get("skills").unwrap();
        assert!(!skills.minimized);
        assert_eq!(store.focused().unwrap().id, "skills");
    }

    #[test]
    fn toggle_is_its_own_inverse_on_minimized() {
        let mut store = store();
        assert!(!store.get("terminal").unwrap().minimized);
        store.toggle_window("terminal");
        assert!(store.get("terminal").unwrap().minimized);
        store.toggle_window("terminal");
        assert!(!store.get("terminal").unwrap().minimized);
    }

    #[test]
    fn close_all_leaves_nothing_visible() {
        let mut store = store();
        let before: Vec<(Point, i32)> = store
            .records()
            .iter()
            .map(|record| (record.position, record.z))
            .collect();
        store.close_all_windows();
        assert!(store.paint_order().is_empty());
        assert_eq!(store.minimized().len(), PanelKind::ALL.len());
        assert!(store.focused().is_none());
        // positions and stacking survive for later restore
        let after: Vec<(Point, i32)> = store
            .records()
            .iter()
            .map(|record| (record.position, record.z))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn minimize_then_restore_round_trips_position() {
        let mut store = store();
        let before = store.get("projects").unwrap().position;
        store.minimize_window("projects");
        store.restore_window("projects");
        assert_eq!(store.get("projects").unwrap().position, before);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut store = store();
        let before: Vec<_> = store.records().to_vec();
        store.focus_window("nope");
        store.restore_window("nope");
        store.minimize_window("nope");
        store.move_window("nope", Point::new(9, 9));
        store.begin_transition("nope", TransitionKind::Close, Instant::now());
        assert_eq!(store.records(), before.as_slice());
    }

    #[test]
    fn renormalization_preserves_order() {
        let mut store = store();
        // Push one window's z near the watermark, then force an allocation
        // past it.
        store.get_mut("contact").unwrap().z = Z_RENORMALIZE_LIMIT;
        store.focus_window("about");
        let mut ranked: Vec<(&str, i32)> = store
            .records()
            .iter()
            .map(|record| (record.id, record.z))
            .collect();
        ranked.sort_by_key(|(_, z)| *z);
        // contact was on top before the focus, so it must sit just under
        // the newly focused window.
        assert_eq!(ranked.last().unwrap().0, "about");
        assert_eq!(ranked[ranked.len() - 2].0, "contact");
        assert!(store.records().iter().all(|record| record.z <= 8));
    }

    #[test]
    fn transition_commits_only_after_duration() {
        let mut store = store();
        let start = Instant::now();
        store.begin_transition("about", TransitionKind::Close, start);
        assert!(!store.get("about").unwrap().minimized);

        let early = store.commit_transitions(start + Duration::from_millis(299));
        assert!(early.is_empty());
        assert!(!store.get("about").unwrap().minimized);

        let done = store.commit_transitions(start + Duration::from_millis(300));
        assert_eq!(done, vec![("about", TransitionKind::Close)]);
        assert!(store.get("about").unwrap().minimized);
        assert!(store.transition_kind("about").is_none());
    }

    #[test]
    fn minimize_transition_uses_its_own_duration() {
        let mut store = store();
        let start = Instant::now();
        store.begin_transition("skills", TransitionKind::Minimize, start);
        assert!(store
            .commit_transitions(start + Duration::from_millis(300))
            .is_empty());
        let done = store.commit_transitions(start + Duration::from_millis(400));
        assert_eq!(done, vec![("skills", TransitionKind::Minimize)]);
    }

    #[test]
    fn restore_cancels_pending_transition() {
        let mut store = store();
        let start = Instant::now();
        store.begin_transition("about", TransitionKind::Close, start);
        store.restore_window("about");
        let committed = store.commit_transitions(start + Duration::from_secs(5));
        assert!(committed.is_empty());
        assert!(!store.get("about").unwrap().minimized);
    }

    #[test]
    fn begin_replaces_pending_transition_for_same_window() {
        let mut store = store();
        let start = Instant::now();
        store.begin_transition("about", TransitionKind::Close, start);
        store.begin_transition(
            "about",
            TransitionKind::Minimize,
            start + Duration::from_millis(200),
        );
        // The close deadline has passed, but the replacement restarted the
        // clock with the minimize duration.
        assert!(store
            .commit_transitions(start + Duration::from_millis(350))
            .is_empty());
        assert_eq!(store.transition_kind("about"), Some(TransitionKind::Minimize));
        let done = store.commit_transitions(start + Duration::from_millis(600));
        assert_eq!(done, vec![("about", TransitionKind::Minimize)]);
    }

    #[test]
    fn begin_on_minimized_window_is_ignored() {
        let mut store = store();
        store.minimize_window("about");
        store.begin_transition("about", TransitionKind::Close, Instant::now());
        assert!(store.transition_kind("about").is_none());
    }

    #[test]
    fn progress_runs_zero_to_one() {
        let mut store = store();
        let start = Instant::now();
        store.begin_transition("about", TransitionKind::Close, start);
        let at_start = store.transition_progress("about", start).unwrap();
        assert!(at_start.abs() < f32::EPSILON);
        let halfway = store
            .transition_progress("about", start + Duration::from_millis(150))
            .unwrap();
        assert!((halfway - 0.5).abs() < 0.01);
        let past = store
            .transition_progress("about", start + Duration::from_secs(2))
            .unwrap();
        assert!((past - 1.0).abs() < f32::EPSILON);
        assert!(store.transition_progress("skills", start).is_none());
    }

    #[test]
    fn cycle_focus_walks_the_stack() {
        let mut store = store();
        store.minimize_window("education");
        let first = store.focused().unwrap().id;
        let mut seen = vec![first];
        for _ in 0..5 {
            store.cycle_focus();
            seen.push(store.focused().unwrap().id);
        }
        // Five visible windows cycle back to the starting focus.
        assert_eq!(seen.first(), seen.last());
        let unique: std::collections::HashSet<_> = seen.iter().collect();
        assert_eq!(unique.len(), 5);
    }
}
