//! Timeline view-model state
//!
//! Owns the bounded event store, the root filter, and a bounded history
//! of filter snapshots so the view can return to earlier filter
//! configurations.

use std::collections::VecDeque;

use crate::config::TimesiftConfig;
use crate::error::Result;
use crate::events::TimelineEvent;
use crate::filter::Filter;
use crate::summary::TimelineSummary;

#[derive(Debug)]
pub struct TimelineState {
    events: VecDeque<TimelineEvent>,
    root: Filter,
    history: Vec<Filter>,
    max_events: usize,
    history_limit: usize,
}

impl Default for TimelineState {
    fn default() -> Self {
        Self {
            events: VecDeque::new(),
            root: Filter::default_filter(),
            history: Vec::new(),
            max_events: 10_000,
            history_limit: 20,
        }
    }
}

impl TimelineState {
    /// Create a new state with configuration
    pub fn with_config(config: &TimesiftConfig) -> Result<Self> {
        Ok(Self {
            events: VecDeque::new(),
            root: config.build_filter()?,
            history: Vec::new(),
            max_events: config.state.max_events,
            history_limit: config.state.history_limit,
        })
    }

    /// Add an event to the front of the store for newest-first ordering,
    /// dropping the oldest events past the bound.
    pub fn add_event(&mut self, event: TimelineEvent) {
        self.events.push_front(event);

        if self.events.len() > self.max_events {
            let dropped = self.events.len() - self.max_events;
            self.events.truncate(self.max_events);
            tracing::warn!(dropped, max_events = self.max_events, "event store full, dropped oldest events");
        }
    }

    pub fn events(&self) -> &VecDeque<TimelineEvent> {
        &self.events
    }

    pub fn root(&self) -> &Filter {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Filter {
        &mut self.root
    }

    /// Events passing the root filter, newest first.
    pub fn visible_events(&self) -> Vec<&TimelineEvent> {
        self.events
            .iter()
            .filter(|event| self.root.evaluate(event))
            .collect()
    }

    /// Push an independent copy of the current filter tree onto the
    /// history stack, dropping the oldest snapshot past the bound.
    pub fn snapshot_filters(&mut self) {
        self.history.push(self.root.copy_of());
        if self.history.len() > self.history_limit {
            self.history.remove(0);
        }
        tracing::debug!(depth = self.history.len(), "filter snapshot pushed");
    }

    /// Replace the root filter with the most recent snapshot. Returns
    /// false when the history is empty.
    pub fn restore_filters(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.root = snapshot;
                tracing::debug!(depth = self.history.len(), "filter snapshot restored");
                true
            }
            None => false,
        }
    }

    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    /// Generate a summary of the current filter pass
    pub fn summary(&self) -> TimelineSummary {
        let events: Vec<TimelineEvent> = self.events.iter().cloned().collect();
        TimelineSummary::from_events(&events, &self.root)
    }

    /// Get (total, visible, hidden) counts without full summary generation
    pub fn quick_stats(&self) -> (usize, usize, usize) {
        let total = self.events.len();
        let visible = self
            .events
            .iter()
            .filter(|event| self.root.evaluate(event))
            .count();
        (total, visible, total - visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventType, KnownStatus};
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, minute, 0).unwrap()
    }

    fn event(id: u64, description: &str) -> TimelineEvent {
        TimelineEvent::new(id, ts(id as u32 % 60), EventType::FileModified, description)
    }

    #[test]
    fn test_add_event_newest_first() {
        let mut state = TimelineState::default();
        state.add_event(event(1, "first"));
        state.add_event(event(2, "second"));

        assert_eq!(state.events().len(), 2);
        assert_eq!(state.events()[0].id, 2);
        assert_eq!(state.events()[1].id, 1);
    }

    #[test]
    fn test_event_store_is_bounded() {
        let mut config = TimesiftConfig::default();
        config.state.max_events = 3;

        let mut state = TimelineState::with_config(&config).unwrap();
        for id in 1..=5 {
            state.add_event(event(id, "e"));
        }

        assert_eq!(state.events().len(), 3);
        // Newest three survive
        let ids: Vec<u64> = state.events().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![5, 4, 3]);
    }

    #[test]
    fn test_visible_events_apply_root_filter() {
        let mut state = TimelineState::default();
        state.add_event(event(1, "unknown file"));
        state.add_event(event(2, "known file").with_known(KnownStatus::Known));

        let visible = state.visible_events();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
    }

    #[test]
    fn test_snapshot_and_restore_flow() {
        let mut state = TimelineState::default();
        state.snapshot_filters();

        // Deactivate hide-known, making known events visible
        state.root_mut().child_mut(0).unwrap().set_active(false);
        state.add_event(event(1, "known file").with_known(KnownStatus::Known));
        assert_eq!(state.visible_events().len(), 1);

        // Restoring the snapshot hides it again
        assert!(state.restore_filters());
        assert_eq!(state.visible_events().len(), 0);
        assert!(!state.restore_filters());
    }

    #[test]
    fn test_snapshot_is_independent_of_live_tree() {
        let mut state = TimelineState::default();
        state.snapshot_filters();
        state.root_mut().child_mut(0).unwrap().set_active(false);

        assert!(state.restore_filters());
        assert!(state.root().children()[0].is_active());
    }

    #[test]
    fn test_history_is_bounded() {
        let mut config = TimesiftConfig::default();
        config.state.history_limit = 2;

        let mut state = TimelineState::with_config(&config).unwrap();
        for _ in 0..5 {
            state.snapshot_filters();
        }

        assert_eq!(state.history_depth(), 2);
    }

    #[test]
    fn test_quick_stats() {
        let mut state = TimelineState::default();
        state.add_event(event(1, "visible"));
        state.add_event(event(2, "hidden").with_known(KnownStatus::Known));
        state.add_event(event(3, "also visible"));

        let (total, visible, hidden) = state.quick_stats();
        assert_eq!(total, 3);
        assert_eq!(visible, 2);
        assert_eq!(hidden, 1);
    }
}
