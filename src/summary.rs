//! Filter-pass statistics over timeline events
//!
//! This module provides data structures and functions for summarizing
//! what a filter tree keeps and hides, for display next to the timeline
//! and for report output.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::{EventType, KnownStatus, TimelineEvent};
use crate::filter::Filter;

/// Statistics about a filter pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_events: usize,
    pub visible_events: usize,
    pub hidden_events: usize,
    /// Hidden events that came from known-benign files
    pub hidden_known: usize,
    pub earliest_visible: Option<DateTime<Utc>>,
    pub latest_visible: Option<DateTime<Utc>>,
    pub time_span_secs: i64,
}

/// Complete summary of one filter pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineSummary {
    pub stats: SummaryStats,
    /// Visible event counts per concrete event type
    pub visible_by_type: BTreeMap<EventType, usize>,
    pub generated_at: DateTime<Utc>,
}

impl TimelineSummary {
    /// Summarize a filter pass over the given events.
    pub fn from_events(events: &[TimelineEvent], filter: &Filter) -> Self {
        let mut stats = SummaryStats {
            total_events: events.len(),
            visible_events: 0,
            hidden_events: 0,
            hidden_known: 0,
            earliest_visible: None,
            latest_visible: None,
            time_span_secs: 0,
        };
        let mut visible_by_type: BTreeMap<EventType, usize> = BTreeMap::new();

        for event in events {
            if filter.evaluate(event) {
                stats.visible_events += 1;
                *visible_by_type.entry(event.event_type).or_default() += 1;

                let earlier = stats
                    .earliest_visible
                    .map_or(true, |earliest| event.timestamp < earliest);
                if earlier {
                    stats.earliest_visible = Some(event.timestamp);
                }
                let later = stats
                    .latest_visible
                    .map_or(true, |latest| event.timestamp > latest);
                if later {
                    stats.latest_visible = Some(event.timestamp);
                }
            } else {
                stats.hidden_events += 1;
                if event.known == KnownStatus::Known {
                    stats.hidden_known += 1;
                }
            }
        }

        if let (Some(earliest), Some(latest)) = (stats.earliest_visible, stats.latest_visible) {
            stats.time_span_secs = (latest - earliest).num_seconds();
        }

        Self {
            stats,
            visible_by_type,
            generated_at: Utc::now(),
        }
    }

    /// Visible count for one event type
    pub fn visible_count(&self, event_type: EventType) -> usize {
        self.visible_by_type.get(&event_type).copied().unwrap_or(0)
    }
}
