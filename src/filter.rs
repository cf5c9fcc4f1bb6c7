//! Composable boolean filter tree gating timeline event visibility
//!
//! A filter is a node with two independent flags (active, disabled) and a
//! predicate over events. Intersections own an ordered list of child
//! filters and AND together the active ones. Mutations notify registered
//! observers synchronously so a rendering layer can re-filter without
//! polling.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::events::{EventType, KnownStatus, TimelineEvent};

/// Change notification delivered synchronously to observers of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    ActiveChanged(bool),
    DisabledChanged(bool),
    StructureChanged,
}

type ChangeObserver = Box<dyn Fn(FilterChange)>;

/// The concrete behavior of a filter node.
#[derive(Debug, Serialize, Deserialize)]
pub enum FilterKind {
    /// Hide events derived from hash-set-recognized benign files
    HideKnown,
    /// Case-insensitive substring match over event text
    Text { text: String },
    /// Accept events whose type is in the selected set
    EventType { types: BTreeSet<EventType> },
    /// Logical AND of the active children
    Intersection { children: Vec<Filter> },
}

/// A filter node: shared flag state plus a [`FilterKind`].
///
/// `active` controls whether the node participates when a parent
/// intersection evaluates. `disabled` only signals that the activation
/// control should not be user-editable; it never affects evaluation.
#[derive(Serialize, Deserialize)]
pub struct Filter {
    kind: FilterKind,
    active: bool,
    disabled: bool,
    #[serde(skip)]
    observers: Vec<ChangeObserver>,
}

impl Filter {
    fn with_kind(kind: FilterKind, active: bool) -> Self {
        Self {
            kind,
            active,
            disabled: false,
            observers: Vec::new(),
        }
    }

    /// Filter that hides events from known-benign files. Active by default.
    pub fn hide_known() -> Self {
        Self::with_kind(FilterKind::HideKnown, true)
    }

    /// Substring filter bound to the given search text. Starts inactive
    /// when the text is empty, since there is nothing to match yet.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        let active = !text.trim().is_empty();
        Self::with_kind(FilterKind::Text { text }, active)
    }

    /// Filter accepting the given type and its whole subtree.
    pub fn event_type(root: EventType) -> Self {
        let types = root.subtree().into_iter().collect();
        Self::with_kind(FilterKind::EventType { types }, true)
    }

    /// Intersection of the given filters, in order.
    pub fn intersection(children: Vec<Filter>) -> Self {
        Self::with_kind(FilterKind::Intersection { children }, true)
    }

    /// The filter tree used at startup: an intersection of hide-known,
    /// text, and event-type over the full type hierarchy.
    pub fn default_filter() -> Self {
        Self::intersection(vec![
            Self::hide_known(),
            Self::text(""),
            Self::event_type(EventType::Root),
        ])
    }

    pub fn kind(&self) -> &FilterKind {
        &self.kind
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        tracing::debug!(filter = self.display_name(), active, "filter activation changed");
        self.notify(FilterChange::ActiveChanged(active));
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        if self.disabled == disabled {
            return;
        }
        self.disabled = disabled;
        self.notify(FilterChange::DisabledChanged(disabled));
    }

    /// Register a callback invoked synchronously after each state change,
    /// in registration order.
    pub fn on_change(&mut self, observer: impl Fn(FilterChange) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&self, change: FilterChange) {
        for observer in &self.observers {
            observer(change);
        }
    }

    /// Evaluate this filter's predicate against an event.
    ///
    /// A node's own `active` flag gates participation in a parent
    /// intersection and is not consulted here; callers holding a root
    /// evaluate it unconditionally. An intersection with no active
    /// children passes everything (vacuous AND). `disabled` never affects
    /// the result.
    pub fn evaluate(&self, event: &TimelineEvent) -> bool {
        match &self.kind {
            FilterKind::HideKnown => event.known != KnownStatus::Known,
            FilterKind::Text { text } => {
                let needle = text.trim().to_lowercase();
                needle.is_empty()
                    || event
                        .text_fields()
                        .any(|field| field.to_lowercase().contains(&needle))
            }
            FilterKind::EventType { types } => types.contains(&event.event_type),
            FilterKind::Intersection { children } => children
                .iter()
                .filter(|child| child.is_active())
                .all(|child| child.evaluate(event)),
        }
    }

    /// Deep, independent copy preserving active and disabled state on
    /// every node. Observers are view bindings, not filter state, and are
    /// not carried over.
    pub fn copy_of(&self) -> Filter {
        let kind = match &self.kind {
            FilterKind::HideKnown => FilterKind::HideKnown,
            FilterKind::Text { text } => FilterKind::Text { text: text.clone() },
            FilterKind::EventType { types } => FilterKind::EventType {
                types: types.clone(),
            },
            FilterKind::Intersection { children } => FilterKind::Intersection {
                children: children.iter().map(Filter::copy_of).collect(),
            },
        };
        Filter {
            kind,
            active: self.active,
            disabled: self.disabled,
            observers: Vec::new(),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match &self.kind {
            FilterKind::HideKnown => "Hide Known Files",
            FilterKind::Text { .. } => "Text",
            FilterKind::EventType { .. } => "Event Type",
            FilterKind::Intersection { .. } => "Intersection",
        }
    }

    /// Plain-HTML rendering of this node for report output. Leaves render
    /// their name, annotated when inactive; intersections join their
    /// children with " and ".
    pub fn html_report_string(&self) -> String {
        let suffix = if self.active { "" } else { " (inactive)" };
        match &self.kind {
            FilterKind::Text { text } if !text.trim().is_empty() => {
                format!("{} &quot;{}&quot;{}", self.display_name(), text.trim(), suffix)
            }
            FilterKind::Intersection { children } => children
                .iter()
                .map(Filter::html_report_string)
                .collect::<Vec<_>>()
                .join(" and "),
            _ => format!("{}{}", self.display_name(), suffix),
        }
    }

    /// Children of an intersection; empty for leaf filters.
    pub fn children(&self) -> &[Filter] {
        match &self.kind {
            FilterKind::Intersection { children } => children,
            _ => &[],
        }
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut Filter> {
        match &mut self.kind {
            FilterKind::Intersection { children } => children.get_mut(index),
            _ => None,
        }
    }

    /// Append a child to an intersection. Ignored with a warning on leaf
    /// filters.
    pub fn add_child(&mut self, child: Filter) {
        match &mut self.kind {
            FilterKind::Intersection { children } => {
                children.push(child);
                self.notify(FilterChange::StructureChanged);
            }
            _ => {
                tracing::warn!(filter = self.display_name(), "add_child on a leaf filter ignored");
            }
        }
    }

    /// Remove and return the child at `index`, if this is an intersection
    /// and the index is in bounds.
    pub fn remove_child(&mut self, index: usize) -> Option<Filter> {
        match &mut self.kind {
            FilterKind::Intersection { children } if index < children.len() => {
                let removed = children.remove(index);
                self.notify(FilterChange::StructureChanged);
                Some(removed)
            }
            _ => None,
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("kind", &self.kind)
            .field("active", &self.active)
            .field("disabled", &self.disabled)
            .field("observers", &self.observers.len())
            .finish()
    }
}
