use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimesiftError};

/// Event types form a small fixed hierarchy: a root, three base types,
/// and concrete leaves under each base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventType {
    Root,
    FileSystem,
    FileModified,
    FileAccessed,
    FileCreated,
    FileChanged,
    WebActivity,
    WebDownloads,
    WebCookies,
    WebBookmarks,
    WebHistory,
    WebSearches,
    MiscTypes,
    Message,
    Email,
    CallLog,
    GpsRoute,
}

impl EventType {
    pub fn parent(&self) -> Option<EventType> {
        match self {
            EventType::Root => None,
            EventType::FileSystem | EventType::WebActivity | EventType::MiscTypes => {
                Some(EventType::Root)
            }
            EventType::FileModified
            | EventType::FileAccessed
            | EventType::FileCreated
            | EventType::FileChanged => Some(EventType::FileSystem),
            EventType::WebDownloads
            | EventType::WebCookies
            | EventType::WebBookmarks
            | EventType::WebHistory
            | EventType::WebSearches => Some(EventType::WebActivity),
            EventType::Message | EventType::Email | EventType::CallLog | EventType::GpsRoute => {
                Some(EventType::MiscTypes)
            }
        }
    }

    pub fn children(&self) -> &'static [EventType] {
        match self {
            EventType::Root => &[
                EventType::FileSystem,
                EventType::WebActivity,
                EventType::MiscTypes,
            ],
            EventType::FileSystem => &[
                EventType::FileModified,
                EventType::FileAccessed,
                EventType::FileCreated,
                EventType::FileChanged,
            ],
            EventType::WebActivity => &[
                EventType::WebDownloads,
                EventType::WebCookies,
                EventType::WebBookmarks,
                EventType::WebHistory,
                EventType::WebSearches,
            ],
            EventType::MiscTypes => &[
                EventType::Message,
                EventType::Email,
                EventType::CallLog,
                EventType::GpsRoute,
            ],
            _ => &[],
        }
    }

    /// This type plus all descendants, pre-order.
    pub fn subtree(&self) -> Vec<EventType> {
        let mut types = vec![*self];
        for child in self.children() {
            types.extend(child.subtree());
        }
        types
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EventType::Root => "All Events",
            EventType::FileSystem => "File System",
            EventType::FileModified => "File Modified",
            EventType::FileAccessed => "File Accessed",
            EventType::FileCreated => "File Created",
            EventType::FileChanged => "File Changed",
            EventType::WebActivity => "Web Activity",
            EventType::WebDownloads => "Web Downloads",
            EventType::WebCookies => "Web Cookies",
            EventType::WebBookmarks => "Web Bookmarks",
            EventType::WebHistory => "Web History",
            EventType::WebSearches => "Web Searches",
            EventType::MiscTypes => "Misc Types",
            EventType::Message => "Messages",
            EventType::Email => "Email",
            EventType::CallLog => "Call Log",
            EventType::GpsRoute => "GPS Routes",
        }
    }

    /// Resolve a configuration name like "root" or "web_activity" to a type.
    pub fn from_name(name: &str) -> Result<EventType> {
        let normalized = name
            .trim()
            .to_lowercase()
            .replace(|c: char| c == '-' || c == ' ', "_");
        let event_type = match normalized.as_str() {
            "root" | "all" | "all_events" => EventType::Root,
            "file_system" => EventType::FileSystem,
            "file_modified" => EventType::FileModified,
            "file_accessed" => EventType::FileAccessed,
            "file_created" => EventType::FileCreated,
            "file_changed" => EventType::FileChanged,
            "web_activity" => EventType::WebActivity,
            "web_downloads" => EventType::WebDownloads,
            "web_cookies" => EventType::WebCookies,
            "web_bookmarks" => EventType::WebBookmarks,
            "web_history" => EventType::WebHistory,
            "web_searches" => EventType::WebSearches,
            "misc_types" => EventType::MiscTypes,
            "message" | "messages" => EventType::Message,
            "email" => EventType::Email,
            "call_log" => EventType::CallLog,
            "gps_route" | "gps_routes" => EventType::GpsRoute,
            _ => return Err(TimesiftError::UnknownEventType(name.to_string())),
        };
        Ok(event_type)
    }
}

/// Hash-set recognition status of the file an event was derived from.
/// `Known` means present in a known-benign hash set; `KnownBad` files are
/// notable and always stay visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnownStatus {
    Unknown,
    Known,
    KnownBad,
}

/// Typed attributes attached to an event by the case data layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    Sender,
    Recipient,
    CcRecipient,
    Subject,
    Content,
    Headers,
    PhoneFrom,
    PhoneTo,
    Direction,
    Path,
}

impl AttributeType {
    pub fn display_name(&self) -> &'static str {
        match self {
            AttributeType::Sender => "From",
            AttributeType::Recipient => "To",
            AttributeType::CcRecipient => "CC",
            AttributeType::Subject => "Subject",
            AttributeType::Content => "Content",
            AttributeType::Headers => "Headers",
            AttributeType::PhoneFrom => "From Phone",
            AttributeType::PhoneTo => "To Phone",
            AttributeType::Direction => "Direction",
            AttributeType::Path => "Path",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub event_type: EventType,
    pub description: String,
    pub known: KnownStatus,
    pub attributes: BTreeMap<AttributeType, String>,
}

impl TimelineEvent {
    pub fn new(
        id: u64,
        timestamp: DateTime<Utc>,
        event_type: EventType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            timestamp,
            event_type,
            description: description.into(),
            known: KnownStatus::Unknown,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_known(mut self, known: KnownStatus) -> Self {
        self.known = known;
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeType, value: impl Into<String>) -> Self {
        self.attributes.insert(attribute, value.into());
        self
    }

    pub fn attribute(&self, attribute: AttributeType) -> Option<&str> {
        self.attributes.get(&attribute).map(String::as_str)
    }

    /// All text the text filter matches against: the description followed
    /// by every attribute value.
    pub fn text_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.description.as_str()).chain(self.attributes.values().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_event_creation() {
        let event = TimelineEvent::new(1, ts(), EventType::Email, "mail from alice");

        assert_eq!(event.id, 1);
        assert_eq!(event.event_type, EventType::Email);
        assert_eq!(event.known, KnownStatus::Unknown);
        assert!(event.attributes.is_empty());
    }

    #[test]
    fn test_event_builder_chaining() {
        let event = TimelineEvent::new(2, ts(), EventType::Email, "mail from alice")
            .with_known(KnownStatus::KnownBad)
            .with_attribute(AttributeType::Sender, "alice@example.com")
            .with_attribute(AttributeType::Subject, "quarterly report");

        assert_eq!(event.known, KnownStatus::KnownBad);
        assert_eq!(event.attribute(AttributeType::Sender), Some("alice@example.com"));
        assert_eq!(event.attribute(AttributeType::Subject), Some("quarterly report"));
        assert_eq!(event.attribute(AttributeType::Recipient), None);
    }

    #[test]
    fn test_text_fields_cover_description_and_attributes() {
        let event = TimelineEvent::new(3, ts(), EventType::Message, "sms thread")
            .with_attribute(AttributeType::Content, "see you at noon");

        let fields: Vec<&str> = event.text_fields().collect();
        assert_eq!(fields, vec!["sms thread", "see you at noon"]);
    }

    #[test]
    fn test_hierarchy_parent_child_consistency() {
        for base in EventType::Root.children() {
            assert_eq!(base.parent(), Some(EventType::Root));
            for leaf in base.children() {
                assert_eq!(leaf.parent(), Some(*base));
                assert!(leaf.children().is_empty());
            }
        }
    }

    #[test]
    fn test_subtree_from_root_covers_everything() {
        let all = EventType::Root.subtree();
        assert!(all.contains(&EventType::Root));
        assert!(all.contains(&EventType::FileModified));
        assert!(all.contains(&EventType::WebSearches));
        assert!(all.contains(&EventType::GpsRoute));
        assert_eq!(all.len(), 17);
    }

    #[test]
    fn test_subtree_of_leaf_is_self() {
        assert_eq!(EventType::Email.subtree(), vec![EventType::Email]);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(EventType::from_name("root").unwrap(), EventType::Root);
        assert_eq!(EventType::from_name("Web Activity").unwrap(), EventType::WebActivity);
        assert_eq!(EventType::from_name("call-log").unwrap(), EventType::CallLog);
        assert!(EventType::from_name("registry").is_err());
    }
}
