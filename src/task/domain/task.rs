//! Task record and its enumerated priority and status attributes.

use super::{ContextId, Timestamp};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Task priority as graded by the external service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Below-normal priority.
    Negative,
    /// Normal priority.
    #[default]
    Low,
    /// Raised priority.
    Medium,
    /// High priority.
    High,
    /// Top priority.
    Top,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Self; 5] = [
        Self::Negative,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Top,
    ];

    /// Returns the numeric value the external service uses.
    #[must_use]
    pub const fn as_numeric(self) -> i64 {
        match self {
            Self::Negative => -1,
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Top => 3,
        }
    }

    /// Returns the priority for a service numeric value.
    ///
    /// Unknown values resolve to [`Priority::Negative`].
    #[must_use]
    pub fn from_numeric(value: i64) -> Self {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_numeric() == value)
            .unwrap_or(Self::Negative)
    }

    /// Returns the title keyword naming this priority.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Top => "top",
        }
    }

    /// Returns the priority matching the given keyword, ignoring case.
    #[must_use]
    pub fn from_keyword(raw: &str) -> Option<Self> {
        let lowered = raw.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|priority| priority.keyword() == lowered)
    }
}

/// Task status as tracked by the external service.
///
/// Each status carries a numeric identity, a title keyword, an optional
/// short alias, and a default pseudo-date day of month, held in an
/// attribute table with a reverse keyword index built once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// No status assigned.
    #[default]
    None,
    /// The next concrete action to take.
    NextAction,
    /// Actively being worked on.
    Active,
    /// Still being planned.
    Planning,
    /// Handed to someone else.
    Delegated,
    /// Blocked on someone else.
    Waiting,
    /// Parked until further notice.
    Hold,
    /// Deliberately pushed back.
    Postponed,
    /// Might happen one day.
    Someday,
    /// Abandoned.
    Canceled,
    /// Reference material rather than an action.
    Reference,
}

/// Attribute record for one status.
#[derive(Debug, Clone, Copy)]
struct StatusAttributes {
    numeric: i64,
    keyword: &'static str,
    shortcut: Option<&'static str>,
    default_pseudo_day: u32,
}

/// Reverse index from keyword and shortcut to status, built on first use.
static KEYWORD_INDEX: Lazy<HashMap<&'static str, Status>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for status in Status::ALL {
        index.insert(status.keyword(), status);
        if let Some(shortcut) = status.shortcut() {
            index.insert(shortcut, status);
        }
    }
    index
});

impl Status {
    /// Number of statuses.
    pub const COUNT: usize = 11;

    /// All statuses in service-numeric order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::None,
        Self::NextAction,
        Self::Active,
        Self::Planning,
        Self::Delegated,
        Self::Waiting,
        Self::Hold,
        Self::Postponed,
        Self::Someday,
        Self::Canceled,
        Self::Reference,
    ];

    /// Status assigned to tasks that arrive without one.
    pub const DEFAULT: Self = Self::NextAction;

    /// Status that parks a task in the future.
    pub const FUTURE: Self = Self::Hold;

    const fn attributes(self) -> StatusAttributes {
        match self {
            Self::None => StatusAttributes {
                numeric: 0,
                keyword: "none",
                shortcut: None,
                default_pseudo_day: 1,
            },
            Self::NextAction => StatusAttributes {
                numeric: 1,
                keyword: "next_action",
                shortcut: Some("next"),
                default_pseudo_day: 1,
            },
            Self::Active => StatusAttributes {
                numeric: 2,
                keyword: "active",
                shortcut: None,
                default_pseudo_day: 7,
            },
            Self::Planning => StatusAttributes {
                numeric: 3,
                keyword: "planning",
                shortcut: Some("plan"),
                default_pseudo_day: 14,
            },
            Self::Delegated => StatusAttributes {
                numeric: 4,
                keyword: "delegated",
                shortcut: Some("delegate"),
                default_pseudo_day: 21,
            },
            Self::Waiting => StatusAttributes {
                numeric: 5,
                keyword: "waiting",
                shortcut: None,
                default_pseudo_day: 21,
            },
            Self::Hold => StatusAttributes {
                numeric: 6,
                keyword: "hold",
                shortcut: None,
                default_pseudo_day: 21,
            },
            Self::Postponed => StatusAttributes {
                numeric: 7,
                keyword: "postponed",
                shortcut: None,
                default_pseudo_day: 21,
            },
            Self::Someday => StatusAttributes {
                numeric: 8,
                keyword: "someday",
                shortcut: None,
                default_pseudo_day: 28,
            },
            Self::Canceled => StatusAttributes {
                numeric: 9,
                keyword: "canceled",
                shortcut: None,
                default_pseudo_day: 28,
            },
            Self::Reference => StatusAttributes {
                numeric: 10,
                keyword: "reference",
                shortcut: Some("ref"),
                default_pseudo_day: 28,
            },
        }
    }

    /// Returns the numeric value the external service uses.
    #[must_use]
    pub const fn as_numeric(self) -> i64 {
        self.attributes().numeric
    }

    /// Returns the status for a service numeric value.
    ///
    /// Unknown values resolve to [`Status::None`].
    #[must_use]
    pub fn from_numeric(value: i64) -> Self {
        Self::ALL
            .into_iter()
            .find(|status| status.as_numeric() == value)
            .unwrap_or(Self::None)
    }

    /// Returns the title keyword naming this status.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        self.attributes().keyword
    }

    /// Returns the short title alias for this status, if it has one.
    #[must_use]
    pub const fn shortcut(self) -> Option<&'static str> {
        self.attributes().shortcut
    }

    /// Returns the default pseudo-date day of month for this status.
    #[must_use]
    pub const fn default_pseudo_day(self) -> u32 {
        self.attributes().default_pseudo_day
    }

    /// Returns this status's position in [`Status::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::None => 0,
            Self::NextAction => 1,
            Self::Active => 2,
            Self::Planning => 3,
            Self::Delegated => 4,
            Self::Waiting => 5,
            Self::Hold => 6,
            Self::Postponed => 7,
            Self::Someday => 8,
            Self::Canceled => 9,
            Self::Reference => 10,
        }
    }

    /// Returns the status matching the given keyword or short alias,
    /// ignoring case.
    #[must_use]
    pub fn from_keyword(raw: &str) -> Option<Self> {
        let lowered = raw.to_ascii_lowercase();
        KEYWORD_INDEX.get(lowered.as_str()).copied()
    }
}

/// A task record as exchanged with the external service.
///
/// Field values arrive already populated from the service; the
/// normalisation service mutates a working copy through the setters and
/// decides whether anything changed by whole-value comparison, so the
/// struct is `Clone + PartialEq`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    title: String,
    note: String,
    priority: Priority,
    starred: bool,
    due_date: Timestamp,
    start_date: Timestamp,
    repeat: String,
    context: Option<ContextId>,
    folder: Option<ContextId>,
    tags: Vec<String>,
    status: Status,
    children: u32,
}

impl Task {
    /// Creates a task with the given title and every other field at its
    /// service default.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            note: String::new(),
            priority: Priority::Low,
            starred: false,
            due_date: Timestamp::BLANK,
            start_date: Timestamp::BLANK,
            repeat: String::new(),
            context: None,
            folder: None,
            tags: Vec::new(),
            status: Status::None,
            children: 0,
        }
    }

    /// Sets the note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the starred flag.
    #[must_use]
    pub const fn with_starred(mut self, starred: bool) -> Self {
        self.starred = starred;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Timestamp) -> Self {
        self.due_date = due_date;
        self
    }

    /// Sets the start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: Timestamp) -> Self {
        self.start_date = start_date;
        self
    }

    /// Sets the repeat rule.
    #[must_use]
    pub fn with_repeat(mut self, repeat: impl Into<String>) -> Self {
        self.repeat = repeat.into();
        self
    }

    /// Sets the context reference.
    #[must_use]
    pub const fn with_context(mut self, context: ContextId) -> Self {
        self.context = Some(context);
        self
    }

    /// Sets the folder reference.
    #[must_use]
    pub const fn with_folder(mut self, folder: ContextId) -> Self {
        self.folder = Some(folder);
        self
    }

    /// Sets the tag list.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Sets the sub-task count.
    #[must_use]
    pub const fn with_children(mut self, children: u32) -> Self {
        self.children = children;
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Returns the note, trimmed of surrounding whitespace.
    #[must_use]
    pub fn note(&self) -> &str {
        self.note.trim()
    }

    /// Replaces the note.
    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Truncates the note to at most `max_chars` characters (hard cut).
    ///
    /// Notes imported from email can be very long; the external service
    /// rejects oversized notes.
    pub fn truncate_note(&mut self, max_chars: usize) {
        if self.note.chars().count() > max_chars {
            self.note = self.note.chars().take(max_chars).collect();
        }
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Replaces the priority.
    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Returns whether the task is starred.
    #[must_use]
    pub const fn is_starred(&self) -> bool {
        self.starred
    }

    /// Replaces the starred flag.
    pub fn set_starred(&mut self, starred: bool) {
        self.starred = starred;
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> Timestamp {
        self.due_date
    }

    /// Replaces the due date.
    pub fn set_due_date(&mut self, due_date: Timestamp) {
        self.due_date = due_date;
    }

    /// Returns the start date.
    #[must_use]
    pub const fn start_date(&self) -> Timestamp {
        self.start_date
    }

    /// Replaces the start date.
    pub fn set_start_date(&mut self, start_date: Timestamp) {
        self.start_date = start_date;
    }

    /// Returns the repeat rule, empty when the task does not repeat.
    #[must_use]
    pub fn repeat(&self) -> &str {
        &self.repeat
    }

    /// Replaces the repeat rule.
    pub fn set_repeat(&mut self, repeat: impl Into<String>) {
        self.repeat = repeat.into();
    }

    /// Returns the context reference, if any.
    #[must_use]
    pub const fn context(&self) -> Option<ContextId> {
        self.context
    }

    /// Replaces the context reference.
    pub fn set_context(&mut self, context: Option<ContextId>) {
        self.context = context;
    }

    /// Returns the folder reference, if any.
    #[must_use]
    pub const fn folder(&self) -> Option<ContextId> {
        self.folder
    }

    /// Replaces the folder reference.
    pub fn set_folder(&mut self, folder: Option<ContextId>) {
        self.folder = folder;
    }

    /// Returns the tags in stored order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns whether one of the tags equals `label`, ignoring case.
    #[must_use]
    pub fn tags_contain(&self, label: &str) -> bool {
        self.tags
            .iter()
            .any(|tag| tag.trim().eq_ignore_ascii_case(label))
    }

    /// Adds `label` as a tag unless it is already present, ignoring case.
    ///
    /// Returns whether the tag was added.
    pub fn add_tag(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        if self.tags_contain(&label) {
            return false;
        }
        self.tags.push(label);
        true
    }

    /// Removes all tags.
    pub fn clear_tags(&mut self) {
        self.tags.clear();
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Replaces the status.
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Returns the number of sub-tasks.
    #[must_use]
    pub const fn children(&self) -> u32 {
        self.children
    }

    /// Returns whether any of context, folder, or status carries a
    /// non-default value.
    ///
    /// Tasks captured through the quick-entry channel arrive with all
    /// three at their defaults; tasks edited in the external system carry
    /// at least one. The due-date provenance rule keys off this.
    #[must_use]
    pub const fn has_classification(&self) -> bool {
        self.context.is_some() || self.folder.is_some() || !matches!(self.status, Status::None)
    }
}
