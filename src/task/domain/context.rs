//! Contexts, folders, and the per-user catalog they are looked up in.
//!
//! The external service models contexts and folders with the same shape,
//! so one pair of types serves both. A [`ContextCatalog`] is built once per
//! processing cycle from the service's listing and is read-only thereafter.

use super::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identifier assigned to a context or folder by the external service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(u64);

impl ContextId {
    /// Creates a context identifier from the service-assigned value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A task context or folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    id: ContextId,
    name: String,
}

impl Context {
    /// Creates a context with the given id and name.
    #[must_use]
    pub fn new(id: ContextId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the context id.
    #[must_use]
    pub const fn id(&self) -> ContextId {
        self.id
    }

    /// Returns the context name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name with its leading sort prefix removed.
    ///
    /// Folder names carry a sort prefix up to the first space, so
    /// `"p3 Geek"` yields `"Geek"` and `"p3.g Computer Repair"` yields
    /// `"Computer Repair"`. Names without a space (or starting with one)
    /// are returned unchanged.
    #[must_use]
    pub fn name_without_prefix(&self) -> &str {
        match self.name.find(' ') {
            None | Some(0) => &self.name,
            Some(index) => {
                let (_, stripped) = self.name.split_at(index);
                stripped.trim()
            }
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Id: {}, Name: {}]", self.id, self.name)
    }
}

/// An immutable catalog of the contexts (or folders) known for one user.
///
/// Lookups that can match more than one entry resolve deterministically to
/// the first match in the order the entries were supplied.
///
/// # Examples
///
/// ```
/// use taskmill::task::domain::{Context, ContextCatalog, ContextId};
///
/// let catalog = ContextCatalog::new(vec![
///     Context::new(ContextId::new(1), "Work"),
///     Context::new(ContextId::new(2), "p6 - Geek"),
/// ])
/// .expect("distinct ids");
///
/// assert!(catalog.find_by_prefix_match("wo").is_some());
/// assert!(catalog.find_by_code_prefix("p6").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextCatalog {
    entries: Vec<Context>,
    by_id: HashMap<ContextId, usize>,
}

impl ContextCatalog {
    /// Builds a catalog from the service's listing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] when two entries carry the
    /// same id.
    pub fn new(entries: Vec<Context>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if by_id.insert(entry.id(), position).is_some() {
                return Err(CatalogError::DuplicateId(entry.id()));
            }
        }
        Ok(Self { entries, by_id })
    }

    /// Builds an empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Returns the number of entries in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry with the given id, if any.
    #[must_use]
    pub fn find_by_id(&self, id: ContextId) -> Option<&Context> {
        self.by_id
            .get(&id)
            .and_then(|position| self.entries.get(*position))
    }

    /// Returns the entry whose name equals `name` exactly, if any.
    #[must_use]
    pub fn find_by_exact_name(&self, name: &str) -> Option<&Context> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    /// Returns the first entry whose name starts with `name`, ignoring
    /// case.
    ///
    /// Only the first `name.chars().count()` characters of each candidate
    /// take part in the comparison, so `"err"` matches `"Errands"`.
    #[must_use]
    pub fn find_by_prefix_match(&self, name: &str) -> Option<&Context> {
        let query_len = name.chars().count();
        self.entries.iter().find(|entry| {
            let head: String = entry.name().chars().take(query_len).collect();
            head.eq_ignore_ascii_case(name)
        })
    }

    /// Returns the first entry matching `name` ignoring case, against
    /// either the full name or the name with its sort prefix stripped.
    #[must_use]
    pub fn find_by_name_or_stripped(&self, name: &str) -> Option<&Context> {
        self.entries.iter().find(|entry| {
            entry.name().eq_ignore_ascii_case(name)
                || entry.name_without_prefix().eq_ignore_ascii_case(name)
        })
    }

    /// Returns the first entry whose name starts with `"<code> - "`.
    ///
    /// Used for folder schemes such as `"p6 - Geek"`, looked up by the
    /// bare code `"p6"`.
    #[must_use]
    pub fn find_by_code_prefix(&self, code: &str) -> Option<&Context> {
        let prefix = format!("{code} - ");
        self.entries
            .iter()
            .find(|entry| entry.name().starts_with(&prefix))
    }
}
