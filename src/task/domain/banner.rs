//! Marker banner embedded in the note field.
//!
//! The banner is a single line at the top of a task's note recording
//! state that the external service has no field for: whether the due date
//! is an explicit override (suppressing pseudo-date assignment on later
//! passes), and which tags are active. A banner for an overridden task
//! tagged `errand` and `home` reads `~~// /errand /home`.

/// Encodes and reconciles the marker banner inside a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteBannerCodec {
    sentinel: String,
    delimiter: char,
    banner_start: String,
    override_marker: String,
}

impl NoteBannerCodec {
    /// Creates a codec for the given sentinel and modifier delimiter.
    #[must_use]
    pub fn new(sentinel: impl Into<String>, delimiter: char) -> Self {
        let sentinel = sentinel.into();
        let banner_start = format!("{sentinel}{delimiter}");
        let override_marker = format!("{sentinel}{delimiter}{delimiter}");
        Self {
            sentinel,
            delimiter,
            banner_start,
            override_marker,
        }
    }

    /// Returns whether the note carries the due-date override marker.
    #[must_use]
    pub fn contains_override(&self, note: &str) -> bool {
        note.contains(&self.override_marker)
    }

    /// Builds the banner the note should carry for the given state.
    ///
    /// Returns the empty string when there is nothing to record, meaning
    /// no banner line should be present at all. The override marker is
    /// appended directly to the sentinel; each tag follows as a delimiter
    /// plus the tag text, markers separated by single spaces.
    #[must_use]
    pub fn required_banner(&self, overriding: bool, tags: &[String]) -> String {
        let mut banner = self.sentinel.clone();
        if overriding {
            banner.push(self.delimiter);
            banner.push(self.delimiter);
        }
        for tag in tags {
            let trimmed = tag.trim();
            if trimmed.is_empty() {
                continue;
            }
            if banner.len() > self.sentinel.len() {
                banner.push(' ');
            }
            banner.push(self.delimiter);
            banner.push_str(trimmed);
        }
        if banner == self.sentinel {
            String::new()
        } else {
            banner
        }
    }

    /// Reconciles the note with the banner it should carry.
    ///
    /// Returns the rebuilt note, or `None` when the note already matches.
    /// A missing banner is prepended as a new first line; a stale banner
    /// is replaced, dropping every line that starts with the banner-start
    /// sequence and keeping the rest.
    #[must_use]
    pub fn reconcile(&self, note: &str, required: &str) -> Option<String> {
        let Some(banner_index) = note.find(&self.banner_start) else {
            if required.is_empty() {
                return None;
            }
            if note.is_empty() {
                return Some(required.to_owned());
            }
            return Some(format!("{required}\n{note}"));
        };

        let lines: Vec<&str> = note.split(['\r', '\n']).collect();
        if banner_index == 0 && lines.first().copied() == Some(required) {
            return None;
        }

        let mut rebuilt = required.to_owned();
        for line in lines {
            if line.trim().starts_with(&self.banner_start) {
                continue;
            }
            if !rebuilt.is_empty() {
                rebuilt.push('\n');
            }
            rebuilt.push_str(line);
        }
        Some(rebuilt)
    }
}
