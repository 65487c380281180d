//! Title tokenizer for the inline modifier syntax.
//!
//! A title such as `Buy a newspaper //next tuesday ///next monday /top`
//! splits into a description and a modifier region. The modifier region
//! begins at the first delimiter character immediately preceded by a
//! space; a delimiter embedded mid-word (as in `before/during/after`)
//! never starts one. Within the region, runs of delimiter characters mark
//! the field a value belongs to: four for the repeat rule, three for the
//! start date, two for the due date, one for a generic modifier.

/// Number of consecutive delimiters introducing a due date.
const DUE_DATE_DELIMITER_COUNT: usize = 2;

/// Number of consecutive delimiters introducing a start date.
const START_DATE_DELIMITER_COUNT: usize = 3;

/// Number of consecutive delimiters introducing a repeat rule.
const REPEAT_DELIMITER_COUNT: usize = 4;

/// The tokens resulting from parsing one task title.
///
/// Captured values distinguish "absent" (`None`, the delimiter sequence
/// never appeared) from "present but blank" (`Some("")`, the user wrote
/// only the delimiters to signal an override with no value).
///
/// # Examples
///
/// ```
/// use taskmill::task::domain::TitleTokens;
///
/// let tokens = TitleTokens::parse("Do this every week //sun ///sat ////weekly", '/', |_| false);
/// assert_eq!(tokens.description(), "Do this every week");
/// assert_eq!(tokens.due_date(), Some("sun"));
/// assert_eq!(tokens.start_date(), Some("sat"));
/// assert_eq!(tokens.repeat(), Some("weekly"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleTokens {
    description: String,
    due_date: Option<String>,
    start_date: Option<String>,
    repeat: Option<String>,
    modifiers: Vec<String>,
}

impl TitleTokens {
    /// Parses a task title into tokens.
    ///
    /// `is_date` reports whether a modifier string parses as a date; it
    /// drives the single-delimiter due-date fallback, where the first
    /// date-like modifier is promoted to the due-date token when no
    /// two-delimiter due date was written. The fallback is resolved by
    /// scan order when several modifiers would parse as dates.
    pub fn parse(title: &str, delimiter: char, is_date: impl Fn(&str) -> bool) -> Self {
        let region_marker = format!(" {delimiter}");
        let Some(marker_index) = title.find(&region_marker) else {
            return Self {
                description: title.trim().to_owned(),
                due_date: None,
                start_date: None,
                repeat: None,
                modifiers: Vec::new(),
            };
        };

        // Split just past the space so the region starts at the delimiter.
        let (head, tail) = title.split_at(marker_index + 1);
        let description = head.trim().to_owned();
        let region = tail.trim().to_owned();

        // Longest delimiter runs are extracted first: each shorter run is
        // a textual prefix of the longer ones, so pulling the repeat rule
        // out before the start date, and the start date before the due
        // date, keeps them from being misread.
        let (without_repeat, repeat) = find_and_remove(&region, REPEAT_DELIMITER_COUNT, delimiter);
        let (without_start, start_date) =
            find_and_remove(&without_repeat, START_DATE_DELIMITER_COUNT, delimiter);
        let (leftover, mut due_date) =
            find_and_remove(&without_start, DUE_DATE_DELIMITER_COUNT, delimiter);

        let mut modifiers: Vec<String> = leftover
            .split(delimiter)
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(ToOwned::to_owned)
            .collect();

        // A single mistyped delimiter before a date is still meant as a
        // due date: promote the first modifier that parses as one.
        if due_date.is_none()
            && let Some(position) = modifiers.iter().position(|modifier| is_date(modifier))
        {
            due_date = Some(modifiers.remove(position));
        }

        Self {
            description,
            due_date,
            start_date,
            repeat,
            modifiers,
        }
    }

    /// Returns the part of the title before the modifier region, trimmed.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the due-date token, if the due-date delimiters were found.
    #[must_use]
    pub fn due_date(&self) -> Option<&str> {
        self.due_date.as_deref()
    }

    /// Returns the start-date token, if the start-date delimiters were
    /// found.
    #[must_use]
    pub fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    /// Returns the repeat token, if the repeat delimiters were found.
    #[must_use]
    pub fn repeat(&self) -> Option<&str> {
        self.repeat.as_deref()
    }

    /// Returns the modifiers not yet consumed, in title order.
    #[must_use]
    pub fn modifiers(&self) -> &[String] {
        &self.modifiers
    }

    /// Removes the first modifier equal to `literal`, returning whether
    /// one was found.
    pub fn remove_modifier(&mut self, literal: &str) -> bool {
        let position = self
            .modifiers
            .iter()
            .position(|modifier| modifier.as_str() == literal);
        match position {
            Some(index) => {
                self.modifiers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes the first modifier for which `matcher` returns a value,
    /// and returns that value.
    ///
    /// Scanning is left to right and stops at the first match, so a rule
    /// category consumes at most one modifier and later categories never
    /// see it.
    pub fn remove_first_match<T>(&mut self, matcher: impl Fn(&str) -> Option<T>) -> Option<T> {
        for position in 0..self.modifiers.len() {
            let matched = self.modifiers.get(position).and_then(|m| matcher(m));
            if let Some(value) = matched {
                self.modifiers.remove(position);
                return Some(value);
            }
        }
        None
    }

    /// Removes and returns all remaining modifiers.
    pub fn drain_modifiers(&mut self) -> Vec<String> {
        std::mem::take(&mut self.modifiers)
    }
}

/// Extracts the value introduced by a run of `count` delimiters.
///
/// Returns the source with the run and its value excised, and the value
/// itself (`None` when the run does not occur, `Some("")` when it occurs
/// with nothing after it). The fragments around the excision are rejoined
/// with a single space so later splitting still sees a word boundary.
fn find_and_remove(source: &str, count: usize, delimiter: char) -> (String, Option<String>) {
    let sequence = delimiter.to_string().repeat(count);
    let Some(start) = source.find(&sequence) else {
        return (source.to_owned(), None);
    };

    let (before, rest) = source.split_at(start);
    let after = rest.get(sequence.len()..).unwrap_or("");
    match after.find(delimiter) {
        None => (before.trim().to_owned(), Some(after.trim().to_owned())),
        Some(next_delimiter) => {
            let (value, remainder) = after.split_at(next_delimiter);
            let rejoined = format!("{} {remainder}", before.trim());
            (rejoined, Some(value.trim().to_owned()))
        }
    }
}
