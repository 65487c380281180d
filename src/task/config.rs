//! Externally supplied constants for task normalisation.
//!
//! The rule engine and date resolver are parameterised by these values
//! rather than hard-coding them: the inline-syntax delimiter, the literal
//! modifier keywords, the context names that carry special pseudo-date
//! offsets, and the per-status pseudo-date day table. Defaults reproduce
//! the vocabulary the surrounding system has always used.

use super::domain::Status;

/// Per-status pseudo-date day-of-month table.
///
/// Each status maps to the day of month its pseudo due date lands on. The
/// default table keeps statuses that sort together on the same day.
///
/// # Examples
///
/// ```
/// use taskmill::task::config::StatusDayTable;
/// use taskmill::task::domain::Status;
///
/// let table = StatusDayTable::default();
/// assert_eq!(table.day_of_month(Status::Waiting), 21);
///
/// let shifted = table.with_day(Status::Waiting, 25);
/// assert_eq!(shifted.day_of_month(Status::Waiting), 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDayTable {
    days: [u32; Status::COUNT],
}

impl Default for StatusDayTable {
    fn default() -> Self {
        let mut days = [1; Status::COUNT];
        for status in Status::ALL {
            if let Some(day) = days.get_mut(status.index()) {
                *day = status.default_pseudo_day();
            }
        }
        Self { days }
    }
}

impl StatusDayTable {
    /// Returns the pseudo-date day of month for the given status.
    #[must_use]
    pub fn day_of_month(&self, status: Status) -> u32 {
        self.days.get(status.index()).copied().unwrap_or(1)
    }

    /// Returns a copy of the table with one status mapped to another day.
    #[must_use]
    pub fn with_day(mut self, status: Status, day: u32) -> Self {
        if let Some(slot) = self.days.get_mut(status.index()) {
            *slot = day;
        }
        self
    }
}

/// Date-arithmetic constants consumed by the date resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Months ahead of today for a pseudo-date with no special context.
    pub default_month_offset: u32,
    /// Months ahead of today for tasks in the work context.
    pub work_month_offset: u32,
    /// Months ahead of today for tasks in the notes context.
    pub notes_month_offset: u32,
    /// Days beyond today past which a due date counts as archived.
    pub archive_threshold_days: i64,
    /// Per-status pseudo-date day-of-month table.
    pub status_days: StatusDayTable,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            default_month_offset: 3,
            work_month_offset: 4,
            notes_month_offset: 5,
            archive_threshold_days: 300,
            status_days: StatusDayTable::default(),
        }
    }
}

/// Configuration for the title-normalisation rule engine.
///
/// # Examples
///
/// ```
/// use taskmill::task::config::NormalizeConfig;
///
/// let config = NormalizeConfig::default();
/// assert_eq!(config.delimiter, '/');
/// assert_eq!(config.max_note_length, 600);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// Character marking the start of each inline modifier in a title.
    pub delimiter: char,
    /// Title prefix added by external calendar reminder emails.
    pub reminder_prefix: String,
    /// Modifier that stars a task.
    pub star_modifier: String,
    /// Modifier that un-stars a task.
    pub no_star_modifier: String,
    /// Modifier that clears the task context.
    pub no_context_modifier: String,
    /// Modifier that clears the task folder.
    pub no_folder_modifier: String,
    /// Modifier that clears all task tags.
    pub no_tag_modifier: String,
    /// Modifier that clears the explicit due date override.
    pub no_due_date_modifier: String,
    /// Short title prefix marking a waiting task.
    pub waiting_prefix_short: String,
    /// Long title prefix marking a waiting task.
    pub waiting_prefix_long: String,
    /// Title prefix marking a reference entry.
    pub reference_prefix: String,
    /// Tag that forces a task to be treated as a project.
    pub project_tag: String,
    /// Note markers the external system stores in empty projects and
    /// checklists.
    pub project_note_markers: Vec<String>,
    /// Name of the context with the work pseudo-date offset.
    pub work_context_name: String,
    /// Name of the context coupled to personal folders.
    pub personal_context_name: String,
    /// Name of the context with the notes pseudo-date offset.
    pub notes_context_name: String,
    /// Folder assigned to work tasks that have none.
    pub default_work_folder_name: String,
    /// Folder assigned to personal tasks that have none.
    pub default_personal_folder_name: String,
    /// Sentinel opening the marker banner in the note field.
    pub banner_sentinel: String,
    /// Hard cap on note length, in characters.
    pub max_note_length: usize,
    /// Status assigned when a task has none.
    pub default_status: Status,
    /// Status that parks a task in the future and suspends title-derived
    /// status overrides.
    pub future_status: Status,
    /// Date-arithmetic constants.
    pub schedule: ScheduleConfig,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            delimiter: '/',
            reminder_prefix: "Reminder: ".to_owned(),
            star_modifier: "star".to_owned(),
            no_star_modifier: "nostar".to_owned(),
            no_context_modifier: "nocontext".to_owned(),
            no_folder_modifier: "nofolder".to_owned(),
            no_tag_modifier: "notag".to_owned(),
            no_due_date_modifier: "nod".to_owned(),
            waiting_prefix_short: "wf ".to_owned(),
            waiting_prefix_long: "Waiting for".to_owned(),
            reference_prefix: ".".to_owned(),
            project_tag: "_project".to_owned(),
            project_note_markers: vec![
                "---- Task Type: Project ----".to_owned(),
                "---- Task Type: Checklist ----".to_owned(),
            ],
            work_context_name: "Work".to_owned(),
            personal_context_name: "Personal".to_owned(),
            notes_context_name: "x Notes".to_owned(),
            default_work_folder_name: "w Work".to_owned(),
            default_personal_folder_name: "p Personal".to_owned(),
            banner_sentinel: "~~".to_owned(),
            max_note_length: 600,
            default_status: Status::DEFAULT,
            future_status: Status::FUTURE,
            schedule: ScheduleConfig::default(),
        }
    }
}
