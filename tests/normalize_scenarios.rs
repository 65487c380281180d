//! Behavioural integration tests for title normalisation.
//!
//! These tests exercise end-to-end scenarios through the public API,
//! verifying that the complete flow from raw title text to normalised
//! task state works correctly against a pinned clock.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mockable::Clock;
use taskmill::task::config::NormalizeConfig;
use taskmill::task::domain::{Context, ContextCatalog, ContextId, Priority, Status, Task, Timestamp};
use taskmill::task::services::Normalizer;

/// Clock pinned to Wednesday, 15 May 2024.
#[derive(Debug, Clone, Copy)]
struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    fn pinned() -> Self {
        Self {
            date: NaiveDate::from_ymd_opt(2024, 5, 15).expect("valid fixture date"),
        }
    }

    fn noon(&self) -> NaiveDateTime {
        self.date.and_hms_opt(12, 0, 0).expect("noon exists")
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        Local
            .from_local_datetime(&self.noon())
            .earliest()
            .expect("fixture datetime resolves in the local timezone")
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.noon())
    }
}

fn noon(year: i32, month: u32, day: u32) -> Timestamp {
    let datetime = Utc
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid noon datetime");
    Timestamp::from_datetime(datetime)
}

fn catalogs() -> (ContextCatalog, ContextCatalog) {
    let contexts = ContextCatalog::new(vec![
        Context::new(ContextId::new(1), "Work"),
        Context::new(ContextId::new(2), "Personal"),
    ])
    .expect("distinct context ids");
    let folders = ContextCatalog::new(vec![
        Context::new(ContextId::new(10), "w Work"),
        Context::new(ContextId::new(11), "p Personal"),
    ])
    .expect("distinct folder ids");
    (contexts, folders)
}

// ============================================================================
// Scenario: A fully decorated title is normalised in one pass
// ============================================================================

/// When a captured title carries due date, start date, priority, star,
/// and tag modifiers, one pass distributes every value to its field.
#[test]
fn decorated_title_is_normalised_in_one_pass() {
    // Arrange
    let clock = FixedClock::pinned();
    let config = NormalizeConfig::default();
    let normalizer = Normalizer::new(&config, &clock);
    let task = Task::new("Buy a newspaper //next tuesday ///next monday /top /star /errand");

    // Act
    let outcome = normalizer.normalize(&task);

    // Assert
    assert!(outcome.changed);
    assert_eq!(outcome.task.title(), "Buy a newspaper");
    assert_eq!(outcome.task.due_date(), noon(2024, 5, 28));
    assert_eq!(outcome.task.start_date(), noon(2024, 5, 27));
    assert_eq!(outcome.task.priority(), Priority::Top);
    assert!(outcome.task.is_starred());
    assert_eq!(outcome.task.tags(), ["errand"]);
    assert_eq!(outcome.task.note(), "~~// /errand");
}

// ============================================================================
// Scenario: Normalisation settles after one pass
// ============================================================================

/// When a normalised task is normalised again on the same day,
/// the second pass reports no change.
#[test]
fn second_pass_reports_no_change() {
    // Arrange
    let clock = FixedClock::pinned();
    let config = NormalizeConfig::default();
    let normalizer = Normalizer::new(&config, &clock);

    // Act
    let first = normalizer.normalize(&Task::new("Do stuff sometime"));
    let second = normalizer.normalize(&first.task);

    // Assert
    assert!(first.changed);
    assert!(!second.changed);
    assert_eq!(second.task, first.task);
}

// ============================================================================
// Scenario: Mid-word delimiters are not modifier syntax
// ============================================================================

/// When a title contains delimiters without a preceding space,
/// the title passes through untouched apart from the pseudo-date.
#[test]
fn mid_word_delimiters_are_not_syntax() {
    // Arrange
    let clock = FixedClock::pinned();
    let config = NormalizeConfig::default();
    let normalizer = Normalizer::new(&config, &clock);
    let title =
        "These should not become tags because no space before the slash: before/during/after";

    // Act
    let outcome = normalizer.normalize(&Task::new(title));

    // Assert
    assert_eq!(outcome.task.title(), title);
    assert!(outcome.task.tags().is_empty());
    assert_eq!(outcome.task.status(), Status::NextAction);
    assert_eq!(outcome.task.due_date(), noon(2024, 8, 1));
}

// ============================================================================
// Scenario: Folder and context couple through the catalogs
// ============================================================================

/// When a task sits in a work folder without a context,
/// the work context is forced and its pseudo-date lands a month later.
#[test]
fn work_folder_forces_work_context_and_offset() {
    // Arrange
    let clock = FixedClock::pinned();
    let config = NormalizeConfig::default();
    let (contexts, folders) = catalogs();
    let normalizer = Normalizer::new(&config, &clock)
        .with_contexts(&contexts)
        .with_folders(&folders);
    let task = Task::new("Prepare slides").with_folder(ContextId::new(10));

    // Act
    let outcome = normalizer.normalize(&task);

    // Assert
    assert_eq!(outcome.task.context(), Some(ContextId::new(1)));
    assert_eq!(outcome.task.folder(), Some(ContextId::new(10)));
    assert_eq!(outcome.task.due_date(), noon(2024, 9, 1));
}

// ============================================================================
// Scenario: Externally entered due dates survive normalisation
// ============================================================================

/// When a classified task arrives with a real due date and no banner,
/// the date is recognised as user-entered and protected from the
/// pseudo-date rule, on this pass and the next.
#[test]
fn external_due_date_is_protected() {
    // Arrange
    let clock = FixedClock::pinned();
    let config = NormalizeConfig::default();
    let normalizer = Normalizer::new(&config, &clock);
    let task = Task::new("Call insurer")
        .with_status(Status::NextAction)
        .with_due_date(noon(2024, 6, 1));

    // Act
    let first = normalizer.normalize(&task);
    let second = normalizer.normalize(&first.task);

    // Assert
    assert_eq!(first.task.due_date(), noon(2024, 6, 1));
    assert_eq!(first.task.note(), "~~//");
    assert!(!second.changed);
}
