//! Date resolution: keyword and short-format parsing, pseudo-dates, and
//! archive classification.
//!
//! Every computation starts from the clock's local calendar date but is
//! expressed as seconds at exactly 12:00:00 GMT, the only form the
//! external service accepts for dates.

use crate::task::config::NormalizeConfig;
use crate::task::domain::{Status, Timestamp};
use chrono::{Datelike, Days, Months, NaiveDate, NaiveTime, Weekday};
use mockable::Clock;

/// Keyword prefix that pushes a resolved weekday one further week out.
const ADD_WEEK_KEYWORD: &str = "next";

/// Short calendar formats accepted for non-keyword input, tried in order.
/// Two-digit years resolve to the 2000s first so `24/5/11` means 2011.
const SHORT_DATE_FORMATS: [&str; 2] = ["%d/%m/%y", "%d/%m/%Y"];

/// Resolves date strings and computes pseudo-dates against a clock.
///
/// # Examples
///
/// ```
/// use mockable::DefaultClock;
/// use taskmill::task::config::NormalizeConfig;
/// use taskmill::task::services::DateResolver;
///
/// let config = NormalizeConfig::default();
/// let clock = DefaultClock;
/// let resolver = DateResolver::new(&config, &clock);
///
/// assert!(resolver.parse("tomorrow").is_some());
/// assert!(resolver.parse("fish").is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DateResolver<'a, C>
where
    C: Clock,
{
    config: &'a NormalizeConfig,
    clock: &'a C,
}

impl<'a, C> DateResolver<'a, C>
where
    C: Clock,
{
    /// Creates a resolver over the given configuration and clock.
    #[must_use]
    pub const fn new(config: &'a NormalizeConfig, clock: &'a C) -> Self {
        Self { config, clock }
    }

    /// Returns today as a noon-GMT timestamp.
    ///
    /// "Today" is the clock's local calendar date; the time component is
    /// pinned to 12:00:00 GMT with zero seconds, which the external
    /// service requires for date values.
    #[must_use]
    pub fn today(&self) -> Timestamp {
        noon_utc(self.today_date())
    }

    /// Parses a keyword, relative, or short-format date string.
    ///
    /// Recognised keywords are `today`/`tod`, `tomorrow`/`tom`, and the
    /// weekday names with their short aliases; a leading `next` pushes a
    /// resolved weekday one further week out. Anything else is tried as a
    /// short calendar date. Blank or unparsable input yields `None`
    /// rather than an error.
    #[must_use]
    pub fn parse(&self, raw: &str) -> Option<Timestamp> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let (body, add_week) = trimmed
            .strip_prefix(ADD_WEEK_KEYWORD)
            .map_or((trimmed, false), |rest| (rest.trim(), true));

        match body {
            "today" | "tod" => Some(self.today()),
            "tomorrow" | "tom" => self
                .today_date()
                .checked_add_days(Days::new(1))
                .map(noon_utc),
            "monday" | "mon" => self.upcoming_weekday(Weekday::Mon, add_week),
            "tuesday" | "tues" | "tue" => self.upcoming_weekday(Weekday::Tue, add_week),
            "wednesday" | "wed" => self.upcoming_weekday(Weekday::Wed, add_week),
            "thursday" | "thurs" | "thur" => self.upcoming_weekday(Weekday::Thu, add_week),
            "friday" | "fri" => self.upcoming_weekday(Weekday::Fri, add_week),
            "saturday" | "sat" => self.upcoming_weekday(Weekday::Sat, add_week),
            "sunday" | "sun" => self.upcoming_weekday(Weekday::Sun, add_week),
            other => parse_short_date(other),
        }
    }

    /// Computes the pseudo-date for the given context name and status.
    ///
    /// The month offset is the default unless the context is the
    /// configured work or notes context; the day of month comes from the
    /// per-status table. Month addition and day assignment clamp to the
    /// target month's length.
    #[must_use]
    pub fn pseudo_date(&self, context_name: Option<&str>, status: Status) -> Timestamp {
        let schedule = &self.config.schedule;
        let month_offset = match context_name {
            Some(name) if name == self.config.work_context_name => schedule.work_month_offset,
            Some(name) if name == self.config.notes_context_name => schedule.notes_month_offset,
            _ => schedule.default_month_offset,
        };
        let day = schedule.status_days.day_of_month(status);

        let today = self.today_date();
        let shifted = today
            .checked_add_months(Months::new(month_offset))
            .unwrap_or(today);
        noon_utc(clamp_to_day(shifted, day))
    }

    /// Returns the lowest pseudo-date value for the current date.
    ///
    /// Every pseudo-date is at or beyond this point, so it doubles as the
    /// boundary between actual dates and placeholders.
    #[must_use]
    pub fn lowest_pseudo_date(&self) -> Timestamp {
        self.pseudo_date(None, Status::NextAction)
    }

    /// Returns whether `timestamp` is an actual date: not blank and below
    /// the pseudo-date range.
    #[must_use]
    pub fn is_actual_date(&self, timestamp: Timestamp) -> bool {
        let seconds = timestamp.seconds();
        seconds > 0 && seconds < self.lowest_pseudo_date().seconds()
    }

    /// Returns whether `timestamp` has been archived.
    ///
    /// Archiving shifts dates a year ahead, so anything strictly beyond
    /// today plus the archive threshold counts as archived. The threshold
    /// leaves room for archived dates from runs a couple of months ago.
    #[must_use]
    pub fn is_archived(&self, timestamp: Timestamp) -> bool {
        let threshold_days = u64::try_from(self.config.schedule.archive_threshold_days).unwrap_or(0);
        let Some(threshold) = self.today_date().checked_add_days(Days::new(threshold_days)) else {
            return false;
        };
        timestamp.seconds() > noon_utc(threshold).seconds()
    }

    /// Returns whether `timestamp` is an archived date that, unarchived,
    /// lands on or before today.
    #[must_use]
    pub fn is_today_or_recent_but_archived(&self, timestamp: Timestamp) -> bool {
        self.is_archived(timestamp) && timestamp.unarchive() <= self.today()
    }

    fn today_date(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    /// Resolves the next date on or after today with the given weekday.
    /// The same weekday resolves to today itself.
    fn upcoming_weekday(&self, target: Weekday, add_week: bool) -> Option<Timestamp> {
        let today = self.today_date();
        let days_ahead = (i64::from(target.num_days_from_sunday())
            - i64::from(today.weekday().num_days_from_sunday()))
        .rem_euclid(7);
        let extra = if add_week { 7 } else { 0 };
        let total = u64::try_from(days_ahead).ok()?.checked_add(extra)?;
        today.checked_add_days(Days::new(total)).map(noon_utc)
    }
}

/// Expresses a calendar date as seconds at 12:00:00 GMT.
fn noon_utc(date: NaiveDate) -> Timestamp {
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
    Timestamp::from_datetime(date.and_time(noon).and_utc())
}

fn parse_short_date(source: &str) -> Option<Timestamp> {
    SHORT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(source, format).ok())
        .map(noon_utc)
}

/// Sets the day of month, clamping to the month's final day when the
/// requested day does not exist.
fn clamp_to_day(date: NaiveDate, day: u32) -> NaiveDate {
    let mut candidate = day.min(31);
    while candidate > 1 {
        if let Some(resolved) = date.with_day(candidate) {
            return resolved;
        }
        candidate -= 1;
    }
    date.with_day(1).unwrap_or(date)
}
