//! Shared fixtures and helpers for task normalisation tests.

use crate::task::config::NormalizeConfig;
use crate::task::domain::{Context, ContextCatalog, ContextId, Timestamp};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

/// Clock pinned to a fixed calendar date, for deterministic date
/// arithmetic.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            date: NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date"),
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

/// Wednesday, 15 May 2024.
#[fixture]
pub fn clock() -> FixedClock {
    FixedClock::new(2024, 5, 15)
}

#[fixture]
pub fn config() -> NormalizeConfig {
    NormalizeConfig::default()
}

/// The user's contexts: Work, Personal, Errands, and the notes context.
#[fixture]
pub fn contexts() -> ContextCatalog {
    ContextCatalog::new(vec![
        Context::new(ContextId::new(1), "Work"),
        Context::new(ContextId::new(2), "Personal"),
        Context::new(ContextId::new(3), "Errands"),
        Context::new(ContextId::new(4), "x Notes"),
    ])
    .expect("distinct context ids")
}

/// The user's folders, with sort prefixes on the non-default ones.
#[fixture]
pub fn folders() -> ContextCatalog {
    ContextCatalog::new(vec![
        Context::new(ContextId::new(10), "w Work"),
        Context::new(ContextId::new(11), "p Personal"),
        Context::new(ContextId::new(12), "p6 - Geek"),
        Context::new(ContextId::new(13), "p3 Chores"),
    ])
    .expect("distinct folder ids")
}

/// A calendar date at exactly 12:00:00 GMT.
pub fn noon(year: i32, month: u32, day: u32) -> Timestamp {
    let datetime = Utc
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid noon datetime");
    Timestamp::from_datetime(datetime)
}
