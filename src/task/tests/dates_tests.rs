//! Tests for the date resolver, pinned to Wednesday 15 May 2024.

use super::fixtures::{clock, config, noon, FixedClock};
use crate::task::config::NormalizeConfig;
use crate::task::domain::{Status, Timestamp};
use crate::task::services::DateResolver;
use rstest::rstest;

#[rstest]
fn today_is_the_local_date_at_noon_gmt(config: NormalizeConfig, clock: FixedClock) {
    let resolver = DateResolver::new(&config, &clock);

    assert_eq!(resolver.today(), noon(2024, 5, 15));
    assert_eq!(resolver.today().seconds(), 1_715_774_400);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("fish")]
#[case("next")]
#[case("32/1/24")]
fn unparsable_input_resolves_to_none(config: NormalizeConfig, clock: FixedClock, #[case] raw: &str) {
    let resolver = DateResolver::new(&config, &clock);
    assert_eq!(resolver.parse(raw), None);
}

#[rstest]
#[case("today")]
#[case("tod")]
fn today_keywords_resolve_to_today(config: NormalizeConfig, clock: FixedClock, #[case] raw: &str) {
    let resolver = DateResolver::new(&config, &clock);
    assert_eq!(resolver.parse(raw), Some(noon(2024, 5, 15)));
}

#[rstest]
#[case("tomorrow")]
#[case("tom")]
fn tomorrow_keywords_resolve_to_the_next_day(
    config: NormalizeConfig,
    clock: FixedClock,
    #[case] raw: &str,
) {
    let resolver = DateResolver::new(&config, &clock);
    assert_eq!(resolver.parse(raw), Some(noon(2024, 5, 16)));
}

#[rstest]
#[case("monday", 20)]
#[case("mon", 20)]
#[case("tuesday", 21)]
#[case("tues", 21)]
#[case("tue", 21)]
#[case("wednesday", 15)]
#[case("wed", 15)]
#[case("thursday", 16)]
#[case("thurs", 16)]
#[case("thur", 16)]
#[case("friday", 17)]
#[case("fri", 17)]
#[case("saturday", 18)]
#[case("sat", 18)]
#[case("sunday", 19)]
#[case("sun", 19)]
fn weekdays_resolve_to_the_next_occurrence_on_or_after_today(
    config: NormalizeConfig,
    clock: FixedClock,
    #[case] raw: &str,
    #[case] day: u32,
) {
    let resolver = DateResolver::new(&config, &clock);
    assert_eq!(resolver.parse(raw), Some(noon(2024, 5, day)));
}

#[rstest]
fn next_pushes_a_weekday_one_further_week_out(config: NormalizeConfig, clock: FixedClock) {
    let resolver = DateResolver::new(&config, &clock);

    let monday = resolver.parse("monday").expect("upcoming monday");
    let next_monday = resolver.parse("next monday").expect("next monday");

    assert_eq!(monday, noon(2024, 5, 20));
    assert_eq!(next_monday, noon(2024, 5, 27));
    assert_eq!(resolver.parse("next wednesday"), Some(noon(2024, 5, 22)));
    // The keyword binds without a space as well.
    assert_eq!(resolver.parse("nextmonday"), Some(noon(2024, 5, 27)));
}

#[rstest]
#[case("24/5/11", 2011, 5, 24)]
#[case("24/5/2011", 2011, 5, 24)]
#[case("24/05/2011", 2011, 5, 24)]
#[case("1/10/11", 2011, 10, 1)]
#[case("2/10/11", 2011, 10, 2)]
#[case("1/1/12", 2012, 1, 1)]
fn short_dates_parse_day_month_year_at_noon_gmt(
    config: NormalizeConfig,
    clock: FixedClock,
    #[case] raw: &str,
    #[case] year: i32,
    #[case] month: u32,
    #[case] day: u32,
) {
    let resolver = DateResolver::new(&config, &clock);
    assert_eq!(resolver.parse(raw), Some(noon(year, month, day)));
}

#[rstest]
#[case(Status::NextAction, 1)]
#[case(Status::Active, 7)]
#[case(Status::Planning, 14)]
#[case(Status::Waiting, 21)]
#[case(Status::Someday, 28)]
fn pseudo_dates_without_special_context_land_three_months_out(
    config: NormalizeConfig,
    clock: FixedClock,
    #[case] status: Status,
    #[case] day: u32,
) {
    let resolver = DateResolver::new(&config, &clock);
    assert_eq!(resolver.pseudo_date(None, status), noon(2024, 8, day));
}

#[rstest]
fn work_and_notes_contexts_push_pseudo_dates_further_out(
    config: NormalizeConfig,
    clock: FixedClock,
) {
    let resolver = DateResolver::new(&config, &clock);

    assert_eq!(
        resolver.pseudo_date(Some("Work"), Status::NextAction),
        noon(2024, 9, 1)
    );
    assert_eq!(
        resolver.pseudo_date(Some("x Notes"), Status::Reference),
        noon(2024, 10, 28)
    );
    // Any other context uses the default offset.
    assert_eq!(
        resolver.pseudo_date(Some("Errands"), Status::NextAction),
        noon(2024, 8, 1)
    );
}

#[rstest]
fn pseudo_date_day_clamps_to_the_month_length() {
    let clock = FixedClock::new(2024, 11, 15);
    let mut config = NormalizeConfig::default();
    config.schedule.status_days = config
        .schedule
        .status_days
        .clone()
        .with_day(Status::Waiting, 30);
    let resolver = DateResolver::new(&config, &clock);

    // November plus three months is February, which has no day 30.
    assert_eq!(
        resolver.pseudo_date(None, Status::Waiting),
        noon(2025, 2, 28)
    );
}

#[rstest]
fn lowest_pseudo_date_bounds_actual_dates(config: NormalizeConfig, clock: FixedClock) {
    let resolver = DateResolver::new(&config, &clock);

    assert_eq!(resolver.lowest_pseudo_date(), noon(2024, 8, 1));
    assert!(resolver.is_actual_date(resolver.today()));
    assert!(resolver.is_actual_date(noon(2024, 7, 31)));
    assert!(!resolver.is_actual_date(Timestamp::BLANK));
    assert!(!resolver.is_actual_date(noon(2024, 8, 1)));
    assert!(!resolver.is_actual_date(noon(2024, 9, 1)));
}

#[rstest]
fn archive_threshold_is_three_hundred_days_exclusive(config: NormalizeConfig, clock: FixedClock) {
    let resolver = DateResolver::new(&config, &clock);
    let threshold = noon(2025, 3, 11); // today plus exactly 300 days

    assert!(!resolver.is_archived(resolver.today()));
    assert!(!resolver.is_archived(threshold));
    assert!(resolver.is_archived(Timestamp::from_seconds(threshold.seconds() + 1)));
    assert!(resolver.is_archived(resolver.today().archive()));
}

#[rstest]
fn recently_archived_dates_are_recognised(config: NormalizeConfig, clock: FixedClock) {
    let resolver = DateResolver::new(&config, &clock);

    // Today, archived: unarchiving lands on today.
    assert!(resolver.is_today_or_recent_but_archived(resolver.today().archive()));
    // A month ago, archived: still recent.
    assert!(resolver.is_today_or_recent_but_archived(noon(2024, 4, 15).archive()));
    // Six months ago, archived: no longer beyond the threshold.
    assert!(!resolver.is_today_or_recent_but_archived(noon(2023, 11, 15).archive()));
    // A plain future date is not archived at all.
    assert!(!resolver.is_today_or_recent_but_archived(noon(2024, 6, 1)));
}
