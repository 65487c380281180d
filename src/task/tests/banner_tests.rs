//! Tests for the note banner codec.

use crate::task::domain::NoteBannerCodec;
use rstest::{fixture, rstest};

#[fixture]
fn codec() -> NoteBannerCodec {
    NoteBannerCodec::new("~~", '/')
}

fn tags(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| (*label).to_owned()).collect()
}

#[rstest]
fn no_state_means_no_banner(codec: NoteBannerCodec) {
    assert_eq!(codec.required_banner(false, &[]), "");
}

#[rstest]
fn override_marker_follows_the_sentinel_directly(codec: NoteBannerCodec) {
    assert_eq!(codec.required_banner(true, &[]), "~~//");
}

#[rstest]
fn tags_are_delimited_and_space_separated(codec: NoteBannerCodec) {
    assert_eq!(
        codec.required_banner(false, &tags(&["errand", "home"])),
        "~~/errand /home"
    );
}

#[rstest]
fn override_and_tags_combine(codec: NoteBannerCodec) {
    assert_eq!(
        codec.required_banner(true, &tags(&["errand"])),
        "~~// /errand"
    );
}

#[rstest]
fn blank_tags_are_skipped(codec: NoteBannerCodec) {
    assert_eq!(codec.required_banner(false, &tags(&["", "  ", "home"])), "~~/home");
    assert_eq!(codec.required_banner(false, &tags(&["", "  "])), "");
}

#[rstest]
fn override_marker_detection(codec: NoteBannerCodec) {
    assert!(codec.contains_override("~~// some note"));
    assert!(codec.contains_override("first line\n~~//"));
    assert!(!codec.contains_override("~~/tag only"));
    assert!(!codec.contains_override(""));
}

#[rstest]
fn absent_banner_and_empty_requirement_leave_the_note_alone(codec: NoteBannerCodec) {
    assert_eq!(codec.reconcile("call the plumber", ""), None);
    assert_eq!(codec.reconcile("", ""), None);
}

#[rstest]
fn required_banner_is_prepended_to_a_bannerless_note(codec: NoteBannerCodec) {
    assert_eq!(codec.reconcile("", "~~//"), Some("~~//".to_owned()));
    assert_eq!(
        codec.reconcile("call the plumber", "~~//"),
        Some("~~//\ncall the plumber".to_owned())
    );
}

#[rstest]
fn current_banner_on_the_first_line_needs_no_change(codec: NoteBannerCodec) {
    assert_eq!(codec.reconcile("~~// /errand", "~~// /errand"), None);
    assert_eq!(
        codec.reconcile("~~// /errand\ncall the plumber", "~~// /errand"),
        None
    );
}

#[rstest]
fn stale_banner_is_replaced_and_other_lines_kept(codec: NoteBannerCodec) {
    assert_eq!(
        codec.reconcile("~~/old\nkeep me", "~~//"),
        Some("~~//\nkeep me".to_owned())
    );
}

#[rstest]
fn banner_buried_in_the_note_is_lifted_to_the_top(codec: NoteBannerCodec) {
    assert_eq!(
        codec.reconcile("intro\n~~/old\nkeep", "~~//"),
        Some("~~//\nintro\nkeep".to_owned())
    );
}

#[rstest]
fn empty_requirement_drops_an_existing_banner(codec: NoteBannerCodec) {
    assert_eq!(codec.reconcile("~~/old\nkeep me", ""), Some("keep me".to_owned()));
    assert_eq!(codec.reconcile("~~//", ""), Some(String::new()));
}
