use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn monday_start_with_one_body() {
    let bodies = ["会議", "", "", "", "", "", ""];
    let labels = week_labels(date(2024, 1, 1), &bodies);
    assert_eq!(labels[0], "1/1（月）\n会議");
    assert_eq!(labels[1], "1/2（火）");
    assert_eq!(labels[6], "1/7（日）");
}

#[test]
fn blank_bodies_return_auto_labels() {
    let bodies = [""; WEEK_DAYS];
    let labels = week_labels(date(2024, 1, 1), &bodies);
    let expected = [
        "1/1（月）",
        "1/2（火）",
        "1/3（水）",
        "1/4（木）",
        "1/5（金）",
        "1/6（土）",
        "1/7（日）",
    ];
    assert_eq!(labels, expected.map(String::from));
}

#[test]
fn whitespace_body_counts_as_blank_and_bodies_are_trimmed() {
    let bodies = ["   ", "  ジム  ", "\t", "", "", "", ""];
    let labels = week_labels(date(2024, 1, 1), &bodies);
    assert_eq!(labels[0], "1/1（月）");
    assert_eq!(labels[1], "1/2（火）\nジム");
    assert_eq!(labels[2], "1/3（水）");
}

#[test]
fn week_crossing_month_and_year_boundaries() {
    let labels = week_labels(date(2024, 12, 30), &[""; 0]);
    assert_eq!(labels[0], "12/30（月）");
    assert_eq!(labels[1], "12/31（火）");
    assert_eq!(labels[2], "1/1（水）");
    assert_eq!(labels.len(), WEEK_DAYS);
}

#[test]
fn non_monday_start_keeps_slot_weekday_names() {
    let labels = week_labels(date(2024, 1, 3), &[""; WEEK_DAYS]);
    assert_eq!(labels[0], "1/3（月）");
    assert_eq!(labels[5], "1/8（土）");
    assert_eq!(labels[6], "1/9（日）");
}

#[test]
fn auto_label_names_come_from_the_slot() {
    assert_eq!(auto_label(date(2024, 1, 3), 0), "1/3（月）");
    assert_eq!(auto_label(date(2024, 1, 3), 2), "1/3（水）");
    assert_eq!(auto_label(date(2024, 1, 3), 7), "1/3（月）");
}

#[test]
fn leap_day_is_labelled() {
    let labels = week_labels(date(2024, 2, 26), &[""; WEEK_DAYS]);
    assert_eq!(labels[3], "2/29（木）");
    assert_eq!(labels[4], "3/1（金）");
}

#[test]
fn generation_is_idempotent() {
    let bodies = ["a", "b", "", "c", "", "", "d"];
    assert_eq!(
        week_labels(date(2025, 6, 2), &bodies),
        week_labels(date(2025, 6, 2), &bodies)
    );
}

#[test]
fn monday_of_normalizes_any_weekday() {
    assert_eq!(monday_of(date(2024, 1, 1)), date(2024, 1, 1));
    assert_eq!(monday_of(date(2024, 1, 7)), date(2024, 1, 1));
    assert_eq!(monday_of(date(2024, 1, 3)), date(2024, 1, 1));
    assert_eq!(monday_of(date(2024, 3, 2)), date(2024, 2, 26));
}

#[test]
fn split_week_bodies_pads_and_truncates() {
    let split = split_week_bodies("a\nb");
    assert_eq!(split[0], "a");
    assert_eq!(split[1], "b");
    assert!(split[2..].iter().all(String::is_empty));

    let split = split_week_bodies("1\n2\n3\n4\n5\n6\n7\n8");
    assert_eq!(split[6], "7");
}

#[test]
fn today_in_tokyo_is_at_most_one_day_from_utc() {
    let zone = FixedOffset::east_opt(9 * 3600).unwrap();
    let utc_today = Utc::now().date_naive();
    let diff = (today_in(zone) - utc_today).num_days();
    assert!((0..=1).contains(&diff));
}
