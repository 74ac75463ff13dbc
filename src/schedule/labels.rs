use chrono::{Datelike, Days, FixedOffset, NaiveDate, Utc};

/// Number of day slots in a weekly schedule.
pub const WEEK_DAYS: usize = 7;

/// Japanese weekday names, Monday first.
pub const WEEKDAY_NAMES_JA: [&str; WEEK_DAYS] = ["月", "火", "水", "木", "金", "土", "日"];

/// Monday of the week containing `day`.
pub fn monday_of(day: NaiveDate) -> NaiveDate {
    let back = u64::from(day.weekday().num_days_from_monday());
    day.checked_sub_days(Days::new(back)).unwrap_or(day)
}

/// Calendar date "today" in the given fixed-offset zone.
pub fn today_in(zone: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&zone).date_naive()
}

/// `"{month}/{day}（{weekday}）"` for day slot `slot` of a week dated from `date`.
///
/// The weekday name is `WEEKDAY_NAMES_JA[slot]`, independent of the calendar weekday of `date`.
/// Slots past the table wrap around.
pub fn auto_label(date: NaiveDate, slot: usize) -> String {
    let name = WEEKDAY_NAMES_JA[slot % WEEK_DAYS];
    format!("{}/{}（{}）", date.month(), date.day(), name)
}

/// Seven labels starting at `week_start`, each merged with its body text.
///
/// A blank (empty or whitespace-only) body leaves the auto label alone; otherwise the trimmed
/// body follows on a new line. Missing bodies count as blank and extra bodies are ignored.
/// `week_start` is used as given, Monday or not; weekday names follow the slot (slot 0 is
/// always `月`), so a non-Monday start keeps the Monday-first names.
pub fn week_labels<S: AsRef<str>>(week_start: NaiveDate, bodies: &[S]) -> [String; WEEK_DAYS] {
    std::array::from_fn(|i| {
        let date = week_start
            .checked_add_days(Days::new(i as u64))
            .unwrap_or(week_start);
        let auto = auto_label(date, i);
        let body = bodies.get(i).map(|b| b.as_ref().trim()).unwrap_or("");
        if body.is_empty() {
            auto
        } else {
            format!("{auto}\n{body}")
        }
    })
}

/// Split a multi-line body block into exactly seven lines, padding with blanks.
pub fn split_week_bodies(block: &str) -> [String; WEEK_DAYS] {
    let mut lines = block.lines();
    std::array::from_fn(|_| lines.next().unwrap_or("").to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/labels.rs"]
mod tests;
