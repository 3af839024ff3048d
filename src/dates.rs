//! Date parsing and display helpers.
//!
//! The form accepts the same loose due-date vocabulary everywhere: ISO dates,
//! relative words and weekday names. Display follows the task card format
//! (`Dec 15, 2024`).

use chrono::{Datelike, Duration, NaiveDate};

/// Parse human-readable due date input relative to `today`.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - "monday", "next friday", "this sat"
/// - "in 3d", "in 2w", "in 1m"
/// - "YYYY-MM-DD" format
///
/// Returns `None` for anything else, which the form treats as an empty date.
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return shift(today, 1),
        "yesterday" => return shift(today, -1),
        _ => {}
    }

    // "in X" patterns
    if let Some(rest) = s.strip_prefix("in ") {
        let rest = rest.trim();
        if let Some(n) = rest.strip_suffix('d').and_then(|n| n.trim().parse::<i64>().ok()) {
            return shift(today, n);
        }
        if let Some(n) = rest.strip_suffix('w').and_then(|n| n.trim().parse::<i64>().ok()) {
            return shift(today, n.checked_mul(7)?);
        }
        if let Some(n) = rest.strip_suffix('m').and_then(|n| n.trim().parse::<i64>().ok()) {
            // Approximate: 30 days per month
            return shift(today, n.checked_mul(30)?);
        }
        return None;
    }

    let weekdays = [
        ("monday", 0), ("tuesday", 1), ("wednesday", 2), ("thursday", 3),
        ("friday", 4), ("saturday", 5), ("sunday", 6),
        ("mon", 0), ("tue", 1), ("wed", 2), ("thu", 3),
        ("fri", 4), ("sat", 5), ("sun", 6),
    ];
    let current_day = today.weekday().num_days_from_monday() as i64;

    for (day_name, target_day) in weekdays {
        let days_ahead = (target_day + 7 - current_day) % 7;
        if s == day_name || s == format!("this {day_name}") {
            return shift(today, days_ahead);
        }
        if s == format!("next {day_name}") {
            let days_to_add = if days_ahead == 0 { 7 } else { days_ahead + 7 };
            return shift(today, days_to_add);
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// `today` moved by `days`, or `None` when that leaves the representable range.
fn shift(today: NaiveDate, days: i64) -> Option<NaiveDate> {
    today.checked_add_signed(Duration::try_days(days)?)
}

/// Format a date the way task cards show it, e.g. `Dec 15, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: NaiveDate, today: NaiveDate) -> String {
    let days = (due - today).num_days();
    match days {
        0 => "today".into(),
        1 => "tomorrow".into(),
        d if d > 1 => format!("in {d}d"),
        d => format!("{}d late", -d),
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-12-11 is a Wednesday.
    fn wed() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 11).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_relative_words() {
        assert_eq!(parse_due_input("today", wed()), Some(wed()));
        assert_eq!(parse_due_input(" Tomorrow ", wed()), Some(ymd(2024, 12, 12)));
        assert_eq!(parse_due_input("yesterday", wed()), Some(ymd(2024, 12, 10)));
        assert_eq!(parse_due_input("in 3d", wed()), Some(ymd(2024, 12, 14)));
        assert_eq!(parse_due_input("in 2w", wed()), Some(ymd(2024, 12, 25)));
        assert_eq!(parse_due_input("in 1m", wed()), Some(ymd(2025, 1, 10)));
    }

    #[test]
    fn test_parse_weekdays() {
        assert_eq!(parse_due_input("wednesday", wed()), Some(wed()));
        assert_eq!(parse_due_input("fri", wed()), Some(ymd(2024, 12, 13)));
        assert_eq!(parse_due_input("this monday", wed()), Some(ymd(2024, 12, 16)));
        assert_eq!(parse_due_input("next wed", wed()), Some(ymd(2024, 12, 18)));
        assert_eq!(parse_due_input("next friday", wed()), Some(ymd(2024, 12, 20)));
    }

    #[test]
    fn test_parse_iso_and_garbage() {
        assert_eq!(parse_due_input("2024-12-12", wed()), Some(ymd(2024, 12, 12)));
        assert_eq!(parse_due_input("2024-02-30", wed()), None);
        assert_eq!(parse_due_input("soonish", wed()), None);
        assert_eq!(parse_due_input("in a while", wed()), None);
        assert_eq!(parse_due_input("   ", wed()), None);
    }

    #[test]
    fn test_parse_out_of_range_offsets() {
        for input in ["in 99999999999d", "in 9223372036854775807d", "in 99999999999w", "in 9999999999999999m", "in -99999999999d"] {
            assert_eq!(parse_due_input(input, wed()), None, "{input}");
        }
        assert_eq!(parse_due_input("tomorrow", NaiveDate::MAX), None);
        assert_eq!(parse_due_input("yesterday", NaiveDate::MIN), None);
        assert_eq!(parse_due_input("next fri", NaiveDate::MAX), None);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(ymd(2024, 12, 5)), "Dec 5, 2024");
        assert_eq!(format_date(ymd(2025, 1, 15)), "Jan 15, 2025");
    }

    #[test]
    fn test_format_due_relative() {
        assert_eq!(format_due_relative(wed(), wed()), "today");
        assert_eq!(format_due_relative(ymd(2024, 12, 12), wed()), "tomorrow");
        assert_eq!(format_due_relative(ymd(2024, 12, 15), wed()), "in 4d");
        assert_eq!(format_due_relative(ymd(2024, 12, 9), wed()), "2d late");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer line", 6), "a lon…");
    }
}
