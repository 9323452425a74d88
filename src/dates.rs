//! Due date parsing and display helpers.

use chrono::{Datelike, Duration, NaiveDate};

/// Parse human-readable due date input relative to `today`.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - "monday", "next monday", "this friday", "fri"
/// - "end of week" / "eow", "end of month" / "eom", "weekend"
/// - "in 3d", "in 2w", "in 1m"
/// - "YYYY-MM-DD"
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "yesterday" => return Some(today - Duration::days(1)),
        "end of week" | "eow" => {
            let (_, end) = start_end_of_week(today);
            return Some(end);
        }
        "end of month" | "eom" => {
            let (year, month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            let first_of_next = NaiveDate::from_ymd_opt(year, month, 1)?;
            return Some(first_of_next - Duration::days(1));
        }
        "this weekend" | "weekend" => {
            let days_until_saturday = (5 + 7 - today.weekday().num_days_from_monday()) % 7;
            return Some(today + Duration::days(days_until_saturday as i64));
        }
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        let rest = rest.trim();
        let split = rest.char_indices().last().map(|(i, _)| i).unwrap_or(0);
        let (amount, unit) = rest.split_at(split);
        if let Ok(n) = amount.trim().parse::<i64>() {
            // Out-of-range amounts are rejected rather than clamped.
            let offset = match unit {
                "d" => Duration::try_days(n),
                "w" => Duration::try_weeks(n),
                // Approximate: 30 days per month
                "m" => n.checked_mul(30).and_then(Duration::try_days),
                _ => None,
            };
            return offset.and_then(|o| today.checked_add_signed(o));
        }
    }

    let weekdays = [
        ("monday", 0), ("tuesday", 1), ("wednesday", 2), ("thursday", 3),
        ("friday", 4), ("saturday", 5), ("sunday", 6),
        ("mon", 0), ("tue", 1), ("wed", 2), ("thu", 3),
        ("fri", 4), ("sat", 5), ("sun", 6),
    ];
    let current = today.weekday().num_days_from_monday() as i64;
    for (name, target) in weekdays {
        let days_ahead = (target + 7 - current) % 7;
        if s == name || s == format!("this {name}") {
            return Some(today + Duration::days(days_ahead));
        }
        if s == format!("next {name}") {
            let days = if days_ahead == 0 { 7 } else { days_ahead + 7 };
            return Some(today + Duration::days(days));
        }
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

/// Monday and Sunday of the ISO week containing `today`.
pub fn start_end_of_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let weekday = today.weekday().num_days_from_monday() as i64;
    let start = today - Duration::days(weekday);
    (start, start + Duration::days(6))
}

/// Format a due date relative to today ("today", "tomorrow", "in 3d", "2d late").
pub fn format_due_relative(due: Option<NaiveDate>, today: NaiveDate) -> String {
    match due {
        None => "-".into(),
        Some(d) => {
            let days = (d - today).num_days();
            match days {
                0 => "today".into(),
                1 => "tomorrow".into(),
                n if n > 1 => format!("in {n}d"),
                n => format!("{}d late", -n),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A Wednesday.
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_parse_due_input() {
        assert_eq!(parse_due_input("2024-04-01", today()), ymd(2024, 4, 1));
        assert_eq!(parse_due_input("Tomorrow", today()), ymd(2024, 3, 14));
        assert_eq!(parse_due_input("in 3d", today()), ymd(2024, 3, 16));
        assert_eq!(parse_due_input("in 2w", today()), ymd(2024, 3, 27));
        assert_eq!(parse_due_input("friday", today()), ymd(2024, 3, 15));
        assert_eq!(parse_due_input("next wed", today()), ymd(2024, 3, 20));
        assert_eq!(parse_due_input("monday", today()), ymd(2024, 3, 18));
        assert_eq!(parse_due_input("eom", today()), ymd(2024, 3, 31));
        assert_eq!(parse_due_input("eow", today()), ymd(2024, 3, 17));
        assert_eq!(parse_due_input("weekend", today()), ymd(2024, 3, 16));
        assert_eq!(parse_due_input("someday", today()), None);
        assert_eq!(parse_due_input("2024-02-30", today()), None);
    }

    #[test]
    fn test_huge_offsets_do_not_parse() {
        assert_eq!(parse_due_input("in 999999999999d", today()), None);
        assert_eq!(parse_due_input("in 999999999999999w", today()), None);
        assert_eq!(parse_due_input("in 9223372036854775807m", today()), None);
        // In range for the offset but past the last representable date.
        assert_eq!(parse_due_input("in 100000000d", today()), None);
        assert_eq!(parse_due_input("in 2m", today()), ymd(2024, 5, 12));
    }

    #[test]
    fn test_format_due_relative() {
        assert_eq!(format_due_relative(None, today()), "-");
        assert_eq!(format_due_relative(ymd(2024, 3, 13), today()), "today");
        assert_eq!(format_due_relative(ymd(2024, 3, 14), today()), "tomorrow");
        assert_eq!(format_due_relative(ymd(2024, 3, 20), today()), "in 7d");
        assert_eq!(format_due_relative(ymd(2024, 3, 11), today()), "2d late");
    }
}
