//! Date parsing, formatting and table output shared by the CLI and the board UI.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc};

use crate::error::{KanbanError, Result};
use crate::task::Task;

/// Parse an optional due-date field. Blank input means no due date;
/// anything unrecognised is an error.
pub fn parse_optional_due(input: &str) -> Result<Option<NaiveDate>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    let today = Local::now().date_naive();
    parse_due_input(input, today)
        .map(Some)
        .ok_or_else(|| KanbanError::InvalidDueDate {
            input: input.trim().to_string(),
        })
}

/// Parse human-readable due date input relative to `today`.
///
/// Supports:
/// - "today", "tomorrow", "yesterday"
/// - "monday" .. "sunday" (and "mon" .. "sun"), "this friday", "next monday"
/// - "this weekend", "end of week" / "eow", "end of month" / "eom"
/// - "in 3d", "in 2w", "in 1m"
/// - "YYYY-MM-DD"
pub fn parse_due_input(s: &str, today: NaiveDate) -> Option<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" => return Some(today),
        "tomorrow" => return Some(today + Duration::days(1)),
        "yesterday" => return Some(today - Duration::days(1)),
        "end of week" | "eow" => {
            let (_, end) = start_end_of_this_week(today);
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
        if let Some((idx, _)) = rest.char_indices().last() {
            let (amount, unit) = rest.split_at(idx);
            if let Ok(n) = amount.trim().parse::<i64>() {
                let offset = match unit {
                    "d" => Duration::try_days(n),
                    "w" => Duration::try_weeks(n),
                    // Approximate: 30 days per month
                    "m" => n.checked_mul(30).and_then(Duration::try_days),
                    _ => return None,
                };
                return offset.and_then(|d| today.checked_add_signed(d));
            }
        }
    }

    let (next_week, day) = match s.strip_prefix("next ") {
        Some(day) => (true, day),
        None => (false, s.strip_prefix("this ").unwrap_or(s.as_str())),
    };
    if let Some(target) = weekday_index(day) {
        let current = today.weekday().num_days_from_monday();
        let days_ahead = (target + 7 - current) % 7;
        let days = if next_week { days_ahead + 7 } else { days_ahead };
        return Some(today + Duration::days(days as i64));
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

fn weekday_index(name: &str) -> Option<u32> {
    let index = match name {
        "monday" | "mon" => 0,
        "tuesday" | "tue" => 1,
        "wednesday" | "wed" => 2,
        "thursday" | "thu" => 3,
        "friday" | "fri" => 4,
        "saturday" | "sat" => 5,
        "sunday" | "sun" => 6,
        _ => return None,
    };
    Some(index)
}

/// Start and end of the ISO week (Monday to Sunday) containing `today`.
pub fn start_end_of_this_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
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

/// First eight characters of a task id, enough to type back.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
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

/// Print tasks as a table, flagging overdue rows with `!`.
pub fn print_table(tasks: &[&Task], now: DateTime<Utc>) {
    println!(
        "{:<9} {:<11} {:<12} {:<12} {}",
        "ID", "Status", "Due", "Tag", "Text"
    );
    let today = now.with_timezone(&Local).date_naive();
    for t in tasks {
        let mark = if t.is_overdue(now) { "!" } else { "" };
        let due = match t.due_date {
            Some(d) => format!("{}{}", format_due_relative(Some(d), today), mark),
            None => "-".into(),
        };
        println!(
            "{:<9} {:<11} {:<12} {:<12} {}",
            short_id(&t.id),
            t.status.as_str(),
            due,
            truncate(&t.tag, 12),
            t.text
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-03 is a Wednesday.
    fn wed() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn parses_keywords_and_offsets() {
        assert_eq!(parse_due_input("Today", wed()), Some(wed()));
        assert_eq!(parse_due_input("tomorrow", wed()), ymd(2024, 1, 4));
        assert_eq!(parse_due_input("in 3d", wed()), ymd(2024, 1, 6));
        assert_eq!(parse_due_input("in 2w", wed()), ymd(2024, 1, 17));
        assert_eq!(parse_due_input("eow", wed()), ymd(2024, 1, 7));
        assert_eq!(parse_due_input("end of month", wed()), ymd(2024, 1, 31));
        assert_eq!(parse_due_input("weekend", wed()), ymd(2024, 1, 6));
        assert_eq!(parse_due_input("2024-02-29", wed()), ymd(2024, 2, 29));
    }

    #[test]
    fn parses_weekdays() {
        assert_eq!(parse_due_input("fri", wed()), ymd(2024, 1, 5));
        assert_eq!(parse_due_input("this friday", wed()), ymd(2024, 1, 5));
        assert_eq!(parse_due_input("wednesday", wed()), Some(wed()));
        assert_eq!(parse_due_input("next wednesday", wed()), ymd(2024, 1, 10));
        assert_eq!(parse_due_input("next monday", wed()), ymd(2024, 1, 15));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_due_input("someday", wed()), None);
        assert_eq!(parse_due_input("in xd", wed()), None);
        assert_eq!(parse_due_input("2024-13-01", wed()), None);
        assert!(matches!(
            parse_optional_due("soon"),
            Err(KanbanError::InvalidDueDate { .. })
        ));
        assert_eq!(parse_optional_due("  ").unwrap(), None);
    }

    #[test]
    fn out_of_range_offsets_are_rejected() {
        assert_eq!(parse_due_input("in 100000000d", wed()), None);
        assert_eq!(parse_due_input("in -100000000d", wed()), None);
        assert_eq!(parse_due_input("in 999999999999999w", wed()), None);
        assert_eq!(parse_due_input("in 999999999999999999m", wed()), None);
        assert!(matches!(
            parse_optional_due("in 100000000d"),
            Err(KanbanError::InvalidDueDate { .. })
        ));
        assert_eq!(parse_due_input("in 2w", wed()), ymd(2024, 1, 17));
    }

    #[test]
    fn relative_format() {
        let today = wed();
        assert_eq!(format_due_relative(None, today), "-");
        assert_eq!(format_due_relative(Some(today), today), "today");
        assert_eq!(format_due_relative(ymd(2024, 1, 4), today), "tomorrow");
        assert_eq!(format_due_relative(ymd(2024, 1, 8), today), "in 5d");
        assert_eq!(format_due_relative(ymd(2024, 1, 1), today), "2d late");
    }

    #[test]
    fn short_ids_and_truncation() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(truncate("feature", 12), "feature");
        assert_eq!(truncate("a-very-long-tag", 6), "a-ver…");
    }
}
