//! Task data structure and related functionality.
//!
//! A `Task` is the only persisted record. Its wire form is the camelCase JSON
//! object `{id, text, tag, dueDate?, status}`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::fields::Status;

/// Tag given to tasks created without one.
pub const DEFAULT_TAG: &str = "General";

/// A single card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    pub tag: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_date"
    )]
    pub due_date: Option<NaiveDate>,
    pub status: Status,
}

impl Task {
    /// True when the task has a due date before `now` and is not done.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        is_overdue(self, now)
    }
}

/// A task is overdue when its due date (taken as 00:00 UTC) is strictly before
/// `now` and it has not reached `Done`. No due date means never overdue.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    if task.status == Status::Done {
        return false;
    }
    match task.due_date {
        Some(due) => due.and_time(NaiveTime::MIN).and_utc() < now,
        None => false,
    }
}

/// Accepts an ISO date, `null`, or the empty string. Unparseable dates are
/// dropped so one bad record cannot discard the whole board.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(d) => Ok(Some(d)),
        Err(e) => {
            tracing::warn!(due_date = trimmed, error = %e, "dropping unparseable due date");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task(due: Option<&str>, status: Status) -> Task {
        Task {
            id: "t1".into(),
            text: "Write spec".into(),
            tag: DEFAULT_TAG.into(),
            due_date: due.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
            status,
        }
    }

    #[test]
    fn overdue_only_before_now_and_not_done() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
        assert!(task(Some("2024-01-01"), Status::Todo).is_overdue(now));
        assert!(task(Some("2024-01-02"), Status::InProgress).is_overdue(now));
        assert!(!task(Some("2024-01-03"), Status::Todo).is_overdue(now));
        assert!(!task(Some("2024-01-01"), Status::Done).is_overdue(now));
        assert!(!task(None, Status::Todo).is_overdue(now));
    }

    #[test]
    fn due_midnight_is_not_before_itself() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        assert!(!task(Some("2024-01-02"), Status::Todo).is_overdue(now));
    }

    #[test]
    fn absent_due_date_is_omitted_on_write() {
        let json = serde_json::to_string(&task(None, Status::Todo)).unwrap();
        assert_eq!(
            json,
            r#"{"id":"t1","text":"Write spec","tag":"General","status":"todo"}"#
        );
    }

    #[test]
    fn reads_browser_records() {
        let empty: Task = serde_json::from_str(
            r#"{"id":"a","text":"x","tag":"bug","dueDate":"","status":"in-progress"}"#,
        )
        .unwrap();
        assert_eq!(empty.due_date, None);
        assert_eq!(empty.status, Status::InProgress);

        let dated: Task = serde_json::from_str(
            r#"{"id":"a","text":"x","tag":"bug","dueDate":"2024-03-05","status":"done"}"#,
        )
        .unwrap();
        assert_eq!(dated.due_date, NaiveDate::from_ymd_opt(2024, 3, 5));

        let garbled: Task = serde_json::from_str(
            r#"{"id":"a","text":"x","tag":"bug","dueDate":"someday","status":"todo"}"#,
        )
        .unwrap();
        assert_eq!(garbled.due_date, None);
    }
}
