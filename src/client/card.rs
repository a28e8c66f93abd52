//! What a task card displays.

use chrono::{DateTime, Utc};

use crate::api::TaskResponse;

const DUE_DATE_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// Display-ready fields of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub title: String,
    pub description: Option<String>,
    pub priority_label: &'static str,
    pub status_label: &'static str,
    pub due_line: Option<String>,
    pub category: Option<String>,
    pub struck_through: bool,
}

/// Formats a due date as `Due: Mon D, YYYY, HH:MM AM` (UTC).
#[must_use]
pub fn format_due(due: &DateTime<Utc>) -> String {
    format!("Due: {}", due.format(DUE_DATE_FORMAT))
}

impl From<&TaskResponse> for TaskCard {
    fn from(task: &TaskResponse) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority_label: task.priority.label(),
            status_label: if task.completed { "Completed" } else { "Pending" },
            due_line: task.due_date.as_ref().map(format_due),
            category: task.category.clone(),
            struck_through: task.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, TaskId};
    use chrono::TimeZone;
    use rstest::rstest;

    fn task(completed: bool) -> TaskResponse {
        let now = Utc::now();
        TaskResponse {
            id: TaskId::generate(),
            title: "Water plants".to_string(),
            description: None,
            priority: Priority::High,
            due_date: None,
            completed,
            category: Some("home".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    #[case(false, "Pending", false)]
    #[case(true, "Completed", true)]
    fn test_status(#[case] completed: bool, #[case] label: &str, #[case] struck: bool) {
        let card = TaskCard::from(&task(completed));
        assert_eq!(card.status_label, label);
        assert_eq!(card.struck_through, struck);
    }

    #[rstest]
    fn test_labels_and_category() {
        let card = TaskCard::from(&task(false));
        assert_eq!(card.priority_label, "High");
        assert_eq!(card.category.as_deref(), Some("home"));
        assert_eq!(card.due_line, None);
    }

    #[rstest]
    #[case(Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 0).unwrap(), "Due: Mar 7, 2025, 02:05 PM")]
    #[case(Utc.with_ymd_and_hms(2024, 12, 25, 9, 30, 0).unwrap(), "Due: Dec 25, 2024, 09:30 AM")]
    fn test_due_line(#[case] due: DateTime<Utc>, #[case] expected: &str) {
        let mut task = task(false);
        task.due_date = Some(due);
        assert_eq!(TaskCard::from(&task).due_line.as_deref(), Some(expected));
    }
}
