//! Reminder Commands

use serde::Serialize;
use serde_json::json;
use supabase_lite::{Filter, Query, ServiceResult, TableApi};

use super::{non_empty, to_row};
use crate::models::Reminder;
use crate::store::Record;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReminderDraft {
    pub title: String,
    pub description: String,
    /// `datetime-local` input value
    pub due_date: String,
}

#[derive(Serialize)]
struct ReminderRow<'a> {
    title: &'a str,
    description: Option<String>,
    due_date: &'a str,
    completed: bool,
}

/// Soonest first
pub fn reminder_query() -> Query {
    Query::new().order("due_date", true)
}

pub async fn create_reminder<A: TableApi + ?Sized>(api: &A, draft: &ReminderDraft) -> ServiceResult<()> {
    let row = ReminderRow {
        title: draft.title.trim(),
        description: non_empty(&draft.description),
        due_date: &draft.due_date,
        completed: false,
    };
    api.insert(Reminder::TABLE, vec![to_row(&row)?]).await
}

/// Flip `completed`; the feed delivers the updated row.
pub async fn toggle_reminder<A: TableApi + ?Sized>(api: &A, reminder: &Reminder) -> ServiceResult<()> {
    api.update(
        Reminder::TABLE,
        json!({ "completed": !reminder.completed }),
        &[Filter::eq("id", &reminder.id)],
    )
    .await
}

pub async fn delete_reminder<A: TableApi + ?Sized>(api: &A, id: &str) -> ServiceResult<()> {
    api.delete(Reminder::TABLE, &[Filter::eq("id", id)]).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::{Call, FakeApi};
    use crate::store::{apply_change, Change};
    use chrono::{TimeZone, Utc};

    fn reminder(completed: bool) -> Reminder {
        Reminder {
            id: "r1".into(),
            title: "Invoice".into(),
            description: None,
            due_date: Utc.with_ymd_and_hms(2026, 10, 20, 9, 0, 0).unwrap(),
            completed,
            created_at: None,
            user_id: None,
        }
    }

    #[tokio::test]
    async fn test_toggle_sends_one_flipped_update() {
        let api = FakeApi::default();
        toggle_reminder(&api, &reminder(false)).await.unwrap();
        assert_eq!(
            api.calls(),
            vec![Call::Update {
                table: "reminders".into(),
                patch: json!({ "completed": true }),
                filters: vec!["id=eq.r1".into()],
            }]
        );
    }

    #[test]
    fn test_replayed_toggle_event_is_stable() {
        let mut rows = vec![reminder(false)];
        apply_change(&mut rows, Change::Update(reminder(true)));
        let once = rows.clone();
        apply_change(&mut rows, Change::Update(reminder(true)));
        assert_eq!(rows, once);
        assert!(rows[0].completed);
    }

    #[tokio::test]
    async fn test_create_omits_blank_description() {
        let api = FakeApi::default();
        let draft = ReminderDraft {
            title: "Invoice".into(),
            description: "   ".into(),
            due_date: "2026-10-20T09:00".into(),
        };
        create_reminder(&api, &draft).await.unwrap();
        assert_eq!(
            api.calls(),
            vec![Call::Insert {
                table: "reminders".into(),
                rows: vec![json!({
                    "title": "Invoice",
                    "description": null,
                    "due_date": "2026-10-20T09:00",
                    "completed": false
                })],
            }]
        );
    }

    #[test]
    fn test_query_orders_by_due_date() {
        assert_eq!(reminder_query().to_query_string(), "select=*&order=due_date.asc");
    }
}
