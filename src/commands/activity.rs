//! Activity Commands

use chrono::NaiveDate;
use serde::Serialize;
use supabase_lite::{Filter, Query, ServiceResult, TableApi, TableFilter};

use super::to_row;
use crate::models::{Activity, ActivityCategory};
use crate::store::Record;

pub const MIN_DURATION: u32 = 5;
pub const DURATION_STEP: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityDraft {
    pub title: String,
    pub description: String,
    pub category: ActivityCategory,
    /// Minutes
    pub duration: u32,
    /// `HH:MM`
    pub activity_time: String,
}

impl Default for ActivityDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: ActivityCategory::Work,
            duration: 30,
            activity_time: "09:00".to_string(),
        }
    }
}

#[derive(Serialize)]
struct ActivityRow<'a> {
    #[serde(flatten)]
    draft: &'a ActivityDraft,
    activity_date: NaiveDate,
}

fn date_filter(date: NaiveDate) -> Filter {
    Filter::eq("activity_date", date.format("%Y-%m-%d"))
}

/// One day's activities, earliest first
pub fn activity_query(date: NaiveDate) -> Query {
    Query::new().filter(date_filter(date)).order("activity_time", true)
}

pub fn activity_feed(date: NaiveDate) -> TableFilter {
    TableFilter::table(Activity::TABLE).with_filter(date_filter(date))
}

pub async fn create_activity<A: TableApi + ?Sized>(
    api: &A,
    date: NaiveDate,
    draft: &ActivityDraft,
) -> ServiceResult<()> {
    let row = ActivityRow { draft, activity_date: date };
    api.insert(Activity::TABLE, vec![to_row(&row)?]).await
}

pub async fn delete_activity<A: TableApi + ?Sized>(api: &A, id: &str) -> ServiceResult<()> {
    api.delete(Activity::TABLE, &[Filter::eq("id", id)]).await
}

/// Total planned minutes.
pub fn total_minutes(activities: &[Activity]) -> u32 {
    activities.iter().map(|a| a.duration).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::{Call, FakeApi};
    use serde_json::json;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_query_and_feed_share_the_date_scope() {
        assert_eq!(
            activity_query(day()).to_query_string(),
            "select=*&activity_date=eq.2026-10-19&order=activity_time.asc"
        );
        let feed = activity_feed(day());
        assert_eq!(feed.table, "activities");
        assert_eq!(feed.filter.map(|f| f.to_realtime()).as_deref(), Some("activity_date=eq.2026-10-19"));
    }

    #[tokio::test]
    async fn test_create_stamps_selected_date() {
        let api = FakeApi::default();
        let draft = ActivityDraft { title: "Run".into(), category: ActivityCategory::Exercise, ..Default::default() };
        create_activity(&api, day(), &draft).await.unwrap();
        assert_eq!(
            api.calls(),
            vec![Call::Insert {
                table: "activities".into(),
                rows: vec![json!({
                    "title": "Run",
                    "description": "",
                    "category": "exercise",
                    "duration": 30,
                    "activity_time": "09:00",
                    "activity_date": "2026-10-19"
                })],
            }]
        );
    }
}
