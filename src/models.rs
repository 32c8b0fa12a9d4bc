//! Frontend Models
//!
//! Row types for the hosted tables. Field names match the column names.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::store::Record;

/// Fixed key of the single personal info row
pub const PERSONAL_INFO_ID: &str = "00000000-0000-0000-0000-000000000001";

// ========================
// Categories
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectCategory {
    #[default]
    WebDesign,
    Fixes,
    UiUx,
}

impl ProjectCategory {
    pub const ALL: [ProjectCategory; 3] = [Self::WebDesign, Self::Fixes, Self::UiUx];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebDesign => "web-design",
            Self::Fixes => "fixes",
            Self::UiUx => "ui-ux",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::WebDesign => "Web Design",
            Self::Fixes => "Fixes",
            Self::UiUx => "UI/UX",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityCategory {
    #[default]
    Work,
    Exercise,
    Study,
    Personal,
}

impl ActivityCategory {
    pub const ALL: [ActivityCategory; 4] = [Self::Work, Self::Exercise, Self::Study, Self::Personal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Exercise => "exercise",
            Self::Study => "study",
            Self::Personal => "personal",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Exercise => "Exercise",
            Self::Study => "Study",
            Self::Personal => "Personal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailStatus {
    Sent,
    Delivered,
    Read,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailCategory {
    #[default]
    Inbox,
    Sent,
    Spam,
    Draft,
}

impl MailCategory {
    pub const ALL: [MailCategory; 4] = [Self::Inbox, Self::Sent, Self::Spam, Self::Draft];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Sent => "sent",
            Self::Spam => "spam",
            Self::Draft => "draft",
        }
    }

    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Inbox => "Inbox",
            Self::Sent => "Sent",
            Self::Spam => "Spam",
            Self::Draft => "Drafts",
        }
    }
}

impl fmt::Display for MailCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========================
// Rows
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: ProjectCategory,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub code_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Record for Project {
    const TABLE: &'static str = "projects";
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: ActivityCategory,
    /// Minutes
    pub duration: u32,
    pub activity_date: NaiveDate,
    /// `HH:MM` or `HH:MM:SS`, as stored
    pub activity_time: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Activity {
    pub fn time_label(&self) -> &str {
        self.activity_time.get(..5).unwrap_or(&self.activity_time)
    }
}

impl Record for Activity {
    const TABLE: &'static str = "activities";
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Record for Reminder {
    const TABLE: &'static str = "reminders";
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub id: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    /// platform -> url
    #[serde(default)]
    pub social_links: BTreeMap<String, String>,
}

impl Record for PersonalInfo {
    const TABLE: &'static str = "personal_info";
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mail {
    pub id: String,
    pub subject: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub content: String,
    pub status: MailStatus,
    pub category: MailCategory,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Mail {
    pub fn is_unread(&self) -> bool {
        self.category == MailCategory::Inbox && self.status != MailStatus::Read
    }
}

impl Record for Mail {
    const TABLE: &'static str = "mails";
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_category_wire_names() {
        assert_eq!(serde_json::to_value(ProjectCategory::UiUx).unwrap(), json!("ui-ux"));
        assert_eq!(
            serde_json::from_value::<ProjectCategory>(json!("web-design")).unwrap(),
            ProjectCategory::WebDesign
        );
        assert!(serde_json::from_value::<ProjectCategory>(json!("branding")).is_err());
        assert_eq!(ProjectCategory::parse("fixes"), Some(ProjectCategory::Fixes));
    }

    #[test]
    fn test_project_row_with_nulls() {
        let project: Project = serde_json::from_value(json!({
            "id": "p1",
            "title": "Landing page",
            "description": "Rebuilt the hero",
            "category": "fixes",
            "image_url": "https://img.example/p1.png",
            "video_url": null,
            "demo_url": null,
            "code_url": "https://git.example/p1",
            "created_at": "2026-10-19T08:30:00.123456+00:00",
            "user_id": "u1",
            "features": []
        }))
        .unwrap();
        assert_eq!(project.category, ProjectCategory::Fixes);
        assert_eq!(project.video_url, None);
        assert!(project.created_at.is_some());
    }

    #[test]
    fn test_activity_row() {
        let activity: Activity = serde_json::from_value(json!({
            "id": "a1",
            "title": "Run",
            "description": "",
            "category": "exercise",
            "duration": 45,
            "activity_date": "2026-10-19",
            "activity_time": "07:30:00",
            "user_id": "u1"
        }))
        .unwrap();
        assert_eq!(activity.time_label(), "07:30");
        assert_eq!(activity.activity_date, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert!(serde_json::from_value::<Activity>(json!({
            "id": "a2", "title": "x", "category": "sleep", "duration": 5,
            "activity_date": "2026-10-19", "activity_time": "07:30"
        }))
        .is_err());
    }

    #[test]
    fn test_mail_unread() {
        let mail: Mail = serde_json::from_value(json!({
            "id": "m1",
            "subject": "Contact Form: Ava",
            "from": "ava@x.com",
            "to": "admin@frontendfix.com",
            "content": "Hello",
            "status": "sent",
            "category": "inbox",
            "created_at": "2026-10-19T10:00:00Z"
        }))
        .unwrap();
        assert!(mail.is_unread());
        let read = Mail { status: MailStatus::Read, ..mail };
        assert!(!read.is_unread());
    }
}
