//! Mail Commands
//!
//! Inbox management for the dashboard and the public contact form.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;
use supabase_lite::{Filter, Query, ServiceResult, TableApi, TableFilter};
use uuid::Uuid;

use super::to_row;
use crate::models::{Mail, MailCategory, MailStatus};
use crate::store::Record;

/// Where contact form messages are addressed
pub const SITE_INBOX: &str = "admin@frontendfix.com";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMail {
    pub id: String,
    pub subject: String,
    pub from: String,
    pub to: String,
    pub content: String,
    pub status: MailStatus,
    pub category: MailCategory,
}

// ========================
// Public contact form
// ========================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn to_mail(&self) -> NewMail {
        NewMail {
            id: Uuid::new_v4().to_string(),
            subject: format!("Contact Form: {}", self.name.trim()),
            from: self.email.trim().to_string(),
            to: SITE_INBOX.to_string(),
            content: self.message.clone(),
            status: MailStatus::Sent,
            category: MailCategory::Inbox,
        }
    }
}

/// One anonymous insert into the inbox.
pub async fn submit_contact<A: TableApi + ?Sized>(api: &A, form: &ContactForm) -> ServiceResult<()> {
    api.insert(Mail::TABLE, vec![to_row(&form.to_mail())?]).await
}

// ========================
// Dashboard
// ========================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComposeDraft {
    pub to: String,
    pub subject: String,
    pub content: String,
}

impl ComposeDraft {
    fn to_mail(&self, from: &str, category: MailCategory) -> NewMail {
        NewMail {
            id: Uuid::new_v4().to_string(),
            subject: self.subject.trim().to_string(),
            from: from.to_string(),
            to: self.to.trim().to_string(),
            content: self.content.clone(),
            status: MailStatus::Sent,
            category,
        }
    }
}

fn category_filter(category: MailCategory) -> Filter {
    Filter::eq("category", category)
}

/// One tab, newest first
pub fn mail_query(category: MailCategory) -> Query {
    Query::new().filter(category_filter(category)).order("created_at", false)
}

pub fn mail_feed(category: MailCategory) -> TableFilter {
    TableFilter::table(Mail::TABLE).with_filter(category_filter(category))
}

/// Record an outgoing message under Sent.
pub async fn send_mail<A: TableApi + ?Sized>(api: &A, from: &str, draft: &ComposeDraft) -> ServiceResult<()> {
    api.insert(Mail::TABLE, vec![to_row(&draft.to_mail(from, MailCategory::Sent))?])
        .await
}

pub async fn save_draft<A: TableApi + ?Sized>(api: &A, from: &str, draft: &ComposeDraft) -> ServiceResult<()> {
    api.insert(Mail::TABLE, vec![to_row(&draft.to_mail(from, MailCategory::Draft))?])
        .await
}

pub async fn mark_read<A: TableApi + ?Sized>(api: &A, id: &str) -> ServiceResult<()> {
    api.update(Mail::TABLE, json!({ "status": MailStatus::Read }), &[Filter::eq("id", id)])
        .await
}

pub async fn delete_mail<A: TableApi + ?Sized>(api: &A, id: &str) -> ServiceResult<()> {
    api.delete(Mail::TABLE, &[Filter::eq("id", id)]).await
}

/// Stat cards for the current tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MailStats {
    pub total: usize,
    pub today: usize,
    pub unread: usize,
}

impl MailStats {
    /// `today` is a UTC calendar date, matching the stored timestamps.
    pub fn compute(mails: &[Mail], today: NaiveDate) -> Self {
        Self {
            total: mails.len(),
            today: mails.iter().filter(|m| m.created_at.date_naive() == today).count(),
            unread: mails.iter().filter(|m| m.is_unread()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::{Call, FakeApi};
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_contact_form_is_one_inbox_insert() {
        let api = FakeApi::default();
        let form = ContactForm { name: "Ava".into(), email: "ava@x.com".into(), message: "Hello".into() };
        submit_contact(&api, &form).await.unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            Call::Insert { table, rows } => {
                assert_eq!(table, "mails");
                assert_eq!(rows.len(), 1);
                let row = &rows[0];
                assert_eq!(row["subject"], "Contact Form: Ava");
                assert_eq!(row["from"], "ava@x.com");
                assert_eq!(row["to"], SITE_INBOX);
                assert_eq!(row["content"], "Hello");
                assert_eq!(row["category"], "inbox");
                assert_eq!(row["status"], "sent");
                assert!(Uuid::parse_str(row["id"].as_str().unwrap()).is_ok());
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_compose_send_and_draft() {
        let api = FakeApi::default();
        let draft = ComposeDraft { to: "client@x.com".into(), subject: "Quote".into(), content: "Hi".into() };
        send_mail(&api, "me@frontendfix.com", &draft).await.unwrap();
        save_draft(&api, "me@frontendfix.com", &draft).await.unwrap();

        let categories: Vec<_> = api
            .calls()
            .into_iter()
            .map(|call| match call {
                Call::Insert { rows, .. } => rows[0]["category"].clone(),
                other => panic!("unexpected call {:?}", other),
            })
            .collect();
        assert_eq!(categories, vec![json!("sent"), json!("draft")]);
    }

    #[tokio::test]
    async fn test_mark_read_patch() {
        let api = FakeApi::default();
        mark_read(&api, "m1").await.unwrap();
        assert_eq!(
            api.calls(),
            vec![Call::Update {
                table: "mails".into(),
                patch: json!({ "status": "read" }),
                filters: vec!["id=eq.m1".into()],
            }]
        );
    }

    #[test]
    fn test_tab_scope() {
        assert_eq!(
            mail_query(MailCategory::Spam).to_query_string(),
            "select=*&category=eq.spam&order=created_at.desc"
        );
        assert_eq!(
            mail_feed(MailCategory::Draft).filter.map(|f| f.to_realtime()).as_deref(),
            Some("category=eq.draft")
        );
    }

    #[test]
    fn test_stats_count_today() {
        let mail = |id: &str, day: u32, status: MailStatus| Mail {
            id: id.into(),
            subject: "s".into(),
            from: "a@x.com".into(),
            to: SITE_INBOX.into(),
            content: String::new(),
            status,
            category: MailCategory::Inbox,
            created_at: Utc.with_ymd_and_hms(2026, 10, day, 23, 59, 0).unwrap(),
            updated_at: None,
            user_id: None,
        };
        let mails = vec![
            mail("1", 19, MailStatus::Sent),
            mail("2", 19, MailStatus::Read),
            mail("3", 18, MailStatus::Delivered),
        ];
        let stats = MailStats::compute(&mails, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(stats, MailStats { total: 3, today: 2, unread: 2 });
    }
}
