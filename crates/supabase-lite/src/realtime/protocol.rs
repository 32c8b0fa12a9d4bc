//! Phoenix channel frames used by the Realtime service.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::query::Filter;

pub const PHOENIX_TOPIC: &str = "phoenix";
pub const EVENT_JOIN: &str = "phx_join";
pub const EVENT_LEAVE: &str = "phx_leave";
pub const EVENT_REPLY: &str = "phx_reply";
pub const EVENT_ERROR: &str = "phx_error";
pub const EVENT_HEARTBEAT: &str = "heartbeat";
pub const EVENT_ACCESS_TOKEN: &str = "access_token";
pub const EVENT_CHANGES: &str = "postgres_changes";

/// One frame on the socket, in either direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoenixMessage {
    pub topic: String,
    pub event: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(rename = "ref", default)]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_ref: Option<String>,
}

impl PhoenixMessage {
    pub fn to_text(&self) -> String {
        // Value-only struct: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// `phx_reply` with `status: "error"`, if that's what this is.
    pub fn reply_error(&self) -> Option<String> {
        if self.event != EVENT_REPLY {
            return None;
        }
        if self.payload.get("status").and_then(Value::as_str) != Some("error") {
            return None;
        }
        Some(
            self.payload
                .pointer("/response/reason")
                .and_then(Value::as_str)
                .unwrap_or("join refused")
                .to_string(),
        )
    }
}

/// Which rows of which table a channel listens to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFilter {
    pub schema: String,
    pub table: String,
    pub filter: Option<Filter>,
}

impl TableFilter {
    pub fn table(table: impl Into<String>) -> Self {
        Self { schema: "public".to_string(), table: table.into(), filter: None }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }
}

pub fn join_message(topic: &str, reference: &str, filter: &TableFilter, access_token: Option<&str>) -> PhoenixMessage {
    let mut change = json!({
        "event": "*",
        "schema": filter.schema,
        "table": filter.table,
    });
    if let Some(f) = &filter.filter {
        change["filter"] = Value::String(f.to_realtime());
    }

    let mut payload = json!({
        "config": {
            "broadcast": { "self": false },
            "presence": { "key": "" },
            "postgres_changes": [change],
        }
    });
    if let Some(token) = access_token {
        payload["access_token"] = Value::String(token.to_string());
    }

    PhoenixMessage {
        topic: topic.to_string(),
        event: EVENT_JOIN.to_string(),
        payload,
        reference: Some(reference.to_string()),
        join_ref: Some(reference.to_string()),
    }
}

pub fn leave_message(topic: &str, reference: &str) -> PhoenixMessage {
    PhoenixMessage {
        topic: topic.to_string(),
        event: EVENT_LEAVE.to_string(),
        payload: json!({}),
        reference: Some(reference.to_string()),
        join_ref: None,
    }
}

pub fn heartbeat_message(reference: &str) -> PhoenixMessage {
    PhoenixMessage {
        topic: PHOENIX_TOPIC.to_string(),
        event: EVENT_HEARTBEAT.to_string(),
        payload: json!({}),
        reference: Some(reference.to_string()),
        join_ref: None,
    }
}

pub fn access_token_message(topic: &str, reference: &str, token: &str) -> PhoenixMessage {
    PhoenixMessage {
        topic: topic.to_string(),
        event: EVENT_ACCESS_TOKEN.to_string(),
        payload: json!({ "access_token": token }),
        reference: Some(reference.to_string()),
        join_ref: None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

impl ChangeKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "INSERT" => Some(ChangeKind::Insert),
            "UPDATE" => Some(ChangeKind::Update),
            "DELETE" => Some(ChangeKind::Delete),
            _ => None,
        }
    }
}

/// A decoded `postgres_changes` event, rows still as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct RawChange {
    pub kind: ChangeKind,
    pub table: String,
    /// New row (insert/update); `Null` on delete
    pub record: Value,
    /// Old row; on delete this carries at least the primary key
    pub old_record: Value,
}

impl RawChange {
    /// Primary key of the affected row, new row first.
    pub fn id(&self) -> Option<String> {
        [&self.record, &self.old_record]
            .into_iter()
            .filter_map(|row| row.get("id"))
            .find_map(|id| match id {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }
}

/// Extract a change event; `None` for every other frame and for unknown kinds.
pub fn parse_change(msg: &PhoenixMessage) -> Option<RawChange> {
    if msg.event != EVENT_CHANGES {
        return None;
    }
    let data = msg.payload.get("data")?;
    let kind = ChangeKind::parse(data.get("type")?.as_str()?)?;
    Some(RawChange {
        kind,
        table: data.get("table").and_then(Value::as_str).unwrap_or_default().to_string(),
        record: data.get("record").cloned().unwrap_or(Value::Null),
        old_record: data.get("old_record").cloned().unwrap_or(Value::Null),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(text: &str) -> PhoenixMessage {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_join_message_shape() {
        let filter = TableFilter::table("activities").with_filter(Filter::eq("activity_date", "2026-10-19"));
        let msg = join_message("realtime:activities:3", "7", &filter, Some("jwt"));
        let value: Value = serde_json::from_str(&msg.to_text()).unwrap();

        assert_eq!(value["event"], "phx_join");
        assert_eq!(value["ref"], "7");
        assert_eq!(value["join_ref"], "7");
        assert_eq!(value["payload"]["access_token"], "jwt");
        let change = &value["payload"]["config"]["postgres_changes"][0];
        assert_eq!(change["event"], "*");
        assert_eq!(change["schema"], "public");
        assert_eq!(change["table"], "activities");
        assert_eq!(change["filter"], "activity_date=eq.2026-10-19");
    }

    #[test]
    fn test_join_without_filter_or_token() {
        let msg = join_message("realtime:projects:1", "1", &TableFilter::table("projects"), None);
        assert!(msg.payload.get("access_token").is_none());
        assert!(msg.payload["config"]["postgres_changes"][0].get("filter").is_none());
    }

    #[test]
    fn test_parse_insert_change() {
        let msg = frame(
            r#"{"topic":"realtime:projects:1","event":"postgres_changes","ref":null,
                "payload":{"ids":[1],"data":{"schema":"public","table":"projects",
                "commit_timestamp":"2026-10-19T10:00:00Z","type":"INSERT",
                "record":{"id":"p1","title":"Site"},"old_record":null,"errors":null}}}"#,
        );
        let change = parse_change(&msg).unwrap();
        assert_eq!(change.kind, ChangeKind::Insert);
        assert_eq!(change.table, "projects");
        assert_eq!(change.record["title"], "Site");
        assert_eq!(change.id().as_deref(), Some("p1"));
    }

    #[test]
    fn test_parse_delete_uses_old_record() {
        let msg = frame(
            r#"{"topic":"t","event":"postgres_changes","ref":null,
                "payload":{"data":{"table":"reminders","type":"DELETE","old_record":{"id":"r9"}}}}"#,
        );
        let change = parse_change(&msg).unwrap();
        assert_eq!(change.kind, ChangeKind::Delete);
        assert_eq!(change.record, Value::Null);
        assert_eq!(change.id().as_deref(), Some("r9"));
    }

    #[test]
    fn test_other_frames_are_not_changes() {
        let reply = frame(r#"{"topic":"t","event":"phx_reply","payload":{"status":"ok","response":{}},"ref":"1"}"#);
        assert!(parse_change(&reply).is_none());
        assert!(reply.reply_error().is_none());

        let unknown = frame(
            r#"{"topic":"t","event":"postgres_changes","payload":{"data":{"type":"TRUNCATE","table":"x"}},"ref":null}"#,
        );
        assert!(parse_change(&unknown).is_none());
    }

    #[test]
    fn test_reply_error_reason() {
        let reply = frame(
            r#"{"topic":"t","event":"phx_reply","ref":"2",
                "payload":{"status":"error","response":{"reason":"Invalid JWT"}}}"#,
        );
        assert_eq!(reply.reply_error().as_deref(), Some("Invalid JWT"));
    }

    #[test]
    fn test_heartbeat_and_leave() {
        let hb = heartbeat_message("5");
        assert_eq!(hb.topic, "phoenix");
        assert_eq!(hb.event, "heartbeat");
        let leave = leave_message("realtime:x:1", "6");
        assert_eq!(leave.event, "phx_leave");
        assert!(!leave.to_text().contains("join_ref"));
    }
}
