use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Conversation {
    pub id: u64,
    #[serde(default)]
    pub inbox_identifier: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub assignee: Option<Assignee>,
    pub meta: ConversationMeta,
    #[serde(default)]
    pub labels: Vec<String>,
    pub created_at: CreatedAt,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Assignee {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConversationMeta {
    pub sender: Sender,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Sender {
    pub name: String,
}

/// Creation instant as sent by the server.
///
/// Deployments disagree on the wire type: some send an ISO-8601 string, others
/// epoch seconds. Both are kept raw and only parsed when rendered.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum CreatedAt {
    Epoch(i64),
    Text(String),
}

impl CreatedAt {
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            CreatedAt::Epoch(secs) => Utc.timestamp_opt(*secs, 0).single(),
            CreatedAt::Text(raw) => DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    // no offset, read as UTC
                    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                        .ok()
                        .map(|naive| naive.and_utc())
                })
                .or_else(|| {
                    // date only, midnight UTC
                    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                        .ok()
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                        .map(|naive| naive.and_utc())
                }),
        }
    }
}

impl fmt::Display for CreatedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreatedAt::Epoch(secs) => write!(f, "{}", secs),
            CreatedAt::Text(raw) => write!(f, "{}", raw),
        }
    }
}

/// One page of the conversation listing.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConversationPage {
    pub payload: Vec<Conversation>,
    pub meta: PageMeta,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: u32,
    pub total_pages: u32,
}

impl PageMeta {
    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_with_unassigned_and_missing_fields() {
        let body = r#"{
  "payload": [
    {
      "id": 7,
      "inbox_identifier": "whatsapp",
      "status": "open",
      "assignee": null,
      "meta": { "sender": { "name": "Maria", "email": "maria@example.com" } },
      "labels": ["urgent", "billing"],
      "created_at": "2026-10-16T09:00:00Z",
      "unread_count": 3
    },
    {
      "id": 8,
      "meta": { "sender": { "name": "João" } },
      "assignee": { "id": 2, "name": "Ana" },
      "created_at": 1760605200
    }
  ],
  "meta": { "current_page": 1, "total_pages": 2 }
}"#;

        let page: ConversationPage = serde_json::from_str(body).unwrap();

        assert_eq!(page.payload.len(), 2);
        assert!(page.meta.has_more());

        let first = &page.payload[0];
        assert_eq!(first.assignee, None);
        assert_eq!(first.labels, vec!["urgent", "billing"]);
        assert_eq!(first.meta.sender.name, "Maria");

        let second = &page.payload[1];
        assert_eq!(second.inbox_identifier, "");
        assert!(second.labels.is_empty());
        assert_eq!(second.assignee.as_ref().map(|a| a.name.as_str()), Some("Ana"));
        assert_eq!(second.created_at, CreatedAt::Epoch(1760605200));
    }

    #[test]
    fn test_page_without_meta_is_rejected() {
        let body = r#"{ "payload": [] }"#;
        assert!(serde_json::from_str::<ConversationPage>(body).is_err());

        let body = r#"{ "payload": [], "meta": { "current_page": 1 } }"#;
        assert!(serde_json::from_str::<ConversationPage>(body).is_err());
    }

    #[test]
    fn test_created_at_parsing() {
        let expected = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();

        assert_eq!(
            CreatedAt::Text("2026-10-16T09:00:00Z".to_string()).to_datetime(),
            Some(expected)
        );
        assert_eq!(
            CreatedAt::Text("2026-10-16T06:00:00-03:00".to_string()).to_datetime(),
            Some(expected)
        );
        assert_eq!(
            CreatedAt::Text("2026-10-16T09:00:00.000".to_string()).to_datetime(),
            Some(expected)
        );
        assert_eq!(
            CreatedAt::Epoch(expected.timestamp()).to_datetime(),
            Some(expected)
        );
        assert_eq!(
            CreatedAt::Text("2026-10-16".to_string()).to_datetime(),
            Some(Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap())
        );
        assert_eq!(CreatedAt::Text("yesterday".to_string()).to_datetime(), None);
        assert_eq!(CreatedAt::Text("2026-13-01".to_string()).to_datetime(), None);
    }
}
