// src/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Who wrote a transcript entry. Serialized lowercase, as the backends expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

/// One entry of the conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

/// Which backend handles a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatTarget {
    /// Project intake / tech-spec assistant. Receives the whole transcript.
    A,
    /// General knowledge assistant. Receives only the latest query.
    B,
}

impl fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatTarget::A => write!(f, "A"),
            ChatTarget::B => write!(f, "B"),
        }
    }
}

/// Body of `POST {A}/api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRequest {
    pub messages: Vec<Message>,
}

/// Body of `POST {B}/ask`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Superset of both backends' reply bodies. Everything is optional; the
/// informational fields are only logged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotReply {
    pub answer: Option<String>,
    pub reply: Option<String>,
    pub source: Option<String>,
    pub confident: Option<bool>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    pub show_fallback_button: Option<bool>,
    pub success: Option<bool>,
    pub document_ready: Option<bool>,
}

impl BotReply {
    /// `answer` wins when it carries text, otherwise `reply`. Empty strings
    /// count as missing.
    pub fn text(&self) -> Option<&str> {
        [self.answer.as_deref(), self.reply.as_deref()]
            .into_iter()
            .flatten()
            .find(|text| !text.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Analytics {
    pub total_tasks: u64,
    pub avg_messages_per_task: f64,
    #[serde(default)]
    pub tasks_per_day: BTreeMap<String, u64>,
}

impl Analytics {
    /// `(date, count)` rows, oldest first.
    pub fn daily_rows(&self) -> Vec<(&str, u64)> {
        self.tasks_per_day
            .iter()
            .map(|(day, count)| (day.as_str(), *count))
            .collect()
    }

    pub fn avg_display(&self) -> String {
        let rounded = (self.avg_messages_per_task * 100.0).round() / 100.0;
        format!("{}", rounded)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsEnvelope {
    pub data: Analytics,
}

/// Album ids come through as numbers or strings depending on who wrote the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SolutionId {
    Number(i64),
    Text(String),
}

impl fmt::Display for SolutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionId::Number(n) => write!(f, "{}", n),
            SolutionId::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Solution {
    pub id: SolutionId,
    pub image: String,
    pub title: String,
    pub description: String,
}

/// Logs details of each API call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_uses_lowercase_sender() {
        let value = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(value, json!({ "sender": "user", "text": "hi" }));
        let back: Message = serde_json::from_value(json!({ "sender": "bot", "text": "yo" })).unwrap();
        assert_eq!(back, Message::bot("yo"));
    }

    #[test]
    fn reply_prefers_answer_then_reply() {
        let both: BotReply =
            serde_json::from_value(json!({ "answer": "from answer", "reply": "from reply" }))
                .unwrap();
        assert_eq!(both.text(), Some("from answer"));

        let reply_only: BotReply =
            serde_json::from_value(json!({ "success": true, "reply": "only reply" })).unwrap();
        assert_eq!(reply_only.text(), Some("only reply"));

        let empty_answer: BotReply =
            serde_json::from_value(json!({ "answer": "", "reply": "fallthrough" })).unwrap();
        assert_eq!(empty_answer.text(), Some("fallthrough"));

        let neither: BotReply = serde_json::from_value(json!({ "success": false })).unwrap();
        assert_eq!(neither.text(), None);
    }

    #[test]
    fn blank_reply_counts_as_no_reply() {
        let blank: BotReply = serde_json::from_value(json!({ "reply": "" })).unwrap();
        assert_eq!(blank.text(), None);

        let both_blank: BotReply =
            serde_json::from_value(json!({ "answer": "", "reply": "" })).unwrap();
        assert_eq!(both_blank.text(), None);
    }

    #[test]
    fn analytics_rows_are_date_ordered() {
        let envelope: AnalyticsEnvelope = serde_json::from_value(json!({
            "data": {
                "total_tasks": 7,
                "avg_messages_per_task": 4.666666,
                "tasks_per_day": { "2024-05-03": 1, "2024-05-01": 4, "2024-05-02": 2 }
            }
        }))
        .unwrap();
        let analytics = envelope.data;
        assert_eq!(
            analytics.daily_rows(),
            vec![("2024-05-01", 4), ("2024-05-02", 2), ("2024-05-03", 1)]
        );
        assert_eq!(analytics.avg_display(), "4.67");
    }

    #[test]
    fn solution_ids_accept_numbers_and_strings() {
        let solutions: Vec<Solution> = serde_json::from_value(json!([
            { "id": 1, "image": "/img/a.png", "title": "A", "description": "first" },
            { "id": "crm", "image": "/img/b.png", "title": "B", "description": "second" }
        ]))
        .unwrap();
        assert_eq!(solutions[0].id.to_string(), "1");
        assert_eq!(solutions[1].id, SolutionId::Text("crm".to_string()));
    }
}
