//! User-visible chat transcript
//!
//! Append-only for the lifetime of a session. Every entry gets a strictly
//! increasing id so a front end can render only what is new since the last
//! id it saw.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Greeting the chat opens with
pub const GREETING: &str = "Hello! I'm your Nodit MCP assistant. How can I help you today?";

/// Who produced a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
    Tool,
}

/// One transcript entry; never mutated after it is appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_result: Option<Value>,
    /// Set on error entries (failed tools, failed turns)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    messages: Vec<Message>,
}

/// Append-only, shareable transcript
#[derive(Debug, Default)]
pub struct Transcript {
    inner: RwLock<Inner>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transcript opened by the assistant greeting
    pub fn with_greeting() -> Self {
        let transcript = Self::new();
        transcript.push_assistant(GREETING);
        transcript
    }

    fn push(
        &self,
        sender: Sender,
        content: String,
        tool_name: Option<String>,
        tool_result: Option<Value>,
        is_error: bool,
    ) -> Message {
        let mut inner = self.inner.write();
        inner.next_id += 1;
        let message = Message {
            id: inner.next_id,
            content,
            sender,
            timestamp: Utc::now(),
            tool_name,
            tool_result,
            is_error,
        };
        inner.messages.push(message.clone());
        message
    }

    pub fn push_user(&self, content: impl Into<String>) -> Message {
        self.push(Sender::User, content.into(), None, None, false)
    }

    pub fn push_assistant(&self, content: impl Into<String>) -> Message {
        self.push(Sender::Assistant, content.into(), None, None, false)
    }

    /// Assistant-visible error that ends a turn
    pub fn push_error(&self, content: impl Into<String>) -> Message {
        self.push(Sender::Assistant, content.into(), None, None, true)
    }

    /// "Executing tool" announcement
    pub fn push_tool_notice(&self, tool_name: &str) -> Message {
        self.push(
            Sender::Tool,
            format!("Executing tool: {}", tool_name),
            Some(tool_name.to_string()),
            None,
            false,
        )
    }

    pub fn push_tool_result(&self, tool_name: &str, content: impl Into<String>, result: Value) -> Message {
        self.push(
            Sender::Tool,
            content.into(),
            Some(tool_name.to_string()),
            Some(result),
            false,
        )
    }

    pub fn push_tool_error(&self, tool_name: &str, content: impl Into<String>) -> Message {
        self.push(Sender::Tool, content.into(), Some(tool_name.to_string()), None, true)
    }

    /// Snapshot of every entry
    pub fn messages(&self) -> Vec<Message> {
        self.inner.read().messages.clone()
    }

    /// Entries appended after the entry with id `after`
    pub fn since(&self, after: u64) -> Vec<Message> {
        self.inner
            .read()
            .messages
            .iter()
            .filter(|m| m.id > after)
            .cloned()
            .collect()
    }

    pub fn last(&self) -> Option<Message> {
        self.inner.read().messages.last().cloned()
    }

    /// Id of the newest entry (0 when empty)
    pub fn last_id(&self) -> u64 {
        self.inner.read().next_id
    }

    pub fn len(&self) -> usize {
        self.inner.read().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ids_increase_and_since() {
        let transcript = Transcript::with_greeting();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.last().unwrap().content, GREETING);

        let mark = transcript.last_id();
        let user = transcript.push_user("what is block 100");
        let notice = transcript.push_tool_notice("get_block");
        assert!(notice.id > user.id);

        let new = transcript.since(mark);
        assert_eq!(new.len(), 2);
        assert_eq!(new[0].sender, Sender::User);
        assert_eq!(new[1].tool_name.as_deref(), Some("get_block"));
    }

    #[test]
    fn test_tool_entries() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.last_id(), 0);

        let ok = transcript.push_tool_result("get_block", "{\"number\":100}", json!({"number": 100}));
        assert_eq!(ok.tool_result, Some(json!({"number": 100})));
        assert!(!ok.is_error);

        let failed = transcript.push_tool_error("get_block", "Error executing get_block: boom");
        assert!(failed.is_error);
        assert!(failed.tool_result.is_none());

        let err = transcript.push_error("Error: HTTP 500");
        assert_eq!(err.sender, Sender::Assistant);
        assert!(err.is_error);
    }

    #[test]
    fn test_message_serialization() {
        let transcript = Transcript::new();
        let msg = transcript.push_user("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["sender"], "user");
        assert!(json.get("tool_name").is_none());
        assert!(json.get("is_error").is_none());
    }
}
