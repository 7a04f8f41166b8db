//! Plain-text rendering of transcript entries

use nodit_chat_core::{Message, Sender};

/// One entry as printed to the terminal; user entries are not echoed
pub fn format_message(message: &Message) -> Option<String> {
    match message.sender {
        Sender::User => None,
        Sender::Tool if message.is_error => Some(format!("  ✗ {}", message.content)),
        Sender::Tool if message.tool_result.is_some() => {
            Some(format!("  ← {}", truncate(&message.content, 400)))
        }
        Sender::Tool => Some(format!("  ⚙ {}", message.content)),
        Sender::Assistant if message.is_error => Some(format!("✗ {}", message.content)),
        Sender::Assistant => Some(message.content.clone()),
    }
}

pub fn print_messages(messages: &[Message]) {
    for message in messages {
        if let Some(line) = format_message(message) {
            if message.is_error {
                eprintln!("{}", line);
            } else {
                println!("{}", line);
            }
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
