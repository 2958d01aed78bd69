use serde_json::{json, Value};

use crate::models::message::{ChatContext, MessageContent};

/// Convert the chat history to the Groq API message specification.
///
/// One wire message per history item, role preserved. Content is flattened
/// to a single string: text parts are concatenated in order, anything else
/// (images) is dropped. A message with no text becomes an empty string.
pub fn messages_to_groq_spec(chat_ctx: &ChatContext) -> Vec<Value> {
    chat_ctx
        .items
        .iter()
        .map(|message| {
            json!({
                "role": message.role,
                "content": flatten_content(&message.content),
            })
        })
        .collect()
}

fn flatten_content(content: &[MessageContent]) -> String {
    let mut flattened = String::new();
    for part in content {
        if let Some(text) = part.as_text() {
            flattened.push_str(text);
        }
    }
    flattened
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::message::Message;

    #[test]
    fn test_messages_to_groq_spec() {
        let ctx = ChatContext::new().with_message(Message::user().with_text("Hello"));
        let spec = messages_to_groq_spec(&ctx);

        assert_eq!(spec.len(), 1);
        assert_eq!(spec[0]["role"], "user");
        assert_eq!(spec[0]["content"], "Hello");
    }

    #[test]
    fn test_messages_to_groq_spec_concatenates_text_parts() {
        let ctx = ChatContext::new().with_message(
            Message::user()
                .with_text("part one, ")
                .with_image("aGk=", "image/png")
                .with_text("part two"),
        );
        let spec = messages_to_groq_spec(&ctx);

        assert_eq!(spec.len(), 1);
        assert_eq!(spec[0]["content"], "part one, part two");
    }

    #[test]
    fn test_messages_to_groq_spec_one_message_per_item() {
        let ctx = ChatContext::new()
            .with_message(Message::system().with_text("be brief"))
            .with_message(Message::user().with_text("hi"))
            .with_message(Message::assistant().with_text("hello"))
            .with_message(Message::user().with_image("aGk=", "image/png"));
        let spec = messages_to_groq_spec(&ctx);

        assert_eq!(spec.len(), 4);
        assert_eq!(spec[0]["role"], "system");
        assert_eq!(spec[1]["role"], "user");
        assert_eq!(spec[2]["role"], "assistant");
        // An image-only message still produces a wire message, with empty content.
        assert_eq!(spec[3]["role"], "user");
        assert_eq!(spec[3]["content"], "");
    }

    #[test]
    fn test_messages_to_groq_spec_empty_context() {
        let spec = messages_to_groq_spec(&ChatContext::new());
        assert!(spec.is_empty());
    }
}
