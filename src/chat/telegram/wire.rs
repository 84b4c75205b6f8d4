//! Telegram Bot API request bodies and response shapes.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::chat::{
    CallbackQuery, ChatId, IncomingMessage, InlineButton, MessageId, OutgoingMessage, ParseMode,
    Update,
};

/// Envelope wrapping every Bot API response.
#[derive(Debug, Deserialize)]
pub(super) struct ApiResponse<T> {
    pub(super) ok: bool,
    pub(super) result: Option<T>,
    pub(super) description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireChat {
    pub(super) id: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireMessage {
    pub(super) message_id: i64,
    pub(super) chat: WireChat,
    #[serde(default)]
    pub(super) text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireCallbackQuery {
    pub(super) id: String,
    #[serde(default)]
    pub(super) message: Option<WireMessage>,
    #[serde(default)]
    pub(super) data: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireUpdate {
    pub(super) update_id: i64,
    #[serde(default)]
    pub(super) message: Option<WireMessage>,
    #[serde(default)]
    pub(super) callback_query: Option<WireCallbackQuery>,
}

impl WireUpdate {
    /// Converts to a domain update. Edits, channel posts, and callback
    /// queries on inline-mode messages carry nothing the bot acts on.
    pub(super) fn into_update(self) -> Option<Update> {
        if let Some(message) = self.message {
            return Some(Update::Message(IncomingMessage {
                chat_id: ChatId::new(message.chat.id),
                text: message.text,
            }));
        }

        let query = self.callback_query?;
        let message = query.message?;
        Some(Update::CallbackQuery(CallbackQuery {
            id: query.id,
            chat_id: ChatId::new(message.chat.id),
            message_id: MessageId::new(message.message_id),
            data: query.data,
        }))
    }
}

fn inline_keyboard(buttons: &[InlineButton]) -> Value {
    let row: Vec<Value> = buttons
        .iter()
        .map(|button| json!({"text": button.text, "callback_data": button.callback_data}))
        .collect();
    json!({ "inline_keyboard": [row] })
}

fn insert_presentation(body: &mut Value, message: &OutgoingMessage) {
    let Some(fields) = body.as_object_mut() else {
        return;
    };
    if message.parse_mode == ParseMode::Html {
        fields.insert("parse_mode".to_owned(), json!("HTML"));
        fields.insert("disable_web_page_preview".to_owned(), json!(true));
    }
    if !message.buttons.is_empty() {
        fields.insert("reply_markup".to_owned(), inline_keyboard(&message.buttons));
    }
}

/// Body for `sendMessage`.
pub(super) fn send_message_body(chat_id: ChatId, message: &OutgoingMessage) -> Value {
    let mut body = json!({ "chat_id": chat_id.get(), "text": message.text });
    insert_presentation(&mut body, message);
    body
}

/// Body for `editMessageText`.
pub(super) fn edit_message_body(
    chat_id: ChatId,
    message_id: MessageId,
    message: &OutgoingMessage,
) -> Value {
    let mut body = json!({
        "chat_id": chat_id.get(),
        "message_id": message_id.get(),
        "text": message.text,
    });
    insert_presentation(&mut body, message);
    body
}
