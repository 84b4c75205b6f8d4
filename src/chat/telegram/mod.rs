//! Telegram Bot API transport over HTTPS.
//!
//! [`TelegramClient`] implements [`ChatSender`] by POSTing JSON bodies to
//! `{api_base}/bot{token}/{method}`. [`TelegramUpdates`] long-polls
//! `getUpdates`, tracking the update offset so each update is delivered once.

mod wire;

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use url::Url;

use super::{
    ChatAction, ChatError, ChatId, ChatSender, MessageId, OutgoingMessage, Update, UpdateSource,
};
use wire::{ApiResponse, WireMessage, WireUpdate, edit_message_body, send_message_body};

/// Upper bound for ordinary Bot API calls.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Slack granted to `getUpdates` beyond its long-poll timeout before the
/// connection is treated as dead.
pub const POLL_TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

/// HTTP client bound to one bot token.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    bot_base: String,
}

impl TelegramClient {
    /// Creates a client for `token` against `api_base`
    /// (normally `https://api.telegram.org`).
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::MissingToken`] for a blank token,
    /// [`ChatError::InvalidUrl`] when `api_base` is not an absolute URL, and
    /// [`ChatError::Transport`] if the HTTP client cannot be built.
    pub fn new(token: &str, api_base: &str) -> Result<Self, ChatError> {
        let trimmed_token = token.trim();
        if trimmed_token.is_empty() {
            return Err(ChatError::MissingToken);
        }

        let base = api_base.trim().trim_end_matches('/');
        Url::parse(base).map_err(|error| ChatError::InvalidUrl(error.to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| ChatError::Transport {
                message: error.to_string(),
            })?;

        Ok(Self {
            http,
            bot_base: format!("{base}/bot{trimmed_token}"),
        })
    }

    /// Starts a long-poll cursor at offset 0.
    ///
    /// Each poll may take up to `poll_timeout_seconds` plus
    /// [`POLL_TIMEOUT_MARGIN`] before it fails with [`ChatError::Transport`].
    #[must_use]
    pub fn updates(&self, poll_timeout_seconds: u64) -> TelegramUpdates {
        TelegramUpdates {
            client: self.clone(),
            offset: 0,
            poll_timeout_seconds,
            timeout_margin: POLL_TIMEOUT_MARGIN,
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: &Value) -> Result<T, ChatError> {
        self.call_within(method, body, REQUEST_TIMEOUT).await
    }

    async fn call_within<T: DeserializeOwned>(
        &self,
        method: &str,
        body: &Value,
        timeout: Duration,
    ) -> Result<T, ChatError> {
        let url = format!("{}/{method}", self.bot_base);
        let response = self
            .http
            .post(url)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|error| ChatError::Transport {
                message: error.without_url().to_string(),
            })?;

        // Rejections arrive as 4xx responses that still carry the JSON envelope.
        let envelope: ApiResponse<T> =
            response.json().await.map_err(|error| ChatError::Decode {
                method: method.to_owned(),
                message: error.without_url().to_string(),
            })?;

        if !envelope.ok {
            return Err(ChatError::Api {
                method: method.to_owned(),
                description: envelope
                    .description
                    .unwrap_or_else(|| "no description".to_owned()),
            });
        }

        envelope.result.ok_or_else(|| ChatError::Decode {
            method: method.to_owned(),
            message: "response has no result".to_owned(),
        })
    }
}

#[async_trait]
impl ChatSender for TelegramClient {
    async fn send_message(
        &self,
        chat_id: ChatId,
        message: OutgoingMessage,
    ) -> Result<MessageId, ChatError> {
        let sent: WireMessage = self
            .call("sendMessage", &send_message_body(chat_id, &message))
            .await?;
        Ok(MessageId::new(sent.message_id))
    }

    async fn edit_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        message: OutgoingMessage,
    ) -> Result<(), ChatError> {
        // The result is the edited message, or `true` for inline messages.
        let _edited: Value = self
            .call(
                "editMessageText",
                &edit_message_body(chat_id, message_id, &message),
            )
            .await?;
        Ok(())
    }

    async fn send_chat_action(
        &self,
        chat_id: ChatId,
        action: ChatAction,
    ) -> Result<(), ChatError> {
        let _accepted: bool = self
            .call(
                "sendChatAction",
                &json!({ "chat_id": chat_id.get(), "action": action.as_str() }),
            )
            .await?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), ChatError> {
        let _accepted: bool = self
            .call(
                "answerCallbackQuery",
                &json!({ "callback_query_id": callback_id }),
            )
            .await?;
        Ok(())
    }
}

/// Long-poll cursor over `getUpdates`.
#[derive(Debug)]
pub struct TelegramUpdates {
    client: TelegramClient,
    offset: i64,
    poll_timeout_seconds: u64,
    timeout_margin: Duration,
}

impl TelegramUpdates {
    /// Offset that the next poll will send.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.offset
    }

    /// Replaces the slack allowed beyond the long-poll timeout.
    #[must_use]
    pub const fn with_timeout_margin(mut self, margin: Duration) -> Self {
        self.timeout_margin = margin;
        self
    }

    /// Longest a single `getUpdates` request may take.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_seconds).saturating_add(self.timeout_margin)
    }
}

#[async_trait]
impl UpdateSource for TelegramUpdates {
    async fn poll(&mut self) -> Result<Vec<Update>, ChatError> {
        let body = json!({
            "offset": self.offset,
            "timeout": self.poll_timeout_seconds,
            "allowed_updates": ["message", "callback_query"],
        });
        let batch: Vec<WireUpdate> = self
            .client
            .call_within("getUpdates", &body, self.request_timeout())
            .await?;

        if let Some(last) = batch.iter().map(|update| update.update_id).max() {
            self.offset = self.offset.max(last.saturating_add(1));
        }

        Ok(batch.into_iter().filter_map(WireUpdate::into_update).collect())
    }
}
