//! Paged result messages with inline navigation buttons.
//!
//! A paginated result is one chat message whose text is swapped in place
//! when the user presses "« Prev" or "Next »". Sessions live in a bounded
//! registry keyed by `(chat_id, message_id)`; the oldest session is evicted
//! once the registry is full, after which its buttons are answered but do
//! nothing.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::chat::{
    CallbackQuery, ChatError, ChatId, ChatSender, InlineButton, MessageId, OutgoingMessage,
};

/// Sessions kept before the oldest is evicted.
pub const DEFAULT_SESSION_CAPACITY: usize = 256;

const CALLBACK_PREFIX: &str = "page:";
const PREVIOUS_LABEL: &str = "« Prev";
const NEXT_LABEL: &str = "Next »";

type SessionKey = (ChatId, MessageId);

/// Bounded, insertion-ordered session store.
#[derive(Debug)]
struct SessionRegistry {
    pages: HashMap<SessionKey, Arc<[String]>>,
    order: VecDeque<SessionKey>,
    capacity: usize,
}

impl SessionRegistry {
    fn new(capacity: usize) -> Self {
        Self {
            pages: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    fn insert(&mut self, key: SessionKey, pages: Arc<[String]>) {
        if self.pages.insert(key, pages).is_some() {
            return;
        }
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.pages.remove(&oldest);
            }
        }
    }

    fn get(&self, key: &SessionKey) -> Option<Arc<[String]>> {
        self.pages.get(key).cloned()
    }
}

/// Sends and navigates paginated messages.
pub struct Paginator {
    chat: Arc<dyn ChatSender>,
    page_size: usize,
    sessions: Mutex<SessionRegistry>,
}

impl Paginator {
    /// Creates a paginator with `page_size` items per page.
    #[must_use]
    pub fn new(chat: Arc<dyn ChatSender>, page_size: usize) -> Self {
        Self::with_capacity(chat, page_size, DEFAULT_SESSION_CAPACITY)
    }

    /// Creates a paginator that keeps at most `capacity` sessions.
    #[must_use]
    pub fn with_capacity(chat: Arc<dyn ChatSender>, page_size: usize, capacity: usize) -> Self {
        Self {
            chat,
            page_size: page_size.max(1),
            sessions: Mutex::new(SessionRegistry::new(capacity)),
        }
    }

    /// Renders `items` into pages and sends the first one.
    ///
    /// Returns the message id, or `None` when `items` is empty and nothing
    /// was sent.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError`] when the first page cannot be sent.
    pub async fn paginate<T, F>(
        &self,
        chat_id: ChatId,
        items: &[T],
        formatter: F,
    ) -> Result<Option<MessageId>, ChatError>
    where
        F: Fn(&T) -> String,
    {
        let pages: Arc<[String]> = items
            .chunks(self.page_size)
            .map(|chunk| chunk.iter().map(&formatter).collect::<Vec<_>>().join("\n\n"))
            .collect();

        let Some(first) = page_message(&pages, 0) else {
            return Ok(None);
        };

        let message_id = self.chat.send_message(chat_id, first).await?;
        self.sessions
            .lock()
            .await
            .insert((chat_id, message_id), pages);
        Ok(Some(message_id))
    }

    /// Handles a navigation button press.
    ///
    /// The query is always answered. The message is edited only when the
    /// session is known and the requested page exists.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError`] when the edit or the answer fails.
    pub async fn handle_callback(&self, query: &CallbackQuery) -> Result<(), ChatError> {
        let requested = query.data.as_deref().and_then(parse_callback_data);
        let pages = self
            .sessions
            .lock()
            .await
            .get(&(query.chat_id, query.message_id));

        let edit_result = match (pages, requested) {
            (Some(session_pages), Some(index)) => match page_message(&session_pages, index) {
                Some(message) => {
                    self.chat
                        .edit_message(query.chat_id, query.message_id, message)
                        .await
                }
                None => Ok(()),
            },
            _ => {
                tracing::debug!(
                    chat_id = %query.chat_id,
                    data = ?query.data,
                    "ignoring callback for unknown pagination session"
                );
                Ok(())
            }
        };

        self.chat.answer_callback(&query.id).await?;
        edit_result
    }
}

/// Extracts the page index from `page:{index}` callback data.
fn parse_callback_data(data: &str) -> Option<usize> {
    data.strip_prefix(CALLBACK_PREFIX)?.parse().ok()
}

/// Builds the message for page `index`, with footer and navigation buttons.
fn page_message(pages: &[String], index: usize) -> Option<OutgoingMessage> {
    let body = pages.get(index)?;
    let total = pages.len();
    let text = format!("{body}\n\nPage {}/{total}", index.saturating_add(1));

    let mut buttons = Vec::new();
    if let Some(previous) = index.checked_sub(1) {
        buttons.push(InlineButton::new(
            PREVIOUS_LABEL,
            format!("{CALLBACK_PREFIX}{previous}"),
        ));
    }
    let next = index.saturating_add(1);
    if next < total {
        buttons.push(InlineButton::new(
            NEXT_LABEL,
            format!("{CALLBACK_PREFIX}{next}"),
        ));
    }

    Some(OutgoingMessage::plain(text).with_buttons(buttons))
}
