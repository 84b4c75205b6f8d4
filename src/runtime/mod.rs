//! Host loop: polls the chat transport and fans updates out to per-chat
//! sessions.
//!
//! Every chat gets one Tokio task fed by a bounded mailbox, so commands in a
//! chat run one at a time while different chats proceed concurrently. The
//! session task is also the listener a command waits on for its argument.
//! A session with nothing to do for [`SESSION_IDLE_TIMEOUT`] ends, and the
//! next message from that chat starts a fresh one.
//! Button presses bypass the mailboxes and go straight to the paginator, so
//! they work while a command is waiting for a reply.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinSet;

use crate::beard::CommandDispatcher;
use crate::chat::{ChannelListener, ChatId, ChatListener, IncomingMessage, Update, UpdateSource};

/// Messages buffered per chat before new ones are dropped.
pub const MAILBOX_CAPACITY: usize = 32;

/// Quiet period after which a chat session ends.
pub const SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Pause after a failed poll.
pub const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Owns the poll loop and the per-chat sessions.
pub struct ChatRuntime<S> {
    source: S,
    dispatcher: Arc<CommandDispatcher>,
    mailboxes: HashMap<ChatId, mpsc::Sender<IncomingMessage>>,
    tasks: JoinSet<()>,
}

impl<S: UpdateSource> ChatRuntime<S> {
    /// Creates a runtime reading from `source`.
    #[must_use]
    pub fn new(source: S, dispatcher: Arc<CommandDispatcher>) -> Self {
        Self {
            source,
            dispatcher,
            mailboxes: HashMap::new(),
            tasks: JoinSet::new(),
        }
    }

    /// Polls until `shutdown` resolves, then closes every mailbox and waits
    /// for the sessions to finish.
    ///
    /// Commands still waiting for a reply end with "no input".
    pub async fn run_until(mut self, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    tracing::info!("shutdown requested");
                    break;
                }
                polled = self.source.poll() => match polled {
                    Ok(updates) => {
                        for update in updates {
                            self.route(update);
                        }
                        self.reap_finished();
                    }
                    Err(error) => {
                        tracing::warn!(%error, "polling for updates failed");
                        tokio::time::sleep(POLL_ERROR_BACKOFF).await;
                    }
                },
            }
        }

        self.mailboxes.clear();
        while let Some(joined) = self.tasks.join_next().await {
            if let Err(error) = joined {
                tracing::warn!(%error, "chat session ended abnormally");
            }
        }
    }

    fn reap_finished(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            if let Err(error) = joined {
                tracing::warn!(%error, "chat task ended abnormally");
            }
        }
        self.mailboxes.retain(|_, mailbox| !mailbox.is_closed());
    }

    fn route(&mut self, update: Update) {
        match update {
            Update::Message(message) => self.deliver(message),
            Update::CallbackQuery(query) => {
                let dispatcher = Arc::clone(&self.dispatcher);
                self.tasks.spawn(async move {
                    dispatcher.handle_callback(&query).await;
                });
            }
        }
    }

    fn deliver(&mut self, message: IncomingMessage) {
        let chat_id = message.chat_id;
        let mailbox = self
            .mailboxes
            .entry(chat_id)
            .or_insert_with(|| spawn_session(&mut self.tasks, &self.dispatcher, chat_id));

        match mailbox.try_send(message) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!(chat_id = %chat_id, "chat mailbox full; dropping message");
            }
            Err(TrySendError::Closed(returned)) => {
                let fresh = spawn_session(&mut self.tasks, &self.dispatcher, chat_id);
                if fresh.try_send(returned).is_err() {
                    tracing::warn!(chat_id = %chat_id, "could not restart chat session");
                }
                self.mailboxes.insert(chat_id, fresh);
            }
        }
    }
}

fn spawn_session(
    tasks: &mut JoinSet<()>,
    dispatcher: &Arc<CommandDispatcher>,
    chat_id: ChatId,
) -> mpsc::Sender<IncomingMessage> {
    let (sender, receiver) = mpsc::channel(MAILBOX_CAPACITY);
    let session_dispatcher = Arc::clone(dispatcher);

    tracing::debug!(chat_id = %chat_id, "starting chat session");
    tasks.spawn(async move {
        let mut listener = ChannelListener::new(receiver);
        loop {
            match tokio::time::timeout(SESSION_IDLE_TIMEOUT, listener.wait()).await {
                Ok(Some(message)) => session_dispatcher.dispatch(&message, &mut listener).await,
                Ok(None) => break,
                Err(_elapsed) => {
                    // Messages that raced the timeout are still served.
                    listener.close();
                    while let Some(message) = listener.wait().await {
                        session_dispatcher.dispatch(&message, &mut listener).await;
                    }
                    tracing::debug!(chat_id = %chat_id, "chat session idle");
                    break;
                }
            }
        }
        tracing::debug!(chat_id = %chat_id, "chat session closed");
    });

    sender
}
