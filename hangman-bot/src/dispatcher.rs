use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::handlers::MessageHandler;
use crate::replies;
use crate::transport::{ChatTransport, deliver};
use hangman_types::{ChatId, InboundMessage};

const MAX_BACKOFF: Duration = Duration::from_secs(30);

struct Job {
    message: InboundMessage,
    done: oneshot::Sender<()>,
}

/// Routes messages to one worker task per chat. A chat's messages are
/// handled and answered in arrival order; different chats run concurrently.
pub struct Dispatcher {
    transport: Arc<dyn ChatTransport>,
    handler: MessageHandler,
    queues: DashMap<ChatId, mpsc::UnboundedSender<Job>>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn ChatTransport>, handler: MessageHandler) -> Self {
        Self {
            transport,
            handler,
            queues: DashMap::new(),
        }
    }

    /// Queue a message behind earlier ones from the same chat. The returned
    /// receiver resolves once its replies have been sent (or given up on).
    pub fn dispatch(&self, message: InboundMessage) -> oneshot::Receiver<()> {
        let (done, finished) = oneshot::channel();
        let chat_id = message.chat_id;
        let job = Job { message, done };

        let mut queue = self
            .queues
            .entry(chat_id)
            .or_insert_with(|| self.spawn_worker(chat_id));
        if let Err(mpsc::error::SendError(job)) = queue.send(job) {
            // The worker is gone; start a fresh one for this chat.
            warn!("Worker for chat {} stopped, restarting it", chat_id);
            *queue = self.spawn_worker(chat_id);
            if queue.send(job).is_err() {
                error!("Could not queue message for chat {}", chat_id);
            }
        }
        finished
    }

    fn spawn_worker(&self, chat_id: ChatId) -> mpsc::UnboundedSender<Job> {
        let (queue, mut jobs) = mpsc::unbounded_channel::<Job>();
        let transport = self.transport.clone();
        let handler = self.handler.clone();

        debug!("Starting worker for chat {}", chat_id);
        tokio::spawn(async move {
            while let Some(job) = jobs.recv().await {
                handle_one(transport.as_ref(), &handler, job.message).await;
                job.done.send(()).ok();
            }
        });
        queue
    }
}

/// Handle one message and deliver its replies. Handler panics stay inside
/// their own task; the sender gets the generic retry notice instead.
async fn handle_one(
    transport: &dyn ChatTransport,
    handler: &MessageHandler,
    message: InboundMessage,
) {
    let chat_id = message.chat_id;
    let worker = {
        let handler = handler.clone();
        let message = message.clone();
        tokio::spawn(async move { handler.handle_message(&message).await })
    };

    let responses = match worker.await {
        Ok(responses) => responses,
        Err(e) => {
            error!(
                "Handler failed for chat {} (message {:?}): {}",
                chat_id, message.text, e
            );
            vec![replies::generic_error()]
        }
    };

    for response in &responses {
        if let Err(e) = deliver(transport, chat_id, response).await {
            warn!("Failed to deliver reply to chat {}: {}", chat_id, e);
            break;
        }
    }
}

/// Long-poll the transport and dispatch every message until `shutdown`
/// resolves.
pub async fn run_polling(
    transport: Arc<dyn ChatTransport>,
    handler: MessageHandler,
    shutdown: impl Future<Output = ()>,
) {
    tokio::pin!(shutdown);
    let dispatcher = Dispatcher::new(transport.clone(), handler);
    let mut offset: Option<i64> = None;
    let mut backoff = Duration::from_secs(1);

    info!("Polling for chat updates");
    loop {
        let updates = tokio::select! {
            _ = &mut shutdown => {
                info!("Stopping update polling");
                return;
            }
            result = transport.fetch_updates(offset) => result,
        };

        let updates = match updates {
            Ok(updates) => {
                backoff = Duration::from_secs(1);
                updates
            }
            Err(e) => {
                warn!("Fetching updates failed: {}; retrying in {:?}", e, backoff);
                tokio::select! {
                    _ = &mut shutdown => {
                        info!("Stopping update polling");
                        return;
                    }
                    _ = tokio::time::sleep(backoff) => {}
                }
                backoff = (backoff * 2).min(MAX_BACKOFF);
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);
            match update.message {
                Some(message) => {
                    debug!("Update {} from chat {}", update.update_id, message.chat_id);
                    dispatcher.dispatch(message);
                }
                None => debug!("Skipping non-text update {}", update.update_id),
            }
        }
    }
}
