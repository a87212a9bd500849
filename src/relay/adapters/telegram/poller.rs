//! Long-polling update loop.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{TelegramClient, TelegramResult, inbound_message};
use crate::relay::{
    domain::InboundMessage,
    ports::{KeyValueStore, OperatorNotifier, RelayTransport},
    services::UpdateDispatcher,
};

/// Long-poll timeout passed to `getUpdates`, in seconds.
pub const DEFAULT_POLL_TIMEOUT_SECS: u32 = 30;

/// Pause before polling again after a failed `getUpdates` call.
const RETRY_DELAY: Duration = Duration::from_secs(3);

/// Fetches `message` updates and hands them out one at a time.
pub struct UpdatePoller {
    client: Arc<TelegramClient>,
    offset: Option<i64>,
    timeout_secs: u32,
}

impl UpdatePoller {
    /// Creates a poller starting from the oldest unconfirmed update.
    #[must_use]
    pub const fn new(client: Arc<TelegramClient>, timeout_secs: u32) -> Self {
        Self {
            client,
            offset: None,
            timeout_secs,
        }
    }

    /// Fetches the next batch of relayable messages.
    ///
    /// Every fetched update is confirmed, including the ones without a
    /// relayable message.
    ///
    /// # Errors
    ///
    /// Returns [`super::TelegramError`] when `getUpdates` fails; the offset is
    /// left unchanged so the batch is fetched again.
    pub async fn next_batch(&mut self) -> TelegramResult<Vec<InboundMessage>> {
        let updates = self
            .client
            .get_updates(self.offset, self.timeout_secs)
            .await?;
        if let Some(last) = updates.last() {
            self.offset = Some(last.update_id + 1);
        }
        Ok(updates
            .into_iter()
            .filter_map(|update| update.message)
            .filter_map(inbound_message)
            .collect())
    }

    /// Dispatches messages serially until `shutdown` resolves.
    ///
    /// Each message is handled to completion before the next one starts.
    /// Polling failures are logged and retried after a short pause.
    pub async fn run<S, T, N>(
        &mut self,
        dispatcher: &UpdateDispatcher<S, T, N>,
        shutdown: impl Future<Output = ()>,
    ) where
        S: KeyValueStore,
        T: RelayTransport,
        N: OperatorNotifier,
    {
        tokio::pin!(shutdown);
        info!("polling for updates");
        loop {
            let batch = tokio::select! {
                () = &mut shutdown => break,
                batch = self.next_batch() => batch,
            };

            match batch {
                Ok(messages) => {
                    for message in messages {
                        if let Err(err) = dispatcher.dispatch(&message).await {
                            debug!(error = %err, "message dropped after reporting");
                        }
                    }
                }
                Err(err) => {
                    warn!(error = %err, "failed to fetch updates");
                    tokio::time::sleep(RETRY_DELAY).await;
                }
            }
        }
        info!("polling stopped");
    }
}
