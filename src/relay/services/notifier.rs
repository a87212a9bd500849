//! Operator notifier that broadcasts reports over the relay transport.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use crate::relay::{
    domain::{ChatId, ChatInfo},
    ports::{OperatorNotifier, OutgoingText, RelayTransport},
};

/// Formats the report sent to operators when processing a message fails.
#[must_use]
pub fn error_report(error: &dyn std::error::Error, chat: &ChatInfo) -> String {
    format!(
        "Error :c\n\n\t{error}\n\nAt: '{}' [{}]",
        chat.display_name(),
        chat.id()
    )
}

/// Sends every report to each operator chat in turn.
pub struct BroadcastNotifier<T>
where
    T: RelayTransport,
{
    transport: Arc<T>,
    operators: Vec<ChatId>,
}

impl<T> BroadcastNotifier<T>
where
    T: RelayTransport,
{
    /// Creates a notifier delivering to `operators` through `transport`.
    #[must_use]
    pub fn new(transport: Arc<T>, operators: impl IntoIterator<Item = ChatId>) -> Self {
        Self {
            transport,
            operators: operators.into_iter().collect(),
        }
    }
}

#[async_trait]
impl<T> OperatorNotifier for BroadcastNotifier<T>
where
    T: RelayTransport,
{
    async fn notify(&self, report: &str) {
        for &operator in &self.operators {
            if let Err(err) = self
                .transport
                .send_text(OutgoingText::new(operator, report))
                .await
            {
                warn!(%operator, error = %err, "failed to notify operator");
            }
        }
    }
}
