//! Recording transport for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::relay::{
    domain::{ChatId, MessageId},
    ports::{DeliveryError, DeliveryResult, OutgoingText, RelayTransport},
};

/// One delivery performed through [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// A text message was sent.
    Text {
        /// The message as requested.
        message: OutgoingText,
        /// Id assigned in the destination chat.
        assigned: MessageId,
    },
    /// A message was forwarded.
    Forward {
        /// Destination chat.
        to: ChatId,
        /// Source chat.
        from: ChatId,
        /// Source message.
        message: MessageId,
        /// Id assigned in the destination chat.
        assigned: MessageId,
    },
    /// A message was copied.
    Copy {
        /// Destination chat.
        to: ChatId,
        /// Source chat.
        from: ChatId,
        /// Source message.
        message: MessageId,
        /// Message replied to in the destination chat.
        reply_to: Option<MessageId>,
        /// Id assigned in the destination chat.
        assigned: MessageId,
    },
}

impl Delivery {
    /// Returns the destination chat.
    #[must_use]
    pub const fn destination(&self) -> ChatId {
        match self {
            Self::Text { message, .. } => message.chat(),
            Self::Forward { to, .. } | Self::Copy { to, .. } => *to,
        }
    }

    /// Returns the id assigned in the destination chat.
    #[must_use]
    pub const fn assigned(&self) -> MessageId {
        match self {
            Self::Text { assigned, .. }
            | Self::Forward { assigned, .. }
            | Self::Copy { assigned, .. } => *assigned,
        }
    }
}

/// Thread-safe transport that records every delivery and assigns
/// sequential message ids.
///
/// Clones share the same log.
#[derive(Debug, Clone)]
pub struct RecordingTransport {
    state: Arc<RwLock<RecordingState>>,
}

#[derive(Debug)]
struct RecordingState {
    next_id: i32,
    deliveries: Vec<Delivery>,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::starting_at(MessageId::new(1))
    }
}

impl RecordingTransport {
    /// Creates a transport assigning ids from 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport assigning ids from `first`.
    #[must_use]
    pub fn starting_at(first: MessageId) -> Self {
        Self {
            state: Arc::new(RwLock::new(RecordingState {
                next_id: first.value(),
                deliveries: Vec::new(),
            })),
        }
    }

    /// Returns every delivery in order.
    #[must_use]
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.state
            .read()
            .map(|state| state.deliveries.clone())
            .unwrap_or_default()
    }

    /// Returns the deliveries made into `chat`.
    #[must_use]
    pub fn deliveries_to(&self, chat: ChatId) -> Vec<Delivery> {
        self.deliveries()
            .into_iter()
            .filter(|delivery| delivery.destination() == chat)
            .collect()
    }

    fn record(&self, build: impl FnOnce(MessageId) -> Delivery) -> DeliveryResult<MessageId> {
        let mut state = self
            .state
            .write()
            .map_err(|err| DeliveryError::unavailable(std::io::Error::other(err.to_string())))?;
        let assigned = MessageId::new(state.next_id);
        state.next_id += 1;
        state.deliveries.push(build(assigned));
        Ok(assigned)
    }
}

#[async_trait]
impl RelayTransport for RecordingTransport {
    async fn send_text(&self, message: OutgoingText) -> DeliveryResult<MessageId> {
        self.record(|assigned| Delivery::Text { message, assigned })
    }

    async fn forward(
        &self,
        to: ChatId,
        from: ChatId,
        message: MessageId,
    ) -> DeliveryResult<MessageId> {
        self.record(|assigned| Delivery::Forward {
            to,
            from,
            message,
            assigned,
        })
    }

    async fn copy(
        &self,
        to: ChatId,
        from: ChatId,
        message: MessageId,
        reply_to: Option<MessageId>,
    ) -> DeliveryResult<MessageId> {
        self.record(|assigned| Delivery::Copy {
            to,
            from,
            message,
            reply_to,
            assigned,
        })
    }
}
