//! Shared world state for relay routing BDD scenarios.

use std::sync::Arc;

use anonrelay::relay::{
    adapters::memory::{InMemoryKeyValueStore, RecordingNotifier, RecordingTransport},
    domain::{ChatId, KeyNamespace, MessageId},
    services::{
        AccessGate, CorrespondenceLedger, DispatchOutcome, RelayResult, Router, RouterSettings,
        UpdateDispatcher,
    },
};
use rstest::fixture;

/// Forward chat used by every scenario.
pub const FORWARD_CHAT: ChatId = ChatId::new(-100);

/// Dispatcher type used by the BDD world.
pub type TestDispatcher =
    UpdateDispatcher<InMemoryKeyValueStore, RecordingTransport, RecordingNotifier>;

/// Scenario world for relay routing behaviour tests.
pub struct RelayWorld {
    pub store: Arc<InMemoryKeyValueStore>,
    pub transport: Arc<RecordingTransport>,
    pub notifier: Arc<RecordingNotifier>,
    pub gate: Arc<AccessGate<InMemoryKeyValueStore>>,
    pub dispatcher: TestDispatcher,
    pub next_operator_message: i32,
    pub last_operator_message: Option<MessageId>,
    pub last_relayed_content: Option<MessageId>,
    pub last_result: Option<RelayResult<DispatchOutcome>>,
}

impl RelayWorld {
    /// Creates a world around fresh in-memory adapters.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let transport = Arc::new(RecordingTransport::starting_at(MessageId::new(101)));
        let notifier = Arc::new(RecordingNotifier::new());
        let namespace = KeyNamespace::new(FORWARD_CHAT);
        let gate = Arc::new(AccessGate::new(Arc::clone(&store), &namespace));
        let ledger = CorrespondenceLedger::new(Arc::clone(&store), namespace);
        let router = Router::new(
            ledger,
            Arc::clone(&gate),
            Arc::clone(&transport),
            RouterSettings::new().with_bot_username("relay_bot"),
        );
        let dispatcher = UpdateDispatcher::new(
            router,
            Arc::clone(&transport),
            Arc::clone(&notifier),
            "Hello, send me anything",
        );

        Self {
            store,
            transport,
            notifier,
            gate,
            dispatcher,
            next_operator_message: 900,
            last_operator_message: None,
            last_relayed_content: None,
            last_result: None,
        }
    }

    /// Allocates the id of the next operator message in the forward chat.
    pub fn allocate_operator_message(&mut self) -> MessageId {
        let id = MessageId::new(self.next_operator_message);
        self.next_operator_message += 1;
        self.last_operator_message = Some(id);
        id
    }
}

impl Default for RelayWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> RelayWorld {
    RelayWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
