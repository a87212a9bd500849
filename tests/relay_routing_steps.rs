//! Behaviour tests for relay routing between end users and the forward chat.

#[path = "relay_routing_steps/mod.rs"]
mod relay_routing_steps_defs;

use relay_routing_steps_defs::world::{RelayWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/relay_routing.feature",
    name = "A personal message is relayed and the operator reply returns to the sender"
)]
#[tokio::test(flavor = "multi_thread")]
async fn relay_and_reply(world: RelayWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/relay_routing.feature",
    name = "A banned sender is refused without new records"
)]
#[tokio::test(flavor = "multi_thread")]
async fn banned_sender_is_refused(world: RelayWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/relay_routing.feature",
    name = "Unbanning lets the sender through again"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unban_restores_relaying(world: RelayWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/relay_routing.feature",
    name = "Replying to an untracked message fails without delivery"
)]
#[tokio::test(flavor = "multi_thread")]
async fn untracked_reply_fails(world: RelayWorld) {
    let _ = world;
}
