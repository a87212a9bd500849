//! When steps for relay routing BDD scenarios.

use super::world::{FORWARD_CHAT, RelayWorld, run_async};
use anonrelay::relay::{
    domain::{ChatInfo, InboundMessage, MessageId, SenderProfile, UserId},
    services::{DispatchOutcome, RouteOutcome},
};
use rstest_bdd_macros::when;

fn operator_reply(world: &mut RelayWorld, text: String, target: MessageId) {
    let id = world.allocate_operator_message();
    let message = InboundMessage::new(
        id,
        ChatInfo::new(FORWARD_CHAT).with_title("Inbox"),
        Some(SenderProfile::new(UserId::new(7), "Op")),
    )
    .replying_to(target)
    .with_text(text);
    world.last_result = Some(run_async(world.dispatcher.dispatch(&message)));
}

#[when(r#"user {user:i64} sends "{text}" as message {message:i32}"#)]
fn user_sends(world: &mut RelayWorld, user: i64, text: String, message: i32) {
    let sender = SenderProfile::new(UserId::new(user), "Ann");
    let inbound = InboundMessage::new(
        MessageId::new(message),
        ChatInfo::new(sender.id().personal_chat()).with_names("Ann", None),
        Some(sender),
    )
    .with_text(text);

    let result = run_async(world.dispatcher.dispatch(&inbound));
    if let Ok(DispatchOutcome::Routed(RouteOutcome::Relayed { content, .. })) = &result {
        world.last_relayed_content = Some(*content);
    }
    world.last_result = Some(result);
}

#[when(r#"an operator replies "{text}" to the relayed content"#)]
fn operator_replies_to_content(world: &mut RelayWorld, text: String) -> Result<(), eyre::Report> {
    let target = world
        .last_relayed_content
        .ok_or_else(|| eyre::eyre!("no relayed content in scenario world"))?;
    operator_reply(world, text, target);
    Ok(())
}

#[when(r#"an operator replies "{text}" to forward-chat message {target:i32}"#)]
fn operator_replies_to_message(world: &mut RelayWorld, text: String, target: i32) {
    operator_reply(world, text, MessageId::new(target));
}
