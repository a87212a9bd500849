//! Then steps for relay routing BDD scenarios.

use super::world::{FORWARD_CHAT, RelayWorld, run_async};
use anonrelay::relay::{
    adapters::memory::Delivery,
    domain::{MessageId, UserId},
    ports::TextFormat,
    services::{BANNED_NOTICE, DispatchOutcome, RelayError, RouteOutcome},
};
use rstest_bdd_macros::then;

#[then("the forward chat holds {count:usize} correspondence records")]
fn forward_chat_holds_records(world: &RelayWorld, count: usize) -> Result<(), eyre::Report> {
    let stored = world
        .store
        .value_count()
        .map_err(|err| eyre::eyre!("count stored records: {err}"))?;
    if stored != count {
        return Err(eyre::eyre!("expected {count} records, found {stored}"));
    }
    Ok(())
}

#[then("the forward chat shows an identity header for user {user:i64}")]
fn forward_chat_shows_header(world: &RelayWorld, user: i64) -> Result<(), eyre::Report> {
    let link = format!("tg://openmessage?user_id={user}");
    let found = world
        .transport
        .deliveries_to(FORWARD_CHAT)
        .iter()
        .any(|delivery| {
            matches!(
                delivery,
                Delivery::Text { message, .. }
                    if message.format() == TextFormat::MarkdownV2 && message.text().contains(&link)
            )
        });
    if !found {
        return Err(eyre::eyre!("no identity header for user {user} in the forward chat"));
    }
    Ok(())
}

#[then("user {user:i64} receives a copy threaded under message {original:i32}")]
fn user_receives_copy(world: &RelayWorld, user: i64, original: i32) -> Result<(), eyre::Report> {
    let operator_message = world
        .last_operator_message
        .ok_or_else(|| eyre::eyre!("no operator message in scenario world"))?;
    let chat = UserId::new(user).personal_chat();
    let copied = world.transport.deliveries_to(chat).iter().any(|delivery| {
        matches!(
            delivery,
            Delivery::Copy { from, message, reply_to, .. }
                if *from == FORWARD_CHAT
                    && *message == operator_message
                    && *reply_to == Some(MessageId::new(original))
        )
    });
    if !copied {
        return Err(eyre::eyre!(
            "user {user} did not receive a copy threaded under {original}: {:?}",
            world.transport.deliveries_to(chat)
        ));
    }
    Ok(())
}

fn ban_state(world: &RelayWorld, user: i64) -> Result<bool, eyre::Report> {
    run_async(world.gate.is_banned(UserId::new(user)))
        .map_err(|err| eyre::eyre!("check ban state: {err}"))
}

#[then("user {user:i64} is banned")]
fn user_is_banned(world: &RelayWorld, user: i64) -> Result<(), eyre::Report> {
    if !ban_state(world, user)? {
        return Err(eyre::eyre!("expected user {user} to be banned"));
    }
    Ok(())
}

#[then("user {user:i64} is not banned")]
fn user_is_not_banned(world: &RelayWorld, user: i64) -> Result<(), eyre::Report> {
    if ban_state(world, user)? {
        return Err(eyre::eyre!("expected user {user} not to be banned"));
    }
    Ok(())
}

#[then(r#"the operator sees the confirmation "{text}""#)]
fn operator_sees_confirmation(world: &RelayWorld, text: String) -> Result<(), eyre::Report> {
    let operator_message = world
        .last_operator_message
        .ok_or_else(|| eyre::eyre!("no operator message in scenario world"))?;
    let confirmed = world
        .transport
        .deliveries_to(FORWARD_CHAT)
        .iter()
        .any(|delivery| {
            matches!(
                delivery,
                Delivery::Text { message, .. }
                    if message.text() == text && message.reply_to() == Some(operator_message)
            )
        });
    if !confirmed {
        return Err(eyre::eyre!("no \"{text}\" confirmation in the forward chat"));
    }
    Ok(())
}

#[then("the forward chat receives nothing after the confirmation")]
fn forward_chat_quiet_after_confirmation(world: &RelayWorld) -> Result<(), eyre::Report> {
    let operator_message = world
        .last_operator_message
        .ok_or_else(|| eyre::eyre!("no operator message in scenario world"))?;
    let deliveries = world.transport.deliveries_to(FORWARD_CHAT);
    let last_is_confirmation = deliveries.last().is_some_and(|delivery| {
        matches!(
            delivery,
            Delivery::Text { message, .. } if message.reply_to() == Some(operator_message)
        )
    });
    if !last_is_confirmation {
        return Err(eyre::eyre!(
            "forward chat received deliveries after the confirmation: {deliveries:?}"
        ));
    }
    Ok(())
}

#[then("user {user:i64} is told they are banned")]
fn user_told_banned(world: &RelayWorld, user: i64) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing dispatch result"))?;
    let expected = DispatchOutcome::Routed(RouteOutcome::Rejected {
        sender: UserId::new(user),
    });
    if !matches!(result, Ok(outcome) if *outcome == expected) {
        return Err(eyre::eyre!("expected rejection, got {result:?}"));
    }

    let notified = world
        .transport
        .deliveries_to(UserId::new(user).personal_chat())
        .iter()
        .any(|delivery| {
            matches!(delivery, Delivery::Text { message, .. } if message.text() == BANNED_NOTICE)
        });
    if !notified {
        return Err(eyre::eyre!("user {user} did not receive the ban notice"));
    }
    Ok(())
}

#[then("routing fails because the message is untracked")]
fn routing_fails_untracked(world: &RelayWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing dispatch result"))?;
    if !matches!(result, Err(RelayError::NotFound(_))) {
        return Err(eyre::eyre!("expected NotFound error, got {result:?}"));
    }
    Ok(())
}

#[then("nothing is delivered")]
fn nothing_delivered(world: &RelayWorld) -> Result<(), eyre::Report> {
    let deliveries = world.transport.deliveries();
    if !deliveries.is_empty() {
        return Err(eyre::eyre!("expected no deliveries, got {deliveries:?}"));
    }
    Ok(())
}

#[then("the operators receive one error report")]
fn operators_receive_report(world: &RelayWorld) -> Result<(), eyre::Report> {
    let reports = world.notifier.reports();
    if reports.len() != 1 {
        return Err(eyre::eyre!("expected one error report, got {reports:?}"));
    }
    Ok(())
}
