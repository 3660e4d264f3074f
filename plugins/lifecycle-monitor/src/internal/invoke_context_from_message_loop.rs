use applife_plugin::send_reply;

use crate::{
    api::{event::LifecycleEvent, ComponentEvent, Config, Event, ObserveEventOutcome, State, Status},
    EventPubSub, ResultSender,
};

use super::context::Context;

pub(crate) fn command_replace_config(
    context: &mut Context,
    event_pubsub: &EventPubSub,
    reply_tx: ResultSender<Config>,
    new_config: Config,
) {
    let old_config = context.replace_config(new_config.clone());
    let event = Event::Lifecycle(LifecycleEvent::ConfigChanged(new_config));
    event_pubsub.publish_event(event);
    send_reply(reply_tx, Ok(old_config));
}

pub(crate) fn command_switch_state(
    context: &mut Context,
    event_pubsub: &EventPubSub,
    reply_tx: ResultSender<()>,
    new_state: State,
) {
    if context.switch_state(new_state).is_some() {
        let event = Event::Lifecycle(LifecycleEvent::StateChanged(new_state));
        event_pubsub.publish_event(event);
    }
    send_reply(reply_tx, Ok(()));
}

pub(crate) fn command_observe_component_event(
    context: &mut Context,
    reply_tx: ResultSender<ObserveEventOutcome>,
    event: ComponentEvent,
) {
    let result = context.observe_component_event(event).map_err(|err| {
        log::warn!("Failed to observe component event {:?}: {}", event, err);
        err
    });
    send_reply(reply_tx, result);
}

pub(crate) fn command_shutdown(reply_tx: ResultSender<()>) {
    send_reply(reply_tx, Ok(()));
}

pub(crate) fn query_config(context: &Context, reply_tx: ResultSender<Config>) {
    send_reply(reply_tx, Ok(context.config().to_owned()));
}

pub(crate) fn query_status(context: &Context, reply_tx: ResultSender<Status>) {
    send_reply(reply_tx, Ok(context.status()));
}
