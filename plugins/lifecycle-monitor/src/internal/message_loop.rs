use applife_plugin::{message_channel, MessageLoop};

use crate::{
    api::{event::LifecycleEvent, Command, Config, Event, Message, Query, State},
    EventPubSub, MessageSender,
};

use super::{context::Context, invoke_context_from_message_loop};

pub(crate) fn create_message_loop(
    event_pubsub: EventPubSub,
    initial_config: Config,
    initial_state: State,
) -> (MessageLoop, MessageSender) {
    let (message_tx, mut message_rx) = message_channel();
    let mut context = Context::new(event_pubsub.clone(), initial_config, initial_state);
    let message_loop = async move {
        let mut exit_message_loop = false;
        log::info!("Starting message loop");
        event_pubsub.publish_event(Event::Lifecycle(LifecycleEvent::Started));
        while let Some(msg) = message_rx.recv().await {
            match msg {
                Message::Command(command) => {
                    log::trace!("Received command {:?}", command);
                    match command {
                        Command::ReplaceConfig(reply_tx, new_config) => {
                            invoke_context_from_message_loop::command_replace_config(
                                &mut context,
                                &event_pubsub,
                                reply_tx,
                                new_config,
                            );
                        }
                        Command::SwitchState(reply_tx, new_state) => {
                            invoke_context_from_message_loop::command_switch_state(
                                &mut context,
                                &event_pubsub,
                                reply_tx,
                                new_state,
                            );
                        }
                        Command::ObserveComponentEvent(reply_tx, event) => {
                            invoke_context_from_message_loop::command_observe_component_event(
                                &mut context,
                                reply_tx,
                                event,
                            );
                        }
                        Command::Shutdown(reply_tx) => {
                            invoke_context_from_message_loop::command_shutdown(reply_tx);
                            exit_message_loop = true;
                        }
                    }
                }
                Message::Query(query) => {
                    log::debug!("Received query {:?}", query);
                    match query {
                        Query::Config(reply_tx) => {
                            invoke_context_from_message_loop::query_config(&context, reply_tx);
                        }
                        Query::Status(reply_tx) => {
                            invoke_context_from_message_loop::query_status(&context, reply_tx);
                        }
                    }
                }
            }
            if exit_message_loop {
                log::info!("Exiting message loop");
                break;
            }
        }
        log::info!("Message loop terminated");
        event_pubsub.publish_event(Event::Lifecycle(LifecycleEvent::Stopped));
    };
    (Box::pin(message_loop), message_tx)
}
