// FIXME: Enable `deny(missing_docs)` before release
//#![deny(missing_docs)]

#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::explicit_deref_methods)]
#![warn(clippy::explicit_into_iter_loop)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::must_use_candidate)]
#![warn(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(test), deny(clippy::panic_in_result_fn))]
#![cfg_attr(not(debug_assertions), deny(clippy::used_underscore_binding))]

//! Serializes component events from arbitrary threads through a
//! single message loop and publishes the inferred transitions of the
//! application as broadcast events.

use thiserror::Error;

use applife_plugin::EventPublisherId;

pub mod api;

mod internal;
use self::internal::message_loop::create_message_loop;

#[derive(Debug, Clone)]
pub struct Environment {
    pub event_publisher_id: EventPublisherId,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            event_publisher_id: DEFAULT_EVENT_PUBLISHER_ID,
        }
    }
}

#[must_use]
pub const fn default_config() -> api::Config {
    api::Config {
        publish_component_events: false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSetup {
    pub initial_config: api::Config,
    pub initial_state: api::State,
}

impl Default for PluginSetup {
    fn default() -> Self {
        Self {
            initial_config: default_config(),
            initial_state: api::State::Active,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] applife_core::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub type PluginError = applife_plugin::PluginError<Error>;
pub type PluginResult<T> = applife_plugin::PluginResult<T, Error>;

pub type MessageSender = applife_plugin::MessageSender<api::Message>;
pub type MessageReceiver = applife_plugin::MessageReceiver<api::Message>;

pub type ResultSender<T> = applife_plugin::ResultSender<T, Error>;
pub type ResultReceiver<T> = applife_plugin::ResultReceiver<T, Error>;

pub type PublishedEvent = applife_plugin::PublishedEvent<api::Event>;
pub type EventReceiver = applife_plugin::EventReceiver<api::Event>;
type EventPubSub = applife_plugin::EventPubSub<api::Event>;

pub type Plugin = applife_plugin::PluginContainer<api::Message, api::Event>;
pub type PluginPorts = applife_plugin::PluginPorts<api::Message, api::Event>;

pub const DEFAULT_EVENT_PUBLISHER_ID: EventPublisherId = "lifecycle-monitor";

#[must_use]
pub fn create_plugin(
    environment: Environment,
    plugin_setup: PluginSetup,
    event_channel_capacity: usize,
) -> Plugin {
    let Environment { event_publisher_id } = environment;
    let PluginSetup {
        initial_config,
        initial_state,
    } = plugin_setup;
    let (event_pubsub, event_subscriber) =
        EventPubSub::new(event_publisher_id, event_channel_capacity);
    let (message_loop, message_tx) =
        create_message_loop(event_pubsub, initial_config, initial_state);
    Plugin {
        ports: PluginPorts {
            message_tx,
            event_subscriber,
        },
        message_loop,
    }
}
