use std::sync::Arc;

use applife_core::{
    CoarseState, ComponentEvent, LifecycleBroadcaster, LifecycleObserver, SwitchStateOutcome,
    TransitionDetector,
};

use crate::{
    api::{event::NotificationEvent, Event},
    EventPubSub, Result,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Republish every observed component event as a notification
    pub publish_component_events: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Component events are discarded
    Inactive,

    /// Component events are observed
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub state: State,

    /// Number of component events that have been observed while active
    pub observed_events: u64,

    /// Number of transitions that have been published
    pub transitions: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserveEventOutcome {
    /// The event has been passed on to the detector
    Observed,

    /// The event has been discarded while inactive
    Discarded,
}

/// Publishes all transitions of the broadcaster
#[derive(Debug)]
struct TransitionPublisher {
    event_pubsub: EventPubSub,
}

impl TransitionPublisher {
    fn publish_transition(&self, state: CoarseState) {
        let event = Event::Notification(NotificationEvent::Transition(state));
        self.event_pubsub.publish_event(event);
    }
}

impl LifecycleObserver for TransitionPublisher {
    fn on_foreground(&self) -> anyhow::Result<()> {
        self.publish_transition(CoarseState::Foreground);
        Ok(())
    }

    fn on_background(&self) -> anyhow::Result<()> {
        self.publish_transition(CoarseState::Background);
        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct Context {
    config: Config,
    state: State,
    detector: TransitionDetector,
    broadcaster: LifecycleBroadcaster,
    event_pubsub: EventPubSub,
    observed_events: u64,
    transitions: u64,
}

impl Context {
    pub(crate) fn new(
        event_pubsub: EventPubSub,
        initial_config: Config,
        initial_state: State,
    ) -> Self {
        let broadcaster = LifecycleBroadcaster::new();
        broadcaster.register(Arc::new(TransitionPublisher {
            event_pubsub: event_pubsub.clone(),
        }));
        Self {
            config: initial_config,
            state: initial_state,
            detector: TransitionDetector::new(),
            broadcaster,
            event_pubsub,
            observed_events: 0,
            transitions: 0,
        }
    }

    pub(crate) const fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn status(&self) -> Status {
        Status {
            state: self.state,
            observed_events: self.observed_events,
            transitions: self.transitions,
        }
    }

    /// Returns the previous configuration
    pub(crate) fn replace_config(&mut self, new_config: Config) -> Config {
        std::mem::replace(&mut self.config, new_config)
    }

    /// Returns the previous state if changed
    pub(crate) fn switch_state(&mut self, new_state: State) -> Option<State> {
        if self.state == new_state {
            log::debug!("State unchanged: {:?}", self.state);
            return None;
        }
        let old_state = std::mem::replace(&mut self.state, new_state);
        log::info!("Switched state from {:?} to {:?}", old_state, new_state);
        Some(old_state)
    }

    pub(crate) fn observe_component_event(
        &mut self,
        event: ComponentEvent,
    ) -> Result<ObserveEventOutcome> {
        if self.state == State::Inactive {
            log::debug!("Discarding component event {:?} while inactive", event);
            return Ok(ObserveEventOutcome::Discarded);
        }
        self.observed_events += 1;
        if self.config.publish_component_events {
            let event = Event::Notification(NotificationEvent::ComponentEventObserved(event));
            self.event_pubsub.publish_event(event);
        }
        if let Some(signal) = self.detector.observe(event) {
            match self.broadcaster.apply_signal(signal)? {
                SwitchStateOutcome::Accepted { .. } => {
                    self.transitions += 1;
                }
                SwitchStateOutcome::Ignored => (),
            }
        }
        Ok(ObserveEventOutcome::Observed)
    }
}
