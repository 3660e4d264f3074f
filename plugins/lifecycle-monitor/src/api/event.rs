use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Lifecycle(LifecycleEvent),
    Notification(NotificationEvent),
}

/// Common lifecycle events of the plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Started,
    Stopped,
    ConfigChanged(Config),
    StateChanged(State),
}

/// Regular notifications about the monitored application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    /// The application has switched into the given state
    Transition(CoarseState),

    /// A component event has been observed
    ///
    /// Only published if enabled by [`Config::publish_component_events`].
    ComponentEventObserved(ComponentEvent),
}
