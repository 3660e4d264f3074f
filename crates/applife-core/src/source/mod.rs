use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::{
    ComponentEvent, Error, LifecycleBroadcaster, LifecycleObserver, Result, TransitionDetector,
};

/// Receiver of raw component events
pub trait ComponentEventSink: Send + Sync {
    /// Handle the next component event
    ///
    /// Events must be delivered serialized, i.e. one after another
    /// and in the order of their occurrence.
    fn on_component_event(&self, event: ComponentEvent) -> Result<()>;
}

/// Host facility that emits component events
pub trait EventSource {
    /// Deliver all subsequent component events to the given sink
    fn attach(&self, sink: Arc<dyn ComponentEventSink>);
}

/// Application lifecycle inferred from the events of a host
///
/// Supposed to be created once per process by the application's entry
/// point. References should be passed on to all parties that need to
/// register observers.
///
/// Component events must be delivered serialized, e.g. through a single
/// queue. The detector is released before a detected signal is applied,
/// so events delivered concurrently from multiple threads might apply
/// their signals in reverse order.
#[derive(Debug)]
pub struct ApplicationLifecycle {
    detector: Mutex<TransitionDetector>,
    broadcaster: LifecycleBroadcaster,
}

impl ApplicationLifecycle {
    /// Start monitoring the component events of a host
    ///
    /// Fails if the event source is no longer available.
    pub fn attach<S>(event_source: &Weak<S>) -> Result<Arc<Self>>
    where
        S: EventSource + ?Sized,
    {
        let Some(event_source) = event_source.upgrade() else {
            log::error!("Cannot attach to a dropped event source");
            return Err(Error::EventSourceUnavailable);
        };
        let lifecycle = Arc::new(Self {
            detector: Mutex::new(TransitionDetector::new()),
            broadcaster: LifecycleBroadcaster::new(),
        });
        let sink: Arc<dyn ComponentEventSink> = lifecycle.clone();
        event_source.attach(sink);
        log::info!("Attached to event source");
        Ok(lifecycle)
    }

    /// Register an observer for state changes
    ///
    /// Observers are notified in the order of their registration.
    pub fn register(&self, observer: Arc<dyn LifecycleObserver>) {
        self.broadcaster.register(observer);
    }
}

impl ComponentEventSink for ApplicationLifecycle {
    fn on_component_event(&self, event: ComponentEvent) -> Result<()> {
        // Release the detector before dispatching to the observers
        let signal = self.detector.lock().observe(event);
        let Some(signal) = signal else {
            return Ok(());
        };
        log::debug!("Detected {:?} after {:?}", signal, event);
        self.broadcaster.apply_signal(signal).map(|_| ())
    }
}
