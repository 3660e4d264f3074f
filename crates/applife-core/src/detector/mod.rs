use crate::{ComponentEvent, TransitionSignal};

/// Infers application-level transitions from component events
///
/// Only a single component is expected to be in transition at
/// any time, i.e. events must be delivered serialized.
///
/// The application has been moved into the background if and only if
/// a component has been paused and then stopped without any other
/// component being resumed in between. Component swaps within the
/// application produce a resume between the pause and the stop and
/// therefore never match.
///
/// ```puml
/// @startuml
/// [*] --> Empty
/// Empty --> Pending: Paused
/// Empty --> Empty: Stopped / evaluate
/// Pending --> Pending: Paused, Resumed
/// Pending --> Empty: Stopped / evaluate
/// @enduml
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransitionDetector {
    /// Events of the current window, cleared after each evaluation
    history: Vec<ComponentEvent>,

    /// Set after the first pause or stop has been observed
    cycle_started: bool,
}

impl TransitionDetector {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            history: Vec::new(),
            cycle_started: false,
        }
    }

    /// Events of the current window that are awaiting evaluation
    #[must_use]
    pub fn pending(&self) -> &[ComponentEvent] {
        &self.history
    }

    /// Observe the next component event
    ///
    /// Returns a signal if the event completes a transition. The signal
    /// is not necessarily an actual state change, i.e. repeated signals
    /// of the same kind are expected and must be tolerated by the
    /// receiver.
    pub fn observe(&mut self, event: ComponentEvent) -> Option<TransitionSignal> {
        log::trace!("Observing component event {:?}", event);
        match event {
            ComponentEvent::Resumed => {
                // A resume never opens a new window
                if !self.history.is_empty() {
                    self.history.push(event);
                }
                if !self.cycle_started {
                    log::debug!("Ignoring resume before the first pause/stop cycle");
                    return None;
                }
                Some(TransitionSignal::EnteredForeground)
            }
            ComponentEvent::Paused => {
                self.cycle_started = true;
                self.history.push(event);
                None
            }
            ComponentEvent::Stopped => {
                self.cycle_started = true;
                self.history.push(event);
                self.evaluate_and_reset()
            }
            ComponentEvent::Created
            | ComponentEvent::Started
            | ComponentEvent::Saved
            | ComponentEvent::Destroyed => None,
        }
    }

    fn evaluate_and_reset(&mut self) -> Option<TransitionSignal> {
        // Only the leading pair matters, subsequent entries are irrelevant
        let matched = matches!(
            self.history.as_slice(),
            [ComponentEvent::Paused, ComponentEvent::Stopped, ..]
        );
        if !matched {
            log::debug!("No transition detected in window {:?}", self.history);
        }
        self.history.clear();
        matched.then_some(TransitionSignal::EnteredBackground)
    }
}
