use std::{fmt, sync::Arc};

use parking_lot::{const_mutex, Mutex};

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result, TransitionSignal};

/// Coarse visibility of the whole application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
pub enum CoarseState {
    Foreground,
    Background,
}

impl CoarseState {
    /// Default value
    ///
    /// The application is assumed to be visible when monitoring starts.
    pub const fn default() -> Self {
        Self::Foreground
    }
}

impl Default for CoarseState {
    fn default() -> Self {
        Self::default()
    }
}

impl fmt::Display for CoarseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Foreground => "foreground",
            Self::Background => "background",
        };
        f.write_str(label)
    }
}

/// Callback interface for application state changes
///
/// Invoked synchronously while the broadcaster is locked. Implementations
/// must neither block for long nor call back into the broadcaster.
pub trait LifecycleObserver: Send + Sync {
    /// The application has returned into the foreground
    fn on_foreground(&self) -> anyhow::Result<()>;

    /// The application has been moved into the background
    fn on_background(&self) -> anyhow::Result<()>;
}

/// The observed effect of applying a [`TransitionSignal`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchStateOutcome {
    /// State changed and all observers have been notified
    Accepted { previous_state: CoarseState },

    /// Unchanged, i.e. already in the signaled state
    Ignored,
}

struct BroadcasterState {
    current: CoarseState,
    observers: Vec<Arc<dyn LifecycleObserver>>,
}

/// Owns the application state and notifies observers about changes
///
/// Notifications are edge-triggered: Observers are only invoked if a
/// signal actually changes the state. Repeated signals of the same
/// kind are ignored.
///
/// Observers are invoked in the order of their registration. The same
/// observer might be registered multiple times and will then be notified
/// multiple times. Observers cannot be unregistered.
pub struct LifecycleBroadcaster {
    // Guards the whole read-compare-write-dispatch sequence
    state: Mutex<BroadcasterState>,
}

impl LifecycleBroadcaster {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: const_mutex(BroadcasterState {
                current: CoarseState::default(),
                observers: Vec::new(),
            }),
        }
    }

    /// Append an observer
    ///
    /// Must not be invoked from within an observer callback.
    pub fn register(&self, observer: Arc<dyn LifecycleObserver>) {
        let mut state = self.state.lock();
        state.observers.push(observer);
        log::debug!("Registered observer #{}", state.observers.len());
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.state.lock().observers.len()
    }

    /// Apply a signal and notify all observers on a state change
    ///
    /// The state is switched before the observers are notified. If
    /// an observer fails then the remaining observers are skipped and
    /// the error is returned. The switched state is retained.
    pub fn apply_signal(&self, signal: TransitionSignal) -> Result<SwitchStateOutcome> {
        let mut state = self.state.lock();
        let desired_state = signal.target_state();
        if state.current == desired_state {
            log::debug!("Ignoring {:?} while in {}", signal, desired_state);
            return Ok(SwitchStateOutcome::Ignored);
        }
        let previous_state = std::mem::replace(&mut state.current, desired_state);
        log::info!("Switched from {} to {}", previous_state, desired_state);
        for (index, observer) in state.observers.iter().enumerate() {
            let notified = match desired_state {
                CoarseState::Foreground => observer.on_foreground(),
                CoarseState::Background => observer.on_background(),
            };
            if let Err(err) = notified {
                log::warn!(
                    "Observer #{} failed to handle {}: {}",
                    index + 1,
                    desired_state,
                    err
                );
                return Err(Error::Observer {
                    state: desired_state,
                    source: err,
                });
            }
        }
        Ok(SwitchStateOutcome::Accepted { previous_state })
    }
}

impl Default for LifecycleBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LifecycleBroadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("LifecycleBroadcaster")
            .field("current", &state.current)
            .field("observers", &state.observers.len())
            .finish()
    }
}
