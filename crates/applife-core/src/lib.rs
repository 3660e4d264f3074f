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

//! Infers whether an application is in the foreground or in the
//! background from the lifecycle events of its individual components.
//!
//! The raw events are fed into a [`TransitionDetector`] that recognizes
//! the pause/stop pattern of the last visible component. The resulting
//! [`TransitionSignal`]s are applied to a [`LifecycleBroadcaster`] that
//! notifies its observers only on actual state changes.
//!
//! [`ApplicationLifecycle`] wires both together and attaches itself
//! to a host [`EventSource`].

use thiserror::Error;

mod event;
pub use self::event::{ComponentEvent, TransitionSignal};

pub mod broadcaster;
pub use self::broadcaster::{
    CoarseState, LifecycleBroadcaster, LifecycleObserver, SwitchStateOutcome,
};

pub mod detector;
pub use self::detector::TransitionDetector;

pub mod source;
pub use self::source::{ApplicationLifecycle, ComponentEventSink, EventSource};

#[derive(Error, Debug)]
pub enum Error {
    /// The handle to the host event source is dangling
    #[error("event source unavailable")]
    EventSourceUnavailable,

    /// An observer failed while being notified about a state change
    ///
    /// Observers registered after the failing one have not been notified.
    #[error("observer failed after switching to {state}")]
    Observer {
        state: CoarseState,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
