use std::{
    sync::{mpsc, Arc},
    thread,
};

use parking_lot::Mutex;

use applife_core::{
    ApplicationLifecycle, CoarseState, ComponentEvent, ComponentEventSink, Error, EventSource,
    LifecycleObserver,
};

use ComponentEvent::*;

/// Simulated host that forwards events to all attached sinks
#[derive(Default)]
struct Host {
    sinks: Mutex<Vec<Arc<dyn ComponentEventSink>>>,
}

impl Host {
    fn emit(&self, event: ComponentEvent) -> applife_core::Result<()> {
        let sinks = self.sinks.lock().clone();
        for sink in sinks {
            sink.on_component_event(event)?;
        }
        Ok(())
    }

    fn emit_all(&self, events: impl IntoIterator<Item = ComponentEvent>) -> anyhow::Result<()> {
        for event in events {
            self.emit(event)?;
        }
        Ok(())
    }
}

impl EventSource for Host {
    fn attach(&self, sink: Arc<dyn ComponentEventSink>) {
        self.sinks.lock().push(sink);
    }
}

type Journal = Arc<Mutex<Vec<(usize, CoarseState)>>>;

struct Recorder {
    id: usize,
    journal: Journal,
}

impl LifecycleObserver for Recorder {
    fn on_foreground(&self) -> anyhow::Result<()> {
        self.journal.lock().push((self.id, CoarseState::Foreground));
        Ok(())
    }

    fn on_background(&self) -> anyhow::Result<()> {
        self.journal.lock().push((self.id, CoarseState::Background));
        Ok(())
    }
}

fn attach_with_recorders(host: &Arc<Host>, count: usize) -> anyhow::Result<Journal> {
    let lifecycle = ApplicationLifecycle::attach(&Arc::downgrade(host))?;
    let journal = Journal::default();
    for id in 0..count {
        lifecycle.register(Arc::new(Recorder {
            id,
            journal: Arc::clone(&journal),
        }));
    }
    Ok(journal)
}

#[test]
fn first_resume_notifies_nobody() -> anyhow::Result<()> {
    let host = Arc::new(Host::default());
    let journal = attach_with_recorders(&host, 1)?;

    host.emit_all([Created, Started, Resumed])?;

    assert!(journal.lock().is_empty());
    Ok(())
}

#[test]
fn background_then_foreground() -> anyhow::Result<()> {
    let host = Arc::new(Host::default());
    let journal = attach_with_recorders(&host, 1)?;

    host.emit_all([Created, Started, Resumed, Paused, Stopped, Saved])?;
    assert_eq!(vec![(0, CoarseState::Background)], *journal.lock());

    host.emit_all([Started, Resumed])?;
    assert_eq!(
        vec![(0, CoarseState::Background), (0, CoarseState::Foreground)],
        *journal.lock()
    );

    Ok(())
}

#[test]
fn pause_and_resume_without_stop_notifies_nobody() -> anyhow::Result<()> {
    let host = Arc::new(Host::default());
    let journal = attach_with_recorders(&host, 1)?;

    host.emit_all([Paused, Resumed])?;

    assert!(journal.lock().is_empty());
    Ok(())
}

#[test]
fn switching_between_components_notifies_nobody() -> anyhow::Result<()> {
    let host = Arc::new(Host::default());
    let journal = attach_with_recorders(&host, 1)?;

    host.emit_all([Created, Started, Resumed])?;
    // The second component takes over before the first one is stopped
    host.emit_all([Paused, Created, Started, Resumed, Stopped, Saved])?;
    // ...and back again
    host.emit_all([Paused, Started, Resumed, Stopped, Destroyed])?;

    assert!(journal.lock().is_empty());
    Ok(())
}

#[test]
fn stop_without_pause_notifies_nobody() -> anyhow::Result<()> {
    let host = Arc::new(Host::default());
    let journal = attach_with_recorders(&host, 1)?;

    host.emit(Stopped)?;

    assert!(journal.lock().is_empty());
    Ok(())
}

#[test]
fn repeated_background_cycles_notify_once() -> anyhow::Result<()> {
    let host = Arc::new(Host::default());
    let journal = attach_with_recorders(&host, 1)?;

    host.emit_all([Paused, Stopped, Paused, Stopped])?;

    assert_eq!(vec![(0, CoarseState::Background)], *journal.lock());
    Ok(())
}

#[test]
fn observers_are_notified_in_registration_order() -> anyhow::Result<()> {
    let host = Arc::new(Host::default());
    let journal = attach_with_recorders(&host, 3)?;

    host.emit_all([Resumed, Paused, Stopped])?;

    assert_eq!(
        vec![
            (0, CoarseState::Background),
            (1, CoarseState::Background),
            (2, CoarseState::Background),
        ],
        *journal.lock()
    );
    Ok(())
}

struct Rejecting;

impl LifecycleObserver for Rejecting {
    fn on_foreground(&self) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_background(&self) -> anyhow::Result<()> {
        anyhow::bail!("not now")
    }
}

#[test]
fn observer_failure_is_propagated_to_the_host() -> anyhow::Result<()> {
    let host = Arc::new(Host::default());
    let lifecycle = ApplicationLifecycle::attach(&Arc::downgrade(&host))?;
    let journal = Journal::default();
    lifecycle.register(Arc::new(Rejecting));
    lifecycle.register(Arc::new(Recorder {
        id: 1,
        journal: Arc::clone(&journal),
    }));

    host.emit(Paused)?;
    let err = host.emit(Stopped).unwrap_err();
    assert!(matches!(
        err,
        Error::Observer {
            state: CoarseState::Background,
            ..
        }
    ));
    assert!(journal.lock().is_empty());

    // Processing continues with the next event
    host.emit(Resumed)?;
    assert_eq!(vec![(1, CoarseState::Foreground)], *journal.lock());

    Ok(())
}

#[test]
fn events_from_multiple_threads_serialized_through_a_queue() -> anyhow::Result<()> {
    const CYCLES: usize = 100;

    let host = Arc::new(Host::default());
    let journal = attach_with_recorders(&host, 2)?;

    let (event_tx, event_rx) = mpsc::channel::<Vec<ComponentEvent>>();
    let consumer = {
        let host = Arc::clone(&host);
        thread::spawn(move || -> applife_core::Result<()> {
            while let Ok(batch) = event_rx.recv() {
                for event in batch {
                    host.emit(event)?;
                }
            }
            Ok(())
        })
    };
    let producers: Vec<_> = (0..4)
        .map(|_| {
            let event_tx = event_tx.clone();
            thread::spawn(move || {
                for _ in 0..CYCLES {
                    // Each batch covers a complete background/foreground cycle
                    let batch = vec![Paused, Stopped, Started, Resumed];
                    if event_tx.send(batch).is_err() {
                        break;
                    }
                }
            })
        })
        .collect();
    drop(event_tx);
    for producer in producers {
        producer.join().expect("producer thread");
    }
    consumer.join().expect("consumer thread")?;

    let journal = journal.lock();
    assert_eq!(4 * CYCLES * 2 * 2, journal.len());
    // Notifications strictly alternate and observers keep their order
    for (index, pair) in journal.chunks(2).enumerate() {
        let expected_state = if index % 2 == 0 {
            CoarseState::Background
        } else {
            CoarseState::Foreground
        };
        assert_eq!(&[(0, expected_state), (1, expected_state)], pair);
    }

    Ok(())
}

#[test]
fn attach_after_a_panic_while_the_host_was_locked() -> anyhow::Result<()> {
    let host = Arc::new(Host::default());
    let panicked = {
        let host = Arc::clone(&host);
        thread::spawn(move || {
            let _sinks = host.sinks.lock();
            panic!("host failed while holding its sinks");
        })
        .join()
    };
    assert!(panicked.is_err());

    // The lock is not poisoned, the sink is attached regardless
    let journal = attach_with_recorders(&host, 1)?;
    host.emit_all([Paused, Stopped])?;

    assert_eq!(vec![(0, CoarseState::Background)], *journal.lock());
    Ok(())
}
