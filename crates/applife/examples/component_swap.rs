//! Feeds a recorded sequence of component events into an
//! application lifecycle and prints all state changes.
//!
//! Run with `RUST_LOG=debug` to see how each event is handled.

use std::sync::Arc;

use self::host::Host;

use applife::core::{ApplicationLifecycle, ComponentEvent, LifecycleObserver};

use ComponentEvent::*;

mod host {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use applife::core::{ComponentEvent, ComponentEventSink, EventSource};

    #[derive(Default)]
    pub struct Host {
        sinks: Mutex<Vec<Arc<dyn ComponentEventSink>>>,
    }

    impl Host {
        pub fn emit(&self, event: ComponentEvent) -> applife::core::Result<()> {
            log::info!("Host emits {:?}", event);
            let sinks = self.sinks.lock().clone();
            for sink in sinks {
                sink.on_component_event(event)?;
            }
            Ok(())
        }
    }

    impl EventSource for Host {
        fn attach(&self, sink: Arc<dyn ComponentEventSink>) {
            self.sinks.lock().push(sink);
        }
    }
}

struct Printer(&'static str);

impl LifecycleObserver for Printer {
    fn on_foreground(&self) -> anyhow::Result<()> {
        println!("[{}] application entered the foreground", self.0);
        Ok(())
    }

    fn on_background(&self) -> anyhow::Result<()> {
        println!("[{}] application entered the background", self.0);
        Ok(())
    }
}

pub fn main() -> anyhow::Result<()> {
    env_logger::init();

    let host = Arc::new(Host::default());
    let lifecycle = ApplicationLifecycle::attach(&Arc::downgrade(&host))?;
    lifecycle.register(Arc::new(Printer("first")));
    lifecycle.register(Arc::new(Printer("second")));

    let sequences: &[(&str, &[ComponentEvent])] = &[
        ("launch main screen", &[Created, Started, Resumed]),
        (
            "open details screen",
            &[Paused, Created, Started, Resumed, Stopped, Saved],
        ),
        ("press home", &[Paused, Stopped, Saved]),
        ("return to the app", &[Started, Resumed]),
        ("close details screen", &[Paused, Started, Resumed, Stopped, Destroyed]),
    ];
    for (label, events) in sequences {
        println!("-- {label}");
        for event in events.iter().copied() {
            host.emit(event)?;
        }
    }

    Ok(())
}
