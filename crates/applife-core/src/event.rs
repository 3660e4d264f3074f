use crate::CoarseState;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle event of a single component, as emitted by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
pub enum ComponentEvent {
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
    Saved,
    Destroyed,
}

impl ComponentEvent {
    /// Events that affect the inferred application state
    ///
    /// All other events are accepted but ignored.
    #[must_use]
    pub const fn is_relevant(self) -> bool {
        matches!(self, Self::Resumed | Self::Paused | Self::Stopped)
    }
}

/// Application-level transition inferred from component events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
pub enum TransitionSignal {
    /// The last visible component has been paused and stopped
    EnteredBackground,

    /// A component has been resumed after a pause/stop cycle
    EnteredForeground,
}

impl TransitionSignal {
    /// The state the application is in after the transition
    #[must_use]
    pub const fn target_state(self) -> CoarseState {
        match self {
            Self::EnteredBackground => CoarseState::Background,
            Self::EnteredForeground => CoarseState::Foreground,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_resume_pause_stop_are_relevant() {
        let relevant: Vec<_> = [
            ComponentEvent::Created,
            ComponentEvent::Started,
            ComponentEvent::Resumed,
            ComponentEvent::Paused,
            ComponentEvent::Stopped,
            ComponentEvent::Saved,
            ComponentEvent::Destroyed,
        ]
        .into_iter()
        .filter(|event| event.is_relevant())
        .collect();
        assert_eq!(
            vec![
                ComponentEvent::Resumed,
                ComponentEvent::Paused,
                ComponentEvent::Stopped
            ],
            relevant
        );
    }

    #[test]
    fn target_state_of_signals() {
        assert_eq!(
            CoarseState::Background,
            TransitionSignal::EnteredBackground.target_state()
        );
        assert_eq!(
            CoarseState::Foreground,
            TransitionSignal::EnteredForeground.target_state()
        );
    }

    #[cfg(feature = "with-serde")]
    #[test]
    fn serde_names() -> anyhow::Result<()> {
        assert_eq!(
            "\"paused\"",
            serde_json::to_string(&ComponentEvent::Paused)?
        );
        assert_eq!(
            TransitionSignal::EnteredBackground,
            serde_json::from_str("\"entered_background\"")?
        );
        Ok(())
    }
}
