use crate::ResultSender;

use super::{ComponentEvent, Config, ObserveEventOutcome, State};

#[derive(Debug)]
pub enum Command {
    ReplaceConfig(ResultSender<Config>, Config),
    SwitchState(ResultSender<()>, State),
    ObserveComponentEvent(ResultSender<ObserveEventOutcome>, ComponentEvent),
    Shutdown(ResultSender<()>),
}
