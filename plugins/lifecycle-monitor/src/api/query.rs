use crate::ResultSender;

use super::{Config, Status};

#[derive(Debug)]
pub enum Query {
    Config(ResultSender<Config>),
    Status(ResultSender<Status>),
}
