//! Error types for quorum-engine operations.

use thiserror::Error;

use crate::event::Timeframe;

#[derive(Error, Debug)]
pub enum QuorumError {
    #[error("Invalid duration: {duration}h does not fit the {timeframe} window")]
    InvalidDuration {
        duration: u32,
        timeframe: Timeframe,
    },

    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("Unknown event: {0}")]
    UnknownEvent(String),
}

pub type Result<T> = std::result::Result<T, QuorumError>;
