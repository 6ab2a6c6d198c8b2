use std::fmt;

use thiserror::Error;

/// Which of the two response parse passes failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    /// Reading the HTTP body after the status line arrived.
    Body,
    /// The outer SOAP envelope.
    Envelope,
    /// The `rastro` document embedded as text inside the envelope.
    Report,
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeStage::Body => write!(f, "response body"),
            DecodeStage::Envelope => write!(f, "envelope"),
            DecodeStage::Report => write!(f, "report"),
        }
    }
}

/// Failure of a single batch round trip.
///
/// `RequestBuild` and `Transport` halt the whole run; the other kinds only
/// discard the events of the batch they happened in.
#[derive(Error, Debug)]
pub enum TrackingError {
    #[error("Failed to build request envelope: {0}")]
    RequestBuild(String),
    #[error("Failed to reach tracking service: {0}")]
    Transport(String),
    #[error("Tracking service answered with status {status}: {body}")]
    ServiceStatus { status: u16, body: String },
    #[error("Failed to decode {stage}: {message}")]
    ResponseDecode { stage: DecodeStage, message: String },
}

impl TrackingError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, TrackingError::RequestBuild(_) | TrackingError::Transport(_))
    }
}
