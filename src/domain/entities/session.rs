use std::fmt;
use thiserror::Error;

/// Lifecycle of the gateway connection. Linear, no re-entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unopened,
    Open,
    Closed,
}

/// A lifecycle step outside Unopened -> Open -> Closed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid session transition: {from} -> {to}")]
pub struct TransitionError {
    pub from: SessionState,
    pub to: SessionState,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Unopened => "unopened",
            SessionState::Open => "open",
            SessionState::Closed => "closed",
        }
    }

    /// Move to `next`, rejecting anything but Unopened -> Open -> Closed
    pub fn advance(self, next: SessionState) -> Result<SessionState, TransitionError> {
        match (self, next) {
            (SessionState::Unopened, SessionState::Open)
            | (SessionState::Open, SessionState::Closed) => Ok(next),
            _ => Err(TransitionError {
                from: self,
                to: next,
            }),
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
