//! Connection state machine for the tool registry

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Registry connection state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "lowercase")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Discovering,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid connection transition: {from} -> {to}")]
pub struct InvalidTransition {
    pub from: String,
    pub to: String,
}

impl ConnectionState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ConnectionState::Ready)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ConnectionState::Failed(_))
    }

    /// Whether a connection attempt is in progress
    pub fn is_busy(&self) -> bool {
        matches!(self, ConnectionState::Connecting | ConnectionState::Discovering)
    }

    /// Whether `self -> next` is an allowed transition
    pub fn can_transition_to(&self, next: &ConnectionState) -> bool {
        use ConnectionState::*;
        matches!(
            (self, next),
            (Disconnected | Failed(_) | Ready, Connecting)
                | (Connecting, Discovering)
                | (Connecting, Failed(_))
                | (Discovering, Ready)
                | (Discovering, Failed(_))
                | (Ready, Discovering)
                | (_, Disconnected)
        )
    }

    /// Move to `next`, rejecting transitions the machine does not allow
    pub fn transition(&self, next: ConnectionState) -> Result<ConnectionState, InvalidTransition> {
        if self.can_transition_to(&next) {
            Ok(next)
        } else {
            Err(InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        ConnectionState::Disconnected
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "disconnected"),
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Discovering => write!(f, "discovering"),
            ConnectionState::Ready => write!(f, "ready"),
            ConnectionState::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ConnectionState::*;

    #[test]
    fn test_happy_path() {
        let state = Disconnected
            .transition(Connecting)
            .and_then(|s| s.transition(Discovering))
            .and_then(|s| s.transition(Ready))
            .unwrap();
        assert!(state.is_ready());
    }

    #[test]
    fn test_failure_and_retry() {
        let failed = Connecting.transition(Failed("refused".into())).unwrap();
        assert!(failed.is_failed());
        assert_eq!(failed.to_string(), "failed: refused");
        assert_eq!(failed.transition(Connecting).unwrap(), Connecting);
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(Disconnected.transition(Ready).is_err());
        assert!(Connecting.transition(Ready).is_err());
        let err = Failed("x".into()).transition(Discovering).unwrap_err();
        assert_eq!(err.from, "failed: x");
        assert_eq!(err.to, "discovering");
    }

    #[test]
    fn test_refresh_from_ready() {
        assert!(Ready.can_transition_to(&Discovering));
        assert!(Ready.can_transition_to(&Disconnected));
        assert!(Discovering.is_busy());
    }
}
