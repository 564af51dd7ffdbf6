use super::entities::GameId;
use std::fmt;

// Errors surfaced by a broker handle once its loop has stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrokerError {
    Retired,
}

impl fmt::Display for BrokerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrokerError::Retired => f.write_str("game session has ended"),
        }
    }
}

/// Errors returned by broker registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A broker is already registered under this id.
    AlreadyExists(GameId),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::AlreadyExists(game_id) => {
                write!(f, "game session {game_id} already exists")
            }
        }
    }
}

// Domain-level errors for account workflows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    InvalidName,
    // Carries the store's own message so callers can surface it.
    StorageFailure(String),
}
