use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Opaque token identifying one live game session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameId(Arc<str>);

impl GameId {
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for GameId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl From<&str> for GameId {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

// Lets the registry map be queried with a plain `&str` from the request path.
impl Borrow<str> for GameId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identity of one subscriber channel within a broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Account record owned by the user store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}
