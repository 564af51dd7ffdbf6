use crate::domain::{IdGenerator, UserStore};
use crate::use_cases::BrokerRegistry;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

// Shared state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    // Directory of live game sessions.
    pub registry: Arc<BrokerRegistry>,
    // Account persistence, chosen at startup.
    pub users: Arc<dyn UserStore>,
    // Source of new game ids.
    pub game_ids: Arc<dyn IdGenerator>,
    pub stream: StreamSettings,
}

// Per-connection options for the event stream responses.
#[derive(Debug, Clone, Copy)]
pub struct StreamSettings {
    // Interval of SSE keep-alive comments; `None` leaves idle streams silent.
    pub keep_alive: Option<Duration>,
}

// Random UUID v4 game ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGameIds;

impl IdGenerator for UuidGameIds {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
