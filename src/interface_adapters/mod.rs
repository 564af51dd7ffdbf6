// Interface adapters: HTTP surface, payloads and storage adapters.

pub mod extract;
pub mod handlers;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod stores;
pub mod utils;
