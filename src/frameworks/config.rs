use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

// Runtime/server settings read from the environment.

pub const SUBSCRIBER_CHANNEL_CAPACITY: usize = 16;
pub const DB_MAX_CONNECTIONS: u32 = 5;

/// Which account store backs `/user_list` and `/create_user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStoreBackend {
    Memory,
    Postgres,
}

pub fn http_addr() -> SocketAddr {
    let host = env::var("GAME_STREAM_HOST")
        .ok()
        .and_then(|v| v.parse::<IpAddr>().ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    let port = env::var("GAME_STREAM_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5000);
    SocketAddr::new(host, port)
}

pub fn user_store_backend() -> Result<UserStoreBackend, String> {
    match env::var("USER_STORE") {
        Ok(value) => parse_backend(&value),
        Err(_) => Ok(UserStoreBackend::Memory),
    }
}

pub fn database_url() -> Option<String> {
    env::var("DATABASE_URL").ok().filter(|v| !v.is_empty())
}

pub fn retire_brokers_when_empty() -> bool {
    env::var("BROKER_RETIRE_WHEN_EMPTY")
        .ok()
        .and_then(|v| parse_flag(&v))
        .unwrap_or(true)
}

// `0` turns keep-alive comments off.
pub fn stream_keep_alive() -> Option<Duration> {
    let secs = env::var("SSE_KEEP_ALIVE_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(15);
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn parse_backend(value: &str) -> Result<UserStoreBackend, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "memory" => Ok(UserStoreBackend::Memory),
        "postgres" => Ok(UserStoreBackend::Postgres),
        other => Err(format!("unknown USER_STORE backend: {other}")),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
