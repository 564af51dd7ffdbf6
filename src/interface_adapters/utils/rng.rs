use crate::domain::SubscriberId;
use std::sync::atomic::{AtomicU64, Ordering};

/// Returns a process-unique subscriber id.
///
/// Ids only need to be distinct within one broker, but a single counter keeps
/// them unique across sessions too, which makes log lines easy to correlate.
pub fn next_subscriber_id() -> SubscriberId {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    SubscriberId(COUNTER.fetch_add(1, Ordering::Relaxed))
}
