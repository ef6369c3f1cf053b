use chrono::{Local, NaiveDate, Utc};
use uuid::Uuid;

/// Fresh opaque entity id.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Milliseconds since epoch.
pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Today's calendar day in the local timezone.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Uniformly picks an index in `0..len`. `len` must be non-zero.
pub(crate) fn pick_index(len: usize) -> usize {
    (Uuid::new_v4().as_u128() % len as u128) as usize
}
