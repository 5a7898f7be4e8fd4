//! In-memory TTL cache for JSON documents
//!
//! Maps document names to JSON values with a fixed time-to-live. Entries that
//! outlive their TTL read as misses but are not removed until overwritten or
//! explicitly cleared. Expiry is measured against an injectable [`Clock`] so
//! TTL behavior can be tested without real timers.

mod cache;
mod clock;

pub use cache::{DocumentCache, DEFAULT_TTL};
pub use clock::{Clock, ManualClock, SystemClock};
