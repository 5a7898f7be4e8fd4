//! Cached client for a remote JSON file store
//!
//! This crate wraps a simple HTTP key-value file store behind four
//! operations: read, write, delete, and list. Reads go through an in-memory
//! TTL cache; writes retry transient failures with capped exponential
//! backoff. None of the public operations return errors: failures are logged
//! and absorbed into a fallback value (the caller's default, `false`, or an
//! empty list), so callers never have to unwind a network problem.
//!
//! # Example
//!
//! ```no_run
//! use filestore_client::FilestoreClient;
//! use serde_json::json;
//!
//! # async fn example() {
//! let client = FilestoreClient::new("http://localhost:3000/api");
//!
//! // Missing documents resolve to the caller's default.
//! let settings = client
//!     .fetch_data("settings", json!({"theme": "light"}), true)
//!     .await;
//!
//! // Writes retry twice by default before giving up.
//! if !client.save_data("settings", &settings, true, 2).await {
//!     eprintln!("settings were not saved");
//! }
//! # }
//! ```
//!
//! # Wire contract
//!
//! - `GET    {base}/data/{name}` → `{"data": <payload>}`; 404 means absent
//! - `POST   {base}/data` with `{"filename": ..., "data": ...}` → `{"success": bool}`
//! - `DELETE {base}/data/{name}` → 2xx on success
//! - `GET    {base}/data` → `{"files": [...]}`

mod client;
mod error;
mod retry;
mod types;

pub use client::{FilestoreClient, DEFAULT_MAX_RETRIES};
pub use error::{FilestoreError, Result};
pub use json_ttl_cache::{DocumentCache, ManualClock, SystemClock, DEFAULT_TTL};
pub use retry::backoff_delay;
