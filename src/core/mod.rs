//! Core utilities shared by every upstream source
//!
//! - `http`: bounded-retry fetcher
//! - `join`: fail-fast and settle-all join strategies
//! - `dates`: date/number coercion for loosely typed payloads
//! - `literal`: restricted parser for script-embedded data literals

pub mod dates;
pub mod http;
pub mod join;
pub mod literal;

// Re-export commonly used items for convenience
pub use http::{FetchOptions, Fetcher, RetryPolicy, Sleeper, TokioSleeper};
pub use join::{join_all_or_fail, settle_all, settle_or_else};
pub use literal::{parse_literal, LiteralError};
