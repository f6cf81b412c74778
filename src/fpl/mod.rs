//! Fantasy Premier League API access and data shaping
//!
//! - `http`: the remote client (no-cache GETs with a timeout)
//! - `types`: upstream response payloads
//! - `compute`: current-gameweek selection and ranking

pub mod compute;
pub mod http;
pub mod types;

pub use http::FplClient;
