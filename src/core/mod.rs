//! Core utilities for the FPL standings service
//!
//! - `cache`: File system helpers backing the on-disk snapshot store

pub mod cache;

pub use cache::{default_cache_dir, snapshot_path, try_read_to_string, write_string};
