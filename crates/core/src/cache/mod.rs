//! SQLite-backed flat key-value cache for rendered pages and the repository tree.
//!
//! This module provides a persistent string-to-string store using SQLite
//! with async access via tokio-rusqlite. It supports:
//!
//! - Keys taken verbatim from request paths
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//! - Typed JSON helpers for content records and the tree blob

pub mod connection;
pub mod hash;
pub mod kv;
pub mod migrations;

pub use crate::Error;

pub use connection::CacheDb;
pub use hash::content_etag;
pub use kv::TREE_KEY;
