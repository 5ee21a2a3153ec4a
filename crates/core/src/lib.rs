//! Core types and shared functionality for presskit.
//!
//! This crate provides:
//! - Flat key-value cache with SQLite backend
//! - The cached content record
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod content;
pub mod error;

pub use cache::{CacheDb, TREE_KEY};
pub use config::{AppConfig, ConfigError, SummarizerBinding};
pub use content::{Content, NavItem};
pub use error::Error;
