//! # svcs-core
//!
//! Core library for svcs - a simple single-user version control system.
//!
//! This crate provides the tracked-file index, the snapshot store, the
//! change detector and the commit log, and the [`Repository`] handle that
//! ties them together into commit and checkout.

pub mod config;
pub mod detector;
mod engine;
pub mod error;
pub mod index;
pub mod log;
pub mod models;
pub mod repository;
pub mod snapshot;

pub use config::UserConfig;
pub use detector::ChangeDetector;
pub use error::{Error, Result};
pub use index::TrackedIndex;
pub use log::CommitLog;
pub use models::{CommitOutcome, FileSet, LogEntry};
pub use repository::Repository;
pub use snapshot::{SnapshotStore, SnapshotTransaction};
