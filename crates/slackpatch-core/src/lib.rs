//! # slackpatch-core
//!
//! Core library for the slackpatch firmware string patcher.
//!
//! This crate provides:
//! - A bounds-checked image buffer (fixed length, validated access)
//! - Term tables: ordered search/replacement pairs with JSON config support
//! - The in-place patcher: scan, capacity planning against trailing null
//!   slack, and the rewrite itself
//! - Structured per-match report records
//! - The compatibility-critical master-server hostname hash
//!
//! File I/O of the image itself lives in the CLI; the core operates on an
//! owned byte buffer handed in by the caller and hands it back unchanged in
//! length.

pub mod buffer;
pub mod error;
pub mod hostname;
pub mod patch;

pub use buffer::ImageBuffer;
pub use error::{Error, Result};
pub use hostname::{master_hostname, server_hash, server_slot};
pub use patch::{
    Decision, Outcome, PatchRecord, Patcher, RunInfo, TermPair, TermTable, builtin_terms,
    format_record, load_terms, save_terms,
};
