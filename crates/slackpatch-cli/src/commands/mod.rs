//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod hostname;
pub mod patch;
pub mod terms;
