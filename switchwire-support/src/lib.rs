//! # Switchwire Support
//!
//! Shared utilities for the Switchwire component factory.
//!
//! This crate provides:
//! - Text rendering for error messages (creation chains, suggestions)
//! - `tracing` subscriber setup for binaries, demos and tests

pub mod logging;
pub mod rendering;
