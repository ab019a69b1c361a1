//! Common utilities for the Trellis layout engine.
//!
//! This crate provides shared infrastructure used by the layout library and
//! its command-line host:
//! - **Warning System** - deduplicated, colored terminal diagnostics

pub mod warning;
