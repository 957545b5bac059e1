//! # Engine Module
//!
//! The stateful layer that turns the pure models of [`crate::core`] into runs.
//!
//! ## Overview
//!
//! A workflow builds a read-only context (the resolved catalog entries, configuration and
//! the derived modifiers of a run), owns the mutable state of that run, and drives the
//! tasks that update it. Every random draw is taken from a generator seeded through
//! [`utils::seed`], so identical requests reproduce identical results.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Run limits and model parameters with validating builders
//! - **State Tracking** ([`state`]) - Cells, medium and generator of one culture run
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine error taxonomy and boundary status mapping

pub mod config;
pub mod context;
pub mod error;
pub mod progress;
pub mod state;
pub(crate) mod tasks;
pub mod utils;
