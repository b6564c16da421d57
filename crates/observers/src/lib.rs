//! Reusable observers for rangeland simulations.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across solvers in this workspace.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasStep`], [`CanAbort`])
//! - [`Progress`] — logs completion at fixed fractional checkpoints
//!
//! [`Observer`]: rangeland_core::Observer
//! [`HasStep`]: traits::HasStep
//! [`CanAbort`]: traits::CanAbort

pub mod traits;

mod progress;

pub use progress::Progress;
