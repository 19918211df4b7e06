//! Domain layer - pure analysis logic with no I/O.
//!
//! Everything in this layer is synchronous, deterministic, and free of
//! external dependencies. Market data arrives fully fetched; results are
//! returned as new immutable values.

pub mod chain;
pub mod history;
pub mod sentiment;
pub mod shared;
pub mod simulation;
pub mod valuation;
