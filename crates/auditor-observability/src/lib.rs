//! # auditor-observability
//!
//! Tracing subscriber setup for hosts embedding the engine, plus the span
//! macros the engine crates use to label each operation.

pub mod tracing_setup;

pub use tracing_setup::{
    init_from_config, init_tracing, init_tracing_json, init_tracing_with_filter,
};
