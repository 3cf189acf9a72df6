//! Terminal control panel for a remote training-pipeline job service.
//!
//! The backend runs the pipeline stages; this client maintains an
//! eventually-consistent view of its job state through periodic polling and
//! lets the operator trigger stages and inspect job logs.

pub mod api;
pub mod config;
pub mod core;
pub mod logging;
pub mod tui;
