//! Library components for the rawdb CLI.

pub mod config;
pub mod logging;
pub mod pipeline;
