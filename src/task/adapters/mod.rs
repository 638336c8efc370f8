//! Adapter implementations for task orchestration ports.

pub mod http;
pub mod memory;
