//! Task orchestration for the concierge.
//!
//! Tasks are collected from submissions, reprioritized with suggestions from
//! a reasoning service, reminded about when their deadline is near, and
//! summarized into a report. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Pipeline services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
