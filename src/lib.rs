//! Concierge: a task orchestration pipeline for deadline-driven work.
//!
//! Tasks are collected with a deadline and a priority, reprioritized with the
//! help of an external reasoning service, reminded about through a messaging
//! service when their deadline draws near, and summarized into a short
//! executive report.
//!
//! # Architecture
//!
//! Concierge follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, HTTP APIs)
//!
//! # Modules
//!
//! - [`task`]: Task model, pipeline services and their adapters
//! - [`config`]: Deployment configuration from TOML and the environment
//! - [`batch`]: Task batches submitted from the command line

pub mod batch;
pub mod config;
pub mod task;
