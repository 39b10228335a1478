//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate task mutations and snapshot persistence.
//! - Keep presentation layers decoupled from storage details.

pub mod task_service;
