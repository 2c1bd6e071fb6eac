//! Calendar use-case services.
//!
//! # Responsibility
//! - Own the hydrated calendar state for one interactive session.
//! - Map user actions onto validated mutations with write-through.

pub mod calendar_store;
pub mod command;
