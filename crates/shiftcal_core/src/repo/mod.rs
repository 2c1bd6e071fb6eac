//! Persistence contracts and SQLite-backed implementations.
//!
//! # Responsibility
//! - `kv_repo`: durable get/set-by-key primitive.
//! - `slice_repo`: per-slice load/save on top of the primitive.
//!
//! # Invariants
//! - Each slice is stored under its own key; a bad record for one slice
//!   never affects another.
//! - Loads never fail outward: absent or undecodable records yield the
//!   slice default.

pub mod kv_repo;
pub mod slice_repo;
