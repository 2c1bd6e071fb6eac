//! Derived calendar views.
//!
//! Pure functions of their inputs: no storage access, no clock reads.
//! Callers pass "today" explicitly so results are reproducible.

pub mod aggregate;
pub mod grid;
