//! Flutter-facing bridge over `shiftcal_core`.

pub mod api;
