//! Core state model and derived views for the shift-work calendar.
//! This crate is the single source of truth for calendar invariants; UI
//! layers call into it and never mutate slices directly.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date::{IsoDate, YearMonth};
pub use model::holiday::{holidays_for_year, HolidayEntry};
pub use model::selection::{SelectionState, ViewTab};
pub use model::shift::{catalog, ShiftAssignment, ShiftType, ShiftTypeDefinition};
pub use model::theme::{ThemeConfig, ThemeSlot};
pub use model::{ModelError, ModelResult};
pub use repo::kv_repo::{KeyValueStore, RepoError, RepoResult, SqliteKeyValueStore};
pub use repo::slice_repo::{
    GatewayError, GatewayResult, NoteMap, Slice, SliceGateway, SliceRecord,
};
pub use service::calendar_store::{
    Applied, CalendarStore, ShiftChange, StoreError, StoreResult, WriteBack,
};
pub use service::command::{CalendarCommand, CommandOutcome};
pub use view::aggregate::{aggregate, tally, ShiftCount};
pub use view::grid::{build_grid, DayCell, GridMarkers, GRID_CELLS};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
