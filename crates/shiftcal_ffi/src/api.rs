//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Own the single hydrated calendar session of this process.
//! - Translate UI actions into core commands and flatten derived views
//!   into plain FRB-friendly structs.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Write-back failures are reported as `ok=true` with a warning message;
//!   the mutation itself stays applied.

use log::{info, warn};
use shiftcal_core::db::open_db;
use shiftcal_core::{
    core_version as core_version_inner, default_log_level as default_log_level_inner,
    init_logging as init_logging_inner, ping as ping_inner,
    CalendarCommand, CalendarStore, CommandOutcome, IsoDate, ShiftChange, ShiftCount,
    ShiftType, SliceGateway, SqliteKeyValueStore, ThemeSlot, ViewTab,
};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

const SESSION_DB_FILE_NAME: &str = "shiftcal.sqlite3";
const SESSION_DB_PATH_ENV: &str = "SHIFTCAL_DB_PATH";

type Session = CalendarStore<SqliteKeyValueStore>;

static SESSION: Mutex<Option<Session>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Level the host should pass to [`init_logging`] unless the user chose one.
#[flutter_rust_bridge::frb(sync)]
pub fn default_log_level() -> String {
    default_log_level_inner().to_owned()
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarActionResponse {
    /// Whether the action was accepted.
    pub ok: bool,
    /// `inserted|replaced|removed` when a shift assignment changed.
    pub shift_change: Option<String>,
    /// Whether the viewed month moved.
    pub month_changed: bool,
    /// Human-readable result; carries the write-back warning if any.
    pub message: String,
}

impl CalendarActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            shift_change: None,
            month_changed: false,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            shift_change: None,
            month_changed: false,
            message: message.into(),
        }
    }

    fn from_outcome(name: &str, outcome: CommandOutcome) -> Self {
        let message = match outcome.write_back.as_ref().and_then(|wb| wb.error()) {
            Some(err) => format!("{name} applied but not saved: {err}"),
            None => format!("{name} applied."),
        };
        Self {
            ok: true,
            shift_change: outcome
                .shift_change
                .map(|change| shift_change_label(change).to_string()),
            month_changed: outcome.month_changed,
            message,
        }
    }
}

/// One grid cell flattened for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCellView {
    pub date: String,
    pub day: u32,
    pub in_month: bool,
    pub holiday_name: Option<String>,
    pub shift_id: Option<String>,
    pub shift_label: Option<String>,
    pub shift_color: Option<String>,
    pub has_note: bool,
    pub is_today: bool,
    pub is_selected: bool,
    /// Theme slot key for the day numeral color.
    pub tone: String,
}

/// Month grid response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGridResponse {
    pub ok: bool,
    /// Viewed month as `YYYY-MM`.
    pub month: String,
    /// 42 cells when `ok`, empty otherwise.
    pub cells: Vec<DayCellView>,
    pub message: String,
}

/// Shift count entry for chart or tile display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftCountView {
    pub shift_id: String,
    pub label: String,
    pub color: String,
    pub count: u32,
}

/// Monthly counts response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthStatsResponse {
    pub ok: bool,
    pub month: String,
    pub items: Vec<ShiftCountView>,
    pub total: u32,
    pub message: String,
}

/// Snapshot of transient selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionView {
    pub ok: bool,
    pub viewed_month: String,
    pub selected_date: String,
    /// Note of the selected date; empty when none.
    pub selected_note: String,
    pub view_tab: String,
    pub edit_mode: bool,
    pub chosen_shift: String,
    pub message: String,
}

/// One theme slot for the settings screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeEntryView {
    pub key: String,
    pub label: String,
    pub color: String,
}

/// Opens the calendar store and hydrates the session.
///
/// `db_path` falls back to `$SHIFTCAL_DB_PATH`, then the temp directory.
/// An already open session is flushed and replaced.
#[flutter_rust_bridge::frb(sync)]
pub fn session_open(db_path: Option<String>) -> CalendarActionResponse {
    let path = resolve_db_path(db_path);
    let conn = match open_db(&path) {
        Ok(conn) => conn,
        Err(err) => return CalendarActionResponse::failure(format!("session_open failed: {err}")),
    };
    let kv = match SqliteKeyValueStore::try_new(conn) {
        Ok(kv) => kv,
        Err(err) => return CalendarActionResponse::failure(format!("session_open failed: {err}")),
    };
    let store = CalendarStore::hydrate(SliceGateway::new(kv), IsoDate::today());

    let mut guard = lock_session();
    if let Some(mut previous) = guard.replace(store) {
        if let Err(err) = previous.flush() {
            warn!("event=session_open module=ffi status=degraded error={err}");
        }
    }
    info!("event=session_open module=ffi status=ok");
    CalendarActionResponse::success("Session opened.")
}

/// Flushes and drops the session.
#[flutter_rust_bridge::frb(sync)]
pub fn session_close() -> CalendarActionResponse {
    let Some(mut store) = lock_session().take() else {
        return CalendarActionResponse::success("No session open.");
    };
    match store.flush() {
        Ok(()) => CalendarActionResponse::success("Session closed."),
        Err(err) => CalendarActionResponse::failure(format!("session_close flush failed: {err}")),
    }
}

/// Day tap: selects the date and stamps the chosen shift in edit mode.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_tap_day(date: String) -> CalendarActionResponse {
    dispatch(CalendarCommand::TapDay { date })
}

/// Palette press: stamps `shift_id` on the selected date.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_stamp(shift_id: String) -> CalendarActionResponse {
    match ShiftType::from_id(shift_id.trim()) {
        Ok(shift_type) => dispatch(CalendarCommand::StampSelected { shift_type }),
        Err(err) => CalendarActionResponse::failure(format!("calendar_stamp failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn calendar_set_note(date: String, text: String) -> CalendarActionResponse {
    dispatch(CalendarCommand::SetNote { date, text })
}

#[flutter_rust_bridge::frb(sync)]
pub fn calendar_select_date(date: String) -> CalendarActionResponse {
    dispatch(CalendarCommand::SelectDate { date })
}

/// Month navigation; `delta` is `+1`/`-1` for swipes and buttons.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_advance_month(delta: i32) -> CalendarActionResponse {
    dispatch(CalendarCommand::AdvanceMonth { delta })
}

#[flutter_rust_bridge::frb(sync)]
pub fn calendar_switch_view(tab: String) -> CalendarActionResponse {
    match ViewTab::from_id(tab.trim()) {
        Ok(tab) => dispatch(CalendarCommand::SwitchView { tab }),
        Err(err) => CalendarActionResponse::failure(format!("calendar_switch_view failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn calendar_set_edit_mode(enabled: bool) -> CalendarActionResponse {
    dispatch(CalendarCommand::SetEditMode { enabled })
}

#[flutter_rust_bridge::frb(sync)]
pub fn calendar_choose_shift(shift_id: String) -> CalendarActionResponse {
    match ShiftType::from_id(shift_id.trim()) {
        Ok(shift_type) => dispatch(CalendarCommand::ChooseShift { shift_type }),
        Err(err) => CalendarActionResponse::failure(format!("calendar_choose_shift failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn theme_set_color(slot: String, color: String) -> CalendarActionResponse {
    dispatch(CalendarCommand::SetThemeColor { slot, color })
}

/// Resets the theme. Callers confirm with the user before invoking.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_reset() -> CalendarActionResponse {
    dispatch(CalendarCommand::ResetTheme)
}

#[flutter_rust_bridge::frb(sync)]
pub fn theme_get() -> Vec<ThemeEntryView> {
    with_session(|store| {
        store
            .theme()
            .entries()
            .into_iter()
            .map(|(slot, color)| ThemeEntryView {
                key: slot.key().to_string(),
                label: slot.label().to_string(),
                color: color.to_string(),
            })
            .collect()
    })
    .unwrap_or_default()
}

/// Grid of the viewed month relative to the real current date.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_month_grid() -> MonthGridResponse {
    let result = with_session(|store| {
        let month = store.selection().viewed_month.prefix();
        let cells = store
            .month_grid(IsoDate::today())
            .into_iter()
            .map(|cell| DayCellView {
                date: cell.date.to_string(),
                day: cell.date.day(),
                in_month: cell.in_month,
                holiday_name: cell.holiday.map(|entry| entry.name.to_string()),
                shift_id: cell.shift.map(|def| def.id.id().to_string()),
                shift_label: cell.shift.map(|def| def.label.to_string()),
                shift_color: cell.shift.map(|def| def.color.to_string()),
                has_note: cell.has_note,
                is_today: cell.is_today,
                is_selected: cell.is_selected,
                tone: cell.tone().key().to_string(),
            })
            .collect();
        (month, cells)
    });
    match result {
        Ok((month, cells)) => MonthGridResponse {
            ok: true,
            month,
            cells,
            message: String::new(),
        },
        Err(message) => MonthGridResponse {
            ok: false,
            month: String::new(),
            cells: Vec::new(),
            message,
        },
    }
}

/// Chart counts for the viewed month; types with zero days are absent.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_month_stats() -> MonthStatsResponse {
    month_counts(|store| store.month_stats())
}

/// Tile counts for the viewed month; always six entries.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_month_tally() -> MonthStatsResponse {
    month_counts(|store| store.month_tally())
}

#[flutter_rust_bridge::frb(sync)]
pub fn calendar_selection() -> SelectionView {
    let result = with_session(|store| {
        let selection = *store.selection();
        SelectionView {
            ok: true,
            viewed_month: selection.viewed_month.prefix(),
            selected_date: selection.selected_date.to_string(),
            selected_note: store.note_on(selection.selected_date).to_string(),
            view_tab: selection.view_tab.id().to_string(),
            edit_mode: selection.edit_mode,
            chosen_shift: selection.chosen_shift.id().to_string(),
            message: String::new(),
        }
    });
    result.unwrap_or_else(|message| SelectionView {
        ok: false,
        viewed_month: String::new(),
        selected_date: String::new(),
        selected_note: String::new(),
        view_tab: String::new(),
        edit_mode: false,
        chosen_shift: String::new(),
        message,
    })
}

/// Settings label for a theme slot key; empty for unknown keys.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_slot_label(slot: String) -> String {
    ThemeSlot::from_key(slot.trim())
        .map(|slot| slot.label().to_string())
        .unwrap_or_default()
}

fn dispatch(command: CalendarCommand) -> CalendarActionResponse {
    let name = command.name();
    match with_session(|store| store.dispatch(command)) {
        Ok(Ok(outcome)) => CalendarActionResponse::from_outcome(name, outcome),
        Ok(Err(err)) => CalendarActionResponse::failure(format!("{name} failed: {err}")),
        Err(message) => CalendarActionResponse::failure(message),
    }
}

fn month_counts(counts: impl FnOnce(&Session) -> Vec<ShiftCount>) -> MonthStatsResponse {
    let result = with_session(|store| (store.selection().viewed_month.prefix(), counts(store)));
    match result {
        Ok((month, entries)) => {
            let total = shiftcal_core::view::aggregate::total(&entries);
            MonthStatsResponse {
                ok: true,
                month,
                items: entries
                    .into_iter()
                    .map(|entry| ShiftCountView {
                        shift_id: entry.shift_type.id().to_string(),
                        label: entry.label.to_string(),
                        color: entry.color.to_string(),
                        count: entry.count,
                    })
                    .collect(),
                total,
                message: String::new(),
            }
        }
        Err(message) => MonthStatsResponse {
            ok: false,
            month: String::new(),
            items: Vec::new(),
            total: 0,
            message,
        },
    }
}

fn with_session<T>(f: impl FnOnce(&mut Session) -> T) -> Result<T, String> {
    let mut guard = lock_session();
    match guard.as_mut() {
        Some(store) => Ok(f(store)),
        None => Err("no calendar session; call session_open first".to_string()),
    }
}

// A panic while holding the lock must not wedge every later call.
fn lock_session() -> MutexGuard<'static, Option<Session>> {
    SESSION.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn resolve_db_path(explicit: Option<String>) -> PathBuf {
    let from_env = || std::env::var(SESSION_DB_PATH_ENV).ok();
    explicit
        .into_iter()
        .chain(from_env())
        .map(|raw| raw.trim().to_string())
        .find(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join(SESSION_DB_FILE_NAME))
}

fn shift_change_label(change: ShiftChange) -> &'static str {
    match change {
        ShiftChange::Inserted(_) => "inserted",
        ShiftChange::Replaced { .. } => "replaced",
        ShiftChange::Removed(_) => "removed",
    }
}
