//! Calendar state store.
//!
//! # Responsibility
//! - Own the shifts, notes and theme slices plus transient selection.
//! - Validate mutation arguments before touching state.
//! - Write each mutated slice through the gateway before returning.
//!
//! # Invariants
//! - At most one shift assignment per date.
//! - Theme always holds all nine slots.
//! - A failed write-back never rolls back the in-memory mutation; it is
//!   returned to the caller as `WriteBack::Failed`.
//! - Rejected arguments leave every slice and the selection untouched.

use crate::model::date::{IsoDate, YearMonth};
use crate::model::holiday::{holidays_for_year, HolidayEntry};
use crate::model::selection::{SelectionState, ViewTab};
use crate::model::shift::{ShiftAssignment, ShiftType};
use crate::model::theme::{ThemeConfig, ThemeSlot};
use crate::model::ModelError;
use crate::repo::kv_repo::KeyValueStore;
use crate::repo::slice_repo::{GatewayError, GatewayResult, NoteMap, SliceGateway, SliceRecord};
use crate::view::aggregate::{aggregate, tally, ShiftCount};
use crate::view::grid::{build_grid, grid_dates, DayCell, GridMarkers};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Caller-visible rejection of a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Invalid(ModelError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "rejected: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<ModelError> for StoreError {
    fn from(value: ModelError) -> Self {
        Self::Invalid(value)
    }
}

/// Persistence result of one applied mutation.
#[derive(Debug)]
pub enum WriteBack {
    Persisted,
    /// State changed in memory but the slice record was not written.
    Failed(GatewayError),
}

impl WriteBack {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted)
    }

    pub fn error(&self) -> Option<&GatewayError> {
        match self {
            Self::Persisted => None,
            Self::Failed(err) => Some(err),
        }
    }
}

/// A mutation that took effect, with its write-back status.
#[derive(Debug)]
#[must_use]
pub struct Applied<T> {
    pub change: T,
    pub write_back: WriteBack,
}

/// Effect of one `set_shift` call on the target date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftChange {
    Inserted(ShiftType),
    Replaced { previous: ShiftType, current: ShiftType },
    /// Same type re-applied: assignment toggled off.
    Removed(ShiftType),
}

/// Session-owned calendar state hydrated from a slice gateway.
pub struct CalendarStore<S: KeyValueStore> {
    gateway: SliceGateway<S>,
    shifts: Vec<ShiftAssignment>,
    notes: NoteMap,
    theme: ThemeConfig,
    selection: SelectionState,
}

impl<S: KeyValueStore> CalendarStore<S> {
    /// Loads all three slices and resets selection around `today`.
    ///
    /// Duplicate dates in a loaded shifts record keep their first entry.
    pub fn hydrate(gateway: SliceGateway<S>, today: IsoDate) -> Self {
        let loaded: Vec<ShiftAssignment> = gateway.load();
        let loaded_len = loaded.len();
        let shifts = dedupe_by_date(loaded);
        if shifts.len() != loaded_len {
            warn!(
                "event=store_hydrate module=store status=repaired slice=shifts dropped_duplicates={}",
                loaded_len - shifts.len()
            );
        }
        let notes: NoteMap = gateway.load();
        let theme: ThemeConfig = gateway.load();

        info!(
            "event=store_hydrate module=store status=ok shifts={} notes={} theme_default={}",
            shifts.len(),
            notes.len(),
            theme.is_default()
        );

        Self {
            gateway,
            shifts,
            notes,
            theme,
            selection: SelectionState::new(today),
        }
    }

    /// Stamps `shift_type` on `date` with toggle-off semantics.
    ///
    /// # Errors
    /// - `StoreError::Invalid` when `date` is not a valid `YYYY-MM-DD`.
    pub fn set_shift(
        &mut self,
        date: &str,
        shift_type: ShiftType,
    ) -> StoreResult<Applied<ShiftChange>> {
        let date = IsoDate::parse(date)?;
        Ok(self.set_shift_on(date, shift_type))
    }

    /// Typed form of [`Self::set_shift`].
    ///
    /// - No assignment: insert.
    /// - Same type assigned: remove.
    /// - Other type assigned: overwrite in place.
    pub fn set_shift_on(&mut self, date: IsoDate, shift_type: ShiftType) -> Applied<ShiftChange> {
        let existing = self.shifts.iter().position(|entry| entry.date == date);
        let change = match existing {
            None => {
                self.shifts.push(ShiftAssignment::new(date, shift_type));
                ShiftChange::Inserted(shift_type)
            }
            Some(index) if self.shifts[index].shift_type == shift_type => {
                self.shifts.remove(index);
                ShiftChange::Removed(shift_type)
            }
            Some(index) => {
                let previous = self.shifts[index].shift_type;
                self.shifts[index].shift_type = shift_type;
                ShiftChange::Replaced {
                    previous,
                    current: shift_type,
                }
            }
        };
        debug!(
            "event=set_shift module=store status=ok date={} change={:?}",
            date, change
        );
        Applied {
            change,
            write_back: write_through(&mut self.gateway, &self.shifts),
        }
    }

    /// Upserts the note for `date`; an empty `text` reads as "no note".
    ///
    /// # Errors
    /// - `StoreError::Invalid` when `date` is not a valid `YYYY-MM-DD`.
    pub fn set_note(&mut self, date: &str, text: impl Into<String>) -> StoreResult<Applied<()>> {
        let date = IsoDate::parse(date)?;
        Ok(self.set_note_on(date, text))
    }

    pub fn set_note_on(&mut self, date: IsoDate, text: impl Into<String>) -> Applied<()> {
        let text = text.into();
        debug!(
            "event=set_note module=store status=ok date={} chars={}",
            date,
            text.chars().count()
        );
        self.notes.insert(date, text);
        Applied {
            change: (),
            write_back: write_through(&mut self.gateway, &self.notes),
        }
    }

    /// Sets one theme slot by key. Returns whether the value changed.
    ///
    /// # Errors
    /// - `StoreError::Invalid` for a key outside the nine-slot set.
    pub fn set_theme_color(
        &mut self,
        slot_key: &str,
        color: impl Into<String>,
    ) -> StoreResult<Applied<bool>> {
        let slot = ThemeSlot::from_key(slot_key)?;
        Ok(self.set_theme_slot(slot, color))
    }

    pub fn set_theme_slot(&mut self, slot: ThemeSlot, color: impl Into<String>) -> Applied<bool> {
        let changed = self.theme.set_color(slot, color);
        debug!(
            "event=set_theme_color module=store status=ok slot={} changed={}",
            slot.key(),
            changed
        );
        Applied {
            change: changed,
            write_back: write_through(&mut self.gateway, &self.theme),
        }
    }

    /// Restores the default theme unconditionally.
    ///
    /// Confirmation belongs to the caller; once invoked this always resets.
    pub fn reset_theme(&mut self) -> Applied<()> {
        self.theme = ThemeConfig::default();
        info!("event=reset_theme module=store status=ok");
        Applied {
            change: (),
            write_back: write_through(&mut self.gateway, &self.theme),
        }
    }

    /// Selects `date`, moving the viewed month when `date` lies outside it.
    /// Returns whether the viewed month changed.
    ///
    /// # Errors
    /// - `StoreError::Invalid` when `date` is not a valid `YYYY-MM-DD`.
    pub fn select_date(&mut self, date: &str) -> StoreResult<bool> {
        let date = IsoDate::parse(date)?;
        Ok(self.select(date))
    }

    pub fn select(&mut self, date: IsoDate) -> bool {
        self.selection.selected_date = date;
        if self.selection.viewed_month.contains(date) {
            return false;
        }
        self.selection.viewed_month = YearMonth::of(date);
        true
    }

    /// Moves the viewed month by `delta` months. Selection is unchanged.
    ///
    /// # Errors
    /// - `StoreError::Invalid` when the target month is out of range; the
    ///   viewed month is left as it was.
    pub fn advance_month(&mut self, delta: i32) -> StoreResult<YearMonth> {
        let target = self.selection.viewed_month.add_months(delta)?;
        self.selection.viewed_month = target;
        Ok(target)
    }

    /// Switches tab; leaving or entering any tab ends edit mode.
    pub fn switch_view(&mut self, tab: ViewTab) {
        self.selection.view_tab = tab;
        self.selection.edit_mode = false;
    }

    pub fn set_edit_mode(&mut self, enabled: bool) {
        self.selection.edit_mode = enabled;
    }

    pub fn toggle_edit_mode(&mut self) -> bool {
        self.selection.edit_mode = !self.selection.edit_mode;
        self.selection.edit_mode
    }

    pub fn choose_shift(&mut self, shift_type: ShiftType) {
        self.selection.chosen_shift = shift_type;
    }

    /// Day tap: select the date, then stamp the chosen shift in edit mode.
    ///
    /// # Errors
    /// - `StoreError::Invalid` when `date` is not a valid `YYYY-MM-DD`.
    pub fn tap_day(&mut self, date: &str) -> StoreResult<Option<Applied<ShiftChange>>> {
        let date = IsoDate::parse(date)?;
        self.select(date);
        if !self.selection.edit_mode {
            return Ok(None);
        }
        let chosen = self.selection.chosen_shift;
        Ok(Some(self.set_shift_on(date, chosen)))
    }

    /// Palette press: choose `shift_type` and stamp it on the selected date.
    pub fn stamp_selected(&mut self, shift_type: ShiftType) -> Applied<ShiftChange> {
        self.choose_shift(shift_type);
        let date = self.selection.selected_date;
        self.set_shift_on(date, shift_type)
    }

    /// Re-saves every slice; used at session teardown.
    ///
    /// All slices are attempted; the first failure is returned.
    pub fn flush(&mut self) -> GatewayResult<()> {
        let results = [
            self.gateway.save(&self.shifts),
            self.gateway.save(&self.notes),
            self.gateway.save(&self.theme),
        ];
        let outcome = results.into_iter().find(Result::is_err).unwrap_or(Ok(()));
        match &outcome {
            Ok(()) => info!("event=store_flush module=store status=ok"),
            Err(err) => warn!(
                "event=store_flush module=store status=error slice={} error={}",
                err.slice().name(),
                err
            ),
        }
        outcome
    }

    pub fn shifts(&self) -> &[ShiftAssignment] {
        &self.shifts
    }

    pub fn notes(&self) -> &NoteMap {
        &self.notes
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn shift_on(&self, date: IsoDate) -> Option<ShiftType> {
        self.shifts
            .iter()
            .find(|entry| entry.date == date)
            .map(|entry| entry.shift_type)
    }

    /// Note text for `date`; empty when none was written.
    pub fn note_on(&self, date: IsoDate) -> &str {
        self.notes.get(&date).map_or("", String::as_str)
    }

    pub fn has_note(&self, date: IsoDate) -> bool {
        !self.note_on(date).is_empty()
    }

    /// Grid of the viewed month, with holidays of every year it touches.
    pub fn month_grid(&self, today: IsoDate) -> Vec<DayCell> {
        let month = self.selection.viewed_month;
        let holidays = grid_holidays(month);
        build_grid(
            month,
            &self.shifts,
            &self.notes,
            &holidays,
            GridMarkers {
                today,
                selected: Some(self.selection.selected_date),
            },
        )
    }

    /// Chart counts for the viewed month (zero types omitted).
    pub fn month_stats(&self) -> Vec<ShiftCount> {
        aggregate(self.selection.viewed_month, &self.shifts)
    }

    /// Tile counts for the viewed month (all six types).
    pub fn month_tally(&self) -> Vec<ShiftCount> {
        tally(self.selection.viewed_month, &self.shifts)
    }

    pub fn gateway(&self) -> &SliceGateway<S> {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut SliceGateway<S> {
        &mut self.gateway
    }

    pub fn into_gateway(self) -> SliceGateway<S> {
        self.gateway
    }
}

fn write_through<S: KeyValueStore, T: SliceRecord>(
    gateway: &mut SliceGateway<S>,
    value: &T,
) -> WriteBack {
    match gateway.save(value) {
        Ok(()) => WriteBack::Persisted,
        Err(err) => {
            warn!(
                "event=write_back module=store status=degraded slice={} error={}",
                err.slice().name(),
                err
            );
            WriteBack::Failed(err)
        }
    }
}

fn dedupe_by_date(shifts: Vec<ShiftAssignment>) -> Vec<ShiftAssignment> {
    let mut seen = HashSet::new();
    shifts
        .into_iter()
        .filter(|entry| seen.insert(entry.date))
        .collect()
}

fn grid_holidays(month: YearMonth) -> Vec<HolidayEntry> {
    let dates = grid_dates(month);
    let mut years: Vec<i32> = dates.iter().map(|date| date.year()).collect();
    years.dedup();
    years.into_iter().flat_map(holidays_for_year).collect()
}
