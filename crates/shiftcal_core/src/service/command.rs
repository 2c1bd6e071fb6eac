//! Command layer over the calendar store.
//!
//! Each user action maps to one named command, independent of how the UI
//! delivered it (tap, gesture, button).

use crate::model::selection::ViewTab;
use crate::model::shift::ShiftType;
use crate::repo::kv_repo::KeyValueStore;
use crate::service::calendar_store::{
    Applied, CalendarStore, ShiftChange, StoreResult, WriteBack,
};
use log::{debug, warn};

/// One user-driven store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarCommand {
    SetShift { date: String, shift_type: ShiftType },
    SetNote { date: String, text: String },
    SetThemeColor { slot: String, color: String },
    ResetTheme,
    SelectDate { date: String },
    AdvanceMonth { delta: i32 },
    TapDay { date: String },
    StampSelected { shift_type: ShiftType },
    SwitchView { tab: ViewTab },
    SetEditMode { enabled: bool },
    ChooseShift { shift_type: ShiftType },
}

impl CalendarCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetShift { .. } => "set_shift",
            Self::SetNote { .. } => "set_note",
            Self::SetThemeColor { .. } => "set_theme_color",
            Self::ResetTheme => "reset_theme",
            Self::SelectDate { .. } => "select_date",
            Self::AdvanceMonth { .. } => "advance_month",
            Self::TapDay { .. } => "tap_day",
            Self::StampSelected { .. } => "stamp_selected",
            Self::SwitchView { .. } => "switch_view",
            Self::SetEditMode { .. } => "set_edit_mode",
            Self::ChooseShift { .. } => "choose_shift",
        }
    }
}

/// What a dispatched command did.
#[derive(Debug, Default)]
pub struct CommandOutcome {
    /// Set when a shift assignment was inserted, replaced or removed.
    pub shift_change: Option<ShiftChange>,
    /// Set when a persisted slice was mutated.
    pub write_back: Option<WriteBack>,
    /// Set when the viewed month moved.
    pub month_changed: bool,
}

impl CommandOutcome {
    fn from_applied<T>(applied: Applied<T>) -> (T, Self) {
        (
            applied.change,
            Self {
                write_back: Some(applied.write_back),
                ..Self::default()
            },
        )
    }

    fn from_shift(applied: Applied<ShiftChange>) -> Self {
        let (change, mut outcome) = Self::from_applied(applied);
        outcome.shift_change = Some(change);
        outcome
    }

    /// True unless a write-back was attempted and failed.
    pub fn is_persisted(&self) -> bool {
        self.write_back
            .as_ref()
            .map_or(true, WriteBack::is_persisted)
    }
}

impl<S: KeyValueStore> CalendarStore<S> {
    /// Executes one command against the store.
    ///
    /// # Errors
    /// - Propagates argument rejection from the underlying operation; state
    ///   is unchanged in that case.
    pub fn dispatch(&mut self, command: CalendarCommand) -> StoreResult<CommandOutcome> {
        let name = command.name();
        let result = self.run(command);
        match &result {
            Ok(outcome) => debug!(
                "event=command module=store status=ok command={} persisted={}",
                name,
                outcome.is_persisted()
            ),
            Err(err) => warn!(
                "event=command module=store status=rejected command={} error={}",
                name, err
            ),
        }
        result
    }

    fn run(&mut self, command: CalendarCommand) -> StoreResult<CommandOutcome> {
        let outcome = match command {
            CalendarCommand::SetShift { date, shift_type } => {
                CommandOutcome::from_shift(self.set_shift(&date, shift_type)?)
            }
            CalendarCommand::SetNote { date, text } => {
                CommandOutcome::from_applied(self.set_note(&date, text)?).1
            }
            CalendarCommand::SetThemeColor { slot, color } => {
                CommandOutcome::from_applied(self.set_theme_color(&slot, color)?).1
            }
            CalendarCommand::ResetTheme => CommandOutcome::from_applied(self.reset_theme()).1,
            CalendarCommand::SelectDate { date } => CommandOutcome {
                month_changed: self.select_date(&date)?,
                ..CommandOutcome::default()
            },
            CalendarCommand::AdvanceMonth { delta } => {
                self.advance_month(delta)?;
                CommandOutcome {
                    month_changed: delta != 0,
                    ..CommandOutcome::default()
                }
            }
            CalendarCommand::TapDay { date } => {
                let before = self.selection().viewed_month;
                let stamped = self.tap_day(&date)?;
                let mut outcome = stamped
                    .map(CommandOutcome::from_shift)
                    .unwrap_or_default();
                outcome.month_changed = before != self.selection().viewed_month;
                outcome
            }
            CalendarCommand::StampSelected { shift_type } => {
                CommandOutcome::from_shift(self.stamp_selected(shift_type))
            }
            CalendarCommand::SwitchView { tab } => {
                self.switch_view(tab);
                CommandOutcome::default()
            }
            CalendarCommand::SetEditMode { enabled } => {
                self.set_edit_mode(enabled);
                CommandOutcome::default()
            }
            CalendarCommand::ChooseShift { shift_type } => {
                self.choose_shift(shift_type);
                CommandOutcome::default()
            }
        };
        Ok(outcome)
    }
}
