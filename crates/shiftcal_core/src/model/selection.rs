//! Transient UI selection state.
//!
//! Never persisted; rebuilt from "today" on every process start.

use super::date::{IsoDate, YearMonth};
use super::shift::ShiftType;
use super::{ModelError, ModelResult};

/// Top-level view tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewTab {
    #[default]
    Calendar,
    Dashboard,
    Settings,
}

impl ViewTab {
    pub fn id(self) -> &'static str {
        match self {
            Self::Calendar => "calendar",
            Self::Dashboard => "dashboard",
            Self::Settings => "settings",
        }
    }

    pub fn from_id(value: &str) -> ModelResult<Self> {
        match value {
            "calendar" => Ok(Self::Calendar),
            "dashboard" => Ok(Self::Dashboard),
            "settings" => Ok(Self::Settings),
            other => Err(ModelError::UnknownViewTab(other.to_string())),
        }
    }
}

/// Session-local selection and mode flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    pub viewed_month: YearMonth,
    pub selected_date: IsoDate,
    pub view_tab: ViewTab,
    pub edit_mode: bool,
    /// Shift type applied by the next stamp in edit mode.
    pub chosen_shift: ShiftType,
}

impl SelectionState {
    /// Startup defaults: today selected and viewed, calendar tab, edit off.
    pub fn new(today: IsoDate) -> Self {
        Self {
            viewed_month: YearMonth::of(today),
            selected_date: today,
            view_tab: ViewTab::Calendar,
            edit_mode: false,
            chosen_shift: ShiftType::Early,
        }
    }
}
