//! Calendar domain model.
//!
//! # Responsibility
//! - Define the value types shared by store, persistence and derived views.
//! - Parse untrusted boundary input (date strings, shift ids, theme keys).
//!
//! # Invariants
//! - Dates are plain calendar dates in `YYYY-MM-DD` form; no time zones.
//! - Shift types and theme slots are closed sets fixed at compile time.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod date;
pub mod holiday;
pub mod selection;
pub mod shift;
pub mod theme;

pub type ModelResult<T> = Result<T, ModelError>;

/// Rejection of a boundary value that does not map onto the domain model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Not a `YYYY-MM-DD` string naming a real calendar date.
    InvalidDate(String),
    /// Month number outside `1..=12`.
    InvalidMonth(u32),
    /// Month arithmetic left the representable calendar range.
    MonthOutOfRange { year: i64, month: u32 },
    /// Shift id not present in the fixed catalog.
    UnknownShiftType(String),
    /// Theme key outside the fixed nine-slot set.
    UnknownThemeSlot(String),
    /// View tab id not recognized.
    UnknownViewTab(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidMonth(month) => write!(f, "invalid month {month}; expected 1..=12"),
            Self::MonthOutOfRange { year, month } => {
                write!(f, "month {year:04}-{month:02} is outside the supported range")
            }
            Self::UnknownShiftType(value) => write!(f, "unknown shift type `{value}`"),
            Self::UnknownThemeSlot(value) => write!(f, "unknown theme slot `{value}`"),
            Self::UnknownViewTab(value) => write!(f, "unknown view tab `{value}`"),
        }
    }
}

impl Error for ModelError {}
