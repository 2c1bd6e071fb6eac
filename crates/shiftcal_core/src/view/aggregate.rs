//! Per-month shift counts.
//!
//! Two outputs on purpose:
//! - [`aggregate`] omits shift types with no occurrences (chart slices).
//! - [`tally`] lists all six types, zero-defaulted (summary tiles).
//!
//! Both follow catalog order. Month membership is the `YYYY-MM` string
//! prefix of the assignment date.

use crate::model::date::YearMonth;
use crate::model::shift::{ShiftAssignment, ShiftType};
use serde::Serialize;

/// Occurrence count for one shift type within one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShiftCount {
    pub shift_type: ShiftType,
    pub label: &'static str,
    pub color: &'static str,
    pub count: u32,
}

impl ShiftCount {
    fn of(shift_type: ShiftType, count: u32) -> Self {
        let definition = shift_type.definition();
        Self {
            shift_type,
            label: definition.label,
            color: definition.color,
            count,
        }
    }

    /// Fraction of `total` represented by this entry; `0.0` when empty.
    pub fn share(&self, total: u32) -> f64 {
        if total == 0 {
            0.0
        } else {
            f64::from(self.count) / f64::from(total)
        }
    }
}

/// Non-zero counts for `month` in catalog order.
pub fn aggregate(month: YearMonth, shifts: &[ShiftAssignment]) -> Vec<ShiftCount> {
    tally(month, shifts)
        .into_iter()
        .filter(|entry| entry.count > 0)
        .collect()
}

/// Counts for all six shift types for `month`, including zeros.
pub fn tally(month: YearMonth, shifts: &[ShiftAssignment]) -> Vec<ShiftCount> {
    let prefix = month.prefix();
    let mut counts = [0_u32; ShiftType::ALL.len()];
    for assignment in shifts {
        if !assignment.date.to_string().starts_with(&prefix) {
            continue;
        }
        if let Some(slot) = ShiftType::ALL
            .iter()
            .position(|kind| *kind == assignment.shift_type)
        {
            counts[slot] += 1;
        }
    }

    ShiftType::ALL
        .into_iter()
        .zip(counts)
        .map(|(kind, count)| ShiftCount::of(kind, count))
        .collect()
}

/// Sum of all counts; the denominator for [`ShiftCount::share`].
pub fn total(counts: &[ShiftCount]) -> u32 {
    counts.iter().map(|entry| entry.count).sum()
}
