//! Month grid builder.
//!
//! # Invariants
//! - Exactly 42 cells (6 weeks x 7 days), Sunday-first.
//! - Cell 0 is the Sunday on or before the first day of the month.
//! - Output depends only on the arguments.

use crate::model::date::{IsoDate, YearMonth};
use crate::model::holiday::HolidayEntry;
use crate::model::shift::{ShiftAssignment, ShiftTypeDefinition};
use crate::model::theme::ThemeSlot;
use crate::repo::slice_repo::NoteMap;
use chrono::Weekday;
use std::collections::HashMap;

pub const DAYS_PER_WEEK: usize = 7;
pub const GRID_WEEKS: usize = 6;
pub const GRID_CELLS: usize = DAYS_PER_WEEK * GRID_WEEKS;

/// Reference dates that mark cells without being part of calendar state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMarkers {
    /// Real current date; not the viewed month.
    pub today: IsoDate,
    pub selected: Option<IsoDate>,
}

/// One visible day in the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: IsoDate,
    pub in_month: bool,
    pub holiday: Option<HolidayEntry>,
    pub shift: Option<&'static ShiftTypeDefinition>,
    pub has_note: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

impl DayCell {
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Theme slot used to paint the day numeral.
    ///
    /// Saturday wins over a holiday falling on Saturday.
    pub fn tone(&self) -> ThemeSlot {
        match self.weekday() {
            Weekday::Sat => ThemeSlot::Saturday,
            Weekday::Sun => ThemeSlot::Holiday,
            _ if self.holiday.is_some() => ThemeSlot::Holiday,
            _ => ThemeSlot::Text,
        }
    }
}

/// Builds the 42-cell grid for `month`.
///
/// Shift lookup takes the first assignment per date; holiday lookup is an
/// exact date match against `holidays`.
pub fn build_grid(
    month: YearMonth,
    shifts: &[ShiftAssignment],
    notes: &NoteMap,
    holidays: &[HolidayEntry],
    markers: GridMarkers,
) -> Vec<DayCell> {
    let mut shift_by_date: HashMap<IsoDate, &'static ShiftTypeDefinition> = HashMap::new();
    for assignment in shifts {
        shift_by_date
            .entry(assignment.date)
            .or_insert_with(|| assignment.definition());
    }
    let mut holiday_by_date: HashMap<IsoDate, HolidayEntry> = HashMap::new();
    for holiday in holidays {
        holiday_by_date.entry(holiday.date).or_insert(*holiday);
    }

    grid_dates(month)
        .into_iter()
        .map(|date| DayCell {
            date,
            in_month: month.contains(date),
            holiday: holiday_by_date.get(&date).copied(),
            shift: shift_by_date.get(&date).copied(),
            has_note: notes.get(&date).is_some_and(|text| !text.is_empty()),
            is_today: date == markers.today,
            is_selected: markers.selected == Some(date),
        })
        .collect()
}

/// Dates covered by the grid of `month`, Sunday-first.
pub fn grid_dates(month: YearMonth) -> Vec<IsoDate> {
    let first = month.first_day();
    let lead = i64::from(first.weekday().num_days_from_sunday());
    (0..GRID_CELLS as i64)
        .filter_map(|index| first.offset_days(index - lead))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{grid_dates, GRID_CELLS};
    use crate::model::date::YearMonth;
    use chrono::Weekday;

    #[test]
    fn february_starting_on_sunday_gets_two_trailing_weeks() {
        // 2026-02 has 28 days and starts on Sunday: exactly four weeks.
        let dates = grid_dates(YearMonth::new(2026, 2).unwrap());
        assert_eq!(dates.len(), GRID_CELLS);
        assert_eq!(dates[0].to_string(), "2026-02-01");
        assert_eq!(dates[41].to_string(), "2026-03-14");
    }

    #[test]
    fn six_week_month_ends_on_saturday() {
        // 2024-03 starts Friday and has 31 days.
        let dates = grid_dates(YearMonth::new(2024, 3).unwrap());
        assert_eq!(dates[0].to_string(), "2024-02-25");
        assert_eq!(dates[41].to_string(), "2024-04-06");
        assert_eq!(dates[41].weekday(), Weekday::Sat);
    }
}
