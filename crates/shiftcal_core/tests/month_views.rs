mod common;

use chrono::Weekday;
use common::{date, sqlite_store};
use shiftcal_core::{
    aggregate, build_grid, holidays_for_year, tally, GridMarkers, NoteMap, ShiftAssignment,
    ShiftType, ThemeSlot, YearMonth, GRID_CELLS,
};

fn markers(today: &str) -> GridMarkers {
    GridMarkers {
        today: date(today),
        selected: None,
    }
}

#[test]
fn grid_always_has_42_cells_with_saturday_seventh() {
    for year in [1999, 2023, 2024, 2026] {
        for month in 1..=12 {
            let month = YearMonth::new(year, month).unwrap();
            let cells = build_grid(month, &[], &NoteMap::new(), &[], markers("2024-01-01"));

            assert_eq!(cells.len(), GRID_CELLS, "{month}");
            assert_eq!(cells[0].weekday(), Weekday::Sun, "{month}");
            assert_eq!(cells[6].weekday(), Weekday::Sat, "{month}");
            assert!(cells[0].date <= month.first_day());
            assert!(cells[41].date >= month.last_day());
            for pair in cells.windows(2) {
                assert_eq!(pair[0].date.offset_days(1), Some(pair[1].date));
            }
            let in_month = cells.iter().filter(|cell| cell.in_month).count();
            assert_eq!(in_month as u32, month.last_day().day());
        }
    }
}

#[test]
fn grid_merges_shifts_notes_holidays_and_today() {
    let month = YearMonth::new(2024, 5).unwrap();
    let shifts = vec![
        ShiftAssignment::new(date("2024-05-03"), ShiftType::Night),
        ShiftAssignment::new(date("2024-04-30"), ShiftType::Off),
    ];
    let mut notes = NoteMap::new();
    notes.insert(date("2024-05-06"), "training".to_string());
    notes.insert(date("2024-05-07"), String::new());
    let holidays = holidays_for_year(2024);

    let cells = build_grid(
        month,
        &shifts,
        &notes,
        &holidays,
        GridMarkers {
            today: date("2024-05-10"),
            selected: Some(date("2024-05-06")),
        },
    );
    let cell = |value: &str| {
        cells
            .iter()
            .find(|cell| cell.date == date(value))
            .expect("date in grid")
    };

    assert_eq!(cell("2024-05-03").shift.map(|def| def.id), Some(ShiftType::Night));
    assert_eq!(cell("2024-05-03").holiday.map(|entry| entry.name), Some("憲法記念日"));
    assert_eq!(cell("2024-04-30").shift.map(|def| def.label), Some("休日"));
    assert!(!cell("2024-04-30").in_month);
    assert!(cell("2024-05-06").has_note);
    assert!(cell("2024-05-06").is_selected);
    assert!(!cell("2024-05-07").has_note);
    assert!(cell("2024-05-10").is_today);
    assert_eq!(cells.iter().filter(|cell| cell.is_today).count(), 1);
}

#[test]
fn grid_is_reproducible_from_inputs() {
    let month = YearMonth::new(2024, 9).unwrap();
    let shifts = vec![ShiftAssignment::new(date("2024-09-16"), ShiftType::Day)];
    let holidays = holidays_for_year(2024);
    let first = build_grid(month, &shifts, &NoteMap::new(), &holidays, markers("2024-09-01"));
    let second = build_grid(month, &shifts, &NoteMap::new(), &holidays, markers("2024-09-01"));
    assert_eq!(first, second);
}

#[test]
fn tone_prefers_saturday_then_holiday() {
    let month = YearMonth::new(2024, 5).unwrap();
    let holidays = holidays_for_year(2024);
    let cells = build_grid(month, &[], &NoteMap::new(), &holidays, markers("2024-05-01"));
    let tone = |value: &str| {
        cells
            .iter()
            .find(|cell| cell.date == date(value))
            .map(|cell| cell.tone())
            .unwrap()
    };

    // 2024-05-04 is a Saturday holiday.
    assert_eq!(tone("2024-05-04"), ThemeSlot::Saturday);
    assert_eq!(tone("2024-05-05"), ThemeSlot::Holiday);
    assert_eq!(tone("2024-05-03"), ThemeSlot::Holiday);
    assert_eq!(tone("2024-05-08"), ThemeSlot::Text);
}

#[test]
fn aggregate_omits_zero_types_in_catalog_order() {
    let month = YearMonth::new(2024, 4).unwrap();
    let shifts = vec![
        ShiftAssignment::new(date("2024-04-03"), ShiftType::Night),
        ShiftAssignment::new(date("2024-04-01"), ShiftType::Early),
        ShiftAssignment::new(date("2024-04-02"), ShiftType::Early),
        ShiftAssignment::new(date("2024-05-01"), ShiftType::Off),
    ];

    let counts = aggregate(month, &shifts);
    let summary: Vec<_> = counts
        .iter()
        .map(|entry| (entry.shift_type, entry.count))
        .collect();
    assert_eq!(summary, vec![(ShiftType::Early, 2), (ShiftType::Night, 1)]);
    assert_eq!(counts[0].label, "早番");
    assert_eq!(counts[1].color, "#818cf8");
}

#[test]
fn tally_lists_all_six_with_zero_defaults() {
    let month = YearMonth::new(2024, 4).unwrap();
    let shifts = vec![ShiftAssignment::new(date("2024-04-03"), ShiftType::Night)];

    let counts = tally(month, &shifts);
    assert_eq!(counts.len(), 6);
    let kinds: Vec<_> = counts.iter().map(|entry| entry.shift_type).collect();
    assert_eq!(kinds, ShiftType::ALL.to_vec());
    assert_eq!(counts[4].count, 1);
    assert!(counts
        .iter()
        .filter(|entry| entry.shift_type != ShiftType::Night)
        .all(|entry| entry.count == 0));
}

#[test]
fn aggregate_of_empty_month_is_empty() {
    let month = YearMonth::new(2024, 4).unwrap();
    assert!(aggregate(month, &[]).is_empty());
}

#[test]
fn store_views_follow_viewed_month() {
    let mut store = sqlite_store("2024-12-20");
    let _ = store.set_shift("2024-12-24", ShiftType::Late).unwrap();
    let _ = store.set_shift("2025-01-02", ShiftType::Off).unwrap();

    let stats = store.month_stats();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].shift_type, ShiftType::Late);

    // December 2024 grid reaches into January 2025 and shows New Year's Day.
    let grid = store.month_grid(date("2024-12-20"));
    let new_year = grid
        .iter()
        .find(|cell| cell.date == date("2025-01-01"))
        .expect("trailing january days");
    assert_eq!(new_year.holiday.map(|entry| entry.name), Some("元日"));
    assert!(grid.iter().any(|cell| cell.is_selected && cell.date == date("2024-12-20")));

    let _ = store.advance_month(1).unwrap();
    assert_eq!(store.month_stats()[0].shift_type, ShiftType::Off);
    assert_eq!(store.month_tally().len(), 6);
}
