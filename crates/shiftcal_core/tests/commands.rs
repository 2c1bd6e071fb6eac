mod common;

use common::{date, sqlite_store, FlakyStore};
use shiftcal_core::{
    CalendarCommand, CalendarStore, ShiftChange, ShiftType, SliceGateway, StoreError, ViewTab,
    YearMonth,
};

#[test]
fn day_tap_flow_in_edit_mode() {
    let mut store = sqlite_store("2024-05-15");

    store
        .dispatch(CalendarCommand::SetEditMode { enabled: true })
        .unwrap();
    store
        .dispatch(CalendarCommand::ChooseShift {
            shift_type: ShiftType::Late,
        })
        .unwrap();
    let outcome = store
        .dispatch(CalendarCommand::TapDay {
            date: "2024-06-02".to_string(),
        })
        .unwrap();

    assert_eq!(outcome.shift_change, Some(ShiftChange::Inserted(ShiftType::Late)));
    assert!(outcome.month_changed);
    assert!(outcome.is_persisted());
    assert_eq!(store.selection().viewed_month, YearMonth::new(2024, 6).unwrap());
}

#[test]
fn selection_commands_do_not_write() {
    let mut store = CalendarStore::hydrate(
        SliceGateway::new(FlakyStore::default()),
        date("2024-05-15"),
    );

    let outcome = store
        .dispatch(CalendarCommand::AdvanceMonth { delta: -1 })
        .unwrap();
    assert!(outcome.month_changed);
    assert!(outcome.write_back.is_none());
    store
        .dispatch(CalendarCommand::SwitchView {
            tab: ViewTab::Settings,
        })
        .unwrap();
    store
        .dispatch(CalendarCommand::SelectDate {
            date: "2024-04-10".to_string(),
        })
        .unwrap();

    assert!(store.gateway().store().writes.is_empty());
    assert_eq!(store.selection().view_tab, ViewTab::Settings);
}

#[test]
fn mutation_commands_report_write_back() {
    let mut store = sqlite_store("2024-05-15");

    let outcome = store
        .dispatch(CalendarCommand::SetNote {
            date: "2024-05-15".to_string(),
            text: "early bus".to_string(),
        })
        .unwrap();
    assert!(outcome.write_back.is_some());
    assert!(outcome.is_persisted());

    let outcome = store
        .dispatch(CalendarCommand::StampSelected {
            shift_type: ShiftType::Off,
        })
        .unwrap();
    assert_eq!(outcome.shift_change, Some(ShiftChange::Inserted(ShiftType::Off)));

    store
        .dispatch(CalendarCommand::SetThemeColor {
            slot: "primary".to_string(),
            color: "#222222".to_string(),
        })
        .unwrap();
    store.dispatch(CalendarCommand::ResetTheme).unwrap();
    assert!(store.theme().is_default());
}

#[test]
fn rejected_command_leaves_state_untouched() {
    let mut store = sqlite_store("2024-05-15");

    let err = store
        .dispatch(CalendarCommand::SetShift {
            date: "not-a-date".to_string(),
            shift_type: ShiftType::Day,
        })
        .unwrap_err();
    assert!(matches!(err, StoreError::Invalid(_)));

    let err = store
        .dispatch(CalendarCommand::SetThemeColor {
            slot: "accent".to_string(),
            color: "#000".to_string(),
        })
        .unwrap_err();
    assert!(err.to_string().contains("accent"));
    assert!(store.shifts().is_empty());
    assert!(store.theme().is_default());
}
