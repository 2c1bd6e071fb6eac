//! Static holiday reference table.
//!
//! The table is a fixed month/day list stamped with the requested year; it
//! does not compute movable holidays.

use super::date::IsoDate;
use serde::Serialize;

/// Named holiday on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HolidayEntry {
    pub date: IsoDate,
    pub name: &'static str,
}

const HOLIDAY_TABLE: &[(u32, u32, &str)] = &[
    (1, 1, "元日"),
    (1, 8, "成人の日"),
    (2, 11, "建国記念の日"),
    (2, 23, "天皇誕生日"),
    (3, 20, "春分の日"),
    (4, 29, "昭和の日"),
    (5, 3, "憲法記念日"),
    (5, 4, "みどりの日"),
    (5, 5, "こどもの日"),
    (7, 15, "海の日"),
    (8, 11, "山の日"),
    (9, 16, "敬老の日"),
    (9, 22, "秋分の日"),
    (10, 14, "スポーツの日"),
    (11, 3, "文化の日"),
    (11, 23, "勤労感謝の日"),
];

/// Holidays of `year` in calendar order.
pub fn holidays_for_year(year: i32) -> Vec<HolidayEntry> {
    HOLIDAY_TABLE
        .iter()
        .filter_map(|&(month, day, name)| {
            IsoDate::from_ymd(year, month, day)
                .ok()
                .map(|date| HolidayEntry { date, name })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::holidays_for_year;

    #[test]
    fn table_is_stamped_with_requested_year() {
        let holidays = holidays_for_year(2031);
        assert_eq!(holidays.len(), 16);
        assert!(holidays.iter().all(|entry| entry.date.year() == 2031));
        assert_eq!(holidays[0].date.to_string(), "2031-01-01");
        assert_eq!(holidays[15].name, "勤労感謝の日");
    }
}
