//! Shift catalog and per-day assignments.
//!
//! # Responsibility
//! - Define the fixed, ordered catalog of shift types.
//! - Define the persisted assignment record that references the catalog.
//!
//! # Invariants
//! - Catalog order is `early, day, late, evening, night, off` and drives
//!   every ordered output (aggregation, tally, palette).
//! - Assignments reference a shift by id only; label and color always come
//!   from the catalog.

use super::date::IsoDate;
use super::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// One of the six shift categories a day can be stamped with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    Early,
    Day,
    Late,
    Evening,
    Night,
    Off,
}

impl ShiftType {
    /// All shift types in catalog order.
    pub const ALL: [ShiftType; 6] = [
        ShiftType::Early,
        ShiftType::Day,
        ShiftType::Late,
        ShiftType::Evening,
        ShiftType::Night,
        ShiftType::Off,
    ];

    /// Stable id used in persisted records and at the FFI boundary.
    pub fn id(self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::Day => "day",
            Self::Late => "late",
            Self::Evening => "evening",
            Self::Night => "night",
            Self::Off => "off",
        }
    }

    pub fn from_id(value: &str) -> ModelResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == value)
            .ok_or_else(|| ModelError::UnknownShiftType(value.to_string()))
    }

    /// Catalog entry carrying display label and color.
    pub fn definition(self) -> &'static ShiftTypeDefinition {
        &SHIFT_CATALOG[self.catalog_index()]
    }

    fn catalog_index(self) -> usize {
        match self {
            Self::Early => 0,
            Self::Day => 1,
            Self::Late => 2,
            Self::Evening => 3,
            Self::Night => 4,
            Self::Off => 5,
        }
    }
}

/// Immutable display definition for one shift type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShiftTypeDefinition {
    pub id: ShiftType,
    pub label: &'static str,
    pub color: &'static str,
}

const SHIFT_CATALOG: [ShiftTypeDefinition; 6] = [
    ShiftTypeDefinition {
        id: ShiftType::Early,
        label: "早番",
        color: "#f59e0b",
    },
    ShiftTypeDefinition {
        id: ShiftType::Day,
        label: "日勤",
        color: "#fbbf24",
    },
    ShiftTypeDefinition {
        id: ShiftType::Late,
        label: "遅番",
        color: "#d97706",
    },
    ShiftTypeDefinition {
        id: ShiftType::Evening,
        label: "準夜",
        color: "#60a5fa",
    },
    ShiftTypeDefinition {
        id: ShiftType::Night,
        label: "深夜",
        color: "#818cf8",
    },
    ShiftTypeDefinition {
        id: ShiftType::Off,
        label: "休日",
        color: "#f87171",
    },
];

/// Full shift catalog in display order.
pub fn catalog() -> &'static [ShiftTypeDefinition] {
    &SHIFT_CATALOG
}

/// One shift stamped on one calendar day.
///
/// Serialized as `{"date": "...", "shiftTypeId": "..."}`. Records written by
/// older builds under `shiftId` are still accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    pub date: IsoDate,
    #[serde(rename = "shiftTypeId", alias = "shiftId")]
    pub shift_type: ShiftType,
}

impl ShiftAssignment {
    pub fn new(date: IsoDate, shift_type: ShiftType) -> Self {
        Self { date, shift_type }
    }

    pub fn definition(&self) -> &'static ShiftTypeDefinition {
        self.shift_type.definition()
    }
}

#[cfg(test)]
mod tests {
    use super::{catalog, ShiftAssignment, ShiftType};
    use crate::model::ModelError;

    #[test]
    fn catalog_order_matches_enum_order() {
        let ids: Vec<_> = catalog().iter().map(|def| def.id).collect();
        assert_eq!(ids, ShiftType::ALL.to_vec());
        for kind in ShiftType::ALL {
            assert_eq!(kind.definition().id, kind);
        }
    }

    #[test]
    fn from_id_round_trips_and_rejects_unknown() {
        for kind in ShiftType::ALL {
            assert_eq!(ShiftType::from_id(kind.id()), Ok(kind));
        }
        assert_eq!(
            ShiftType::from_id("graveyard"),
            Err(ModelError::UnknownShiftType("graveyard".to_string()))
        );
    }

    #[test]
    fn assignment_accepts_legacy_shift_id_field() {
        let legacy: ShiftAssignment =
            serde_json::from_str(r#"{"date":"2024-05-05","shiftId":"night"}"#)
                .expect("legacy record should decode");
        assert_eq!(legacy.shift_type, ShiftType::Night);

        let encoded = serde_json::to_string(&legacy).unwrap();
        assert_eq!(encoded, r#"{"date":"2024-05-05","shiftTypeId":"night"}"#);
    }
}
