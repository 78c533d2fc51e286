//! Static equipment catalog
//!
//! The selectable models per category and the implied-equipment table
//! behind forklift selections. Names are free text everywhere else in the
//! system; only names that parse to a [`ForkliftModel`] participate in the
//! derivation rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ROLLBACK_TRACTOR: &str = "Rollback";
pub const THREE_AXLE_TRACTOR: &str = "3-axle tractor";
pub const FOUR_AXLE_TRACTOR: &str = "4-axle tractor";
pub const DOVETAIL_TRAILER: &str = "Dovetail";
pub const LOWBOY_TRAILER: &str = "Lowboy";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EquipmentCategory {
    Forklifts,
    Tractors,
    Trailers,
    AdditionalEquipment,
}

impl EquipmentCategory {
    pub const ALL: [EquipmentCategory; 4] = [
        EquipmentCategory::Forklifts,
        EquipmentCategory::Tractors,
        EquipmentCategory::Trailers,
        EquipmentCategory::AdditionalEquipment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Forklifts => "Forklifts",
            Self::Tractors => "Tractors",
            Self::Trailers => "Trailers",
            Self::AdditionalEquipment => "Material Handling & Rigging",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown equipment category `{0}` (expected forklifts|tractors|trailers|additional)")]
pub struct ParseCategoryError(String);

impl std::str::FromStr for EquipmentCategory {
    type Err = ParseCategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "forklifts" | "forklift" => Ok(Self::Forklifts),
            "tractors" | "tractor" => Ok(Self::Tractors),
            "trailers" | "trailer" => Ok(Self::Trailers),
            "additional" | "additional-equipment" | "additionalequipment" | "rigging" => {
                Ok(Self::AdditionalEquipment)
            }
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

pub const FORKLIFT_OPTIONS: &[&str] = &[
    "Forklift (5k)",
    "Forklift (8k)",
    "Forklift (15k)",
    "Forklift (30k)",
    "Forklift (12k Reach)",
    "Forklift (20k Reach)",
    "Forklift – Hoist 18/26",
    "Versalift 25/35",
    "Versalift 40/60",
    "Versalift 60/80",
    "Trilifter",
];

pub const TRACTOR_OPTIONS: &[&str] = &[THREE_AXLE_TRACTOR, FOUR_AXLE_TRACTOR, ROLLBACK_TRACTOR];

pub const TRAILER_OPTIONS: &[&str] = &[DOVETAIL_TRAILER, "Flatbed", LOWBOY_TRAILER, "Step Deck"];

pub const ADDITIONAL_EQUIPMENT_OPTIONS: &[&str] = &[
    "Material Handler",
    "1-ton Gantry",
    "5-ton Gantry",
    "8'x20' Metal Plate",
    "8'x10' Metal Plate",
    "Lift Platform",
];

#[derive(Clone, Copy, Debug)]
pub struct EquipmentSection {
    pub label: &'static str,
    pub category: EquipmentCategory,
    pub options: &'static [&'static str],
}

pub const EQUIPMENT_SECTIONS: [EquipmentSection; 4] = [
    EquipmentSection {
        label: "Forklifts",
        category: EquipmentCategory::Forklifts,
        options: FORKLIFT_OPTIONS,
    },
    EquipmentSection {
        label: "Tractors",
        category: EquipmentCategory::Tractors,
        options: TRACTOR_OPTIONS,
    },
    EquipmentSection {
        label: "Trailers",
        category: EquipmentCategory::Trailers,
        options: TRAILER_OPTIONS,
    },
    EquipmentSection {
        label: "Material Handling & Rigging",
        category: EquipmentCategory::AdditionalEquipment,
        options: ADDITIONAL_EQUIPMENT_OPTIONS,
    },
];

pub fn options_for(category: EquipmentCategory) -> &'static [&'static str] {
    match category {
        EquipmentCategory::Forklifts => FORKLIFT_OPTIONS,
        EquipmentCategory::Tractors => TRACTOR_OPTIONS,
        EquipmentCategory::Trailers => TRAILER_OPTIONS,
        EquipmentCategory::AdditionalEquipment => ADDITIONAL_EQUIPMENT_OPTIONS,
    }
}

/// One auxiliary item implied by selecting a forklift model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImpliedItem {
    pub category: EquipmentCategory,
    pub name: &'static str,
}

const fn implied(category: EquipmentCategory, name: &'static str) -> ImpliedItem {
    ImpliedItem { category, name }
}

/// Heavier models ship on a 3-axle tractor with a Dovetail trailer.
const DOVETAIL_PAIRING: &[ImpliedItem] = &[
    implied(EquipmentCategory::Tractors, THREE_AXLE_TRACTOR),
    implied(EquipmentCategory::Trailers, DOVETAIL_TRAILER),
];

const VERSALIFT_4060_IMPLICATIONS: &[ImpliedItem] = &[
    implied(EquipmentCategory::Tractors, THREE_AXLE_TRACTOR),
    implied(EquipmentCategory::Trailers, DOVETAIL_TRAILER),
    implied(EquipmentCategory::Trailers, LOWBOY_TRAILER),
];

const VERSALIFT_6080_IMPLICATIONS: &[ImpliedItem] = &[
    implied(EquipmentCategory::Tractors, FOUR_AXLE_TRACTOR),
    implied(EquipmentCategory::Tractors, THREE_AXLE_TRACTOR),
    implied(EquipmentCategory::Trailers, DOVETAIL_TRAILER),
    implied(EquipmentCategory::Trailers, LOWBOY_TRAILER),
    implied(EquipmentCategory::Forklifts, "Forklift (15k)"),
];

const TRILIFTER_IMPLICATIONS: &[ImpliedItem] = &[
    implied(EquipmentCategory::Tractors, FOUR_AXLE_TRACTOR),
    implied(EquipmentCategory::Trailers, LOWBOY_TRAILER),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ForkliftModel {
    Forklift5k,
    Forklift8k,
    Forklift15k,
    Forklift30k,
    Forklift12kReach,
    Forklift20kReach,
    Hoist1826,
    Versalift2535,
    Versalift4060,
    Versalift6080,
    Trilifter,
}

impl ForkliftModel {
    pub const ALL: [ForkliftModel; 11] = [
        ForkliftModel::Forklift5k,
        ForkliftModel::Forklift8k,
        ForkliftModel::Forklift15k,
        ForkliftModel::Forklift30k,
        ForkliftModel::Forklift12kReach,
        ForkliftModel::Forklift20kReach,
        ForkliftModel::Hoist1826,
        ForkliftModel::Versalift2535,
        ForkliftModel::Versalift4060,
        ForkliftModel::Versalift6080,
        ForkliftModel::Trilifter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Forklift5k => "Forklift (5k)",
            Self::Forklift8k => "Forklift (8k)",
            Self::Forklift15k => "Forklift (15k)",
            Self::Forklift30k => "Forklift (30k)",
            Self::Forklift12kReach => "Forklift (12k Reach)",
            Self::Forklift20kReach => "Forklift (20k Reach)",
            Self::Hoist1826 => "Forklift – Hoist 18/26",
            Self::Versalift2535 => "Versalift 25/35",
            Self::Versalift4060 => "Versalift 40/60",
            Self::Versalift6080 => "Versalift 60/80",
            Self::Trilifter => "Trilifter",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|model| model.name() == name)
    }

    /// The three models a Rollback tractor can carry.
    pub fn is_small(self) -> bool {
        matches!(self, Self::Forklift5k | Self::Forklift8k | Self::Forklift15k)
    }

    /// Auxiliary equipment implied by selecting this model.
    ///
    /// The table must stay acyclic: a row may imply another forklift model
    /// only if that model's own row implies no forklifts. Verified by test.
    pub fn implied_equipment(self) -> &'static [ImpliedItem] {
        match self {
            Self::Forklift5k | Self::Forklift8k | Self::Forklift15k | Self::Forklift12kReach => &[],
            Self::Forklift30k | Self::Forklift20kReach | Self::Hoist1826 | Self::Versalift2535 => {
                DOVETAIL_PAIRING
            }
            Self::Versalift4060 => VERSALIFT_4060_IMPLICATIONS,
            Self::Versalift6080 => VERSALIFT_6080_IMPLICATIONS,
            Self::Trilifter => TRILIFTER_IMPLICATIONS,
        }
    }

    pub fn requires_three_axle(self) -> bool {
        self.implied_equipment()
            .iter()
            .any(|item| item.category == EquipmentCategory::Tractors && item.name == THREE_AXLE_TRACTOR)
    }

    pub fn requires_dovetail(self) -> bool {
        self.implied_equipment()
            .iter()
            .any(|item| item.category == EquipmentCategory::Trailers && item.name == DOVETAIL_TRAILER)
    }
}

pub fn implied_equipment_for(name: &str) -> &'static [ImpliedItem] {
    ForkliftModel::from_name(name).map_or(&[], ForkliftModel::implied_equipment)
}

pub fn is_small_forklift(name: &str) -> bool {
    ForkliftModel::from_name(name).is_some_and(ForkliftModel::is_small)
}

pub fn requires_three_axle(name: &str) -> bool {
    ForkliftModel::from_name(name).is_some_and(ForkliftModel::requires_three_axle)
}

pub fn requires_dovetail(name: &str) -> bool {
    ForkliftModel::from_name(name).is_some_and(ForkliftModel::requires_dovetail)
}
