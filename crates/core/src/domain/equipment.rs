use serde::{Deserialize, Serialize};

use crate::catalog::EquipmentCategory;

/// One selected line of equipment, unique by `name` within its category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentItem {
    pub name: String,
    pub quantity: u32,
}

impl Default for EquipmentItem {
    fn default() -> Self {
        Self { name: String::new(), quantity: 1 }
    }
}

impl EquipmentItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self { name: name.into(), quantity }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EquipmentRequirements {
    pub crew_size: String,
    pub forklifts: Vec<EquipmentItem>,
    pub tractors: Vec<EquipmentItem>,
    pub trailers: Vec<EquipmentItem>,
    pub additional_equipment: Vec<EquipmentItem>,
}

impl EquipmentRequirements {
    pub fn items(&self, category: EquipmentCategory) -> &[EquipmentItem] {
        match category {
            EquipmentCategory::Forklifts => &self.forklifts,
            EquipmentCategory::Tractors => &self.tractors,
            EquipmentCategory::Trailers => &self.trailers,
            EquipmentCategory::AdditionalEquipment => &self.additional_equipment,
        }
    }

    pub fn items_mut(&mut self, category: EquipmentCategory) -> &mut Vec<EquipmentItem> {
        match category {
            EquipmentCategory::Forklifts => &mut self.forklifts,
            EquipmentCategory::Tractors => &mut self.tractors,
            EquipmentCategory::Trailers => &mut self.trailers,
            EquipmentCategory::AdditionalEquipment => &mut self.additional_equipment,
        }
    }

    pub fn find(&self, category: EquipmentCategory, name: &str) -> Option<&EquipmentItem> {
        self.items(category).iter().find(|item| item.name == name)
    }

    pub fn quantity_of(&self, category: EquipmentCategory, name: &str) -> u32 {
        self.find(category, name).map_or(0, |item| item.quantity)
    }

    /// True when any category carries a selectable item.
    pub fn has_items(&self) -> bool {
        EquipmentCategory::ALL
            .into_iter()
            .any(|category| self.items(category).iter().any(|item| item.quantity > 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_the_snapshot_wire_field_names() {
        let requirements = EquipmentRequirements {
            crew_size: "3".to_string(),
            additional_equipment: vec![EquipmentItem::new("1-ton Gantry", 2)],
            ..EquipmentRequirements::default()
        };

        let json = serde_json::to_value(&requirements).expect("serialize");
        assert_eq!(json["crewSize"], "3");
        assert_eq!(json["additionalEquipment"][0]["name"], "1-ton Gantry");
        assert_eq!(json["additionalEquipment"][0]["quantity"], 2);
    }

    #[test]
    fn deserializes_from_a_partial_record() {
        let requirements: EquipmentRequirements =
            serde_json::from_str(r#"{"forklifts":[{"name":"Trilifter"}]}"#).expect("deserialize");

        assert_eq!(requirements.crew_size, "");
        assert_eq!(requirements.forklifts, vec![EquipmentItem::new("Trilifter", 1)]);
        assert!(requirements.tractors.is_empty());
    }

    #[test]
    fn quantity_of_reports_zero_for_missing_items() {
        let requirements = EquipmentRequirements::default();
        assert_eq!(requirements.quantity_of(EquipmentCategory::Tractors, "Rollback"), 0);
        assert!(!requirements.has_items());
    }
}
