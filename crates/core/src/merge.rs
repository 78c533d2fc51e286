//! Extraction merge
//!
//! The text-extraction collaborator returns partial project/logistics data
//! which the form bulk-merges over its live state. Patches carry every
//! field as an `Option`: present fields overwrite (including present-but-
//! empty strings, matching the original spread semantics), absent fields
//! pass through, and list fields replace wholesale. Equipment lists
//! entering through a patch are re-normalized; callers recompute derived
//! equipment afterwards.

use serde::{Deserialize, Serialize};

use crate::domain::equipment::{EquipmentItem, EquipmentRequirements};
use crate::domain::logistics::{LogisticsRecord, Piece, StorageKind};
use crate::domain::project::ProjectRecord;
use crate::rules;
use crate::snapshot::QuoteSnapshot;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectPatch {
    pub project_name: Option<String>,
    pub company_name: Option<String>,
    pub contact_name: Option<String>,
    pub site_address: Option<String>,
    pub site_phone: Option<String>,
    pub shop_location: Option<String>,
    pub scope_of_work: Option<String>,
    pub email: Option<String>,
}

impl ProjectPatch {
    pub fn apply(self, record: &mut ProjectRecord) {
        if let Some(project_name) = self.project_name {
            record.project_name = project_name;
        }
        if let Some(company_name) = self.company_name {
            record.company_name = company_name;
        }
        if let Some(contact_name) = self.contact_name {
            record.contact_name = contact_name;
        }
        if let Some(site_address) = self.site_address {
            record.site_address = site_address;
        }
        if let Some(site_phone) = self.site_phone {
            record.site_phone = site_phone;
        }
        if let Some(shop_location) = self.shop_location {
            record.shop_location = shop_location;
        }
        if let Some(scope_of_work) = self.scope_of_work {
            record.scope_of_work = scope_of_work;
        }
        if let Some(email) = self.email {
            record.email = email;
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LogisticsPatch {
    pub pieces: Option<Vec<Piece>>,
    pub pickup_address: Option<String>,
    pub pickup_city: Option<String>,
    pub pickup_state: Option<String>,
    pub pickup_zip: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_city: Option<String>,
    pub delivery_state: Option<String>,
    pub delivery_zip: Option<String>,
    pub shipment_type: Option<String>,
    pub truck_type: Option<String>,
    /// Wire storage selector; a present empty string clears storage.
    pub storage_type: Option<String>,
    pub storage_sq_ft: Option<String>,
}

impl LogisticsPatch {
    pub fn apply(self, record: &mut LogisticsRecord) {
        if let Some(mut pieces) = self.pieces {
            for piece in &mut pieces {
                piece.quantity = piece.quantity.max(1);
            }
            record.pieces = pieces;
        }
        if let Some(pickup_address) = self.pickup_address {
            record.pickup_address = pickup_address;
        }
        if let Some(pickup_city) = self.pickup_city {
            record.pickup_city = pickup_city;
        }
        if let Some(pickup_state) = self.pickup_state {
            record.pickup_state = pickup_state;
        }
        if let Some(pickup_zip) = self.pickup_zip {
            record.pickup_zip = pickup_zip;
        }
        if let Some(delivery_address) = self.delivery_address {
            record.delivery_address = delivery_address;
        }
        if let Some(delivery_city) = self.delivery_city {
            record.delivery_city = delivery_city;
        }
        if let Some(delivery_state) = self.delivery_state {
            record.delivery_state = delivery_state;
        }
        if let Some(delivery_zip) = self.delivery_zip {
            record.delivery_zip = delivery_zip;
        }
        if let Some(shipment_type) = self.shipment_type {
            record.shipment_type = shipment_type;
        }
        if let Some(truck_type) = self.truck_type {
            record.truck_type = truck_type;
        }
        if let Some(storage_type) = self.storage_type {
            record.storage_type = StorageKind::from_wire(&storage_type);
        }
        if let Some(storage_sq_ft) = self.storage_sq_ft {
            record.storage_sq_ft = storage_sq_ft;
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EquipmentPatch {
    pub crew_size: Option<String>,
    pub forklifts: Option<Vec<EquipmentItem>>,
    pub tractors: Option<Vec<EquipmentItem>>,
    pub trailers: Option<Vec<EquipmentItem>>,
    pub additional_equipment: Option<Vec<EquipmentItem>>,
}

impl EquipmentPatch {
    pub fn apply(self, requirements: &mut EquipmentRequirements) {
        if let Some(crew_size) = self.crew_size {
            requirements.crew_size = crew_size;
        }
        if let Some(forklifts) = self.forklifts {
            requirements.forklifts = forklifts;
        }
        if let Some(tractors) = self.tractors {
            requirements.tractors = tractors;
        }
        if let Some(trailers) = self.trailers {
            requirements.trailers = trailers;
        }
        if let Some(additional_equipment) = self.additional_equipment {
            requirements.additional_equipment = additional_equipment;
        }
        rules::normalize_requirements(requirements);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractionPatch {
    pub project: Option<ProjectPatch>,
    pub logistics: Option<LogisticsPatch>,
    pub equipment_requirements: Option<EquipmentPatch>,
}

impl ExtractionPatch {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn apply(self, snapshot: &mut QuoteSnapshot) {
        if let Some(project) = self.project {
            project.apply(&mut snapshot.project);
        }
        if let Some(logistics) = self.logistics {
            logistics.apply(&mut snapshot.logistics);
        }
        if let Some(equipment) = self.equipment_requirements {
            equipment.apply(&mut snapshot.equipment_requirements);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::equipment::EquipmentItem;
    use crate::domain::logistics::{LogisticsRecord, Piece, StorageKind};
    use crate::domain::project::ProjectRecord;
    use crate::snapshot::QuoteSnapshot;

    use super::{EquipmentPatch, ExtractionPatch, LogisticsPatch, ProjectPatch};

    #[test]
    fn project_patch_overwrites_only_present_fields() {
        let mut record = ProjectRecord {
            project_name: "Old name".to_string(),
            contact_name: "Dana Reyes".to_string(),
            ..ProjectRecord::default()
        };

        ProjectPatch {
            project_name: Some("Chiller swap".to_string()),
            site_phone: Some(String::new()),
            ..ProjectPatch::default()
        }
        .apply(&mut record);

        assert_eq!(record.project_name, "Chiller swap");
        // A present empty string still overwrites (spread semantics).
        assert_eq!(record.site_phone, "");
        assert_eq!(record.contact_name, "Dana Reyes");
        assert_eq!(record.shop_location, "Shop");
    }

    #[test]
    fn logistics_patch_replaces_pieces_wholesale() {
        let mut record = LogisticsRecord {
            pieces: vec![Piece { description: "Old".to_string(), ..Piece::default() }],
            ..LogisticsRecord::default()
        };

        LogisticsPatch {
            pieces: Some(vec![Piece {
                description: "Pump".to_string(),
                quantity: 0,
                ..Piece::default()
            }]),
            storage_type: Some("outside".to_string()),
            ..LogisticsPatch::default()
        }
        .apply(&mut record);

        assert_eq!(record.pieces.len(), 1);
        assert_eq!(record.pieces[0].description, "Pump");
        assert_eq!(record.pieces[0].quantity, 1);
        assert_eq!(record.storage_type, Some(StorageKind::Outside));
    }

    #[test]
    fn logistics_patch_clears_storage_with_an_empty_selector() {
        let mut record = LogisticsRecord {
            storage_type: Some(StorageKind::Inside),
            ..LogisticsRecord::default()
        };

        LogisticsPatch { storage_type: Some(String::new()), ..LogisticsPatch::default() }
            .apply(&mut record);
        assert_eq!(record.storage_type, None);
    }

    #[test]
    fn equipment_patch_renormalizes_incoming_lists() {
        let mut snapshot = QuoteSnapshot::default();
        snapshot.equipment_requirements.tractors = vec![EquipmentItem::new("Rollback", 1)];

        EquipmentPatch {
            forklifts: Some(vec![
                EquipmentItem::new("Forklift (5k)", 2),
                EquipmentItem::new("Forklift (5k)", 1),
                EquipmentItem::new("", 9),
            ]),
            ..EquipmentPatch::default()
        }
        .apply(&mut snapshot.equipment_requirements);

        assert_eq!(
            snapshot.equipment_requirements.forklifts,
            vec![EquipmentItem::new("Forklift (5k)", 3)]
        );
        // Untouched categories pass through.
        assert_eq!(
            snapshot.equipment_requirements.tractors,
            vec![EquipmentItem::new("Rollback", 1)]
        );
    }

    #[test]
    fn extraction_patch_parses_from_wire_json_and_applies() {
        let mut snapshot = QuoteSnapshot::default();
        let patch = ExtractionPatch::from_json(
            r#"{
                "project": { "companyName": "Cascade Fabrication" },
                "logistics": { "truckType": "Flatbed" },
                "equipmentRequirements": { "crewSize": "3" }
            }"#,
        )
        .expect("parse");

        patch.apply(&mut snapshot);
        assert_eq!(snapshot.project.company_name, "Cascade Fabrication");
        assert_eq!(snapshot.logistics.truck_type, "Flatbed");
        assert_eq!(snapshot.equipment_requirements.crew_size, "3");
    }
}
