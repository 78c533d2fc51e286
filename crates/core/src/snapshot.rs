//! Quote snapshots
//!
//! The save/load unit for a form session: one flat JSON document holding
//! the project, logistics, and equipment records plus session metadata.
//! Loading tolerates partial or missing fields — `{}` is a valid snapshot —
//! and re-establishes the equipment/piece invariants on the way in.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::equipment::EquipmentRequirements;
use crate::domain::logistics::LogisticsRecord;
use crate::domain::project::ProjectRecord;
use crate::rules;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("could not read snapshot `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse snapshot `{path}`: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("could not write snapshot `{path}`: {source}")]
    Write { path: PathBuf, source: std::io::Error },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteSnapshot {
    pub session_id: Option<String>,
    pub quote_number: Option<String>,
    pub saved_at: Option<DateTime<Utc>>,
    pub project: ProjectRecord,
    pub logistics: LogisticsRecord,
    pub equipment_requirements: EquipmentRequirements,
}

impl QuoteSnapshot {
    /// Fresh snapshot under a newly generated session key.
    pub fn new_session() -> Self {
        Self { session_id: Some(new_session_id()), ..Self::default() }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut snapshot: Self = serde_json::from_str(json)?;
        snapshot.normalize();
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| SnapshotError::Read { path: path.to_path_buf(), source })?;
        Self::from_json(&raw)
            .map_err(|source| SnapshotError::Parse { path: path.to_path_buf(), source })
    }

    pub fn store(&self, path: &Path) -> Result<(), SnapshotError> {
        let json = self
            .to_json()
            .map_err(|source| SnapshotError::Write {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, source),
            })?;
        fs::write(path, json + "\n")
            .map_err(|source| SnapshotError::Write { path: path.to_path_buf(), source })
    }

    /// Stamp save metadata: keeps an existing session key, assigns one when
    /// absent, and refreshes the saved-at timestamp.
    pub fn touch(&mut self) {
        if self.session_id.as_deref().map_or(true, |id| id.trim().is_empty()) {
            self.session_id = Some(new_session_id());
        }
        self.saved_at = Some(Utc::now());
    }

    fn normalize(&mut self) {
        for piece in &mut self.logistics.pieces {
            piece.quantity = piece.quantity.max(1);
        }
        rules::normalize_requirements(&mut self.equipment_requirements);
    }
}

pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use crate::domain::equipment::EquipmentItem;
    use crate::domain::logistics::Piece;

    use super::{new_session_id, QuoteSnapshot};

    #[test]
    fn empty_object_is_a_valid_snapshot() {
        let snapshot = QuoteSnapshot::from_json("{}").expect("parse");
        assert_eq!(snapshot.project.shop_location, "Shop");
        assert_eq!(snapshot.logistics.shipment_type, "LTL");
        assert!(snapshot.equipment_requirements.forklifts.is_empty());
        assert_eq!(snapshot.session_id, None);
    }

    #[test]
    fn round_trips_field_wise() {
        let mut snapshot = QuoteSnapshot::new_session();
        snapshot.project.project_name = "Press relocation".to_string();
        snapshot.logistics.pieces = vec![Piece {
            description: "Pump".to_string(),
            quantity: 2,
            weight: "500".to_string(),
            ..Piece::default()
        }];
        snapshot.equipment_requirements.forklifts = vec![EquipmentItem::new("Trilifter", 2)];

        let json = snapshot.to_json().expect("serialize");
        let reloaded = QuoteSnapshot::from_json(&json).expect("parse");
        assert_eq!(snapshot, reloaded);
    }

    #[test]
    fn load_normalizes_piece_and_equipment_invariants() {
        let json = r#"{
            "logistics": { "pieces": [{ "description": "Pump", "quantity": 0 }] },
            "equipmentRequirements": {
                "forklifts": [
                    { "name": "Forklift (5k)", "quantity": 1 },
                    { "name": "Forklift (5k)", "quantity": 2 },
                    { "name": "", "quantity": 3 }
                ]
            }
        }"#;

        let snapshot = QuoteSnapshot::from_json(json).expect("parse");
        assert_eq!(snapshot.logistics.pieces[0].quantity, 1);
        assert_eq!(
            snapshot.equipment_requirements.forklifts,
            vec![EquipmentItem::new("Forklift (5k)", 3)]
        );
    }

    #[test]
    fn touch_assigns_a_session_key_once() {
        let mut snapshot = QuoteSnapshot::default();
        snapshot.touch();
        let first = snapshot.session_id.clone().expect("session id");
        assert!(snapshot.saved_at.is_some());

        snapshot.touch();
        assert_eq!(snapshot.session_id, Some(first));
    }

    #[test]
    fn store_and_load_through_the_filesystem() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("quote.json");

        let mut snapshot = QuoteSnapshot::new_session();
        snapshot.project.company_name = "Cascade Fabrication".to_string();
        snapshot.store(&path).expect("store");

        let reloaded = QuoteSnapshot::load(&path).expect("load");
        assert_eq!(snapshot, reloaded);
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(new_session_id(), new_session_id());
    }
}
