pub mod catalog;
pub mod config;
pub mod domain;
pub mod merge;
pub mod rules;
pub mod snapshot;
pub mod templates;

pub use catalog::{EquipmentCategory, EquipmentSection, ForkliftModel, ImpliedItem};
pub use domain::equipment::{EquipmentItem, EquipmentRequirements};
pub use domain::logistics::{LogisticsRecord, Piece, StorageKind};
pub use domain::project::ProjectRecord;
pub use merge::{EquipmentPatch, ExtractionPatch, LogisticsPatch, ProjectPatch};
pub use rules::{
    add_equipment, adjust_quantity, apply_derived_equipment, recompute_derived_equipment,
    remove_equipment,
};
pub use snapshot::{new_session_id, QuoteSnapshot, SnapshotError};
pub use templates::{QuoteTemplates, TemplateError, TemplateKind};
