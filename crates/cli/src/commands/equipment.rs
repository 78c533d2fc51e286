use std::path::Path;

use clap::Subcommand;

use rigquote_core::catalog::EquipmentCategory;
use rigquote_core::rules;
use rigquote_core::snapshot::QuoteSnapshot;
use rigquote_core::EquipmentItem;

use crate::commands::CommandResult;

#[derive(Debug, Subcommand)]
pub enum EquipmentAction {
    #[command(about = "Add one unit (plus implied auxiliary equipment for forklifts)")]
    Add {
        #[arg(long, help = "forklifts | tractors | trailers | additional")]
        category: String,
        name: String,
    },
    #[command(about = "Apply a quantity delta; items at or below zero are removed")]
    Adjust {
        #[arg(long, help = "forklifts | tractors | trailers | additional")]
        category: String,
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        delta: i64,
    },
    #[command(about = "Remove an item regardless of quantity")]
    Remove {
        #[arg(long, help = "forklifts | tractors | trailers | additional")]
        category: String,
        name: String,
    },
}

pub fn run(snapshot_path: &Path, action: EquipmentAction) -> CommandResult {
    let mut snapshot = match QuoteSnapshot::load(snapshot_path) {
        Ok(snapshot) => snapshot,
        Err(error) => {
            return CommandResult::failure("equipment", "snapshot_load", error.to_string(), 4);
        }
    };

    let (category_raw, applied) = match &action {
        EquipmentAction::Add { category, name } => (category.clone(), format!("added {name}")),
        EquipmentAction::Adjust { category, name, delta } => {
            (category.clone(), format!("adjusted {name} by {delta}"))
        }
        EquipmentAction::Remove { category, name } => {
            (category.clone(), format!("removed {name}"))
        }
    };

    let category = match category_raw.parse::<EquipmentCategory>() {
        Ok(category) => category,
        Err(error) => {
            return CommandResult::failure("equipment", "unknown_category", error.to_string(), 2);
        }
    };

    let requirements = &mut snapshot.equipment_requirements;
    match action {
        EquipmentAction::Add { name, .. } => rules::add_equipment(requirements, category, &name),
        EquipmentAction::Adjust { name, delta, .. } => {
            rules::adjust_quantity(requirements, category, &name, delta)
        }
        EquipmentAction::Remove { name, .. } => {
            rules::remove_equipment(requirements, category, &name)
        }
    }
    rules::apply_derived_equipment(requirements);

    snapshot.touch();
    if let Err(error) = snapshot.store(snapshot_path) {
        return CommandResult::failure("equipment", "snapshot_write", error.to_string(), 4);
    }

    CommandResult::success(
        "equipment",
        format!(
            "{applied}; forklifts: {}; tractors: {}; trailers: {}",
            summarize(&snapshot.equipment_requirements.forklifts),
            summarize(&snapshot.equipment_requirements.tractors),
            summarize(&snapshot.equipment_requirements.trailers),
        ),
    )
}

fn summarize(items: &[EquipmentItem]) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    items
        .iter()
        .map(|item| format!("{} x{}", item.name, item.quantity))
        .collect::<Vec<_>>()
        .join(", ")
}
