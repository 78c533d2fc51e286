use std::fs;
use std::path::Path;

use rigquote_core::merge::ExtractionPatch;
use rigquote_core::rules;
use rigquote_core::snapshot::QuoteSnapshot;

use crate::commands::CommandResult;

pub fn run(snapshot_path: &Path, patch_path: &Path) -> CommandResult {
    let mut snapshot = match QuoteSnapshot::load(snapshot_path) {
        Ok(snapshot) => snapshot,
        Err(error) => {
            return CommandResult::failure("merge", "snapshot_load", error.to_string(), 4);
        }
    };

    let raw_patch = match fs::read_to_string(patch_path) {
        Ok(raw) => raw,
        Err(error) => {
            return CommandResult::failure(
                "merge",
                "patch_read",
                format!("could not read patch `{}`: {error}", patch_path.display()),
                4,
            );
        }
    };

    let patch = match ExtractionPatch::from_json(&raw_patch) {
        Ok(patch) => patch,
        Err(error) => {
            return CommandResult::failure(
                "merge",
                "patch_parse",
                format!("could not parse patch `{}`: {error}", patch_path.display()),
                2,
            );
        }
    };

    patch.apply(&mut snapshot);
    rules::apply_derived_equipment(&mut snapshot.equipment_requirements);

    snapshot.touch();
    if let Err(error) = snapshot.store(snapshot_path) {
        return CommandResult::failure("merge", "snapshot_write", error.to_string(), 4);
    }

    CommandResult::success(
        "merge",
        format!(
            "patch {} applied to {}",
            patch_path.display(),
            snapshot_path.display()
        ),
    )
}
