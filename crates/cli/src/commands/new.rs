use std::path::Path;

use rigquote_core::config::{AppConfig, LoadOptions};
use rigquote_core::snapshot::QuoteSnapshot;
use rigquote_core::Piece;

use crate::commands::CommandResult;

pub fn run(output: Option<&Path>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "new",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let mut snapshot = QuoteSnapshot::new_session();
    snapshot.project.shop_location = config.defaults.shop_location.clone();
    snapshot.logistics.shipment_type = config.defaults.shipment_type.clone();
    // The form opens with one blank cargo row.
    snapshot.logistics.pieces.push(Piece::default());

    match output {
        Some(path) => match snapshot.store(path) {
            Ok(()) => {
                CommandResult::success("new", format!("snapshot written to {}", path.display()))
            }
            Err(error) => CommandResult::failure("new", "snapshot_write", error.to_string(), 4),
        },
        None => match snapshot.to_json() {
            Ok(json) => CommandResult { exit_code: 0, output: json },
            Err(error) => CommandResult::failure("new", "serialization", error.to_string(), 4),
        },
    }
}
