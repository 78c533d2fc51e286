use std::path::Path;

use rigquote_core::rules;
use rigquote_core::snapshot::QuoteSnapshot;
use rigquote_core::templates::{QuoteTemplates, TemplateKind};

use crate::commands::CommandResult;

pub fn run(snapshot_path: &Path, template: &str) -> CommandResult {
    let mut snapshot = match QuoteSnapshot::load(snapshot_path) {
        Ok(snapshot) => snapshot,
        Err(error) => {
            return CommandResult::failure("render", "snapshot_load", error.to_string(), 4);
        }
    };

    rules::apply_derived_equipment(&mut snapshot.equipment_requirements);

    let kinds: Vec<TemplateKind> = if template.trim().eq_ignore_ascii_case("all") {
        TemplateKind::ALL.to_vec()
    } else {
        match template.parse::<TemplateKind>() {
            Ok(kind) => vec![kind],
            Err(error) => {
                return CommandResult::failure("render", "unknown_template", error.to_string(), 2);
            }
        }
    };

    let templates = QuoteTemplates::new();
    let banner = kinds.len() > 1;
    let mut documents = Vec::with_capacity(kinds.len());

    for kind in kinds {
        let rendered = match templates.render(
            kind,
            &snapshot.project,
            &snapshot.logistics,
            &snapshot.equipment_requirements,
        ) {
            Ok(rendered) => rendered,
            Err(error) => {
                return CommandResult::failure("render", "template_render", error.to_string(), 5);
            }
        };

        if banner {
            documents.push(format!("=== {} ===\n\n{rendered}", kind.title()));
        } else {
            documents.push(rendered);
        }
    }

    CommandResult { exit_code: 0, output: documents.join("\n") }
}
