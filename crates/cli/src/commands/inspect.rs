use std::path::Path;

use serde::Serialize;

use rigquote_core::catalog::{
    EquipmentCategory, DOVETAIL_TRAILER, ROLLBACK_TRACTOR, THREE_AXLE_TRACTOR,
};
use rigquote_core::rules;
use rigquote_core::snapshot::QuoteSnapshot;

use crate::commands::CommandResult;

#[derive(Debug, Serialize)]
struct InspectReport {
    session_id: Option<String>,
    quote_number: Option<String>,
    total_pieces: u32,
    total_weight_lbs: f64,
    storage_cost: Option<String>,
    derived: DerivedSummary,
    unfilled_fields: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct DerivedSummary {
    rollback_tractors: u32,
    three_axle_tractors: u32,
    dovetail_trailers: u32,
}

pub fn run(snapshot_path: &Path, json: bool) -> CommandResult {
    let mut snapshot = match QuoteSnapshot::load(snapshot_path) {
        Ok(snapshot) => snapshot,
        Err(error) => {
            return CommandResult::failure("inspect", "snapshot_load", error.to_string(), 4);
        }
    };

    rules::apply_derived_equipment(&mut snapshot.equipment_requirements);

    let requirements = &snapshot.equipment_requirements;
    let report = InspectReport {
        session_id: snapshot.session_id.clone(),
        quote_number: snapshot.quote_number.clone(),
        total_pieces: snapshot.logistics.total_piece_count(),
        total_weight_lbs: snapshot.logistics.total_weight_lbs(),
        storage_cost: snapshot.logistics.storage_cost().map(|cost| format!("${}", cost.round_dp(2))),
        derived: DerivedSummary {
            rollback_tractors: requirements
                .quantity_of(EquipmentCategory::Tractors, ROLLBACK_TRACTOR),
            three_axle_tractors: requirements
                .quantity_of(EquipmentCategory::Tractors, THREE_AXLE_TRACTOR),
            dovetail_trailers: requirements
                .quantity_of(EquipmentCategory::Trailers, DOVETAIL_TRAILER),
        },
        unfilled_fields: unfilled_fields(&snapshot),
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(output) => CommandResult { exit_code: 0, output },
            Err(error) => {
                CommandResult::failure("inspect", "serialization", error.to_string(), 4)
            }
        }
    } else {
        CommandResult { exit_code: 0, output: human_report(&report) }
    }
}

fn unfilled_fields(snapshot: &QuoteSnapshot) -> Vec<&'static str> {
    let project = &snapshot.project;
    let logistics = &snapshot.logistics;
    let fields: [(&'static str, &str); 10] = [
        ("projectName", &project.project_name),
        ("companyName", &project.company_name),
        ("contactName", &project.contact_name),
        ("siteAddress", &project.site_address),
        ("sitePhone", &project.site_phone),
        ("shopLocation", &project.shop_location),
        ("email", &project.email),
        ("pickupAddress", &logistics.pickup_address),
        ("deliveryAddress", &logistics.delivery_address),
        ("truckType", &logistics.truck_type),
    ];

    fields
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
}

fn human_report(report: &InspectReport) -> String {
    let mut lines = Vec::new();
    lines.push(format!("session:      {}", report.session_id.as_deref().unwrap_or("-")));
    lines.push(format!("quote number: {}", report.quote_number.as_deref().unwrap_or("-")));
    lines.push(format!("total pieces: {}", report.total_pieces));
    lines.push(format!("total weight: {} lbs", report.total_weight_lbs));
    if let Some(cost) = &report.storage_cost {
        lines.push(format!("storage cost: {cost}"));
    }
    lines.push(format!(
        "derived:      Rollback x{}, 3-axle tractor x{}, Dovetail x{}",
        report.derived.rollback_tractors,
        report.derived.three_axle_tractors,
        report.derived.dovetail_trailers
    ));
    if report.unfilled_fields.is_empty() {
        lines.push("unfilled:     none".to_string());
    } else {
        lines.push(format!("unfilled:     {}", report.unfilled_fields.join(", ")));
    }
    lines.join("\n")
}
