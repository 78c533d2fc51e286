//! Equipment rule engine
//!
//! Quantity-adjustment operations over [`EquipmentRequirements`] plus the
//! derivation of auxiliary tractor/trailer items from the current forklift
//! selection. Operations are total: unknown names insert as new entries and
//! quantities never go non-positive.
//!
//! Derivation is an explicit, pure recompute the caller runs after every
//! forklift mutation, rather than an implicit reactive effect. It manages
//! exactly three derived names — the Rollback tractor, the 3-axle tractor,
//! and the Dovetail trailer — and leaves every other tractor/trailer line
//! untouched.

use tracing::debug;

use crate::catalog::{
    self, EquipmentCategory, DOVETAIL_TRAILER, ROLLBACK_TRACTOR, THREE_AXLE_TRACTOR,
};
use crate::domain::equipment::{EquipmentItem, EquipmentRequirements};

/// Small-forklift batches one Dovetail/3-axle pairing can carry.
const SMALL_FORKLIFT_GROUP_SIZE: u32 = 3;

/// Increment `name` in `category` by one, inserting at quantity 1 when
/// absent. Selecting a forklift also adds each item its model implies.
pub fn add_equipment(
    requirements: &mut EquipmentRequirements,
    category: EquipmentCategory,
    name: &str,
) {
    let name = name.trim();
    if name.is_empty() {
        return;
    }

    upsert_add(requirements.items_mut(category), name, 1);

    if category == EquipmentCategory::Forklifts {
        let implied = catalog::implied_equipment_for(name);
        if !implied.is_empty() {
            debug!(
                event_name = "equipment.add.implied_applied",
                model = name,
                implied_count = implied.len(),
                "applying implied auxiliary equipment"
            );
        }
        for item in implied {
            add_equipment(requirements, item.category, item.name);
        }
    }
}

/// Apply `delta` to the matching item. Results at or below zero remove the
/// item; an absent item with a positive delta inserts at that quantity; an
/// absent item with a non-positive delta is a no-op.
pub fn adjust_quantity(
    requirements: &mut EquipmentRequirements,
    category: EquipmentCategory,
    name: &str,
    delta: i64,
) {
    let items = requirements.items_mut(category);
    match items.iter().position(|item| item.name == name) {
        Some(index) => {
            let next = i64::from(items[index].quantity) + delta;
            if next <= 0 {
                items.remove(index);
            } else {
                items[index].quantity = next as u32;
            }
        }
        None if delta > 0 => items.push(EquipmentItem::new(name, delta as u32)),
        None => {}
    }
}

/// Delete the item regardless of quantity.
pub fn remove_equipment(
    requirements: &mut EquipmentRequirements,
    category: EquipmentCategory,
    name: &str,
) {
    requirements.items_mut(category).retain(|item| item.name != name);
}

/// Derive required Rollback/3-axle/Dovetail counts from the forklift list
/// and apply them as upsert-or-remove over the current tractors/trailers.
///
/// Pure and idempotent; manually added tractor/trailer lines of other
/// names pass through untouched.
pub fn recompute_derived_equipment(
    forklifts: &[EquipmentItem],
    tractors: &[EquipmentItem],
    trailers: &[EquipmentItem],
) -> (Vec<EquipmentItem>, Vec<EquipmentItem>) {
    let rollback_count: u32 = forklifts
        .iter()
        .filter(|item| catalog::is_small_forklift(&item.name))
        .map(|item| item.quantity)
        .sum();

    // A single small forklift rides a Rollback; two or more switch to
    // grouped Dovetail/3-axle support in batches of three.
    let rollback_required = u32::from(rollback_count == 1);
    let small_forklift_groups = if rollback_count > 1 {
        rollback_count.div_ceil(SMALL_FORKLIFT_GROUP_SIZE)
    } else {
        0
    };

    let requires_three_axle = forklifts
        .iter()
        .any(|item| item.quantity > 0 && catalog::requires_three_axle(&item.name));
    let requires_dovetail = forklifts
        .iter()
        .any(|item| item.quantity > 0 && catalog::requires_dovetail(&item.name));

    let three_axle_required = u32::from(requires_three_axle).max(small_forklift_groups);
    let dovetail_required = u32::from(requires_dovetail).max(small_forklift_groups);

    debug!(
        event_name = "equipment.recompute.derived",
        rollback_count,
        small_forklift_groups,
        three_axle_required,
        dovetail_required,
        "recomputed derived equipment"
    );

    let mut tractors = tractors.to_vec();
    upsert_or_remove(&mut tractors, ROLLBACK_TRACTOR, rollback_required);
    upsert_or_remove(&mut tractors, THREE_AXLE_TRACTOR, three_axle_required);

    let mut trailers = trailers.to_vec();
    upsert_or_remove(&mut trailers, DOVETAIL_TRAILER, dovetail_required);

    (tractors, trailers)
}

/// Run the derivation in place over a requirements record.
pub fn apply_derived_equipment(requirements: &mut EquipmentRequirements) {
    let (tractors, trailers) = recompute_derived_equipment(
        &requirements.forklifts,
        &requirements.tractors,
        &requirements.trailers,
    );
    requirements.tractors = tractors;
    requirements.trailers = trailers;
}

/// Re-establish the list invariants on externally produced data: empty
/// names and zero quantities drop, duplicate names collapse by summing.
pub fn normalize_requirements(requirements: &mut EquipmentRequirements) {
    for category in EquipmentCategory::ALL {
        let items = requirements.items_mut(category);
        let mut normalized: Vec<EquipmentItem> = Vec::with_capacity(items.len());
        for item in items.drain(..) {
            let name = item.name.trim();
            if name.is_empty() || item.quantity == 0 {
                continue;
            }
            match normalized.iter_mut().find(|existing| existing.name == name) {
                Some(existing) => existing.quantity += item.quantity,
                None => normalized.push(EquipmentItem::new(name, item.quantity)),
            }
        }
        *items = normalized;
    }
}

fn upsert_add(items: &mut Vec<EquipmentItem>, name: &str, delta: u32) {
    match items.iter_mut().find(|item| item.name == name) {
        Some(item) => item.quantity += delta,
        None => items.push(EquipmentItem::new(name, delta)),
    }
}

fn upsert_or_remove(items: &mut Vec<EquipmentItem>, name: &str, quantity: u32) {
    match items.iter().position(|item| item.name == name) {
        Some(index) if quantity == 0 => {
            items.remove(index);
        }
        Some(index) => items[index].quantity = quantity,
        None if quantity > 0 => items.push(EquipmentItem::new(name, quantity)),
        None => {}
    }
}
