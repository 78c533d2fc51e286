//! Quote document generation
//!
//! Renders the scope-of-work, customer email, and logistics-request email
//! documents from the current record snapshot using embedded Tera
//! templates. Rendering is a pure function of the records: every
//! interpolated field independently falls back to its bracketed
//! placeholder, so a fully-empty snapshot still produces a valid document.

use rust_decimal::Decimal;
use tera::{Context, Tera};
use thiserror::Error;

use crate::catalog::EquipmentCategory;
use crate::domain::equipment::{EquipmentItem, EquipmentRequirements};
use crate::domain::logistics::{LogisticsRecord, Piece};
use crate::domain::project::ProjectRecord;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template error: {0}")]
    Render(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateKind {
    ScopeOfWork,
    CustomerEmail,
    LogisticsEmail,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] =
        [TemplateKind::ScopeOfWork, TemplateKind::CustomerEmail, TemplateKind::LogisticsEmail];

    pub fn title(self) -> &'static str {
        match self {
            Self::ScopeOfWork => "Scope of Work",
            Self::CustomerEmail => "Customer Email",
            Self::LogisticsEmail => "Logistics Email",
        }
    }

    fn template_name(self) -> &'static str {
        match self {
            Self::ScopeOfWork => "scope_of_work.txt",
            Self::CustomerEmail => "customer_email.txt",
            Self::LogisticsEmail => "logistics_email.txt",
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown template `{0}` (expected scope|customer-email|logistics-email)")]
pub struct ParseTemplateKindError(String);

impl std::str::FromStr for TemplateKind {
    type Err = ParseTemplateKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "scope" | "scope-of-work" => Ok(Self::ScopeOfWork),
            "customer-email" | "email" => Ok(Self::CustomerEmail),
            "logistics-email" | "logistics" => Ok(Self::LogisticsEmail),
            other => Err(ParseTemplateKindError(other.to_string())),
        }
    }
}

/// Document renderer with the three quote templates embedded.
#[derive(Clone, Debug)]
pub struct QuoteTemplates {
    tera: Tera,
}

impl QuoteTemplates {
    pub fn new() -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());

        tera.add_raw_template(
            "scope_of_work.txt",
            include_str!("../../../templates/scope_of_work.txt.tera"),
        )
        .expect("failed to load scope_of_work.txt.tera template");

        tera.add_raw_template(
            "customer_email.txt",
            include_str!("../../../templates/customer_email.txt.tera"),
        )
        .expect("failed to load customer_email.txt.tera template");

        tera.add_raw_template(
            "logistics_email.txt",
            include_str!("../../../templates/logistics_email.txt.tera"),
        )
        .expect("failed to load logistics_email.txt.tera template");

        Self { tera }
    }

    pub fn render(
        &self,
        kind: TemplateKind,
        project: &ProjectRecord,
        logistics: &LogisticsRecord,
        equipment: &EquipmentRequirements,
    ) -> Result<String, TemplateError> {
        let context = match kind {
            TemplateKind::ScopeOfWork => scope_context(project, logistics, equipment),
            TemplateKind::CustomerEmail => customer_email_context(project, logistics, equipment),
            TemplateKind::LogisticsEmail => logistics_email_context(project, logistics),
        };

        self.tera
            .render(kind.template_name(), &context)
            .map_err(|error| TemplateError::Render(error.to_string()))
    }

    pub fn scope_of_work(
        &self,
        project: &ProjectRecord,
        logistics: &LogisticsRecord,
        equipment: &EquipmentRequirements,
    ) -> Result<String, TemplateError> {
        self.render(TemplateKind::ScopeOfWork, project, logistics, equipment)
    }

    pub fn customer_email(
        &self,
        project: &ProjectRecord,
        logistics: &LogisticsRecord,
        equipment: &EquipmentRequirements,
    ) -> Result<String, TemplateError> {
        self.render(TemplateKind::CustomerEmail, project, logistics, equipment)
    }

    pub fn logistics_email(
        &self,
        project: &ProjectRecord,
        logistics: &LogisticsRecord,
        equipment: &EquipmentRequirements,
    ) -> Result<String, TemplateError> {
        self.render(TemplateKind::LogisticsEmail, project, logistics, equipment)
    }
}

impl Default for QuoteTemplates {
    fn default() -> Self {
        Self::new()
    }
}

fn scope_context(
    project: &ProjectRecord,
    logistics: &LogisticsRecord,
    equipment: &EquipmentRequirements,
) -> Context {
    let mut context = Context::new();
    context.insert("site_address", &or_placeholder(&project.site_address, "[Site Address]"));
    context.insert("contact_name", &or_placeholder(&project.contact_name, "[Site Contact]"));
    context.insert(
        "site_phone",
        &or_placeholder(&project.site_phone, "[Site Contact Phone Number]"),
    );
    context.insert("shop_location", &or_placeholder(&project.shop_location, "[Shop]"));
    context.insert("equipment_summary", &equipment_summary_or_default(equipment));
    context.insert("logistics_section", &scope_logistics_section(logistics));
    context.insert("scope_section", &free_text_section(&project.scope_of_work));
    context.insert("items_section", &scope_items_section(logistics));
    context
}

fn customer_email_context(
    project: &ProjectRecord,
    logistics: &LogisticsRecord,
    equipment: &EquipmentRequirements,
) -> Context {
    let site_address = or_placeholder(&project.site_address, "[Site Address]");

    let mut context = Context::new();
    context.insert("project_name", &or_placeholder(&project.project_name, "[project name]"));
    context.insert("company_name", &or_placeholder(&project.company_name, "[Company Name]"));
    context.insert("contact_name", &or_placeholder(&project.contact_name, "[Contact Name]"));
    context.insert("site_phone", &or_placeholder(&project.site_phone, "[Site Phone]"));
    context.insert("site_address", &site_address);
    context.insert("shop_location", &or_placeholder(&project.shop_location, "[Shop Location]"));
    context.insert("email", &or_placeholder(&project.email, "[Email]"));
    context.insert("scope_section", &email_scope_section(&project.scope_of_work));
    context.insert("equipment_section", &email_equipment_section(equipment));
    context.insert("logistics_section", &email_logistics_section(logistics, &site_address));
    context.insert("items_section", &email_items_section(logistics));
    context
}

fn logistics_email_context(project: &ProjectRecord, logistics: &LogisticsRecord) -> Context {
    let mut context = Context::new();
    context.insert("project_name", &or_placeholder(&project.project_name, "[project name]"));
    context.insert("contact_name", &or_placeholder(&project.contact_name, "[Contact Name]"));
    context.insert("company_name", &or_placeholder(&project.company_name, "[Company Name]"));
    context.insert("site_phone", &or_placeholder(&project.site_phone, "[Site Phone]"));
    context.insert(
        "shipment_type",
        &or_placeholder(&logistics.shipment_type, "[Shipment Type]"),
    );
    context.insert("truck_type", &or_placeholder(&logistics.truck_type, "[Truck Type]"));
    context.insert("total_pieces", &logistics.total_piece_count());
    context.insert("total_weight", &format_weight(logistics.total_weight_lbs()));
    context.insert(
        "pickup_block",
        &address_block(
            &logistics.pickup_address,
            &logistics.pickup_city,
            &logistics.pickup_state,
            &logistics.pickup_zip,
            "[Pickup Address]",
        ),
    );
    context.insert(
        "delivery_block",
        &address_block(
            &logistics.delivery_address,
            &logistics.delivery_city,
            &logistics.delivery_state,
            &logistics.delivery_zip,
            "[Delivery Address]",
        ),
    );
    context.insert("items_section", &email_items_section(logistics));
    context.insert("storage_section", &storage_section(logistics));
    context
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

/// `3 Forklift (5k)` with the quantity omitted at 1.
fn format_item(item: &EquipmentItem) -> String {
    if item.quantity == 1 {
        item.name.clone()
    } else {
        format!("{} {}", item.quantity, item.name)
    }
}

fn english_join(elements: &[String]) -> String {
    match elements {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
    }
}

fn equipment_summary(equipment: &EquipmentRequirements) -> String {
    let mut elements = Vec::new();
    let crew = equipment.crew_size.trim();
    if !crew.is_empty() {
        elements.push(format!("{crew} crew"));
    }
    for category in EquipmentCategory::ALL {
        for item in equipment.items(category) {
            if item.quantity > 0 && !item.name.trim().is_empty() {
                elements.push(format_item(item));
            }
        }
    }
    english_join(&elements)
}

fn equipment_summary_or_default(equipment: &EquipmentRequirements) -> String {
    let summary = equipment_summary(equipment);
    if summary.is_empty() {
        "necessary crew and equipment".to_string()
    } else {
        summary
    }
}

fn piece_line(piece: &Piece, description_placeholder: &str) -> String {
    format!(
        "(Qty: {}) {} - {}\"L x {}\"W x {}\"H, {} lbs",
        piece.quantity.max(1),
        or_placeholder(&piece.description, description_placeholder),
        or_placeholder(&piece.length, "[L]"),
        or_placeholder(&piece.width, "[W]"),
        or_placeholder(&piece.height, "[H]"),
        or_placeholder(&piece.weight, "[Weight]"),
    )
}

fn free_text_section(scope_of_work: &str) -> String {
    if scope_of_work.trim().is_empty() {
        String::new()
    } else {
        format!("{scope_of_work}\n\n")
    }
}

fn scope_logistics_section(logistics: &LogisticsRecord) -> String {
    let mut lines = String::new();
    let shipment = logistics.shipment_type.trim();
    if !shipment.is_empty() {
        lines.push_str(&format!("Shipment Type: {shipment}\n"));
    }
    let truck = logistics.truck_type.trim();
    if !truck.is_empty() {
        lines.push_str(&format!("Truck Type Requested: {truck}\n"));
    }
    if let Some(kind) = logistics.storage_type {
        lines.push_str(&format!(
            "Storage: {} - {} sq ft\n",
            kind.label(),
            or_placeholder(&logistics.storage_sq_ft, "[Sq Ft]"),
        ));
    }

    if lines.is_empty() {
        "\n".to_string()
    } else {
        format!("\n{lines}")
    }
}

fn scope_items_section(logistics: &LogisticsRecord) -> String {
    if logistics.pieces.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = logistics
        .pieces
        .iter()
        .map(|piece| format!("• {}", piece_line(piece, "[Item Description]")))
        .collect();
    format!("ITEMS TO HANDLE:\n{}\n", lines.join("\n"))
}

fn email_scope_section(scope_of_work: &str) -> String {
    if scope_of_work.trim().is_empty() {
        String::new()
    } else {
        format!("SCOPE OF WORK:\n{scope_of_work}\n\n")
    }
}

fn email_equipment_section(equipment: &EquipmentRequirements) -> String {
    let mut lines = String::new();
    let crew = equipment.crew_size.trim();
    if !crew.is_empty() {
        lines.push_str(&format!("• Crew Size: {crew}\n"));
    }
    for category in EquipmentCategory::ALL {
        let items: Vec<String> = equipment
            .items(category)
            .iter()
            .filter(|item| item.quantity > 0 && !item.name.trim().is_empty())
            .map(format_item)
            .collect();
        if !items.is_empty() {
            lines.push_str(&format!(
                "• {}: {}\n",
                email_category_label(category),
                items.join(", ")
            ));
        }
    }

    if lines.is_empty() {
        String::new()
    } else {
        format!("EQUIPMENT REQUIREMENTS:\n{lines}\n")
    }
}

fn email_category_label(category: EquipmentCategory) -> &'static str {
    match category {
        EquipmentCategory::Forklifts => "Forklifts",
        EquipmentCategory::Tractors => "Tractors",
        EquipmentCategory::Trailers => "Trailers",
        EquipmentCategory::AdditionalEquipment => "Additional Equipment",
    }
}

fn email_logistics_section(logistics: &LogisticsRecord, fallback_pickup: &str) -> String {
    let mut bullets: Vec<String> = Vec::new();

    let pickup = logistics.pickup_address.trim();
    let pickup = if pickup.is_empty() { fallback_pickup } else { pickup };
    if !pickup.is_empty() {
        bullets.push(format!("• Pickup Location: {pickup}"));
    }
    let delivery = logistics.delivery_address.trim();
    if !delivery.is_empty() {
        bullets.push(format!("• Delivery Location: {delivery}"));
    }
    let shipment = logistics.shipment_type.trim();
    if !shipment.is_empty() {
        bullets.push(format!("• Shipment Type: {shipment}"));
    }
    let truck = logistics.truck_type.trim();
    if !truck.is_empty() {
        bullets.push(format!("• Truck Type: {truck}"));
    }
    if let Some(kind) = logistics.storage_type {
        bullets.push(format!(
            "• Storage: {} ({} sq ft)",
            kind.short_label(),
            or_placeholder(&logistics.storage_sq_ft, "[Sq Ft]"),
        ));
    }

    if bullets.is_empty() {
        String::new()
    } else {
        format!("LOGISTICS REQUIREMENTS:\n{}\n\n", bullets.join("\n"))
    }
}

fn email_items_section(logistics: &LogisticsRecord) -> String {
    if logistics.pieces.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = logistics
        .pieces
        .iter()
        .enumerate()
        .map(|(index, piece)| format!("{}. {}", index + 1, piece_line(piece, "[Description]")))
        .collect();
    format!("ITEMS TO TRANSPORT:\n{}\n\n", lines.join("\n"))
}

fn storage_section(logistics: &LogisticsRecord) -> String {
    let Some(kind) = logistics.storage_type else {
        return String::new();
    };
    let cost = logistics.storage_cost().unwrap_or(Decimal::ZERO).round_dp(2);
    format!(
        "STORAGE:\n{} - {} sq ft (estimated ${cost})\n\n",
        kind.label(),
        or_placeholder(&logistics.storage_sq_ft, "[Sq Ft]"),
    )
}

fn address_block(
    address: &str,
    city: &str,
    state: &str,
    zip: &str,
    address_placeholder: &str,
) -> String {
    format!(
        "{}\n{}, {} {}",
        or_placeholder(address, address_placeholder),
        or_placeholder(city, "[City]"),
        or_placeholder(state, "[State]"),
        or_placeholder(zip, "[Zip]"),
    )
}

fn format_weight(weight: f64) -> String {
    if (weight - weight.trunc()).abs() < f64::EPSILON {
        format!("{weight:.0}")
    } else {
        format!("{weight:.1}")
    }
}
