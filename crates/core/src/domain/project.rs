use serde::{Deserialize, Serialize};

pub const DEFAULT_SHOP_LOCATION: &str = "Shop";

/// Flat project/contact record. Every field is independently optional on
/// the wire; empty strings render as bracketed placeholders downstream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectRecord {
    pub project_name: String,
    pub company_name: String,
    pub contact_name: String,
    pub site_address: String,
    pub site_phone: String,
    pub shop_location: String,
    pub scope_of_work: String,
    pub email: String,
}

impl Default for ProjectRecord {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            company_name: String::new(),
            contact_name: String::new(),
            site_address: String::new(),
            site_phone: String::new(),
            shop_location: DEFAULT_SHOP_LOCATION.to_string(),
            scope_of_work: String::new(),
            email: String::new(),
        }
    }
}
