use serde::{Deserialize, Serialize};

pub const ITEMS_LABEL: &str = "Items:";
pub const QUANTITY_LABEL: &str = "Quantity:";
pub const DEPARTMENT_LABEL: &str = "Department Name And Address:";

/// One bid listing as rendered on a results page card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidRecord {
    pub bid_number: String,
    pub bid_url: String,
    pub items: String,
    pub quantity: String,
    pub department_details: String,
    pub start_date: String,
    pub end_date: String,
}

/// Removes every literal occurrence of `label`, then trims.
pub fn strip_label(text: &str, label: &str) -> String {
    text.replace(label, "").trim().to_string()
}
