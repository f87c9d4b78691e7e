use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod endpoints;
pub mod error;
pub mod format;
pub mod line_items;
pub mod modal;
pub mod request;

pub use error::{ApiAction, ApiError};
pub use line_items::{field_name, LineItemField, LineItemRow, LineItems, NumericInput};
pub use modal::{ModalId, ModalRegistry, ModalState};
pub use request::{RequestGeneration, RequestTicket};

/// Server-side identifier of a submitted expense
pub type ExpenseId = u32;

/// Multipart part carrying the JSON-encoded `ExpenseInput`
pub const EXPENSE_INPUT_PART: &str = "expense_input";

/// Multipart part carrying the optional receipt/attachment file
pub const ATTACHMENT_PART: &str = "attachment";

/// Expense category offered by the line-item select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    OfficeSupplies,
    Electronics,
    Furniture,
    Software,
}

impl Category {
    /// All categories in the order the select lists them
    pub const ALL: [Category; 4] = [
        Category::OfficeSupplies,
        Category::Electronics,
        Category::Furniture,
        Category::Software,
    ];

    /// Wire value, also used as the `<option>` value
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::OfficeSupplies => "office_supplies",
            Category::Electronics => "electronics",
            Category::Furniture => "furniture",
            Category::Software => "software",
        }
    }

    /// Human-readable label shown in the select
    pub fn label(&self) -> &'static str {
        match self {
            Category::OfficeSupplies => "Office Supplies",
            Category::Electronics => "Electronics",
            Category::Furniture => "Furniture",
            Category::Software => "Software",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown expense category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// One line item as sent to `/expense/create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemPayload {
    pub item_name: String,
    /// `null` when the user left "Select Category" selected
    pub category: Option<Category>,
    pub quantity: f64,
    pub price: f64,
    /// Always `quantity * price`
    pub amount: f64,
}

/// JSON document carried by the `expense_input` multipart part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseInput {
    pub expense_number: String,
    pub description: String,
    pub line_items: Vec<LineItemPayload>,
    /// Sum of `line_items[].amount`
    pub total: f64,
}

impl ExpenseInput {
    pub fn to_json(&self) -> Result<String, ApiError> {
        serde_json::to_string(self).map_err(|e| ApiError::Serialization(e.to_string()))
    }
}

/// In-memory state of the expense form; the rendered form mirrors it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseDraft {
    pub expense_number: String,
    pub description: String,
    pub line_items: LineItems,
}

impl ExpenseDraft {
    /// Build the submission payload from the rows currently present.
    ///
    /// Each entry is taken from the row's own record, so removing rows in
    /// any order never shifts values between rows.
    pub fn to_input(&self) -> ExpenseInput {
        let line_items: Vec<LineItemPayload> = self
            .line_items
            .rows()
            .iter()
            .map(LineItemRow::to_payload)
            .collect();
        let total = line_items.iter().map(|item| item.amount).sum();

        ExpenseInput {
            expense_number: self.expense_number.clone(),
            description: self.description.clone(),
            line_items,
            total,
        }
    }
}

/// A line item as returned by `/expense/{id}/preview`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewItem {
    #[serde(default)]
    pub item_name: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub quantity: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub price: f64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub amount: f64,
}

/// Decimal columns may come back as JSON strings (e.g. `"10.00"`)
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Null,
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => Ok(line_items::parse_number(&s)),
        Raw::Null => Ok(0.0),
    }
}

/// Parse the body of `/expense/{id}/preview`.
///
/// A missing, non-array or empty `expense` field yields `ApiError::NoItems`.
pub fn parse_preview(body: &str) -> Result<Vec<PreviewItem>, ApiError> {
    let document: serde_json::Value =
        serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))?;

    let items = match document.get("expense") {
        Some(serde_json::Value::Array(items)) if !items.is_empty() => items.clone(),
        _ => return Err(ApiError::NoItems),
    };

    serde_json::from_value(serde_json::Value::Array(items))
        .map_err(|e| ApiError::Malformed(e.to_string()))
}

/// Pull the `message` field out of an error response body, if any
pub fn extract_error_message(body: &str) -> Option<String> {
    let document: serde_json::Value = serde_json::from_str(body).ok()?;
    match document.get("message")? {
        serde_json::Value::Null | serde_json::Value::Bool(false) => None,
        serde_json::Value::String(message) if message.is_empty() => None,
        serde_json::Value::String(message) => Some(message.clone()),
        serde_json::Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Map the status and body of a `/expense/create` response.
///
/// Success needs a 2xx status and a JSON body; a 2xx with anything else
/// is reported as `ApiError::Malformed`.
pub fn submit_outcome(status: u16, body: &str) -> Result<serde_json::Value, ApiError> {
    if (200..300).contains(&status) {
        serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))
    } else {
        Err(ApiError::Server {
            status,
            message: extract_error_message(body),
        })
    }
}

/// What the page does with a finished preview request
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewOutcome {
    /// Build the preview modal with these rows and show it
    Show(Vec<PreviewItem>),
    /// Leave the page alone and alert this text
    Alert(String),
}

impl From<Result<Vec<PreviewItem>, ApiError>> for PreviewOutcome {
    fn from(result: Result<Vec<PreviewItem>, ApiError>) -> Self {
        match result {
            Ok(items) if !items.is_empty() => PreviewOutcome::Show(items),
            Ok(_) => PreviewOutcome::Alert(ApiError::NoItems.user_message(ApiAction::Preview)),
            Err(e) => PreviewOutcome::Alert(e.user_message(ApiAction::Preview)),
        }
    }
}
