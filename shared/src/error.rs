use thiserror::Error;

/// User action an error surfaced from; selects the alert wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiAction {
    Submit,
    Preview,
    Approval,
    Pending,
}

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Expense created successfully";
pub const SUBMIT_FAILURE_MESSAGE: &str = "An error occurred while submitting the form.";
pub const SERVER_FALLBACK_MESSAGE: &str = "An error occurred";
pub const NO_ITEMS_MESSAGE: &str = "No expense items found.";
pub const MODAL_UNAVAILABLE_MESSAGE: &str = "Bootstrap Modal is not available.";
pub const APPROVAL_FAILURE_MESSAGE: &str = "Failed to load expense approval.";
pub const PENDING_FAILURE_MESSAGE: &str = "Failed to load pending expenses.";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request never produced a response
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx response; `message` comes from a JSON `{message}` body
    #[error("server returned {status}")]
    Server { status: u16, message: Option<String> },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("failed to serialize request: {0}")]
    Serialization(String),
    #[error("no expense items found")]
    NoItems,
    #[error("bootstrap modal is not available")]
    ModalUnavailable,
}

impl ApiError {
    /// Text shown to the user in an alert for a failed `action`
    pub fn user_message(&self, action: ApiAction) -> String {
        match action {
            ApiAction::Submit => match self {
                ApiError::Server { message, .. } => format!(
                    "Error: {}",
                    message.as_deref().unwrap_or(SERVER_FALLBACK_MESSAGE)
                ),
                _ => SUBMIT_FAILURE_MESSAGE.to_string(),
            },
            ApiAction::Preview => match self {
                ApiError::NoItems => NO_ITEMS_MESSAGE.to_string(),
                ApiError::ModalUnavailable => MODAL_UNAVAILABLE_MESSAGE.to_string(),
                other => format!("Error fetching items: {}", other),
            },
            ApiAction::Approval => APPROVAL_FAILURE_MESSAGE.to_string(),
            ApiAction::Pending => PENDING_FAILURE_MESSAGE.to_string(),
        }
    }
}
