use gloo::net::http::Request;
use shared::{
    endpoints, parse_preview, submit_outcome, ApiError, ExpenseId, ExpenseInput,
    PreviewItem, ATTACHMENT_PART, EXPENSE_INPUT_PART,
};
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

use crate::services::logging::Logger;

/// API client for the expense and requisition routes
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client that talks to the page's own origin
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
        }
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn url(&self, path: &str) -> String {
        endpoints::join(&self.base_url, path)
    }

    /// Submit a new expense as multipart form data.
    ///
    /// Only a 2xx response with a JSON body counts as success.
    pub async fn create_expense(
        &self,
        input: &ExpenseInput,
        attachment: Option<File>,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.url(endpoints::CREATE_EXPENSE);
        let body = build_expense_form_data(&input.to_json()?, attachment.as_ref())?;

        let response = Request::post(&url)
            .body(body)
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        Logger::debug_with_component("api", &format!("POST {} -> {}", url, status));
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))?;
        submit_outcome(status, &body)
    }

    /// Fetch the server-rendered list of pending expenses
    pub async fn get_pending_expenses(&self) -> Result<String, ApiError> {
        self.get_markup(&self.url(endpoints::PENDING_EXPENSES)).await
    }

    /// Fetch the line items of an existing expense.
    ///
    /// The body is parsed whatever the status; error bodies carry no
    /// `expense` array and end up as `ApiError::NoItems`.
    pub async fn get_expense_preview(&self, id: ExpenseId) -> Result<Vec<PreviewItem>, ApiError> {
        let url = self.url(&endpoints::expense_preview(id));
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))?;
        parse_preview(&body)
    }

    /// Fetch the approval fragment for an expense
    pub async fn get_expense_approval(&self, id: ExpenseId) -> Result<String, ApiError> {
        self.get_markup(&self.url(&endpoints::expense_approval(id))).await
    }

    async fn get_markup(&self, url: &str) -> Result<String, ApiError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            return Err(ApiError::Server {
                status: response.status(),
                message: None,
            });
        }

        response
            .text()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Two-part multipart body: the JSON payload and, if selected, the file
pub fn build_expense_form_data(json: &str, attachment: Option<&File>) -> Result<FormData, ApiError> {
    let form_data = FormData::new().map_err(js_error)?;
    form_data
        .append_with_str(EXPENSE_INPUT_PART, json)
        .map_err(js_error)?;
    if let Some(file) = attachment {
        form_data
            .append_with_blob_and_filename(ATTACHMENT_PART, file, &file.name())
            .map_err(js_error)?;
    }
    Ok(form_data)
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Serialization(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_urls_use_base() {
        assert_eq!(ApiClient::new().url(endpoints::CREATE_EXPENSE), "/expense/create");
        let client = ApiClient::with_base_url("https://erp.example.com/".to_string());
        assert_eq!(
            client.url(&endpoints::expense_preview(42)),
            "https://erp.example.com/expense/42/preview"
        );
    }

    #[wasm_bindgen_test]
    fn test_form_data_without_attachment() {
        let form_data = build_expense_form_data(r#"{"total":15}"#, None).unwrap();
        assert_eq!(
            form_data.get(EXPENSE_INPUT_PART).as_string().as_deref(),
            Some(r#"{"total":15}"#)
        );
        assert!(!form_data.has(ATTACHMENT_PART));
    }

    #[wasm_bindgen_test]
    fn test_form_data_with_attachment() {
        let parts = js_sys::Array::of1(&JsValue::from_str("receipt"));
        let file = File::new_with_str_sequence(&parts, "receipt.txt").unwrap();
        let form_data = build_expense_form_data("{}", Some(&file)).unwrap();
        assert!(form_data.has(ATTACHMENT_PART));
    }
}
