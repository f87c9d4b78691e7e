//! Server routes the expense page talks to.

use crate::ExpenseId;

pub const CREATE_EXPENSE: &str = "/expense/create";
pub const PENDING_EXPENSES: &str = "/requisition/pending_expense";
pub const DASHBOARD: &str = "/expense/dash";

pub fn expense_preview(id: ExpenseId) -> String {
    format!("/expense/{}/preview", id)
}

pub fn expense_approval(id: ExpenseId) -> String {
    format!("/expense/{}/approve", id)
}

/// Join a base URL (possibly empty for same-origin) with a route path
pub fn join(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes() {
        assert_eq!(expense_preview(42), "/expense/42/preview");
        assert_eq!(expense_approval(7), "/expense/7/approve");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("", CREATE_EXPENSE), "/expense/create");
        assert_eq!(
            join("http://localhost:8000/", CREATE_EXPENSE),
            "http://localhost:8000/expense/create"
        );
    }
}
