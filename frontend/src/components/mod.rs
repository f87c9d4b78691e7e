pub mod expense_approval_modal;
pub mod expense_form;
pub mod expense_preview_modal;
pub mod line_item_row;
pub mod pending_expenses;
