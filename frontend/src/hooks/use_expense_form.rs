use std::rc::Rc;

use shared::{error, ApiAction, ExpenseDraft, LineItemField};
use wasm_bindgen_futures::spawn_local;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// Form state: the draft is the source of truth, the DOM mirrors it
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseFormState {
    pub draft: ExpenseDraft,
    /// `None` until the first add/remove/amount change, so the grand total
    /// element only appears once there is something to show
    pub displayed_total: Option<f64>,
    pub submitting: bool,
}

pub enum ExpenseFormAction {
    AddRow,
    RemoveRow(u32),
    SetField(u32, LineItemField, String),
    SetExpenseNumber(String),
    SetDescription(String),
    SubmitStarted,
    SubmitFinished,
}

impl Reducible for ExpenseFormState {
    type Action = ExpenseFormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        let recompute = match action {
            ExpenseFormAction::AddRow => {
                next.draft.line_items.add_row();
                true
            }
            ExpenseFormAction::RemoveRow(index) => {
                next.draft.line_items.remove_row(index);
                true
            }
            ExpenseFormAction::SetField(index, field, raw) => {
                next.draft.line_items.set_field(index, field, &raw)
                    && matches!(field, LineItemField::Quantity | LineItemField::Price)
            }
            ExpenseFormAction::SetExpenseNumber(value) => {
                next.draft.expense_number = value;
                false
            }
            ExpenseFormAction::SetDescription(value) => {
                next.draft.description = value;
                false
            }
            ExpenseFormAction::SubmitStarted => {
                next.submitting = true;
                false
            }
            ExpenseFormAction::SubmitFinished => {
                next.submitting = false;
                false
            }
        };

        if recompute {
            next.displayed_total = Some(next.draft.line_items.grand_total());
        }
        Rc::new(next)
    }
}

pub struct UseExpenseFormResult {
    pub state: UseReducerHandle<ExpenseFormState>,
    pub actions: UseExpenseFormActions,
}

#[derive(Clone)]
pub struct UseExpenseFormActions {
    pub add_row: Callback<()>,
    pub remove_row: Callback<u32>,
    pub change_field: Callback<(u32, LineItemField, String)>,
    pub on_expense_number_change: Callback<InputEvent>,
    pub on_description_change: Callback<InputEvent>,
    pub submit: Callback<()>,
}

fn selected_file(attachment_ref: &NodeRef) -> Option<File> {
    attachment_ref
        .cast::<HtmlInputElement>()?
        .files()?
        .get(0)
}

fn navigate_to(path: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_href(path) {
        Logger::error_with_component("expense_form", &format!("Navigation failed: {:?}", e));
    }
}

#[hook]
pub fn use_expense_form(
    api_client: &ApiClient,
    dashboard_path: &str,
    attachment_ref: &NodeRef,
) -> UseExpenseFormResult {
    let state = use_reducer(ExpenseFormState::default);

    let add_row = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(ExpenseFormAction::AddRow))
    };

    let remove_row = {
        let state = state.clone();
        Callback::from(move |index| state.dispatch(ExpenseFormAction::RemoveRow(index)))
    };

    let change_field = {
        let state = state.clone();
        Callback::from(move |(index, field, raw): (u32, LineItemField, String)| {
            state.dispatch(ExpenseFormAction::SetField(index, field, raw))
        })
    };

    let on_expense_number_change = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.dispatch(ExpenseFormAction::SetExpenseNumber(input.value()));
        })
    };

    let on_description_change = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.dispatch(ExpenseFormAction::SetDescription(input.value()));
        })
    };

    let submit = {
        let state = state.clone();
        let api_client = api_client.clone();
        let dashboard_path = dashboard_path.to_string();
        let attachment_ref = attachment_ref.clone();

        Callback::from(move |_| {
            if state.submitting {
                return;
            }

            let input = state.draft.to_input();
            let attachment = selected_file(&attachment_ref);
            Logger::info_with_component(
                "expense_form",
                &format!(
                    "Submitting expense {:?} with {} line items, total {}",
                    input.expense_number,
                    input.line_items.len(),
                    input.total
                ),
            );
            state.dispatch(ExpenseFormAction::SubmitStarted);

            let state = state.clone();
            let api_client = api_client.clone();
            let dashboard_path = dashboard_path.clone();
            spawn_local(async move {
                match api_client.create_expense(&input, attachment).await {
                    Ok(_) => {
                        Logger::info_with_component("expense_form", "Expense created");
                        gloo::dialogs::alert(error::SUBMIT_SUCCESS_MESSAGE);
                        navigate_to(&dashboard_path);
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "expense_form",
                            &format!("Expense submission failed: {}", e),
                        );
                        gloo::dialogs::alert(&e.user_message(ApiAction::Submit));
                    }
                }
                state.dispatch(ExpenseFormAction::SubmitFinished);
            });
        })
    };

    UseExpenseFormResult {
        state,
        actions: UseExpenseFormActions {
            add_row,
            remove_row,
            change_field,
            on_expense_number_change,
            on_description_change,
            submit,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::format::format_total;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn apply(state: Rc<ExpenseFormState>, action: ExpenseFormAction) -> Rc<ExpenseFormState> {
        state.reduce(action)
    }

    #[wasm_bindgen_test]
    fn test_total_hidden_until_first_recompute() {
        let state = Rc::new(ExpenseFormState::default());
        assert_eq!(state.displayed_total, None);

        let state = apply(state, ExpenseFormAction::SetDescription("Lunch".to_string()));
        assert_eq!(state.displayed_total, None);

        let state = apply(state, ExpenseFormAction::AddRow);
        assert_eq!(state.displayed_total, Some(0.0));
    }

    #[wasm_bindgen_test]
    fn test_two_rows_then_remove_first() {
        let mut state = Rc::new(ExpenseFormState::default());
        state = apply(state, ExpenseFormAction::AddRow);
        state = apply(state, ExpenseFormAction::AddRow);
        for (index, quantity, price) in [(1, "2", "10"), (2, "1", "5")] {
            state = apply(
                state,
                ExpenseFormAction::SetField(index, LineItemField::Quantity, quantity.to_string()),
            );
            state = apply(
                state,
                ExpenseFormAction::SetField(index, LineItemField::Price, price.to_string()),
            );
        }
        assert_eq!(state.displayed_total.map(format_total).as_deref(), Some("15"));

        state = apply(state, ExpenseFormAction::RemoveRow(1));
        assert_eq!(state.displayed_total.map(format_total).as_deref(), Some("5"));
        assert_eq!(state.draft.line_items.rows()[0].index, 2);
    }

    #[wasm_bindgen_test]
    fn test_item_name_change_keeps_total() {
        let mut state = Rc::new(ExpenseFormState::default());
        state = apply(state, ExpenseFormAction::AddRow);
        state = apply(
            state,
            ExpenseFormAction::SetField(1, LineItemField::ItemName, "Chair".to_string()),
        );
        assert_eq!(state.draft.line_items.rows()[0].item_name, "Chair");
        assert_eq!(state.displayed_total, Some(0.0));
    }

    #[wasm_bindgen_test]
    fn test_submit_flags() {
        let state = apply(Rc::new(ExpenseFormState::default()), ExpenseFormAction::SubmitStarted);
        assert!(state.submitting);
        let state = apply(state, ExpenseFormAction::SubmitFinished);
        assert!(!state.submitting);
    }
}
