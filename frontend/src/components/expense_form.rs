use shared::format::format_total;
use yew::prelude::*;

use crate::components::line_item_row::ExpenseLineItemRow;
use crate::hooks::use_expense_form::use_expense_form;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct ExpenseFormProps {
    pub api_client: ApiClient,
    pub dashboard_path: AttrValue,
}

#[function_component(ExpenseForm)]
pub fn expense_form(props: &ExpenseFormProps) -> Html {
    let attachment_ref = use_node_ref();
    let form = use_expense_form(&props.api_client, &props.dashboard_path, &attachment_ref);
    let state = &*form.state;

    let on_add = {
        let add_row = form.actions.add_row.clone();
        Callback::from(move |_: MouseEvent| add_row.emit(()))
    };

    let on_submit_click = {
        let submit = form.actions.submit.clone();
        Callback::from(move |_: MouseEvent| submit.emit(()))
    };

    // Enter in a text field goes through the same path as the button
    let on_form_submit = {
        let submit = form.actions.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit.emit(());
        })
    };

    html! {
        <form id="expense-form" onsubmit={on_form_submit}>
            <div class="row mb-3">
                <div class="col-md-4">
                    <div class="form-group">
                        <label for="expense_number">{"Expense Number"}</label>
                        <input
                            type="text"
                            id="expense_number"
                            name="expense_number"
                            class="form-control"
                            value={state.draft.expense_number.clone()}
                            oninput={form.actions.on_expense_number_change.clone()}
                        />
                    </div>
                </div>
                <div class="col-md-8">
                    <div class="form-group">
                        <label for="description">{"Description"}</label>
                        <input
                            type="text"
                            id="description"
                            name="description"
                            class="form-control"
                            value={state.draft.description.clone()}
                            oninput={form.actions.on_description_change.clone()}
                        />
                    </div>
                </div>
            </div>

            <div id="expense-line-items">
                {for state.draft.line_items.rows().iter().map(|row| html! {
                    <ExpenseLineItemRow
                        key={row.index}
                        row={row.clone()}
                        on_change={form.actions.change_field.clone()}
                        on_remove={form.actions.remove_row.clone()}
                    />
                })}
            </div>

            <button type="button" id="add-expense-item" class="btn btn-secondary mb-3" onclick={on_add}>
                {"Add Item"}
            </button>

            <div class="form-group mb-3">
                <label for="attachment">{"Attachment"}</label>
                <input type="file" id="attachment" name="attachment" class="form-control" ref={attachment_ref} />
            </div>

            <button
                type="button"
                id="submit-expense-form"
                class="btn btn-primary"
                onclick={on_submit_click}
                disabled={state.submitting}
            >
                {if state.submitting { "Submitting..." } else { "Submit Expense" }}
            </button>

            {if let Some(total) = state.displayed_total {
                html! {
                    <div id="grand-total" class="mt-3 fw-bold">
                        {"Grand Total: "}
                        <span class="text-primary">{format_total(total)}</span>
                    </div>
                }
            } else { html! {} }}
        </form>
    }
}
