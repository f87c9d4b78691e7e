use std::rc::Rc;

use shared::{ModalId, PreviewItem};
use yew::prelude::*;

use crate::hooks::use_expense_modals::PreviewState;

#[derive(Properties, PartialEq)]
pub struct ExpensePreviewModalProps {
    pub items: Rc<Vec<PreviewItem>>,
}

/// Read-only table of an expense's line items
#[function_component(ExpensePreviewModal)]
pub fn expense_preview_modal(props: &ExpensePreviewModalProps) -> Html {
    html! {
        <div
            class="modal fade"
            id={ModalId::ExpensePreview.dom_id()}
            tabindex="-1"
            aria-labelledby="expensePreviewModalLabel"
            aria-hidden="true"
        >
            <div class="modal-dialog modal-lg">
                <div class="modal-content">
                    <div class="modal-header">
                        <h5 class="modal-title" id="expensePreviewModalLabel">{"Expense Line Items"}</h5>
                        <button type="button" class="btn-close" data-bs-dismiss="modal" aria-label="Close"></button>
                    </div>
                    <div class="modal-body">
                        <table class="table table-bordered">
                            <thead>
                                <tr>
                                    <th>{"#"}</th>
                                    <th>{"Item Name"}</th>
                                    <th>{"Quantity"}</th>
                                    <th>{"Category"}</th>
                                    <th>{"Price"}</th>
                                    <th>{"Amount"}</th>
                                </tr>
                            </thead>
                            <tbody id="expensePreviewTableBody">
                                {for props.items.iter().enumerate().map(|(position, item)| html! {
                                    <tr>
                                        <td>{position + 1}</td>
                                        <td>{&item.item_name}</td>
                                        <td>{item.quantity}</td>
                                        <td>{&item.category}</td>
                                        <td>{item.price}</td>
                                        <td>{item.amount}</td>
                                    </tr>
                                })}
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ExpensePreviewHostProps {
    pub preview: Option<PreviewState>,
}

/// Mounts the preview modal only once a preview has rows. Keyed by serial,
/// so each successful preview replaces the previous subtree and at most
/// one `#expensePreviewModal` exists.
#[function_component(ExpensePreviewHost)]
pub fn expense_preview_host(props: &ExpensePreviewHostProps) -> Html {
    match &props.preview {
        Some(preview) => html! {
            <ExpensePreviewModal key={preview.serial} items={preview.items.clone()} />
        },
        None => html! {},
    }
}
