use std::rc::Rc;

use shared::{ApiAction, ExpenseId, ModalId, PreviewItem, PreviewOutcome, RequestGeneration};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::modal::ModalManager;

pub const PENDING_ERROR_MARKUP: &str =
    "<p class='text-danger'>Failed to load pending expenses.</p>";

/// Ask the manager to show a modal once the next render has landed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShowRequest {
    pub modal: ModalId,
    pub serial: u64,
}

/// Rows of the preview modal currently on the page.
///
/// `serial` keys the modal so every successful preview builds a fresh one.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewState {
    pub serial: u64,
    pub items: Rc<Vec<PreviewItem>>,
}

impl PreviewState {
    pub fn new(serial: u64, items: Vec<PreviewItem>) -> Self {
        Self {
            serial,
            items: Rc::new(items),
        }
    }
}

fn action_for(modal: ModalId) -> ApiAction {
    match modal {
        ModalId::ExpenseApproval => ApiAction::Approval,
        ModalId::ExpensePreview | ModalId::Generic => ApiAction::Preview,
    }
}

pub struct UseExpenseModalsResult {
    pub pending_markup: Option<AttrValue>,
    pub preview: Option<PreviewState>,
    pub approval_markup: AttrValue,
    pub actions: UseExpenseModalsActions,
}

#[derive(Clone)]
pub struct UseExpenseModalsActions {
    pub load_pending: Callback<()>,
    pub open_preview: Callback<ExpenseId>,
    pub open_approval: Callback<ExpenseId>,
    pub close_modal: Callback<()>,
}

#[hook]
pub fn use_expense_modals(api_client: &ApiClient, modals: &ModalManager) -> UseExpenseModalsResult {
    let pending_markup = use_state(|| Option::<AttrValue>::None);
    let preview = use_state(|| Option::<PreviewState>::None);
    let approval_markup = use_state(AttrValue::default);
    let show_request = use_state(|| Option::<ShowRequest>::None);
    let show_serial = use_mut_ref(|| 0u64);

    let pending_generation = use_memo((), |_| RequestGeneration::new());
    let preview_generation = use_memo((), |_| RequestGeneration::new());
    let approval_generation = use_memo((), |_| RequestGeneration::new());

    let request_show = {
        let show_request = show_request.clone();
        let show_serial = show_serial.clone();
        Callback::from(move |modal: ModalId| -> u64 {
            let serial = {
                let mut serial = show_serial.borrow_mut();
                *serial += 1;
                *serial
            };
            show_request.set(Some(ShowRequest { modal, serial }));
            serial
        })
    };

    // Show modals only after their markup is in the DOM
    {
        let modals = modals.clone();
        use_effect_with(*show_request, move |request| {
            if let Some(request) = request {
                match modals.show(request.modal) {
                    Ok(true) => {}
                    Ok(false) => Logger::debug_with_component(
                        "modals",
                        &format!("No #{} element in loaded markup", request.modal),
                    ),
                    Err(e) => {
                        Logger::error_with_component(
                            "modals",
                            &format!("Could not show #{}: {}", request.modal, e),
                        );
                        gloo::dialogs::alert(&e.user_message(action_for(request.modal)));
                    }
                }
            }
            || ()
        });
    }

    let load_pending = {
        let api_client = api_client.clone();
        let pending_markup = pending_markup.clone();
        let generation = pending_generation.clone();

        Callback::from(move |_| {
            let api_client = api_client.clone();
            let pending_markup = pending_markup.clone();
            let generation = generation.clone();
            let ticket = generation.next();

            spawn_local(async move {
                let result = api_client.get_pending_expenses().await;
                if !generation.is_current(ticket) {
                    Logger::debug_with_component("modals", "Dropping superseded pending expenses");
                    return;
                }
                match result {
                    Ok(html) => pending_markup.set(Some(AttrValue::from(html))),
                    Err(e) => {
                        Logger::error_with_component(
                            "modals",
                            &format!("Error loading pending expenses: {}", e),
                        );
                        pending_markup.set(Some(AttrValue::Static(PENDING_ERROR_MARKUP)));
                    }
                }
            });
        })
    };

    let open_preview = {
        let api_client = api_client.clone();
        let preview = preview.clone();
        let request_show = request_show.clone();
        let modals = modals.clone();
        let generation = preview_generation.clone();

        Callback::from(move |expense_id: ExpenseId| {
            let api_client = api_client.clone();
            let preview = preview.clone();
            let request_show = request_show.clone();
            let modals = modals.clone();
            let generation = generation.clone();
            let ticket = generation.next();

            spawn_local(async move {
                let result = api_client.get_expense_preview(expense_id).await;
                if !generation.is_current(ticket) {
                    Logger::debug_with_component(
                        "modals",
                        &format!("Dropping superseded preview for expense {}", expense_id),
                    );
                    return;
                }
                match PreviewOutcome::from(result) {
                    PreviewOutcome::Show(items) => {
                        Logger::debug_with_component(
                            "modals",
                            &format!("Previewing {} items of expense {}", items.len(), expense_id),
                        );
                        // The old modal is replaced, not reused
                        if modals.is_open(ModalId::ExpensePreview) {
                            modals.hide(ModalId::ExpensePreview);
                        }
                        let serial = request_show.emit(ModalId::ExpensePreview);
                        preview.set(Some(PreviewState::new(serial, items)));
                    }
                    PreviewOutcome::Alert(message) => {
                        Logger::warn_with_component(
                            "modals",
                            &format!("Preview of expense {} not shown: {}", expense_id, message),
                        );
                        gloo::dialogs::alert(&message);
                    }
                }
            });
        })
    };

    let open_approval = {
        let api_client = api_client.clone();
        let approval_markup = approval_markup.clone();
        let request_show = request_show.clone();
        let modals = modals.clone();
        let generation = approval_generation.clone();

        Callback::from(move |expense_id: ExpenseId| {
            let api_client = api_client.clone();
            let approval_markup = approval_markup.clone();
            let request_show = request_show.clone();
            let modals = modals.clone();
            let generation = generation.clone();
            let ticket = generation.next();

            spawn_local(async move {
                let result = api_client.get_expense_approval(expense_id).await;
                if !generation.is_current(ticket) {
                    Logger::debug_with_component(
                        "modals",
                        &format!("Dropping superseded approval for expense {}", expense_id),
                    );
                    return;
                }
                match result {
                    Ok(html) => {
                        // The fragment replaces the modal element itself
                        modals.hide(ModalId::ExpenseApproval);
                        approval_markup.set(AttrValue::from(html));
                        request_show.emit(ModalId::ExpenseApproval);
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "modals",
                            &format!("Approval of expense {} failed to load: {}", expense_id, e),
                        );
                        gloo::dialogs::alert(&e.user_message(ApiAction::Approval));
                    }
                }
            });
        })
    };

    let close_modal = {
        let modals = modals.clone();
        Callback::from(move |_| {
            modals.hide(ModalId::Generic);
        })
    };

    UseExpenseModalsResult {
        pending_markup: (*pending_markup).clone(),
        preview: (*preview).clone(),
        approval_markup: (*approval_markup).clone(),
        actions: UseExpenseModalsActions {
            load_pending,
            open_preview,
            open_approval,
            close_modal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_modal_failures_use_matching_wording() {
        assert_eq!(action_for(ModalId::ExpensePreview), ApiAction::Preview);
        assert_eq!(action_for(ModalId::ExpenseApproval), ApiAction::Approval);
        assert_eq!(
            shared::ApiError::ModalUnavailable.user_message(action_for(ModalId::ExpensePreview)),
            "Bootstrap Modal is not available."
        );
    }

    #[wasm_bindgen_test]
    fn test_show_requests_differ_by_serial() {
        let first = ShowRequest { modal: ModalId::ExpensePreview, serial: 1 };
        let second = ShowRequest { modal: ModalId::ExpensePreview, serial: 2 };
        assert_ne!(first, second);
    }
}
