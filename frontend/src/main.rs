use gloo::events::EventListener;
use shared::ModalId;
use wasm_bindgen::JsCast;
use web_sys::Element;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::expense_approval_modal::ExpenseApprovalModal;
use components::expense_form::ExpenseForm;
use components::expense_preview_modal::ExpensePreviewHost;
use components::pending_expenses::PendingExpenses;
use hooks::use_expense_modals::use_expense_modals;
use services::api::ApiClient;
use services::bridge::{self, BridgeHandlers};
use services::config::FrontendConfig;
use services::logging::Logger;
use services::modal::ModalManager;

#[derive(Properties, PartialEq)]
struct AppProps {
    config: FrontendConfig,
}

/// True when a click landed on the generic modal's backdrop rather than
/// inside its content
fn is_generic_backdrop_click(event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .map(|element| ModalId::from_dom_id(&element.id()) == Some(ModalId::Generic))
        .unwrap_or(false)
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let api_client = use_memo(props.config.api_base_url.clone(), |base_url| {
        ApiClient::with_base_url(base_url.clone())
    });
    let modals = use_memo((), |_| ModalManager::new());
    let expense_modals = use_expense_modals(&api_client, &modals);
    let actions = expense_modals.actions.clone();

    // Initial load of the pending list
    {
        let load_pending = actions.load_pending.clone();
        use_effect_with((), move |_| {
            load_pending.emit(());
            || ()
        });
    }

    // Route the window functions to this app and close the generic modal
    // on backdrop clicks
    {
        let actions = actions.clone();
        use_effect_with((), move |_| {
            let registration = bridge::register(BridgeHandlers {
                open_preview: actions.open_preview.clone(),
                open_approval: actions.open_approval.clone(),
                close_modal: actions.close_modal.clone(),
                load_pending: actions.load_pending.clone(),
            });

            let close_modal = actions.close_modal;
            let backdrop_listener = web_sys::window().map(|window| {
                EventListener::new(&window, "click", move |event| {
                    if is_generic_backdrop_click(event) {
                        close_modal.emit(());
                    }
                })
            });

            move || {
                drop(registration);
                drop(backdrop_listener);
            }
        });
    }

    html! {
        <div class="container mt-4">
            <ExpenseForm
                api_client={(*api_client).clone()}
                dashboard_path={AttrValue::from(props.config.dashboard_path.clone())}
            />
            <PendingExpenses markup={expense_modals.pending_markup.clone()} />
            <ExpensePreviewHost preview={expense_modals.preview.clone()} />
            <ExpenseApprovalModal markup={expense_modals.approval_markup.clone()} />
        </div>
    }
}

fn main() {
    let config = FrontendConfig::from_document();
    Logger::init(config.log_level);
    Logger::info_with_component(
        "app",
        &format!("Starting expense form (api base {:?})", config.api_base_url),
    );
    if let Err(e) = bridge::install_window_functions() {
        Logger::error_with_component("app", &format!("Window functions not installed: {:?}", e));
    }
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
