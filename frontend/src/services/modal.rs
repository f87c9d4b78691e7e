use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo::events::EventListener;
use shared::{ApiError, ModalId, ModalRegistry};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::services::logging::Logger;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap, js_name = Modal)]
    type BootstrapModal;

    #[wasm_bindgen(static_method_of = BootstrapModal, js_namespace = bootstrap, js_class = "Modal", js_name = getOrCreateInstance, catch)]
    fn get_or_create_instance(element: &Element) -> Result<BootstrapModal, JsValue>;

    #[wasm_bindgen(method)]
    fn show(this: &BootstrapModal);

    #[wasm_bindgen(method)]
    fn hide(this: &BootstrapModal);
}

/// Whether `window.bootstrap.Modal` is loaded on the page
pub fn bootstrap_available() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    js_sys::Reflect::get(&window, &JsValue::from_str("bootstrap"))
        .ok()
        .filter(|bootstrap| bootstrap.is_object())
        .and_then(|bootstrap| js_sys::Reflect::get(&bootstrap, &JsValue::from_str("Modal")).ok())
        .map(|modal| modal.is_function())
        .unwrap_or(false)
}

fn find_element(id: ModalId) -> Option<Element> {
    web_sys::window()?.document()?.get_element_by_id(id.dom_id())
}

/// Single owner of every modal's lifecycle, driving Bootstrap's `Modal`.
///
/// Cloning shares the same registry.
#[derive(Clone, Default)]
pub struct ModalManager {
    registry: Rc<RefCell<ModalRegistry>>,
    hidden_listeners: Rc<RefCell<HashMap<ModalId, EventListener>>>,
}

impl PartialEq for ModalManager {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.registry, &other.registry)
    }
}

impl ModalManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, id: ModalId) -> bool {
        self.registry.borrow().is_open(id)
    }

    /// Show a modal. Returns `Ok(false)` when its element is not on the page
    /// and nothing happened, before Bootstrap is even looked up; an already
    /// open modal is left alone.
    pub fn show(&self, id: ModalId) -> Result<bool, ApiError> {
        let Some(element) = find_element(id) else {
            Logger::debug_with_component("modal", &format!("#{} not found, not showing", id));
            return Ok(false);
        };
        if !bootstrap_available() {
            return Err(ApiError::ModalUnavailable);
        }
        if !self.registry.borrow_mut().open(id) {
            return Ok(true);
        }

        self.watch_hidden(id, &element);
        match BootstrapModal::get_or_create_instance(&element) {
            Ok(instance) => {
                instance.show();
                Logger::debug_with_component("modal", &format!("Opened #{}", id));
                Ok(true)
            }
            Err(e) => {
                self.registry.borrow_mut().close(id);
                Logger::error_with_component(
                    "modal",
                    &format!("Bootstrap could not create #{}: {:?}", id, e),
                );
                Err(ApiError::ModalUnavailable)
            }
        }
    }

    /// Hide a modal. Bootstrap is asked to hide it even if the registry
    /// thinks it is closed, since data attributes can open modals too.
    pub fn hide(&self, id: ModalId) -> bool {
        let changed = self.registry.borrow_mut().close(id);
        if !bootstrap_available() {
            return changed;
        }
        if let Some(element) = find_element(id) {
            if let Ok(instance) = BootstrapModal::get_or_create_instance(&element) {
                instance.hide();
            }
        }
        changed
    }

    /// Keep the registry in sync when the user dismisses a modal
    fn watch_hidden(&self, id: ModalId, element: &Element) {
        let registry = self.registry.clone();
        let listener = EventListener::new(element, "hidden.bs.modal", move |_| {
            registry.borrow_mut().close(id);
        });
        self.hidden_listeners.borrow_mut().insert(id, listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_modal_element(id: ModalId) -> Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let element = document.create_element("div").unwrap();
        element.set_id(id.dom_id());
        document.body().unwrap().append_child(&element).unwrap();
        element
    }

    #[wasm_bindgen_test]
    fn test_show_without_bootstrap_is_reported() {
        let element = mount_modal_element(ModalId::ExpensePreview);
        let manager = ModalManager::new();
        assert!(!bootstrap_available());
        assert_eq!(manager.show(ModalId::ExpensePreview), Err(ApiError::ModalUnavailable));
        assert!(!manager.is_open(ModalId::ExpensePreview));
        element.remove();
    }

    #[wasm_bindgen_test]
    fn test_show_missing_element_is_a_no_op() {
        let manager = ModalManager::new();
        assert!(!bootstrap_available());
        assert_eq!(manager.show(ModalId::ExpenseApproval), Ok(false));
        assert!(!manager.is_open(ModalId::ExpenseApproval));
    }

    #[wasm_bindgen_test]
    fn test_hide_without_bootstrap_only_updates_registry() {
        let manager = ModalManager::new();
        assert!(!manager.hide(ModalId::Generic));
    }

    #[wasm_bindgen_test]
    fn test_clones_share_state() {
        let manager = ModalManager::new();
        let clone = manager.clone();
        assert!(manager == clone);
        assert!(manager != ModalManager::new());
    }
}
