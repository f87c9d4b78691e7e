//! Global functions called from server-rendered markup, e.g.
//! `onclick="openExpenseModal(12)"` inside the pending expenses fragment.
//!
//! The functions exist from startup; they forward to whichever handlers
//! the mounted app has registered and only log while none are.

use std::cell::RefCell;

use shared::ExpenseId;
use wasm_bindgen::prelude::*;
use yew::Callback;

use crate::services::logging::Logger;

pub const WINDOW_FUNCTIONS: [&str; 4] = [
    "openExpenseModal",
    "openExpenseApprovalModal",
    "closeModal",
    "loadPendingExpenses",
];

#[derive(Clone)]
pub struct BridgeHandlers {
    pub open_preview: Callback<ExpenseId>,
    pub open_approval: Callback<ExpenseId>,
    pub close_modal: Callback<()>,
    pub load_pending: Callback<()>,
}

thread_local! {
    static HANDLERS: RefCell<Option<BridgeHandlers>> = const { RefCell::new(None) };
}

/// Keeps the handlers registered; dropping it unregisters them
pub struct BridgeRegistration {
    _private: (),
}

impl Drop for BridgeRegistration {
    fn drop(&mut self) {
        HANDLERS.with(|slot| slot.borrow_mut().take());
        Logger::debug_with_component("bridge", "Handlers unregistered");
    }
}

/// Route the window functions to these handlers until the returned
/// registration is dropped
pub fn register(handlers: BridgeHandlers) -> BridgeRegistration {
    HANDLERS.with(|slot| *slot.borrow_mut() = Some(handlers));
    Logger::debug_with_component("bridge", "Handlers registered");
    BridgeRegistration { _private: () }
}

/// Accept ids passed as numbers or numeric strings
pub fn parse_expense_id(value: &JsValue) -> Option<ExpenseId> {
    let number = value
        .as_f64()
        .or_else(|| value.as_string().and_then(|s| s.trim().parse::<f64>().ok()))?;
    (number.fract() == 0.0 && number >= 0.0 && number <= ExpenseId::MAX as f64)
        .then_some(number as ExpenseId)
}

/// Run `f` against the registered handlers. Returns false, with a warning,
/// when the app has not mounted yet.
fn dispatch(name: &str, f: impl FnOnce(&BridgeHandlers)) -> bool {
    // Clone out of the slot so a handler may re-register without a borrow panic
    let handlers = HANDLERS.with(|slot| slot.borrow().clone());
    match handlers {
        Some(handlers) => {
            f(&handlers);
            true
        }
        None => {
            Logger::warn_with_component(
                "bridge",
                &format!("{} called before the page finished loading", name),
            );
            false
        }
    }
}

fn dispatch_id(name: &str, value: &JsValue, f: impl FnOnce(&BridgeHandlers, ExpenseId)) -> bool {
    match parse_expense_id(value) {
        Some(id) => dispatch(name, |handlers| f(handlers, id)),
        None => {
            Logger::warn_with_component(
                "bridge",
                &format!("{} called with invalid expense id: {:?}", name, value),
            );
            false
        }
    }
}

#[wasm_bindgen(js_name = openExpenseModal)]
pub fn open_expense_modal(expense_id: JsValue) -> bool {
    dispatch_id("openExpenseModal", &expense_id, |handlers, id| {
        handlers.open_preview.emit(id)
    })
}

#[wasm_bindgen(js_name = openExpenseApprovalModal)]
pub fn open_expense_approval_modal(expense_id: JsValue) -> bool {
    dispatch_id("openExpenseApprovalModal", &expense_id, |handlers, id| {
        handlers.open_approval.emit(id)
    })
}

#[wasm_bindgen(js_name = closeModal)]
pub fn close_modal() -> bool {
    dispatch("closeModal", |handlers| handlers.close_modal.emit(()))
}

#[wasm_bindgen(js_name = loadPendingExpenses)]
pub fn load_pending_expenses() -> bool {
    dispatch("loadPendingExpenses", |handlers| handlers.load_pending.emit(()))
}

/// Put the exported functions on `window` so inline `onclick` attributes
/// can reach them. Called once at startup, before the app renders.
pub fn install_window_functions() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let functions = [
        Closure::<dyn Fn(JsValue) -> bool>::new(open_expense_modal).into_js_value(),
        Closure::<dyn Fn(JsValue) -> bool>::new(open_expense_approval_modal).into_js_value(),
        Closure::<dyn Fn() -> bool>::new(close_modal).into_js_value(),
        Closure::<dyn Fn() -> bool>::new(load_pending_expenses).into_js_value(),
    ];
    for (name, function) in WINDOW_FUNCTIONS.iter().zip(functions.iter()) {
        js_sys::Reflect::set(&window, &JsValue::from_str(name), function)?;
    }
    Logger::debug_with_component("bridge", "Window functions installed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn window_function(name: &str) -> js_sys::Function {
        let window = web_sys::window().unwrap();
        js_sys::Reflect::get(&window, &JsValue::from_str(name))
            .unwrap()
            .dyn_into()
            .unwrap()
    }

    fn recording_handlers(opened: Rc<Cell<u32>>) -> BridgeHandlers {
        BridgeHandlers {
            open_preview: Callback::from(move |id| opened.set(id)),
            open_approval: Callback::noop(),
            close_modal: Callback::noop(),
            load_pending: Callback::noop(),
        }
    }

    #[wasm_bindgen_test]
    fn test_parse_expense_id() {
        assert_eq!(parse_expense_id(&JsValue::from_f64(42.0)), Some(42));
        assert_eq!(parse_expense_id(&JsValue::from_str(" 7 ")), Some(7));
        assert_eq!(parse_expense_id(&JsValue::from_f64(1.5)), None);
        assert_eq!(parse_expense_id(&JsValue::from_f64(-1.0)), None);
        assert_eq!(parse_expense_id(&JsValue::UNDEFINED), None);
    }

    #[wasm_bindgen_test]
    fn test_calls_before_mount_are_logged_not_thrown() {
        install_window_functions().unwrap();

        let result = window_function("openExpenseModal")
            .call1(&JsValue::NULL, &JsValue::from_f64(12.0))
            .unwrap();
        assert_eq!(result.as_bool(), Some(false));

        let result = window_function("closeModal").call0(&JsValue::NULL).unwrap();
        assert_eq!(result.as_bool(), Some(false));
    }

    #[wasm_bindgen_test]
    fn test_window_functions_follow_registration() {
        install_window_functions().unwrap();
        let opened = Rc::new(Cell::new(0u32));

        let registration = register(recording_handlers(opened.clone()));
        let result = window_function("openExpenseModal")
            .call1(&JsValue::NULL, &JsValue::from_str("42"))
            .unwrap();
        assert_eq!(result.as_bool(), Some(true));
        assert_eq!(opened.get(), 42);

        drop(registration);
        assert!(!open_expense_modal(JsValue::from_f64(7.0)));
        assert_eq!(opened.get(), 42);
    }

    #[wasm_bindgen_test]
    fn test_invalid_id_is_not_forwarded() {
        let opened = Rc::new(Cell::new(0u32));
        let _registration = register(recording_handlers(opened.clone()));
        assert!(!open_expense_modal(JsValue::from_str("abc")));
        assert_eq!(opened.get(), 0);
    }
}
