use std::collections::HashMap;
use std::fmt;

/// Modals the page knows about, keyed by their DOM id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalId {
    ExpensePreview,
    ExpenseApproval,
    /// Generic page modal closed by `closeModal()` or a backdrop click
    Generic,
}

impl ModalId {
    pub fn dom_id(&self) -> &'static str {
        match self {
            ModalId::ExpensePreview => "expensePreviewModal",
            ModalId::ExpenseApproval => "expenseApprovalModal",
            ModalId::Generic => "myModal",
        }
    }

    pub fn from_dom_id(id: &str) -> Option<Self> {
        [ModalId::ExpensePreview, ModalId::ExpenseApproval, ModalId::Generic]
            .into_iter()
            .find(|modal| modal.dom_id() == id)
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dom_id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// Open/closed lifecycle of every modal.
///
/// `open` and `close` are idempotent and report whether a transition
/// actually happened.
#[derive(Debug, Clone, Default)]
pub struct ModalRegistry {
    states: HashMap<ModalId, ModalState>,
}

impl ModalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, id: ModalId) -> ModalState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    pub fn is_open(&self, id: ModalId) -> bool {
        self.state(id) == ModalState::Open
    }

    pub fn open(&mut self, id: ModalId) -> bool {
        self.transition(id, ModalState::Open)
    }

    pub fn close(&mut self, id: ModalId) -> bool {
        self.transition(id, ModalState::Closed)
    }

    fn transition(&mut self, id: ModalId, to: ModalState) -> bool {
        let state = self.states.entry(id).or_default();
        if *state == to {
            return false;
        }
        *state = to;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modals_start_closed() {
        let registry = ModalRegistry::new();
        assert_eq!(registry.state(ModalId::ExpensePreview), ModalState::Closed);
        assert!(!registry.is_open(ModalId::Generic));
    }

    #[test]
    fn test_open_and_close_are_idempotent() {
        let mut registry = ModalRegistry::new();
        assert!(registry.open(ModalId::ExpensePreview));
        assert!(!registry.open(ModalId::ExpensePreview));
        assert!(registry.is_open(ModalId::ExpensePreview));

        assert!(registry.close(ModalId::ExpensePreview));
        assert!(!registry.close(ModalId::ExpensePreview));
        assert!(!registry.close(ModalId::ExpenseApproval));
    }

    #[test]
    fn test_modals_are_independent() {
        let mut registry = ModalRegistry::new();
        registry.open(ModalId::ExpenseApproval);
        assert!(registry.is_open(ModalId::ExpenseApproval));
        assert!(!registry.is_open(ModalId::ExpensePreview));
    }

    #[test]
    fn test_dom_ids() {
        assert_eq!(ModalId::from_dom_id("myModal"), Some(ModalId::Generic));
        assert_eq!(
            ModalId::from_dom_id("expensePreviewModal"),
            Some(ModalId::ExpensePreview)
        );
        assert_eq!(ModalId::from_dom_id("other"), None);
    }
}
