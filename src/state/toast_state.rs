// ============================================================================
// TOAST STATE - Notificaciones transitorias (éxito / error)
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use crate::state::reactivity::ReactiveState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct ToastState {
    toasts: ReactiveState<Vec<Toast>>,
    next_id: Rc<Cell<u32>>,
}

impl ToastState {
    pub fn new() -> Self {
        Self {
            toasts: ReactiveState::new(Vec::new()),
            next_id: Rc::new(Cell::new(1)),
        }
    }

    /// Agregar un toast, devuelve su id para poder descartarlo luego
    pub fn push(&self, kind: ToastKind, title: &str, description: Option<&str>) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));

        let toast = Toast {
            id,
            kind,
            title: title.to_string(),
            description: description.map(|d| d.to_string()),
        };
        self.toasts.update(|list| list.push(toast));
        id
    }

    pub fn dismiss(&self, id: u32) {
        let present = self.toasts.with(|list| list.iter().any(|t| t.id == id));
        if present {
            self.toasts.update(|list| list.retain(|t| t.id != id));
        }
    }

    pub fn list(&self) -> Vec<Toast> {
        self.toasts.get()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) {
        self.toasts.subscribe(callback);
    }
}

impl Default for ToastState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_dismiss() {
        let toasts = ToastState::new();
        let first = toasts.push(ToastKind::Success, "Success!", Some("Updated 50 pieces for MAWB 176-12345678"));
        let second = toasts.push(ToastKind::Error, "Error updating record", None);
        assert_ne!(first, second);
        assert_eq!(toasts.list().len(), 2);

        toasts.dismiss(first);
        let remaining = toasts.list();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].kind, ToastKind::Error);

        // Descartar dos veces no falla
        toasts.dismiss(first);
        assert_eq!(toasts.list().len(), 1);
    }
}
