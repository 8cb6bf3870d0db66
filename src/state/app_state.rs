// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::services::{ApiClient, StorageService};
use crate::state::{AuthState, Route, ToastState};

/// Estado global compartido por todas las vistas (clones baratos: todo Rc)
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub toasts: ToastState,
    pub storage: StorageService,
    pub api: ApiClient,
    /// Limpiezas de la vista montada (timers, requests) antes del siguiente render
    unmount_hooks: Rc<RefCell<Vec<Box<dyn FnOnce()>>>>,
}

impl AppState {
    /// Crear estado restaurando la sesión desde localStorage
    pub fn new() -> Self {
        Self::with_storage(StorageService::new())
    }

    pub fn with_storage(storage: StorageService) -> Self {
        Self {
            auth: AuthState::restore(storage.clone()),
            toasts: ToastState::new(),
            storage,
            api: ApiClient::new(),
            unmount_hooks: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Ruta a renderizar: la del hash, filtrada por la sesión actual
    pub fn resolve_route(&self, requested: Route) -> Route {
        requested.guard(
            self.auth.is_checker_authenticated(),
            self.auth.is_trolley_authenticated(),
        )
    }

    pub fn on_unmount<F: FnOnce() + 'static>(&self, hook: F) {
        self.unmount_hooks.borrow_mut().push(Box::new(hook));
    }

    /// Ejecutar y vaciar las limpiezas registradas
    pub fn unmount(&self) {
        let hooks: Vec<Box<dyn FnOnce()>> = self.unmount_hooks.borrow_mut().drain(..).collect();
        for hook in hooks {
            hook();
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CheckerIdentity;
    use crate::utils::storage::MemoryStorage;

    #[test]
    fn resolve_route_follows_session() {
        let storage = StorageService::with_backend(Rc::new(MemoryStorage::new()));
        let state = AppState::with_storage(storage);
        assert_eq!(state.resolve_route(Route::CheckerDashboard), Route::CheckerLogin);

        state.auth.login_checker(CheckerIdentity::new("C-104", "Ramp A"));
        assert_eq!(state.resolve_route(Route::CheckerDashboard), Route::CheckerDashboard);
        assert_eq!(state.resolve_route(Route::TrolleyDashboard), Route::TrolleyLogin);
    }

    #[test]
    fn unmount_runs_hooks_once() {
        let storage = StorageService::with_backend(Rc::new(MemoryStorage::new()));
        let state = AppState::with_storage(storage);
        let calls = Rc::new(std::cell::Cell::new(0));
        {
            let calls = calls.clone();
            state.on_unmount(move || calls.set(calls.get() + 1));
        }
        state.unmount();
        state.unmount();
        assert_eq!(calls.get(), 1);
    }
}
