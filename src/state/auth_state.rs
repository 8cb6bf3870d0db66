// ============================================================================
// AUTH STATE - Contexto de sesión (checker + trolley), explícito en AppState
// ============================================================================
// Se inicializa desde localStorage al arrancar y se limpia en logout.
// "Identidad presente" implica "autenticado".
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::session::{CheckerIdentity, TrolleyIdentity};
use crate::services::StorageService;

#[derive(Clone)]
pub struct AuthState {
    checker: Rc<RefCell<Option<CheckerIdentity>>>,
    trolley: Rc<RefCell<Option<TrolleyIdentity>>>,
    storage: StorageService,
}

impl AuthState {
    /// Estado vacío sobre el almacenamiento dado
    pub fn new(storage: StorageService) -> Self {
        Self {
            checker: Rc::new(RefCell::new(None)),
            trolley: Rc::new(RefCell::new(None)),
            storage,
        }
    }

    /// Estado restaurado desde storage (errores = sin sesión)
    pub fn restore(storage: StorageService) -> Self {
        let state = Self::new(storage);
        *state.checker.borrow_mut() = state.storage.load_checker();
        *state.trolley.borrow_mut() = state.storage.load_trolley();

        if let Some(identity) = state.checker() {
            log::info!("💾 [AUTH] Checker restaurado: {}", identity.display_label());
        }
        if let Some(identity) = state.trolley() {
            log::info!("💾 [AUTH] Trolley restaurado: {}", identity.display_label());
        }
        state
    }

    // ------------------------------------------------------------------------
    // Checker
    // ------------------------------------------------------------------------

    pub fn checker(&self) -> Option<CheckerIdentity> {
        self.checker.borrow().clone()
    }

    pub fn is_checker_authenticated(&self) -> bool {
        self.checker.borrow().is_some()
    }

    pub fn login_checker(&self, identity: CheckerIdentity) {
        if let Err(e) = self.storage.save_checker(&identity) {
            log::error!("❌ [AUTH] Error guardando checker: {}", e);
        }
        log::info!("✅ [AUTH] Checker autenticado: {}", identity.display_label());
        *self.checker.borrow_mut() = Some(identity);
    }

    pub fn logout_checker(&self) {
        *self.checker.borrow_mut() = None;
        if let Err(e) = self.storage.clear_checker() {
            log::error!("❌ [AUTH] Error eliminando checker: {}", e);
        }
        log::info!("👋 [AUTH] Logout checker");
    }

    // ------------------------------------------------------------------------
    // Trolley
    // ------------------------------------------------------------------------

    pub fn trolley(&self) -> Option<TrolleyIdentity> {
        self.trolley.borrow().clone()
    }

    pub fn is_trolley_authenticated(&self) -> bool {
        self.trolley.borrow().is_some()
    }

    pub fn login_trolley(&self, identity: TrolleyIdentity) {
        if let Err(e) = self.storage.save_trolley(&identity) {
            log::error!("❌ [AUTH] Error guardando trolley: {}", e);
        }
        log::info!("✅ [AUTH] Trolley autenticado: {}", identity.display_label());
        *self.trolley.borrow_mut() = Some(identity);
    }

    pub fn logout_trolley(&self) {
        *self.trolley.borrow_mut() = None;
        if let Err(e) = self.storage.clear_trolley() {
            log::error!("❌ [AUTH] Error eliminando trolley: {}", e);
        }
        log::info!("👋 [AUTH] Logout trolley");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::route::Route;
    use crate::utils::storage::MemoryStorage;

    fn storage() -> StorageService {
        StorageService::with_backend(Rc::new(MemoryStorage::new()))
    }

    #[test]
    fn restore_reads_persisted_identities() {
        let storage = storage();
        storage.save_checker(&CheckerIdentity::new("C-104", "Ramp A")).unwrap();

        let auth = AuthState::restore(storage);
        assert!(auth.is_checker_authenticated());
        assert!(!auth.is_trolley_authenticated());
        assert_eq!(auth.checker().unwrap().team_name, "Ramp A");
    }

    #[test]
    fn logout_clears_identity_and_guard_redirects_to_login() {
        let storage = storage();
        let auth = AuthState::new(storage.clone());
        auth.login_checker(CheckerIdentity::new("C-104", "Ramp A"));
        assert_eq!(
            Route::CheckerDashboard.guard(auth.is_checker_authenticated(), auth.is_trolley_authenticated()),
            Route::CheckerDashboard
        );

        auth.logout_checker();
        assert_eq!(auth.checker(), None);
        assert_eq!(storage.load_checker(), None);

        // Siguiente montaje del layout: se restaura desde storage y se redirige
        let remounted = AuthState::restore(storage);
        assert_eq!(
            Route::CheckerDashboard.guard(remounted.is_checker_authenticated(), remounted.is_trolley_authenticated()),
            Route::CheckerLogin
        );
    }

    #[test]
    fn trolley_session_is_independent() {
        let storage = storage();
        let auth = AuthState::new(storage.clone());
        auth.login_trolley(TrolleyIdentity::new("E-77"));
        auth.login_checker(CheckerIdentity::new("C-104", "Ramp A"));

        auth.logout_trolley();
        assert!(auth.is_checker_authenticated());
        assert_eq!(storage.load_trolley(), None);
        assert!(storage.load_checker().is_some());
    }
}
