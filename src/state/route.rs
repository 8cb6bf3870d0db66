// ============================================================================
// ROUTE - Rutas por hash (#/login, #/dashboard, #/trolley/...)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    CheckerLogin,
    CheckerDashboard,
    TrolleyLogin,
    TrolleyDashboard,
}

impl Route {
    /// Interpretar `location.hash` ("#/trolley/login", "/dashboard", "")
    pub fn from_hash(hash: &str) -> Route {
        let path = hash.trim_start_matches('#').trim_end_matches('/');
        match path {
            "/dashboard" => Route::CheckerDashboard,
            "/trolley/login" => Route::TrolleyLogin,
            "/trolley" | "/trolley/dashboard" => Route::TrolleyDashboard,
            _ => Route::CheckerLogin,
        }
    }

    pub fn hash(&self) -> &'static str {
        match self {
            Route::CheckerLogin => "#/login",
            Route::CheckerDashboard => "#/dashboard",
            Route::TrolleyLogin => "#/trolley/login",
            Route::TrolleyDashboard => "#/trolley/dashboard",
        }
    }

    /// Ruta efectiva según la sesión: un dashboard sin identidad vuelve al
    /// login de su rol y un login con identidad va directo al dashboard.
    pub fn guard(self, checker_authenticated: bool, trolley_authenticated: bool) -> Route {
        match self {
            Route::CheckerDashboard if !checker_authenticated => Route::CheckerLogin,
            Route::CheckerLogin if checker_authenticated => Route::CheckerDashboard,
            Route::TrolleyDashboard if !trolley_authenticated => Route::TrolleyLogin,
            Route::TrolleyLogin if trolley_authenticated => Route::TrolleyDashboard,
            other => other,
        }
    }

    /// Leer la ruta actual del navegador
    pub fn current() -> Route {
        web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .map(|hash| Route::from_hash(&hash))
            .unwrap_or(Route::CheckerLogin)
    }

    /// Navegar. Si el hash ya es el destino no habrá `hashchange`, así que
    /// se re-renderiza directamente.
    pub fn navigate(self) {
        log::info!("🧭 [ROUTE] Navegando a {}", self.hash());
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        if location.hash().ok().as_deref() == Some(self.hash()) {
            crate::rerender_app();
            return;
        }
        if let Err(e) = location.set_hash(self.hash()) {
            log::error!("❌ [ROUTE] Error cambiando hash: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_hashes() {
        assert_eq!(Route::from_hash("#/login"), Route::CheckerLogin);
        assert_eq!(Route::from_hash("#/dashboard"), Route::CheckerDashboard);
        assert_eq!(Route::from_hash("#/dashboard/"), Route::CheckerDashboard);
        assert_eq!(Route::from_hash("#/trolley/login"), Route::TrolleyLogin);
        assert_eq!(Route::from_hash("#/trolley/dashboard"), Route::TrolleyDashboard);
        assert_eq!(Route::from_hash(""), Route::CheckerLogin);
        assert_eq!(Route::from_hash("#/nowhere"), Route::CheckerLogin);
    }

    #[test]
    fn hash_round_trips() {
        for route in [
            Route::CheckerLogin,
            Route::CheckerDashboard,
            Route::TrolleyLogin,
            Route::TrolleyDashboard,
        ] {
            assert_eq!(Route::from_hash(route.hash()), route);
        }
    }

    #[test]
    fn dashboards_require_matching_identity() {
        assert_eq!(Route::CheckerDashboard.guard(false, true), Route::CheckerLogin);
        assert_eq!(Route::TrolleyDashboard.guard(true, false), Route::TrolleyLogin);
        assert_eq!(Route::CheckerDashboard.guard(true, false), Route::CheckerDashboard);
        assert_eq!(Route::TrolleyDashboard.guard(false, true), Route::TrolleyDashboard);
    }

    #[test]
    fn login_pages_skip_ahead_when_authenticated() {
        assert_eq!(Route::CheckerLogin.guard(true, false), Route::CheckerDashboard);
        assert_eq!(Route::TrolleyLogin.guard(false, true), Route::TrolleyDashboard);
        assert_eq!(Route::CheckerLogin.guard(false, true), Route::CheckerLogin);
    }
}
