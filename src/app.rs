// ============================================================================
// APP - Aplicación principal: raíz #app + render según la ruta
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, clear_children, get_element_by_id};
use crate::state::{AppState, Route};
use crate::utils::constants::APP_ROOT_ID;
use crate::views::{
    mount_toast_region, render_checker_dashboard, render_checker_login, render_trolley_dashboard,
    render_trolley_login,
};

pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id(APP_ROOT_ID)
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;
        let state = AppState::new();

        if let Err(e) = mount_toast_region(&state) {
            log::warn!("⚠️ [APP] Sin región de toasts: {:?}", e);
        }
        Ok(Self { state, root })
    }

    /// Re-render completo de la ruta actual
    pub fn render(&mut self) -> Result<(), JsValue> {
        let requested = Route::current();
        let route = self.state.resolve_route(requested);
        if route != requested {
            // El hashchange resultante vuelve a llamar a render
            log::info!("🔒 [APP] {:?} no disponible, redirigiendo a {:?}", requested, route);
            route.navigate();
            return Ok(());
        }

        log::info!("🎬 [APP] Render {:?}", route);
        self.state.unmount();
        clear_children(&self.root);

        let view = match route {
            Route::CheckerLogin => render_checker_login(&self.state)?,
            Route::CheckerDashboard => render_checker_dashboard(&self.state)?,
            Route::TrolleyLogin => render_trolley_login(&self.state)?,
            Route::TrolleyDashboard => render_trolley_dashboard(&self.state)?,
        };
        append_child(&self.root, &view)
    }
}
