// ============================================================================
// MERLIN CARGO PWA - FRONTEND MVVM (RUST PURO)
// ============================================================================
// - Views: funciones que construyen DOM (sin lógica de negocio)
// - ViewModels: lógica de UI (autocompletado, envíos, login)
// - Services: SOLO comunicación API y localStorage
// - State: Rc<RefCell> + notificaciones
// - Models: estructuras compartidas con el backend
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod viewmodels;
pub mod state;
pub mod dom;
pub mod views;
pub mod utils;
mod app;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use crate::app::App;
use crate::config::CONFIG;

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let level = if CONFIG.is_logging_enabled() {
        log::Level::Debug
    } else {
        log::Level::Warn
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("🚀 [APP] Merlin Cargo ({})", CONFIG.environment);

    let mut app = App::new()?;
    app.render()?;
    APP.with(|cell| *cell.borrow_mut() = Some(app));

    // Registrado una sola vez: cada cambio de hash re-renderiza la ruta
    dom::on_window_event("hashchange", rerender_app)?;
    Ok(())
}

/// Re-render completo de la app
pub fn rerender_app() {
    APP.with(|cell| match cell.try_borrow_mut() {
        Ok(mut app) => match app.as_mut() {
            Some(app) => {
                if let Err(e) = app.render() {
                    log::error!("❌ [APP] Error re-renderizando: {:?}", e);
                }
            }
            None => log::warn!("⚠️ [APP] App no está inicializada"),
        },
        Err(_) => log::warn!("⚠️ [APP] Render en curso, se ignora el re-render"),
    });
}
