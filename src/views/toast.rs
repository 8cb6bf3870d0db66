// ============================================================================
// TOAST VIEW - Región de notificaciones (fuera de #app, se pinta sola)
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{append_child, clear_children, get_element_by_id, on_click, ElementBuilder};
use crate::state::{AppState, Toast, ToastKind, ToastState};
use crate::utils::constants::TOAST_REGION_ID;

/// Enganchar la región de toasts de index.html al estado (una sola vez)
pub fn mount_toast_region(state: &AppState) -> Result<(), JsValue> {
    let region = get_element_by_id(TOAST_REGION_ID)
        .ok_or_else(|| JsValue::from_str("Toast region not found"))?;

    let toasts = state.toasts.clone();
    let target = region.clone();
    state.toasts.subscribe(move || {
        if let Err(e) = paint(&target, &toasts) {
            log::error!("❌ [TOAST] Error pintando toasts: {:?}", e);
        }
    });
    paint(&region, &state.toasts)
}

pub fn show_success(state: &AppState, title: &str, description: &str) {
    show(&state.toasts, ToastKind::Success, title, Some(description));
}

pub fn show_error(state: &AppState, title: &str, description: &str) {
    show(&state.toasts, ToastKind::Error, title, Some(description));
}

/// Agregar un toast y programar su cierre
fn show(toasts: &ToastState, kind: ToastKind, title: &str, description: Option<&str>) {
    let id = toasts.push(kind, title, description);
    let duration = match kind {
        ToastKind::Success => CONFIG.ui_config.toast_duration_ms,
        ToastKind::Error => CONFIG.ui_config.toast_error_duration_ms,
    };
    let toasts = toasts.clone();
    Timeout::new(duration, move || toasts.dismiss(id)).forget();
}

fn paint(region: &Element, toasts: &ToastState) -> Result<(), JsValue> {
    clear_children(region);
    for toast in toasts.list() {
        append_child(region, &render_toast(&toast, toasts)?)?;
    }
    Ok(())
}

fn render_toast(toast: &Toast, toasts: &ToastState) -> Result<Element, JsValue> {
    let class = match toast.kind {
        ToastKind::Success => "toast toast-success",
        ToastKind::Error => "toast toast-error",
    };
    let body = ElementBuilder::new("div")?
        .class("toast-body")
        .child(&ElementBuilder::new("p")?.class("toast-title").text(&toast.title).build())?
        .build();
    if let Some(description) = &toast.description {
        append_child(&body, &ElementBuilder::new("p")?.class("toast-description").text(description).build())?;
    }

    let close = ElementBuilder::new("button")?
        .class("toast-close")
        .attr("type", "button")?
        .attr("aria-label", "Close")?
        .text("×")
        .build();
    {
        let toasts = toasts.clone();
        let id = toast.id;
        on_click(&close, move |_| toasts.dismiss(id))?;
    }

    let role = if toast.kind == ToastKind::Error { "alert" } else { "status" };
    Ok(ElementBuilder::new("div")?
        .class(class)
        .attr("role", role)?
        .children([&body, &close])?
        .build())
}
