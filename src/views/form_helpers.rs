// ============================================================================
// FORM HELPERS - Botón de envío con estado "ocupado" y errores inline
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, set_disabled, set_text_content, toggle_class, ElementBuilder, FormField};
use crate::models::FieldErrors;

pub fn submit_button(label: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .class("btn btn-primary btn-block")
        .attr("type", "submit")?
        .text(label)
        .build())
}

/// Deshabilitar mientras hay una request en curso (evita doble envío)
pub fn set_busy(button: &Element, busy: bool, busy_label: &str, idle_label: &str) {
    let _ = set_disabled(button, busy);
    let _ = toggle_class(button, "busy", busy);
    set_text_content(button, if busy { busy_label } else { idle_label });
}

/// Pintar cada error junto a su campo; los campos sin error se limpian
pub fn show_field_errors(fields: &[(&'static str, &FormField)], errors: &FieldErrors) {
    for (name, field) in fields {
        if let Err(e) = field.set_error(errors.get(name)) {
            log::error!("❌ [FORM] Error mostrando validación de {}: {:?}", name, e);
        }
    }
}

/// Tarjeta con título y descripción (contenedor de cada formulario)
pub fn card(title: &str, description: Option<&str>) -> Result<(Element, Element), JsValue> {
    let header = ElementBuilder::new("div")?
        .class("card-header")
        .child(&ElementBuilder::new("h2")?.class("card-title").text(title).build())?
        .build();
    if let Some(description) = description {
        let description = ElementBuilder::new("p")?.class("card-description").text(description).build();
        append_child(&header, &description)?;
    }
    let content = ElementBuilder::new("div")?.class("card-content").build();
    let card = ElementBuilder::new("section")?
        .class("card")
        .children([&header, &content])?
        .build();
    Ok((card, content))
}
