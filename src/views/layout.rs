// ============================================================================
// LAYOUT - Cabecera (marca + usuario + logout), menú móvil y pie
// ============================================================================

use std::rc::Rc;
use chrono::{Datelike, Local};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;
use crate::dom::{append_child, on_click, toggle_class, ElementBuilder};

pub struct LayoutProps<'a> {
    pub brand: &'a str,
    /// Línea principal del usuario en la cabecera ("C-104 | Ramp A")
    pub user_label: String,
    /// Detalle en el menú móvil (líneas separadas)
    pub user_lines: Vec<String>,
    pub theme: &'a str,
    pub on_logout: Rc<dyn Fn()>,
}

pub fn render_layout(props: LayoutProps<'_>, content: &Element) -> Result<Element, JsValue> {
    let title = ElementBuilder::new("h1")?.class("brand").text(props.brand).build();

    let logout = logout_button(&props.on_logout, "btn btn-outline")?;
    let user = ElementBuilder::new("span")?.class("header-user").text(&props.user_label).build();
    let desktop_nav = ElementBuilder::new("div")?
        .class("header-nav")
        .children([&user, &logout])?
        .build();

    let menu_button = ElementBuilder::new("button")?
        .class("menu-toggle")
        .attr("type", "button")?
        .attr("aria-label", "Menu")?
        .attr("aria-expanded", "false")?
        .text("☰")
        .build();

    let header_inner = ElementBuilder::new("div")?
        .class("container header-inner")
        .children([&title, &menu_button, &desktop_nav])?
        .build();
    let header = ElementBuilder::new("header")?
        .class(&format!("app-header {}", props.theme))
        .child(&header_inner)?
        .build();

    let overlay = render_mobile_menu(&props)?;
    {
        let overlay = overlay.clone();
        let button = menu_button.clone();
        on_click(&menu_button, move |_| {
            let open = !overlay.class_list().contains("open");
            let _ = toggle_class(&overlay, "open", open);
            let _ = button.set_attribute("aria-expanded", if open { "true" } else { "false" });
            button.set_text_content(Some(if open { "✕" } else { "☰" }));
        })?;
    }
    {
        // Click en el fondo cierra el menú
        let target = overlay.clone();
        on_click(&overlay, move |e| {
            let on_backdrop = e
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .map(|clicked| clicked == target)
                .unwrap_or(false);
            if on_backdrop {
                let _ = toggle_class(&target, "open", false);
            }
        })?;
    }

    let main = ElementBuilder::new("main")?
        .class("container app-main")
        .child(content)?
        .build();

    let footer = ElementBuilder::new("footer")?
        .class("app-footer")
        .text(&format!("© {} Merlin Cargo Tracking", Local::now().year()))
        .build();

    Ok(ElementBuilder::new("div")?
        .class("app-shell")
        .children([&header, &overlay, &main, &footer])?
        .build())
}

fn render_mobile_menu(props: &LayoutProps<'_>) -> Result<Element, JsValue> {
    let identity = ElementBuilder::new("div")?.class("menu-identity").build();
    for (index, line) in props.user_lines.iter().enumerate() {
        let class = if index == 0 { "menu-identity-primary" } else { "menu-identity-secondary" };
        let row = ElementBuilder::new("div")?.class(class).text(line).build();
        append_child(&identity, &row)?;
    }

    let logout = logout_button(&props.on_logout, "btn btn-destructive btn-block")?;
    let panel = ElementBuilder::new("div")?
        .class("menu-panel")
        .children([&identity, &logout])?
        .build();

    Ok(ElementBuilder::new("div")?
        .class("menu-overlay")
        .child(&panel)?
        .build())
}

fn logout_button(on_logout: &Rc<dyn Fn()>, class: &str) -> Result<Element, JsValue> {
    let button = ElementBuilder::new("button")?
        .class(class)
        .attr("type", "button")?
        .text("Logout")
        .build();
    let on_logout = on_logout.clone();
    on_click(&button, move |_| on_logout())?;
    Ok(button)
}
