// ============================================================================
// ELEMENT BUILDER - Builder pattern para crear elementos fácilmente
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, create_element, set_text_content};

pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: create_element(tag)?,
        })
    }

    /// Establecer class name (reemplaza todas las clases)
    pub fn class(self, class: &str) -> Self {
        self.element.set_class_name(class);
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.element.set_id(id);
        self
    }

    pub fn text(self, text: &str) -> Self {
        set_text_content(&self.element, text);
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Result<Self, JsValue> {
        self.element.set_attribute(name, value)?;
        Ok(self)
    }

    pub fn child(self, child: &Element) -> Result<Self, JsValue> {
        append_child(&self.element, child)?;
        Ok(self)
    }

    pub fn children<'a>(self, children: impl IntoIterator<Item = &'a Element>) -> Result<Self, JsValue> {
        for child in children {
            append_child(&self.element, child)?;
        }
        Ok(self)
    }

    pub fn build(self) -> Element {
        self.element
    }
}

/// `<input>` de texto con id, placeholder y clase de formulario
pub fn text_input(id: &str, input_type: &str, placeholder: &str) -> Result<Element, JsValue> {
    ElementBuilder::new("input")?
        .id(id)
        .class("form-input")
        .attr("type", input_type)?
        .attr("name", id)?
        .attr("placeholder", placeholder)?
        .attr("autocomplete", "off")
        .map(ElementBuilder::build)
}

/// Etiqueta + control + mensaje de error inline (oculto hasta que haya error)
pub struct FormField {
    pub group: Element,
    pub error: Element,
}

impl FormField {
    pub fn new(id: &str, label: &str, control: &Element) -> Result<Self, JsValue> {
        let label = ElementBuilder::new("label")?
            .attr("for", id)?
            .class("form-label")
            .text(label)
            .build();
        let error = ElementBuilder::new("p")?
            .class("form-error")
            .attr("hidden", "")?
            .build();
        let group = ElementBuilder::new("div")?
            .class("form-group")
            .children([&label, control, &error])?
            .build();
        Ok(Self { group, error })
    }

    /// Mostrar el mensaje (o limpiarlo con `None`)
    pub fn set_error(&self, message: Option<&str>) -> Result<(), JsValue> {
        set_text_content(&self.error, message.unwrap_or(""));
        crate::dom::set_hidden(&self.error, message.is_none())
    }
}
