// ============================================================================
// AUTOCOMPLETE - Combobox con sugerencias remotas y selector con filtro local
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{
    append_child, clear_children, on_click, on_input, set_disabled, set_hidden, set_input_value,
    set_text_content, text_input, toggle_class, ElementBuilder,
};
use crate::viewmodels::{AutocompleteViewModel, FetchPhase};

pub struct AutocompleteOptions {
    pub id: &'static str,
    pub placeholder: &'static str,
    pub empty_text: &'static str,
    pub offline_text: &'static str,
}

/// Input con lista desplegable alimentada por AutocompleteViewModel
pub struct AutocompleteWidget {
    pub root: Element,
    pub input: Element,
}

impl AutocompleteWidget {
    pub fn new(
        vm: &AutocompleteViewModel,
        options: AutocompleteOptions,
        on_select: Rc<dyn Fn(String)>,
    ) -> Result<Self, JsValue> {
        let input = text_input(options.id, "text", options.placeholder)?;
        input.set_attribute("role", "combobox")?;
        input.set_attribute("aria-autocomplete", "list")?;

        let list = ElementBuilder::new("ul")?
            .class("autocomplete-list")
            .attr("role", "listbox")?
            .attr("hidden", "")?
            .build();
        let status = ElementBuilder::new("div")?
            .class("autocomplete-status")
            .attr("hidden", "")?
            .build();
        let root = ElementBuilder::new("div")?
            .class("autocomplete")
            .children([&input, &list, &status])?
            .build();

        let view = Rc::new(ComboboxView {
            vm: vm.clone(),
            input: input.clone(),
            list,
            status,
            options,
            on_select,
        });

        {
            let vm = vm.clone();
            on_input(&input, move |value| vm.input(&value))?;
        }
        {
            let view = view.clone();
            vm.set_on_change(move || {
                if let Err(e) = view.paint() {
                    log::error!("❌ [AUTOCOMPLETE] Error pintando sugerencias: {:?}", e);
                }
            });
        }

        Ok(Self { root, input })
    }
}

struct ComboboxView {
    vm: AutocompleteViewModel,
    input: Element,
    list: Element,
    status: Element,
    options: AutocompleteOptions,
    on_select: Rc<dyn Fn(String)>,
}

impl ComboboxView {
    fn paint(self: &Rc<Self>) -> Result<(), JsValue> {
        clear_children(&self.list);
        toggle_class(&self.status, "loading", false)?;

        match self.vm.phase() {
            FetchPhase::Idle | FetchPhase::Debouncing => {
                set_hidden(&self.list, true)?;
                set_hidden(&self.status, true)?;
            }
            FetchPhase::Loading => {
                set_hidden(&self.list, true)?;
                set_text_content(&self.status, "Searching...");
                toggle_class(&self.status, "loading", true)?;
                set_hidden(&self.status, false)?;
            }
            FetchPhase::Settled => {
                let suggestions = self.vm.suggestions();
                for value in suggestions.iter() {
                    append_child(&self.list, &self.option(value)?)?;
                }
                set_hidden(&self.list, suggestions.is_empty())?;

                let message = if self.vm.is_offline() {
                    Some(self.options.offline_text)
                } else if self.vm.is_empty_result() {
                    Some(self.options.empty_text)
                } else {
                    None
                };
                set_text_content(&self.status, message.unwrap_or(""));
                set_hidden(&self.status, message.is_none())?;
            }
        }
        Ok(())
    }

    fn option(self: &Rc<Self>, value: &str) -> Result<Element, JsValue> {
        let item = ElementBuilder::new("li")?
            .class("autocomplete-option")
            .attr("role", "option")?
            .text(value)
            .build();
        let view = self.clone();
        let value = value.to_string();
        on_click(&item, move |_| {
            set_input_value(&view.input, &value);
            view.vm.select(&value);
            (view.on_select)(value.clone());
        })?;
        Ok(item)
    }
}

// ----------------------------------------------------------------------------
// Selector con filtro local (MAWBs de un vuelo)
// ----------------------------------------------------------------------------

/// Filtrado sin distinguir mayúsculas, conserva el orden
pub fn filter_items(items: &[String], query: &str) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| needle.is_empty() || item.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

pub struct PickerOptions {
    pub id: &'static str,
    pub placeholder: &'static str,
    pub disabled_text: &'static str,
    pub search_placeholder: &'static str,
    pub empty_text: &'static str,
}

struct PickerInner {
    items: RefCell<Vec<String>>,
    selected: RefCell<Option<String>>,
    enabled: RefCell<bool>,
    trigger: Element,
    panel: Element,
    search: Element,
    list: Element,
    options: PickerOptions,
}

/// Botón + panel con búsqueda sobre una lista fija
#[derive(Clone)]
pub struct PickerWidget {
    inner: Rc<PickerInner>,
    pub root: Element,
}

impl PickerWidget {
    pub fn new(options: PickerOptions) -> Result<Self, JsValue> {
        let trigger = ElementBuilder::new("button")?
            .id(options.id)
            .class("picker-trigger")
            .attr("type", "button")?
            .attr("role", "combobox")?
            .build();
        let search = text_input(&format!("{}-search", options.id), "text", options.search_placeholder)?;
        let list = ElementBuilder::new("ul")?
            .class("autocomplete-list")
            .attr("role", "listbox")?
            .build();
        let panel = ElementBuilder::new("div")?
            .class("picker-panel")
            .attr("hidden", "")?
            .children([&search, &list])?
            .build();
        let root = ElementBuilder::new("div")?
            .class("picker")
            .children([&trigger, &panel])?
            .build();

        let picker = Self {
            inner: Rc::new(PickerInner {
                items: RefCell::new(Vec::new()),
                selected: RefCell::new(None),
                enabled: RefCell::new(false),
                trigger: trigger.clone(),
                panel,
                search: search.clone(),
                list,
                options,
            }),
            root,
        };

        {
            let picker = picker.clone();
            on_click(&trigger, move |_| picker.toggle_panel())?;
        }
        {
            let picker = picker.clone();
            on_input(&search, move |query| {
                if let Err(e) = picker.paint_list(&query) {
                    log::error!("❌ [PICKER] Error filtrando: {:?}", e);
                }
            })?;
        }

        picker.paint_trigger()?;
        Ok(picker)
    }

    pub fn selected(&self) -> Option<String> {
        self.inner.selected.borrow().clone()
    }

    /// Nueva lista (p.ej. al elegir vuelo): se borra la selección
    pub fn set_items(&self, items: Vec<String>) -> Result<(), JsValue> {
        *self.inner.items.borrow_mut() = items;
        *self.inner.selected.borrow_mut() = None;
        *self.inner.enabled.borrow_mut() = true;
        set_input_value(&self.inner.search, "");
        self.paint_list("")?;
        self.paint_trigger()
    }

    /// Estado de carga: deshabilitado con texto de espera
    pub fn set_loading(&self, loading: bool) -> Result<(), JsValue> {
        set_disabled(&self.inner.trigger, loading)?;
        if loading {
            set_text_content(&self.inner.trigger, "Loading...");
            set_hidden(&self.inner.panel, true)?;
            Ok(())
        } else {
            self.paint_trigger()
        }
    }

    /// Vaciar y deshabilitar (sin vuelo elegido)
    pub fn reset(&self) -> Result<(), JsValue> {
        self.inner.items.borrow_mut().clear();
        *self.inner.selected.borrow_mut() = None;
        *self.inner.enabled.borrow_mut() = false;
        set_hidden(&self.inner.panel, true)?;
        self.paint_trigger()
    }

    fn toggle_panel(&self) {
        if !*self.inner.enabled.borrow() {
            return;
        }
        let hidden = self.inner.panel.has_attribute("hidden");
        if let Err(e) = set_hidden(&self.inner.panel, !hidden) {
            log::error!("❌ [PICKER] Error abriendo panel: {:?}", e);
        }
    }

    fn select(&self, value: String) -> Result<(), JsValue> {
        *self.inner.selected.borrow_mut() = Some(value);
        set_hidden(&self.inner.panel, true)?;
        self.paint_trigger()
    }

    fn paint_trigger(&self) -> Result<(), JsValue> {
        let enabled = *self.inner.enabled.borrow();
        let text = match (self.selected(), enabled) {
            (Some(value), _) => value,
            (None, true) => self.inner.options.placeholder.to_string(),
            (None, false) => self.inner.options.disabled_text.to_string(),
        };
        set_text_content(&self.inner.trigger, &text);
        toggle_class(&self.inner.trigger, "placeholder", self.selected().is_none())?;
        set_disabled(&self.inner.trigger, !enabled)
    }

    fn paint_list(&self, query: &str) -> Result<(), JsValue> {
        clear_children(&self.inner.list);
        let visible = filter_items(&self.inner.items.borrow(), query);
        if visible.is_empty() {
            let empty = ElementBuilder::new("li")?
                .class("autocomplete-empty")
                .text(self.inner.options.empty_text)
                .build();
            return append_child(&self.inner.list, &empty);
        }

        let selected = self.selected();
        for value in visible {
            let class = if selected.as_deref() == Some(value.as_str()) {
                "autocomplete-option selected"
            } else {
                "autocomplete-option"
            };
            let item = ElementBuilder::new("li")?
                .class(class)
                .attr("role", "option")?
                .text(&value)
                .build();
            let picker = self.clone();
            on_click(&item, move |_| {
                if let Err(e) = picker.select(value.clone()) {
                    log::error!("❌ [PICKER] Error seleccionando: {:?}", e);
                }
            })?;
            append_child(&self.inner.list, &item)?;
        }
        Ok(())
    }
}
