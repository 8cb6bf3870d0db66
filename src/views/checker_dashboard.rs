// ============================================================================
// CHECKER DASHBOARD - "Update Cargo": MAWB (autocompletado o manual) + piezas
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{
    input_value, on_click, on_input, on_submit, set_hidden, set_input_value, text_input,
    ElementBuilder, FormField,
};
use crate::error::SubmitError;
use crate::models::forms::UpdateCargoForm;
use crate::models::FieldErrors;
use crate::state::{AppState, Route};
use crate::viewmodels::{AutocompleteViewModel, CheckerViewModel, SuggestionField};
use crate::views::autocomplete::{AutocompleteOptions, AutocompleteWidget};
use crate::views::form_helpers::{card, set_busy, show_field_errors, submit_button};
use crate::views::layout::{render_layout, LayoutProps};
use crate::views::recent_activity::{paint_pieces, render_recent_card};
use crate::views::stats::paint_stats;
use crate::views::toast::{show_error, show_success};

const SUBMIT_LABEL: &str = "Submit";
const BUSY_LABEL: &str = "Updating...";

/// Valor del campo MAWB, compartido por los dos modos de entrada
#[derive(Clone, Debug, Default, PartialEq)]
struct MawbEntry {
    value: String,
}

impl MawbEntry {
    /// Sugerencia elegida en el combobox
    fn pick(&mut self, value: &str) {
        self.value = value.to_string();
    }

    /// Escribir en el buscador invalida la selección anterior
    fn search_edited(&mut self) {
        self.value.clear();
    }

    /// Texto libre: es el valor del campo y también la query de sugerencias
    fn type_manually(&mut self, text: &str) {
        self.value = text.to_string();
    }

    fn clear(&mut self) {
        self.value.clear();
    }
}

/// Entrada de MAWB con dos modos: combobox con sugerencias o texto libre.
/// Lo escrito a mano alimenta las mismas sugerencias, que aparecen al volver
/// al desplegable.
struct MawbInput {
    field: FormField,
    combobox: AutocompleteWidget,
    dropdown_mode: Element,
    manual_mode: Element,
    manual_input: Element,
    entry: Rc<RefCell<MawbEntry>>,
}

impl MawbInput {
    fn new(suggestions: &AutocompleteViewModel) -> Result<Rc<Self>, JsValue> {
        let entry = Rc::new(RefCell::new(MawbEntry::default()));

        let combobox = {
            let entry = entry.clone();
            AutocompleteWidget::new(
                suggestions,
                AutocompleteOptions {
                    id: UpdateCargoForm::MAWB,
                    placeholder: "Search MAWB...",
                    empty_text: "No MAWB number found.",
                    offline_text: "Server unreachable, showing sample MAWB numbers",
                },
                Rc::new(move |value: String| entry.borrow_mut().pick(&value)),
            )?
        };
        {
            let entry = entry.clone();
            on_input(&combobox.input, move |_| entry.borrow_mut().search_edited())?;
        }
        let to_manual = mode_link("Type manually instead")?;
        let dropdown_mode = ElementBuilder::new("div")?
            .class("mawb-mode")
            .children([&combobox.root, &to_manual])?
            .build();

        let manual_input = text_input("mawb-manual", "text", "Type MAWB number...")?;
        {
            let entry = entry.clone();
            let search = combobox.input.clone();
            let suggestions = suggestions.clone();
            on_input(&manual_input, move |text| {
                entry.borrow_mut().type_manually(&text);
                set_input_value(&search, &text);
                suggestions.input(&text);
            })?;
        }
        let to_dropdown = mode_link("Use dropdown instead")?;
        let manual_mode = ElementBuilder::new("div")?
            .class("mawb-mode")
            .attr("hidden", "")?
            .children([&manual_input, &to_dropdown])?
            .build();

        let control = ElementBuilder::new("div")?
            .class("mawb-control")
            .children([&dropdown_mode, &manual_mode])?
            .build();
        let field = FormField::new(UpdateCargoForm::MAWB, "MAWB Number", &control)?;

        for (link, to_manual_mode) in [(&to_manual, true), (&to_dropdown, false)] {
            let entry = entry.clone();
            let dropdown_mode = dropdown_mode.clone();
            let manual_mode = manual_mode.clone();
            let manual_input = manual_input.clone();
            on_click(link, move |_| {
                if to_manual_mode {
                    set_input_value(&manual_input, &entry.borrow().value);
                }
                let _ = set_hidden(&dropdown_mode, to_manual_mode);
                let _ = set_hidden(&manual_mode, !to_manual_mode);
            })?;
        }

        Ok(Rc::new(Self {
            field,
            combobox,
            dropdown_mode,
            manual_mode,
            manual_input,
            entry,
        }))
    }

    fn value(&self) -> String {
        self.entry.borrow().value.clone()
    }

    /// Tras un envío correcto: vaciar y volver al modo desplegable
    fn reset(&self, suggestions: &AutocompleteViewModel) {
        self.entry.borrow_mut().clear();
        set_input_value(&self.combobox.input, "");
        set_input_value(&self.manual_input, "");
        suggestions.select("");
        let _ = set_hidden(&self.dropdown_mode, false);
        let _ = set_hidden(&self.manual_mode, true);
    }
}

fn mode_link(label: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("button")?
        .class("btn-link")
        .attr("type", "button")?
        .text(label)
        .build())
}

pub fn render_checker_dashboard(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [CHECKER] render_checker_dashboard()");

    let identity = state
        .auth
        .checker()
        .ok_or_else(|| JsValue::from_str("Checker session required"))?;
    let vm = CheckerViewModel::new(state.api.clone(), state.storage.clone(), state.auth.clone());
    let suggestions = AutocompleteViewModel::new(SuggestionField::Mawb, state.api.clone());
    {
        let suggestions = suggestions.clone();
        state.on_unmount(move || suggestions.detach());
    }

    // Stats + recientes
    let stats = ElementBuilder::new("div")?.class("stats-grid").build();
    let (recent_card, recent_list) = render_recent_card()?;
    let refresh_activity = {
        let vm = vm.clone();
        let stats = stats.clone();
        let recent_card = recent_card.clone();
        let recent_list = recent_list.clone();
        Rc::new(move || {
            let result = paint_stats(&stats, &vm.stats())
                .and_then(|_| paint_pieces(&recent_card, &recent_list, &vm.recent()));
            if let Err(e) = result {
                log::error!("❌ [CHECKER] Error pintando actividad: {:?}", e);
            }
        })
    };
    refresh_activity();

    // Formulario
    let (form_card, form_content) = card("Update Cargo", Some("Enter the MAWB number and received pieces"))?;
    let mawb = MawbInput::new(&suggestions)?;
    let pieces_input = text_input(UpdateCargoForm::PCS_RECEIVED, "number", "Enter number of pieces")?;
    pieces_input.set_attribute("inputmode", "numeric")?;
    pieces_input.set_attribute("min", "1")?;
    let pieces_field = FormField::new(UpdateCargoForm::PCS_RECEIVED, "Number of Pieces Received", &pieces_input)?;
    let submit = submit_button(SUBMIT_LABEL)?;

    let form = ElementBuilder::new("form")?
        .class("cargo-form")
        .attr("novalidate", "")?
        .children([&mawb.field.group, &pieces_field.group, &submit])?
        .build();
    form_content.append_child(&form)?;

    {
        let state = state.clone();
        let mawb = mawb.clone();
        let busy = Rc::new(Cell::new(false));
        on_submit(&form, move || {
            if busy.get() {
                return;
            }
            let cargo_form = UpdateCargoForm {
                mawb: mawb.value(),
                pcs_received: input_value(&pieces_input),
            };
            let fields = [
                (UpdateCargoForm::MAWB, &mawb.field),
                (UpdateCargoForm::PCS_RECEIVED, &pieces_field),
            ];
            if let Err(errors) = cargo_form.validate() {
                show_field_errors(&fields, &errors);
                return;
            }
            show_field_errors(&fields, &FieldErrors::new());

            busy.set(true);
            set_busy(&submit, true, BUSY_LABEL, SUBMIT_LABEL);
            let vm = vm.clone();
            let state = state.clone();
            let mawb = mawb.clone();
            let suggestions = suggestions.clone();
            let pieces_input = pieces_input.clone();
            let submit = submit.clone();
            let busy = busy.clone();
            let refresh_activity = refresh_activity.clone();
            spawn_local(async move {
                match vm.submit_pieces(&cargo_form).await {
                    Ok(submission) => {
                        show_success(
                            &state,
                            "Success!",
                            &format!("Updated {} pieces for MAWB {}", submission.pcs_received, submission.mawb),
                        );
                        mawb.reset(&suggestions);
                        set_input_value(&pieces_input, "");
                        refresh_activity();
                    }
                    Err(SubmitError::Invalid(errors)) => {
                        log::warn!("⚠️ [CHECKER] Formulario inválido ({} campos)", errors.len());
                    }
                    Err(SubmitError::Api(e)) => {
                        show_error(&state, "Error updating record", &e.user_message());
                    }
                }
                busy.set(false);
                set_busy(&submit, false, BUSY_LABEL, SUBMIT_LABEL);
            });
        })?;
    }

    let content = ElementBuilder::new("div")?
        .class("dashboard")
        .children([&stats, &form_card, &recent_card])?
        .build();

    let on_logout: Rc<dyn Fn()> = {
        let auth = state.auth.clone();
        Rc::new(move || {
            auth.logout_checker();
            Route::CheckerLogin.navigate();
        })
    };
    render_layout(
        LayoutProps {
            brand: "Merlin Cargo",
            user_label: identity.display_label(),
            user_lines: vec![identity.checker_id.clone(), identity.team_name.clone()],
            theme: "theme-cargo",
            on_logout,
        },
        &content,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_text_is_the_field_value() {
        let mut entry = MawbEntry::default();
        entry.type_manually("176-1234");
        assert_eq!(entry.value, "176-1234");

        // En el desplegable, lo escrito vale hasta que se busque otra cosa
        entry.search_edited();
        assert!(entry.value.is_empty());
    }

    #[test]
    fn picked_suggestion_is_the_field_value_until_reset() {
        let mut entry = MawbEntry::default();
        entry.pick("MAWB2001");
        assert_eq!(entry.value, "MAWB2001");

        entry.clear();
        assert_eq!(entry, MawbEntry::default());
    }
}
