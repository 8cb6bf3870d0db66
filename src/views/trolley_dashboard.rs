// ============================================================================
// TROLLEY DASHBOARD - "Update BT Number": vuelo -> MAWB -> número de BT
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{input_value, on_input, on_submit, set_input_value, text_input, ElementBuilder, FormField};
use crate::error::SubmitError;
use crate::models::forms::UpdateBtForm;
use crate::models::FieldErrors;
use crate::state::{AppState, Route};
use crate::viewmodels::{AutocompleteViewModel, SuggestionField, TrolleyViewModel};
use crate::views::autocomplete::{AutocompleteOptions, AutocompleteWidget, PickerOptions, PickerWidget};
use crate::views::form_helpers::{card, set_busy, show_field_errors, submit_button};
use crate::views::layout::{render_layout, LayoutProps};
use crate::views::recent_activity::{paint_bt, render_recent_card};
use crate::views::toast::{show_error, show_success};

const SUBMIT_LABEL: &str = "Delivered";
const BUSY_LABEL: &str = "Updating...";

pub fn render_trolley_dashboard(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [TROLLEY] render_trolley_dashboard()");

    let identity = state
        .auth
        .trolley()
        .ok_or_else(|| JsValue::from_str("Trolley session required"))?;
    let vm = TrolleyViewModel::new(state.api.clone(), state.storage.clone(), state.auth.clone());
    let flights = AutocompleteViewModel::new(SuggestionField::Flight, state.api.clone());
    {
        let flights = flights.clone();
        state.on_unmount(move || flights.detach());
    }

    let (recent_card, recent_list) = render_recent_card()?;
    let refresh_recent = {
        let vm = vm.clone();
        let recent_card = recent_card.clone();
        let recent_list = recent_list.clone();
        Rc::new(move || {
            if let Err(e) = paint_bt(&recent_card, &recent_list, &vm.recent()) {
                log::error!("❌ [TROLLEY] Error pintando recientes: {:?}", e);
            }
        })
    };
    refresh_recent();

    // MAWB: lista fija del vuelo elegido, filtrada en local
    let mawb_picker = PickerWidget::new(PickerOptions {
        id: UpdateBtForm::MAWB,
        placeholder: "Select MAWB number",
        disabled_text: "Select flight first",
        search_placeholder: "Search MAWB...",
        empty_text: "No MAWB number found.",
    })?;
    let mawb_field = FormField::new(UpdateBtForm::MAWB, "MAWB Number", &mawb_picker.root)?;

    // Vuelo: autocompletado remoto; al elegir se recargan los MAWB
    let flight = Rc::new(RefCell::new(String::new()));
    let mawb_load_seq = Rc::new(Cell::new(0u64));
    let flight_widget = {
        let flight = flight.clone();
        let picker = mawb_picker.clone();
        let vm = vm.clone();
        let state = state.clone();
        let load_seq = mawb_load_seq.clone();
        AutocompleteWidget::new(
            &flights,
            AutocompleteOptions {
                id: UpdateBtForm::FLIGHT_NUMBER,
                placeholder: "Search flight...",
                empty_text: "No flight found.",
                offline_text: "Flight suggestions are unavailable right now",
            },
            Rc::new(move |selected: String| {
                *flight.borrow_mut() = selected.clone();
                let seq = load_seq.get() + 1;
                load_seq.set(seq);
                let _ = picker.set_loading(true);

                let picker = picker.clone();
                let vm = vm.clone();
                let state = state.clone();
                let load_seq = load_seq.clone();
                spawn_local(async move {
                    let result = vm.load_mawbs_for_flight(&selected).await;
                    // Otro vuelo elegido mientras tanto
                    if load_seq.get() != seq {
                        return;
                    }
                    let items = result.unwrap_or_else(|e| {
                        log::error!("❌ [TROLLEY] MAWBs de {}: {}", selected, e);
                        show_error(&state, "Could not fetch MAWBs", "Failed to load MAWB list for this flight");
                        Vec::new()
                    });
                    let _ = picker.set_loading(false);
                    if let Err(e) = picker.set_items(items) {
                        log::error!("❌ [TROLLEY] Error pintando MAWBs: {:?}", e);
                    }
                });
            }),
        )?
    };
    {
        // Escribir otro vuelo invalida el elegido y su lista de MAWB
        let flight = flight.clone();
        let picker = mawb_picker.clone();
        let load_seq = mawb_load_seq.clone();
        on_input(&flight_widget.input, move |_| {
            if flight.borrow().is_empty() {
                return;
            }
            flight.borrow_mut().clear();
            load_seq.set(load_seq.get() + 1);
            let _ = picker.reset();
        })?;
    }
    let flight_field = FormField::new(UpdateBtForm::FLIGHT_NUMBER, "Flight Number", &flight_widget.root)?;

    let bt_input = text_input(UpdateBtForm::BT_NUMBER, "text", "Enter baggage trolley number")?;
    let bt_field = FormField::new(UpdateBtForm::BT_NUMBER, "BT Number", &bt_input)?;
    let submit = submit_button(SUBMIT_LABEL)?;

    let (form_card, form_content) = card("Update BT Number", Some("Add a trolley/baggage number to a shipment"))?;
    let form = ElementBuilder::new("form")?
        .class("bt-form")
        .attr("novalidate", "")?
        .children([&flight_field.group, &mawb_field.group, &bt_field.group, &submit])?
        .build();
    form_content.append_child(&form)?;

    {
        let state = state.clone();
        let busy = Rc::new(Cell::new(false));
        on_submit(&form, move || {
            if busy.get() {
                return;
            }
            let bt_form = UpdateBtForm {
                flight_number: flight.borrow().clone(),
                mawb: mawb_picker.selected().unwrap_or_default(),
                bt_number: input_value(&bt_input),
            };
            let fields = [
                (UpdateBtForm::FLIGHT_NUMBER, &flight_field),
                (UpdateBtForm::MAWB, &mawb_field),
                (UpdateBtForm::BT_NUMBER, &bt_field),
            ];
            if let Err(errors) = bt_form.validate() {
                show_field_errors(&fields, &errors);
                return;
            }
            show_field_errors(&fields, &FieldErrors::new());

            busy.set(true);
            set_busy(&submit, true, BUSY_LABEL, SUBMIT_LABEL);
            let vm = vm.clone();
            let state = state.clone();
            let bt_input = bt_input.clone();
            let submit = submit.clone();
            let busy = busy.clone();
            let refresh_recent = refresh_recent.clone();
            spawn_local(async move {
                match vm.submit_bt(&bt_form).await {
                    Ok(submission) => {
                        show_success(
                            &state,
                            "Success!",
                            &format!("Updated BT number {} for MAWB {}", submission.bt_number, submission.mawb),
                        );
                        // Vuelo y MAWB se conservan para la siguiente entrada
                        set_input_value(&bt_input, "");
                        refresh_recent();
                    }
                    Err(SubmitError::Invalid(errors)) => {
                        log::warn!("⚠️ [TROLLEY] Formulario inválido ({} campos)", errors.len());
                    }
                    Err(SubmitError::Api(e)) => {
                        show_error(&state, "Error updating BT number", &e.user_message());
                    }
                }
                busy.set(false);
                set_busy(&submit, false, BUSY_LABEL, SUBMIT_LABEL);
            });
        })?;
    }

    let content = ElementBuilder::new("div")?
        .class("dashboard")
        .children([&form_card, &recent_card])?
        .build();

    let on_logout: Rc<dyn Fn()> = {
        let auth = state.auth.clone();
        Rc::new(move || {
            auth.logout_trolley();
            Route::TrolleyLogin.navigate();
        })
    };
    render_layout(
        LayoutProps {
            brand: "Merlin Trolley",
            user_label: identity.display_label(),
            user_lines: vec![identity.display_label()],
            theme: "theme-trolley",
            on_logout,
        },
        &content,
    )
}
