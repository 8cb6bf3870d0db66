// ============================================================================
// TROLLEY LOGIN VIEW - Employee ID
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{input_value, on_submit, text_input, ElementBuilder, FormField};
use crate::error::SubmitError;
use crate::models::forms::TrolleyLoginForm;
use crate::state::{AppState, Route};
use crate::viewmodels::TrolleyViewModel;
use crate::views::form_helpers::{card, set_busy, show_field_errors, submit_button};
use crate::views::toast::{show_error, show_success};

pub fn render_trolley_login(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [TROLLEY] render_trolley_login()");

    let (card, content) = card("Merlin Towing", Some("Login to update baggage trolley numbers"))?;
    card.class_list().add_2("login-card", "trolley")?;

    let employee_input = text_input(TrolleyLoginForm::EMPLOYEE_ID, "text", "Enter your employee ID")?;
    let employee_field = FormField::new(TrolleyLoginForm::EMPLOYEE_ID, "Employee ID", &employee_input)?;
    let submit = submit_button("Login")?;

    let form = ElementBuilder::new("form")?
        .class("login-form")
        .attr("novalidate", "")?
        .children([&employee_field.group, &submit])?
        .build();
    content.append_child(&form)?;

    let vm = TrolleyViewModel::new(state.api.clone(), state.storage.clone(), state.auth.clone());
    let state = state.clone();
    on_submit(&form, move || {
        let login_form = TrolleyLoginForm {
            employee_id: input_value(&employee_input),
        };
        let fields = [(TrolleyLoginForm::EMPLOYEE_ID, &employee_field)];
        match login_form.validate() {
            Err(errors) => {
                show_field_errors(&fields, &errors);
                return;
            }
            Ok(_) => show_field_errors(&fields, &Default::default()),
        }

        set_busy(&submit, true, "Logging in...", "Login");
        let vm = vm.clone();
        let state = state.clone();
        let submit = submit.clone();
        spawn_local(async move {
            match vm.login(&login_form).await {
                Ok(login) => {
                    if login.simulated {
                        log::info!("ℹ️ [TROLLEY] Login aceptado sin backend");
                    }
                    show_success(
                        &state,
                        "Login successful",
                        &format!("Welcome, Employee {}!", login.identity.employee_id),
                    );
                    Route::TrolleyDashboard.navigate();
                }
                Err(e) => {
                    let message = match &e {
                        SubmitError::Api(api) => api.user_message(),
                        SubmitError::Invalid(_) => "Please check your employee ID and try again.".to_string(),
                    };
                    show_error(&state, "Login failed", &message);
                    set_busy(&submit, false, "Logging in...", "Login");
                }
            }
        });
    })?;

    let link = ElementBuilder::new("a")?
        .class("login-switch")
        .attr("href", Route::CheckerLogin.hash())?
        .text("Pickup Staff Login")
        .build();

    Ok(ElementBuilder::new("div")?
        .class("login-screen")
        .children([&card, &link])?
        .build())
}
