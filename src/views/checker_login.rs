// ============================================================================
// CHECKER LOGIN VIEW - Checker ID + equipo
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{input_value, on_submit, text_input, ElementBuilder, FormField};
use crate::error::SubmitError;
use crate::models::forms::CheckerLoginForm;
use crate::models::FieldErrors;
use crate::state::{AppState, Route};
use crate::viewmodels::CheckerViewModel;
use crate::views::form_helpers::{card, set_busy, show_field_errors, submit_button};
use crate::views::toast::{show_error, show_success};

pub fn render_checker_login(state: &AppState) -> Result<Element, JsValue> {
    log::info!("🎬 [LOGIN] render_checker_login()");

    let (card, content) = card("Merlin", Some("Log in to access the cargo tracking system"))?;
    card.class_list().add_1("login-card")?;

    let checker_input = text_input(CheckerLoginForm::CHECKER_ID, "text", "Enter your checker ID")?;
    let team_input = text_input(CheckerLoginForm::TEAM_NAME, "text", "Enter your team name")?;
    let checker_field = FormField::new(CheckerLoginForm::CHECKER_ID, "Checker ID", &checker_input)?;
    let team_field = FormField::new(CheckerLoginForm::TEAM_NAME, "Team Name", &team_input)?;
    let submit = submit_button("Login")?;

    let form = ElementBuilder::new("form")?
        .class("login-form")
        .attr("novalidate", "")?
        .children([&checker_field.group, &team_field.group, &submit])?
        .build();
    content.append_child(&form)?;

    let vm = CheckerViewModel::new(state.api.clone(), state.storage.clone(), state.auth.clone());
    let state = state.clone();
    on_submit(&form, move || {
        let login_form = CheckerLoginForm {
            checker_id: input_value(&checker_input),
            team_name: input_value(&team_input),
        };
        let fields = [
            (CheckerLoginForm::CHECKER_ID, &checker_field),
            (CheckerLoginForm::TEAM_NAME, &team_field),
        ];
        if let Err(errors) = login_form.validate() {
            show_field_errors(&fields, &errors);
            return;
        }
        show_field_errors(&fields, &FieldErrors::new());

        set_busy(&submit, true, "Logging in...", "Login");
        let vm = vm.clone();
        let state = state.clone();
        let submit = submit.clone();
        spawn_local(async move {
            match vm.login(&login_form).await {
                Ok(identity) => {
                    show_success(
                        &state,
                        "Login successful",
                        &format!("Welcome, {} from {} team!", identity.checker_id, identity.team_name),
                    );
                    Route::CheckerDashboard.navigate();
                }
                Err(SubmitError::Invalid(errors)) => {
                    log::warn!("⚠️ [LOGIN] Formulario inválido ({} campos)", errors.len());
                    set_busy(&submit, false, "Logging in...", "Login");
                }
                Err(SubmitError::Api(e)) => {
                    log::error!("❌ [LOGIN] {}", e);
                    show_error(&state, "Login failed", &e.user_message());
                    set_busy(&submit, false, "Logging in...", "Login");
                }
            }
        });
    })?;

    let link = ElementBuilder::new("a")?
        .class("login-switch")
        .attr("href", Route::TrolleyLogin.hash())?
        .text("Trolley Staff Login")
        .build();

    Ok(ElementBuilder::new("div")?
        .class("login-screen")
        .children([&card, &link])?
        .build())
}
