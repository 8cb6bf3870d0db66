// ============================================================================
// AUTOCOMPLETE VIEWMODEL - Debounce (gloo Timeout) + HTTP con AbortController
// ============================================================================
// Envuelve SuggestionFetcher: programa el timer que devuelve `edit`, lanza la
// request cuando vence y aplica el resultado con `settle`. La vista se entera
// de los cambios por el callback `on_change`.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use crate::error::ApiError;
use crate::services::{AbortHandle, ApiClient};
use crate::viewmodels::suggestion_fetcher::{
    resolve_outcome, DebounceAction, FetchPhase, FetcherConfig, SuggestionFetcher,
    SuggestionOutcome, SuggestionTicket,
};

/// Endpoint de sugerencias que alimenta el campo
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuggestionField {
    Mawb,
    Flight,
}

impl SuggestionField {
    fn config(self) -> FetcherConfig {
        match self {
            SuggestionField::Mawb => FetcherConfig::mawb(),
            SuggestionField::Flight => FetcherConfig::flights(),
        }
    }
}

#[derive(Clone)]
pub struct AutocompleteViewModel {
    field: SuggestionField,
    api: ApiClient,
    fetcher: Rc<RefCell<SuggestionFetcher>>,
    debounce: Rc<RefCell<Option<Timeout>>>,
    in_flight: Rc<RefCell<Option<AbortHandle>>>,
    on_change: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
}

impl AutocompleteViewModel {
    pub fn new(field: SuggestionField, api: ApiClient) -> Self {
        Self {
            field,
            api,
            fetcher: Rc::new(RefCell::new(SuggestionFetcher::new(field.config()))),
            debounce: Rc::new(RefCell::new(None)),
            in_flight: Rc::new(RefCell::new(None)),
            on_change: Rc::new(RefCell::new(None)),
        }
    }

    pub fn set_on_change<F: Fn() + 'static>(&self, callback: F) {
        *self.on_change.borrow_mut() = Some(Rc::new(callback));
    }

    pub fn query(&self) -> String {
        self.fetcher.borrow().query().to_string()
    }

    pub fn suggestions(&self) -> Vec<String> {
        self.fetcher.borrow().suggestions().to_vec()
    }

    pub fn phase(&self) -> FetchPhase {
        self.fetcher.borrow().phase()
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.borrow().is_loading()
    }

    pub fn is_offline(&self) -> bool {
        self.fetcher
            .borrow()
            .outcome()
            .map(SuggestionOutcome::is_offline)
            .unwrap_or(false)
    }

    /// Terminó la búsqueda y no hay nada que ofrecer
    pub fn is_empty_result(&self) -> bool {
        let fetcher = self.fetcher.borrow();
        fetcher.phase() == FetchPhase::Settled && fetcher.suggestions().is_empty()
    }

    /// Cada tecla del usuario
    pub fn input(&self, query: &str) {
        self.cancel_pending();
        let action = self.fetcher.borrow_mut().edit(query);

        if let DebounceAction::Schedule { generation, delay_ms } = action {
            let vm = self.clone();
            let timeout = Timeout::new(delay_ms, move || vm.fire(generation));
            *self.debounce.borrow_mut() = Some(timeout);
        }
        self.notify();
    }

    /// Selección de una sugerencia (o reset con "")
    pub fn select(&self, value: &str) {
        self.cancel_pending();
        self.fetcher.borrow_mut().select(value);
        self.notify();
    }

    /// Cancelar debounce y request en vuelo (desmontaje de la vista)
    pub fn cancel_pending(&self) {
        // Soltar el Timeout cancela el debounce
        self.debounce.borrow_mut().take();
        if let Some(abort) = self.in_flight.borrow_mut().take() {
            abort.abort();
        }
    }

    /// Desmontaje de la vista: cancela lo pendiente y suelta el callback,
    /// que referencia al DOM de la vista y a este mismo viewmodel
    pub fn detach(&self) {
        self.cancel_pending();
        self.on_change.borrow_mut().take();
    }

    /// Callback del debounce. No toca `self.debounce`: el Timeout que nos
    /// invoca no puede soltarse desde su propio callback.
    fn fire(&self, generation: u64) {
        let Some(ticket) = self.fetcher.borrow_mut().fire(generation) else {
            return;
        };
        log::debug!("🔍 [AUTOCOMPLETE] Request #{} para '{}'", ticket.seq, ticket.query);

        let abort = AbortHandle::new();
        if let Some(previous) = self.in_flight.borrow_mut().replace(abort.clone()) {
            previous.abort();
        }
        self.notify();

        let vm = self.clone();
        spawn_local(async move {
            let result = match vm.field {
                SuggestionField::Mawb => vm.api.fetch_mawb_suggestions(&ticket.query, &abort).await,
                SuggestionField::Flight => vm.api.fetch_flight_suggestions(&ticket.query, &abort).await,
            };
            vm.complete(ticket, result);
        });
    }

    fn complete(&self, ticket: SuggestionTicket, result: Result<Vec<String>, ApiError>) {
        if matches!(result, Err(ApiError::Aborted)) {
            log::debug!("🗑️ [AUTOCOMPLETE] Request #{} cancelada", ticket.seq);
            return;
        }

        let config = self.fetcher.borrow().config().clone();
        let outcome = resolve_outcome(&config, &ticket.query, result, js_sys::Math::random);
        let applied = self.fetcher.borrow_mut().settle(&ticket, outcome);
        if applied {
            self.in_flight.borrow_mut().take();
            self.notify();
        }
    }

    fn notify(&self) {
        let callback = self.on_change.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detach_releases_the_view_callback() {
        let vm = AutocompleteViewModel::new(SuggestionField::Mawb, ApiClient::new());
        let painted = Rc::new(std::cell::Cell::new(0));
        {
            let painted = painted.clone();
            vm.set_on_change(move || painted.set(painted.get() + 1));
        }
        assert_eq!(Rc::strong_count(&painted), 2);

        vm.select("176-12345678");
        assert_eq!(painted.get(), 1);

        vm.detach();
        assert_eq!(Rc::strong_count(&painted), 1);
        vm.select("");
        assert_eq!(painted.get(), 1);
    }

    #[test]
    fn cancel_pending_keeps_the_view_subscribed() {
        let vm = AutocompleteViewModel::new(SuggestionField::Flight, ApiClient::new());
        let painted = Rc::new(std::cell::Cell::new(0));
        {
            let painted = painted.clone();
            vm.set_on_change(move || painted.set(painted.get() + 1));
        }
        vm.cancel_pending();
        vm.select("EK202");
        assert_eq!(painted.get(), 1);
        assert_eq!(vm.phase(), FetchPhase::Idle);
    }
}
