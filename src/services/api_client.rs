// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP.
// Cada request lleva un timeout (CONFIG.network_timeout_seconds) que cubre
// también la lectura del cuerpo, y puede cancelarse desde fuera con un
// AbortHandle.
// ============================================================================

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::{AbortController, AbortSignal};
use crate::config::CONFIG;
use crate::error::ApiError;
use crate::models::api::{
    AckResponse, TrolleyLoginRequest, TrolleyLoginResponse, UpdateBtRequest,
    UpdatePiecesRequest,
};
use crate::models::session::CheckerIdentity;
use crate::utils::constants::backend_url;

/// Handle para cancelar una request en curso (AbortController)
#[derive(Clone, Debug)]
pub struct AbortHandle {
    controller: Option<AbortController>,
}

impl AbortHandle {
    pub fn new() -> Self {
        let controller = AbortController::new().ok();
        if controller.is_none() {
            log::warn!("⚠️ [API] AbortController no disponible, la request no se podrá cancelar");
        }
        Self { controller }
    }

    pub fn abort(&self) {
        if let Some(controller) = &self.controller {
            controller.abort();
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.controller
            .as_ref()
            .map(|c| c.signal().aborted())
            .unwrap_or(false)
    }

    fn signal(&self) -> Option<AbortSignal> {
        self.controller.as_ref().map(|c| c.signal())
    }
}

impl Default for AbortHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    timeout_seconds: u32,
    timeout_ms: u32,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: backend_url().trim_end_matches('/').to_string(),
            timeout_seconds: CONFIG.network_timeout_seconds,
            timeout_ms: CONFIG.network_timeout_ms(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ------------------------------------------------------------------------
    // Checker (personal de recogida)
    // ------------------------------------------------------------------------

    /// Sugerencias de MAWB para el autocompletado
    pub async fn fetch_mawb_suggestions(
        &self,
        query: &str,
        abort: &AbortHandle,
    ) -> Result<Vec<String>, ApiError> {
        log::debug!("🔍 [API] MAWB suggestions para '{}'", query);
        let builder = Request::get(&self.url("/mawb-suggestions/")).query([("query", query)]);
        self.send(builder, None::<&()>, abort, read_json::<Vec<String>>).await
    }

    /// Actualizar piezas recibidas de un MAWB
    pub async fn update_received_pieces(&self, request: &UpdatePiecesRequest) -> Result<(), ApiError> {
        log::info!("📦 [API] Actualizando {} piezas para MAWB {}", request.pcs_received, request.mawb);
        let builder = Request::post(&self.url("/update/"));
        self.send(builder, Some(request), &AbortHandle::new(), read_ack).await
    }

    /// Login del checker. El backend no tiene endpoint para esto: se acepta
    /// la identidad tras un pequeño retardo.
    pub async fn checker_login(&self, identity: &CheckerIdentity) -> Result<CheckerIdentity, ApiError> {
        log::info!("🔐 [API] Login checker {} ({})", identity.checker_id, identity.team_name);
        TimeoutFuture::new(CONFIG.ui_config.login_delay_ms).await;
        Ok(identity.clone())
    }

    // ------------------------------------------------------------------------
    // Trolley
    // ------------------------------------------------------------------------

    pub async fn trolley_login(&self, employee_id: &str) -> Result<TrolleyLoginResponse, ApiError> {
        log::info!("🔐 [API] Login trolley para empleado {}", employee_id);
        let request = TrolleyLoginRequest {
            employee_id: employee_id.to_string(),
        };
        let builder = Request::post(&self.url("/trolley-login/"));
        let body = self
            .send(builder, Some(&request), &AbortHandle::new(), read_json::<TrolleyLoginResponse>)
            .await?;

        if let Some(error) = body.error.clone() {
            return Err(ApiError::Rejected(error));
        }
        if !body.success {
            return Err(ApiError::Rejected("Login rejected".to_string()));
        }
        Ok(body)
    }

    /// Sugerencias de número de vuelo
    pub async fn fetch_flight_suggestions(
        &self,
        query: &str,
        abort: &AbortHandle,
    ) -> Result<Vec<String>, ApiError> {
        log::debug!("🔍 [API] Flight suggestions para '{}'", query);
        let builder = Request::get(&self.url("/flight-suggestions/")).query([("query", query)]);
        self.send(builder, None::<&()>, abort, read_json::<Vec<String>>).await
    }

    /// MAWBs de un vuelo concreto
    pub async fn fetch_mawb_by_flight(&self, flight: &str) -> Result<Vec<String>, ApiError> {
        log::info!("✈️ [API] MAWBs del vuelo {}", flight);
        let builder = Request::get(&self.url("/mawb-by-flight/")).query([("flight", flight)]);
        self.send(builder, None::<&()>, &AbortHandle::new(), read_json::<Vec<String>>)
            .await
    }

    /// Asignar número de BT a un MAWB
    pub async fn update_bt_number(&self, request: &UpdateBtRequest) -> Result<(), ApiError> {
        log::info!("🏷️ [API] BT {} para MAWB {}", request.bt_number, request.mawb);
        let builder = Request::post(&self.url("/update-bt/"));
        self.send(builder, Some(request), &AbortHandle::new(), read_ack).await
    }

    // ------------------------------------------------------------------------
    // Transporte
    // ------------------------------------------------------------------------

    /// Enviar la request y leer la respuesta con `read`. El timeout y la
    /// señal de cancelación cubren ambas fases.
    async fn send<B, T, F, Fut>(
        &self,
        builder: RequestBuilder,
        body: Option<&B>,
        abort: &AbortHandle,
        read: F,
    ) -> Result<T, ApiError>
    where
        B: Serialize,
        F: FnOnce(Response) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let signal = abort.signal();
        let builder = builder.abort_signal(signal.as_ref());
        let request = match body {
            Some(body) => builder
                .json(body)
                .map_err(|e| ApiError::Serialization(e.to_string()))?,
            None => builder
                .build()
                .map_err(|e| ApiError::Serialization(e.to_string()))?,
        };

        // El timeout aborta la request; se cancela al salir de esta función
        let timed_out = Rc::new(Cell::new(false));
        let _timeout = {
            let timed_out = timed_out.clone();
            let abort = abort.clone();
            Timeout::new(self.timeout_ms, move || {
                timed_out.set(true);
                abort.abort();
            })
        };

        let result = match request.send().await {
            Ok(response) => read(response).await,
            Err(e) => Err(ApiError::from(e)),
        };

        result.map_err(|error| {
            let error = classify_failure(error, timed_out.get(), abort.is_aborted(), self.timeout_seconds);
            match &error {
                ApiError::Timeout(seconds) => log::warn!("⏱️ [API] Timeout tras {} segundos", seconds),
                ApiError::Network(message) => log::error!("❌ [API] Error de red: {}", message),
                _ => {}
            }
            error
        })
    }
}

/// Un fallo tras vencer el timeout o tras abortar (cuerpo a medias, fetch
/// cancelado) se reporta como tal, no como error de red o de parseo
fn classify_failure(error: ApiError, timed_out: bool, aborted: bool, timeout_seconds: u32) -> ApiError {
    if timed_out {
        ApiError::Timeout(timeout_seconds)
    } else if aborted {
        ApiError::Aborted
    } else {
        error
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parsear JSON de una respuesta 2xx, o convertir el error HTTP
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(http_error(response).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Respuesta de escritura: cualquier 2xx vale salvo `{ "error": ... }`
async fn read_ack(response: Response) -> Result<(), ApiError> {
    if !response.ok() {
        return Err(http_error(response).await);
    }
    // Un cuerpo cortado por timeout o abort no es un acuse de recibo
    let text = response.text().await?;
    match serde_json::from_str::<AckResponse>(&text) {
        Ok(ack) => match ack.rejection() {
            Some(message) => Err(ApiError::Rejected(message)),
            None => Ok(()),
        },
        // Cuerpo vacío o no-JSON: se considera acuse de recibo
        Err(_) => Ok(()),
    }
}

async fn http_error(response: Response) -> ApiError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    log::error!("❌ [API] HTTP {} {}", status, response.status_text());
    ApiError::from_http_body(status, &text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stalled_body_after_timeout_is_a_timeout() {
        let error = classify_failure(ApiError::Parse("unexpected end of input".into()), true, true, 15);
        assert_eq!(error, ApiError::Timeout(15));
        assert!(error.is_connectivity());
    }

    #[test]
    fn cancelled_request_is_aborted_not_network() {
        let error = classify_failure(ApiError::Network("The user aborted a request".into()), false, true, 15);
        assert_eq!(error, ApiError::Aborted);
    }

    #[test]
    fn other_failures_pass_through() {
        let http = ApiError::Http { status: 500, message: String::new() };
        assert_eq!(classify_failure(http.clone(), false, false, 15), http);
    }

    #[test]
    fn timeout_comes_from_config() {
        let client = ApiClient::new();
        assert_eq!(client.timeout_ms, CONFIG.network_timeout_ms());
        assert_eq!(client.timeout_seconds, CONFIG.network_timeout_seconds);
    }
}
