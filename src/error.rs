// ============================================================================
// ERRORES - Taxonomía de errores de red y de almacenamiento
// ============================================================================
// Los errores de validación viven en models::forms (por campo, inline).
// ============================================================================

use thiserror::Error;
use crate::models::api::ErrorBody;
use crate::models::forms::FieldErrors;

/// Errores de comunicación con el backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u32),

    /// La petición fue cancelada porque otra más reciente la reemplazó
    #[error("Request aborted")]
    Aborted,

    /// `message` es el `error` del cuerpo JSON; vacío si el servidor no lo envió
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// 2xx con `{ "error": ... }` o `success: false`
    #[error("Rejected by server: {0}")]
    Rejected(String),
}

impl ApiError {
    /// Error para una respuesta no-2xx. Solo el campo `error` del cuerpo llega
    /// al usuario; el status text (HTML de un proxy, "Internal Server Error"...)
    /// se queda en los logs.
    pub fn from_http_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|body| body.error)
            .unwrap_or_default();
        ApiError::Http { status, message }
    }

    /// Fallo de conectividad (backend inalcanzable), no una respuesta del servidor
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Timeout(_))
    }

    /// Mensaje para mostrar en un toast
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Rejected(message) if !message.is_empty() => message.clone(),
            ApiError::Network(_) => "Cannot reach the server. Please try again later".to_string(),
            ApiError::Timeout(_) => "The server took too long to respond. Please try again later".to_string(),
            _ => "Please try again later".to_string(),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(error: gloo_net::Error) -> Self {
        match error {
            gloo_net::Error::SerdeError(e) => ApiError::Parse(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Errores de localStorage: nunca fatales, se registran y se tratan como "sin estado"
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("localStorage not available")]
    Unavailable,

    #[error("Error reading key '{0}'")]
    Read(String),

    #[error("Error writing key '{0}'")]
    Write(String),

    #[error("Error removing key '{0}'")]
    Remove(String),

    #[error("Error serializing data: {0}")]
    Serialize(String),

    #[error("Error deserializing key '{key}': {message}")]
    Deserialize { key: String, message: String },
}

/// Resultado fallido de un envío de formulario: validación local o backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("Invalid form ({} fields)", .0.len())]
    Invalid(FieldErrors),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<FieldErrors> for SubmitError {
    fn from(errors: FieldErrors) -> Self {
        SubmitError::Invalid(errors)
    }
}
