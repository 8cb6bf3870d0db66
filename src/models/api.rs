// DTOs del backend de Merlin (requests y responses)

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UpdatePiecesRequest {
    pub mawb: String,
    pub pcs_received: u32,
    pub checker_id: String,
    pub team_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UpdateBtRequest {
    pub mawb: String,
    pub bt_number: String,
    pub employee_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrolleyLoginRequest {
    pub employee_id: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TrolleyLoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Respuesta genérica: acuse de recibo o `{ "error": "..." }`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AckResponse {
    /// El servidor respondió 2xx pero rechazó la operación
    pub fn rejection(&self) -> Option<String> {
        if let Some(error) = &self.error {
            return Some(error.clone());
        }
        match self.success {
            Some(false) => Some(self.message.clone().unwrap_or_default()),
            _ => None,
        }
    }
}

/// Cuerpo de error de la API (`{ "error": "..." }`)
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_matches_backend_keys() {
        let request = UpdatePiecesRequest {
            mawb: "176-12345678".into(),
            pcs_received: 50,
            checker_id: "C-104".into(),
            team_name: "Ramp A".into(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "mawb": "176-12345678",
                "pcs_received": 50,
                "checker_id": "C-104",
                "team_name": "Ramp A"
            })
        );
    }

    #[test]
    fn ack_detects_rejections() {
        let ack: AckResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert_eq!(ack.rejection(), None);

        let ack: AckResponse = serde_json::from_str(r#"{"error":"Unknown MAWB"}"#).unwrap();
        assert_eq!(ack.rejection().as_deref(), Some("Unknown MAWB"));

        let ack: AckResponse = serde_json::from_str(r#"{"success":false,"message":"locked"}"#).unwrap();
        assert_eq!(ack.rejection().as_deref(), Some("locked"));
    }

    #[test]
    fn trolley_login_response_tolerates_missing_fields() {
        let response: TrolleyLoginResponse = serde_json::from_str(r#"{"error":"Unknown employee"}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Unknown employee"));
    }
}
