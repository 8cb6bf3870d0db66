use serde::{Deserialize, Serialize};

/// Identidad del checker (personal de recogida). Se guarda en `user`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckerIdentity {
    pub checker_id: String,
    pub team_name: String,
}

impl CheckerIdentity {
    pub fn new(checker_id: impl Into<String>, team_name: impl Into<String>) -> Self {
        Self {
            checker_id: checker_id.into(),
            team_name: team_name.into(),
        }
    }

    /// "C-104 | Ramp A"
    pub fn display_label(&self) -> String {
        format!("{} | {}", self.checker_id, self.team_name)
    }
}

/// Identidad del operador de trolley. Se guarda en `trolleyUser`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrolleyIdentity {
    /// Las sesiones antiguas se guardaron con la forma del formulario
    #[serde(alias = "employee_id")]
    pub employee_id: String,
}

impl TrolleyIdentity {
    pub fn new(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
        }
    }

    pub fn display_label(&self) -> String {
        format!("Employee {}", self.employee_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checker_identity_uses_camel_case_keys() {
        let identity = CheckerIdentity::new("C-104", "Ramp A");
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json, serde_json::json!({ "checkerId": "C-104", "teamName": "Ramp A" }));
    }

    #[test]
    fn trolley_identity_reads_persisted_shape() {
        let identity: TrolleyIdentity = serde_json::from_str(r#"{"employeeId":"E-77"}"#).unwrap();
        assert_eq!(identity, TrolleyIdentity::new("E-77"));
        assert_eq!(identity.display_label(), "Employee E-77");
    }

    #[test]
    fn trolley_identity_reads_form_shaped_sessions() {
        let identity: TrolleyIdentity = serde_json::from_str(r#"{"employee_id":"E-77"}"#).unwrap();
        assert_eq!(identity, TrolleyIdentity::new("E-77"));
        // Se reescribe con la clave actual
        assert_eq!(serde_json::to_value(&identity).unwrap(), serde_json::json!({ "employeeId": "E-77" }));
    }
}
