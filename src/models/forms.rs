// ============================================================================
// FORMS - Validación por campo antes de cualquier request
// ============================================================================
// Cada formulario valida sus campos y devuelve los valores ya limpios,
// o un FieldErrors con un mensaje por campo para mostrar inline.
// ============================================================================

use crate::models::session::{CheckerIdentity, TrolleyIdentity};

pub const MAX_PIECES: u32 = 10_000;

/// Errores de validación, un mensaje por campo (en orden de aparición)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Solo se guarda el primer error de cada campo
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push((field, message.into()));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

fn require_min_chars(errors: &mut FieldErrors, field: &'static str, value: &str, min: usize, message: &str) {
    if value.chars().count() < min {
        errors.push(field, message);
    }
}

// ----------------------------------------------------------------------------
// Login del checker
// ----------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckerLoginForm {
    pub checker_id: String,
    pub team_name: String,
}

impl CheckerLoginForm {
    pub const CHECKER_ID: &'static str = "checkerId";
    pub const TEAM_NAME: &'static str = "teamName";

    pub fn validate(&self) -> Result<CheckerIdentity, FieldErrors> {
        let checker_id = self.checker_id.trim();
        let team_name = self.team_name.trim();

        let mut errors = FieldErrors::new();
        require_min_chars(&mut errors, Self::CHECKER_ID, checker_id, 3, "Checker ID must be at least 3 characters");
        require_min_chars(&mut errors, Self::TEAM_NAME, team_name, 2, "Team name must be at least 2 characters");

        errors.into_result(CheckerIdentity::new(checker_id, team_name))
    }
}

// ----------------------------------------------------------------------------
// Actualización de piezas recibidas
// ----------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateCargoForm {
    pub mawb: String,
    /// Texto crudo del input numérico
    pub pcs_received: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidCargoUpdate {
    pub mawb: String,
    pub pcs_received: u32,
}

impl UpdateCargoForm {
    pub const MAWB: &'static str = "mawb";
    pub const PCS_RECEIVED: &'static str = "pcs_received";

    pub fn validate(&self) -> Result<ValidCargoUpdate, FieldErrors> {
        let mawb = self.mawb.trim();

        let mut errors = FieldErrors::new();
        require_min_chars(&mut errors, Self::MAWB, mawb, 5, "MAWB number is required");

        let pieces = match parse_pieces(&self.pcs_received) {
            Ok(pieces) => pieces,
            Err(message) => {
                errors.push(Self::PCS_RECEIVED, message);
                0
            }
        };

        errors.into_result(ValidCargoUpdate {
            mawb: mawb.to_string(),
            pcs_received: pieces,
        })
    }
}

/// Coerción numérica: vacío o no numérico cuenta como 0
fn parse_pieces(raw: &str) -> Result<u32, &'static str> {
    let trimmed = raw.trim();
    let value: f64 = if trimmed.is_empty() {
        0.0
    } else {
        trimmed.parse().unwrap_or(f64::NAN)
    };

    if !value.is_finite() || value < 1.0 {
        return Err("Number of pieces must be at least 1");
    }
    if value > MAX_PIECES as f64 {
        return Err("Number exceeds maximum limit");
    }
    if value.fract() != 0.0 {
        return Err("Number of pieces must be a whole number");
    }
    Ok(value as u32)
}

// ----------------------------------------------------------------------------
// Login de trolley
// ----------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrolleyLoginForm {
    pub employee_id: String,
}

impl TrolleyLoginForm {
    pub const EMPLOYEE_ID: &'static str = "employee_id";

    pub fn validate(&self) -> Result<TrolleyIdentity, FieldErrors> {
        let employee_id = self.employee_id.trim();

        let mut errors = FieldErrors::new();
        require_min_chars(&mut errors, Self::EMPLOYEE_ID, employee_id, 3, "Employee ID must be at least 3 characters");

        errors.into_result(TrolleyIdentity::new(employee_id))
    }
}

// ----------------------------------------------------------------------------
// Asignación de BT
// ----------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateBtForm {
    pub flight_number: String,
    pub mawb: String,
    pub bt_number: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidBtUpdate {
    pub flight_number: String,
    pub mawb: String,
    pub bt_number: String,
}

impl UpdateBtForm {
    pub const FLIGHT_NUMBER: &'static str = "flight_number";
    pub const MAWB: &'static str = "mawb";
    pub const BT_NUMBER: &'static str = "bt_number";

    pub fn validate(&self) -> Result<ValidBtUpdate, FieldErrors> {
        let flight_number = self.flight_number.trim();
        let mawb = self.mawb.trim();
        let bt_number = self.bt_number.trim();

        let mut errors = FieldErrors::new();
        require_min_chars(&mut errors, Self::FLIGHT_NUMBER, flight_number, 2, "Flight number is required");
        require_min_chars(&mut errors, Self::MAWB, mawb, 4, "MAWB number is required");
        require_min_chars(&mut errors, Self::BT_NUMBER, bt_number, 2, "BT number is required");

        errors.into_result(ValidBtUpdate {
            flight_number: flight_number.to_string(),
            mawb: mawb.to_string(),
            bt_number: bt_number.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checker_login_reports_both_fields() {
        let form = CheckerLoginForm {
            checker_id: "C1".into(),
            team_name: " A ".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(CheckerLoginForm::CHECKER_ID), Some("Checker ID must be at least 3 characters"));
        assert_eq!(errors.get(CheckerLoginForm::TEAM_NAME), Some("Team name must be at least 2 characters"));
    }

    #[test]
    fn checker_login_trims_values() {
        let form = CheckerLoginForm {
            checker_id: "  C-104 ".into(),
            team_name: "Ramp A".into(),
        };
        assert_eq!(form.validate().unwrap(), CheckerIdentity::new("C-104", "Ramp A"));
    }

    #[test]
    fn cargo_update_accepts_valid_input() {
        let form = UpdateCargoForm {
            mawb: "176-12345678".into(),
            pcs_received: "50".into(),
        };
        assert_eq!(
            form.validate().unwrap(),
            ValidCargoUpdate { mawb: "176-12345678".into(), pcs_received: 50 }
        );
    }

    #[test]
    fn cargo_update_piece_bounds() {
        let check = |raw: &str| {
            UpdateCargoForm { mawb: "176-12345678".into(), pcs_received: raw.into() }
                .validate()
                .err()
                .and_then(|e| e.get(UpdateCargoForm::PCS_RECEIVED).map(str::to_string))
        };
        assert_eq!(check("0").as_deref(), Some("Number of pieces must be at least 1"));
        assert_eq!(check("").as_deref(), Some("Number of pieces must be at least 1"));
        assert_eq!(check("abc").as_deref(), Some("Number of pieces must be at least 1"));
        assert_eq!(check("10001").as_deref(), Some("Number exceeds maximum limit"));
        assert_eq!(check("2.5").as_deref(), Some("Number of pieces must be a whole number"));
        assert_eq!(check("10000"), None);
        assert_eq!(check("1"), None);
    }

    #[test]
    fn cargo_update_short_mawb() {
        let errors = UpdateCargoForm { mawb: "176".into(), pcs_received: "3".into() }
            .validate()
            .unwrap_err();
        assert_eq!(errors.get(UpdateCargoForm::MAWB), Some("MAWB number is required"));
        assert_eq!(errors.get(UpdateCargoForm::PCS_RECEIVED), None);
    }

    #[test]
    fn trolley_forms() {
        assert!(TrolleyLoginForm { employee_id: "E1".into() }.validate().is_err());
        assert_eq!(
            TrolleyLoginForm { employee_id: "E-77".into() }.validate().unwrap(),
            TrolleyIdentity::new("E-77")
        );

        let errors = UpdateBtForm {
            flight_number: "A".into(),
            mawb: "098".into(),
            bt_number: "".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get(UpdateBtForm::FLIGHT_NUMBER), Some("Flight number is required"));
        assert_eq!(errors.get(UpdateBtForm::MAWB), Some("MAWB number is required"));
        assert_eq!(errors.get(UpdateBtForm::BT_NUMBER), Some("BT number is required"));
    }

    #[test]
    fn field_errors_keep_first_message_per_field() {
        let mut errors = FieldErrors::new();
        errors.push("mawb", "first");
        errors.push("mawb", "second");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("mawb"), Some("first"));
    }
}
