// ============================================================================
// TROLLEY VIEWMODEL - Login de trolley y asignación de números de BT
// ============================================================================

use chrono::{DateTime, Utc};
use crate::error::{ApiError, SubmitError};
use crate::models::api::UpdateBtRequest;
use crate::models::forms::{TrolleyLoginForm, UpdateBtForm, ValidBtUpdate};
use crate::models::{BtSubmission, RecentList, TrolleyIdentity};
use crate::services::{ApiClient, StorageService};
use crate::state::AuthState;

/// Resultado del login. `simulated` = el backend no tenía endpoint o no
/// respondió y la identidad se aceptó localmente.
#[derive(Clone, Debug, PartialEq)]
pub struct TrolleyLogin {
    pub identity: TrolleyIdentity,
    pub simulated: bool,
}

/// El backend no expone login de trolley en todos los despliegues: si no se
/// puede contactar (o no existe la ruta) se acepta la identidad localmente.
fn login_can_be_simulated(error: &ApiError) -> bool {
    match error {
        ApiError::Http { status, .. } => *status == 404 || *status == 405,
        other => other.is_connectivity(),
    }
}

#[derive(Clone)]
pub struct TrolleyViewModel {
    api: ApiClient,
    storage: StorageService,
    auth: AuthState,
}

impl TrolleyViewModel {
    pub fn new(api: ApiClient, storage: StorageService, auth: AuthState) -> Self {
        Self { api, storage, auth }
    }

    pub async fn login(&self, form: &TrolleyLoginForm) -> Result<TrolleyLogin, SubmitError> {
        let identity = form.validate()?;

        let simulated = match self.api.trolley_login(&identity.employee_id).await {
            Ok(_) => false,
            Err(e) if login_can_be_simulated(&e) => {
                log::warn!("⚠️ [TROLLEY] Login no disponible en backend ({}), se acepta localmente", e);
                true
            }
            Err(e) => return Err(e.into()),
        };

        self.auth.login_trolley(identity.clone());
        Ok(TrolleyLogin { identity, simulated })
    }

    pub fn logout(&self) {
        self.auth.logout_trolley();
    }

    /// MAWBs asociados al vuelo elegido
    pub async fn load_mawbs_for_flight(&self, flight: &str) -> Result<Vec<String>, ApiError> {
        let mawbs = self.api.fetch_mawb_by_flight(flight).await?;
        log::info!("✈️ [TROLLEY] {} MAWBs para el vuelo {}", mawbs.len(), flight);
        Ok(mawbs)
    }

    /// Asignar BT; el caller conserva vuelo y MAWB para la siguiente entrada
    pub async fn submit_bt(&self, form: &UpdateBtForm) -> Result<BtSubmission, SubmitError> {
        let update = form.validate()?;
        let request = UpdateBtRequest {
            mawb: update.mawb.clone(),
            bt_number: update.bt_number.clone(),
            employee_id: self
                .auth
                .trolley()
                .map(|i| i.employee_id)
                .unwrap_or_default(),
        };

        if let Err(e) = self.api.update_bt_number(&request).await {
            log::error!("❌ [TROLLEY] Error asignando BT {} a {}: {}", update.bt_number, update.mawb, e);
            return Err(e.into());
        }

        Ok(self.record_submission(&update, Utc::now()))
    }

    pub fn record_submission(&self, update: &ValidBtUpdate, timestamp: DateTime<Utc>) -> BtSubmission {
        let identity = self.auth.trolley();
        let submission = BtSubmission::new(
            &update.flight_number,
            &update.mawb,
            &update.bt_number,
            identity.as_ref(),
            timestamp,
        );

        let mut recent = self.storage.load_recent_bt();
        recent.push(submission.clone());
        if let Err(e) = self.storage.save_recent_bt(&recent) {
            log::error!("❌ [TROLLEY] Error guardando recientes: {}", e);
        }
        submission
    }

    pub fn recent(&self) -> RecentList<BtSubmission> {
        self.storage.load_recent_bt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;
    use std::rc::Rc;

    fn viewmodel() -> TrolleyViewModel {
        let storage = StorageService::with_backend(Rc::new(MemoryStorage::new()));
        let auth = AuthState::new(storage.clone());
        auth.login_trolley(TrolleyIdentity::new("E-77"));
        TrolleyViewModel::new(ApiClient::new(), storage, auth)
    }

    #[test]
    fn only_unreachable_or_missing_endpoint_is_simulated() {
        assert!(login_can_be_simulated(&ApiError::Network("Failed to fetch".into())));
        assert!(login_can_be_simulated(&ApiError::Timeout(15)));
        assert!(login_can_be_simulated(&ApiError::Http { status: 404, message: "Not Found".into() }));
        assert!(!login_can_be_simulated(&ApiError::Http { status: 401, message: "Unauthorized".into() }));
        assert!(!login_can_be_simulated(&ApiError::Rejected("Unknown employee".into())));
    }

    #[test]
    fn recorded_bt_submission_carries_employee() {
        let vm = viewmodel();
        let update = UpdateBtForm {
            flight_number: "EK202".into(),
            mawb: "176-12345678".into(),
            bt_number: "BT-09".into(),
        }
        .validate()
        .unwrap();

        vm.record_submission(&update, Utc::now());

        let recent = vm.recent();
        let head = recent.latest().unwrap();
        assert_eq!(head.bt_number, "BT-09");
        assert_eq!(head.flight_number, "EK202");
        assert_eq!(head.employee_id.as_deref(), Some("E-77"));
    }

    #[test]
    fn bt_recent_list_is_bounded() {
        let vm = viewmodel();
        let capacity = RecentList::<BtSubmission>::capacity();
        for i in 0..capacity * 2 {
            let update = ValidBtUpdate {
                flight_number: "EK202".into(),
                mawb: "176-12345678".into(),
                bt_number: format!("BT-{}", i),
            };
            vm.record_submission(&update, Utc::now());
        }
        let recent = vm.recent();
        assert_eq!(recent.len(), capacity);
        assert_eq!(recent.latest().unwrap().bt_number, format!("BT-{}", capacity * 2 - 1));
    }
}
