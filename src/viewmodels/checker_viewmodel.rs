// ============================================================================
// CHECKER VIEWMODEL - Login del checker y actualización de piezas
// ============================================================================
// Devuelve valores; la vista decide qué toast mostrar.
// ============================================================================

use chrono::{DateTime, Local, Utc};
use crate::error::SubmitError;
use crate::models::api::UpdatePiecesRequest;
use crate::models::forms::{CheckerLoginForm, UpdateCargoForm, ValidCargoUpdate};
use crate::models::{ActivityStats, CheckerIdentity, PiecesSubmission, RecentList};
use crate::services::{ApiClient, StorageService};
use crate::state::AuthState;

#[derive(Clone)]
pub struct CheckerViewModel {
    api: ApiClient,
    storage: StorageService,
    auth: AuthState,
}

impl CheckerViewModel {
    pub fn new(api: ApiClient, storage: StorageService, auth: AuthState) -> Self {
        Self { api, storage, auth }
    }

    /// Validar, "autenticar" y guardar la identidad
    pub async fn login(&self, form: &CheckerLoginForm) -> Result<CheckerIdentity, SubmitError> {
        let identity = form.validate()?;
        let identity = self.api.checker_login(&identity).await?;
        self.auth.login_checker(identity.clone());
        Ok(identity)
    }

    pub fn logout(&self) {
        self.auth.logout_checker();
    }

    /// Enviar piezas recibidas; si el backend acepta se registra en recientes
    pub async fn submit_pieces(&self, form: &UpdateCargoForm) -> Result<PiecesSubmission, SubmitError> {
        let update = form.validate()?;
        let identity = self.auth.checker();

        let request = UpdatePiecesRequest {
            mawb: update.mawb.clone(),
            pcs_received: update.pcs_received,
            checker_id: identity.as_ref().map(|i| i.checker_id.clone()).unwrap_or_default(),
            team_name: identity.as_ref().map(|i| i.team_name.clone()).unwrap_or_default(),
        };

        if let Err(e) = self.api.update_received_pieces(&request).await {
            log::error!("❌ [CHECKER] Error actualizando MAWB {}: {}", update.mawb, e);
            return Err(e.into());
        }

        Ok(self.record_submission(&update, Utc::now()))
    }

    /// Añadir el envío aceptado al principio de la lista de recientes
    pub fn record_submission(&self, update: &ValidCargoUpdate, timestamp: DateTime<Utc>) -> PiecesSubmission {
        let identity = self.auth.checker();
        let submission = PiecesSubmission::new(&update.mawb, update.pcs_received, identity.as_ref(), timestamp);

        let mut recent = self.storage.load_recent_pieces();
        recent.push(submission.clone());
        if let Err(e) = self.storage.save_recent_pieces(&recent) {
            log::error!("❌ [CHECKER] Error guardando recientes: {}", e);
        }
        log::info!("✅ [CHECKER] {} piezas registradas para {}", submission.pcs_received, submission.mawb);
        submission
    }

    pub fn recent(&self) -> RecentList<PiecesSubmission> {
        self.storage.load_recent_pieces()
    }

    pub fn stats(&self) -> ActivityStats {
        ActivityStats::from_submissions(self.recent().as_slice(), &Local::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;
    use std::rc::Rc;

    fn viewmodel() -> CheckerViewModel {
        let storage = StorageService::with_backend(Rc::new(MemoryStorage::new()));
        let auth = AuthState::new(storage.clone());
        auth.login_checker(CheckerIdentity::new("C-104", "Ramp A"));
        CheckerViewModel::new(ApiClient::new(), storage, auth)
    }

    #[test]
    fn accepted_submission_becomes_head_of_recent_list() {
        let vm = viewmodel();
        let form = UpdateCargoForm {
            mawb: "176-12345678".into(),
            pcs_received: "50".into(),
        };
        let update = form.validate().unwrap();
        let now = Utc::now();

        vm.record_submission(&update, now);

        let recent = vm.recent();
        assert_eq!(recent.len(), 1);
        let head = recent.latest().unwrap();
        assert_eq!(head.mawb, "176-12345678");
        assert_eq!(head.pcs_received, 50);
        assert_eq!(head.timestamp, now);
        assert_eq!(head.checker_id.as_deref(), Some("C-104"));
    }

    #[test]
    fn each_submission_appends_exactly_one_and_list_stays_bounded() {
        let vm = viewmodel();
        let capacity = RecentList::<PiecesSubmission>::capacity();

        for i in 0..capacity + 3 {
            let before = vm.recent().len();
            let update = ValidCargoUpdate {
                mawb: format!("176-0000{:04}", i),
                pcs_received: 1 + i as u32,
            };
            vm.record_submission(&update, Utc::now());
            let after = vm.recent().len();
            assert_eq!(after, (before + 1).min(capacity));
        }

        let recent = vm.recent();
        assert_eq!(recent.len(), capacity);
        // El más nuevo primero, los más antiguos expulsados
        assert_eq!(recent.latest().unwrap().mawb, format!("176-0000{:04}", capacity + 2));
        assert!(recent.iter().all(|s| s.mawb != "176-00000000"));
    }

    #[test]
    fn stats_count_today_and_total() {
        let vm = viewmodel();
        let update = ValidCargoUpdate { mawb: "176-12345678".into(), pcs_received: 50 };
        vm.record_submission(&update, Utc::now());
        vm.record_submission(&update, Utc::now() - chrono::Duration::days(3));

        let stats = vm.stats();
        assert_eq!(stats.total_updated, 2);
        assert_eq!(stats.updated_today, 1);
    }

    #[test]
    fn logout_forgets_identity() {
        let vm = viewmodel();
        vm.logout();
        assert!(!vm.auth.is_checker_authenticated());
    }
}
