use crate::config::CONFIG;

/// URL base del backend (según ENVIRONMENT, ver config.rs)
pub fn backend_url() -> &'static str {
    CONFIG.backend_url()
}

// Claves de localStorage (compartidas con la versión web anterior)
pub const CHECKER_USER_KEY: &str = "user";
pub const TROLLEY_USER_KEY: &str = "trolleyUser";
pub const RECENT_SUBMISSIONS_KEY: &str = "recentSubmissions";
pub const RECENT_BT_SUBMISSIONS_KEY: &str = "recentBtSubmissions";

/// Prefijo de los MAWB sintéticos cuando el backend no responde
pub const MAWB_FALLBACK_PREFIX: &str = "MAWB";
pub const FALLBACK_CANDIDATE_COUNT: usize = 10;

/// Id del contenedor raíz en index.html
pub const APP_ROOT_ID: &str = "app";
pub const TOAST_REGION_ID: &str = "toast-region";
