// ============================================================================
// CONFIG - Configuración en tiempo de compilación (build.rs + .env)
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    pub environment: String,
    pub enable_logging: bool,
    pub network_timeout_seconds: u32,
    pub suggestion_config: SuggestionConfig,
    pub ui_config: UIConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: "http://localhost:8000/api".to_string(),
            backend_url_production: "http://54.159.194.138:8000/api".to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            network_timeout_seconds: 15,
            suggestion_config: SuggestionConfig::default(),
            ui_config: UIConfig::default(),
        }
    }
}

/// Parámetros del autocompletado (debounce + longitud mínima)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    pub debounce_ms: u32,
    pub min_chars: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_chars: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    pub recent_activity_limit: usize,
    pub login_delay_ms: u32,
    pub toast_duration_ms: u32,
    pub toast_error_duration_ms: u32,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            recent_activity_limit: 5,
            login_delay_ms: 500,
            toast_duration_ms: 4000,
            toast_error_duration_ms: 5000,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .map(|s| s.to_string())
                .unwrap_or(defaults.backend_url_development),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .map(|s| s.to_string())
                .unwrap_or(defaults.backend_url_production),
            environment: option_env!("ENVIRONMENT")
                .map(|s| s.to_string())
                .unwrap_or(defaults.environment),
            enable_logging: parse_or(option_env!("ENABLE_LOGGING"), defaults.enable_logging),
            network_timeout_seconds: parse_or(
                option_env!("NETWORK_TIMEOUT_SECONDS"),
                defaults.network_timeout_seconds,
            ),
            suggestion_config: SuggestionConfig {
                debounce_ms: parse_or(
                    option_env!("SUGGESTION_DEBOUNCE_MS"),
                    defaults.suggestion_config.debounce_ms,
                ),
                min_chars: parse_or(
                    option_env!("SUGGESTION_MIN_CHARS"),
                    defaults.suggestion_config.min_chars,
                ),
            },
            ui_config: UIConfig {
                recent_activity_limit: parse_or(
                    option_env!("RECENT_ACTIVITY_LIMIT"),
                    defaults.ui_config.recent_activity_limit,
                ),
                login_delay_ms: parse_or(
                    option_env!("LOGIN_DELAY_MS"),
                    defaults.ui_config.login_delay_ms,
                ),
                toast_duration_ms: parse_or(
                    option_env!("TOAST_DURATION_MS"),
                    defaults.ui_config.toast_duration_ms,
                ),
                toast_error_duration_ms: parse_or(
                    option_env!("TOAST_ERROR_DURATION_MS"),
                    defaults.ui_config.toast_error_duration_ms,
                ),
            },
        }
    }

    /// Obtiene la URL del backend según el entorno actual
    pub fn backend_url(&self) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            _ => &self.backend_url_development,
        }
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    /// Timeout de red en milisegundos (para gloo_timers)
    pub fn network_timeout_ms(&self) -> u32 {
        self.network_timeout_seconds.saturating_mul(1000)
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(default)
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_behaviour() {
        let config = AppConfig::default();
        assert_eq!(config.suggestion_config.min_chars, 2);
        assert_eq!(config.suggestion_config.debounce_ms, 300);
        assert_eq!(config.ui_config.recent_activity_limit, 5);
        assert_eq!(config.network_timeout_ms(), 15_000);
    }

    #[test]
    fn backend_url_follows_environment() {
        let mut config = AppConfig::default();
        assert_eq!(config.backend_url(), "http://localhost:8000/api");

        config.environment = "production".to_string();
        assert_eq!(config.backend_url(), "http://54.159.194.138:8000/api");
    }

    #[test]
    fn parse_or_falls_back_on_garbage() {
        assert_eq!(parse_or(Some("42"), 7u32), 42);
        assert_eq!(parse_or(Some(" 42 "), 7u32), 42);
        assert_eq!(parse_or(Some("abc"), 7u32), 7);
        assert_eq!(parse_or(None, true), true);
        assert_eq!(parse_or(Some("false"), true), false);
    }
}
