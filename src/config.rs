use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "NeuralCare";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default listen port. Override with `NEURAL_CARE_PORT`.
pub const DEFAULT_PORT: u16 = 5001;

/// Provider model chain: primary plus exactly two fallbacks, tried in order.
pub const DEFAULT_MODELS: &[&str] = &["gemini-1.5-flash", "gemini-pro", "gemini-pro"];

/// Default base URL of the generative-text provider.
pub const DEFAULT_PROVIDER_URL: &str = "https://generativelanguage.googleapis.com";

pub fn default_log_filter() -> &'static str {
    "info,neural_care=debug"
}

/// Get the application data directory
/// ~/NeuralCare/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

/// Database path: `NEURAL_CARE_DB` env var, or `medical_data.db` in the data dir.
pub fn database_path() -> PathBuf {
    match std::env::var("NEURAL_CARE_DB") {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => app_data_dir().join("medical_data.db"),
    }
}

/// Listen port: `NEURAL_CARE_PORT` env var, or [`DEFAULT_PORT`].
pub fn server_port() -> u16 {
    std::env::var("NEURAL_CARE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Generative-text provider configuration.
///
/// Constructed once in `main` and passed explicitly through `ApiContext` —
/// there is no global provider state.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API key sent with every provider request.
    pub api_key: String,
    /// Base URL of the provider HTTP API.
    pub base_url: String,
    /// Model identities tried in order; first success wins.
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// Read provider settings from `GEMINI_API_KEY` / `GEMINI_BASE_URL`.
    ///
    /// A missing key is not an error: every provider call will fail and the
    /// generation endpoints degrade to their fallback payloads.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            base_url: std::env::var("GEMINI_BASE_URL")
                .ok()
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string()),
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Fixed configuration, for tests and embedding.
    pub fn new(api_key: &str, base_url: &str, models: Vec<String>) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
            models,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("NeuralCare"));
    }

    #[test]
    fn model_chain_is_primary_plus_two_fallbacks() {
        assert_eq!(DEFAULT_MODELS.len(), 3);
        assert_eq!(DEFAULT_MODELS[0], "gemini-1.5-flash");
    }

    #[test]
    fn fixed_config_keeps_model_order() {
        let cfg = ProviderConfig::new("key", "http://localhost:9", vec!["a".into(), "b".into()]);
        assert_eq!(cfg.models, vec!["a", "b"]);
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
