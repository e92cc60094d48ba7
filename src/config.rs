use std::collections::HashMap;
use std::time::Duration;

use crate::errors::AppError;

/// Process configuration, read once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub llm_base_url: String,
    pub llm_api_key: Option<String>,
    pub llm_model: String,
    pub llm_timeout: Duration,
    pub use_static_layout_variants: bool,
    pub placeholder_image_url: String,
    pub placeholder_icon_url: String,
    pub seed_demo: bool,
}

impl AppConfig {
    /// Load from the process environment (after `dotenvy` has filled it from `.env`).
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(&std::env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, AppError> {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or(default).to_string();

        let timeout_secs = match get("LLM_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .map_err(|_| AppError::Config(format!("LLM_TIMEOUT_SECS must be a whole number, got '{v}'")))?,
            None => 120,
        };

        Ok(AppConfig {
            database_url: or("DATABASE_URL", "sqlite://data/app.db?mode=rwc"),
            bind_addr: or("BIND_ADDR", "127.0.0.1:8000"),
            llm_base_url: or("LLM_BASE_URL", "https://api.openai.com/v1"),
            llm_api_key: get("LLM_API_KEY").or_else(|| get("OPENAI_API_KEY")).map(str::to_string),
            llm_model: or("LLM_MODEL", "gpt-4.1-mini"),
            llm_timeout: Duration::from_secs(timeout_secs),
            use_static_layout_variants: parse_bool(get("USE_STATIC_LAYOUT_VARIANTS"), "USE_STATIC_LAYOUT_VARIANTS")?,
            placeholder_image_url: or("PLACEHOLDER_IMAGE_URL", "/static/images/placeholder.jpg"),
            placeholder_icon_url: or("PLACEHOLDER_ICON_URL", "/static/icons/placeholder.svg"),
            seed_demo: parse_bool(get("SEED_DEMO"), "SEED_DEMO")?,
        })
    }
}

/// Per-request generation switches shared with the handlers as app data.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerationSettings {
    pub use_static_layout_variants: bool,
}

impl From<&AppConfig> for GenerationSettings {
    fn from(cfg: &AppConfig) -> Self {
        GenerationSettings {
            use_static_layout_variants: cfg.use_static_layout_variants,
        }
    }
}

fn parse_bool(value: Option<&str>, key: &str) -> Result<bool, AppError> {
    match value.map(|v| v.to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(AppError::Config(format!("{key} must be a boolean, got '{v}'"))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::from_vars(&HashMap::new()).unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:8000");
        assert_eq!(cfg.llm_timeout, Duration::from_secs(120));
        assert!(cfg.llm_api_key.is_none());
        assert!(!cfg.use_static_layout_variants);
        assert!(!cfg.seed_demo);
    }

    #[test]
    fn api_key_falls_back_to_openai_var() {
        let cfg = AppConfig::from_vars(&vars(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(cfg.llm_api_key.as_deref(), Some("sk-test"));

        let cfg = AppConfig::from_vars(&vars(&[("OPENAI_API_KEY", "sk-a"), ("LLM_API_KEY", "sk-b")])).unwrap();
        assert_eq!(cfg.llm_api_key.as_deref(), Some("sk-b"));
    }

    #[test]
    fn static_variant_flag_parses() {
        let cfg = AppConfig::from_vars(&vars(&[("USE_STATIC_LAYOUT_VARIANTS", "TRUE")])).unwrap();
        assert!(cfg.use_static_layout_variants);
    }

    #[test]
    fn bad_values_are_config_errors() {
        assert!(matches!(
            AppConfig::from_vars(&vars(&[("LLM_TIMEOUT_SECS", "soon")])),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            AppConfig::from_vars(&vars(&[("SEED_DEMO", "maybe")])),
            Err(AppError::Config(_))
        ));
    }
}
