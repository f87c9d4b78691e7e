use shared::endpoints;

use crate::services::logging::{LogLevel, Logger};

const API_BASE_META: &str = "expense-tracker:api-base";
const DASHBOARD_META: &str = "expense-tracker:dashboard";
const LOG_LEVEL_META: &str = "expense-tracker:log-level";

/// Page-level settings, read once at startup from `<meta>` tags
#[derive(Debug, Clone, PartialEq)]
pub struct FrontendConfig {
    /// Prefix for every API route; empty means same origin
    pub api_base_url: String,
    /// Where the browser goes after a successful submission
    pub dashboard_path: String,
    pub log_level: LogLevel,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            dashboard_path: endpoints::DASHBOARD.to_string(),
            log_level: LogLevel::Info,
        }
    }
}

impl FrontendConfig {
    pub fn from_document() -> Self {
        let document = web_sys::window().and_then(|window| window.document());
        Self::from_lookup(|name| {
            let document = document.as_ref()?;
            document
                .query_selector(&format!("meta[name=\"{}\"]", name))
                .ok()
                .flatten()
                .and_then(|meta| meta.get_attribute("content"))
        })
    }

    /// Build a config from a `meta name -> content` lookup, keeping
    /// defaults for anything missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base) = lookup(API_BASE_META) {
            config.api_base_url = base.trim().to_string();
        }
        if let Some(path) = lookup(DASHBOARD_META).filter(|p| !p.trim().is_empty()) {
            config.dashboard_path = path.trim().to_string();
        }
        if let Some(level) = lookup(LOG_LEVEL_META) {
            match level.parse() {
                Ok(level) => config.log_level = level,
                Err(e) => Logger::warn_with_component("config", &e),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_defaults_without_meta_tags() {
        let config = FrontendConfig::from_lookup(|_| None);
        assert_eq!(config, FrontendConfig::default());
        assert_eq!(config.dashboard_path, "/expense/dash");
        assert_eq!(config.api_base_url, "");
    }

    #[wasm_bindgen_test]
    fn test_meta_overrides() {
        let meta: HashMap<&str, &str> = HashMap::from([
            (API_BASE_META, "http://localhost:8000 "),
            (DASHBOARD_META, "/home"),
            (LOG_LEVEL_META, "debug"),
        ]);
        let config = FrontendConfig::from_lookup(|name| meta.get(name).map(|v| v.to_string()));
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.dashboard_path, "/home");
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[wasm_bindgen_test]
    fn test_invalid_log_level_keeps_default() {
        let config = FrontendConfig::from_lookup(|name| {
            (name == LOG_LEVEL_META).then(|| "loud".to_string())
        });
        assert_eq!(config.log_level, LogLevel::Info);
    }
}
