use std::{collections::HashMap, fs};

use crate::{error::EndpointError, transport::CollectionEndpoint};

pub const SETTINGS_FILE: &str = "movies.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: Option<String>,
    pub base_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: None,
            base_path: "/".into(),
        }
    }
}

impl Settings {
    /// Applies a flat `key = "value"` table. Unknown keys are ignored and an
    /// unparsable file leaves the settings untouched.
    pub fn apply_file(&mut self, raw: &str) {
        let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) else {
            return;
        };
        if let Some(v) = file_cfg.get("api_url") {
            self.api_url = Some(v.clone());
        }
        if let Some(v) = file_cfg.get("base_path") {
            self.base_path = v.clone();
        }
    }

    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = var("API_URL") {
            self.api_url = Some(v);
        }
        if let Some(v) = var("APP__API_URL") {
            self.api_url = Some(v);
        }

        if let Some(v) = var("BASE_URL") {
            self.base_path = v;
        }
        if let Some(v) = var("APP__BASE_URL") {
            self.base_path = v;
        }
    }

    pub fn endpoint(&self) -> Result<CollectionEndpoint, EndpointError> {
        let raw = self.api_url.as_deref().ok_or(EndpointError::Missing)?;
        CollectionEndpoint::parse(raw)
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        settings.apply_file(&raw);
    }
    settings.apply_env(|key| std::env::var(key).ok());

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
