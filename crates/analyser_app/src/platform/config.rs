use std::fs;
use std::path::Path;
use std::time::Duration;

use analyser_core::SUCCESS_ALERT_TTL;
use analyser_engine::SubmitSettings;
use analyser_logging::{analyser_info, analyser_warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "analyser.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyserConfig {
    pub base_url: String,
    pub analyze_path: String,
    pub resume_field: String,
    pub job_description_field: String,
    pub success_alert_ms: u64,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        let submit = SubmitSettings::default();
        Self {
            base_url: submit.base_url,
            analyze_path: submit.analyze_path,
            resume_field: submit.resume_field,
            job_description_field: submit.job_description_field,
            success_alert_ms: SUCCESS_ALERT_TTL.as_millis() as u64,
        }
    }
}

impl AnalyserConfig {
    pub fn submit_settings(&self) -> SubmitSettings {
        SubmitSettings {
            base_url: self.base_url.clone(),
            analyze_path: self.analyze_path.clone(),
            resume_field: self.resume_field.clone(),
            job_description_field: self.job_description_field.clone(),
        }
    }

    pub fn success_alert_ttl(&self) -> Duration {
        Duration::from_millis(self.success_alert_ms)
    }
}

pub fn read_config(path: &Path) -> Result<AnalyserConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    ron::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))
}

/// Reads `path`, falling back to defaults. A missing file is not worth a warning.
pub fn load_config(path: &Path) -> AnalyserConfig {
    match read_config(path) {
        Ok(config) => {
            analyser_info!("Loaded config from {:?}", path);
            config
        }
        Err(ConfigError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            AnalyserConfig::default()
        }
        Err(err) => {
            analyser_warn!("Failed to load config from {:?}: {}", path, err);
            AnalyserConfig::default()
        }
    }
}
