use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{GuideError, GuideResult};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub tour: TourConfig,
    /// Default tracing filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assistant: AssistantConfig::default(),
            snapshot: SnapshotConfig::default(),
            tour: TourConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// POST `{userMessage, uiMetadata}` to a proxy that talks to the model.
    #[default]
    Proxy,
    /// Call an OpenAI-compatible chat completions endpoint directly.
    Completion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub transport: TransportKind,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Only used by the completion transport.
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Falls back to env var `UIGUIDE_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::default(),
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            api_key: None,
        }
    }
}

impl AssistantConfig {
    pub fn resolved_api_key(&self) -> String {
        std::env::var("UIGUIDE_API_KEY")
            .ok()
            .or_else(|| self.api_key.clone())
            .unwrap_or_default()
    }
}

fn default_endpoint() -> String {
    "http://localhost:3000/assistant/message".into()
}

fn default_model() -> String {
    "gpt-3.5-turbo".into()
}

fn default_temperature() -> f64 {
    0.1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Button texts belonging to the assistant widget itself. Matched
    /// case-insensitively against trimmed button text.
    #[serde(default = "default_excluded_buttons")]
    pub excluded_buttons: Vec<String>,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            excluded_buttons: default_excluded_buttons(),
        }
    }
}

fn default_excluded_buttons() -> Vec<String> {
    vec!["Send".into(), "Show Visual Demo".into()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeferralPolicy {
    /// Resolve the first click now; everything after it once the page changes.
    #[default]
    NavigationAware,
    /// Resolve every action against the page present at tour start.
    Eager,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TourConfig {
    #[serde(default)]
    pub deferral: DeferralPolicy,
}

fn resolve_config_path() -> GuideResult<PathBuf> {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            let candidate = parent.join(CONFIG_FILE);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "config found next to executable");
                return Ok(candidate);
            }
        }
    }

    let cwd = std::env::current_dir()?;
    let candidate = cwd.join(CONFIG_FILE);
    if candidate.exists() {
        tracing::debug!(path = %candidate.display(), "config found in working directory");
        return Ok(candidate);
    }

    if let Some(dir) = dirs::config_dir() {
        let candidate = dir.join("uiguide").join(CONFIG_FILE);
        if candidate.exists() {
            tracing::debug!(path = %candidate.display(), "config found in user config dir");
            return Ok(candidate);
        }
    }

    Err(GuideError::Config(
        "config.toml not found next to executable, in working directory or user config dir".into(),
    ))
}

pub fn parse_config(content: &str) -> GuideResult<AppConfig> {
    Ok(toml::from_str(content)?)
}

pub fn load_config() -> GuideResult<AppConfig> {
    let path = resolve_config_path()?;
    let content = std::fs::read_to_string(&path)?;
    let config = parse_config(&content)?;
    tracing::info!(
        path = %path.display(),
        transport = ?config.assistant.transport,
        deferral = ?config.tour.deferral,
        "config loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.assistant.transport, TransportKind::Proxy);
        assert_eq!(cfg.tour.deferral, DeferralPolicy::NavigationAware);
        assert_eq!(cfg.snapshot.excluded_buttons, vec!["Send", "Show Visual Demo"]);
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn sections_override_defaults() {
        let cfg = parse_config(
            r#"
log_filter = "debug"

[assistant]
transport = "completion"
endpoint = "https://api.example.com/v1/chat/completions"
model = "gpt-4o-mini"

[snapshot]
excluded_buttons = ["Ask"]

[tour]
deferral = "eager"
"#,
        )
        .unwrap();
        assert_eq!(cfg.assistant.transport, TransportKind::Completion);
        assert_eq!(cfg.assistant.model, "gpt-4o-mini");
        assert_eq!(cfg.assistant.temperature, 0.1);
        assert_eq!(cfg.snapshot.excluded_buttons, vec!["Ask"]);
        assert_eq!(cfg.tour.deferral, DeferralPolicy::Eager);
        assert_eq!(cfg.log_filter, "debug");
    }

    #[test]
    fn unknown_transport_is_rejected() {
        let err = parse_config("[assistant]\ntransport = \"carrier-pigeon\"\n");
        assert!(matches!(err, Err(GuideError::TomlDe(_))));
    }
}
