use playground_compiler_css::ScopeSelector;
use playground_editor::{EngineOptions, RemoteOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "playground.config.json";

/// Playground configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Container the preview styles are confined to
    #[serde(default)]
    pub scope_selector: ScopeSelector,

    /// Quiet period before a burst of edits is rendered
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Title of composed and exported documents
    #[serde(default = "default_title")]
    pub title: String,

    /// Code-sharing service settings
    #[serde(default)]
    pub remote: RemoteOptions,

    /// Base URL of share links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_base_url: Option<String>,
}

fn default_debounce_ms() -> u64 {
    250
}

fn default_title() -> String {
    playground_compiler_html::DEFAULT_TITLE.to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("{}: {}", config_path.display(), e))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn to_engine_options(&self) -> EngineOptions {
        EngineOptions {
            scope_selector: self.scope_selector.clone(),
            quiet_interval: Duration::from_millis(self.debounce_ms),
            title: self.title.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scope_selector: ScopeSelector::default(),
            debounce_ms: default_debounce_ms(),
            title: default_title(),
            remote: RemoteOptions::default(),
            share_base_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r##"{
            "scopeSelector": "#repl-target",
            "debounceMs": 400,
            "title": "Mavo App",
            "remote": { "cssExternal": "https://get.mavo.io/mavo.css", "jsExternal": "https://get.mavo.io/mavo.js" },
            "shareBaseUrl": "https://play.example.com/"
        }"##;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.scope_selector.as_str(), "#repl-target");
        assert_eq!(config.debounce_ms, 400);
        assert_eq!(config.title, "Mavo App");
        assert_eq!(config.remote.action, "https://codepen.io/pen/define");
        assert_eq!(config.remote.css_external.as_deref(), Some("https://get.mavo.io/mavo.css"));
        assert_eq!(config.share_base_url.as_deref(), Some("https://play.example.com/"));
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scope_selector.as_str(), ".preview");
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.title, "Playground");
        assert!(config.share_base_url.is_none());
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        let options = config.to_engine_options();

        assert_eq!(options.scope_selector.as_str(), ".preview");
        assert_eq!(options.quiet_interval, Duration::from_millis(250));
        assert_eq!(options.title, "Playground");
    }

    #[test]
    fn test_rejects_compound_scope_selector() {
        let json = r#"{ "scopeSelector": ".a .b" }"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().display().to_string();

        assert_eq!(Config::load(&cwd).unwrap().debounce_ms, 250);

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "debounceMs": 10 }"#).unwrap();
        assert_eq!(Config::load(&cwd).unwrap().debounce_ms, 10);
    }
}
