use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "trellis.config.json";

/// Trellis demo configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Tag of the container element the app is rendered into
    #[serde(default = "default_container")]
    pub container: String,

    /// Pretty print HTML output
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Default log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Heading of the todo list
    #[serde(default = "default_title")]
    pub title: String,

    /// Items present before the first render
    #[serde(default)]
    pub items: Vec<String>,

    /// Actions applied in order after the first render
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One scripted action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    /// Merge a partial state into the app
    SetState(serde_json::Value),

    /// Fire an event at the element whose `id` attribute matches `target`
    Dispatch {
        target: String,
        event: String,
        #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
        detail: serde_json::Value,
    },
}

fn default_container() -> String {
    "body".to_string()
}

fn default_pretty() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_title() -> String {
    "Todos".to_string()
}

impl Config {
    /// Load config from `explicit`, or from the default file in `cwd` when
    /// present, or fall back to defaults
    pub fn load(cwd: &str, explicit: Option<&Path>) -> anyhow::Result<Self> {
        // An explicit path must exist, otherwise look in cwd
        let config_path = match explicit {
            Some(path) if !path.exists() => {
                return Err(anyhow!("Config file does not exist: {}", path.display()));
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME),
        };

        // Read and parse the config file
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid config in {}", config_path.display()))?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            container: default_container(),
            pretty: default_pretty(),
            log_level: default_log_level(),
            title: default_title(),
            items: vec!["Write the reconciler".to_string(), "Ship it".to_string()],
            steps: vec![
                Step::Dispatch {
                    target: "draft".to_string(),
                    event: "input".to_string(),
                    detail: serde_json::Value::from("Celebrate"),
                },
                Step::Dispatch {
                    target: "add".to_string(),
                    event: "click".to_string(),
                    detail: serde_json::Value::Null,
                },
                Step::SetState(serde_json::json!({ "done": { "0": true } })),
            ],
        }
    }
}
