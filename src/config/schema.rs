use std::path::PathBuf;

use serde::Deserialize;

use crate::setup::Policy;

/// Optional user defaults read from `config.toml`. Every field may be omitted.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InstallerConfig {
    pub policy: Option<Policy>,
    pub command: Option<String>,
    pub script: Option<PathBuf>,
}

/// A validation message from config checking.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigMessage {
    Warning(String),
}

impl InstallerConfig {
    pub fn validate(&self) -> Vec<ConfigMessage> {
        let mut messages = Vec::new();

        if self.command.is_some() && self.script.is_some() {
            messages.push(ConfigMessage::Warning(
                "both `command` and `script` are set; using `script`".to_string(),
            ));
        }
        if let Some(command) = &self.command {
            if command.trim().is_empty() {
                messages.push(ConfigMessage::Warning(
                    "`command` is empty; using the default command".to_string(),
                ));
            }
        }

        messages
    }
}
