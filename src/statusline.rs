//! The `statusLine` entry registered in the host application's settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Settings key managed by this tool. Nothing else in the document is touched.
pub const STATUS_LINE_KEY: &str = "statusLine";

/// Binary name published by the status-line package.
pub const DEFAULT_COMMAND: &str = "cc-minimal-statusline";

/// Where the registered `command` string comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSource {
    /// A bare command name, resolved on `PATH` by the host when it runs.
    Named(String),
    /// An absolute path to a script shipped alongside this tool.
    Script(PathBuf),
}

impl Default for CommandSource {
    fn default() -> Self {
        CommandSource::Named(DEFAULT_COMMAND.to_string())
    }
}

impl CommandSource {
    /// Build a `Script` source, anchoring relative paths at `cwd`.
    pub fn script(path: &Path, cwd: &Path) -> Self {
        if path.is_absolute() {
            CommandSource::Script(path.to_path_buf())
        } else {
            CommandSource::Script(cwd.join(path))
        }
    }

    /// The string written into the `command` field.
    pub fn command_string(&self) -> String {
        match self {
            CommandSource::Named(name) => name.clone(),
            CommandSource::Script(path) => path.display().to_string(),
        }
    }
}

/// Fixed-shape status-line registration.
///
/// Serializes as `{ "type": "command", "command": ..., "padding": 0 }`.
/// Claude Code requires the `type` discriminator; without it the whole
/// settings file is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLineEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub command: String,
    pub padding: u32,
}

impl StatusLineEntry {
    pub fn new(source: &CommandSource) -> Self {
        Self {
            kind: "command".to_string(),
            command: source.command_string(),
            padding: 0,
        }
    }

    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// The `{ "statusLine": { ... } }` fragment shown in manual instructions.
    pub fn fragment(&self) -> serde_json::Result<serde_json::Value> {
        let value = self.to_value()?;
        Ok(serde_json::json!({ "statusLine": value }))
    }

    /// Pretty-printed fragment, two-space indented.
    pub fn fragment_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.fragment()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_has_type_command() {
        let entry = StatusLineEntry::new(&CommandSource::default());
        let val = entry.to_value().unwrap();
        assert_eq!(val["type"].as_str(), Some("command"));
        assert_eq!(val["command"].as_str(), Some("cc-minimal-statusline"));
        assert_eq!(val["padding"].as_u64(), Some(0));
    }

    #[test]
    fn test_entry_field_order() {
        let entry = StatusLineEntry::new(&CommandSource::default());
        let json = serde_json::to_string(&entry.to_value().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"{"type":"command","command":"cc-minimal-statusline","padding":0}"#
        );
    }

    #[test]
    fn test_entry_round_trips_through_settings_value() {
        let value = serde_json::json!({"type": "command", "command": "sl", "padding": 0});
        let entry: StatusLineEntry = serde_json::from_value(value).unwrap();
        assert_eq!(entry, StatusLineEntry::new(&CommandSource::Named("sl".into())));
    }

    #[test]
    fn test_script_relative_is_anchored() {
        let source = CommandSource::script(Path::new("bin/sl.sh"), Path::new("/opt/pkg"));
        assert_eq!(source, CommandSource::Script(PathBuf::from("/opt/pkg/bin/sl.sh")));
        assert_eq!(source.command_string(), "/opt/pkg/bin/sl.sh");
    }

    #[test]
    fn test_script_absolute_is_kept() {
        let source = CommandSource::script(Path::new("/usr/lib/sl.sh"), Path::new("/tmp"));
        assert_eq!(source.command_string(), "/usr/lib/sl.sh");
    }

    #[test]
    fn test_fragment_wraps_entry() {
        let entry = StatusLineEntry::new(&CommandSource::default());
        let frag = entry.fragment().unwrap();
        assert_eq!(frag["statusLine"]["type"].as_str(), Some("command"));
        assert!(entry.fragment_pretty().unwrap().contains("\n  \"statusLine\": {"));
    }
}
