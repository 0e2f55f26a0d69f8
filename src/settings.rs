//! Read-merge-write of the host application's `settings.json`.
//!
//! The settings document is an untyped JSON object owned by another program.
//! Only the `statusLine` key is ever changed; every other key is carried
//! through untouched (key order included).

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Result, SetupError};
use crate::statusline::{StatusLineEntry, STATUS_LINE_KEY};

/// `<home>/.claude/settings.json`.
pub fn default_settings_path(home: &Path) -> PathBuf {
    home.join(".claude").join("settings.json")
}

/// Sibling path with `.backup` appended to the file name.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".backup");
    PathBuf::from(name)
}

/// What was found on disk at the settings path.
#[derive(Debug)]
pub enum Loaded {
    Missing,
    Document(Map<String, Value>),
    Malformed(serde_json::Error),
}

/// Read and parse the settings file without side effects.
///
/// Only "not found" is treated as absence; every other read error is fatal.
/// Content that is not a JSON object (including invalid UTF-8) is `Malformed`.
pub fn load(path: &Path) -> Result<Loaded> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Loaded::Missing),
        Err(source) => {
            return Err(SetupError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(map)) => Ok(Loaded::Document(map)),
        Ok(other) => Ok(Loaded::Malformed(<serde_json::Error as serde::de::Error>::custom(format!(
            "expected a JSON object at the top level, found {}",
            json_kind(&other)
        )))),
        Err(e) => Ok(Loaded::Malformed(e)),
    }
}

/// Load the document for modification.
///
/// A malformed file is copied to [`backup_path`] (replacing any earlier
/// backup) and an empty document is returned along with the backup path.
pub fn load_or_reset(path: &Path) -> Result<(Map<String, Value>, Option<PathBuf>)> {
    match load(path)? {
        Loaded::Missing => {
            tracing::debug!(path = %path.display(), "no existing settings file");
            Ok((Map::new(), None))
        }
        Loaded::Document(map) => {
            tracing::debug!(path = %path.display(), keys = map.len(), "parsed settings file");
            Ok((map, None))
        }
        Loaded::Malformed(err) => {
            let backup = backup_path(path);
            tracing::debug!(
                path = %path.display(),
                backup = %backup.display(),
                error = %err,
                "settings file is not valid JSON; backing up and starting fresh"
            );
            std::fs::copy(path, &backup).map_err(|source| SetupError::Backup {
                path: path.to_path_buf(),
                backup: backup.clone(),
                source,
            })?;
            Ok((Map::new(), Some(backup)))
        }
    }
}

/// Serialize with two-space indentation and a single trailing newline.
pub fn render(doc: &Map<String, Value>) -> Result<String> {
    let mut out = serde_json::to_string_pretty(doc)?;
    out.push('\n');
    Ok(out)
}

/// Replace the file in one step: write a temp file beside it, then rename.
///
/// A symlinked settings file is followed so the link itself survives, and
/// the existing file's permissions carry over to the replacement. A
/// read-only target is refused rather than swapped out from under its owner.
pub fn write_document(path: &Path, doc: &Map<String, Value>) -> Result<()> {
    let contents = render(doc)?;
    let write_err = |source: std::io::Error| SetupError::Write {
        path: path.to_path_buf(),
        source,
    };

    let target = resolve_target(path).map_err(write_err)?;
    let permissions = match std::fs::metadata(&target) {
        Ok(meta) => Some(meta.permissions()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(write_err(e)),
    };
    if permissions.as_ref().is_some_and(|p| p.readonly()) {
        return Err(SetupError::ReadOnly {
            path: path.to_path_buf(),
        });
    }

    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions).map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(&target).map_err(|e| write_err(e.error))?;

    tracing::debug!(
        path = %path.display(),
        target = %target.display(),
        bytes = contents.len(),
        "wrote settings file"
    );
    Ok(())
}

/// The file a write to `path` should land in: symlinks are resolved.
fn resolve_target(path: &Path) -> std::io::Result<PathBuf> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => std::fs::canonicalize(path),
        _ => Ok(path.to_path_buf()),
    }
}

/// Create `dir` and all missing parents. Existing directories are fine.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|source| SetupError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Result of a merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    /// Where a malformed original was copied, if it was.
    pub backup: Option<PathBuf>,
    /// The `statusLine` value that was overwritten, if any.
    pub previous: Option<Value>,
}

/// Upsert `statusLine` into the settings file at `path`.
///
/// The parent directory is created first. Existing keys keep their values and positions; a previous `statusLine`
/// is replaced wholesale, never deep-merged.
pub fn merge_status_line(path: &Path, entry: &StatusLineEntry) -> Result<MergeReport> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    let (mut doc, backup) = load_or_reset(path)?;
    let previous = doc.insert(STATUS_LINE_KEY.to_string(), entry.to_value()?);
    write_document(path, &doc)?;

    Ok(MergeReport { backup, previous })
}

/// Result of removing the `statusLine` key.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveOutcome {
    /// Key removed; the file was rewritten.
    Removed(Value),
    /// Key present but registers a different command; nothing written.
    Foreign(Value),
    /// No file, or no `statusLine` key in it.
    NotPresent,
}

/// Remove `statusLine` from the settings file.
///
/// When `expected_command` is set, the key is only removed if its `command`
/// field matches. A malformed file is an error: nothing gets replaced here.
pub fn remove_status_line(path: &Path, expected_command: Option<&str>) -> Result<RemoveOutcome> {
    let mut doc = match load(path)? {
        Loaded::Missing => return Ok(RemoveOutcome::NotPresent),
        Loaded::Malformed(source) => {
            return Err(SetupError::Malformed {
                path: path.to_path_buf(),
                source,
            })
        }
        Loaded::Document(doc) => doc,
    };

    let Some(current) = doc.get(STATUS_LINE_KEY) else {
        return Ok(RemoveOutcome::NotPresent);
    };

    if let Some(expected) = expected_command {
        let command = current.get("command").and_then(Value::as_str);
        if command != Some(expected) {
            return Ok(RemoveOutcome::Foreign(current.clone()));
        }
    }

    let removed = doc.shift_remove(STATUS_LINE_KEY).unwrap_or(Value::Null);
    write_document(path, &doc)?;
    Ok(RemoveOutcome::Removed(removed))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
