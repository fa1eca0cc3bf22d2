//! The `[settings]` table.

use std::path::PathBuf;

use serde::Deserialize;

/// Settings shared by every script of the manifest.
///
/// Every field is optional; unset values keep the generator defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsConfig {
    /// Default namespace for scripts that do not set their own.
    pub namespace: Option<String>,
    pub retain_obsolete: Option<bool>,
    pub obsolete_members_editor_only: Option<bool>,
    pub editor_symbol: Option<String>,
    pub obsolete_message: Option<String>,
    /// Indent width in spaces; 0 means tabs.
    pub indent: Option<u8>,
    /// Comment lines written at the top of every generated file.
    pub header: Option<Vec<String>>,
    /// Reflection facts of the previous build, relative to the manifest.
    pub snapshot: Option<PathBuf>,
}
