//! Settings that shape a generation pass.

use serde::Deserialize;

use crate::builder::Indent;

/// Options shared by every script of a generation pass.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Keep removed members as obsolete stubs instead of deleting them.
    pub retain_obsolete: bool,
    /// Wrap the obsolete stubs in `#if <editor_symbol>`.
    pub obsolete_members_editor_only: bool,
    /// Compilation symbol only defined inside the editor.
    pub editor_symbol: String,
    /// Message used for `[Obsolete]` markers and the exceptions stubs throw.
    pub obsolete_message: String,
    pub indent: Indent,
    /// Comment lines written at the top of every file.
    pub header: Vec<String>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            retain_obsolete: true,
            obsolete_members_editor_only: true,
            editor_symbol: "UNITY_EDITOR".to_string(),
            obsolete_message: "This member is no longer generated. Remove any references to it."
                .to_string(),
            indent: Indent::default(),
            header: vec![
                "<auto-generated>".to_string(),
                "This code was generated by Weaver.".to_string(),
                "Changes to this file may be lost when the code is regenerated.".to_string(),
                "</auto-generated>".to_string(),
            ],
        }
    }
}
