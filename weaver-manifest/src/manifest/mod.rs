//! Manifest types and parsing for weaver.toml files.

mod file;
mod parse;
mod script;
mod settings;
mod validate;

pub use file::WeaverToml;
pub use parse::parse_manifest;
pub use script::{ScriptConfig, ScriptKind, ValueEntry};
use serde::Deserialize;
pub use settings::SettingsConfig;
pub use validate::ParseContext;

/// Root manifest for weaver.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Settings shared by every script
    #[serde(default)]
    pub settings: SettingsConfig,

    /// Scripts in declaration order
    #[serde(default)]
    pub scripts: Vec<ScriptConfig>,
}

impl Manifest {
    /// Find a script by name.
    pub fn script(&self, name: &str) -> Option<&ScriptConfig> {
        self.scripts.iter().find(|s| s.name == name)
    }

    /// Namespace of `script`: its own, or the default one.
    pub fn namespace_of<'a>(&'a self, script: &'a ScriptConfig) -> Option<&'a str> {
        script
            .namespace
            .as_deref()
            .or(self.settings.namespace.as_deref())
    }
}
