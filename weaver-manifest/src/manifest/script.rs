//! The `[[scripts]]` entries.

use std::{collections::HashMap, fmt, path::PathBuf};

use serde::Deserialize;

use super::validate::{ParseContext, find_index_spans};
use crate::{Error, Result};

/// Kind of constants a script declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptKind {
    Layers,
    Tags,
    Scenes,
    Shaders,
    NavAreas,
}

impl ScriptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Layers => "layers",
            Self::Tags => "tags",
            Self::Scenes => "scenes",
            Self::Shaders => "shaders",
            Self::NavAreas => "nav_areas",
        }
    }

    /// Whether values are `{ name, index }` tables rather than strings.
    pub fn is_indexed(&self) -> bool {
        matches!(self, Self::Layers | Self::NavAreas)
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value of a script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ValueEntry {
    Indexed { name: String, index: i32 },
    Name(String),
}

impl ValueEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Indexed { name, .. } | Self::Name(name) => name,
        }
    }

    pub fn index(&self) -> Option<i32> {
        match self {
            Self::Indexed { index, .. } => Some(*index),
            Self::Name(_) => None,
        }
    }
}

/// A generated constants script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptConfig {
    /// Class name, also the name used in diagnostics.
    pub name: String,
    pub kind: ScriptKind,
    /// Output file, relative to the manifest.
    pub output: PathBuf,
    /// Overrides the default namespace.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Doc comment of the class.
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub values: Vec<ValueEntry>,
}

impl ScriptConfig {
    /// Validate this script. `ctx` already carries the script name.
    pub(crate) fn validate(&self, ctx: &ParseContext<'_>) -> Result<()> {
        if let Some(namespace) = &self.namespace {
            ctx.validate_namespace(namespace)?;
        }

        let output = self.output.to_string_lossy();
        if self.output.extension().is_none_or(|ext| ext != "cs") {
            return Err(ctx.source_context().validation_error(
                format!("output of '{}' must be a .cs file", self.name),
                ctx.find_span("output", &output),
            ));
        }

        let span = ctx.find_span("name", &self.name);
        for value in &self.values {
            if self.kind.is_indexed() != value.index().is_some() {
                let expected = if self.kind.is_indexed() {
                    "{ name, index } tables"
                } else {
                    "strings"
                };
                return Err(ctx.source_context().validation_error(
                    format!(
                        "values of {} script '{}' must be {}, found '{}'",
                        self.kind,
                        self.name,
                        expected,
                        value.name()
                    ),
                    span,
                ));
            }
        }

        self.validate_unique_indices(ctx)
    }

    fn validate_unique_indices(&self, ctx: &ParseContext<'_>) -> Result<()> {
        let mut seen: HashMap<i32, &str> = HashMap::new();
        for value in &self.values {
            let Some(index) = value.index() else {
                continue;
            };
            if let Some(first) = seen.insert(index, value.name()) {
                let spans = find_index_spans(ctx.src(), index);
                return Err(Box::new(Error::Duplicate {
                    src: ctx.source_context().named_source(),
                    first_span: spans.first().copied(),
                    second_span: spans.get(1).copied(),
                    what: format!("index in '{}'", self.name),
                    value: format!("{} ('{}' and '{}')", index, first, value.name()),
                }));
            }
        }
        Ok(())
    }
}
