//! Manifest parsing from files and strings.

use std::{
    collections::{HashMap, HashSet},
    path::Path,
    str::FromStr,
};

use super::{
    Manifest,
    validate::{ParseContext, find_value_spans},
};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "weaver.toml")
    }
}

impl Manifest {
    /// Parse a weaver.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a weaver.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    if let Some(namespace) = &manifest.settings.namespace {
        ctx.validate_namespace(namespace)?;
    }
    if let Some(symbol) = &manifest.settings.editor_symbol {
        if !weaver_core::is_identifier(symbol) {
            return Err(ctx.source_context().validation_error(
                format!("editor symbol '{}' is not a valid compilation symbol", symbol),
                ctx.find_span("editor_symbol", symbol),
            ));
        }
    }

    let mut names: HashSet<&str> = HashSet::new();
    let mut outputs: HashMap<&Path, &str> = HashMap::new();
    for script in &manifest.scripts {
        ctx.validate_name(&script.name, "script")?;
        if !names.insert(&script.name) {
            return Err(duplicate(&ctx, "name", "script name", &script.name));
        }
        if outputs.insert(script.output.as_path(), &script.name).is_some() {
            let output = script.output.to_string_lossy();
            return Err(duplicate(&ctx, "output", "output", &output));
        }

        script.validate(&ctx.push(&script.name))?;
    }
    Ok(())
}

fn duplicate(ctx: &ParseContext<'_>, key: &str, what: &str, value: &str) -> Box<Error> {
    let spans = find_value_spans(ctx.src(), key, value);
    Box::new(Error::Duplicate {
        src: ctx.source_context().named_source(),
        first_span: spans.first().copied(),
        second_span: spans.get(1).copied(),
        what: what.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ScriptKind, ValueEntry};

    const MANIFEST: &str = r#"
[settings]
namespace = "Weaver"
indent = 0
snapshot = "Library/Weaver/snapshot.json"

[[scripts]]
name = "Layers"
kind = "layers"
output = "Assets/Weaver/Layers.cs"
values = [{ name = "Default", index = 0 }, { name = "Water", index = 4 }]

[[scripts]]
name = "Tags"
kind = "tags"
namespace = "Weaver.Tags"
output = "Assets/Weaver/Tags.cs"
values = ["Player", "Enemy"]
"#;

    #[test]
    fn test_parse() {
        let manifest: Manifest = MANIFEST.parse().unwrap();

        assert_eq!(manifest.settings.indent, Some(0));
        assert_eq!(manifest.settings.retain_obsolete, None);
        assert_eq!(manifest.scripts.len(), 2);

        let layers = manifest.script("Layers").unwrap();
        assert_eq!(layers.kind, ScriptKind::Layers);
        assert_eq!(
            layers.values[1],
            ValueEntry::Indexed {
                name: "Water".into(),
                index: 4
            }
        );
        assert_eq!(manifest.namespace_of(layers), Some("Weaver"));

        let tags = manifest.script("Tags").unwrap();
        assert_eq!(manifest.namespace_of(tags), Some("Weaver.Tags"));
    }

    #[test]
    fn test_empty_manifest() {
        let manifest: Manifest = "".parse().unwrap();
        assert!(manifest.scripts.is_empty());
        assert_eq!(manifest.settings, Default::default());
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = "[[scripts]]\nname = ".parse::<Manifest>().unwrap_err();
        match *err {
            Error::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind() {
        let src = "[[scripts]]\nname = \"Sorting\"\nkind = \"sorting_layers\"\noutput = \"S.cs\"";
        assert!(matches!(
            *src.parse::<Manifest>().unwrap_err(),
            Error::Parse { .. }
        ));
    }

    #[test]
    fn test_keyword_script_name() {
        let src = "[[scripts]]\nname = \"class\"\nkind = \"tags\"\noutput = \"Class.cs\"";
        let err = src.parse::<Manifest>().unwrap_err();
        match *err {
            Error::ReservedKeyword { span, .. } => {
                let span = span.expect("span of the name");
                assert_eq!(&src[span.offset()..span.offset() + span.len()], "class");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_script_name() {
        let src = r#"
[[scripts]]
name = "Tags"
kind = "tags"
output = "A.cs"

[[scripts]]
name = "Tags"
kind = "tags"
output = "B.cs"
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert_eq!(err.to_string(), "duplicate script name 'Tags'");
        match *err {
            Error::Duplicate {
                first_span,
                second_span,
                ..
            } => {
                assert!(first_span.unwrap().offset() < second_span.unwrap().offset());
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_output() {
        let src = r#"
[[scripts]]
name = "Tags"
kind = "tags"
output = "Constants.cs"

[[scripts]]
name = "Scenes"
kind = "scenes"
output = "Constants.cs"
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert_eq!(err.to_string(), "duplicate output 'Constants.cs'");
    }

    #[test]
    fn test_duplicate_index() {
        let src = r#"
[[scripts]]
name = "Layers"
kind = "layers"
output = "Layers.cs"
values = [{ name = "Water", index = 4 }, { name = "Lava", index = 4 }]
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "duplicate index in 'Layers' '4 ('Water' and 'Lava')'"
        );
    }

    #[test]
    fn test_value_shape_must_match_kind() {
        let src = r#"
[[scripts]]
name = "Tags"
kind = "tags"
output = "Tags.cs"
values = [{ name = "Player", index = 0 }]
"#;
        let err = src.parse::<Manifest>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "values of tags script 'Tags' must be strings, found 'Player'"
        );
    }

    #[test]
    fn test_output_must_be_csharp() {
        let src = "[[scripts]]\nname = \"Tags\"\nkind = \"tags\"\noutput = \"Tags.txt\"";
        let err = src.parse::<Manifest>().unwrap_err();
        assert_eq!(err.to_string(), "output of 'Tags' must be a .cs file");
    }

    #[test]
    fn test_invalid_namespace() {
        let src = "[settings]\nnamespace = \"Game.2D\"";
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_invalid_editor_symbol() {
        let src = "[settings]\neditor_symbol = \"UNITY EDITOR\"";
        let err = src.parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }
}
