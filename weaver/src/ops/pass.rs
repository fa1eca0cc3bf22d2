//! One generation pass over every script of a manifest.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use log::{debug, info};
use weaver_codegen::{
    Diagnostic, GenerateError, GenerationSettings, Pipeline,
    definitions::{ConstantsContent, ConstantsScript},
};
use weaver_manifest::{Manifest, ScriptConfig, ScriptKind, SettingsConfig, WeaverToml};
use weaver_reflect::{ReflectedAssembly, SnapshotCache};

/// Outcome of the pass for one script.
#[derive(Debug)]
pub struct ScriptPass {
    pub name: String,
    /// Output path, resolved against the manifest directory.
    pub output: PathBuf,
    pub should_rebuild: bool,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    /// Rendered source, refused when naming conflicts were found.
    pub rendered: std::result::Result<String, GenerateError>,
}

/// Generator settings with the manifest's overrides applied.
pub fn settings(config: &SettingsConfig) -> GenerationSettings {
    let mut settings = GenerationSettings::default();
    if let Some(retain) = config.retain_obsolete {
        settings.retain_obsolete = retain;
    }
    if let Some(editor_only) = config.obsolete_members_editor_only {
        settings.obsolete_members_editor_only = editor_only;
    }
    if let Some(symbol) = &config.editor_symbol {
        settings.editor_symbol = symbol.clone();
    }
    if let Some(message) = &config.obsolete_message {
        settings.obsolete_message = message.clone();
    }
    if let Some(indent) = config.indent {
        settings.indent = indent.into();
    }
    if let Some(header) = &config.header {
        settings.header = header.clone();
    }
    settings
}

/// The constants script a manifest entry describes.
pub fn constants_script(manifest: &Manifest, config: &ScriptConfig) -> ConstantsScript {
    let indexed = || {
        config
            .values
            .iter()
            .filter_map(|v| v.index().map(|index| (v.name().to_string(), index)))
            .collect()
    };
    let names = || config.values.iter().map(|v| v.name().to_string()).collect();

    let content = match config.kind {
        ScriptKind::Layers => ConstantsContent::Layers(indexed()),
        ScriptKind::NavAreas => ConstantsContent::NavAreas(indexed()),
        ScriptKind::Tags => ConstantsContent::Tags(names()),
        ScriptKind::Scenes => ConstantsContent::Scenes(names()),
        ScriptKind::Shaders => ConstantsContent::Shaders(names()),
    };

    let mut script = ConstantsScript::new(&config.name, content);
    if let Some(namespace) = manifest.namespace_of(config) {
        script = script.namespace(namespace);
    }
    if let Some(comment) = &config.comment {
        script = script.comment(comment.as_str());
    }
    script
}

/// Snapshot cache over the reflection facts of the previous build.
///
/// An explicit `snapshot` path must exist. The manifest's own path may be
/// missing, as before the first build, and then every type is uncompiled.
pub fn snapshot_cache(file: &WeaverToml, snapshot: Option<&Path>) -> Result<SnapshotCache> {
    let path = match snapshot {
        Some(path) => path.to_path_buf(),
        None => match &file.manifest().settings.snapshot {
            Some(path) => {
                let path = file.resolve(path);
                if !path.exists() {
                    debug!(path:? = path; "No reflection snapshot yet");
                    return Ok(SnapshotCache::empty());
                }
                path
            }
            None => return Ok(SnapshotCache::empty()),
        },
    };

    let assembly = ReflectedAssembly::from_file(&path)?;
    debug!(path:? = path, types = assembly.types.len(); "Loaded reflection snapshot");
    Ok(SnapshotCache::new(assembly))
}

/// Run naming and reconciliation for every script of the manifest.
pub fn run_pass(file: &WeaverToml, snapshot: Option<&Path>) -> Result<Vec<ScriptPass>> {
    let manifest = file.manifest();
    let settings = settings(&manifest.settings);
    let mut cache = snapshot_cache(file, snapshot)?;
    let pipeline = Pipeline::new();

    let mut passes = Vec::with_capacity(manifest.scripts.len());
    for config in &manifest.scripts {
        let script = constants_script(manifest, config).build();
        let ctx = pipeline
            .run(script, settings.clone(), &mut cache)
            .wrap_err_with(|| format!("Generation of '{}' failed", config.name))?;

        let pass = ScriptPass {
            name: config.name.clone(),
            output: file.resolve(&config.output),
            should_rebuild: ctx.should_rebuild,
            reasons: ctx.rebuild_reasons().map(describe).collect(),
            warnings: ctx.warnings().map(describe).collect(),
            errors: ctx.errors().map(describe).collect(),
            rendered: ctx.render(),
        };
        passes.push(pass);
    }

    info!(
        scripts = passes.len(),
        rebuilt = passes.iter().filter(|p| p.should_rebuild).count();
        "Generation pass finished"
    );
    Ok(passes)
}

fn describe(diagnostic: &Diagnostic) -> String {
    match &diagnostic.location {
        Some(location) => format!("{}\n  --> {}", diagnostic.message, location),
        None => diagnostic.message.clone(),
    }
}
