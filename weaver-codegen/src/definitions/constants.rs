//! Static classes of project constants: layers, tags, scenes, shaders and
//! navigation areas.

use std::collections::HashMap;

use crate::{
    element::{Declare, ElementId, FieldBuilder, NamespaceBuilder, TypeBuilder},
    script::ScriptBuilder,
};

/// The values a constants class declares.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantsContent {
    /// Layer names with their index, as `const int`.
    Layers(Vec<(String, i32)>),
    /// Tag names, as `const string`.
    Tags(Vec<String>),
    /// Scene asset paths in build order, grouped per directory below `Assets/`.
    Scenes(Vec<String>),
    /// Shader names, grouped per `/` separated segment.
    Shaders(Vec<String>),
    /// Navigation area names with their index, as `const int`.
    NavAreas(Vec<(String, i32)>),
}

impl ConstantsContent {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Layers(_) => "layers",
            Self::Tags(_) => "tags",
            Self::Scenes(_) => "scenes",
            Self::Shaders(_) => "shaders",
            Self::NavAreas(_) => "nav_areas",
        }
    }
}

/// Definition of one constants script.
///
/// # Example
///
/// ```
/// use weaver_codegen::definitions::{ConstantsContent, ConstantsScript};
///
/// let script = ConstantsScript::new("Tags", ConstantsContent::Tags(vec!["Player".into()]))
///     .namespace("Weaver")
///     .build();
///
/// assert_eq!(script.name(), "Tags");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantsScript {
    name: String,
    namespace: Option<String>,
    comment: Option<String>,
    content: ConstantsContent,
}

impl ConstantsScript {
    pub fn new(name: impl Into<String>, content: ConstantsContent) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            comment: None,
            content,
        }
    }

    /// Declare the class inside `namespace`.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Doc comment of the class.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &ConstantsContent {
        &self.content
    }

    /// Build the script: one `public static class` named after the script.
    pub fn build(&self) -> ScriptBuilder {
        let mut script = ScriptBuilder::new(&self.name);

        let mut class = TypeBuilder::static_class(&self.name);
        if let Some(comment) = &self.comment {
            class = class.comment(comment.as_str());
        }
        let class = match &self.namespace {
            Some(namespace) => {
                let namespace = script.add_root(NamespaceBuilder::new(namespace));
                script.add(namespace, class)
            }
            None => script.add_root(class),
        };

        match &self.content {
            ConstantsContent::Layers(layers) => {
                for (name, index) in layers {
                    script.add(
                        class,
                        FieldBuilder::constant(name, *index).comment(format!("Layer {}.", index)),
                    );
                }
            }
            ConstantsContent::Tags(tags) => {
                for tag in tags {
                    script.add(class, FieldBuilder::constant(tag, tag.as_str()));
                }
            }
            ConstantsContent::Scenes(paths) => add_scenes(&mut script, class, paths),
            ConstantsContent::Shaders(names) => add_shaders(&mut script, class, names),
            ConstantsContent::NavAreas(areas) => {
                for (name, index) in areas {
                    script.add(
                        class,
                        FieldBuilder::constant(name, *index)
                            .comment(format!("Navigation area {}.", index)),
                    );
                }
            }
        }

        script
    }
}

fn add_scenes(script: &mut ScriptBuilder, class: ElementId, paths: &[String]) {
    let mut groups = Groups::default();
    for (index, path) in paths.iter().enumerate() {
        let relative = path.strip_prefix("Assets/").unwrap_or(path);
        let (directories, file) = match relative.rsplit_once('/') {
            Some((directories, file)) => (Some(directories), file),
            None => (None, relative),
        };
        let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);

        let parent = groups.resolve(
            script,
            class,
            directories.into_iter().flat_map(|d| d.split('/')),
        );
        script.add(
            parent,
            FieldBuilder::constant(stem, path.as_str())
                .comment(format!("{}\n\nBuild Index: {}", path, index)),
        );
    }
}

fn add_shaders(script: &mut ScriptBuilder, class: ElementId, names: &[String]) {
    let mut groups = Groups::default();
    for name in names {
        let (path, last) = match name.rsplit_once('/') {
            Some((path, last)) => (Some(path), last),
            None => (None, name.as_str()),
        };
        let parent = groups.resolve(script, class, path.into_iter().flat_map(|p| p.split('/')));
        script.add(parent, FieldBuilder::constant(last, name.as_str()));
    }
}

/// Nested group classes, created on first use and shared by later entries.
#[derive(Default)]
struct Groups {
    types: HashMap<(ElementId, String), ElementId>,
}

impl Groups {
    fn resolve<'s>(
        &mut self,
        script: &mut ScriptBuilder,
        root: ElementId,
        segments: impl IntoIterator<Item = &'s str>,
    ) -> ElementId {
        let mut parent = root;
        for segment in segments.into_iter().filter(|s| !s.is_empty()) {
            let current = parent;
            parent = *self
                .types
                .entry((current, segment.to_string()))
                .or_insert_with(|| script.add(current, TypeBuilder::static_class(segment)));
        }
        parent
    }
}
