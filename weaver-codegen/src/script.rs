//! The element arena for one generated script.

use weaver_core::{NameScope, TypeName, to_identifier};

use crate::element::{
    Element, ElementBuilder, ElementId, ElementKind, RegionId, SymbolId, TypeDef,
};

/// A generated `.cs` file under construction.
///
/// Owns every element of the file in an arena; elements refer to each other
/// by [`ElementId`]. Region names and compilation symbols are interned so
/// consecutive members can be grouped by comparing ids.
///
/// # Example
///
/// ```
/// use weaver_codegen::{FieldBuilder, NamespaceBuilder, ScriptBuilder, TypeBuilder};
///
/// let mut script = ScriptBuilder::new("Tags");
/// let ns = script.add_root(NamespaceBuilder::new("Weaver"));
/// let tags = script.add(ns, TypeBuilder::static_class("Tags"));
/// script.add(tags, FieldBuilder::constant("Player", "Player"));
///
/// assert_eq!(script.type_name(tags).full_name(), "Weaver.Tags");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptBuilder {
    name: String,
    usings: Vec<String>,
    elements: Vec<Element>,
    roots: Vec<ElementId>,
    regions: Vec<String>,
    symbols: Vec<String>,
}

impl ScriptBuilder {
    /// Create an empty script. `name` identifies it in diagnostics.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a `using` directive. Duplicates are ignored.
    pub fn add_using(&mut self, namespace: impl Into<String>) -> &mut Self {
        let namespace = namespace.into();
        if !self.usings.contains(&namespace) {
            self.usings.push(namespace);
        }
        self
    }

    pub fn usings(&self) -> &[String] {
        &self.usings
    }

    /// The names visible at file scope.
    pub fn scope(&self) -> NameScope {
        NameScope::new(self.usings.iter().cloned())
    }

    /// Add a top level element.
    pub fn add_root(&mut self, builder: impl ElementBuilder) -> ElementId {
        let id = self.insert(None, builder);
        self.roots.push(id);
        id
    }

    /// Add an element as the last child of `parent`.
    pub fn add(&mut self, parent: ElementId, builder: impl ElementBuilder) -> ElementId {
        debug_assert!(
            matches!(
                self.element(parent).kind,
                ElementKind::Namespace | ElementKind::Type(_)
            ),
            "only namespaces and types can contain elements"
        );
        let id = self.insert(Some(parent), builder);
        self.elements[parent.0].children.push(id);
        id
    }

    fn insert(&mut self, parent: Option<ElementId>, builder: impl ElementBuilder) -> ElementId {
        let (declaration, kind) = builder.into_parts();
        let region = declaration
            .region
            .map(|name| RegionId(intern(&mut self.regions, name)));
        let symbol = declaration
            .symbol
            .map(|name| SymbolId(intern(&mut self.symbols, name)));
        let name = match kind {
            ElementKind::Namespace => namespace_identifier(&declaration.name_source, false),
            _ => to_identifier(&declaration.name_source, false),
        };

        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            name_source: declaration.name_source,
            name,
            is_fallback_name: false,
            parent,
            children: Vec::new(),
            comment: declaration.comment,
            modifiers: declaration.modifiers,
            attributes: declaration.attributes,
            region,
            symbol,
            obsolete: declaration.obsolete,
            kind,
            existing: None,
        });
        id
    }

    /// Get an element.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to another script.
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub(crate) fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    /// Top level elements in declaration order.
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        &self.elements[id.0].children
    }

    /// All elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(index, element)| (ElementId(index), element))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn region_name(&self, id: RegionId) -> &str {
        &self.regions[id.0]
    }

    pub fn symbol_name(&self, id: SymbolId) -> &str {
        &self.symbols[id.0]
    }

    /// Payload of a type element.
    pub fn type_def(&self, id: ElementId) -> Option<&TypeDef> {
        match &self.elements[id.0].kind {
            ElementKind::Type(def) => Some(def),
            _ => None,
        }
    }

    pub(crate) fn type_def_mut(&mut self, id: ElementId) -> Option<&mut TypeDef> {
        match self.elements[id.0].kind_mut() {
            ElementKind::Type(def) => Some(def),
            _ => None,
        }
    }

    /// The nearest enclosing type of an element.
    pub fn declaring_type(&self, id: ElementId) -> Option<ElementId> {
        let mut current = self.elements[id.0].parent;
        while let Some(parent) = current {
            if self.elements[parent.0].is_type() {
                return Some(parent);
            }
            current = self.elements[parent.0].parent;
        }
        None
    }

    /// Find a child by its name source, e.g. to reuse a group type.
    pub fn find_child(&self, parent: ElementId, name_source: &str) -> Option<ElementId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|child| self.elements[child.0].name_source == name_source)
    }

    /// The dotted namespace an element is declared in.
    pub fn namespace_of(&self, id: ElementId) -> Option<String> {
        let mut segments = Vec::new();
        let mut current = self.elements[id.0].parent;
        while let Some(parent) = current {
            let element = &self.elements[parent.0];
            if matches!(element.kind, ElementKind::Namespace) {
                segments.push(element.name.as_str());
            }
            current = element.parent;
        }
        if segments.is_empty() {
            return None;
        }
        segments.reverse();
        Some(segments.join("."))
    }

    /// The identity of a type element, as reflection would report it.
    pub fn type_name(&self, id: ElementId) -> TypeName {
        let mut declaring = Vec::new();
        let mut current = self.elements[id.0].parent;
        while let Some(parent) = current {
            let element = &self.elements[parent.0];
            if element.is_type() {
                declaring.push(element.name.clone());
            }
            current = element.parent;
        }
        declaring.reverse();

        let namespace = self.namespace_of(id);
        let mut name = TypeName::new(namespace.as_deref(), self.elements[id.0].name.clone());
        name.declaring_types = declaring;
        name
    }

    /// Dotted path of an element used as a diagnostic location.
    pub fn qualified_name(&self, id: ElementId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(element_id) = current {
            let element = &self.elements[element_id.0];
            if element.is_constructor() {
                segments.push(".ctor");
            } else {
                segments.push(element.name.as_str());
            }
            current = element.parent;
        }
        segments.reverse();
        segments.join(".")
    }
}

fn intern(names: &mut Vec<String>, name: String) -> usize {
    match names.iter().position(|existing| *existing == name) {
        Some(index) => index,
        None => {
            names.push(name);
            names.len() - 1
        }
    }
}

/// Sanitize each segment of a dotted namespace name.
pub(crate) fn namespace_identifier(source: &str, replace_with_underscores: bool) -> String {
    source
        .split('.')
        .map(|segment| to_identifier(segment, replace_with_underscores))
        .collect::<Vec<_>>()
        .join(".")
}
