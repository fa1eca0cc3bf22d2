//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Carries the path through the manifest (e.g. `["Layers"]` while a script
/// is validated) so errors can say where they happened.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "weaver.toml");
/// ctx.validate_name("Layers", "script")?;
///
/// let nested = ctx.push("Layers");
/// nested.validate_name("Weaver", "namespace")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "namespace in 'Layers'" or just "script" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Span of the first `key = "value"` assignment in the source.
    pub fn find_span(&self, key: &str, value: &str) -> Option<SourceSpan> {
        find_value_spans(self.src(), key, value).into_iter().next()
    }

    /// Validate that `name` can be declared in C#.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        let span = self.find_span("name", name);

        if weaver_core::is_keyword(name) {
            return Err(self
                .source
                .reserved_keyword_error(name, self.context_for(kind), span));
        }

        if !weaver_core::is_identifier(name) {
            return Err(self
                .source
                .invalid_identifier_error(name, self.context_for(kind), span));
        }

        Ok(())
    }

    /// Validate a dotted namespace, segment by segment.
    pub fn validate_namespace(&self, namespace: &str) -> Result<()> {
        let span = self.find_span("namespace", namespace);
        for segment in namespace.split('.') {
            if weaver_core::is_keyword(segment) {
                return Err(self.source.reserved_keyword_error(
                    segment,
                    self.context_for("namespace"),
                    span,
                ));
            }
            if !weaver_core::is_identifier(segment) {
                return Err(self.source.invalid_identifier_error(
                    namespace,
                    self.context_for("namespace"),
                    span,
                ));
            }
        }
        Ok(())
    }
}

/// Spans of every `key = "value"` (or single-quoted) assignment, in source
/// order. The span covers the value without its quotes.
pub(crate) fn find_value_spans(src: &str, key: &str, value: &str) -> Vec<SourceSpan> {
    let mut spans = Vec::new();
    for quote in ['"', '\''] {
        for spacing in [" = ", "="] {
            let pattern = format!("{}{}{}{}{}", key, spacing, quote, value, quote);
            let skip = key.len() + spacing.len() + 1;
            spans.extend(
                src.match_indices(&pattern)
                    .filter(|(pos, _)| is_key_start(src, *pos))
                    .map(|(pos, _)| SourceSpan::from((pos + skip, value.len()))),
            );
        }
    }
    spans.sort_by_key(|span| span.offset());
    spans
}

/// Spans of every `index = value` assignment, in source order.
pub(crate) fn find_index_spans(src: &str, index: i32) -> Vec<SourceSpan> {
    let text = index.to_string();
    let mut spans = Vec::new();
    for spacing in [" = ", "="] {
        let pattern = format!("index{}{}", spacing, text);
        let skip = "index".len() + spacing.len();
        spans.extend(
            src.match_indices(&pattern)
                .filter(|(pos, _)| is_key_start(src, *pos))
                .filter(|(pos, matched)| {
                    !src[pos + matched.len()..]
                        .starts_with(|c: char| c.is_ascii_digit())
                })
                .map(|(pos, _)| SourceSpan::from((pos + skip, text.len()))),
        );
    }
    spans.sort_by_key(|span| span.offset());
    spans
}

/// Whether a key match at `pos` is a whole key, not the tail of a longer one.
fn is_key_start(src: &str, pos: usize) -> bool {
    src[..pos]
        .chars()
        .next_back()
        .is_none_or(|c| !(c.is_alphanumeric() || c == '_'))
}
