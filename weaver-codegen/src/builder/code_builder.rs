//! Code builder utility for generating properly indented C#.

use super::Indent;

/// Line-oriented buffer that tracks the current indentation level.
///
/// # Example
///
/// ```
/// use weaver_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::default();
/// builder.push_block("public static class Tags", |b| {
///     b.push_line("public const string Player = \"Player\";");
/// });
///
/// assert_eq!(
///     builder.build(),
///     "public static class Tags\n{\n    public const string Player = \"Player\";\n}\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Add a line of code with current indentation.
    ///
    /// Empty lines are written without trailing whitespace.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        if !s.is_empty() {
            self.write_indent();
            self.buffer.push_str(s);
        }
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a braced block: the header, `{` on its own line, the indented
    /// content written by `f`, then `}`.
    pub fn push_block<F>(&mut self, header: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.push_line(header).push_line("{").push_indent();
        f(self);
        self.push_dedent().push_line("}")
    }

    /// Add a `//` comment line.
    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str("// ");
        self.buffer.push_str(text);
        self.buffer.push('\n');
        self
    }

    /// Add a preprocessor directive such as `#if` or `#region`.
    pub fn push_directive(&mut self, directive: &str, argument: Option<&str>) -> &mut Self {
        self.write_indent();
        self.buffer.push('#');
        self.buffer.push_str(directive);
        if let Some(argument) = argument {
            self.buffer.push(' ');
            self.buffer.push_str(argument);
        }
        self.buffer.push('\n');
        self
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.indent.push_to(&mut self.buffer);
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::new(Indent::CSHARP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let mut builder = CodeBuilder::default();
        builder.push_line("int x = 1;");
        assert_eq!(builder.build(), "int x = 1;\n");
    }

    #[test]
    fn test_indentation() {
        let mut builder = CodeBuilder::default();
        builder
            .push_line("void Main()")
            .push_line("{")
            .push_indent()
            .push_line("Run();")
            .push_dedent()
            .push_line("}");

        assert_eq!(builder.build(), "void Main()\n{\n    Run();\n}\n");
    }

    #[test]
    fn test_empty_line_has_no_trailing_whitespace() {
        let mut builder = CodeBuilder::default();
        builder.push_indent().push_line("").push_line("x");
        assert_eq!(builder.build(), "\n    x\n");
    }

    #[test]
    fn test_nested_blocks_with_tabs() {
        let mut builder = CodeBuilder::new(Indent::Tab);
        builder.push_block("namespace Weaver", |b| {
            b.push_block("public static class Tags", |b| {
                b.push_line("public const string Player = \"Player\";");
            });
        });

        assert_eq!(
            builder.build(),
            "namespace Weaver\n{\n\tpublic static class Tags\n\t{\n\t\tpublic const string Player = \"Player\";\n\t}\n}\n"
        );
    }

    #[test]
    fn test_directives() {
        let mut builder = CodeBuilder::default();
        builder
            .push_indent()
            .push_directive("if", Some("UNITY_EDITOR"))
            .push_directive("endif", None);
        assert_eq!(builder.build(), "    #if UNITY_EDITOR\n    #endif\n");
    }

    #[test]
    fn test_comment() {
        let mut builder = CodeBuilder::default();
        builder.push_comment("Build Index: 0");
        assert_eq!(builder.as_str(), "// Build Index: 0\n");
        assert!(!builder.is_empty());
    }

    #[test]
    fn test_dedent_saturates() {
        let mut builder = CodeBuilder::default();
        builder.push_dedent().push_line("x");
        assert_eq!(builder.current_indent(), 0);
        assert_eq!(builder.build(), "x\n");
    }
}
