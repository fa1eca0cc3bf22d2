//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from code generation.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub warnings: Vec<String>,
    /// Scripts refused because of naming conflicts.
    pub errors: Vec<String>,
    /// Scripts left alone because nothing changed.
    pub up_to_date: Vec<String>,
    pub result: GenerationResult,
}

impl GenerateReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(Vec<WrittenFile>),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

impl Default for GenerationResult {
    fn default() -> Self {
        Self::Written(Vec::new())
    }
}

/// A rendered script on disk.
#[derive(Debug)]
pub struct WrittenFile {
    pub path: PathBuf,
    /// False when the file already had this content.
    pub changed: bool,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }

        match &self.result {
            GenerationResult::Written(files) => self.render_written(out, files),
            GenerationResult::Preview(files) => self.render_preview(out, files),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, files: &[WrittenFile]) {
        let changed: Vec<&WrittenFile> = files.iter().filter(|f| f.changed).collect();
        if !changed.is_empty() {
            out.section(&format!("Generated ({})", changed.len()));
            for file in changed {
                out.added_item(&file.path.display().to_string());
            }
        }

        let unchanged = files.len() - files.iter().filter(|f| f.changed).count();
        let skipped = self.up_to_date.len() + unchanged;
        if skipped > 0 {
            out.key_value("Up to date", &skipped.to_string());
        }
    }

    fn render_preview(&self, out: &mut dyn Output, files: &[PreviewFile]) {
        for file in files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", files.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::tests::RecordingOutput;

    #[test]
    fn test_render_written() {
        let report = GenerateReport {
            up_to_date: vec!["Tags".into()],
            result: GenerationResult::Written(vec![
                WrittenFile {
                    path: PathBuf::from("Assets/Layers.cs"),
                    changed: true,
                },
                WrittenFile {
                    path: PathBuf::from("Assets/Scenes.cs"),
                    changed: false,
                },
            ]),
            ..Default::default()
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(
            out.lines,
            vec!["Generated (1):", "  + Assets/Layers.cs", "Up to date: 2"]
        );
    }

    #[test]
    fn test_render_preview() {
        let report = GenerateReport {
            result: GenerationResult::Preview(vec![PreviewFile {
                path: "Tags.cs".into(),
                content: "public static class Tags { }".into(),
            }]),
            ..Default::default()
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(out.lines[0], "── Tags.cs ──");
        assert_eq!(out.lines.last().unwrap(), "1 files would be generated");
    }
}
