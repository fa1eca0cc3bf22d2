//! Generate operation - write the scripts that need a rebuild.

use std::path::Path;

use eyre::Result;
use log::debug;
use weaver_core::{File, WriteResult};
use weaver_manifest::WeaverToml;

use super::pass::run_pass;
use crate::reports::{GenerateReport, GenerationResult, PreviewFile, WrittenFile};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Reflection facts to use instead of the manifest's snapshot.
    pub snapshot: Option<&'a Path>,
    /// Render every script, even those that are up to date.
    pub force: bool,
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the generate operation.
///
/// A script is rendered when the pass asks for a rebuild, when its output
/// file is missing or when forced. Scripts with naming conflicts are never
/// written.
pub fn generate(file: &WeaverToml, opts: GenerateOptions<'_>) -> Result<GenerateReport> {
    let mut report = GenerateReport::default();
    let mut previews = Vec::new();
    let mut written = Vec::new();

    for pass in run_pass(file, opts.snapshot)? {
        report.warnings.extend(pass.warnings);

        let content = match pass.rendered {
            Ok(content) => content,
            Err(err) => {
                report.errors.push(err.to_string());
                continue;
            }
        };

        let output = File::new(&pass.output, content);
        if !opts.force && !pass.should_rebuild && output.exists() {
            debug!(script = pass.name.as_str(); "Script is up to date");
            report.up_to_date.push(pass.name);
            continue;
        }

        if opts.dry_run {
            previews.push(PreviewFile {
                path: output.path().display().to_string(),
                content: output.content().to_string(),
            });
        } else {
            let result = output.write()?;
            debug!(script = pass.name.as_str(), result:?; "Wrote script");
            written.push(WrittenFile {
                path: output.path().to_path_buf(),
                changed: result == WriteResult::Written,
            });
        }
    }

    report.result = if opts.dry_run {
        GenerationResult::Preview(previews)
    } else {
        GenerationResult::Written(written)
    };
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::ops::pass::tests::{MANIFEST, compile, project};

    fn options(force: bool, dry_run: bool) -> GenerateOptions<'static> {
        GenerateOptions {
            snapshot: None,
            force,
            dry_run,
        }
    }

    fn written(report: &GenerateReport) -> &[WrittenFile] {
        match &report.result {
            GenerationResult::Written(files) => files,
            GenerationResult::Preview(_) => panic!("expected written files"),
        }
    }

    #[test]
    fn test_generate_writes_scripts() {
        let (dir, file) = project(MANIFEST);

        let report = generate(&file, options(false, false)).unwrap();
        assert_eq!(written(&report).len(), 2);
        assert!(written(&report).iter().all(|f| f.changed));

        let layers = fs::read_to_string(dir.path().join("Assets/Weaver/Layers.cs")).unwrap();
        assert!(layers.contains("public const int Water = 4;"));
    }

    #[test]
    fn test_up_to_date_scripts_are_skipped() {
        let (_dir, file) = project(MANIFEST);
        generate(&file, options(false, false)).unwrap();
        compile(&file);

        let report = generate(&file, options(false, false)).unwrap();
        assert!(written(&report).is_empty());
        assert_eq!(report.up_to_date, vec!["Layers", "Tags"]);

        let report = generate(&file, options(true, false)).unwrap();
        assert_eq!(written(&report).len(), 2);
        assert!(written(&report).iter().all(|f| !f.changed));
    }

    #[test]
    fn test_missing_output_is_written() {
        let (dir, file) = project(MANIFEST);
        compile(&file);

        let report = generate(&file, options(false, false)).unwrap();
        assert_eq!(written(&report).len(), 2);
        assert!(dir.path().join("Assets/Weaver/Tags.cs").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let (dir, file) = project(MANIFEST);

        let report = generate(&file, options(false, true)).unwrap();
        match &report.result {
            GenerationResult::Preview(files) => {
                assert_eq!(files.len(), 2);
                assert!(files[1].content.contains("public static class Tags"));
            }
            GenerationResult::Written(_) => panic!("expected a preview"),
        }
        assert!(!dir.path().join("Assets").exists());
    }
}
