use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use weaver_manifest::WeaverToml;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to weaver.toml (defaults to ./weaver.toml)
    #[arg(short, long, default_value = "weaver.toml")]
    pub config: PathBuf,

    /// Reflection facts of the previous build (overrides settings.snapshot)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Render every script, even those that are up to date
    #[arg(long)]
    pub force: bool,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let file = WeaverToml::open(&self.config).unwrap_or_exit();
        let report = ops::generate(
            &file,
            GenerateOptions {
                snapshot: self.snapshot.as_deref(),
                force: self.force,
                dry_run: self.dry_run,
            },
        )?;

        report.render(&mut TerminalOutput::new());

        if report.has_errors() {
            std::process::exit(1);
        }
        Ok(())
    }
}
