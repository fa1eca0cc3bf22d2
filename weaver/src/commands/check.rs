use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use weaver_manifest::WeaverToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to weaver.toml (defaults to ./weaver.toml)
    #[arg(short, long, default_value = "weaver.toml")]
    pub config: PathBuf,

    /// Reflection facts of the previous build (overrides settings.snapshot)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let file = WeaverToml::open(&self.config).unwrap_or_exit();
        let report = ops::check(&file, self.snapshot.as_deref())?;

        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
