use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use playground_compiler_css::{scope_css, ScopeSelector};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ScopeArgs {
    /// Stylesheet to scope
    pub file: PathBuf,

    /// Scope selector (overrides config)
    #[arg(short, long)]
    pub selector: Option<ScopeSelector>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn scope(args: ScopeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let selector = args.selector.unwrap_or(config.scope_selector);

    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let scoped = scope_css(&source, &selector);

    match args.out {
        Some(out) => {
            fs::write(&out, scoped).with_context(|| format!("Failed to write {}", out.display()))?
        }
        None => print!("{}", scoped),
    }

    Ok(())
}
