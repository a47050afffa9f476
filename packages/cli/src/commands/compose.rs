use super::read_source;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use playground_compiler_html::{compose_to_html, ComposeInput, CompileOptions};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ComposeArgs {
    /// Markup buffer
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Stylesheet buffer
    #[arg(long)]
    pub css: Option<PathBuf>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Skip scoping and wrapping (the downloadable page)
    #[arg(long)]
    pub raw: bool,
}

pub fn compose(args: ComposeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    let markup = read_source(args.html.as_deref())?;
    let style = read_source(args.css.as_deref())?;

    let scope = (!args.raw).then(|| config.scope_selector.clone());
    let options = CompileOptions {
        title: config.title.clone(),
        scope,
        ..CompileOptions::default()
    };
    let html = compose_to_html(&ComposeInput::new(&markup, &style), &options);

    match args.out {
        Some(out) => {
            fs::write(&out, html).with_context(|| format!("Failed to write {}", out.display()))?;
            eprintln!("{} {}", "✓".green(), out.display());
        }
        None => print!("{}", html),
    }

    Ok(())
}
