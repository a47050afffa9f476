use super::read_source;
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use playground_editor::export::{export as export_snapshot, DOWNLOAD_FILE_NAME};
use playground_editor::{ExportAction, ExportArtifact, Snapshot};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    /// Standalone HTML page
    Download,
    /// index.html plus style.css
    Archive,
    /// Payload for the configured code-sharing service
    Remote,
    /// Link carrying both buffers
    Share,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Export format
    #[arg(value_enum)]
    pub kind: ExportKind,

    /// Markup buffer
    #[arg(long)]
    pub html: Option<PathBuf>,

    /// Stylesheet buffer
    #[arg(long)]
    pub css: Option<PathBuf>,

    /// Output file (download) or directory (archive)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Share link base URL (overrides config)
    #[arg(long)]
    pub base_url: Option<String>,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    let snapshot = Snapshot {
        markup: read_source(args.html.as_deref())?,
        style: read_source(args.css.as_deref())?,
    };

    let action = match args.kind {
        ExportKind::Download => ExportAction::Download,
        ExportKind::Archive => ExportAction::Archive,
        ExportKind::Remote => ExportAction::Remote(config.remote.clone()),
        ExportKind::Share => {
            let base_url = args
                .base_url
                .clone()
                .or_else(|| config.share_base_url.clone())
                .ok_or_else(|| anyhow!("No share base URL; set shareBaseUrl or pass --base-url"))?;
            ExportAction::Share { base_url }
        }
    };

    match export_snapshot(&snapshot, &action, &config.title)? {
        ExportArtifact::Document(file) => {
            let out = args
                .out
                .unwrap_or_else(|| PathBuf::from(cwd).join(DOWNLOAD_FILE_NAME));
            write_file(&out, &file.contents)?;
        }
        ExportArtifact::Archive(files) => {
            let dir = args.out.unwrap_or_else(|| PathBuf::from(cwd));
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            for file in files {
                write_file(&dir.join(&file.path), &file.contents)?;
            }
        }
        ExportArtifact::Remote { action, payload } => {
            eprintln!("{} {}", "POST".bright_blue().bold(), action);
            println!("{}", payload);
        }
        ExportArtifact::ShareLink(link) => println!("{}", link),
    }

    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!("  {} {}", "✓".green(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_sources(dir: &Path) -> (PathBuf, PathBuf) {
        let html = dir.join("app.html.src");
        let css = dir.join("app.css");
        fs::write(&html, "<p>hi</p>").unwrap();
        fs::write(&css, "p { color: red; }").unwrap();
        (html, css)
    }

    #[test]
    fn test_archive_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let (html, css) = write_sources(dir.path());
        let out = dir.path().join("site");

        export(
            ExportArgs {
                kind: ExportKind::Archive,
                html: Some(html),
                css: Some(css),
                out: Some(out.clone()),
                base_url: None,
            },
            &dir.path().display().to_string(),
        )
        .unwrap();

        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains("href=\"style.css\""));
        assert_eq!(fs::read_to_string(out.join("style.css")).unwrap(), "p { color: red; }");
    }

    #[test]
    fn test_download_defaults_to_app_html() {
        let dir = tempfile::tempdir().unwrap();
        let (html, css) = write_sources(dir.path());

        export(
            ExportArgs {
                kind: ExportKind::Download,
                html: Some(html),
                css: Some(css),
                out: None,
                base_url: None,
            },
            &dir.path().display().to_string(),
        )
        .unwrap();

        let page = fs::read_to_string(dir.path().join("app.html")).unwrap();
        assert!(page.contains("<style>\np { color: red; }\n</style>"));
    }

    #[test]
    fn test_share_requires_base_url() {
        let dir = tempfile::tempdir().unwrap();

        let result = export(
            ExportArgs {
                kind: ExportKind::Share,
                html: None,
                css: None,
                out: None,
                base_url: None,
            },
            &dir.path().display().to_string(),
        );

        assert!(result.is_err());
    }
}
