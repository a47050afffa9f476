use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use playground_editor::{Buffer, FileSurface, PreviewEngine, MARKUP_BUFFER, STYLE_BUFFER};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, warn};

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Markup buffer
    #[arg(long)]
    pub html: PathBuf,

    /// Stylesheet buffer
    #[arg(long)]
    pub css: PathBuf,

    /// Directory the preview pages are written to
    #[arg(long, default_value = ".playground")]
    pub out_dir: PathBuf,
}

/// A watched file backing one buffer
struct Source {
    buffer_id: &'static str,
    path: PathBuf,
}

pub fn preview(args: PreviewArgs, cwd: &str) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(args, cwd))
}

async fn run(args: PreviewArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;

    let sources = vec![
        Source::open(MARKUP_BUFFER, &args.html)?,
        Source::open(STYLE_BUFFER, &args.css)?,
    ];

    let mut discovered = Vec::with_capacity(sources.len());
    for source in &sources {
        discovered.push(Buffer::realtime(source.buffer_id, source.read()?));
    }

    let surface = FileSurface::new(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;
    let index = surface.index_path();
    let mut engine = PreviewEngine::new(config.to_engine_options(), discovered, surface)?;

    engine.recompute()?;
    println!("{} {}", "🖼  Preview:".bright_blue().bold(), index.display());

    let (tx, mut rx) = mpsc::channel(100);
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        },
        notify::Config::default(),
    )?;

    // Watch the parent directories; editors often save by replacing the file
    for source in &sources {
        let dir = source.path.parent().unwrap_or(Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
    }

    println!("{}", "👀 Watching for changes... (Ctrl+C to stop)".bright_blue());

    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else { break };
                for source in changed_sources(&event, &sources) {
                    match source.read() {
                        Ok(content) => {
                            engine.apply_edit(source.buffer_id, content, Instant::now())?;
                        }
                        Err(e) => warn!(error = %e, "Skipping unreadable source"),
                    }
                }
            }
            _ = wait_for_deadline(engine.next_deadline()) => {
                match engine.tick(Instant::now()) {
                    Ok(Some(report)) => {
                        println!("  {} v{} ({} bytes)", "✓".green(), report.version, report.bytes);
                    }
                    Ok(None) => {}
                    Err(e) => eprintln!("  {} {}", "✗".red(), e.to_string().red()),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    // Dropping the engine removes the preview page and its index
    drop(watcher);
    drop(engine);
    println!();
    println!("{}", "Preview stopped".dimmed());
    Ok(())
}

impl Source {
    fn open(buffer_id: &'static str, path: &Path) -> Result<Self> {
        let path = fs::canonicalize(path)
            .with_context(|| format!("Source file does not exist: {}", path.display()))?;
        Ok(Self { buffer_id, path })
    }

    fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))
    }
}

/// Sources whose file an event touched
fn changed_sources<'a>(event: &Event, sources: &'a [Source]) -> Vec<&'a Source> {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return Vec::new();
    }

    let changed: Vec<&Source> = sources
        .iter()
        .filter(|source| event.paths.iter().any(|path| path == &source.path))
        .collect();
    if !changed.is_empty() {
        debug!(paths = ?event.paths, "Source changed");
    }
    changed
}

/// Resolves at the scheduler's deadline; never resolves when nothing is pending
async fn wait_for_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};
    use std::time::Duration;

    fn sources(dir: &Path) -> Vec<Source> {
        vec![
            Source {
                buffer_id: MARKUP_BUFFER,
                path: dir.join("index.html"),
            },
            Source {
                buffer_id: STYLE_BUFFER,
                path: dir.join("style.css"),
            },
        ]
    }

    #[test]
    fn test_changed_sources_matches_paths() {
        let dir = PathBuf::from("/tmp/project");
        let sources = sources(&dir);

        let event = Event::new(EventKind::Modify(ModifyKind::Any)).add_path(dir.join("style.css"));
        let changed = changed_sources(&event, &sources);
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].buffer_id, STYLE_BUFFER);

        let event = Event::new(EventKind::Create(CreateKind::File)).add_path(dir.join("other.css"));
        assert!(changed_sources(&event, &sources).is_empty());
    }

    #[test]
    fn test_changed_sources_ignores_access() {
        let dir = PathBuf::from("/tmp/project");
        let sources = sources(&dir);

        let event = Event::new(EventKind::Access(AccessKind::Any)).add_path(dir.join("index.html"));
        assert!(changed_sources(&event, &sources).is_empty());
    }

    #[tokio::test]
    async fn test_wait_for_deadline() {
        let due = Some(Instant::now());
        assert!(tokio::time::timeout(Duration::from_secs(1), wait_for_deadline(due)).await.is_ok());

        let idle = tokio::time::timeout(Duration::from_millis(20), wait_for_deadline(None)).await;
        assert!(idle.is_err());
    }
}
