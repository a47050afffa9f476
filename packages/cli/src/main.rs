mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{compose, export, preview, scope, ComposeArgs, ExportArgs, PreviewArgs, ScopeArgs};

/// Playground CLI - scoped live preview for markup and stylesheets
#[derive(Parser, Debug)]
#[command(name = "playground")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a stylesheet with every rule confined to the scope selector
    Scope(ScopeArgs),

    /// Compose the preview document from markup and stylesheet files
    Compose(ComposeArgs),

    /// Export the buffers as a page, archive, remote payload or share link
    Export(ExportArgs),

    /// Watch the buffers and keep a rendered preview up to date
    Preview(PreviewArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Scope(args) => scope(args, &cwd),
        Command::Compose(args) => compose(args, &cwd),
        Command::Export(args) => export(args, &cwd),
        Command::Preview(args) => preview(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
