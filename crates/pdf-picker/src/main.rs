mod picker;
mod viewer;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pdf_picker_config::{resolve_data_dir, AppConfig};
use pdf_picker_mod_history::{HistoryConfig, OpenError, RecentDocumentHistory};
use pdf_picker_store::persistent::DEFAULT_FILE_NAME;
use pdf_picker_store::LocalStore;

use crate::picker::{describe, Picker};
use crate::viewer::{DocumentViewer, LogViewer, SystemViewer};

/// Open PDF documents in the system viewer and remember them.
#[derive(Parser, Debug)]
#[command(name = "pdf-picker", version, about)]
struct Cli {
    /// Don't launch a viewer; only record and log.
    #[arg(long, global = true)]
    no_viewer: bool,

    /// Keep opened files' content in the history so they can be reopened
    /// without the original file.
    #[arg(long, global = true)]
    save_inline: bool,

    /// Config file to use instead of the one next to the executable.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open a local PDF file.
    Open { path: PathBuf },
    /// Open a remote PDF by URL.
    OpenUrl { url: String },
    /// List recently opened documents, newest first.
    List,
    /// Open a document from the history again.
    Reopen { id: String },
    /// Remove one entry from the history.
    Remove { id: String },
    /// Forget the whole history.
    Clear,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_or_create(&config_path);
    let data_dir = resolve_data_dir(&config);
    tracing::debug!("Using data directory {}", data_dir.display());

    let store = LocalStore::open(&data_dir.join(DEFAULT_FILE_NAME));
    if !store.is_persistent() {
        tracing::warn!("History will not be kept after this run");
    }

    let history_config = HistoryConfig::default()
        .with_inline_content(config.save_inline_content || cli.save_inline)
        .with_max_inline_bytes(config.inline_limit());
    let history = RecentDocumentHistory::new(store, history_config);

    let viewer: Box<dyn DocumentViewer> = if cli.no_viewer || !config.launch_viewer {
        Box::new(LogViewer)
    } else {
        Box::new(SystemViewer::new(data_dir.join("viewer")))
    };

    let mut picker = Picker::new(history, viewer);
    Ok(run(&mut picker, cli.command))
}

fn run<S, V>(picker: &mut Picker<S, V>, command: Command) -> ExitCode
where
    S: pdf_picker_store::KeyValueStore,
    V: DocumentViewer,
{
    let result = match command {
        Command::Open { path } => picker.open_file(&path).map(|entry| {
            println!("Opened {} [{}]", entry.label(), entry.id());
        }),
        Command::OpenUrl { url } => picker.open_url(&url).map(|entry| {
            println!("Opened {} [{}]", entry.label(), entry.id());
        }),
        Command::List => {
            let entries = picker.history().entries();
            if entries.is_empty() {
                println!("No recent documents.");
            }
            for entry in entries {
                println!("{}", describe(entry));
            }
            Ok(())
        }
        Command::Reopen { id } => picker.reopen(&id).map(|()| {
            if let Some(label) = picker.current_label() {
                println!("Opened {label}");
            }
        }),
        Command::Remove { id } => {
            if picker.remove(&id) {
                println!("Removed {id}");
            } else {
                println!("No entry {id}");
            }
            Ok(())
        }
        Command::Clear => {
            picker.clear();
            println!("History cleared.");
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

/// Shows a failure to the user. Details already went to the log.
fn report(error: &OpenError) {
    eprintln!("{}", error.user_message());
}
