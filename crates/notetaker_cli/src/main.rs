//! Command-line host for the note list.
//!
//! Each run loads the saved list, applies one command through the same
//! controller the UI uses, and prints the resulting list.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use log::warn;
use notetaker_core::{
    core_version, init_logging, JsonStoreAdapter, Note, NoteId, NoteListController, NotesConfig,
    SqliteBackend,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "notetaker")]
#[command(about = "Create, edit and delete short text notes")]
struct Cli {
    /// SQLite file holding the notes (overrides NOTETAKER_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Storage key for the note list (overrides NOTETAKER_STORAGE_KEY)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print all notes
    List,
    /// Add a note
    Add { title: String, content: String },
    /// Replace the title and content of an existing note
    Edit {
        id: NoteId,
        title: String,
        content: String,
    },
    /// Delete a note
    Delete { id: NoteId },
    /// Print the core version
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = NotesConfig::from_env().context("invalid NOTETAKER_* environment")?;

    if let Some(log_dir) = config.log_dir.as_ref() {
        init_logging(config.log_level, &log_dir.to_string_lossy())
            .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;
    }

    let command = cli.command.unwrap_or(Commands::List);
    if let Commands::Version = command {
        println!("notetaker {}", core_version());
        return Ok(());
    }

    let db_path = cli.db.unwrap_or(config.db_path);
    let key = cli.key.unwrap_or(config.storage_key);
    let mut controller = NoteListController::with_key(open_store(&db_path), key);
    controller.hydrate();

    execute(&mut controller, command)?;
    print_notes(controller.notes());
    Ok(())
}

/// Applies one command to a hydrated controller and reports the outcome.
fn execute(
    controller: &mut NoteListController<JsonStoreAdapter>,
    command: Commands,
) -> Result<()> {
    match command {
        Commands::List | Commands::Version => {}
        Commands::Add { title, content } => {
            controller.set_draft_title(title);
            controller.set_draft_content(content);
            match controller.add_note() {
                Some(id) => println!("added note {id}"),
                None => bail!("title and content must not be blank"),
            }
        }
        Commands::Edit { id, title, content } => {
            if !controller.begin_edit(id) {
                bail!("note {id} not found");
            }
            controller.set_draft_title(title);
            controller.set_draft_content(content);
            if !controller.update_note() {
                controller.cancel_edit();
                bail!("title and content must not be blank");
            }
            println!("updated note {id}");
        }
        Commands::Delete { id } => {
            if !controller.delete_note(id) {
                bail!("note {id} not found");
            }
            println!("deleted note {id}");
        }
    }
    Ok(())
}

fn open_store(db_path: &Path) -> JsonStoreAdapter {
    match SqliteBackend::open(db_path) {
        Ok(backend) => JsonStoreAdapter::new(backend),
        Err(err) => {
            warn!("event=cli_open module=cli status=degraded error={err}");
            eprintln!(
                "warning: cannot open {} ({err}); changes will not be saved",
                db_path.display()
            );
            JsonStoreAdapter::detached()
        }
    }
}

fn print_notes(notes: &[Note]) {
    if notes.is_empty() {
        println!("(no notes)");
        return;
    }
    for note in notes {
        println!("[{}] {}", note.id, note.title);
        for line in note.content.lines() {
            println!("    {line}");
        }
    }
}
