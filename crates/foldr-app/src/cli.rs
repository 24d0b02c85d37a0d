//! Command-line interface.

use crate::commands::{self, Context};
use crate::config::AppConfig;
use crate::error::AppResult;
use clap::{Parser, Subcommand};
use foldr_core::{DropOutcome, FolderError, RestoreReport, WidgetState};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "foldr", about = "Desktop folder widgets from the command line", version)]
pub struct Cli {
    /// Config file (default: <config-dir>/foldr/config.json).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Managed storage directory.
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    /// Desktop directory items are restored to.
    #[arg(long, global = true)]
    pub desktop: Option<PathBuf>,

    /// Directory of widget records.
    #[arg(long, global = true)]
    pub widgets: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an empty widget.
    New {
        name: String,
        #[arg(long)]
        columns: Option<usize>,
    },

    /// List widgets, or the items of one widget.
    List { id: Option<String> },

    /// Move files into a widget, as a drop from the desktop.
    Add {
        id: String,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Reorder: drop item FROM on item TO (before it, or after with --after).
    Move {
        id: String,
        from: usize,
        to: usize,
        #[arg(long)]
        after: bool,
    },

    /// Remove an item, restoring it to the desktop.
    Remove { id: String, index: usize },

    /// Open an item with the default application.
    Open { id: String, index: usize },

    /// Reject drops, reorders and drag-outs.
    Lock { id: String },

    Unlock { id: String },

    /// Keep the widget above other windows.
    Pin { id: String },

    Unpin { id: String },

    /// Change the widget's display name.
    Rename { id: String, name: String },

    /// Set the number of grid columns.
    Columns { id: String, columns: usize },

    /// Delete a widget, restoring its items to the desktop.
    Delete { id: String },
}

impl Cli {
    /// Config file merged with command-line overrides.
    pub fn resolve_config(&self) -> AppResult<AppConfig> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => AppConfig::default_path()?,
        };
        let mut config = AppConfig::load(&path)?;
        if let Some(storage) = &self.storage {
            config.storage_root = storage.clone();
        }
        if let Some(desktop) = &self.desktop {
            config.desktop_root = desktop.clone();
        }
        if let Some(widgets) = &self.widgets {
            config.widgets_dir = widgets.clone();
        }
        Ok(config)
    }
}

pub fn run_from_env() -> AppResult<()> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> AppResult<()> {
    let ctx = Context::new(cli.resolve_config()?)?;
    log::debug!("Using widgets in {}", ctx.config().widgets_dir.display());

    match cli.command {
        Command::New { name, columns } => {
            let state = commands::create_widget(&ctx, &name, columns)?;
            println!("{}", state.id);
        }
        Command::List { id: None } => {
            for state in commands::list_widgets(&ctx)? {
                print_summary(&state);
            }
        }
        Command::List { id: Some(id) } => {
            let state = commands::show_widget(&ctx, &id)?;
            print_summary(&state);
            for (index, item) in state.items().iter().enumerate() {
                println!("{index:>4}  {}  {}", item.display_name(), item.path.display());
            }
        }
        Command::Add { id, paths } => match commands::add_paths(&ctx, &id, paths)? {
            DropOutcome::Ingested(report) => {
                for path in &report.added {
                    println!("added {}", path.display());
                }
                for path in &report.skipped {
                    println!("already present {}", path.display());
                }
                print_errors(&report.errors);
            }
            DropOutcome::Rejected => println!("widget {id} is locked; nothing added"),
            DropOutcome::Ignored | DropOutcome::Reordered(_) => {}
        },
        Command::Move {
            id,
            from,
            to,
            after,
        } => {
            if !commands::move_item(&ctx, &id, from, to, after)? {
                println!("order unchanged");
            }
        }
        Command::Remove { id, index } => {
            print_restore(&commands::remove_item(&ctx, &id, index)?);
        }
        Command::Open { id, index } => commands::open_item(&ctx, &id, index)?,
        Command::Lock { id } => {
            commands::set_locked(&ctx, &id, true)?;
        }
        Command::Unlock { id } => {
            commands::set_locked(&ctx, &id, false)?;
        }
        Command::Pin { id } => {
            commands::set_pinned(&ctx, &id, true)?;
        }
        Command::Unpin { id } => {
            commands::set_pinned(&ctx, &id, false)?;
        }
        Command::Rename { id, name } => {
            let state = commands::rename_widget(&ctx, &id, &name)?;
            println!("{}  {}", state.id, state.name);
        }
        Command::Columns { id, columns } => {
            let state = commands::set_columns(&ctx, &id, columns)?;
            println!("{} column(s)", state.grid_columns());
        }
        Command::Delete { id } => {
            print_restore(&commands::delete_widget(&ctx, &id)?);
        }
    }
    Ok(())
}

fn print_summary(state: &WidgetState) {
    let lock = if state.locked { " [locked]" } else { "" };
    println!(
        "{}  {}  ({}){}",
        state.id,
        state.name,
        state.badge_text().unwrap_or_else(|| "0".to_string()),
        lock
    );
}

fn print_restore(report: &RestoreReport) {
    for path in &report.restored {
        println!("restored {}", path.display());
    }
    print_errors(&report.errors);
}

fn print_errors(errors: &[FolderError]) {
    for error in errors {
        eprintln!("warning: {error}");
    }
}
