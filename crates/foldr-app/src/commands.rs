//! Widget operations behind the subcommands.
//!
//! Each operation loads the widget, wraps it in a [`Folder`] with a
//! [`CliHost`], and lets the engine persist the result.

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::host::CliHost;
use foldr_core::{
    DragPayload, DropOutcome, DropZone, FileStore, Folder, RestoreReport, WidgetState, WidgetStore,
};
use kurbo::Point;
use std::path::PathBuf;

/// Resolved configuration plus the widget store it points at.
pub struct Context {
    config: AppConfig,
    store: FileStore,
}

impl Context {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let store = FileStore::new(config.widgets_dir.clone())?;
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    fn host(&self) -> AppResult<CliHost> {
        Ok(CliHost::new(
            FileStore::new(self.config.widgets_dir.clone())?,
            self.config.storage_root.clone(),
            self.config.desktop_root.clone(),
        ))
    }

    /// Load a widget and wire it to a fresh host.
    pub fn open(&self, id: &str) -> AppResult<Folder<CliHost>> {
        let state = self.store.load(id)?;
        Ok(Folder::new(state, self.config.engine.clone(), self.host()?))
    }
}

/// Hand the state back, surfacing any persistence failure.
fn finish(folder: Folder<CliHost>) -> AppResult<WidgetState> {
    let (state, mut host) = folder.into_parts();
    match host.take_save_error() {
        Some(e) => Err(e.into()),
        None => Ok(state),
    }
}

fn item_path(folder: &Folder<CliHost>, index: usize) -> AppResult<PathBuf> {
    folder
        .state()
        .items()
        .get(index)
        .map(|item| item.path.clone())
        .ok_or_else(|| AppError::NoSuchItem {
            id: folder.state().id.clone(),
            index,
        })
}

pub fn create_widget(ctx: &Context, name: &str, columns: Option<usize>) -> AppResult<WidgetState> {
    let mut state = WidgetState::new(name);
    if let Some(columns) = columns {
        state.set_grid_columns(columns);
    }
    ctx.store.save(&state)?;
    log::info!("Created widget {} ({})", state.name, state.id);
    Ok(state)
}

/// Every stored widget, by id. Unreadable records are logged and skipped.
pub fn list_widgets(ctx: &Context) -> AppResult<Vec<WidgetState>> {
    let mut widgets = Vec::new();
    for id in ctx.store.list()? {
        match ctx.store.load(&id) {
            Ok(state) => widgets.push(state),
            Err(e) => log::warn!("Skipping widget {}: {}", id, e),
        }
    }
    Ok(widgets)
}

pub fn show_widget(ctx: &Context, id: &str) -> AppResult<WidgetState> {
    Ok(ctx.store.load(id)?)
}

/// Drop `paths` on the widget's icon, as a file drop from the desktop.
///
/// Relative paths are taken from the current directory.
pub fn add_paths(ctx: &Context, id: &str, paths: Vec<PathBuf>) -> AppResult<DropOutcome> {
    let paths = paths
        .iter()
        .map(std::path::absolute)
        .collect::<Result<Vec<_>, _>>()?;
    let mut folder = ctx.open(id)?;
    let layout = folder.layout(Point::ZERO);
    let outcome = folder.drop(&DragPayload::external(paths), DropZone::Icon, &layout);
    finish(folder)?;
    Ok(outcome)
}

/// Reorder as if item `from` were dropped on item `to`.
pub fn move_item(ctx: &Context, id: &str, from: usize, to: usize, after: bool) -> AppResult<bool> {
    let mut folder = ctx.open(id)?;
    if folder.state().locked {
        return Err(AppError::Locked(id.to_string()));
    }
    item_path(&folder, from)?;
    item_path(&folder, to)?;
    let moved = folder.move_item(from, to, after);
    finish(folder)?;
    Ok(moved)
}

pub fn remove_item(ctx: &Context, id: &str, index: usize) -> AppResult<RestoreReport> {
    let mut folder = ctx.open(id)?;
    let path = item_path(&folder, index)?;
    let report = folder.remove_item(&path);
    finish(folder)?;
    Ok(report)
}

pub fn open_item(ctx: &Context, id: &str, index: usize) -> AppResult<()> {
    let mut folder = ctx.open(id)?;
    let path = item_path(&folder, index)?;
    folder.open_item(&path)?;
    Ok(())
}

pub fn set_locked(ctx: &Context, id: &str, locked: bool) -> AppResult<WidgetState> {
    let mut folder = ctx.open(id)?;
    folder.set_locked(locked);
    finish(folder)
}

pub fn set_pinned(ctx: &Context, id: &str, pinned: bool) -> AppResult<WidgetState> {
    let mut folder = ctx.open(id)?;
    folder.set_pinned(pinned);
    finish(folder)
}

pub fn rename_widget(ctx: &Context, id: &str, name: &str) -> AppResult<WidgetState> {
    let mut folder = ctx.open(id)?;
    folder.rename(name);
    finish(folder)
}

pub fn set_columns(ctx: &Context, id: &str, columns: usize) -> AppResult<WidgetState> {
    let mut folder = ctx.open(id)?;
    folder.set_grid_columns(columns);
    finish(folder)
}

/// Restore every managed item to the desktop and drop the record.
pub fn delete_widget(ctx: &Context, id: &str) -> AppResult<RestoreReport> {
    let folder = ctx.open(id)?;
    let (report, mut host) = folder.delete();
    if let Some(e) = host.take_save_error() {
        return Err(e.into());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use foldr_core::StorageError;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn context() -> (TempDir, Context) {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            storage_root: dir.path().join("storage"),
            desktop_root: dir.path().join("desktop"),
            widgets_dir: dir.path().join("widgets"),
            ..Default::default()
        };
        fs::create_dir_all(&config.desktop_root).unwrap();
        let ctx = Context::new(config).unwrap();
        (dir, ctx)
    }

    fn desktop_file(ctx: &Context, name: &str) -> PathBuf {
        let path = ctx.config().desktop_root.join(name);
        fs::write(&path, name).unwrap();
        path
    }

    #[test]
    fn test_create_and_list() {
        let (_dir, ctx) = context();
        let widget = create_widget(&ctx, "Docs", Some(3)).unwrap();

        let listed = list_widgets(&ctx).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, widget.id);
        assert_eq!(listed[0].grid_columns(), 3);
    }

    #[test]
    fn test_add_persists_items() {
        let (_dir, ctx) = context();
        let widget = create_widget(&ctx, "Docs", None).unwrap();
        let a = desktop_file(&ctx, "a.txt");

        let outcome = add_paths(&ctx, &widget.id, vec![a.clone()]).unwrap();
        assert!(matches!(outcome, DropOutcome::Ingested(ref r) if r.added.len() == 1));
        assert!(!a.exists());

        let stored = show_widget(&ctx, &widget.id).unwrap();
        assert_eq!(stored.paths(), vec![ctx.config().storage_root.join("a.txt")]);
    }

    #[test]
    fn test_locked_widget() {
        let (_dir, ctx) = context();
        let widget = create_widget(&ctx, "Docs", None).unwrap();
        set_locked(&ctx, &widget.id, true).unwrap();
        let a = desktop_file(&ctx, "a.txt");

        let outcome = add_paths(&ctx, &widget.id, vec![a.clone()]).unwrap();
        assert!(matches!(outcome, DropOutcome::Rejected));
        assert!(a.exists());
        assert!(matches!(
            move_item(&ctx, &widget.id, 0, 0, false),
            Err(AppError::Locked(_))
        ));

        assert!(!set_locked(&ctx, &widget.id, false).unwrap().locked);
    }

    #[test]
    fn test_move_and_remove() {
        let (_dir, ctx) = context();
        let widget = create_widget(&ctx, "Docs", None).unwrap();
        let files = ["a", "b", "c"].map(|name| desktop_file(&ctx, name));
        add_paths(&ctx, &widget.id, files.to_vec()).unwrap();

        assert!(move_item(&ctx, &widget.id, 0, 2, true).unwrap());
        let names: Vec<String> = show_widget(&ctx, &widget.id)
            .unwrap()
            .items()
            .iter()
            .map(|item| item.display_name())
            .collect();
        assert_eq!(names, ["b", "c", "a"]);

        let report = remove_item(&ctx, &widget.id, 2).unwrap();
        assert_eq!(report.restored, vec![ctx.config().desktop_root.join("a")]);
        assert_eq!(show_widget(&ctx, &widget.id).unwrap().len(), 2);

        assert!(matches!(
            remove_item(&ctx, &widget.id, 7),
            Err(AppError::NoSuchItem { index: 7, .. })
        ));
    }

    /// `path` spelled relative to the current directory.
    #[cfg(unix)]
    fn relative_to_cwd(path: &std::path::Path) -> PathBuf {
        let mut relative = PathBuf::new();
        for _ in std::env::current_dir().unwrap().components() {
            relative.push("..");
        }
        relative.join(path.strip_prefix("/").unwrap())
    }

    #[cfg(unix)]
    #[test]
    fn test_add_relative_path_of_managed_file() {
        let (_dir, ctx) = context();
        let one = create_widget(&ctx, "One", None).unwrap();
        let two = create_widget(&ctx, "Two", None).unwrap();
        add_paths(&ctx, &one.id, vec![desktop_file(&ctx, "a.txt")]).unwrap();
        let managed = ctx.config().storage_root.join("a.txt");

        let outcome = add_paths(&ctx, &two.id, vec![relative_to_cwd(&managed)]).unwrap();
        assert!(matches!(outcome, DropOutcome::Ingested(ref r) if r.errors.is_empty()));
        assert!(managed.exists());
        assert!(!ctx.config().storage_root.join("a (1).txt").exists());
        assert_eq!(show_widget(&ctx, &two.id).unwrap().paths(), vec![managed.clone()]);
        assert_eq!(show_widget(&ctx, &one.id).unwrap().paths(), vec![managed]);
    }

    #[test]
    fn test_add_storage_directory_is_refused() {
        let (_dir, ctx) = context();
        let widget = create_widget(&ctx, "Docs", None).unwrap();
        add_paths(&ctx, &widget.id, vec![desktop_file(&ctx, "a.txt")]).unwrap();
        let storage = ctx.config().storage_root.clone();

        let outcome = add_paths(&ctx, &widget.id, vec![storage.clone()]).unwrap();
        let report = match outcome {
            DropOutcome::Ingested(report) => report,
            other => panic!("unexpected outcome {other:?}"),
        };
        assert!(report.added.is_empty());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(show_widget(&ctx, &widget.id).unwrap().len(), 1);
        assert!(storage.join("a.txt").exists());
    }

    #[test]
    fn test_pin_and_rename() {
        let (_dir, ctx) = context();
        let widget = create_widget(&ctx, "Docs", None).unwrap();

        assert!(set_pinned(&ctx, &widget.id, true).unwrap().pinned);
        let renamed = rename_widget(&ctx, &widget.id, "Projects").unwrap();
        assert_eq!(renamed.name, "Projects");

        let stored = show_widget(&ctx, &widget.id).unwrap();
        assert_eq!(stored.name, "Projects");
        assert!(stored.pinned);
        assert!(!set_pinned(&ctx, &widget.id, false).unwrap().pinned);
    }

    #[test]
    fn test_columns_clamped() {
        let (_dir, ctx) = context();
        let widget = create_widget(&ctx, "Docs", None).unwrap();
        assert_eq!(set_columns(&ctx, &widget.id, 0).unwrap().grid_columns(), 1);
    }

    #[test]
    fn test_delete_restores_and_drops_record() {
        let (_dir, ctx) = context();
        let widget = create_widget(&ctx, "Docs", None).unwrap();
        let a = desktop_file(&ctx, "a.txt");
        add_paths(&ctx, &widget.id, vec![a.clone()]).unwrap();

        let report = delete_widget(&ctx, &widget.id).unwrap();
        assert_eq!(report.restored, vec![a.clone()]);
        assert!(a.exists());
        assert!(matches!(
            show_widget(&ctx, &widget.id),
            Err(AppError::Storage(StorageError::NotFound(_)))
        ));
    }

    #[test]
    fn test_unknown_widget() {
        let (_dir, ctx) = context();
        assert!(matches!(
            add_paths(&ctx, "missing", vec![]),
            Err(AppError::Storage(StorageError::NotFound(_)))
        ));
    }
}
