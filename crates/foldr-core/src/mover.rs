//! Moves files between arbitrary locations, managed storage and the desktop.
//!
//! Ingest is copy-then-delete so that it works across volumes. Restore is a
//! rename, with a copy-then-delete fallback when the desktop lives on another
//! device. Both pick collision-free names of the form `name (N).ext`.

use crate::error::{MoveError, MoveResult};
use crate::item::{absolutize, is_strictly_within, is_within};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// What happened to a path handed to [`StorageMover::ingest`].
#[derive(Debug)]
pub enum IngestKind {
    /// Already inside storage; nothing was touched.
    AlreadyManaged,
    /// Copied into storage and the source removed.
    Moved,
    /// Copied into storage but the source could not be removed.
    Duplicated(MoveError),
}

/// Result of a successful ingest.
#[derive(Debug)]
pub struct Ingested {
    /// Path the widget should reference from now on.
    pub path: PathBuf,
    pub kind: IngestKind,
}

/// Relocates files into and out of the widget-owned storage directory.
#[derive(Debug, Clone)]
pub struct StorageMover {
    storage_root: PathBuf,
    desktop_root: PathBuf,
    max_name_attempts: u32,
}

impl StorageMover {
    /// Create a mover for the given storage and desktop directories.
    ///
    /// Relative roots are resolved against the current directory.
    pub fn new(storage_root: impl Into<PathBuf>, desktop_root: impl Into<PathBuf>) -> Self {
        Self {
            storage_root: absolutize(&storage_root.into()),
            desktop_root: absolutize(&desktop_root.into()),
            max_name_attempts: crate::config::DEFAULT_MAX_NAME_ATTEMPTS,
        }
    }

    /// Limit the number of counter suffixes tried per name.
    pub fn with_max_name_attempts(mut self, attempts: u32) -> Self {
        self.max_name_attempts = attempts.max(1);
        self
    }

    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    pub fn desktop_root(&self) -> &Path {
        &self.desktop_root
    }

    /// Whether `path` lives in managed storage. The storage directory itself
    /// does not count.
    pub fn is_managed(&self, path: &Path) -> bool {
        is_strictly_within(&absolutize(path), &self.storage_root)
    }

    /// Move `source` into managed storage.
    ///
    /// Paths already inside storage come back, made absolute, without touching the
    /// filesystem. A failed copy leaves the source untouched and removes any
    /// partial destination. The storage directory and its ancestors are
    /// refused with [`MoveError::ContainsStorage`].
    pub fn ingest(&self, source: &Path) -> MoveResult<Ingested> {
        let source = &absolutize(source);
        if is_strictly_within(source, &self.storage_root) {
            return Ok(Ingested {
                path: source.clone(),
                kind: IngestKind::AlreadyManaged,
            });
        }
        if is_within(&self.storage_root, source) {
            return Err(MoveError::ContainsStorage(source.clone()));
        }

        let metadata =
            fs::symlink_metadata(source).map_err(|_| MoveError::SourceMissing(source.to_path_buf()))?;

        fs::create_dir_all(&self.storage_root).map_err(|e| MoveError::CopyFailed {
            from: source.to_path_buf(),
            to: self.storage_root.clone(),
            source: e,
        })?;
        let dest = self.unique_destination(&self.storage_root, source)?;

        let copied = if metadata.is_dir() {
            copy_dir_recursive(source, &dest)
        } else {
            copy_file_new(source, &dest)
        };
        if let Err(e) = copied {
            discard_partial(&dest);
            return Err(MoveError::CopyFailed {
                from: source.to_path_buf(),
                to: dest,
                source: e,
            });
        }

        let removed = if metadata.is_dir() {
            fs::remove_dir_all(source)
        } else {
            fs::remove_file(source)
        };
        let kind = match removed {
            Ok(()) => IngestKind::Moved,
            Err(e) => {
                log::warn!(
                    "Copied {} into storage but could not delete the source: {}",
                    source.display(),
                    e
                );
                IngestKind::Duplicated(MoveError::DeleteFailed {
                    path: source.to_path_buf(),
                    copy: dest.clone(),
                    source: e,
                })
            }
        };

        log::debug!("Ingested {} as {}", source.display(), dest.display());
        Ok(Ingested { path: dest, kind })
    }

    /// Move a managed path back to the desktop.
    ///
    /// Returns `Ok(None)` without touching anything when `path` is not inside
    /// storage (reference-only items) or no longer exists.
    pub fn restore(&self, path: &Path) -> MoveResult<Option<PathBuf>> {
        if !self.is_managed(path) {
            return Ok(None);
        }
        let Ok(metadata) = fs::symlink_metadata(path) else {
            return Ok(None);
        };

        fs::create_dir_all(&self.desktop_root).map_err(|e| MoveError::RenameFailed {
            from: path.to_path_buf(),
            to: self.desktop_root.clone(),
            source: e,
        })?;
        let dest = self.unique_destination(&self.desktop_root, path)?;

        match fs::rename(path, &dest) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                self.move_across_devices(path, &dest, metadata.is_dir())?;
            }
            Err(e) => {
                return Err(MoveError::RenameFailed {
                    from: path.to_path_buf(),
                    to: dest,
                    source: e,
                });
            }
        }

        log::debug!("Restored {} to {}", path.display(), dest.display());
        Ok(Some(dest))
    }

    /// Copy-then-delete used when a rename cannot cross devices.
    fn move_across_devices(&self, path: &Path, dest: &Path, is_dir: bool) -> MoveResult<()> {
        let copied = if is_dir {
            copy_dir_recursive(path, dest)
        } else {
            copy_file_new(path, dest)
        };
        if let Err(e) = copied {
            discard_partial(dest);
            return Err(MoveError::CopyFailed {
                from: path.to_path_buf(),
                to: dest.to_path_buf(),
                source: e,
            });
        }
        let removed = if is_dir {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        if let Err(e) = removed {
            log::warn!(
                "Restored a copy of {} but could not remove it from storage: {}",
                path.display(),
                e
            );
        }
        Ok(())
    }

    /// Pick a free name for `source`'s file name inside `dir`.
    ///
    /// `a.txt` becomes `a (1).txt`, then `a (2).txt`, and so on.
    pub fn unique_destination(&self, dir: &Path, source: &Path) -> MoveResult<PathBuf> {
        let file_name = source
            .file_name()
            .ok_or_else(|| MoveError::DestinationUnresolvable {
                dir: dir.to_path_buf(),
                name: source.to_string_lossy().into_owned(),
            })?;

        let candidate = dir.join(file_name);
        if !exists(&candidate) {
            return Ok(candidate);
        }

        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = source
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        for counter in 1..=self.max_name_attempts {
            let candidate = dir.join(format!("{stem} ({counter}){extension}"));
            if !exists(&candidate) {
                return Ok(candidate);
            }
        }

        Err(MoveError::DestinationUnresolvable {
            dir: dir.to_path_buf(),
            name: file_name.to_string_lossy().into_owned(),
        })
    }
}

fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Copy a single file, refusing to overwrite.
fn copy_file_new(source: &Path, dest: &Path) -> io::Result<()> {
    if exists(dest) {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", dest.display()),
        ));
    }
    fs::copy(source, dest).map(|_| ())
}

/// Copy a directory tree: files of each level first, then subdirectories.
pub fn copy_dir_recursive(source: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;

    let mut subdirs = Vec::new();
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        let file_type = entry.file_type()?;
        if file_type.is_symlink() {
            copy_symlink(&entry.path(), &target)?;
        } else if file_type.is_dir() {
            subdirs.push((entry.path(), target));
        } else {
            copy_file_new(&entry.path(), &target)?;
        }
    }

    for (from, to) in subdirs {
        copy_dir_recursive(&from, &to)?;
    }
    Ok(())
}

/// Recreate a symlink found inside a copied tree. The link is not followed.
#[cfg(unix)]
fn copy_symlink(source: &Path, dest: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(source)?, dest)
}

#[cfg(not(unix))]
fn copy_symlink(source: &Path, dest: &Path) -> io::Result<()> {
    log::warn!("Skipping symlink {} while copying to {}", source.display(), dest.display());
    Ok(())
}

/// Best-effort removal of a destination left behind by a failed copy.
fn discard_partial(dest: &Path) {
    let Ok(metadata) = fs::symlink_metadata(dest) else {
        return;
    };
    let result = if metadata.is_dir() {
        fs::remove_dir_all(dest)
    } else {
        fs::remove_file(dest)
    };
    if let Err(e) = result {
        log::warn!("Could not clean up partial copy {}: {}", dest.display(), e);
    }
}
