//! Managed item references and path comparison helpers.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Extensions of shell shortcut files. Hidden from display names only.
pub const SHORTCUT_EXTENSIONS: &[&str] = &["lnk", "url"];

/// One file or folder held by a widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Absolute path, the identity key of the item.
    pub path: PathBuf,
    /// Custom display name, if the user set one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Transient UI selection flag.
    #[serde(skip)]
    pub selected: bool,
}

impl Item {
    /// Create an unselected item for a path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name: None,
            selected: false,
        }
    }

    /// Name shown under the icon.
    ///
    /// Falls back to the file name with any shortcut extension stripped.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        let Some(file_name) = self.path.file_name() else {
            return self.path.to_string_lossy().into_owned();
        };
        let is_shortcut = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                SHORTCUT_EXTENSIONS
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(ext))
            });
        match (is_shortcut, self.path.file_stem()) {
            (true, Some(stem)) => stem.to_string_lossy().into_owned(),
            _ => file_name.to_string_lossy().into_owned(),
        }
    }

    /// Whether this item refers to `path` (case-insensitive).
    pub fn matches(&self, path: &Path) -> bool {
        paths_equal(&self.path, path)
    }
}

/// Case-insensitive comparison key for a path.
pub fn path_key(path: &Path) -> String {
    path.to_string_lossy().to_lowercase()
}

/// Compare two paths ignoring case.
pub fn paths_equal(a: &Path, b: &Path) -> bool {
    path_key(a) == path_key(b)
}

/// Whether `path` lies at or below `root`, comparing components ignoring case.
pub fn is_within(path: &Path, root: &Path) -> bool {
    let mut path_components = path.components().filter(|c| !matches!(c, Component::CurDir));
    for root_component in root.components().filter(|c| !matches!(c, Component::CurDir)) {
        match path_components.next() {
            Some(component) => {
                let a = component.as_os_str().to_string_lossy().to_lowercase();
                let b = root_component.as_os_str().to_string_lossy().to_lowercase();
                if a != b {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

/// Whether `path` lies strictly below `root`.
pub fn is_strictly_within(path: &Path, root: &Path) -> bool {
    let depth = |p: &Path| p.components().filter(|c| !matches!(c, Component::CurDir)).count();
    is_within(path, root) && depth(path) > depth(root)
}

/// Make `path` absolute against the current directory and fold away `.` and
/// `..` components lexically. Symlinks are not resolved.
pub fn absolutize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut clean = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !clean.pop() && !clean.has_root() {
                    clean.push(component);
                }
            }
            other => clean.push(other),
        }
    }
    clean
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_uses_file_name() {
        let item = Item::new("/home/me/Desktop/report.pdf");
        assert_eq!(item.display_name(), "report.pdf");
    }

    #[test]
    fn test_display_name_strips_shortcut_extension() {
        let item = Item::new("/home/me/Desktop/Editor.LNK");
        assert_eq!(item.display_name(), "Editor");
        assert_eq!(item.path, PathBuf::from("/home/me/Desktop/Editor.LNK"));

        let url = Item::new("/home/me/Desktop/Docs.url");
        assert_eq!(url.display_name(), "Docs");
    }

    #[test]
    fn test_display_name_prefers_custom_name() {
        let mut item = Item::new("/tmp/a.txt");
        item.name = Some("Notes".to_string());
        assert_eq!(item.display_name(), "Notes");

        item.name = Some(String::new());
        assert_eq!(item.display_name(), "a.txt");
    }

    #[test]
    fn test_paths_equal_ignores_case() {
        assert!(paths_equal(Path::new("/Tmp/A.txt"), Path::new("/tmp/a.TXT")));
        assert!(!paths_equal(Path::new("/tmp/a.txt"), Path::new("/tmp/b.txt")));
        assert!(Item::new("/tmp/Photo.JPG").matches(Path::new("/tmp/photo.jpg")));
    }

    #[test]
    fn test_is_within() {
        let root = Path::new("/data/Foldr/Storage");
        assert!(is_within(Path::new("/data/foldr/storage/a.txt"), root));
        assert!(is_within(Path::new("/data/Foldr/Storage"), root));
        assert!(!is_within(Path::new("/data/Foldr/Storage2/a.txt"), root));
        assert!(!is_within(Path::new("/data/Foldr"), root));
        assert!(!is_within(Path::new("/elsewhere/a.txt"), root));
    }

    #[test]
    fn test_is_strictly_within_excludes_root() {
        let root = Path::new("/data/Foldr/Storage");
        assert!(is_strictly_within(Path::new("/data/foldr/storage/a.txt"), root));
        assert!(!is_strictly_within(Path::new("/data/foldr/storage"), root));
        assert!(!is_strictly_within(Path::new("/data/Foldr/./Storage"), root));
        assert!(!is_strictly_within(Path::new("/data/Foldr"), root));
    }

    #[test]
    fn test_absolutize_folds_dot_components() {
        assert_eq!(
            absolutize(Path::new("/data/storage/../storage/./a.txt")),
            PathBuf::from("/data/storage/a.txt")
        );
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolutize(Path::new("a.txt")), cwd.join("a.txt"));
        assert!(absolutize(Path::new("../a.txt")).is_absolute());
    }

    #[test]
    fn test_selected_flag_not_serialized() {
        let mut item = Item::new("/tmp/a.txt");
        item.selected = true;
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("selected"));
        let back: Item = serde_json::from_str(&json).unwrap();
        assert!(!back.selected);
    }
}
