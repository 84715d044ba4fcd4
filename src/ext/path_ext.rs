use std::path::{Component, Path, PathBuf};

/// Lexically resolves `path` against `base`, the way a shell would resolve it
/// from inside `base`. Nothing is read from disk, so the result may point at
/// an entry that does not exist.
pub fn resolve_against(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&base.join(path))
    }
}

/// Drops `.` components and folds `..` into the preceding component.
///
/// Leading `..` components of a relative path are kept, since there is
/// nothing to fold them into yet.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

pub trait PathExt {
    fn resolve_against(&self, base: &Path) -> PathBuf;
    fn normalized(&self) -> PathBuf;
    /// Final segment as an owned string, empty for roots and empty paths.
    fn entry_name(&self) -> String;
    /// Directory portion, empty when there is none.
    fn parent_directory(&self) -> PathBuf;
}

impl PathExt for Path {
    fn resolve_against(&self, base: &Path) -> PathBuf {
        resolve_against(self, base)
    }

    fn normalized(&self) -> PathBuf {
        normalize_path(self)
    }

    fn entry_name(&self) -> String {
        self.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    fn parent_directory(&self) -> PathBuf {
        self.parent().map(Path::to_path_buf).unwrap_or_default()
    }
}
