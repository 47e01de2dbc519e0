//! Normalizing user-supplied rule-config paths.

use std::path::{Component, Path, PathBuf};

/// Placeholder token substituted with the workspace root's path.
pub const WORKSPACE_FOLDER_TOKEN: &str = "${workspaceFolder}";

/// Resolves a user-supplied path against a workspace root.
///
/// Purely lexical, never touches the filesystem. The workspace-folder
/// placeholder is substituted first when a root is available; absolute
/// paths come back unchanged; relative paths are joined against the root
/// and normalized; a relative path with no root available is returned
/// as-is, best effort.
pub fn resolve_config_path(raw: &str, workspace_root: Option<&Path>) -> PathBuf {
    let substituted = match workspace_root {
        Some(root) if raw.contains(WORKSPACE_FOLDER_TOKEN) => {
            raw.replace(WORKSPACE_FOLDER_TOKEN, &root.to_string_lossy())
        }
        _ => raw.to_string(),
    };

    let path = PathBuf::from(substituted);
    if path.is_absolute() {
        return path;
    }

    match workspace_root {
        Some(root) => normalize(&root.join(path)),
        None => path,
    }
}

/// Lexically collapses `.` and `..` segments.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component.as_os_str());
                }
            }
            _ => normalized.push(component.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_absolute_path_is_unchanged() {
        let root = Path::new("/ws");
        assert_eq!(
            resolve_config_path("/etc/lute/rules.luau", Some(root)),
            PathBuf::from("/etc/lute/rules.luau")
        );
        assert_eq!(
            resolve_config_path("/etc/lute/rules.luau", None),
            PathBuf::from("/etc/lute/rules.luau")
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let root = Path::new("/ws");
        let once = resolve_config_path("./a/b.luau", Some(root));
        let twice = resolve_config_path(&once.to_string_lossy(), Some(root));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_relative_path_joins_workspace_root() {
        assert_eq!(
            resolve_config_path("./a/b.luau", Some(Path::new("/ws"))),
            PathBuf::from("/ws/a/b.luau")
        );
        assert_eq!(
            resolve_config_path("rules.luau", Some(Path::new("/ws"))),
            PathBuf::from("/ws/rules.luau")
        );
    }

    #[test]
    fn test_parent_segments_collapse() {
        assert_eq!(
            resolve_config_path("../shared/x.luau", Some(Path::new("/ws/project"))),
            PathBuf::from("/ws/shared/x.luau")
        );
        assert_eq!(
            resolve_config_path("a/../b/./c.luau", Some(Path::new("/ws"))),
            PathBuf::from("/ws/b/c.luau")
        );
    }

    #[test]
    fn test_relative_path_without_root_is_unchanged() {
        assert_eq!(
            resolve_config_path("./a/b.luau", None),
            PathBuf::from("./a/b.luau")
        );
    }

    #[test]
    fn test_workspace_folder_token_substitution() {
        assert_eq!(
            resolve_config_path("${workspaceFolder}/lint/rules.luau", Some(Path::new("/ws"))),
            PathBuf::from("/ws/lint/rules.luau")
        );
        // Without a root the token cannot be substituted.
        assert_eq!(
            resolve_config_path("${workspaceFolder}/lint/rules.luau", None),
            PathBuf::from("${workspaceFolder}/lint/rules.luau")
        );
    }
}
