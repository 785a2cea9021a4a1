//! Path utilities for module path computation
//!
//! A source file's module path is its project-relative path with the
//! configured source root and extension removed, components joined by `.`:
//! `src/com/acme/Widget.java` becomes `com.acme.Widget`. All functions use
//! `Path` APIs so separators are handled the same on every OS.

use std::path::{Component, Path, PathBuf};

/// Express `file_path` relative to `workspace_root` when it lies inside it.
///
/// Paths outside the root, and paths that are already relative, are
/// returned unchanged.
pub fn relative_to_root(file_path: &Path, workspace_root: &Path) -> PathBuf {
    file_path
        .strip_prefix(workspace_root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| file_path.to_path_buf())
}

/// Strip the first matching source root from a relative path.
pub fn strip_source_root<'a, S: AsRef<str>>(path: &'a Path, source_roots: &[S]) -> &'a Path {
    for root in source_roots {
        if let Ok(stripped) = path.strip_prefix(root.as_ref()) {
            return stripped;
        }
    }
    path
}

/// Strip the first matching extension. Extensions carry no leading dot.
pub fn strip_extension<'a, S: AsRef<str>>(path_str: &'a str, extensions: &[S]) -> &'a str {
    for ext in extensions {
        let suffix = format!(".{}", ext.as_ref());
        if let Some(stripped) = path_str.strip_suffix(&suffix) {
            return stripped;
        }
    }
    path_str
}

/// Dotted module path for a project-relative file path.
pub fn module_path_from_file<S: AsRef<str>>(
    relative_path: &Path,
    source_roots: &[S],
    extensions: &[S],
) -> String {
    let stripped = strip_source_root(relative_path, source_roots);
    let components: Vec<String> = stripped
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    let joined = components.join(".");
    strip_extension(&joined, extensions).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOTS: &[&str] = &["src/main/java", "src"];
    const EXTENSIONS: &[&str] = &["java"];

    #[test]
    fn test_relative_to_root_inside() {
        let result = relative_to_root(
            Path::new("/home/user/project/src/a/B.java"),
            Path::new("/home/user/project"),
        );
        assert_eq!(result, Path::new("src/a/B.java"));
    }

    #[test]
    fn test_relative_to_root_outside() {
        let file = Path::new("/elsewhere/B.java");
        assert_eq!(relative_to_root(file, Path::new("/home/user/project")), file);
    }

    #[test]
    fn test_strip_source_root_matches_first() {
        let path = Path::new("src/main/java/com/acme/Widget.java");
        assert_eq!(strip_source_root(path, ROOTS), Path::new("com/acme/Widget.java"));
    }

    #[test]
    fn test_strip_source_root_no_match() {
        let path = Path::new("test/Widget.java");
        assert_eq!(strip_source_root(path, ROOTS), path);

        let no_roots: &[&str] = &[];
        assert_eq!(strip_source_root(path, no_roots), path);
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("Widget.java", EXTENSIONS), "Widget");
        assert_eq!(strip_extension("README.md", EXTENSIONS), "README.md");
    }

    #[test]
    fn test_module_path_from_file() {
        assert_eq!(
            module_path_from_file(Path::new("src/com/acme/Widget.java"), ROOTS, EXTENSIONS),
            "com.acme.Widget"
        );
        assert_eq!(
            module_path_from_file(Path::new("Widget.java"), ROOTS, EXTENSIONS),
            "Widget"
        );
        assert_eq!(
            module_path_from_file(Path::new("lib/x/Y.java"), ROOTS, EXTENSIONS),
            "lib.x.Y"
        );
    }

    #[test]
    fn test_module_path_accepts_owned_strings() {
        let roots = vec!["src".to_string()];
        let extensions = vec!["java".to_string()];
        assert_eq!(
            module_path_from_file(Path::new("src/a/B.java"), &roots, &extensions),
            "a.B"
        );
    }
}
