//! Reading source files from disk and parsing them into [`SourceFile`]s.
//!
//! Directories are walked with `.gitignore` rules applied, files are
//! filtered by the configured extensions, and multi-file loads run on a
//! rayon pool sized by `parser.parallel_threads`. One bad file never stops
//! the others: results are returned per path.

use crate::config::ParserConfig;
use crate::error::{InspectorError, InspectorResult};
use crate::model::SourceFile;
use crate::parsing::paths::relative_to_root;
use crate::{debug_event, log_event};
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Read and parse one file. `workspace_root` is used to derive the
/// project-relative path stored in the result.
pub fn load_source_file(
    path: &Path,
    workspace_root: &Path,
    config: &ParserConfig,
) -> InspectorResult<SourceFile> {
    if !config.accepts_extension(path) {
        return Err(InspectorError::UnsupportedFile(path.to_path_buf()));
    }

    let io_error = |source| InspectorError::Io {
        path: path.to_path_buf(),
        source,
    };
    let size = std::fs::metadata(path).map_err(io_error)?.len();
    if !config.accepts_size(size) {
        return Err(InspectorError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            limit: config.max_file_size,
        });
    }
    let text = std::fs::read_to_string(path).map_err(io_error)?;

    let relative = relative_to_root(path, workspace_root);
    let file = SourceFile::parse(relative, text, config).map_err(|source| {
        InspectorError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug_event!("loader", "parsed", "{} in {}", file, path.display());
    Ok(file)
}

/// Expand directories into the source files beneath them. Plain file
/// arguments are kept as given, whatever their extension, so that
/// [`load_source_file`] can report them.
pub fn discover(paths: &[PathBuf], config: &ParserConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let mut found: Vec<PathBuf> = WalkBuilder::new(path)
            .hidden(true)
            .git_ignore(true)
            .git_exclude(true)
            .require_git(false)
            .follow_links(false)
            .build()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .map(|entry| entry.into_path())
            .filter(|file| config.accepts_extension(file))
            .collect();
        found.sort();
        debug_event!("loader", "discovered", "{} files under {}", found.len(), path.display());
        files.extend(found);
    }
    files
}

/// Load every file named by `paths`, walking directories. Results keep
/// the discovery order.
pub fn load_sources(
    paths: &[PathBuf],
    workspace_root: &Path,
    config: &ParserConfig,
) -> Vec<(PathBuf, InspectorResult<SourceFile>)> {
    let files = discover(paths, config);
    let load = |path: &PathBuf| {
        let result = load_source_file(path, workspace_root, config);
        (path.clone(), result)
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.parallel_threads.max(1))
        .build();
    let results: Vec<(PathBuf, InspectorResult<SourceFile>)> = match pool {
        Ok(pool) => pool.install(|| files.par_iter().map(load).collect()),
        Err(e) => {
            tracing::warn!(target: "loader", "thread pool unavailable, loading sequentially: {e}");
            files.iter().map(load).collect()
        }
    };

    let failed = results.iter().filter(|(_, result)| result.is_err()).count();
    log_event!(
        "loader",
        "loaded",
        "{} files, {} failed",
        results.len() - failed,
        failed
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_filters_extensions_and_gitignore() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("src/gen")).unwrap();
        fs::write(root.join(".gitignore"), "gen/\n").unwrap();
        fs::write(root.join("src/A.java"), "class A { }").unwrap();
        fs::write(root.join("src/notes.txt"), "text").unwrap();
        fs::write(root.join("src/gen/B.java"), "class B { }").unwrap();

        let files = discover(&[root.to_path_buf()], &ParserConfig::default());
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/A.java"));
    }

    #[test]
    fn test_size_cap() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Big.java");
        fs::write(&path, "class Big { int a; int b; int c; }").unwrap();

        let config = ParserConfig {
            max_file_size: 8,
            ..ParserConfig::default()
        };
        let error = load_source_file(&path, temp_dir.path(), &config).unwrap_err();
        assert!(matches!(error, InspectorError::FileTooLarge { limit: 8, .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Main.kt");
        fs::write(&path, "fun main() {}").unwrap();
        let error =
            load_source_file(&path, temp_dir.path(), &ParserConfig::default()).unwrap_err();
        assert!(matches!(error, InspectorError::UnsupportedFile(_)));
    }
}
