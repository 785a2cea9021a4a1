//! Parse command - print the code model of each file.

use anyhow::{Result, bail};
use std::path::PathBuf;

use crate::config::Settings;
use crate::loader::load_sources;
use crate::model::{CoverageOverlay, SourceFile};
use crate::types::ConstructId;

/// Parse a comma-separated list of lines and `start-end` ranges.
pub fn parse_coverage(ranges: &str) -> Result<CoverageOverlay> {
    let mut overlay = CoverageOverlay::new();
    for range in ranges.split(',').filter(|part| !part.trim().is_empty()) {
        if !overlay.cover_range(range) {
            bail!("invalid coverage range '{}'", range.trim());
        }
    }
    Ok(overlay)
}

/// Run parse command. Returns the number of files that failed.
pub fn run(
    paths: &[PathBuf],
    json: bool,
    coverage: Option<&str>,
    settings: &Settings,
) -> Result<usize> {
    let overlay = coverage.map(parse_coverage).transpose()?;
    let root = settings.effective_root();

    let mut failed = 0;
    for (path, result) in load_sources(paths, &root, &settings.parser) {
        let mut file = match result {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(target: "cli", "skipping {}: {e}", path.display());
                eprintln!("Error: {e}");
                failed += 1;
                continue;
            }
        };
        if let Some(overlay) = &overlay {
            file.attach_coverage(overlay.covered_lines());
        }

        if json {
            println!("{}", serde_json::to_string_pretty(&file)?);
        } else {
            print_summary(&file, overlay.is_some());
        }
    }
    Ok(failed)
}

fn print_summary(file: &SourceFile, with_coverage: bool) {
    println!("{}: {file}", file.path().display());
    if let Some(package) = file.package() {
        println!("  package {package}");
    }
    for (_, import) in file.imports() {
        println!("  {import}");
    }
    let types = file.classes().chain(file.interfaces()).map(|(id, _)| id);
    for id in types {
        print_class(file, id, 1, with_coverage);
    }
    if with_coverage {
        if let Some(ratio) = file.covered_ratio() {
            println!("  coverage {:.1}% ({})", ratio * 100.0, file.coverage());
        }
    }
}

fn print_class(file: &SourceFile, id: ConstructId, depth: usize, with_coverage: bool) {
    let Some(class) = file.model.class(id) else {
        return;
    };
    let indent = "  ".repeat(depth);
    let name = file.qualified_name(id).unwrap_or_else(|| class.name.clone());
    print!("{indent}{class} [{name}]");
    print_lines(file, id, with_coverage);

    for field in class.fields.iter().filter_map(|f| file.model.field(*f)) {
        println!("{indent}  field {} {}", field.type_name, field.name);
    }
    for (method_id, method) in file.methods_of(id) {
        print!("{indent}  {method}");
        print_lines(file, method_id, with_coverage);
    }
    for nested in &class.classes {
        print_class(file, *nested, depth + 1, with_coverage);
    }
}

fn print_lines(file: &SourceFile, id: ConstructId, with_coverage: bool) {
    let lines = file.model.get(id).map(|construct| construct.lines());
    match lines.and_then(|range| range.start.zip(range.end)) {
        Some((start, end)) => print!(" lines {start}-{end}"),
        None => print!(" (no body)"),
    }
    if with_coverage {
        if let Some(ratio) = file.construct_covered_ratio(id) {
            print!(" covered {:.0}%", ratio * 100.0);
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coverage() {
        let overlay = parse_coverage("1, 4-5,7").unwrap();
        assert_eq!(overlay.to_string(), "1, 4-5, 7");
        assert!(parse_coverage("3-x").is_err());
        assert_eq!(parse_coverage("").unwrap().covered_lines_count(), 0);
    }
}
