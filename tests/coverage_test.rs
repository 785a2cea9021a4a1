//! Coverage overlay on parsed files.

use inspector::model::CoverageOverlay;
use inspector::{ParserConfig, SourceFile};

const SOURCE: &str = "class Counter {\n\
    \x20   private int value;\n\
    \n\
    \x20   void increment() {\n\
    \x20       value++;\n\
    \x20       log();\n\
    \x20   }\n\
    \n\
    \x20   int get() {\n\
    \x20       return value;\n\
    \x20   }\n\
    }\n";

fn counter() -> SourceFile {
    SourceFile::parse("Counter.java", SOURCE, &ParserConfig::default()).unwrap()
}

#[test]
fn test_file_and_construct_ratios() {
    let mut file = counter();
    assert_eq!(file.line_count(), 12);
    assert_eq!(file.covered_ratio(), Some(0.0));

    file.attach_coverage([4, 5, 6]);
    assert_eq!(file.covered_ratio(), Some(3.0 / 12.0));

    let class = file.get_class("Counter").unwrap();
    let increment = file.get_method(class, "increment").unwrap();
    let get = file.get_method(class, "get").unwrap();
    assert_eq!(file.construct_covered_ratio(increment), Some(3.0 / 4.0));
    assert_eq!(file.construct_covered_ratio(get), Some(0.0));
    assert_eq!(file.construct_covered_ratio(class), Some(3.0 / 12.0));
}

#[test]
fn test_attach_is_a_union() {
    let mut file = counter();
    file.attach_coverage([5, 6]);
    file.attach_coverage([6, 10]);
    file.attach_coverage([6]);
    assert_eq!(file.coverage().covered_lines_count(), 3);
    assert_eq!(file.coverage().to_string(), "5-6, 10");
}

#[test]
fn test_overlay_ranges() {
    let mut overlay = CoverageOverlay::new();
    assert_eq!(overlay.to_string(), "-");
    assert!(overlay.cover_range("50-74"));
    assert!(overlay.cover_range(" 4 - 5 "));
    assert!(overlay.cover_range("1"));
    overlay.cover_line(7);
    assert!(!overlay.cover_range("9-3"));
    assert!(!overlay.cover_range("abc"));
    assert_eq!(overlay.to_string(), "1, 4-5, 7, 50-74");
    assert_eq!(overlay.covered_lines_count(), 29);
    assert!(overlay.is_covered(60));
    assert!(!overlay.is_covered(8));
}

#[test]
fn test_coverage_serializes_with_the_model() {
    let mut file = counter();
    file.attach_coverage([5]);
    let json = serde_json::to_value(&file).unwrap();
    assert_eq!(json["path"], "Counter.java");
    assert_eq!(json["coverage"]["covered"], serde_json::json!([5]));
    assert_eq!(json["classes"].as_array().unwrap().len(), 1);
    assert!(json.get("text").is_none());
}
