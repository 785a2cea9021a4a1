//! End-to-end parsing of the Java fixtures under tests/data/java.

use inspector::model::{Access, Binding, ClassKind, Construct, SwitchLabel};
use inspector::parsing::{JavaParser, ParseEvent, TokenKind};
use inspector::{ParseError, ParserConfig, SourceFile, parse_java};
use std::path::Path;

const REGISTRY: &str = "src/com/acme/shapes/ShapeRegistry.java";
const SHAPE: &str = "src/com/acme/shapes/Shape.java";

fn fixture(relative: &str) -> SourceFile {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/java")
        .join(relative);
    let text = std::fs::read_to_string(&path).expect("fixture should exist");
    SourceFile::parse(relative, text, &ParserConfig::default()).expect("fixture should parse")
}

#[test]
fn test_registry_file_level_lists() {
    let file = fixture(REGISTRY);
    assert_eq!(file.to_string(), "Java SourceFile: 3 imports, 1 classes");
    assert_eq!(file.package(), Some("com.acme.shapes"));
    assert_eq!(file.module_path, "com.acme.shapes.ShapeRegistry");

    let imports: Vec<(String, bool)> = file
        .imports()
        .map(|(_, import)| (import.path.clone(), import.is_static))
        .collect();
    assert_eq!(
        imports,
        vec![
            ("java.util.ArrayList".to_string(), false),
            ("java.util.List".to_string(), false),
            ("java.lang.Math.PI".to_string(), true),
        ]
    );

    let comments: Vec<_> = file.comments().collect();
    assert_eq!(comments.len(), 1);
    assert!(comments[0].doc);
    assert_eq!(comments[0].content, "Keeps track of registered shapes.");
}

#[test]
fn test_registry_class_members() {
    let file = fixture(REGISTRY);
    let id = file.get_class("ShapeRegistry").unwrap();
    let class = file.model.class(id).unwrap();

    assert_eq!(class.access, Access::Public);
    assert!(class.is_subclass_of("BaseRegistry"));
    assert!(class.implements_interface("Iterable"));
    assert_eq!(class.starting_line(), Some(10));
    assert_eq!(class.ending_line(), Some(57));

    let fields: Vec<&str> = class
        .fields
        .iter()
        .filter_map(|f| file.model.field(*f))
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(fields, vec!["shapes", "created"]);

    let methods: Vec<&str> = file.methods_of(id).map(|(_, m)| m.name.as_str()).collect();
    assert_eq!(
        methods,
        vec!["ShapeRegistry", "register", "totalArea", "iterator", "circle"]
    );

    let constructor = file.model.method(file.get_method(id, "ShapeRegistry").unwrap()).unwrap();
    assert!(constructor.is_constructor());

    let circle = file.model.method(file.get_method(id, "circle").unwrap()).unwrap();
    assert_eq!(circle.binding, Binding::Static);
    assert_eq!(circle.access, Access::Package);
    assert_eq!(circle.to_string(), "package static Method circle(double r): double");
    assert_eq!(circle.starting_line(), Some(50));
    assert_eq!(circle.ending_line(), Some(52));
}

#[test]
fn test_registry_control_flow() {
    let file = fixture(REGISTRY);
    let id = file.get_class("ShapeRegistry").unwrap();

    let register = file.model.method(file.get_method(id, "register").unwrap()).unwrap();
    assert_eq!(register.body.statements.len(), 1);
    let Some(Construct::If(branch)) = file.model.get(register.body.statements[0]) else {
        panic!("expected an if block");
    };
    assert_eq!(branch.condition, "shape == null");
    assert_eq!(branch.elifs.len(), 1);
    assert_eq!(branch.elifs[0].condition, "shapes.contains(shape)");
    assert!(branch.else_block.is_some());
    assert_eq!(branch.lines.start, Some(19));
    assert_eq!(branch.lines.end, Some(25));

    let total = file.model.method(file.get_method(id, "totalArea").unwrap()).unwrap();
    assert_eq!(total.body.statements.len(), 3);
    let Some(Construct::For(for_loop)) = file.model.get(total.body.statements[1]) else {
        panic!("expected a for loop");
    };
    assert_eq!(for_loop.header, "Shape shape : shapes");
    assert_eq!(for_loop.block.statements.len(), 1);
}

#[test]
fn test_registry_anonymous_and_nested_types() {
    let file = fixture(REGISTRY);
    let id = file.get_class("ShapeRegistry").unwrap();
    let iterator_id = file.get_method(id, "iterator").unwrap();
    let iterator = file.model.method(iterator_id).unwrap();

    assert_eq!(iterator.body.statements.len(), 1);
    assert_eq!(iterator.nested_classes.len(), 1);
    let anonymous_id = iterator.nested_classes[0];
    let anonymous = file.model.class(anonymous_id).unwrap();
    assert_eq!(anonymous.kind, ClassKind::Anonymous);
    assert_eq!(anonymous.extends, vec!["Iterator"]);
    assert_eq!(anonymous.fields.len(), 1);
    assert_eq!(file.methods_of(anonymous_id).count(), 2);
    assert_eq!(
        file.qualified_name(anonymous_id).unwrap(),
        "com.acme.shapes.ShapeRegistry$1"
    );
    assert_eq!(
        file.qualified_name(file.get_method(anonymous_id, "hasNext").unwrap()).unwrap(),
        "com.acme.shapes.ShapeRegistry$1.hasNext"
    );

    let visitor = file.get_interface("Visitor").unwrap();
    assert_eq!(file.model.class(id).unwrap().classes, vec![visitor]);
    assert_eq!(
        file.qualified_name(visitor).unwrap(),
        "com.acme.shapes.ShapeRegistry.Visitor"
    );
    let visit = file.model.method(file.get_method(visitor, "visit").unwrap()).unwrap();
    assert!(visit.is_abstract());
    assert_eq!(visit.access, Access::Public);
}

#[test]
fn test_import_usages() {
    let file = fixture(REGISTRY);
    let usages: Vec<(String, Vec<u32>)> = file
        .imports()
        .map(|(id, import)| (import.imported_identifier().to_string(), file.find_usages(id)))
        .collect();
    assert_eq!(
        usages,
        vec![
            ("ArrayList".to_string(), vec![11]),
            ("List".to_string(), vec![11]),
            ("PI".to_string(), vec![51]),
        ]
    );
}

#[test]
fn test_interface_and_enum_file() {
    let file = fixture(SHAPE);
    assert_eq!(file.to_string(), "Java SourceFile: 1 classes, 1 interfaces");

    let shape = file.get_interface("Shape").unwrap();
    let class = file.model.class(shape).unwrap();
    assert_eq!(class.extends, vec!["Measurable", "Named"]);
    let abstract_methods: Vec<&str> = file
        .methods_of(shape)
        .filter(|(_, m)| m.is_abstract())
        .map(|(_, m)| m.name.as_str())
        .collect();
    assert_eq!(abstract_methods, vec!["area"]);
    let unit = file.model.method(file.get_method(shape, "unit").unwrap()).unwrap();
    assert_eq!(unit.binding, Binding::Static);

    let kind = file.get_class("Kind").unwrap();
    let kind_class = file.model.class(kind).unwrap();
    assert_eq!(kind_class.kind, ClassKind::Enum);
    assert_eq!(kind_class.enum_constants, vec!["SQUARE", "CIRCLE"]);
    assert_eq!(file.qualified_name(kind).unwrap(), "com.acme.shapes.Shape.Kind");

    let create = file.model.method(file.get_method(kind, "create").unwrap()).unwrap();
    let Some(Construct::Switch(switch)) = file.model.get(create.body.statements[0]) else {
        panic!("expected a switch");
    };
    assert_eq!(switch.selector, "this");
    assert_eq!(
        switch.labels,
        vec![SwitchLabel::Case("SQUARE".into()), SwitchLabel::Default]
    );
    assert_eq!(switch.case_block("SQUARE").unwrap().statements.len(), 1);
    assert_eq!(switch.default.as_ref().unwrap().statements.len(), 1);
}

#[test]
fn test_broken_file_reports_line() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/java/src/Broken.java");
    let text = std::fs::read_to_string(path).unwrap();
    let error = parse_java(&text).unwrap_err();
    assert!(matches!(error, ParseError::UnmatchedClosingBrace { line: 5 }));
    assert_eq!(error.line(), 5);
}

#[test]
fn test_incremental_tokens_and_events() {
    let text = "class A {\n  // hi\n  int x;\n}\n";
    let mut events = Vec::new();
    let mut parser = JavaParser::with_observer(text, |event: &ParseEvent<'_>| {
        if let ParseEvent::Attached { kind, .. } = event {
            events.push(kind.to_string());
        }
    });

    let mut kinds = Vec::new();
    while let Some(token) = parser.next_token().unwrap() {
        kinds.push(token.kind);
        if token.kind == TokenKind::Control {
            assert_eq!(parser.open_constructs().len(), 1);
        }
    }
    assert!(parser.open_constructs().is_empty());
    assert_eq!(
        kinds,
        vec![
            TokenKind::Control,
            TokenKind::Comment,
            TokenKind::Statement,
            TokenKind::EndControl,
        ]
    );
    assert_eq!(parser.next_token().unwrap(), None);
    drop(parser);
    assert_eq!(events.len(), 3);
}
