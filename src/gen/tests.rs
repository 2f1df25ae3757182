//! Unit tests for the emission buffers.

use std::fmt::Write;

use super::gen::{c_type, Emitter, Text};
use crate::symbols::symbols::Type;

#[test]
fn test_text_add_and_clear() {
    let mut text = Text::new();
    assert!(text.is_empty());

    text.add("int x;\n");
    text.add("int y;\n");
    assert_eq!(text.as_str(), "int x;\nint y;\n");

    text.clear();
    assert!(text.is_empty());
    assert_eq!(text.as_str(), "");
}

#[test]
fn test_text_accepts_write_macro() {
    let mut text = Text::new();
    write!(text, "{} {};\n", c_type(Type::Real), "r").unwrap();
    assert_eq!(text.as_str(), "double r;\n");
}

#[test]
fn test_sink_switching() {
    let mut emitter = Emitter::new();

    emitter.vars().add("int g;\n");
    emitter.code().add("g = 1;\n");
    assert_eq!(emitter.begin.as_str(), "int g;\n");
    assert_eq!(emitter.main_code.as_str(), "g = 1;\n");
    assert!(emitter.functions.is_empty());

    emitter.enter_function();
    assert!(emitter.in_function());
    emitter.code().add("int f(int a){\n");
    emitter.vars().add("int local;\n");
    emitter.code().add("}\n");
    emitter.leave_function();
    assert!(!emitter.in_function());

    assert_eq!(emitter.functions.as_str(), "int f(int a){\nint local;\n}\n");
    // the global buffers were not touched while inside the function
    assert_eq!(emitter.begin.as_str(), "int g;\n");
    assert_eq!(emitter.main_code.as_str(), "g = 1;\n");
}

#[test]
fn test_assemble_orders_sections() {
    let mut emitter = Emitter::new();
    emitter.begin.add("#include \"quick.h\"\n\nint g;\n");
    emitter.functions.add("int f(){\n}\n\n");
    emitter.main_code.add("g = 1;\n");

    let out = emitter.assemble();
    assert_eq!(
        out,
        "#include \"quick.h\"\n\nint g;\nint f(){\n}\n\nint main(){\ng = 1;\nreturn 0;\n}\n"
    );
}

#[test]
fn test_assemble_empty_run() {
    let emitter = Emitter::new();
    assert_eq!(emitter.assemble(), "int main(){\nreturn 0;\n}\n");
}

#[test]
fn test_c_type_names() {
    assert_eq!(c_type(Type::Int), "int");
    assert_eq!(c_type(Type::Real), "double");
    assert_eq!(c_type(Type::Str), "str");
}
