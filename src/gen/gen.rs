use std::fmt;

use crate::symbols::symbols::Type;

/// A growable text sink in which generated chars are written.
#[derive(Debug, Clone, Default)]
pub struct Text {
    buf: String,
}

impl Text {
    pub fn new() -> Text {
        Text { buf: String::new() }
    }

    /// Appends chars to the buffer.
    pub fn add(&mut self, chars: &str) {
        self.buf.push_str(chars);
    }

    /// Deletes the chars from the buffer.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl fmt::Write for Text {
    fn write_str(&mut self, chars: &str) -> fmt::Result {
        self.add(chars);
        Ok(())
    }
}

/// The output buffers of a run, with the current-sink selection.
///
/// `begin` receives the header and global variable declarations,
/// `main_code` the global statement code (the body of the C `main`),
/// `functions` the function definitions and `fn_header` is scratch space
/// used while a function header is assembled (the return type is only
/// known after the parameter list has been parsed). While a function body
/// is parsed both current sinks point at `functions`.
#[derive(Debug, Default)]
pub struct Emitter {
    pub begin: Text,
    pub main_code: Text,
    pub functions: Text,
    pub fn_header: Text,
    in_function: bool,
}

impl Emitter {
    pub fn new() -> Emitter {
        Emitter::default()
    }

    /// Points the current sinks at the function buffers.
    pub fn enter_function(&mut self) {
        self.in_function = true;
    }

    /// Points the current sinks back at the global buffers.
    pub fn leave_function(&mut self) {
        self.in_function = false;
    }

    pub fn in_function(&self) -> bool {
        self.in_function
    }

    /// The sink for generated code in the current context.
    pub fn code(&mut self) -> &mut Text {
        if self.in_function {
            &mut self.functions
        } else {
            &mut self.main_code
        }
    }

    /// The sink for variable declarations in the current context.
    pub fn vars(&mut self) -> &mut Text {
        if self.in_function {
            &mut self.functions
        } else {
            &mut self.begin
        }
    }

    /// Assembles the output file content: the header and globals, the
    /// function definitions, then the global code wrapped in a C `main`.
    pub fn assemble(&self) -> String {
        let mut out = String::new();
        out.push_str(self.begin.as_str());
        out.push_str(self.functions.as_str());
        out.push_str("int main(){\n");
        out.push_str(self.main_code.as_str());
        out.push_str("return 0;\n}\n");
        out
    }
}

/// The C name for a type of the source language.
pub fn c_type(ty: Type) -> &'static str {
    match ty {
        Type::Int => "int",
        Type::Real => "double",
        Type::Str => "str",
    }
}
