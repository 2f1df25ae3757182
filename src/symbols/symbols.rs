use std::fmt::Display;

/// A static type of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Int,
    Real,
    Str,
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Real => write!(f, "real"),
            Type::Str => write!(f, "str"),
        }
    }
}

/// The value descriptor of an expression: its static type and whether it
/// denotes an assignable location. Every expression rule returns one; it is
/// only meaningful immediately after a successful sub-parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ret {
    pub ty: Type,
    pub lval: bool,
}

impl Ret {
    /// A result that denotes an assignable location.
    pub fn lval(ty: Type) -> Ret {
        Ret { ty, lval: true }
    }

    /// A plain value result.
    pub fn rval(ty: Type) -> Ret {
        Ret { ty, lval: false }
    }
}

/// Stable handle to a symbol in the table's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolId(u32);

/// An ordered function parameter, owned by its function symbol. The
/// parameter list dies with the function symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

/// The kind-specific payload of a symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Variable { is_local: bool },
    Parameter,
    Function { params: Vec<Param> },
}

/// A named, typed declaration. For functions `ty` is the return type.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn is_function(&self) -> bool {
        matches!(self.kind, SymbolKind::Function { .. })
    }
}

/// The symbol table: an arena of symbols plus a stack of domain start
/// indices. The current domain is the arena range from the top start index
/// to the end of the arena, so closing a scope is a truncation and a
/// reverse scan of the arena visits declarations innermost first.
#[derive(Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    domains: Vec<usize>,
}

impl SymbolTable {
    /// Creates an empty table with no open domain. The caller opens the
    /// program-level domain before declaring anything.
    pub fn new() -> SymbolTable {
        SymbolTable {
            symbols: Vec::new(),
            domains: Vec::new(),
        }
    }

    /// Pushes a new, empty domain as the current one.
    pub fn open_scope(&mut self) {
        self.domains.push(self.symbols.len());
    }

    /// Pops the current domain, dropping every symbol it owns. Calls are
    /// balanced with `open_scope` by construction; an unbalanced call is a
    /// programming error.
    pub fn close_scope(&mut self) {
        debug_assert!(!self.domains.is_empty(), "close_scope with no open domain");
        if let Some(start) = self.domains.pop() {
            self.symbols.truncate(start);
        }
    }

    /// The number of open domains.
    pub fn depth(&self) -> usize {
        self.domains.len()
    }

    /// Adds a symbol to the current domain. The caller checks for
    /// duplicates with `lookup_local` first; no check happens here.
    pub fn declare(&mut self, name: &str, ty: Type, kind: SymbolKind) -> SymbolId {
        debug_assert!(!self.domains.is_empty(), "declare with no open domain");
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            name: name.to_string(),
            ty,
            kind,
        });
        id
    }

    /// Searches a name in the current domain only, most recent first.
    pub fn lookup_local(&self, name: &str) -> Option<SymbolId> {
        let start = *self.domains.last()?;
        self.symbols[start..]
            .iter()
            .rposition(|symbol| symbol.name == name)
            .map(|offset| SymbolId((start + offset) as u32))
    }

    /// Searches a name in all open domains, innermost declaration first.
    /// An inner declaration hides an outer one of the same name.
    pub fn lookup_visible(&self, name: &str) -> Option<SymbolId> {
        self.symbols
            .iter()
            .rposition(|symbol| symbol.name == name)
            .map(|index| SymbolId(index as u32))
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }

    /// Appends a parameter to a function symbol's ordered parameter list.
    pub fn attach_param(&mut self, function: SymbolId, name: &str, ty: Type) {
        match &mut self.symbols[function.0 as usize].kind {
            SymbolKind::Function { params } => params.push(Param {
                name: name.to_string(),
                ty,
            }),
            _ => debug_assert!(false, "attach_param on a non-function symbol"),
        }
    }

    /// The symbols of the current domain, in declaration order.
    pub fn current_domain(&self) -> &[Symbol] {
        match self.domains.last() {
            Some(&start) => &self.symbols[start..],
            None => &[],
        }
    }

    /// Seeds the current domain with the predefined output functions, so
    /// programs can produce output without declaring externs.
    pub fn add_builtins(&mut self) {
        self.add_builtin_fn1("puti", Type::Int, Type::Int);
        self.add_builtin_fn1("putr", Type::Real, Type::Real);
        self.add_builtin_fn1("puts", Type::Str, Type::Str);
    }

    // a predefined function with one argument
    fn add_builtin_fn1(&mut self, name: &str, arg_ty: Type, ret_ty: Type) {
        let function = self.declare(name, ret_ty, SymbolKind::Function { params: Vec::new() });
        self.attach_param(function, "arg", arg_ty);
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
