//! Abstract Syntax Tree types for definition sources

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A declared or referenced name, as written (angle brackets removed)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Root of a parsed source file
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub definitions: Vec<Spanned<DefinitionDecl>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Text,
    Macro,
}

/// `text name(params) { ... }` or `macro name(params) no_eol? { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionDecl {
    pub kind: DeclKind,
    pub name: Spanned<Identifier>,
    pub params: Vec<Spanned<ParamDecl>>,
    pub no_eol: bool,
    pub body: Vec<Spanned<BodyItem>>,
}

/// `name` or `name from source`
#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub name: Spanned<Identifier>,
    pub source: Option<Spanned<Identifier>>,
}

/// Argument of an `expand` item
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentExpr {
    Literal(String),
    Param(Spanned<Identifier>),
}

/// `key: "value"` inside a slot option block
#[derive(Debug, Clone, PartialEq)]
pub struct SlotOption {
    pub key: Spanned<Identifier>,
    pub value: Spanned<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyItem {
    Text(String),
    Eol,
    Var(Spanned<Identifier>),
    Insert {
        name: Spanned<Identifier>,
        optional: bool,
    },
    Expand {
        target: Spanned<Identifier>,
        args: Vec<ArgumentExpr>,
    },
    Slot {
        targets: Vec<Spanned<Identifier>>,
        options: Vec<Spanned<SlotOption>>,
    },
    /// `indent "prefix" { ... }`: every line rendered by the block gets `prefix`
    Indent {
        prefix: Spanned<String>,
        body: Vec<Spanned<BodyItem>>,
    },
}
