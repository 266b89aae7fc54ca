//! Abstract Syntax Tree (AST) definitions for the Slate language.

use slate_core::Span;
use std::fmt;

/// A complete Slate program: one module per source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Module name from the `module` header.
    pub module: String,
    /// Import declarations following the header.
    pub imports: Vec<Import>,
    /// Top-level statements, function declarations included.
    pub block: Block,
    pub span: Span,
}

/// An import declaration: `import name`.
///
/// Imports are recorded on the AST but not resolved; they carry no
/// semantics beyond their presence.
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub name: String,
    pub span: Span,
}

/// A sequence of statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

/// Statements in the Slate language.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An expression evaluated for its effect: `println(42)`
    Expression { expression: Expression, span: Span },

    /// A return statement: `return expr`
    Return { value: Expression, span: Span },

    /// A comment: `# text`
    ///
    /// Comments are first-class statements rather than lexer trivia.
    Comment { text: String, span: Span },

    /// A variable declaration: `var name: type = expr`
    VariableDeclaration {
        name: String,
        /// Recorded but not enforced; every variable is a 64-bit integer.
        annotation: Option<String>,
        initializer: Option<Expression>,
        span: Span,
    },

    /// A function declaration: `function name = |params| { ... }`
    Function(FunctionDecl),
}

impl Statement {
    /// Returns the source span of this statement.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Expression { span, .. }
            | Self::Return { span, .. }
            | Self::Comment { span, .. }
            | Self::VariableDeclaration { span, .. } => *span,
            Self::Function(decl) => decl.span,
        }
    }
}

/// A function declaration.
///
/// Parameters and return values are all 64-bit integers; the parameter
/// annotations exist for the reader, not the compiler.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Parameter>,
    pub body: Block,
    /// True unless the declaration is marked `local`.
    pub external: bool,
    pub span: Span,
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    /// Recorded but not enforced; every parameter is a 64-bit integer.
    pub annotation: Option<String>,
    pub span: Span,
}

/// Expressions in the Slate language.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Integer literal: `42`
    Integer { value: i64, span: Span },

    /// Float literal: `3.14`
    Float { value: f64, span: Span },

    /// String literal: `"hello"`
    String { value: String, span: Span },

    /// Variable reference: `x`
    Variable { name: String, span: Span },

    /// Binary operation: `left op right`
    Binary {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
        span: Span,
    },

    /// Function call: `callee(args)`
    Call {
        callee: String,
        arguments: Vec<Expression>,
        span: Span,
    },

    /// Assignment: `target = value`
    Assign {
        target: String,
        value: Box<Expression>,
        span: Span,
    },
}

impl Expression {
    /// Returns the source span of this expression.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Integer { span, .. }
            | Self::Float { span, .. }
            | Self::String { span, .. }
            | Self::Variable { span, .. }
            | Self::Binary { span, .. }
            | Self::Call { span, .. }
            | Self::Assign { span, .. } => *span,
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl BinaryOperator {
    /// Returns the source symbol for this operator.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
