//! The tree built from an RPN sequence
//!
//! - [`Node`] - a leaf token or an operator applied to its operands
//! - [`UnaryOp`] - a function or negation owning one child
//! - [`BinaryOp`] - an infix operator owning a left and right child
//! - [`Ast`] - a root node together with the symbol table naming its tokens
//!
//! Nodes only hold tokens. Use the [`SymbolTable`] of the lexing run to get their names, or render
//! an [`Ast`], which prints as an s-expression.
use crate::lexer::SymbolTable;
use crate::token::Token;
use std::fmt;

/// An operator with one operand like `sin` or `neg`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryOp {
    /// The operator token
    pub op: Token,
    arg: Box<Node>,
}

impl UnaryOp {
    /// Create a unary node from its operator and operand
    pub fn new<N>(op: Token, arg: N) -> Self
    where
        N: Into<Node>,
    {
        UnaryOp {
            op,
            arg: Box::new(arg.into()),
        }
    }

    /// The operand
    pub fn arg(&self) -> &Node {
        &self.arg
    }
}

/// An operator with two operands like `+` or `expt`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryOp {
    /// The operator token
    pub op: Token,
    left: Box<Node>,
    right: Box<Node>,
}

impl BinaryOp {
    /// Create a binary node from its operator and both operands
    pub fn new<L, R>(op: Token, left: L, right: R) -> Self
    where
        L: Into<Node>,
        R: Into<Node>,
    {
        BinaryOp {
            op,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    /// The left operand
    pub fn left(&self) -> &Node {
        &self.left
    }

    /// The right operand
    pub fn right(&self) -> &Node {
        &self.right
    }
}

/// A node of the expression tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A constant or variable
    Leaf(Token),
    /// A unary operator applied to a subtree
    Unary(UnaryOp),
    /// A binary operator applied to two subtrees
    Binary(BinaryOp),
}

impl Node {
    /// The token at this node
    pub fn token(&self) -> Token {
        match self {
            Node::Leaf(token) => *token,
            Node::Unary(unary) => unary.op,
            Node::Binary(binary) => binary.op,
        }
    }

    /// Number of leaves below and including this node
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Unary(unary) => unary.arg.leaf_count(),
            Node::Binary(binary) => binary.left.leaf_count() + binary.right.leaf_count(),
        }
    }

    /// Number of operator nodes below and including this node
    pub fn interior_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Unary(unary) => 1 + unary.arg.interior_count(),
            Node::Binary(binary) => {
                1 + binary.left.interior_count() + binary.right.interior_count()
            }
        }
    }

    /// Display this subtree as an s-expression using `symbols` for names
    pub fn display<'a>(&'a self, symbols: &'a SymbolTable) -> impl fmt::Display + 'a {
        Sexp {
            node: self,
            symbols,
        }
    }
}

impl From<Token> for Node {
    fn from(token: Token) -> Self {
        Node::Leaf(token)
    }
}

macro_rules! node_from {
    ($from:ty => $to:ident) => {
        impl From<$from> for Node {
            fn from(inp: $from) -> Self {
                Node::$to(inp)
            }
        }
    };
}

node_from!(UnaryOp => Unary);
node_from!(BinaryOp => Binary);

struct Sexp<'a> {
    node: &'a Node,
    symbols: &'a SymbolTable,
}

impl fmt::Display for Sexp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.symbols.resolve(&self.node.token());
        match self.node {
            Node::Leaf(_) => write!(f, "{name}"),
            Node::Unary(unary) => write!(f, "({name} {})", unary.arg.display(self.symbols)),
            Node::Binary(binary) => write!(
                f,
                "({name} {} {})",
                binary.left.display(self.symbols),
                binary.right.display(self.symbols)
            ),
        }
    }
}

/// A built tree and the names of its tokens
///
/// # Example
/// ```
/// let ast = latex_rpn::to_ast(r"(((3*\sin(\pi^2))+1)/2)").unwrap();
/// assert_eq!(ast.to_string(), r"(/ (+ (* 3 (sin (expt \pi 2))) 1) 2)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    /// The root node
    pub root: Node,
    /// Names for the tokens in the tree
    pub symbols: SymbolTable,
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root.display(&self.symbols))
    }
}
