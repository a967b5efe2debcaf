//! Typed failures for each pipeline stage
//!
//! Every failure is deterministic in the input, so nothing here is retried. The crate level
//! [`Error`] wraps the stage errors for callers running the whole pipeline.
use crate::token::Token;
use thiserror::Error;

/// Failures while lexing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A token identifier named a kind outside the vocabulary
    #[error("unsupported token kind '{0}'")]
    UnsupportedTokenKind(String),
    /// A control sequence has no entry in the command table
    #[error("unknown function '{name}' at offset {offset}")]
    UnknownFunction {
        /// The unresolved control sequence
        name: String,
        /// Byte offset in the original input
        offset: usize,
    },
    /// Characters that no pass could consume
    #[error("unrecognized input '{residue}' at offset {offset}")]
    UnrecognizedInput {
        /// The leftover characters, whitespace removed
        residue: String,
        /// Byte offset of the first leftover character in the original input
        offset: usize,
    },
}

/// Failures while converting infix tokens to RPN
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The sequence isn't wrapped in an outer bracket pair
    #[error("expression is not wrapped in outer parentheses")]
    MissingOuterParentheses,
    /// A closing bracket with no opening bracket left on the stack
    #[error("closing parenthesis at token {position} has no matching opening parenthesis")]
    MismatchedParentheses {
        /// Index of the closing bracket in the infix sequence
        position: usize,
    },
    /// Operators or opening brackets were left on the stack
    #[error("{} operator(s) left on the stack", remaining.len())]
    UnbalancedOperators {
        /// The stack contents, bottom first
        remaining: Vec<Token>,
    },
}

/// Failures while building an AST from RPN
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Leaf and operator counts don't form one tree
    #[error("malformed RPN sequence: {0}")]
    MalformedRpnSequence(String),
    /// An operator whose resolved name has no arity entry
    #[error("unknown arity for operator {token} ('{name}')")]
    UnknownOperatorArity {
        /// The operator token
        token: Token,
        /// Its resolved name, or the token itself when unresolved
        name: String,
    },
    /// Operators nested past the builder's limit
    #[error("operators nested deeper than {limit} levels")]
    NestingTooDeep {
        /// The deepest nesting accepted
        limit: usize,
    },
}

/// Any pipeline failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Lexing failed
    #[error(transparent)]
    Lex(#[from] LexError),
    /// Shunting-yard conversion failed
    #[error(transparent)]
    Convert(#[from] ConvertError),
    /// AST construction failed
    #[error(transparent)]
    Build(#[from] BuildError),
}
