//! Generic tokens minted by the lexer
//!
//! A token is only a kind and an ordinal, e.g. `VARIABLE_2`. What it stands for lives in the
//! [`SymbolTable`][crate::SymbolTable] of the lexing run that minted it.
use crate::error::LexError;
use std::fmt;
use std::str::FromStr;

/// The category of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// A digit run
    Constant,
    /// A letter run with an optional subscript, or a letter-like command such as `\pi`
    Variable,
    /// An infix operator like `+` or `^`
    BinaryInfixOp,
    /// A prefix operator, currently only negation
    UnaryPrefixOp,
    /// A function command like `\sin`
    Function,
    /// An opening bracket, any of `( [ {`
    LParen,
    /// A closing bracket, any of `) ] }`
    RParen,
}

impl Kind {
    /// The spelling used in token identifiers
    pub fn name(self) -> &'static str {
        match self {
            Kind::Constant => "CONSTANT",
            Kind::Variable => "VARIABLE",
            Kind::BinaryInfixOp => "BINARY_INFIX_OP",
            Kind::UnaryPrefixOp => "UNARY_PREFIX_OP",
            Kind::Function => "FUNCTION",
            Kind::LParen => "LPAREN",
            Kind::RParen => "RPAREN",
        }
    }

    /// Whether tokens of this kind are leaves
    pub fn is_operand(self) -> bool {
        matches!(self, Kind::Constant | Kind::Variable)
    }

    /// Whether tokens of this kind apply to operands
    pub fn is_operator(self) -> bool {
        matches!(self, Kind::BinaryInfixOp | Kind::UnaryPrefixOp | Kind::Function)
    }

    /// Whether this is either bracket kind
    pub fn is_paren(self) -> bool {
        matches!(self, Kind::LParen | Kind::RParen)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = LexError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name {
            "CONSTANT" => Kind::Constant,
            "VARIABLE" => Kind::Variable,
            "BINARY_INFIX_OP" => Kind::BinaryInfixOp,
            "UNARY_PREFIX_OP" => Kind::UnaryPrefixOp,
            "FUNCTION" => Kind::Function,
            "LPAREN" => Kind::LParen,
            "RPAREN" => Kind::RParen,
            other => return Err(LexError::UnsupportedTokenKind(other.to_owned())),
        })
    }
}

/// An opaque token, `<KIND>_<ordinal>`
///
/// Ordinals count from 1 per kind within one lexing run. Brackets handed out in the lexer's token
/// list are bare (no ordinal) since grouping is positional.
///
/// # Example
/// ```
/// use latex_rpn::{Kind, Token};
///
/// let token: Token = "BINARY_INFIX_OP_3".parse().unwrap();
/// assert_eq!(token, Token::new(Kind::BinaryInfixOp, 3));
/// assert_eq!(Token::bare(Kind::LParen).to_string(), "LPAREN");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token {
    kind: Kind,
    ordinal: Option<u32>,
}

impl Token {
    /// A numbered token
    pub fn new(kind: Kind, ordinal: u32) -> Self {
        Token {
            kind,
            ordinal: Some(ordinal),
        }
    }

    /// A token without an ordinal
    pub fn bare(kind: Kind) -> Self {
        Token {
            kind,
            ordinal: None,
        }
    }

    /// The token kind
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The per-kind ordinal, if this isn't a bare token
    pub fn ordinal(&self) -> Option<u32> {
        self.ordinal
    }

    /// This token with its ordinal dropped
    pub fn collapsed(self) -> Self {
        Token::bare(self.kind)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ordinal {
            Some(ordinal) => write!(f, "{}_{}", self.kind, ordinal),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl FromStr for Token {
    type Err = LexError;

    fn from_str(ident: &str) -> Result<Self, Self::Err> {
        if let Some((kind, ordinal)) = ident.rsplit_once('_') {
            if let Ok(ordinal) = ordinal.parse() {
                return Ok(Token::new(kind.parse()?, ordinal));
            }
        }
        // only brackets exist without an ordinal
        match ident.parse()? {
            kind @ (Kind::LParen | Kind::RParen) => Ok(Token::bare(kind)),
            _ => Err(LexError::UnsupportedTokenKind(ident.to_owned())),
        }
    }
}

/// Per-kind ordinal counters for one lexing run
#[derive(Debug, Default, Clone)]
pub(crate) struct Mint {
    counts: [u32; 7],
}

impl Mint {
    /// Mint the next token of a kind
    pub(crate) fn next(&mut self, kind: Kind) -> Token {
        let count = &mut self.counts[kind as usize];
        *count += 1;
        Token::new(kind, *count)
    }
}

#[cfg(test)]
mod tests {
    use super::{Kind, Mint, Token};
    use crate::error::LexError;

    #[test]
    fn ordinals_count_per_kind() {
        let mut mint = Mint::default();
        assert_eq!(mint.next(Kind::Constant).to_string(), "CONSTANT_1");
        assert_eq!(mint.next(Kind::Variable).to_string(), "VARIABLE_1");
        assert_eq!(mint.next(Kind::Constant).to_string(), "CONSTANT_2");
        assert_eq!(
            mint.next(Kind::UnaryPrefixOp).to_string(),
            "UNARY_PREFIX_OP_1"
        );
    }

    #[test]
    fn identifiers_parse() {
        for ident in ["CONSTANT_12", "BINARY_INFIX_OP_1", "FUNCTION_3", "LPAREN", "RPAREN_4"] {
            let token: Token = ident.parse().unwrap();
            assert_eq!(token.to_string(), ident);
        }
    }

    #[test]
    fn unsupported_kinds() {
        assert_eq!(
            "BINOP_PRFIX_1".parse::<Token>(),
            Err(LexError::UnsupportedTokenKind("BINOP_PRFIX".into()))
        );
        assert_eq!(
            "VARIABLE".parse::<Token>(),
            Err(LexError::UnsupportedTokenKind("VARIABLE".into()))
        );
        assert!("".parse::<Token>().is_err());
    }

    #[test]
    fn collapse_keeps_kind() {
        let token = Token::new(Kind::RParen, 7);
        assert_eq!(token.collapsed(), Token::bare(Kind::RParen));
        assert_eq!(token.collapsed().ordinal(), None);
    }
}
