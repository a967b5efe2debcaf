use crate::build::Builder;
use crate::error::Error;
use crate::lexer::{Lexer, SymbolTable};
use crate::shunting_yard;
use crate::token::Token;
use crate::tree::Ast;
use std::fmt;

/// An RPN sequence and the names of its tokens
///
/// Displays as the space separated names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rpn {
    /// Tokens in postfix order, never brackets
    pub tokens: Vec<Token>,
    /// Names for the tokens
    pub symbols: SymbolTable,
}

impl fmt::Display for Rpn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, token) in self.tokens.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&self.symbols.resolve(token))?;
        }
        Ok(())
    }
}

/// Lex and convert a fully parenthesized expression to RPN
///
/// This uses the default command table [`LATEX_COMMANDS`][crate::LATEX_COMMANDS].
///
/// ```
/// let rpn = latex_rpn::parse("((1+3)*(2+4))").unwrap();
/// assert_eq!(rpn.to_string(), "1 3 + 2 4 + *");
/// ```
pub fn parse(inp: &str) -> Result<Rpn, Error> {
    let (tokens, symbols) = Lexer::new().lex(inp)?.into_parts();
    let tokens = shunting_yard::convert(&tokens)?;
    Ok(Rpn { tokens, symbols })
}

/// Lex, convert and build the tree of a fully parenthesized expression
///
/// This uses the default tables [`LATEX_COMMANDS`][crate::LATEX_COMMANDS] and
/// [`OPERATOR_ARITIES`][crate::OPERATOR_ARITIES].
pub fn to_ast(inp: &str) -> Result<Ast, Error> {
    let Rpn { tokens, symbols } = parse(inp)?;
    let root = Builder::new().build(&tokens, &symbols)?;
    Ok(Ast { root, symbols })
}
