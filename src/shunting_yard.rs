//! Infix to RPN conversion driven only by explicit grouping
//!
//! There is no precedence table. Operators wait on the stack until the bracket that encloses them
//! closes, so the input has to be fully parenthesized for the output to mean anything.
use crate::error::ConvertError;
use crate::token::{Kind, Token};
use log::debug;

/// Convert a fully parenthesized infix token sequence to RPN
///
/// # Errors
/// - [`MissingOuterParentheses`][ConvertError::MissingOuterParentheses] when the sequence doesn't
///   start with `LPAREN` and end with `RPAREN` (including when it's empty)
/// - [`MismatchedParentheses`][ConvertError::MismatchedParentheses] when a `RPAREN` finds no
///   `LPAREN` on the stack
/// - [`UnbalancedOperators`][ConvertError::UnbalancedOperators] when anything is left on the stack
///
/// # Example
/// ```
/// use latex_rpn::{shunting_yard, Lexer};
///
/// let lexed = Lexer::new().lex("((1+3)*(2+4))").unwrap();
/// let rpn = shunting_yard::convert(lexed.tokens()).unwrap();
/// let names: Vec<_> = rpn.iter().map(|t| lexed.symbols().resolve(t)).collect();
/// assert_eq!(names, ["1", "3", "+", "2", "4", "+", "*"]);
/// ```
pub fn convert(tokens: &[Token]) -> Result<Vec<Token>, ConvertError> {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last))
            if first.kind() == Kind::LParen && last.kind() == Kind::RParen => {}
        _ => return Err(ConvertError::MissingOuterParentheses),
    }

    let mut output = Vec::with_capacity(tokens.len());
    let mut stack = Vec::new();
    for (position, &token) in tokens.iter().enumerate() {
        match token.kind() {
            Kind::Constant | Kind::Variable => output.push(token),
            Kind::BinaryInfixOp | Kind::UnaryPrefixOp | Kind::Function | Kind::LParen => {
                stack.push(token)
            }
            Kind::RParen => loop {
                match stack.pop() {
                    Some(open) if open.kind() == Kind::LParen => break,
                    Some(op) => output.push(op),
                    None => return Err(ConvertError::MismatchedParentheses { position }),
                }
            },
        }
    }
    if !stack.is_empty() {
        return Err(ConvertError::UnbalancedOperators { remaining: stack });
    }
    debug!("converted {} infix token(s) to {} RPN", tokens.len(), output.len());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::convert;
    use crate::error::ConvertError;
    use crate::token::{Kind, Token};

    fn tokens(idents: &[&str]) -> Vec<Token> {
        idents.iter().map(|ident| ident.parse().unwrap()).collect()
    }

    #[test]
    fn grouped_products() {
        // ((1+3)*(2+4))
        let infix = tokens(&[
            "LPAREN",
            "LPAREN",
            "CONSTANT_1",
            "BINARY_INFIX_OP_1",
            "CONSTANT_2",
            "RPAREN",
            "BINARY_INFIX_OP_2",
            "LPAREN",
            "CONSTANT_3",
            "BINARY_INFIX_OP_3",
            "CONSTANT_4",
            "RPAREN",
            "RPAREN",
        ]);
        let expected = tokens(&[
            "CONSTANT_1",
            "CONSTANT_2",
            "BINARY_INFIX_OP_1",
            "CONSTANT_3",
            "CONSTANT_4",
            "BINARY_INFIX_OP_3",
            "BINARY_INFIX_OP_2",
        ]);
        assert_eq!(convert(&infix).unwrap(), expected);
    }

    #[test]
    fn function_waits_for_enclosing_group() {
        // (FUNCTION (x))
        let infix = tokens(&[
            "LPAREN",
            "FUNCTION_1",
            "LPAREN",
            "VARIABLE_1",
            "RPAREN",
            "RPAREN",
        ]);
        assert_eq!(
            convert(&infix).unwrap(),
            tokens(&["VARIABLE_1", "FUNCTION_1"])
        );
    }

    #[test]
    fn no_brackets_in_output() {
        let infix = tokens(&[
            "LPAREN",
            "UNARY_PREFIX_OP_1",
            "LPAREN",
            "VARIABLE_1",
            "RPAREN",
            "RPAREN",
        ]);
        let rpn = convert(&infix).unwrap();
        assert!(rpn.iter().all(|t| !t.kind().is_paren()));
        assert_eq!(rpn.len(), 2);
    }

    #[test]
    fn missing_outer_parentheses() {
        assert_eq!(convert(&[]), Err(ConvertError::MissingOuterParentheses));
        let infix = tokens(&["LPAREN", "CONSTANT_1", "BINARY_INFIX_OP_1", "CONSTANT_2"]);
        assert_eq!(convert(&infix), Err(ConvertError::MissingOuterParentheses));
        let infix = tokens(&["CONSTANT_1", "RPAREN"]);
        assert_eq!(convert(&infix), Err(ConvertError::MissingOuterParentheses));
    }

    #[test]
    fn mismatched_parentheses() {
        let infix = tokens(&["LPAREN", "CONSTANT_1", "RPAREN", "RPAREN"]);
        assert_eq!(
            convert(&infix),
            Err(ConvertError::MismatchedParentheses { position: 3 })
        );
    }

    #[test]
    fn unbalanced_operators() {
        let infix = tokens(&["LPAREN", "LPAREN", "CONSTANT_1", "RPAREN"]);
        assert_eq!(
            convert(&infix),
            Err(ConvertError::UnbalancedOperators {
                remaining: vec![Token::bare(Kind::LParen)]
            })
        );
    }
}
