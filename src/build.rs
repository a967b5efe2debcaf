use crate::error::BuildError;
use crate::lexer::SymbolTable;
#[cfg(not(feature = "qp-trie"))]
use crate::prefix_map::HashPrefixMap;
use crate::prefix_map::PrefixMap;
#[cfg(feature = "qp-trie")]
use crate::prefix_map::QpTriePrefixMap;
use crate::token::Token;
use crate::tree::{BinaryOp, Node, UnaryOp};
use lazy_static::lazy_static;
use log::trace;

/// How many operands an operator takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// One operand, e.g. functions and negation
    Unary,
    /// Two operands, e.g. infix operators
    Binary,
}

impl Arity {
    /// The operand count
    pub fn count(self) -> usize {
        match self {
            Arity::Unary => 1,
            Arity::Binary => 2,
        }
    }
}

macro_rules! arities {
    ($($arity:ident => $($name:expr),+;)+) => {
        [
            $(
                $(
                    ($name, Arity::$arity),
                )+
            )+
        ]
    };
}

/// Operator arities keyed by resolved name
///
/// Covers every operator name [`LATEX_COMMANDS`][crate::LATEX_COMMANDS] resolves to, plus
/// [`NEGATION`][crate::NEGATION].
pub const OPERATOR_ARITIES: [(&str, Arity); 24] = arities!(
    Unary => "sin", "cos", "tan", "csc", "sec", "cot", "arcsin", "arccos", "arctan", "sinh",
        "cosh", "tanh", "coth", "exp", "log", "lg", "nat_log", "sqrt";
    Unary => "neg";
    Binary => "+", "-", "*", "/", "expt";
);

/// How deep operators may nest before [`Builder::build`] gives up
///
/// Building recurses once per level, so this bounds stack use.
pub const MAX_NESTING: usize = 256;

/// The map type backing [`Builder::new`]
#[cfg(feature = "qp-trie")]
pub type DefaultArities = QpTriePrefixMap<&'static str, Arity>;
/// The map type backing [`Builder::new`]
#[cfg(not(feature = "qp-trie"))]
pub type DefaultArities = HashPrefixMap<&'static str, Arity>;

lazy_static! {
    static ref DEFAULT_ARITIES: DefaultArities = DefaultArities::from_iter(OPERATOR_ARITIES);
}

/// Rebuilds a tree from an RPN sequence
///
/// The last token of any RPN sequence is its root. A unary root takes everything before it as
/// its operand. A binary root splits the tokens before it into two complete sequences, found with
/// one scan that counts operands still waiting for an operator.
///
/// # Example
/// ```
/// use latex_rpn::{shunting_yard, Builder, Lexer};
///
/// let lexed = Lexer::new().lex("((1+3)*(2+4))").unwrap();
/// let rpn = shunting_yard::convert(lexed.tokens()).unwrap();
/// let root = Builder::new().build(&rpn, lexed.symbols()).unwrap();
/// assert_eq!(root.display(lexed.symbols()).to_string(), "(* (+ 1 3) (+ 2 4))");
/// ```
#[derive(Debug)]
pub struct Builder<'b, T> {
    arities: &'b T,
}

impl Builder<'static, DefaultArities> {
    /// Create a builder with [`OPERATOR_ARITIES`]
    pub fn new() -> Self {
        Self::with_arities(&DEFAULT_ARITIES)
    }
}

impl Default for Builder<'static, DefaultArities> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'b, T> Builder<'b, T>
where
    T: PrefixMap<Arity>,
{
    /// Create a builder with a custom arity table
    pub fn with_arities(arities: &'b T) -> Self {
        Builder { arities }
    }

    /// Build the tree for an RPN sequence
    ///
    /// Operator arities are looked up by the name `symbols` gives each operator token.
    ///
    /// # Errors
    /// - [`MalformedRpnSequence`][BuildError::MalformedRpnSequence] when the sequence is empty or
    ///   doesn't hold exactly one complete expression
    /// - [`UnknownOperatorArity`][BuildError::UnknownOperatorArity] when an operator's name isn't
    ///   in the arity table
    /// - [`NestingTooDeep`][BuildError::NestingTooDeep] past [`MAX_NESTING`] levels
    pub fn build(&self, rpn: &[Token], symbols: &SymbolTable) -> Result<Node, BuildError> {
        self.build_at(rpn, symbols, 0)
    }

    fn build_at(
        &self,
        rpn: &[Token],
        symbols: &SymbolTable,
        depth: usize,
    ) -> Result<Node, BuildError> {
        if depth > MAX_NESTING {
            return Err(BuildError::NestingTooDeep { limit: MAX_NESTING });
        }
        let (&root, operands) = rpn
            .split_last()
            .ok_or_else(|| BuildError::MalformedRpnSequence("empty sequence".into()))?;
        if root.kind().is_operand() {
            return if operands.is_empty() {
                Ok(Node::Leaf(root))
            } else {
                Err(BuildError::MalformedRpnSequence(format!(
                    "{} token(s) with no operator before operand {root}",
                    operands.len()
                )))
            };
        }
        let node: Node = match self.arity(root, symbols)? {
            Arity::Unary => {
                UnaryOp::new(root, self.build_at(operands, symbols, depth + 1)?).into()
            }
            Arity::Binary => {
                let (left, right) = operands.split_at(self.split_point(operands, symbols)?);
                BinaryOp::new(
                    root,
                    self.build_at(left, symbols, depth + 1)?,
                    self.build_at(right, symbols, depth + 1)?,
                )
                .into()
            }
        };
        trace!("built {root} over {} token(s)", operands.len());
        Ok(node)
    }

    fn arity(&self, token: Token, symbols: &SymbolTable) -> Result<Arity, BuildError> {
        if !token.kind().is_operator() {
            return Err(BuildError::MalformedRpnSequence(format!(
                "{token} can't appear in an RPN sequence"
            )));
        }
        let name = symbols.resolve(&token);
        self.arities
            .get(name.as_ref())
            .copied()
            .ok_or_else(|| BuildError::UnknownOperatorArity {
                token,
                name: name.into_owned(),
            })
    }

    /// Where the operands of a binary operator divide
    ///
    /// After a complete left operand exactly one operand is pending, and inside the right operand
    /// at least two are. So the left operand ends at the last point where the count is one.
    fn split_point(&self, operands: &[Token], symbols: &SymbolTable) -> Result<usize, BuildError> {
        let mut pending = 0;
        let mut split = None;
        for (idx, &token) in operands.iter().enumerate() {
            if token.kind().is_operand() {
                pending += 1;
            } else {
                let consumed = self.arity(token, symbols)?.count();
                if pending < consumed {
                    return Err(BuildError::MalformedRpnSequence(format!(
                        "{token} needs {consumed} operand(s), {pending} available"
                    )));
                }
                pending = pending - consumed + 1;
            }
            if pending == 1 {
                split = Some(idx + 1);
            }
        }
        match split {
            Some(split) if pending == 2 => Ok(split),
            _ => Err(BuildError::MalformedRpnSequence(format!(
                "binary operator needs 2 operands, {pending} available"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Builder, MAX_NESTING};
    use crate::error::BuildError;
    use crate::lexer::SymbolTable;
    use crate::prefix_map::HashPrefixMap;
    use crate::token::{Kind, Token};
    use crate::tree::{BinaryOp, Node, UnaryOp};

    /// Parse `IDENT=name` pairs into tokens and a symbol table
    fn rpn(entries: &[&str]) -> (Vec<Token>, SymbolTable) {
        let mut tokens = Vec::new();
        let mut names = Vec::new();
        for entry in entries {
            let (ident, name) = entry.split_once('=').unwrap();
            let token: Token = ident.parse().unwrap();
            tokens.push(token);
            names.push((token, name.to_owned()));
        }
        (tokens, names.into_iter().collect())
    }

    fn tok(ident: &str) -> Token {
        ident.parse().unwrap()
    }

    #[test]
    fn single_leaf() {
        let (tokens, symbols) = rpn(&["CONSTANT_1=3"]);
        let root = Builder::new().build(&tokens, &symbols).unwrap();
        assert_eq!(root, Node::Leaf(tok("CONSTANT_1")));
    }

    #[test]
    fn nested_left_operand() {
        // 1 3 + 2 4 + *
        let (tokens, symbols) = rpn(&[
            "CONSTANT_1=1",
            "CONSTANT_2=3",
            "BINARY_INFIX_OP_1=+",
            "CONSTANT_3=2",
            "CONSTANT_4=4",
            "BINARY_INFIX_OP_2=+",
            "BINARY_INFIX_OP_3=*",
        ]);
        let root = Builder::new().build(&tokens, &symbols).unwrap();
        let expected: Node = BinaryOp::new(
            tok("BINARY_INFIX_OP_3"),
            BinaryOp::new(tok("BINARY_INFIX_OP_1"), tok("CONSTANT_1"), tok("CONSTANT_2")),
            BinaryOp::new(tok("BINARY_INFIX_OP_2"), tok("CONSTANT_3"), tok("CONSTANT_4")),
        )
        .into();
        assert_eq!(root, expected);
    }

    #[test]
    fn unary_inside_right_operand() {
        // 3 \pi 2 expt sin *
        let (tokens, symbols) = rpn(&[
            "CONSTANT_1=3",
            r"VARIABLE_1=\pi",
            "CONSTANT_2=2",
            "BINARY_INFIX_OP_2=expt",
            "FUNCTION_1=sin",
            "BINARY_INFIX_OP_1=*",
        ]);
        let root = Builder::new().build(&tokens, &symbols).unwrap();
        let expected: Node = BinaryOp::new(
            tok("BINARY_INFIX_OP_1"),
            tok("CONSTANT_1"),
            UnaryOp::new(
                tok("FUNCTION_1"),
                BinaryOp::new(tok("BINARY_INFIX_OP_2"), tok("VARIABLE_1"), tok("CONSTANT_2")),
            ),
        )
        .into();
        assert_eq!(root, expected);
        assert_eq!(
            root.display(&symbols).to_string(),
            r"(* 3 (sin (expt \pi 2)))"
        );
    }

    #[test]
    fn unary_left_operand() {
        // x neg y -
        let (tokens, symbols) = rpn(&[
            "VARIABLE_1=x",
            "UNARY_PREFIX_OP_1=neg",
            "VARIABLE_2=y",
            "BINARY_INFIX_OP_1=-",
        ]);
        let root = Builder::new().build(&tokens, &symbols).unwrap();
        assert_eq!(root.display(&symbols).to_string(), "(- (neg x) y)");
    }

    #[test]
    fn malformed_sequences() {
        let builder = Builder::new();
        let empty = SymbolTable::default();
        assert!(matches!(
            builder.build(&[], &empty),
            Err(BuildError::MalformedRpnSequence(_))
        ));

        let (tokens, symbols) = rpn(&["CONSTANT_1=1", "CONSTANT_2=2"]);
        assert!(matches!(
            builder.build(&tokens, &symbols),
            Err(BuildError::MalformedRpnSequence(_))
        ));

        let (tokens, symbols) = rpn(&["CONSTANT_1=1", "BINARY_INFIX_OP_1=+"]);
        assert!(matches!(
            builder.build(&tokens, &symbols),
            Err(BuildError::MalformedRpnSequence(_))
        ));

        let (tokens, symbols) = rpn(&[
            "CONSTANT_1=1",
            "CONSTANT_2=2",
            "CONSTANT_3=3",
            "BINARY_INFIX_OP_1=+",
        ]);
        assert!(matches!(
            builder.build(&tokens, &symbols),
            Err(BuildError::MalformedRpnSequence(_))
        ));

        let (tokens, symbols) = rpn(&["FUNCTION_1=sin"]);
        assert!(matches!(
            builder.build(&tokens, &symbols),
            Err(BuildError::MalformedRpnSequence(_))
        ));
    }

    #[test]
    fn nesting_limit() {
        let neg_chain = |depth: u32| {
            let mut tokens = vec![Token::new(Kind::Variable, 1)];
            let mut names = vec![(tokens[0], "x".to_owned())];
            for ordinal in 1..=depth {
                let neg = Token::new(Kind::UnaryPrefixOp, ordinal);
                tokens.push(neg);
                names.push((neg, "neg".to_owned()));
            }
            (tokens, names.into_iter().collect::<SymbolTable>())
        };
        let builder = Builder::new();

        let (tokens, symbols) = neg_chain(MAX_NESTING as u32);
        let root = builder.build(&tokens, &symbols).unwrap();
        assert_eq!(root.interior_count(), MAX_NESTING);

        let (tokens, symbols) = neg_chain(MAX_NESTING as u32 + 1);
        assert_eq!(
            builder.build(&tokens, &symbols),
            Err(BuildError::NestingTooDeep { limit: MAX_NESTING })
        );
    }

    #[test]
    fn unknown_arity() {
        let (tokens, symbols) = rpn(&["VARIABLE_1=x", "FUNCTION_1=erf"]);
        assert_eq!(
            Builder::new().build(&tokens, &symbols),
            Err(BuildError::UnknownOperatorArity {
                token: tok("FUNCTION_1"),
                name: "erf".into()
            })
        );
    }

    #[test]
    fn custom_arities() {
        let arities = HashPrefixMap::from_iter([("erf", super::Arity::Unary)]);
        let (tokens, symbols) = rpn(&["VARIABLE_1=x", "FUNCTION_1=erf"]);
        let root = Builder::with_arities(&arities)
            .build(&tokens, &symbols)
            .unwrap();
        assert_eq!(root.display(&symbols).to_string(), "(erf x)");
    }
}
