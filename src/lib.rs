//! A LaTeX math front end producing RPN and expression trees
//!
//! The pipeline has three stages, each usable on its own:
//!
//! 1. [`Lexer`] turns a string into generic tokens (`VARIABLE_1`, `BINARY_INFIX_OP_2`, ...) and a
//!    [`SymbolTable`] naming them.
//! 2. [`shunting_yard::convert`] rewrites the fully parenthesized infix tokens to RPN.
//! 3. [`Builder`] rebuilds a [`Node`][tree::Node] tree from the RPN.
//!
//! ## Usage
//!
//! ```
//! let rpn = latex_rpn::parse(r"(((3*\sin(\pi^2))+1)/2)").unwrap();
//! assert_eq!(rpn.to_string(), r"3 \pi 2 expt sin * 1 + 2 /");
//!
//! let ast = latex_rpn::to_ast(r"(((3*\sin(\pi^2))+1)/2)").unwrap();
//! assert_eq!(ast.to_string(), r"(/ (+ (* 3 (sin (expt \pi 2))) 1) 2)");
//! ```
//!
//! ## Grammar
//!
//! ```txt
//! c ::= \sin | \ln | \pi | \cdot | ...        known control sequences, see LATEX_COMMANDS
//! v ::= [a-zA-Z]+ | [a-zA-Z]+_s | [a-zA-Z]+_{s}    s ::= [a-zA-Z0-9]+
//! n ::= [0-9]+
//! o ::= + | - | * | / | ^
//! l ::= ( | [ | {
//! r ::= ) | ] | }
//! ```
//!
//! Whitespace is dropped everywhere before lexing, so `\sin x` and `\sinx` are the same input.
//! The longest known command prefixing a control sequence wins and the rest of its letters lex as
//! a variable. A `-` that follows nothing, an opening bracket or another operator is negation.
//!
//! Precedence comes only from brackets. The converter never compares operators, so `(2*3+1)` is
//! accepted but means `(2*(3+1))`. Inputs have to be wrapped in an outer bracket pair. Only one
//! level of subscripts is supported and multiplication has to be explicit.
//!
//! ## Lexing
//!
//! The lexer scans in passes: control sequences, variables, constants, infix operators, opening
//! brackets, closing brackets. Each pass blanks out what it matched in a working copy of the input
//! and records where every match began in the original string, so `a\cdot b` still gives `a`, `*`
//! and `b`. Sorting the minted tokens on that offset puts them back in input order, and bracket
//! tokens lose their ordinals on the way out.
//!
//! ## Tables
//!
//! Names come from lookup tables rather than the algorithms. [`LATEX_COMMANDS`] maps control
//! sequences and infix symbols to a [`Command`], and [`OPERATOR_ARITIES`] maps resolved operator
//! names to an [`Arity`]. Both are plain arrays so they can be extended and loaded into any
//! [`PrefixMap`][prefix_map::PrefixMap]:
//!
//! ```
//! use latex_rpn::prefix_map::HashPrefixMap;
//! use latex_rpn::{shunting_yard, Arity, Builder, Command, Lexer, LATEX_COMMANDS, OPERATOR_ARITIES};
//!
//! let commands = HashPrefixMap::from_iter(
//!     LATEX_COMMANDS.into_iter().chain([(r"\erf", Command::Function("erf"))]),
//! );
//! let arities = HashPrefixMap::from_iter(OPERATOR_ARITIES.into_iter().chain([("erf", Arity::Unary)]));
//!
//! let lexed = Lexer::with_commands(&commands).lex(r"(\erf(x))").unwrap();
//! let rpn = shunting_yard::convert(lexed.tokens()).unwrap();
//! let root = Builder::with_arities(&arities).build(&rpn, lexed.symbols()).unwrap();
//! assert_eq!(root.display(lexed.symbols()).to_string(), "(erf x)");
//! ```
//!
//! ## Errors
//!
//! Every stage fails with its own [`thiserror`] enum ([`LexError`], [`ConvertError`],
//! [`BuildError`]) and the whole pipeline with [`Error`]. Malformed input is never partially
//! converted.
//!
//! ## Logging
//!
//! Passes and stages report through the [`log`] facade at `debug` and `trace` level. No logger is
//! installed here.
#![warn(missing_docs)]
mod build;
mod error;
mod lexer;
mod parse;
pub mod prefix_map;
pub mod shunting_yard;
mod token;
pub mod tree;

pub use build::{Arity, Builder, DefaultArities, MAX_NESTING, OPERATOR_ARITIES};
pub use error::{BuildError, ConvertError, Error, LexError};
pub use lexer::{Command, DefaultCommands, Lexed, Lexer, SymbolTable, LATEX_COMMANDS, NEGATION};
pub use parse::{parse, to_ast, Rpn};
pub use token::{Kind, Token};
