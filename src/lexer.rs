use crate::error::LexError;
#[cfg(not(feature = "qp-trie"))]
use crate::prefix_map::HashPrefixMap;
use crate::prefix_map::PrefixMap;
#[cfg(feature = "qp-trie")]
use crate::prefix_map::QpTriePrefixMap;
use crate::token::{Kind, Mint, Token};
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::{Match, Regex};
use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Range;

/// What a control sequence or infix symbol resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command<'s> {
    /// A prefix function with its semantic name, e.g. `\ln` is `nat_log`
    Function(&'s str),
    /// An infix operator with its semantic name, e.g. `^` is `expt`
    Infix(&'s str),
    /// A letter-like symbol such as `\pi`, kept under its own spelling
    Letter,
}

macro_rules! commands {
    ($($type:ident => $($str:expr $(=> $name:expr)?),+;)+) => {
        [
            $(
                $(
                    ($str, Command::$type $(($name))?),
                )+
            )+
        ]
    };
}

/// The default command table
///
/// Control sequences not listed here fail to lex with
/// [`UnknownFunction`][LexError::UnknownFunction]. Infix symbols missing from the table still lex,
/// resolved to their own spelling.
pub const LATEX_COMMANDS: [(&str, Command<'static>); 65] = commands!(
    Function => r"\sin" => "sin", r"\cos" => "cos", r"\tan" => "tan", r"\csc" => "csc",
        r"\sec" => "sec", r"\cot" => "cot", r"\arcsin" => "arcsin", r"\arccos" => "arccos",
        r"\arctan" => "arctan", r"\sinh" => "sinh", r"\cosh" => "cosh", r"\tanh" => "tanh",
        r"\coth" => "coth", r"\exp" => "exp", r"\log" => "log", r"\lg" => "lg",
        r"\ln" => "nat_log", r"\sqrt" => "sqrt";
    Infix => "+" => "+", "-" => "-", "*" => "*", "/" => "/", "^" => "expt", r"\cdot" => "*",
        r"\times" => "*", r"\div" => "/";
    // greek
    Letter => r"\alpha", r"\beta", r"\gamma", r"\delta", r"\epsilon", r"\varepsilon", r"\zeta",
        r"\eta", r"\theta", r"\vartheta", r"\iota", r"\kappa", r"\lambda", r"\mu", r"\nu", r"\xi",
        r"\pi", r"\varpi", r"\rho", r"\sigma", r"\tau", r"\upsilon", r"\phi", r"\varphi", r"\chi",
        r"\psi", r"\omega", r"\Gamma", r"\Delta", r"\Theta", r"\Lambda", r"\Xi", r"\Pi",
        r"\Sigma", r"\Upsilon", r"\Phi", r"\Psi", r"\Omega";
    Letter => r"\infty";
);

/// The semantic name given to a prefix `-`
pub const NEGATION: &str = "neg";

/// The map type backing [`Lexer::new`]
#[cfg(feature = "qp-trie")]
pub type DefaultCommands = QpTriePrefixMap<&'static str, Command<'static>>;
/// The map type backing [`Lexer::new`]
#[cfg(not(feature = "qp-trie"))]
pub type DefaultCommands = HashPrefixMap<&'static str, Command<'static>>;

lazy_static! {
    static ref DEFAULT_COMMANDS: DefaultCommands = DefaultCommands::from_iter(LATEX_COMMANDS);
    static ref CONTROL_SEQUENCE: Regex = Regex::new(r"\\[a-zA-Z]+").unwrap();
    static ref VARIABLE: Regex =
        Regex::new(r"[a-zA-Z]+(?:_[a-zA-Z0-9]+|_\{[a-zA-Z0-9]+\})?").unwrap();
    static ref CONSTANT: Regex = Regex::new(r"[0-9]+").unwrap();
    static ref INFIX: Regex = Regex::new(r"[-+*/^]").unwrap();
    static ref LPAREN: Regex = Regex::new(r"[(\[{]").unwrap();
    static ref RPAREN: Regex = Regex::new(r"[)\]}]").unwrap();
}

/// Literal and operator names for the tokens of one lexing run
///
/// Brackets have no entry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SymbolTable(HashMap<Token, String>);

impl SymbolTable {
    /// The resolved name of a token
    pub fn get(&self, token: &Token) -> Option<&str> {
        self.0.get(token).map(String::as_str)
    }

    /// The resolved name, or the token identifier when there is none
    pub fn resolve(&self, token: &Token) -> Cow<'_, str> {
        match self.get(token) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(token.to_string()),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&Token, &str)> {
        self.0.iter().map(|(token, name)| (token, name.as_str()))
    }
}

/// For naming hand written token sequences
impl FromIterator<(Token, String)> for SymbolTable {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (Token, String)>,
    {
        SymbolTable(iter.into_iter().collect())
    }
}

/// The output of [`Lexer::lex`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Lexed {
    tokens: Vec<Token>,
    symbols: SymbolTable,
    positions: HashMap<Token, usize>,
}

impl Lexed {
    /// Tokens in input order with bare brackets
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Names for every non-bracket token
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Byte offset of a numbered token in the original input
    ///
    /// Brackets are only indexed under their numbered form, e.g. `LPAREN_2`.
    pub fn position(&self, token: &Token) -> Option<usize> {
        self.positions.get(token).copied()
    }

    /// The names of the non-bracket tokens in input order
    pub fn names(&self) -> impl Iterator<Item = Cow<'_, str>> {
        self.tokens
            .iter()
            .filter(|token| !token.kind().is_paren())
            .map(|token| self.symbols.resolve(token))
    }

    /// Split into the token list and symbol table
    pub fn into_parts(self) -> (Vec<Token>, SymbolTable) {
        (self.tokens, self.symbols)
    }
}

/// Marks consumed bytes in the working text
///
/// Whitespace is stripped up front, so a space can only be a gap. No pattern matches it, which
/// keeps the tokens on either side of a consumed command from fusing.
const GAP: char = ' ';

/// The part of the input no pass has consumed yet
///
/// `offsets[i]` is the original byte offset of `text`'s byte `i`, so both always have the same
/// length. Passes only ever turn bytes into gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Unlexed {
    text: String,
    offsets: Vec<usize>,
}

impl Unlexed {
    fn new(inp: &str) -> Self {
        let mut text = String::with_capacity(inp.len());
        let mut offsets = Vec::with_capacity(inp.len());
        for (start, chr) in inp.char_indices().filter(|(_, c)| !c.is_whitespace()) {
            text.push(chr);
            offsets.extend(start..start + chr.len_utf8());
        }
        Unlexed { text, offsets }
    }

    fn original(&self, idx: usize) -> usize {
        self.offsets[idx]
    }

    /// Blank out ascending, disjoint byte ranges of the working text
    fn without(mut self, consumed: &[Range<usize>]) -> Self {
        if consumed.is_empty() {
            return self;
        }
        let mut text = String::with_capacity(self.text.len());
        let mut kept = 0;
        for range in consumed {
            text.push_str(&self.text[kept..range.start]);
            text.extend(std::iter::repeat(GAP).take(range.len()));
            kept = range.end;
        }
        text.push_str(&self.text[kept..]);
        self.text = text;
        self
    }

    /// Whatever no pass consumed and the original offset of its first byte
    fn residue(&self) -> Option<(String, usize)> {
        let start = self.text.find(|chr: char| chr != GAP)?;
        let residue = self.text.chars().filter(|&chr| chr != GAP).collect();
        Some((residue, self.original(start)))
    }
}

/// A classified match
struct Lexeme {
    kind: Kind,
    name: Option<String>,
    /// Bytes of the match to consume, from its start
    len: usize,
}

impl Lexeme {
    fn named(kind: Kind, name: impl Into<String>, len: usize) -> Self {
        Lexeme {
            kind,
            name: Some(name.into()),
            len,
        }
    }

    fn bracket(kind: Kind) -> Self {
        Lexeme {
            kind,
            name: None,
            len: 1,
        }
    }
}

/// Tokens minted so far in one lexing run
#[derive(Debug, Default)]
struct Minted {
    mint: Mint,
    symbols: HashMap<Token, String>,
    positions: HashMap<Token, usize>,
}

impl Minted {
    fn record(&mut self, lexeme: Lexeme, offset: usize) -> Token {
        let token = self.mint.next(lexeme.kind);
        trace!("minted {token} at offset {offset}: {:?}", lexeme.name);
        if let Some(name) = lexeme.name {
            self.symbols.insert(token, name);
        }
        self.positions.insert(token, offset);
        token
    }

    fn finish(self) -> Lexed {
        let mut ordered: Vec<_> = self.positions.iter().map(|(&tok, &pos)| (pos, tok)).collect();
        ordered.sort_unstable();
        let tokens = ordered
            .into_iter()
            .map(|(_, token)| {
                if token.kind().is_paren() {
                    token.collapsed()
                } else {
                    token
                }
            })
            .collect();
        Lexed {
            tokens,
            symbols: SymbolTable(self.symbols),
            positions: self.positions,
        }
    }
}

/// Run one pass: mint a token for every match of `pattern` in the working text, then blank out the
/// consumed bytes
fn lex_pass<F>(
    unlexed: Unlexed,
    minted: &mut Minted,
    pattern: &Regex,
    mut classify: F,
) -> Result<Unlexed, LexError>
where
    F: FnMut(&Unlexed, Match<'_>) -> Result<Lexeme, LexError>,
{
    let mut consumed = Vec::new();
    for found in pattern.find_iter(&unlexed.text) {
        let lexeme = classify(&unlexed, found)?;
        let range = found.start()..found.start() + lexeme.len;
        minted.record(lexeme, unlexed.original(found.start()));
        consumed.push(range);
    }
    debug!("pass {pattern} consumed {} match(es)", consumed.len());
    Ok(unlexed.without(&consumed))
}

/// Whether a `-` at `offset` in the original input is a prefix negation
///
/// `infix_ends` holds the original end offsets of infix control sequences like `\cdot`.
fn is_prefix_position(inp: &str, offset: usize, infix_ends: &[usize]) -> bool {
    let before = inp[..offset].trim_end();
    infix_ends.contains(&before.len())
        || matches!(
            before.chars().next_back(),
            None | Some('(' | '[' | '{' | '+' | '-' | '*' | '/' | '^')
        )
}

/// A multi-pass LaTeX lexer
///
/// Each pass extracts one token category from a working copy of the input, in the order
/// control sequences, variables, constants, infix operators, opening brackets, closing brackets.
/// Every token remembers where it started in the original input, and the final list is sorted on
/// that, so the result is the same as one left to right scan.
///
/// All tables are rebuilt inside [`lex`][Lexer::lex], so one lexer can be reused for any number of
/// inputs.
///
/// # Example
/// ```
/// use latex_rpn::Lexer;
///
/// let lexed = Lexer::new().lex("3+2").unwrap();
/// let idents: Vec<_> = lexed.tokens().iter().map(|t| t.to_string()).collect();
/// assert_eq!(idents, ["CONSTANT_1", "BINARY_INFIX_OP_1", "CONSTANT_2"]);
/// assert_eq!(lexed.names().collect::<Vec<_>>(), ["3", "+", "2"]);
/// ```
#[derive(Debug)]
pub struct Lexer<'b, T> {
    commands: &'b T,
}

impl Lexer<'static, DefaultCommands> {
    /// Create a lexer with [`LATEX_COMMANDS`]
    pub fn new() -> Self {
        Self::with_commands(&DEFAULT_COMMANDS)
    }
}

impl Default for Lexer<'static, DefaultCommands> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'b, T> Lexer<'b, T> {
    /// Create a lexer with a custom command table
    ///
    /// ```
    /// use latex_rpn::prefix_map::HashPrefixMap;
    /// use latex_rpn::{Command, Lexer, LexError};
    ///
    /// let commands = HashPrefixMap::from_iter([(r"\erf", Command::Function("erf"))]);
    /// let lexer = Lexer::with_commands(&commands);
    /// assert_eq!(lexer.lex(r"\erf(x)").unwrap().symbols().len(), 2);
    /// assert!(matches!(lexer.lex(r"\sin(x)"), Err(LexError::UnknownFunction { .. })));
    /// ```
    pub fn with_commands(commands: &'b T) -> Self {
        Lexer { commands }
    }

    /// Lex an expression into tokens and their symbol table
    ///
    /// Whitespace is ignored everywhere, so an empty or blank input gives an empty token list.
    pub fn lex<'s>(&self, inp: &str) -> Result<Lexed, LexError>
    where
        T: PrefixMap<Command<'s>>,
    {
        let mut minted = Minted::default();
        let mut infix_ends = Vec::new();
        let unlexed = Unlexed::new(inp);

        let unlexed = lex_pass(unlexed, &mut minted, &CONTROL_SEQUENCE, |unlexed, found| {
            let run = found.as_str();
            match self.commands.get_longest_prefix(run) {
                // a key must cover the backslash and at least one letter
                Some((len, &command)) if len > 1 => Ok(match command {
                    Command::Function(name) => Lexeme::named(Kind::Function, name, len),
                    Command::Infix(name) => {
                        infix_ends.push(unlexed.original(found.start() + len - 1) + 1);
                        Lexeme::named(Kind::BinaryInfixOp, name, len)
                    }
                    Command::Letter => Lexeme::named(Kind::Variable, &run[..len], len),
                }),
                _ => Err(LexError::UnknownFunction {
                    name: run.to_owned(),
                    offset: unlexed.original(found.start()),
                }),
            }
        })?;
        let unlexed = lex_pass(unlexed, &mut minted, &VARIABLE, |_, found| {
            Ok(Lexeme::named(Kind::Variable, found.as_str(), found.len()))
        })?;
        let unlexed = lex_pass(unlexed, &mut minted, &CONSTANT, |_, found| {
            Ok(Lexeme::named(Kind::Constant, found.as_str(), found.len()))
        })?;
        let unlexed = lex_pass(unlexed, &mut minted, &INFIX, |unlexed, found| {
            let symbol = found.as_str();
            let offset = unlexed.original(found.start());
            Ok(if symbol == "-" && is_prefix_position(inp, offset, &infix_ends) {
                Lexeme::named(Kind::UnaryPrefixOp, NEGATION, 1)
            } else {
                let name = match self.commands.get(symbol) {
                    Some(&Command::Infix(name)) => name,
                    _ => symbol,
                };
                Lexeme::named(Kind::BinaryInfixOp, name, 1)
            })
        })?;
        let unlexed = lex_pass(unlexed, &mut minted, &LPAREN, |_, _| {
            Ok(Lexeme::bracket(Kind::LParen))
        })?;
        let unlexed = lex_pass(unlexed, &mut minted, &RPAREN, |_, _| {
            Ok(Lexeme::bracket(Kind::RParen))
        })?;

        if let Some((residue, offset)) = unlexed.residue() {
            return Err(LexError::UnrecognizedInput { residue, offset });
        }
        let lexed = minted.finish();
        debug!("lexed {} token(s) from {:?}", lexed.tokens.len(), inp);
        Ok(lexed)
    }
}
