use crate::lexer::{self, Token};
use std::fmt;

/// Upper bound on the number of words in one simple command, the program
/// name included. A command may hold at most `MAX_ARGS - 1` words; reaching
/// the bound is a parse error.
pub const MAX_ARGS: usize = 10;

/// Command tree for the shell.
///
/// Built bottom-up by the parser, owned exclusively by the caller, and
/// consumed by a single execution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// A **simple command**: program name plus arguments, in order.
    /// An empty `argv` (blank input) is a valid no-op node.
    Exec { argv: Vec<String> },

    /// **Sequential composition** (`;`): `left` fully completes, all of its
    /// recursive effects included, before `right` begins.
    Seq { left: Box<Cmd>, right: Box<Cmd> },

    /// **Parallel composition** (`&`): both sides begin concurrently; the
    /// composite completes only once both have completed.
    Par { left: Box<Cmd>, right: Box<Cmd> },
}

/// Errors that can occur while building the command tree.
///
/// A parse error aborts the offending command line before anything is
/// spawned; no partial tree is salvaged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A simple command reached [`MAX_ARGS`] words.
    TooManyArgs,
    /// A `&` with nothing to parallelize: end of input or `;` follows.
    TrailingAmp,
    /// Unconsumed tokens remained after the top-level parse.
    Leftovers(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::TooManyArgs => write!(f, "too many args"),
            ParseError::TrailingAmp => write!(f, "cannot terminate command with '&'"),
            ParseError::Leftovers(rest) => write!(f, "leftovers: {rest}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Builds one `Cmd` tree from the token stream.
///
/// Grammar (right-associative: `a;b;c` parses as `a ; (b ; c)`):
/// ```text
/// line := exec ( (';' | '&') line )?
/// exec := word*        -- until ';', '&', or end of input
/// ```
struct TreeBuilder {
    tokens: Vec<Token>,
    pos: usize,
}

impl TreeBuilder {
    fn from(tokens: Vec<Token>) -> Self {
        TreeBuilder { tokens, pos: 0 }
    }

    fn build(mut self) -> Result<Cmd, ParseError> {
        let cmd = self.parse_line()?;

        // Ensure we consumed all tokens.
        if self.pos < self.tokens.len() {
            return Err(ParseError::Leftovers(self.describe_rest()));
        }

        Ok(cmd)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Parse a line: exec optionally followed by `;` or `&` and another line.
    fn parse_line(&mut self) -> Result<Cmd, ParseError> {
        let cmd = self.parse_exec()?;

        match self.peek() {
            Some(Token::Semi) => {
                self.consume();
                Ok(Cmd::Seq {
                    left: Box::new(cmd),
                    right: Box::new(self.parse_line()?),
                })
            }
            Some(Token::Amp) => {
                self.consume();
                // `a&` and `a&;` are rejected: there is nothing to run in
                // parallel with. Checked before any process is spawned.
                if matches!(self.peek(), None | Some(Token::Semi)) {
                    return Err(ParseError::TrailingAmp);
                }
                Ok(Cmd::Par {
                    left: Box::new(cmd),
                    right: Box::new(self.parse_line()?),
                })
            }
            _ => Ok(cmd),
        }
    }

    /// Parse an exec: accumulate words until a separator or end of input.
    fn parse_exec(&mut self) -> Result<Cmd, ParseError> {
        let mut argv = Vec::new();

        while let Some(Token::Word(_)) = self.peek() {
            let Some(Token::Word(word)) = self.consume() else {
                unreachable!()
            };
            argv.push(word);
            if argv.len() >= MAX_ARGS {
                return Err(ParseError::TooManyArgs);
            }
        }

        Ok(Cmd::Exec { argv })
    }

    fn describe_rest(&self) -> String {
        self.tokens[self.pos..]
            .iter()
            .map(|t| match t {
                Token::Word(w) => w.as_str(),
                Token::Semi => ";",
                Token::Amp => "&",
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Parse one raw line of input into a command tree.
///
/// This is the primary entry point for the parsing stage, transforming the
/// flat token sequence produced by the lexer into the tree the executor walks.
pub fn parse(line: &str) -> Result<Cmd, ParseError> {
    let builder = TreeBuilder::from(lexer::split_into_tokens(line));
    builder.build()
}
