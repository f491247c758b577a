//! A module implementing lexical analysis (tokenization) for the command grammar.

/// Represents a token resulting from lexical analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A word: a maximal run of non-whitespace, non-separator characters,
    /// copied verbatim (no quoting or escaping).
    Word(String),
    /// The sequential separator, `;`.
    Semi,
    /// The parallel separator, `&`.
    Amp,
}

/// Whitespace that delimits tokens and is otherwise discarded.
fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n' | '\x0b')
}

/// `;` and `&` are single-character tokens regardless of surrounding whitespace.
fn is_separator(ch: char) -> bool {
    ch == ';' || ch == '&'
}

struct Tokenizer {
    input: Vec<char>,
    pos: usize,
}

impl Tokenizer {
    fn new(line: &str) -> Self {
        Tokenizer {
            input: line.chars().collect(),
            pos: 0,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn read_char(&mut self) -> Option<char> {
        let ch = self.input.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn make_tokens(&mut self) -> Vec<Token> {
        let mut out = Vec::new();

        while let Some(ch) = self.read_char() {
            if is_blank(ch) {
                continue;
            }
            match ch {
                ';' => out.push(Token::Semi),
                '&' => out.push(Token::Amp),
                first => {
                    let mut word = String::new();
                    word.push(first);
                    while let Some(c) = self.peek_char() {
                        if is_blank(c) || is_separator(c) {
                            break;
                        }
                        word.push(c);
                        self.pos += 1;
                    }
                    out.push(Token::Word(word));
                }
            }
        }

        out
    }
}

/// The main entry point function to perform lexical analysis.
///
/// End of input is represented by the end of the returned vector; the grammar
/// has no token that can fail to lex, so this never errors.
pub fn split_into_tokens(line: &str) -> Vec<Token> {
    let mut lexer = Tokenizer::new(line);
    lexer.make_tokens()
}
