//! A minimal command-line shell.
//!
//! A line of input is tokenized and parsed into a small command tree of three
//! node kinds — simple command, sequential composition (`;`), and parallel
//! composition (`&`) — which the executor then walks, spawning one OS process
//! per simple command and enforcing the composition ordering: wait-then-run
//! for `;`, spawn-both-then-wait-for-both for `&`.
//!
//! There are no pipes, no redirection, no quoting, and no variable expansion;
//! this crate is intentionally small and easy to read, suitable for
//! experiments with process management and composition semantics.
//!
//! The high-level entry point is [`run_line`], which parses and fully
//! executes one raw line of text. The [`parser`] and [`executor`] modules
//! expose the two stages separately.

pub mod executor;
pub mod lexer;
pub mod parser;
pub mod repl;

pub use executor::{ExitCode, execute};
pub use parser::{Cmd, ParseError, parse};
pub use repl::run_line;
