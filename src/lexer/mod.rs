//! Lexical analysis driven by a [`Grammar`](crate::grammar::Grammar).
//!
//! The [`Scanner`] walks the input with a stack of active states. At every
//! position it asks the top state for its first matching rule (ordered
//! choice, not longest match), emits the rule's tokens and applies its stack
//! transitions. Grammars with the [`Indentation`] capability additionally get
//! block frames opened and closed from the leading whitespace of each line.
//!
//! Tokenization never fails: input no rule accounts for becomes `Error`
//! tokens, and the concatenated token texts always reproduce the input.

pub mod indentation;
pub mod interpolation;
pub mod scanner;
pub mod stack;
pub mod token;

pub use indentation::{BlockIndentation, IndentTracker, Indentation, LineIndent};
pub use interpolation::{interpolation_spans, Interpolation};
pub use scanner::{tokenize, tokenize_with, Scanner};
pub use stack::{StackEvent, StateStack};
pub use token::{Token, TokenKind};

/// Debug helper: one token per line with its kind and offset.
pub fn format_tokens(tokens: &[Token<'_>]) -> String {
    tokens
        .iter()
        .map(|t| format!("{:>5}  {:<28} {:?}", t.offset, t.kind.qualname(), t.text))
        .collect::<Vec<_>>()
        .join("\n")
}
