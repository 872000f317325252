//! Sasslex: a declarative, stack-based regex tokenizer.
//!
//! Grammars are tables of named states built once with a
//! [`GrammarBuilder`]; [`tokenize`] walks an input with a run-local state
//! stack and yields tokens lazily. The indented Sass syntax and SCSS ship as
//! built-in grammars under [`languages`].

pub mod config;
pub mod error;
pub mod grammar;
pub mod languages;
pub mod lexer;

// Re-export commonly used types
pub use config::LexerConfig;
pub use error::{
    DiagnosticError, ErrorCollector, GrammarError, LexicalError, SasslexError, SasslexResult,
};
pub use grammar::{Action, Grammar, GrammarBuilder, Metadata, Transition};
pub use languages::{CssVocabulary, Vocabulary};
pub use lexer::{tokenize, tokenize_with, Scanner, Token, TokenKind};
