//! 波括弧記法の SCSS
//!
//! [`common`] のステートをすべて Sass と共有し、セクションの終端だけが異なる。

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::error::{GrammarError, SasslexResult};
use crate::grammar::{Action, Grammar, GrammarBuilder, Metadata, Transition};
use crate::lexer::TokenKind::*;

use super::common;
use super::css::CssVocabulary;
use super::Vocabulary;

static GRAMMAR: Lazy<Result<Grammar, GrammarError>> =
    Lazy::new(|| build(Arc::new(CssVocabulary)));

pub fn grammar() -> SasslexResult<&'static Grammar> {
    GRAMMAR.as_ref().map_err(|e| e.clone().into())
}

pub fn metadata() -> Metadata {
    Metadata {
        filenames: vec!["*.scss".to_owned()],
        mimetypes: vec!["text/x-scss".to_owned()],
        description: "SCSS stylesheets (sass-lang.com)".to_owned(),
        ..Metadata::new("SCSS", "scss")
    }
}

pub fn build(vocabulary: Arc<dyn Vocabulary>) -> Result<Grammar, GrammarError> {
    let mut b = GrammarBuilder::new("root");
    b.metadata(metadata());

    b.state("root")
        .rule(r"\s+", Action::token(Text))
        .rule(r"//.*", Action::token(CommentSingle))
        .rule(r"(?s)/\*.*?\*/", Action::token(CommentMultiline))
        .rule(r"@import\b", Action::token(Keyword).push("value"))
        .include("content_common")
        // `x;` や `x}`: 1文字のプロパティ
        .rule_with_lookahead("", r"[^;{}][;}]", Action::none().push("attribute"))
        .rule_with_lookahead("", r"[^;{}:]+:[^a-z]", Action::none().push("attribute"))
        .fallback([Transition::push("selector")]);

    b.fragment("end_section")
        .rule(r"\r?\n", Action::token(Text))
        .rule(r"[;{}]", Action::token(Punctuation).reset());

    common::define(&mut b, vocabulary);

    b.build()
}
