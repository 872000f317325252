//! インデント記法の Sass
//!
//! セクションは行末で終わり、ネストはインデントだけで表す。コメント行は
//! ブロックを開き、それより深くインデントされた行はすべてコメントになる。

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::error::{GrammarError, SasslexResult};
use crate::grammar::{Action, Grammar, GrammarBuilder, Metadata, Transition};
use crate::lexer::BlockIndentation;
use crate::lexer::TokenKind::*;

use super::common::{self, ID};
use super::css::CssVocabulary;
use super::Vocabulary;

static GRAMMAR: Lazy<Result<Grammar, GrammarError>> =
    Lazy::new(|| build(Arc::new(CssVocabulary)));

/// [`CssVocabulary`] で単語を分類する共有の Sass 文法
pub fn grammar() -> SasslexResult<&'static Grammar> {
    GRAMMAR.as_ref().map_err(|e| e.clone().into())
}

pub fn metadata() -> Metadata {
    Metadata {
        filenames: vec!["*.sass".to_owned()],
        mimetypes: vec!["text/x-sass".to_owned()],
        description: "The Sass stylesheet language (sass-lang.com)".to_owned(),
        ..Metadata::new("Sass", "sass")
    }
}

/// `vocabulary` を使って Sass 文法をコンパイルする
pub fn build(vocabulary: Arc<dyn Vocabulary>) -> Result<Grammar, GrammarError> {
    let mut b = GrammarBuilder::new("root");
    b.indentation(BlockIndentation).metadata(metadata());

    // 行頭の空白はルールより先にスキャナーが測るので、ここに来るのは空行と
    // 入力末尾の空白だけ
    b.state("root")
        .rule(r"[ \t]*\r?\n|[ \t]+\z", Action::token(Text))
        .fallback([Transition::push("content")]);

    b.state("content")
        .rule(
            r"//.*\n?",
            Action::token(CommentSingle)
                .pop()
                .starts_block("single_comment"),
        )
        .rule(
            r"/\*.*\n?",
            Action::token(CommentMultiline)
                .pop()
                .starts_block("multi_comment"),
        )
        .rule(r"@import\b", Action::token(Keyword).push("import"))
        .include("content_common")
        .rule(&format!("={ID}"), Action::token(NameFunction).push("value"))
        .rule(&format!(r"\+{ID}"), Action::token(NameDecorator).push("value"))
        .rule(":", Action::token(NameAttribute).push("old_style_attr"))
        .rule_with_lookahead("", r"(?m).+?:(?:[^a-z]|$)", Action::none().push("attribute"))
        .fallback([Transition::push("selector")]);

    b.state("single_comment")
        .rule(r".*\n?", Action::token(CommentSingle));

    b.state("multi_comment")
        .rule(r".*\n?", Action::token(CommentMultiline));

    b.state("import")
        .rule(r"[ \t]+", Action::token(Text))
        .rule(r"\S+", Action::token(String))
        .include("end_section");

    b.state("old_style_attr")
        .include("attr_common")
        .fallback([Transition::replace("value")]);

    b.fragment("end_section")
        .rule(r"\r?\n", Action::token(Text).reset());

    common::define(&mut b, vocabulary);

    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn test_grammar_builds() {
        let grammar = grammar().unwrap();
        assert_eq!(grammar.state_name(grammar.initial()), "root");
        assert!(grammar.indentation().is_some());
        assert!(grammar.state_id("interpolation").is_some());
        // フラグメントはステートではない
        assert!(grammar.state_id("end_section").is_none());
        assert!(grammar.state_id("content_common").is_none());
    }

    #[test]
    fn test_metadata() {
        let grammar = grammar().unwrap();
        assert!(grammar.metadata().answers_to("Sass"));
        assert_eq!(grammar.metadata().mimetypes, vec!["text/x-sass"]);
    }

    #[test]
    fn test_import_line() {
        let grammar = grammar().unwrap();
        let tokens: Vec<_> = tokenize(grammar, "@import foo\n")
            .map(|t| (t.kind, t.text))
            .collect();
        assert_eq!(
            tokens,
            vec![
                (Keyword, "@import"),
                (Text, " "),
                (String, "foo"),
                (Text, "\n"),
            ]
        );
    }
}
