//! Sass と SCSS で共有するステート
//!
//! どちらの文法も [`define`] の前に独自の `end_section` フラグメント
//! （セクションの終わり方: Sass は改行、SCSS は `;` `{` `}`）を宣言する。
//! ここで宣言するステートはそれを include する。

use std::sync::Arc;

use crate::grammar::{Action, GrammarBuilder, Transition};
use crate::lexer::interpolation::{self, HAS_INTERP};
use crate::lexer::TokenKind::*;

use super::Vocabulary;

/// 識別子のパターン
pub const ID: &str = r"[\w-]+";

pub fn define(b: &mut GrammarBuilder, vocabulary: Arc<dyn Vocabulary>) {
    b.fragment("content_common")
        .rule(r"@for\b", Action::token(Keyword).push("for"))
        .rule(r"@(?:debug|warn|if|while)", Action::token(Keyword).push("value"))
        .rule(
            &format!(r"(@mixin)(\s+)({ID})"),
            Action::groups([Keyword, Text, NameFunction]).push("value"),
        )
        .rule(
            &format!(r"(@include)(\s+)({ID})"),
            Action::groups([Keyword, Text, NameDecorator]).push("value"),
        )
        .rule(&format!("@{ID}"), Action::token(Keyword).push("selector"))
        .rule(
            &format!(r"(\${ID})([ \t]*)(:)"),
            Action::groups([NameVariable, Text, Punctuation]).push("value"),
        );

    let words = Arc::clone(&vocabulary);
    b.state("value")
        .include("end_section")
        .rule(r"[ \t]+", Action::token(Text))
        .rule(&format!(r"\${ID}"), Action::token(NameVariable))
        .rule(r"url\(", Action::token(StringOther).push("string_url"))
        .rule_with_lookahead(ID, r"\s*\(", Action::token(NameFunction))
        .rule(r"(?:true|false)\b", Action::token(NamePseudo))
        .rule(r"(?:and|or|not)\b", Action::token(OperatorWord))
        .rule(r"(?i)#[a-z0-9]{1,6}", Action::token(NumberHex))
        .rule(r"-?\d+(?:%|[a-z]+)?", Action::token(Number))
        .rule(r"-?\d*\.\d+(?:%|[a-z]+)?", Action::token(NumberInteger))
        .include("has_strings")
        .include(HAS_INTERP)
        // コメントは演算子より先に試す（後ろに置くと `/` と `*` が演算子になる）
        .rule(r"/\*", Action::token(CommentMultiline).push("inline_comment"))
        .rule(r"//[^\n]*", Action::token(CommentSingle))
        .rule(r"[~^*!&%<>|+=@:,./?-]+", Action::token(Operator))
        .rule(r"[\[\]()]+", Action::token(Punctuation))
        .rule(
            ID,
            Action::classify(move |word| {
                if words.is_builtin(word) {
                    NameBuiltin
                } else if words.is_constant(word) {
                    NameConstant
                } else {
                    Name
                }
            }),
        );

    interpolation::define(b, r"#\{", r"\}", "value");

    b.fragment("has_strings")
        .rule(r#"""#, Action::token(StringDouble).push("dq"))
        .rule("'", Action::token(StringSingle).push("sq"));

    b.state("selector")
        .include("end_section")
        .include("has_strings")
        .include(HAS_INTERP)
        .rule(r"[ \t]+", Action::token(Text))
        .rule(":", Action::token(NameDecorator).push("pseudo_class"))
        .rule(r"\.", Action::token(NameClass).push("class"))
        .rule("#", Action::token(NameNamespace).push("id"))
        .rule(ID, Action::token(NameTag))
        .rule("&", Action::token(Keyword))
        .rule(r"[~^*!&\[\]()<>|+=@:;,./?-]", Action::token(Operator));

    // 補間を開かない `#` だけが文字列の一部になる（直前のルールで判定済み）
    b.state("dq")
        .rule(r#"""#, Action::token(StringDouble).pop())
        .include(HAS_INTERP)
        .rule(r##"(?:\\.|[^\n"#])+"##, Action::token(StringDouble))
        .rule("#", Action::token(StringDouble));

    b.state("sq")
        .rule("'", Action::token(StringSingle).pop())
        .include(HAS_INTERP)
        .rule(r"(?:\\.|[^\n'#])+", Action::token(StringSingle))
        .rule("#", Action::token(StringSingle));

    b.state("string_url")
        .rule(r"\)", Action::token(StringOther).pop())
        .rule(r"(?:\\.|[^\n)#])+", Action::token(StringOther))
        .include(HAS_INTERP)
        .rule("#", Action::token(StringOther));

    b.state("pseudo_class")
        .rule(ID, Action::token(NameDecorator))
        .include(HAS_INTERP)
        .fallback([Transition::Pop]);

    b.state("class")
        .rule(ID, Action::token(NameClass))
        .include(HAS_INTERP)
        .fallback([Transition::Pop]);

    b.state("id")
        .rule(ID, Action::token(NameNamespace))
        .include(HAS_INTERP)
        .fallback([Transition::Pop]);

    b.state("for")
        .rule("(?:from|to|through)", Action::token(OperatorWord))
        .include("value");

    let words = vocabulary;
    b.fragment("attr_common").include(HAS_INTERP).rule(
        ID,
        Action::classify(move |word| {
            if words.is_attribute(word) {
                NameLabel
            } else {
                NameAttribute
            }
        }),
    );

    b.state("attribute")
        .include("attr_common")
        .rule(
            r"([ \t]*)(:)",
            Action::groups([Text, Punctuation]).push("value"),
        );

    b.state("inline_comment")
        .rule(r"(?:\\#|[^\n#*])+", Action::token(CommentMultiline))
        .include(HAS_INTERP)
        .rule(r"\*/", Action::token(CommentMultiline).pop())
        .rule("[#*]", Action::token(CommentMultiline));
}
