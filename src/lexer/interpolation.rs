//! 補間のサポート
//!
//! 文字列やセレクタの中で開いた補間は値の文法全体に再入し、その中の文字列が
//! さらに補間を含むこともある。ネストはステートスタックだけで追跡する。
//! [`define`] は開始記号をプッシュ、終了記号を対応するポップに結び付ける。

use std::ops::Range;

use crate::grammar::{Action, GrammarBuilder};

use super::token::{Token, TokenKind};

/// 補間が始まりうる場所で include するフラグメント
pub const HAS_INTERP: &str = "has_interp";
/// 補間の内側で有効なステート
pub const INTERPOLATION: &str = "interpolation";

/// [`HAS_INTERP`] フラグメントと [`INTERPOLATION`] ステートを宣言する。
/// 補間の内側では `close` でポップし、それ以外は `body` のルールで解析する。
pub fn define(builder: &mut GrammarBuilder, open: &str, close: &str, body: &str) {
    builder
        .fragment(HAS_INTERP)
        .rule(open, Action::token(TokenKind::StringInterpol).push(INTERPOLATION));
    builder
        .state(INTERPOLATION)
        .rule(close, Action::token(TokenKind::StringInterpol).pop())
        .include(body);
}

/// トークン列中の閉じた補間
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpolation {
    /// 開始記号から終了記号まで
    pub span: Range<usize>,
    /// 最も外側の補間は1
    pub depth: usize,
}

/// トークン列の補間記号を対応付ける。閉じられなかった記号は含めない。
pub fn interpolation_spans(tokens: &[Token<'_>]) -> Vec<Interpolation> {
    let mut open = Vec::new();
    let mut spans = Vec::new();

    for token in tokens.iter().filter(|t| t.kind == TokenKind::StringInterpol) {
        if token.text.ends_with('{') {
            open.push(token.offset);
        } else if let Some(start) = open.pop() {
            spans.push(Interpolation {
                span: start..token.span().end,
                depth: open.len() + 1,
            });
        }
    }

    spans.sort_by_key(|i| i.span.start);
    spans
}
