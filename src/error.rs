//! 統一的なエラーハンドリングモジュール
//!
//! 文法の構築は [`GrammarError`] で即座に失敗する。字句解析そのものは失敗せず、
//! 不正な入力は `Error` トークンとして現れる。[`LexicalError`] と
//! [`DiagnosticError`] がそれを報告可能な診断に変換する。

use codespan_reporting::diagnostic::{Diagnostic, Label};
use std::ops::Range;
use thiserror::Error;

use crate::lexer::{Token, TokenKind};

/// sasslex の統一エラー型
#[derive(Error, Debug, Clone)]
pub enum SasslexError {
    /// 文法構築エラー
    #[error("文法エラー: {0}")]
    Grammar(#[from] GrammarError),

    /// 字句解析エラー
    #[error("字句解析エラー: {0}")]
    Lexical(#[from] LexicalError),

    /// 設定エラー
    #[error("不正な設定: {0}")]
    Config(String),

    /// ファイルI/Oエラー
    #[error("ファイル操作エラー: {0}")]
    Io(String),
}

/// 文法構築時のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("初期ステート `{0}` が定義されていません")]
    UndefinedInitial(String),

    #[error("`{from}` が未定義のステート `{target}` を参照しています")]
    UndefinedState { from: String, target: String },

    #[error("`{from}` が未定義のルール列 `{name}` を include しています")]
    UndefinedInclude { from: String, name: String },

    #[error("循環した include: {}", .chain.join(" -> "))]
    CyclicInclude { chain: Vec<String> },

    #[error("`{0}` が重複して定義されています")]
    Duplicate(String),

    #[error("`{state}` の不正なパターン /{pattern}/: {message}")]
    InvalidPattern {
        state: String,
        pattern: String,
        message: String,
    },

    #[error("`{state}` のパターン /{pattern}/ はグループが{groups}個ですが、{kinds}種類のトークンを出力しようとしています")]
    GroupMismatch {
        state: String,
        pattern: String,
        kinds: usize,
        groups: usize,
    },
}

/// 報告用に分類した `Error` トークン
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexicalError {
    #[error("認識できない入力: '{text}'")]
    UnrecognizedInput { text: String, span: Range<usize> },

    #[error("未終了の構文のまま行が終わりました")]
    UnterminatedLine { span: Range<usize> },

    #[error("インデントがどの外側のブロックとも一致しません")]
    MisalignedIndentation { span: Range<usize> },
}

impl LexicalError {
    /// `Error` トークンを分類する。それ以外の種類には `None` を返す
    pub fn from_token(token: &Token<'_>) -> Option<Self> {
        if token.kind != TokenKind::Error {
            return None;
        }
        let span = token.span();
        Some(match token.text {
            "\n" | "\r\n" => LexicalError::UnterminatedLine { span },
            text if !text.is_empty() && text.chars().all(|c| c == ' ' || c == '\t') => {
                LexicalError::MisalignedIndentation { span }
            }
            text => LexicalError::UnrecognizedInput {
                text: text.to_owned(),
                span,
            },
        })
    }

    pub fn span(&self) -> Range<usize> {
        match self {
            LexicalError::UnrecognizedInput { span, .. }
            | LexicalError::UnterminatedLine { span }
            | LexicalError::MisalignedIndentation { span } => span.clone(),
        }
    }
}

/// 診断情報付きエラー
#[derive(Debug, Clone)]
pub struct DiagnosticError {
    pub error: SasslexError,
    pub file_id: usize,
}

impl DiagnosticError {
    pub fn new(error: SasslexError, file_id: usize) -> Self {
        Self { error, file_id }
    }

    /// codespan-reporting の Diagnostic に変換
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        let labels = match &self.error {
            SasslexError::Lexical(e) => {
                let label = Label::primary(self.file_id, e.span());
                vec![match e {
                    LexicalError::UnrecognizedInput { .. } => {
                        label.with_message("どのルールにもマッチしません")
                    }
                    LexicalError::UnterminatedLine { .. } => {
                        label.with_message("行末までに閉じられていません")
                    }
                    LexicalError::MisalignedIndentation { .. } => {
                        label.with_message("開かれていないレベルへのデデント")
                    }
                }]
            }
            _ => vec![],
        };

        Diagnostic::error()
            .with_message(self.error.to_string())
            .with_labels(labels)
    }
}

/// エラーコレクター
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<DiagnosticError>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: SasslexError, file_id: usize) {
        self.errors.push(DiagnosticError::new(error, file_id));
    }

    /// トークン列中の `Error` トークンをすべて記録する
    pub fn add_tokens<'a>(&mut self, tokens: impl IntoIterator<Item = Token<'a>>, file_id: usize) {
        for token in tokens {
            if let Some(error) = LexicalError::from_token(&token) {
                self.add_error(error.into(), file_id);
            }
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[DiagnosticError] {
        &self.errors
    }
}

/// 結果型のエイリアス
pub type SasslexResult<T> = Result<T, SasslexError>;

impl From<std::io::Error> for SasslexError {
    fn from(e: std::io::Error) -> Self {
        SasslexError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_error_from_token() {
        let token = Token::new(TokenKind::Error, "\n", 4);
        assert_eq!(
            LexicalError::from_token(&token),
            Some(LexicalError::UnterminatedLine { span: 4..5 })
        );

        let token = Token::new(TokenKind::Error, "   ", 10);
        assert_eq!(
            LexicalError::from_token(&token),
            Some(LexicalError::MisalignedIndentation { span: 10..13 })
        );

        let token = Token::new(TokenKind::Error, "%", 0);
        assert!(matches!(
            LexicalError::from_token(&token),
            Some(LexicalError::UnrecognizedInput { ref text, .. }) if text == "%"
        ));

        let token = Token::new(TokenKind::Name, "a", 0);
        assert_eq!(LexicalError::from_token(&token), None);
    }

    #[test]
    fn test_collector_counts_only_error_tokens() {
        let tokens = vec![
            Token::new(TokenKind::NameTag, "a", 0),
            Token::new(TokenKind::Error, "%", 1),
            Token::new(TokenKind::Text, "\n", 2),
        ];
        let mut collector = ErrorCollector::new();
        collector.add_tokens(tokens, 0);

        assert!(collector.has_errors());
        assert_eq!(collector.error_count(), 1);
        let diagnostic = collector.errors()[0].to_diagnostic();
        assert_eq!(diagnostic.labels[0].range, 1..2);
    }

    #[test]
    fn test_cyclic_include_message() {
        let error = GrammarError::CyclicInclude {
            chain: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(error.to_string(), "循環した include: a -> b -> a");
    }
}
