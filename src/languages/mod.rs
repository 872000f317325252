//! 組み込みの文法
//!
//! 各言語モジュールは、初回使用時にコンパイルして以後共有する `grammar()` と、
//! 呼び出し側の [`Vocabulary`] で新しくコンパイルする `build()` を公開する。

pub mod common;
pub mod css;
pub mod sass;
pub mod scss;

use crate::error::SasslexResult;
use crate::grammar::Grammar;

pub use css::CssVocabulary;

/// 識別子ルールが使う単語の分類
pub trait Vocabulary: Send + Sync {
    /// `none` や `inherit` などのキーワード値
    fn is_builtin(&self, word: &str) -> bool;
    /// 色名などの名前付き定数
    fn is_constant(&self, word: &str) -> bool;
    /// 既知のプロパティ名
    fn is_attribute(&self, word: &str) -> bool;
}

type Loader = fn() -> SasslexResult<&'static Grammar>;

const LANGUAGES: &[(&str, Loader)] = &[("sass", sass::grammar), ("scss", scss::grammar)];

/// すべての組み込み文法（登録順）
pub fn all() -> SasslexResult<Vec<&'static Grammar>> {
    LANGUAGES.iter().map(|(_, load)| load()).collect()
}

/// タグまたは別名で組み込み文法を探す（大文字小文字は区別しない）
pub fn find(tag: &str) -> Option<SasslexResult<&'static Grammar>> {
    LANGUAGES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(tag))
        .map(|(_, load)| load())
        .or_else(|| {
            let grammars = match all() {
                Ok(grammars) => grammars,
                Err(e) => return Some(Err(e)),
            };
            grammars
                .into_iter()
                .find(|g| g.metadata().answers_to(tag))
                .map(Ok)
        })
}
