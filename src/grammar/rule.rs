//! ルール: 先頭固定のパターン、任意の後続コンテキスト、アクション

use regex::{Captures, Regex};
use std::fmt;
use std::sync::Arc;

use crate::lexer::TokenKind;

/// コンパイル済みステートの [`Grammar`](super::Grammar) 内でのインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// マッチしたテキストを分類する純粋関数
pub type Classify = Arc<dyn Fn(&str) -> TokenKind + Send + Sync>;

/// ルールがマッチしたテキストをトークンにする方法
#[derive(Clone)]
pub enum Emit {
    /// マッチ全体を一つのトークンにする
    Single(TokenKind),
    /// キャプチャグループごとに一つのトークン。グループ外のテキストは `Text` になる
    Groups(Vec<TokenKind>),
    /// マッチ全体を、分類関数が決めた種類で出力する
    Dynamic(Classify),
}

impl fmt::Debug for Emit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Emit::Single(kind) => f.debug_tuple("Single").field(kind).finish(),
            Emit::Groups(kinds) => f.debug_tuple("Groups").field(kinds).finish(),
            Emit::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// ステートスタックの操作。
/// `S` は宣言中はステート名、コンパイル後は [`StateId`]。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<S = StateId> {
    Push(S),
    Pop,
    /// ポップしてからプッシュ
    Replace(S),
    /// 行ローカルなステートをすべて捨てる
    Reset,
    /// 次の深いインデントのブロックを指定ステートで字句解析する
    StartsBlock(S),
}

impl Transition<String> {
    pub fn push(state: &str) -> Self {
        Transition::Push(state.to_owned())
    }

    pub fn replace(state: &str) -> Self {
        Transition::Replace(state.to_owned())
    }

    pub fn starts_block(state: &str) -> Self {
        Transition::StartsBlock(state.to_owned())
    }
}

impl<S> Transition<S> {
    /// 遷移先のステート名
    pub fn target(&self) -> Option<&S> {
        match self {
            Transition::Push(s) | Transition::Replace(s) | Transition::StartsBlock(s) => Some(s),
            Transition::Pop | Transition::Reset => None,
        }
    }

    pub fn try_map<T, E>(self, f: impl FnOnce(S) -> Result<T, E>) -> Result<Transition<T>, E> {
        Ok(match self {
            Transition::Push(s) => Transition::Push(f(s)?),
            Transition::Replace(s) => Transition::Replace(f(s)?),
            Transition::StartsBlock(s) => Transition::StartsBlock(f(s)?),
            Transition::Pop => Transition::Pop,
            Transition::Reset => Transition::Reset,
        })
    }
}

/// パターンがマッチしたときのルールの動作
#[derive(Debug, Clone)]
pub enum Action<S = StateId> {
    Emit(Emit),
    Control {
        emit: Option<Emit>,
        transitions: Vec<Transition<S>>,
    },
}

impl<S> Action<S> {
    pub fn emit(&self) -> Option<&Emit> {
        match self {
            Action::Emit(emit) => Some(emit),
            Action::Control { emit, .. } => emit.as_ref(),
        }
    }

    pub fn transitions(&self) -> &[Transition<S>] {
        match self {
            Action::Emit(_) => &[],
            Action::Control { transitions, .. } => transitions,
        }
    }

    fn then(self, transition: Transition<S>) -> Self {
        match self {
            Action::Emit(emit) => Action::Control {
                emit: Some(emit),
                transitions: vec![transition],
            },
            Action::Control {
                emit,
                mut transitions,
            } => {
                transitions.push(transition);
                Action::Control { emit, transitions }
            }
        }
    }

    pub fn pop(self) -> Self {
        self.then(Transition::Pop)
    }

    pub fn reset(self) -> Self {
        self.then(Transition::Reset)
    }
}

impl Action<String> {
    pub fn token(kind: TokenKind) -> Self {
        Action::Emit(Emit::Single(kind))
    }

    pub fn groups(kinds: impl IntoIterator<Item = TokenKind>) -> Self {
        Action::Emit(Emit::Groups(kinds.into_iter().collect()))
    }

    pub fn classify(f: impl Fn(&str) -> TokenKind + Send + Sync + 'static) -> Self {
        Action::Emit(Emit::Dynamic(Arc::new(f)))
    }

    /// 何も出力しないアクション。遷移と組み合わせて使う
    pub fn none() -> Self {
        Action::Control {
            emit: None,
            transitions: Vec::new(),
        }
    }

    pub fn push(self, state: &str) -> Self {
        self.then(Transition::push(state))
    }

    pub fn replace(self, state: &str) -> Self {
        self.then(Transition::replace(state))
    }

    pub fn starts_block(self, state: &str) -> Self {
        self.then(Transition::starts_block(state))
    }
}

/// どのルールもマッチしなかったときの動作
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Fallback<S = StateId> {
    /// 1文字を `Error` トークンとして消費する
    #[default]
    ErrorChar,
    /// 入力を消費せずに遷移を適用する
    Transition(Vec<Transition<S>>),
}

/// コンパイル済みルール
#[derive(Debug, Clone)]
pub struct Rule {
    pub(crate) source: String,
    pub(crate) pattern: Regex,
    pub(crate) lookahead: Option<Regex>,
    pub(crate) action: Action,
}

impl Rule {
    /// 宣言時のパターン文字列
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// `rest` の先頭でマッチさせる。
    /// 先読みがあれば、マッチしたテキストの直後で成立しなければならない。
    pub fn captures<'t>(&self, rest: &'t str) -> Option<Captures<'t>> {
        let caps = self.pattern.captures(rest)?;
        let end = caps.get(0).map_or(0, |m| m.end());
        match &self.lookahead {
            Some(lookahead) if !lookahead.is_match(&rest[end..]) => None,
            _ => Some(caps),
        }
    }
}

/// 入力の先頭でのみマッチするように `pattern` をコンパイルする
pub(crate) fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\A(?:{pattern})"))
}
