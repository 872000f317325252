//! 文法モデル
//!
//! [`Grammar`] は名前付きステートの不変なテーブル。各ステートは
//! [`GrammarBuilder`] が `include` を展開済みの平坦なルール列と、必須の
//! [`Fallback`] を持つ。文法は一度だけ構築し、以後は任意個の字句解析から
//! 読み取り専用で共有する。

mod builder;
mod rule;

pub use builder::{GrammarBuilder, StateBuilder};
pub use rule::{Action, Classify, Emit, Fallback, Rule, StateId, Transition};

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use crate::lexer::Indentation;

/// コンパイル済みステート
#[derive(Debug, Clone)]
pub struct State {
    name: String,
    rules: Vec<Rule>,
    fallback: Fallback,
}

impl State {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 展開済みのルール（マッチを試す順）
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn fallback(&self) -> &Fallback {
        &self.fallback
    }
}

/// 文法に付随する説明的なデータ。外部のディスパッチャ向けで、
/// 字句解析には影響しない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub name: String,
    pub tag: String,
    pub aliases: Vec<String>,
    pub filenames: Vec<String>,
    pub mimetypes: Vec<String>,
    pub description: String,
}

impl Metadata {
    pub fn new(name: &str, tag: &str) -> Self {
        Self {
            name: name.to_owned(),
            tag: tag.to_owned(),
            ..Self::default()
        }
    }

    /// `tag` がこの文法のタグまたは別名と一致するか
    pub fn answers_to(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(tag))
    }
}

/// コンパイル済みの不変な文法
pub struct Grammar {
    initial: StateId,
    states: IndexMap<String, State>,
    indentation: Option<Arc<dyn Indentation>>,
    metadata: Metadata,
}

impl Grammar {
    pub fn initial(&self) -> StateId {
        self.initial
    }

    pub fn state(&self, id: StateId) -> &State {
        // StateId はビルダーがこの文法のステートにのみ発行する
        &self.states[id.0]
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.states.get_index_of(name).map(StateId)
    }

    pub fn state_name(&self, id: StateId) -> &str {
        self.state(id).name()
    }

    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    /// インデントでブロックを追跡する文法のフック
    pub fn indentation(&self) -> Option<&dyn Indentation> {
        self.indentation.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("name", &self.metadata.name)
            .field("initial", &self.state_name(self.initial))
            .field("states", &self.states.keys().collect::<Vec<_>>())
            .field("indentation", &self.indentation.is_some())
            .finish()
    }
}
