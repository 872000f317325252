//! 宣言的な文法の構築
//!
//! ステートとフラグメントは、ルールまたは他のフラグメント・ステートの
//! `include` からなる順序付きエントリ列として宣言する。
//! [`GrammarBuilder::build`] がすべてのステートを一度だけ展開し、パターンの
//! コンパイルとステート名の解決を済ませるので、字句解析中にそれらは発生しない。

use indexmap::IndexMap;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

use super::rule::{anchored, Action, Emit, Fallback, Rule, StateId, Transition};
use super::{Grammar, Metadata, State};
use crate::error::GrammarError;
use crate::lexer::Indentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DefinitionKind {
    State,
    Fragment,
}

#[derive(Debug, Clone)]
struct RuleSpec {
    pattern: String,
    lookahead: Option<String>,
    action: Action<String>,
}

#[derive(Debug, Clone)]
enum Entry {
    Rule(RuleSpec),
    Include(String),
}

#[derive(Debug, Clone)]
struct Definition {
    kind: DefinitionKind,
    entries: Vec<Entry>,
    fallback: Fallback<String>,
}

/// ステートとフラグメントの宣言を集め、[`Grammar`] にコンパイルする
pub struct GrammarBuilder {
    initial: String,
    definitions: IndexMap<String, Definition>,
    duplicates: Vec<String>,
    indentation: Option<Arc<dyn Indentation>>,
    metadata: Metadata,
}

/// 一つのステート（またはフラグメント）にエントリを追加する
pub struct StateBuilder<'b> {
    definition: &'b mut Definition,
}

impl<'b> StateBuilder<'b> {
    pub fn rule(&mut self, pattern: &str, action: Action<String>) -> &mut Self {
        self.definition.entries.push(Entry::Rule(RuleSpec {
            pattern: pattern.to_owned(),
            lookahead: None,
            action,
        }));
        self
    }

    /// `pattern` の直後で `lookahead` もマッチする場合のみ成立するルール。
    /// 先読み部分は消費しない。
    pub fn rule_with_lookahead(
        &mut self,
        pattern: &str,
        lookahead: &str,
        action: Action<String>,
    ) -> &mut Self {
        self.definition.entries.push(Entry::Rule(RuleSpec {
            pattern: pattern.to_owned(),
            lookahead: Some(lookahead.to_owned()),
            action,
        }));
        self
    }

    /// 別のフラグメントまたはステートのルールをこの位置に展開する
    pub fn include(&mut self, name: &str) -> &mut Self {
        self.definition.entries.push(Entry::Include(name.to_owned()));
        self
    }

    pub fn fallback(&mut self, transitions: impl IntoIterator<Item = Transition<String>>) -> &mut Self {
        self.definition.fallback = Fallback::Transition(transitions.into_iter().collect());
        self
    }
}

impl GrammarBuilder {
    pub fn new(initial: &str) -> Self {
        Self {
            initial: initial.to_owned(),
            definitions: IndexMap::new(),
            duplicates: Vec::new(),
            indentation: None,
            metadata: Metadata::default(),
        }
    }

    /// スタックに積めるステートを宣言する
    pub fn state(&mut self, name: &str) -> StateBuilder<'_> {
        self.define(name, DefinitionKind::State)
    }

    /// include 専用のフラグメントを宣言する
    pub fn fragment(&mut self, name: &str) -> StateBuilder<'_> {
        self.define(name, DefinitionKind::Fragment)
    }

    pub fn indentation(&mut self, indentation: impl Indentation + 'static) -> &mut Self {
        self.indentation = Some(Arc::new(indentation));
        self
    }

    pub fn metadata(&mut self, metadata: Metadata) -> &mut Self {
        self.metadata = metadata;
        self
    }

    fn define(&mut self, name: &str, kind: DefinitionKind) -> StateBuilder<'_> {
        if self.definitions.contains_key(name) {
            self.duplicates.push(name.to_owned());
        }
        let definition = self.definitions.entry(name.to_owned()).or_insert(Definition {
            kind,
            entries: Vec::new(),
            fallback: Fallback::ErrorChar,
        });
        StateBuilder { definition }
    }

    /// include を展開し、パターンとステート参照を解決する
    pub fn build(self) -> Result<Grammar, GrammarError> {
        if let Some(name) = self.duplicates.first() {
            return Err(GrammarError::Duplicate(name.clone()));
        }

        let ids: IndexMap<&str, StateId> = self
            .definitions
            .iter()
            .filter(|(_, def)| def.kind == DefinitionKind::State)
            .enumerate()
            .map(|(index, (name, _))| (name.as_str(), StateId(index)))
            .collect();

        let initial = *ids
            .get(self.initial.as_str())
            .ok_or_else(|| GrammarError::UndefinedInitial(self.initial.clone()))?;

        let mut compiler = Compiler {
            definitions: &self.definitions,
            ids: &ids,
            patterns: HashMap::new(),
        };

        // どのステートからも include されないフラグメントも検査する
        let mut states = IndexMap::with_capacity(ids.len());
        for (name, definition) in &self.definitions {
            let mut specs = Vec::new();
            let mut chain = vec![name.clone()];
            compiler.expand(name, definition, &mut chain, &mut specs)?;

            let rules = specs
                .into_iter()
                .map(|spec| compiler.compile_rule(name, spec))
                .collect::<Result<Vec<_>, _>>()?;
            let fallback = match &definition.fallback {
                Fallback::ErrorChar => Fallback::ErrorChar,
                Fallback::Transition(transitions) => Fallback::Transition(
                    transitions
                        .iter()
                        .cloned()
                        .map(|t| compiler.resolve(name, t))
                        .collect::<Result<_, _>>()?,
                ),
            };

            if definition.kind == DefinitionKind::Fragment {
                log::trace!("checked fragment `{}` with {} rules", name, rules.len());
                continue;
            }
            log::debug!("compiled state `{}` with {} rules", name, rules.len());
            states.insert(
                name.clone(),
                State {
                    name: name.clone(),
                    rules,
                    fallback,
                },
            );
        }

        log::debug!(
            "built grammar `{}`: {} states, {} distinct patterns",
            self.metadata.name,
            states.len(),
            compiler.patterns.len()
        );

        Ok(Grammar {
            initial,
            states,
            indentation: self.indentation,
            metadata: self.metadata,
        })
    }
}

struct Compiler<'d> {
    definitions: &'d IndexMap<String, Definition>,
    ids: &'d IndexMap<&'d str, StateId>,
    /// 共有フラグメントのパターンは文字列ごとに一度だけコンパイルする
    patterns: HashMap<String, Regex>,
}

impl<'d> Compiler<'d> {
    /// `definition` を深さ優先で平坦化する。
    /// include の連鎖を記録して循環を検出する。
    fn expand(
        &self,
        owner: &str,
        definition: &'d Definition,
        chain: &mut Vec<String>,
        out: &mut Vec<&'d RuleSpec>,
    ) -> Result<(), GrammarError> {
        let definitions = self.definitions;
        for entry in &definition.entries {
            match entry {
                Entry::Rule(spec) => out.push(spec),
                Entry::Include(name) => {
                    if chain.iter().any(|seen| seen == name) {
                        let mut cycle = chain.clone();
                        cycle.push(name.clone());
                        return Err(GrammarError::CyclicInclude { chain: cycle });
                    }
                    let included =
                        definitions
                            .get(name)
                            .ok_or_else(|| GrammarError::UndefinedInclude {
                                from: owner.to_owned(),
                                name: name.clone(),
                            })?;
                    chain.push(name.clone());
                    self.expand(owner, included, chain, out)?;
                    chain.pop();
                }
            }
        }
        Ok(())
    }

    fn regex(&mut self, owner: &str, pattern: &str) -> Result<Regex, GrammarError> {
        if let Some(regex) = self.patterns.get(pattern) {
            return Ok(regex.clone());
        }
        let regex = anchored(pattern).map_err(|e| GrammarError::InvalidPattern {
            state: owner.to_owned(),
            pattern: pattern.to_owned(),
            message: e.to_string(),
        })?;
        self.patterns.insert(pattern.to_owned(), regex.clone());
        Ok(regex)
    }

    fn resolve(
        &self,
        owner: &str,
        transition: Transition<String>,
    ) -> Result<Transition<StateId>, GrammarError> {
        transition.try_map(|target| {
            self.ids
                .get(target.as_str())
                .copied()
                .ok_or(GrammarError::UndefinedState {
                    from: owner.to_owned(),
                    target,
                })
        })
    }

    fn compile_rule(&mut self, owner: &str, spec: &RuleSpec) -> Result<Rule, GrammarError> {
        let pattern = self.regex(owner, &spec.pattern)?;
        let lookahead = spec
            .lookahead
            .as_deref()
            .map(|l| self.regex(owner, l))
            .transpose()?;
        let action = match &spec.action {
            Action::Emit(emit) => Action::Emit(emit.clone()),
            Action::Control { emit, transitions } => Action::Control {
                emit: emit.clone(),
                transitions: transitions
                    .iter()
                    .cloned()
                    .map(|t| self.resolve(owner, t))
                    .collect::<Result<_, _>>()?,
            },
        };
        if let Some(Emit::Groups(kinds)) = action.emit() {
            let groups = pattern.captures_len() - 1;
            if groups < kinds.len() {
                return Err(GrammarError::GroupMismatch {
                    state: owner.to_owned(),
                    pattern: spec.pattern.clone(),
                    kinds: kinds.len(),
                    groups,
                });
            }
        }
        Ok(Rule {
            source: spec.pattern.clone(),
            pattern,
            lookahead,
            action,
        })
    }
}
