//! スキャナーのメインループ
//!
//! [`Scanner`] は一回の字句解析の可変な状態をすべて持つ（カーソル、
//! ステートスタック、インデント幅、未出力のトークン）。文法と入力は借用し、
//! トークンを遅延的に返す。途中で破棄してもよい。

use regex::Captures;
use std::collections::VecDeque;

use crate::config::LexerConfig;
use crate::grammar::{Emit, Fallback, Grammar, StateId, Transition};

use super::indentation::{IndentTracker, LineIndent};
use super::stack::{StackEvent, StateStack};
use super::token::{Token, TokenKind};

/// 既定の設定で `input` を字句解析する
pub fn tokenize<'g, 'a>(grammar: &'g Grammar, input: &'a str) -> Scanner<'g, 'a> {
    Scanner::new(grammar, input, &LexerConfig::default())
}

/// 指定した設定で `input` を字句解析する
pub fn tokenize_with<'g, 'a>(
    grammar: &'g Grammar,
    input: &'a str,
    config: &LexerConfig,
) -> Scanner<'g, 'a> {
    Scanner::new(grammar, input, config)
}

pub struct Scanner<'g, 'a> {
    grammar: &'g Grammar,
    input: &'a str,
    cursor: usize,
    stack: StateStack,
    indent: Option<IndentTracker>,
    /// インデントを処理済みの最後の行頭
    measured_line: Option<usize>,
    queue: VecDeque<Token<'a>>,
    /// 直前のステップの位置と、そこから始まった連続ステップ数
    stalled_at: usize,
    zero_width: usize,
    max_zero_width: usize,
    finished: bool,
}

impl<'g, 'a> Scanner<'g, 'a> {
    pub fn new(grammar: &'g Grammar, input: &'a str, config: &LexerConfig) -> Self {
        let initial = grammar.initial();
        let stack = if config.record_events {
            StateStack::recording(initial)
        } else {
            StateStack::new(initial)
        };
        Self {
            grammar,
            input,
            cursor: 0,
            stack,
            indent: grammar
                .indentation()
                .map(|_| IndentTracker::new(config.tab_width)),
            measured_line: None,
            queue: VecDeque::new(),
            stalled_at: usize::MAX,
            zero_width: 0,
            max_zero_width: config.max_zero_width.max(1),
            finished: false,
        }
    }

    pub fn offset(&self) -> usize {
        self.cursor
    }

    pub fn stack(&self) -> &StateStack {
        &self.stack
    }

    /// 有効なステート名（最下段から）
    pub fn state_names(&self) -> Vec<&'g str> {
        let grammar = self.grammar;
        self.stack
            .frames()
            .iter()
            .map(|&id| grammar.state_name(id))
            .collect()
    }

    /// これまでに記録したスタック操作。`record_events` が無効なら空
    pub fn events(&self) -> &[StackEvent] {
        self.stack.events()
    }

    fn emit(&mut self, kind: TokenKind, start: usize, end: usize) {
        if start < end {
            let input = self.input;
            self.queue.push_back(Token::new(kind, &input[start..end], start));
        }
    }

    fn at_line_start(&self) -> bool {
        self.cursor == 0 || self.input.as_bytes()[self.cursor - 1] == b'\n'
    }

    /// 1ステップ実行する: 行頭のインデント処理、最初にマッチしたルール、
    /// またはステートのフォールバックのいずれか。
    fn step(&mut self) {
        if self.measure_line() {
            return;
        }

        if self.cursor == self.stalled_at {
            self.zero_width += 1;
        } else {
            self.stalled_at = self.cursor;
            self.zero_width = 0;
        }
        if self.zero_width > self.max_zero_width {
            log::debug!(
                "{} zero-width steps at offset {}, forcing progress",
                self.zero_width,
                self.cursor
            );
            self.zero_width = 0;
            self.error_char();
            return;
        }

        let grammar = self.grammar;
        let input = self.input;
        let state = grammar.state(self.stack.top());
        let rest = &input[self.cursor..];

        for rule in state.rules() {
            if let Some(caps) = rule.captures(rest) {
                let start = self.cursor;
                let end = start + caps.get(0).map_or(0, |m| m.end());
                if let Some(emit) = rule.action().emit() {
                    self.emit_match(emit, &caps, start, end);
                }
                self.cursor = end;
                for transition in rule.action().transitions() {
                    self.apply(transition);
                }
                return;
            }
        }

        match state.fallback() {
            Fallback::ErrorChar => self.error_char(),
            Fallback::Transition(transitions) => {
                for transition in transitions {
                    self.apply(transition);
                }
            }
        }
    }

    /// 行ローカルなステートがない行頭で、行頭の空白を測ってブロックを開閉する。
    /// 何か処理したかを返す。
    fn measure_line(&mut self) -> bool {
        if self.indent.is_none()
            || !self.stack.at_block_level()
            || !self.at_line_start()
            || self.measured_line == Some(self.cursor)
        {
            return false;
        }
        self.measured_line = Some(self.cursor);

        let input = self.input;
        let rest = &input[self.cursor..];
        let ws_len = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        let after = &rest[ws_len..];
        if after.is_empty() || after.starts_with('\n') || after.starts_with("\r\n") {
            // 空行はブロックに影響しない
            return false;
        }

        let grammar = self.grammar;
        let (Some(hooks), Some(tracker)) = (grammar.indentation(), self.indent.as_mut()) else {
            return false;
        };
        let width = tracker.measure(&rest[..ws_len]);
        let kind = match tracker.line(width, hooks, &mut self.stack) {
            LineIndent::Misaligned(_) => TokenKind::Error,
            _ => TokenKind::Text,
        };
        let start = self.cursor;
        self.emit(kind, start, start + ws_len);
        self.cursor += ws_len;
        true
    }

    fn emit_match(&mut self, emit: &Emit, caps: &Captures<'_>, start: usize, end: usize) {
        match emit {
            Emit::Single(kind) => self.emit(*kind, start, end),
            Emit::Dynamic(classify) => {
                let input = self.input;
                let kind = classify(&input[start..end]);
                self.emit(kind, start, end);
            }
            Emit::Groups(kinds) => {
                let mut pos = start;
                for (index, kind) in kinds.iter().enumerate() {
                    let Some(group) = caps.get(index + 1) else {
                        continue;
                    };
                    let (group_start, group_end) = (start + group.start(), start + group.end());
                    if group_start < pos {
                        // 出力済みのグループの内側
                        continue;
                    }
                    self.emit(TokenKind::Text, pos, group_start);
                    self.emit(*kind, group_start, group_end);
                    pos = group_end;
                }
                self.emit(TokenKind::Text, pos, end);
            }
        }
    }

    fn apply(&mut self, transition: &Transition<StateId>) {
        match *transition {
            Transition::Push(state) => self.stack.push(state),
            Transition::Pop => {
                self.stack.pop();
            }
            Transition::Replace(state) => self.stack.replace_top(state),
            Transition::Reset => self.stack.reset(),
            Transition::StartsBlock(state) => match self.indent.as_mut() {
                Some(tracker) => tracker.start_block(state),
                None => log::trace!(
                    "grammar `{}` has no indentation, ignoring block start",
                    self.grammar.metadata().name
                ),
            },
        }
    }

    /// 1文字を `Error` として消費する。改行ならスタックもリセットして
    /// 次の行を初期状態から始める。
    fn error_char(&mut self) {
        let start = self.cursor;
        let input = self.input;
        let Some(c) = input[start..].chars().next() else {
            return;
        };
        let end = start + c.len_utf8();
        log::debug!("no rule matches {:?} at offset {}", c, start);
        self.emit(TokenKind::Error, start, end);
        self.cursor = end;
        if c == '\n' {
            self.stack.reset();
        }
    }

    fn finish(&mut self) {
        self.finished = true;
        let grammar = self.grammar;
        if let (Some(hooks), Some(tracker)) = (grammar.indentation(), self.indent.as_mut()) {
            let closed = tracker.close(hooks, &mut self.stack);
            if closed > 0 {
                log::trace!("closed {} blocks at end of input", closed);
            }
        }
    }
}

impl<'g, 'a> Iterator for Scanner<'g, 'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(token);
            }
            if self.cursor >= self.input.len() {
                if !self.finished {
                    self.finish();
                }
                return None;
            }
            self.step();
        }
    }
}

impl std::iter::FusedIterator for Scanner<'_, '_> {}
