//! 実行ごとのステートスタック
//!
//! 最下段は常に文法の初期ステート。インデント追跡が積むエントリは
//! *ブロックフレーム* で、通常のポップが越えられない床を作り、`reset` は
//! 最も内側のブロックフレームに戻る。床より上はすべて行ローカル。

use crate::grammar::StateId;

/// 記録されたスタック操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackEvent {
    Push(StateId),
    Pop(StateId),
    /// ブロックフレームしか残っていないため拒否されたポップ
    PopRefused(StateId),
    Reset { discarded: usize },
    BlockEnter(StateId),
    BlockExit(StateId),
}

#[derive(Debug, Clone)]
pub struct StateStack {
    frames: Vec<StateId>,
    /// インデント追跡が所有するエントリ数（初期ステートを含む）
    floor: usize,
    events: Option<Vec<StackEvent>>,
}

impl StateStack {
    pub fn new(initial: StateId) -> Self {
        Self {
            frames: vec![initial],
            floor: 1,
            events: None,
        }
    }

    pub fn recording(initial: StateId) -> Self {
        Self {
            events: Some(Vec::new()),
            ..Self::new(initial)
        }
    }

    fn record(&mut self, event: StackEvent) {
        log::trace!("stack {:?} -> {:?}", event, self.frames);
        if let Some(events) = &mut self.events {
            events.push(event);
        }
    }

    pub fn top(&self) -> StateId {
        // 床より下は取り除かれないので `frames` は空にならない
        self.frames[self.frames.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// 開いているインデントブロックの数
    pub fn block_depth(&self) -> usize {
        self.floor - 1
    }

    /// 行ローカルなステートが一つも開いていないか
    pub fn at_block_level(&self) -> bool {
        self.frames.len() == self.floor
    }

    pub fn frames(&self) -> &[StateId] {
        &self.frames
    }

    pub fn push(&mut self, state: StateId) {
        self.frames.push(state);
        self.record(StackEvent::Push(state));
    }

    /// 行ローカルなステートをポップする。
    /// 先頭がブロックフレームか初期ステートなら何もせず `false` を返す。
    pub fn pop(&mut self) -> bool {
        if self.at_block_level() {
            let top = self.top();
            self.record(StackEvent::PopRefused(top));
            return false;
        }
        if let Some(state) = self.frames.pop() {
            self.record(StackEvent::Pop(state));
        }
        true
    }

    pub fn replace_top(&mut self, state: StateId) {
        self.pop();
        self.push(state);
    }

    /// 行ローカルなステートをすべて捨てる
    pub fn reset(&mut self) {
        let discarded = self.frames.len() - self.floor;
        self.frames.truncate(self.floor);
        self.record(StackEvent::Reset { discarded });
    }

    /// `state` で字句解析するインデントブロックを開く。
    /// 行ローカルなステートは先に捨てる。
    pub fn push_block(&mut self, state: StateId) {
        self.frames.truncate(self.floor);
        self.frames.push(state);
        self.floor += 1;
        self.record(StackEvent::BlockEnter(state));
    }

    /// 最も内側のブロックを閉じる。開いていなければ `false`
    pub fn pop_block(&mut self) -> bool {
        if self.floor == 1 {
            return false;
        }
        self.floor -= 1;
        self.frames.truncate(self.floor + 1);
        if let Some(state) = self.frames.pop() {
            self.record(StackEvent::BlockExit(state));
        }
        true
    }

    pub fn events(&self) -> &[StackEvent] {
        self.events.as_deref().unwrap_or(&[])
    }

    pub fn take_events(&mut self) -> Vec<StackEvent> {
        self.events.as_mut().map(std::mem::take).unwrap_or_default()
    }
}
