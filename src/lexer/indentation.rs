//! インデント追跡
//!
//! [`Indentation`] を宣言した文法は、区切り記号なしでブロックを表現できる。
//! 行頭の空白が広がるたびにブロックフレームを積み、狭まるたびに閉じるので、
//! スタックの深さは常に現在のネストと一致する。

use crate::grammar::StateId;

use super::stack::StateStack;

/// ブロックの開閉時に [`IndentTracker`] が呼び出すフック
pub trait Indentation: Send + Sync {
    /// 外側のブロックより深くインデントされた行が来た。
    /// `started` は前の行の `StartsBlock` が予約したステート。
    /// 既定では新しいブロックを `started`、なければ外側と同じステートで解析する。
    fn on_indent(&self, stack: &mut StateStack, started: Option<StateId>) {
        let state = started.unwrap_or_else(|| stack.top());
        stack.push_block(state);
    }

    /// ブロックが閉じた
    fn on_dedent(&self, stack: &mut StateStack) {
        stack.pop_block();
    }
}

/// 既定のフック
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockIndentation;

impl Indentation for BlockIndentation {}

/// 行のインデントと外側のブロックとの関係
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineIndent {
    Deeper,
    Same,
    /// この数のブロックを閉じ、外側のレベルに一致した
    Shallower(usize),
    /// この数のブロックを閉じたが、幅がどのレベルとも一致しない。
    /// 行は最も近い外側のブロックに属するものとして扱う。
    Misaligned(usize),
}

/// 実行ごとのブロック幅のスタック
#[derive(Debug, Clone)]
pub struct IndentTracker {
    widths: Vec<usize>,
    started: Option<StateId>,
    tab_width: usize,
}

impl IndentTracker {
    pub fn new(tab_width: usize) -> Self {
        Self {
            widths: Vec::new(),
            started: None,
            tab_width: tab_width.max(1),
        }
    }

    /// 行頭の空白とタブの幅。タブは次のタブ幅の倍数まで進む
    pub fn measure(&self, whitespace: &str) -> usize {
        whitespace.chars().fold(0, |width, c| match c {
            '\t' => (width / self.tab_width + 1) * self.tab_width,
            _ => width + 1,
        })
    }

    fn current(&self) -> usize {
        self.widths.last().copied().unwrap_or(0)
    }

    pub fn depth(&self) -> usize {
        self.widths.len()
    }

    /// 次のブロックのステートを予約する。予約は次の空でない行まで有効
    pub fn start_block(&mut self, state: StateId) {
        self.started = Some(state);
    }

    /// `width` 桁インデントされた空でない行を処理する。
    /// 開閉したブロックごとにフックを一度ずつ呼ぶ。
    pub fn line(
        &mut self,
        width: usize,
        hooks: &dyn Indentation,
        stack: &mut StateStack,
    ) -> LineIndent {
        let started = self.started.take();

        if width > self.current() {
            log::trace!("indent {} -> {}", self.current(), width);
            self.widths.push(width);
            hooks.on_indent(stack, started);
            return LineIndent::Deeper;
        }

        let mut closed = 0;
        while width < self.current() {
            self.widths.pop();
            hooks.on_dedent(stack);
            closed += 1;
        }

        match (closed, width == self.current()) {
            (0, _) => LineIndent::Same,
            (n, true) => {
                log::trace!("dedent {} blocks to {}", n, width);
                LineIndent::Shallower(n)
            }
            (n, false) => {
                log::debug!(
                    "indentation {} matches no enclosing block, snapping to {}",
                    width,
                    self.current()
                );
                LineIndent::Misaligned(n)
            }
        }
    }

    /// 入力終端として、開いているブロックをすべて閉じる
    pub fn close(&mut self, hooks: &dyn Indentation, stack: &mut StateStack) -> usize {
        let open = self.widths.len();
        for _ in 0..open {
            hooks.on_dedent(stack);
        }
        self.widths.clear();
        self.started = None;
        open
    }
}
