//! インデント追跡テスト
//!
//! スキャナー経由で、ブロックの開閉回数、不揃いなインデントの回復、
//! タブ幅、`StartsBlock` による予約を検証する。

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sasslex::grammar::{Action, Grammar, GrammarBuilder, StateId};
    use sasslex::lexer::{
        tokenize, tokenize_with, BlockIndentation, Indentation, StackEvent, StateStack, TokenKind,
    };
    use sasslex::LexerConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use test_case::test_case;

    /// ブロックの開閉を数えるフック
    #[derive(Default, Clone)]
    struct Counting {
        indents: Arc<AtomicUsize>,
        dedents: Arc<AtomicUsize>,
    }

    impl Indentation for Counting {
        fn on_indent(&self, stack: &mut StateStack, started: Option<StateId>) {
            self.indents.fetch_add(1, Ordering::Relaxed);
            BlockIndentation.on_indent(stack, started);
        }

        fn on_dedent(&self, stack: &mut StateStack) {
            self.dedents.fetch_add(1, Ordering::Relaxed);
            BlockIndentation.on_dedent(stack);
        }
    }

    /// 1行を1トークンにする最小のインデント文法
    fn line_grammar(hooks: impl Indentation + 'static) -> Grammar {
        let mut b = GrammarBuilder::new("root");
        b.indentation(hooks);
        b.state("root")
            .rule("#", Action::token(TokenKind::Comment).starts_block("comment"))
            .rule(r"[^\n#]+", Action::token(TokenKind::Name))
            .rule(r"\n", Action::token(TokenKind::Text));
        b.state("comment")
            .rule(r"[^\n]+", Action::token(TokenKind::CommentSingle))
            .rule(r"\n", Action::token(TokenKind::Text));
        b.build().unwrap()
    }

    fn extract_tokens<'a>(grammar: &Grammar, source: &'a str) -> Vec<(TokenKind, &'a str)> {
        tokenize(grammar, source).map(|t| (t.kind, t.text)).collect()
    }

    #[test_case("a\n  b\n    c\n      d\ne\n", 3 ; "three levels then unindented")]
    #[test_case("a\n  b\n    c\n      d", 3 ; "closed at end of input")]
    #[test_case("a\n  b\n  c\n    d\n  e\n    f\ng", 3 ; "siblings")]
    #[test_case("a\nb\nc\n", 0 ; "flat")]
    fn test_indentation_round_trip(source: &str, levels: usize) {
        let hooks = Counting::default();
        let grammar = line_grammar(hooks.clone());

        let tokens: Vec<_> = tokenize(&grammar, source).collect();
        assert_eq!(tokens.iter().map(|t| t.text).collect::<String>(), source);

        assert_eq!(hooks.indents.load(Ordering::Relaxed), levels);
        assert_eq!(hooks.dedents.load(Ordering::Relaxed), levels);
    }

    #[test]
    fn test_leading_whitespace_is_text() {
        let grammar = line_grammar(BlockIndentation);
        assert_eq!(
            extract_tokens(&grammar, "a\n  b\n"),
            vec![
                (TokenKind::Name, "a"),
                (TokenKind::Text, "\n"),
                (TokenKind::Text, "  "),
                (TokenKind::Name, "b"),
                (TokenKind::Text, "\n"),
            ]
        );
    }

    #[test]
    fn test_misaligned_dedent_is_an_error() {
        // どのレベルにも一致しない空白はエラーとして出力し、最も近い外側に合わせる
        let grammar = line_grammar(BlockIndentation);
        let config = LexerConfig::default().with_events();
        let mut scanner = tokenize_with(&grammar, "a\n  b\n      c\n    d\n  e\n", &config);
        let tokens: Vec<_> = scanner.by_ref().collect();

        let errors: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Error)
            .map(|t| (t.offset, t.text))
            .collect();
        assert_eq!(errors, vec![(14, "    ")]);

        // "e" は幅2のブロックにそのまま属し、入力終端で閉じる
        let exits = scanner
            .events()
            .iter()
            .filter(|e| matches!(e, StackEvent::BlockExit(_)))
            .count();
        assert_eq!(exits, 2);
        assert_eq!(scanner.stack().block_depth(), 0);
    }

    #[test]
    fn test_blank_lines_do_not_close_blocks() {
        let hooks = Counting::default();
        let grammar = line_grammar(hooks.clone());

        let source = "a\n  b\n\n   \n  c\n";
        let tokens: Vec<_> = tokenize(&grammar, source).collect();

        assert!(tokens.iter().all(|t| t.kind != TokenKind::Error));
        assert_eq!(hooks.indents.load(Ordering::Relaxed), 1);
        assert_eq!(hooks.dedents.load(Ordering::Relaxed), 1);
    }

    #[test_case(8, true ; "tab as eight")]
    #[test_case(2, false ; "tab as two")]
    fn test_tab_width(tab_width: usize, misaligned: bool) {
        // 2行目はタブ、3行目は空白2つ
        let hooks = Counting::default();
        let grammar = line_grammar(hooks.clone());
        let config = LexerConfig {
            tab_width,
            ..LexerConfig::default()
        };

        let tokens: Vec<_> = tokenize_with(&grammar, "a\n\tb\n  c\n", &config).collect();
        // タブ幅8なら "  c" は不揃いなデデントになる
        assert_eq!(
            tokens.iter().any(|t| t.kind == TokenKind::Error),
            misaligned
        );
        assert_eq!(hooks.indents.load(Ordering::Relaxed), 1);
        assert_eq!(hooks.dedents.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_started_block() {
        let grammar = line_grammar(BlockIndentation);
        assert_eq!(
            extract_tokens(&grammar, "# note\n  more # text\nb\n"),
            vec![
                (TokenKind::Comment, "#"),
                (TokenKind::Name, " note"),
                (TokenKind::Text, "\n"),
                (TokenKind::Text, "  "),
                (TokenKind::CommentSingle, "more # text"),
                (TokenKind::Text, "\n"),
                (TokenKind::Name, "b"),
                (TokenKind::Text, "\n"),
            ]
        );
    }

    #[test]
    fn test_grammar_without_indentation_ignores_whitespace_widths() {
        let mut b = GrammarBuilder::new("root");
        b.state("root")
            .rule(r"[ \t]+", Action::token(TokenKind::Text))
            .rule(r"[^\s]+", Action::token(TokenKind::Name))
            .rule(r"\n", Action::token(TokenKind::Text).starts_block("root"));
        let grammar = b.build().unwrap();

        let mut scanner = tokenize(&grammar, "a\n    b\n  c\n");
        let tokens: Vec<_> = scanner.by_ref().collect();
        assert!(tokens.iter().all(|t| t.kind != TokenKind::Error));
        assert_eq!(scanner.stack().block_depth(), 0);
    }
}
