//! SCSS 文法のテスト
//!
//! 波括弧記法では `;` `{` `}` がセクションを閉じ、インデントは意味を持たない。

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sasslex::languages::{self, scss};
    use sasslex::lexer::{tokenize, TokenKind};
    use TokenKind::*;

    /// 種別とテキストの組を取り出すヘルパー関数
    fn extract_tokens(source: &str) -> Vec<(TokenKind, &str)> {
        let grammar = scss::grammar().unwrap();
        tokenize(grammar, source).map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_nested_rule_blocks() {
        assert_eq!(
            extract_tokens(".a {\n  .b { color: red; }\n}\n"),
            vec![
                (NameClass, "."),
                (NameClass, "a"),
                (Text, " "),
                (Punctuation, "{"),
                (Text, "\n  "),
                (NameClass, "."),
                (NameClass, "b"),
                (Text, " "),
                (Punctuation, "{"),
                (Text, " "),
                (NameLabel, "color"),
                (Punctuation, ":"),
                (Text, " "),
                (NameConstant, "red"),
                (Punctuation, ";"),
                (Text, " "),
                (Punctuation, "}"),
                (Text, "\n"),
                (Punctuation, "}"),
                (Text, "\n"),
            ]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            extract_tokens("// c\n/* a\nb */\n"),
            vec![
                (CommentSingle, "// c"),
                (Text, "\n"),
                (CommentMultiline, "/* a\nb */"),
                (Text, "\n"),
            ]
        );
    }

    #[test]
    fn test_variable_declaration() {
        assert_eq!(
            extract_tokens("$x: 1px;\n"),
            vec![
                (NameVariable, "$x"),
                (Punctuation, ":"),
                (Text, " "),
                (Number, "1px"),
                (Punctuation, ";"),
                (Text, "\n"),
            ]
        );
    }

    #[test]
    fn test_crlf_inside_value() {
        assert_eq!(
            extract_tokens("$x: 1\r\n  + 2;"),
            vec![
                (NameVariable, "$x"),
                (Punctuation, ":"),
                (Text, " "),
                (Number, "1"),
                (Text, "\r\n"),
                (Text, "  "),
                (Operator, "+"),
                (Text, " "),
                (Number, "2"),
                (Punctuation, ";"),
            ]
        );
    }

    #[test]
    fn test_import() {
        assert_eq!(
            extract_tokens("@import \"foo\";"),
            vec![
                (Keyword, "@import"),
                (Text, " "),
                (StringDouble, "\""),
                (StringDouble, "foo"),
                (StringDouble, "\""),
                (Punctuation, ";"),
            ]
        );
    }

    #[test]
    fn test_parent_selector_with_pseudo_class() {
        assert_eq!(
            extract_tokens("&:hover { }"),
            vec![
                (Keyword, "&"),
                (NameDecorator, ":"),
                (NameDecorator, "hover"),
                (Text, " "),
                (Punctuation, "{"),
                (Text, " "),
                (Punctuation, "}"),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_resets_at_newline() {
        assert_eq!(
            extract_tokens("$s: \"abc\n}\n"),
            vec![
                (NameVariable, "$s"),
                (Punctuation, ":"),
                (Text, " "),
                (StringDouble, "\""),
                (StringDouble, "abc"),
                (Error, "\n"),
                (Punctuation, "}"),
                (Text, "\n"),
            ]
        );
    }

    #[test]
    fn test_indentation_is_plain_whitespace() {
        // 深いインデントでもエラーにならない
        let tokens = extract_tokens("a {\n      b: c;\n  }\n");
        assert!(tokens.iter().all(|(kind, _)| *kind != Error));
        assert!(tokens.contains(&(Text, "\n      ")));
    }

    #[test]
    fn test_found_by_name() {
        let grammar = languages::find("SCSS").unwrap().unwrap();
        assert_eq!(grammar.metadata().mimetypes, vec!["text/x-scss"]);
    }
}
