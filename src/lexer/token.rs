//! トークンの種類と、スキャナーが出力するトークン

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// トークン種別の閉じた階層
///
/// 各種別はドット区切りの完全名（`Name.Builtin`、`Literal.String.Interpol`
/// など）を持ち、ルート以外は親の種別を持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Text,
    Error,

    Keyword,

    Comment,
    CommentSingle,
    CommentMultiline,

    Operator,
    OperatorWord,

    Punctuation,

    Name,
    NameAttribute,
    NameBuiltin,
    NameClass,
    NameConstant,
    NameDecorator,
    NameFunction,
    NameLabel,
    NameNamespace,
    NamePseudo,
    NameTag,
    NameVariable,

    Literal,
    Number,
    NumberHex,
    NumberInteger,
    String,
    StringDouble,
    StringSingle,
    StringOther,
    StringInterpol,
}

impl TokenKind {
    /// 親の種別。ルートなら `None`
    pub fn parent(self) -> Option<TokenKind> {
        use TokenKind::*;
        match self {
            Text | Error | Keyword | Comment | Operator | Punctuation | Name | Literal => None,
            CommentSingle | CommentMultiline => Some(Comment),
            OperatorWord => Some(Operator),
            NameAttribute | NameBuiltin | NameClass | NameConstant | NameDecorator
            | NameFunction | NameLabel | NameNamespace | NamePseudo | NameTag | NameVariable => {
                Some(Name)
            }
            Number | String => Some(Literal),
            NumberHex | NumberInteger => Some(Number),
            StringDouble | StringSingle | StringOther | StringInterpol => Some(String),
        }
    }

    /// `self` が `ancestor` 自身またはその子孫か
    pub fn is_a(self, ancestor: TokenKind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == ancestor {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    /// 完全名の最後の要素
    fn leaf_name(self) -> &'static str {
        use TokenKind::*;
        match self {
            Text => "Text",
            Error => "Error",
            Keyword => "Keyword",
            Comment => "Comment",
            CommentSingle => "Single",
            CommentMultiline => "Multiline",
            Operator => "Operator",
            OperatorWord => "Word",
            Punctuation => "Punctuation",
            Name => "Name",
            NameAttribute => "Attribute",
            NameBuiltin => "Builtin",
            NameClass => "Class",
            NameConstant => "Constant",
            NameDecorator => "Decorator",
            NameFunction => "Function",
            NameLabel => "Label",
            NameNamespace => "Namespace",
            NamePseudo => "Pseudo",
            NameTag => "Tag",
            NameVariable => "Variable",
            Literal => "Literal",
            Number => "Number",
            NumberHex => "Hex",
            NumberInteger => "Integer",
            String => "String",
            StringDouble => "Double",
            StringSingle => "Single",
            StringOther => "Other",
            StringInterpol => "Interpol",
        }
    }

    /// ドット区切りの完全名（例: `Literal.String.Double`）
    pub fn qualname(self) -> std::string::String {
        match self.parent() {
            Some(parent) => format!("{}.{}", parent.qualname(), self.leaf_name()),
            None => self.leaf_name().to_owned(),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualname())
    }
}

/// トークン: 種別、マッチしたテキストそのもの、開始バイト位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, offset: usize) -> Self {
        Self { kind, text, offset }
    }

    /// 入力中のバイト範囲
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_names() {
        assert_eq!(TokenKind::Text.qualname(), "Text");
        assert_eq!(TokenKind::NameBuiltin.qualname(), "Name.Builtin");
        assert_eq!(TokenKind::StringInterpol.qualname(), "Literal.String.Interpol");
        assert_eq!(TokenKind::NumberHex.to_string(), "Literal.Number.Hex");
        assert_eq!(TokenKind::OperatorWord.to_string(), "Operator.Word");
    }

    #[test]
    fn test_is_a() {
        assert!(TokenKind::StringDouble.is_a(TokenKind::Literal));
        assert!(TokenKind::StringDouble.is_a(TokenKind::String));
        assert!(TokenKind::NameClass.is_a(TokenKind::Name));
        assert!(TokenKind::Name.is_a(TokenKind::Name));
        assert!(!TokenKind::Name.is_a(TokenKind::NameClass));
        assert!(!TokenKind::CommentSingle.is_a(TokenKind::Literal));
    }

    #[test]
    fn test_token_span() {
        let token = Token::new(TokenKind::NameTag, "box", 4);
        assert_eq!(token.span(), 4..7);
        assert_eq!(token.to_string(), "Name.Tag(\"box\")");
    }
}
