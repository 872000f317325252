//! 字句解析の実行ごとの設定

use serde::{Deserialize, Serialize};

use crate::error::{SasslexError, SasslexResult};

/// 一回の字句解析の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LexerConfig {
    /// タブが行頭の空白幅を進める桁の倍数
    pub tab_width: usize,
    /// 同じ位置で許すゼロ幅ステップの連続回数。超えると1文字を `Error`
    /// として消費して強制的に進む。
    pub max_zero_width: usize,
    /// スタック操作を記録する（[`Scanner::events`](crate::lexer::Scanner::events) を参照）
    pub record_events: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            tab_width: 8,
            max_zero_width: 64,
            record_events: false,
        }
    }
}

impl LexerConfig {
    pub fn from_json_str(json: &str) -> SasslexResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SasslexError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SasslexResult<()> {
        if self.tab_width == 0 {
            return Err(SasslexError::Config("tab_width は1以上である必要があります".into()));
        }
        if self.max_zero_width == 0 {
            return Err(SasslexError::Config(
                "max_zero_width は1以上である必要があります".into(),
            ));
        }
        Ok(())
    }

    pub fn with_events(mut self) -> Self {
        self.record_events = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = LexerConfig::from_json_str(r#"{ "tab_width": 4 }"#).unwrap();
        assert_eq!(config.tab_width, 4);
        assert_eq!(config.max_zero_width, LexerConfig::default().max_zero_width);
        assert!(!config.record_events);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            LexerConfig::from_json_str(r#"{ "tab_width": 0 }"#),
            Err(SasslexError::Config(_))
        ));
        assert!(matches!(
            LexerConfig::from_json_str(r#"{ "colour": true }"#),
            Err(SasslexError::Config(_))
        ));
    }
}
