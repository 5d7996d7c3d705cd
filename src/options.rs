//! 渲染选项。

use crate::error::ConfigError;
use tracing::warn;

/// 未识别选项的处理策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// 未识别的选项返回 [`ConfigError::UnknownOption`]。
    #[default]
    Strict,
    /// 忽略未识别的选项并记录警告。
    Lenient,
}

/// 渲染时由调用方控制的选项。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// 单独渲染 term/criterion 时给字段加上表名或别名。
    /// 语句内部由语句结构（JOIN、派生表）决定，不受此开关影响。
    pub with_namespace: bool,
}

impl RenderOptions {
    pub fn with_namespace(mut self, on: bool) -> Self {
        self.with_namespace = on;
        self
    }

    /// 从 `key=value` 形式的键值对解析。
    ///
    /// 目前识别 `with_namespace`（`true`/`false`/`1`/`0`）。无效值总是报错。
    pub fn from_pairs<I, K, V>(pairs: I, strictness: Strictness) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut opts = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "with_namespace" => opts.with_namespace = parse_bool(key, value)?,
                _ => match strictness {
                    Strictness::Strict => return Err(ConfigError::UnknownOption(key.to_string())),
                    Strictness::Lenient => {
                        warn!(option = key, "ignoring unrecognized render option");
                    }
                },
            }
        }
        Ok(opts)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{RenderOptions, Strictness};
    use crate::error::ConfigError;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_has_no_namespace() {
        assert!(!RenderOptions::default().with_namespace);
    }

    #[test]
    fn parse_known_option() {
        let opts =
            RenderOptions::from_pairs([("with_namespace", "true")], Strictness::Strict).unwrap();
        assert!(opts.with_namespace);
    }

    #[test]
    fn strict_rejects_unknown_option() {
        let err = RenderOptions::from_pairs([("quote_char", "'")], Strictness::Strict).unwrap_err();
        assert_eq!(err, ConfigError::UnknownOption("quote_char".into()));
    }

    #[test]
    fn lenient_ignores_unknown_option() {
        let opts = RenderOptions::from_pairs(
            [("quote_char", "'"), ("with_namespace", "1")],
            Strictness::Lenient,
        )
        .unwrap();
        assert_eq!(opts, RenderOptions::default().with_namespace(true));
    }

    #[test]
    fn invalid_value_is_always_an_error() {
        let err = RenderOptions::from_pairs([("with_namespace", "maybe")], Strictness::Lenient)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "with_namespace".into(),
                value: "maybe".into(),
            }
        );
    }
}
