//! SQL 字面量值及其内联输出。

use crate::dialect::DialectPolicy;
use crate::error::BuildError;
use std::borrow::Cow;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::error;

/// 内联到 SQL 文本中的字面量。
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(Cow<'static, str>),
    Bytes(Vec<u8>),
    Date(time::Date),
    DateTime(time::PrimitiveDateTime),
    Timestamp(time::OffsetDateTime),
}

impl SqlValue {
    /// 将 `Option<T>` 映射为 `SqlValue`：`None => Null`，`Some(v) => v.into()`。
    pub fn from_option<T: Into<SqlValue>>(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }

    /// 以字面量形式写入 `out`。
    pub(crate) fn write_literal(&self, out: &mut String, policy: &DialectPolicy) {
        match self {
            Self::Null => out.push_str(&policy.keyword("NULL")),
            Self::Bool(b) => out.push_str(&policy.keyword(if *b { "TRUE" } else { "FALSE" })),
            Self::I64(n) => out.push_str(&n.to_string()),
            Self::U64(n) => out.push_str(&n.to_string()),
            Self::F64(n) => out.push_str(&n.to_string()),
            Self::String(s) => quote_string(out, s),
            Self::Bytes(b) => {
                out.push_str("X'");
                push_hex(out, b);
                out.push('\'');
            }
            Self::Date(d) => {
                out.push('\'');
                push_formatted(out, d.format(DATE));
                out.push('\'');
            }
            Self::DateTime(dt) => {
                out.push('\'');
                push_formatted(out, dt.date().format(DATE));
                out.push('T');
                push_formatted(out, dt.time().format(time_format(dt.time())));
                out.push('\'');
            }
            Self::Timestamp(ts) => {
                out.push('\'');
                push_formatted(out, ts.date().format(DATE));
                out.push('T');
                push_formatted(out, ts.time().format(time_format(ts.time())));
                push_formatted(out, ts.offset().format(OFFSET));
                out.push('\'');
            }
        }
    }

    /// 能否安全内联：浮点必须有限，时间值必须能按固定格式输出。
    pub(crate) fn check(&self) -> Result<(), BuildError> {
        let formatted = match self {
            Self::F64(n) if !n.is_finite() => {
                return Err(BuildError::NonFiniteFloat {
                    value: n.to_string(),
                });
            }
            Self::Date(d) => d.format(DATE).map(drop),
            Self::DateTime(dt) => dt.time().format(time_format(dt.time())).map(drop),
            Self::Timestamp(ts) => ts.offset().format(OFFSET).map(drop),
            _ => Ok(()),
        };
        formatted.map_err(|err| BuildError::UnformattableLiteral {
            reason: err.to_string(),
        })
    }
}

const DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const TIME: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]:[second]");
const TIME_FRACTION: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second].[subsecond]");
const OFFSET: &[BorrowedFormatItem<'static>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");

/// 有亚秒部分时按最少位数输出（纳秒精度）。
fn time_format(t: time::Time) -> &'static [BorrowedFormatItem<'static>] {
    if t.nanosecond() == 0 { TIME } else { TIME_FRACTION }
}

/// 构建阶段已经校验过字面量，这里的失败只会出现在单独渲染 term 时。
fn push_formatted(out: &mut String, formatted: Result<String, time::error::Format>) {
    match formatted {
        Ok(s) => out.push_str(&s),
        Err(err) => error!(error = %err, "temporal literal could not be formatted"),
    }
}

fn quote_string(out: &mut String, s: &str) {
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
}

fn push_hex(out: &mut String, data: &[u8]) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    for &b in data {
        out.push(HEX[((b >> 4) & 0xF) as usize] as char);
        out.push(HEX[(b & 0xF) as usize] as char);
    }
}

impl From<()> for SqlValue {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i8> for SqlValue {
    fn from(v: i8) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i16> for SqlValue {
    fn from(v: i16) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::I64(v as i64)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<u8> for SqlValue {
    fn from(v: u8) -> Self {
        Self::U64(v as u64)
    }
}

impl From<u16> for SqlValue {
    fn from(v: u16) -> Self {
        Self::U64(v as u64)
    }
}

impl From<u32> for SqlValue {
    fn from(v: u32) -> Self {
        Self::U64(v as u64)
    }
}

impl From<u64> for SqlValue {
    fn from(v: u64) -> Self {
        Self::U64(v)
    }
}

impl From<f32> for SqlValue {
    fn from(v: f32) -> Self {
        Self::F64(v as f64)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::String(Cow::Owned(v))
    }
}

impl From<&'static str> for SqlValue {
    fn from(v: &'static str) -> Self {
        Self::String(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<time::Date> for SqlValue {
    fn from(v: time::Date) -> Self {
        Self::Date(v)
    }
}

impl From<time::PrimitiveDateTime> for SqlValue {
    fn from(v: time::PrimitiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<time::OffsetDateTime> for SqlValue {
    fn from(v: time::OffsetDateTime) -> Self {
        Self::Timestamp(v)
    }
}

#[cfg(test)]
mod tests {
    use super::SqlValue;
    use crate::dialect::{DialectPolicy, KeywordCase};
    use crate::error::BuildError;
    use pretty_assertions::assert_eq;
    use time::macros::{date, datetime};

    fn lit(v: impl Into<SqlValue>) -> String {
        let mut out = String::new();
        v.into().write_literal(&mut out, &DialectPolicy::default());
        out
    }

    #[test]
    fn from_option() {
        assert_eq!(SqlValue::from_option(Some(123_i64)), SqlValue::I64(123));
        assert_eq!(SqlValue::from_option::<i64>(None), SqlValue::Null);
    }

    #[test]
    fn scalar_literals() {
        assert_eq!(lit(()), "NULL");
        assert_eq!(lit(true), "TRUE");
        assert_eq!(lit(-7_i32), "-7");
        assert_eq!(lit(42_u64), "42");
        assert_eq!(lit(1.5_f64), "1.5");
    }

    #[test]
    fn string_literal_doubles_single_quote() {
        assert_eq!(lit("abc"), "'abc'");
        assert_eq!(lit(String::from("it's")), "'it''s'");
    }

    #[test]
    fn bytes_literal_is_hex() {
        assert_eq!(lit(vec![0x01_u8, 0xab]), "X'01AB'");
    }

    #[test]
    fn date_and_time_literals() {
        assert_eq!(lit(date!(2024 - 03 - 09)), "'2024-03-09'");
        assert_eq!(
            lit(datetime!(2024-03-09 08:05:01)),
            "'2024-03-09T08:05:01'"
        );
        assert_eq!(
            lit(datetime!(2024-03-09 08:05:01.25)),
            "'2024-03-09T08:05:01.25'"
        );
        assert_eq!(
            lit(datetime!(2024-03-09 08:05:01 +8)),
            "'2024-03-09T08:05:01+08:00'"
        );
        assert_eq!(
            lit(datetime!(2024-03-09 08:05:01 -5:30)),
            "'2024-03-09T08:05:01-05:30'"
        );
    }

    #[test]
    fn sub_microsecond_fraction_is_kept() {
        assert_eq!(
            lit(datetime!(2024-03-09 08:05:01.0000005)),
            "'2024-03-09T08:05:01.0000005'"
        );
        assert_eq!(
            SqlValue::from(datetime!(2024-03-09 08:05:01.0000005)).check(),
            Ok(())
        );
    }

    #[test]
    fn non_finite_float_is_rejected() {
        assert_eq!(
            SqlValue::from(f64::NAN).check(),
            Err(BuildError::NonFiniteFloat {
                value: "NaN".into()
            })
        );
        assert_eq!(
            SqlValue::from(f64::INFINITY).check(),
            Err(BuildError::NonFiniteFloat { value: "inf".into() })
        );
        assert_eq!(SqlValue::from(1.5).check(), Ok(()));
    }

    #[test]
    fn keyword_literals_follow_casing() {
        let policy = DialectPolicy {
            keyword_case: KeywordCase::Lower,
            ..DialectPolicy::default()
        };
        let mut out = String::new();
        SqlValue::Bool(false).write_literal(&mut out, &policy);
        assert_eq!(out, "false");
    }
}
