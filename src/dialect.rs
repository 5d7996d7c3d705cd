//! 方言策略：描述引号、关键字大小写与 LIMIT/OFFSET 风格的数据记录。
//!
//! 策略本身不带渲染逻辑，渲染器只通过 `quote_alias` / `quote_identifier` /
//! `applies_to` / `keyword` 查询它。内置方言见 [`crate::flavor::Flavor`]。

use std::borrow::Cow;
use std::fmt;

/// 一对引号字符，例如 `"`/`"` 或 `[`/`]`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuotePair {
    pub open: char,
    pub close: char,
}

impl QuotePair {
    pub const fn same(c: char) -> Self {
        Self { open: c, close: c }
    }

    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    /// 包裹 `name`；内部出现的结束引号会被双写。
    pub fn wrap(self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 2);
        out.push(self.open);
        for c in name.chars() {
            if c == self.close {
                out.push(c);
            }
            out.push(c);
        }
        out.push(self.close);
        out
    }
}

/// 关键字大小写规则。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeywordCase {
    #[default]
    Upper,
    Lower,
}

/// LIMIT/OFFSET 的输出风格。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LimitStyle {
    /// `LIMIT n OFFSET m`
    #[default]
    LimitOffset,
    /// `OFFSET m LIMIT n`（Presto）
    OffsetLimit,
    /// `OFFSET m ROWS FETCH NEXT n ROWS ONLY`
    OffsetFetch {
        /// 没有 ORDER BY 时补一个 `ORDER BY 1`（SQLServer 要求）。
        order_by_required: bool,
    },
}

/// 语句种类。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    CreateTable,
    DropTable,
    DropView,
}

impl StatementKind {
    pub fn is_ddl(self) -> bool {
        !matches!(self, Self::Select)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Select => "SELECT",
            Self::CreateTable => "CREATE TABLE",
            Self::DropTable => "DROP TABLE",
            Self::DropView => "DROP VIEW",
        };
        f.write_str(s)
    }
}

/// 一种 SQL 方言的引号/大小写规则。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialectPolicy {
    /// 显式别名使用的引号；`None` 表示不加引号。
    pub alias_quote: Option<QuotePair>,
    /// 表名、列名、限定名使用的引号；`None` 表示原样输出。
    pub identifier_quote: Option<QuotePair>,
    /// DDL 语句是否也应用引号规则。
    pub ddl_quoting: bool,
    pub keyword_case: KeywordCase,
    pub limit_style: LimitStyle,
}

impl Default for DialectPolicy {
    fn default() -> Self {
        Self {
            alias_quote: Some(QuotePair::same('"')),
            identifier_quote: Some(QuotePair::same('"')),
            ddl_quoting: false,
            keyword_case: KeywordCase::Upper,
            limit_style: LimitStyle::LimitOffset,
        }
    }
}

impl DialectPolicy {
    /// 不加任何引号的策略。
    pub const fn unquoted() -> Self {
        Self {
            alias_quote: None,
            identifier_quote: None,
            ddl_quoting: false,
            keyword_case: KeywordCase::Upper,
            limit_style: LimitStyle::LimitOffset,
        }
    }

    pub fn quote_alias(&self, name: &str) -> String {
        match self.alias_quote {
            Some(q) => q.wrap(name),
            None => name.to_string(),
        }
    }

    pub fn quote_identifier(&self, name: &str) -> String {
        match self.identifier_quote {
            Some(q) => q.wrap(name),
            None => name.to_string(),
        }
    }

    /// 该语句种类是否参考引号规则；DDL 只有在 `ddl_quoting` 打开时才会。
    pub fn applies_to(&self, kind: StatementKind) -> bool {
        !kind.is_ddl() || self.ddl_quoting
    }

    /// 按大小写规则输出关键字（传入的关键字一律为大写）。
    pub fn keyword<'a>(&self, kw: &'a str) -> Cow<'a, str> {
        match self.keyword_case {
            KeywordCase::Upper => Cow::Borrowed(kw),
            KeywordCase::Lower => Cow::Owned(kw.to_ascii_lowercase()),
        }
    }
}
