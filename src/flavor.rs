//! SQL Flavor（方言）：把常见数据库映射到 [`DialectPolicy`]。

use crate::dialect::{DialectPolicy, KeywordCase, LimitStyle, QuotePair};
use std::fmt;

/// 内置方言。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flavor {
    /// ANSI 风格：别名与标识符都用 `"`。
    #[default]
    Generic,
    MySQL,
    PostgreSQL,
    SQLite,
    SQLServer,
    ClickHouse,
    Presto,
    Oracle,
    Snowflake,
    Databricks,
}

impl Flavor {
    pub const ALL: [Flavor; 10] = [
        Self::Generic,
        Self::MySQL,
        Self::PostgreSQL,
        Self::SQLite,
        Self::SQLServer,
        Self::ClickHouse,
        Self::Presto,
        Self::Oracle,
        Self::Snowflake,
        Self::Databricks,
    ];

    /// 该方言对应的策略记录。
    pub fn policy(self) -> DialectPolicy {
        let double = Some(QuotePair::same('"'));
        let (alias_quote, identifier_quote) = match self {
            Self::MySQL => {
                let backtick = Some(QuotePair::same('`'));
                (backtick, backtick)
            }
            Self::Generic
            | Self::PostgreSQL
            | Self::SQLite
            | Self::SQLServer
            | Self::ClickHouse
            | Self::Presto => (double, double),
            // 只给别名加引号，裸标识符原样输出
            Self::Oracle | Self::Snowflake | Self::Databricks => (double, None),
        };

        let limit_style = match self {
            Self::Presto => LimitStyle::OffsetLimit,
            Self::SQLServer => LimitStyle::OffsetFetch {
                order_by_required: true,
            },
            Self::Oracle => LimitStyle::OffsetFetch {
                order_by_required: false,
            },
            _ => LimitStyle::LimitOffset,
        };

        DialectPolicy {
            alias_quote,
            identifier_quote,
            ddl_quoting: false,
            keyword_case: KeywordCase::Upper,
            limit_style,
        }
    }
}

impl From<Flavor> for DialectPolicy {
    fn from(flavor: Flavor) -> Self {
        flavor.policy()
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Generic => "Generic",
            Self::MySQL => "MySQL",
            Self::PostgreSQL => "PostgreSQL",
            Self::SQLite => "SQLite",
            Self::SQLServer => "SQLServer",
            Self::ClickHouse => "ClickHouse",
            Self::Presto => "Presto",
            Self::Oracle => "Oracle",
            Self::Snowflake => "Snowflake",
            Self::Databricks => "Databricks",
        };
        f.write_str(s)
    }
}
