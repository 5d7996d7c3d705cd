//! 统一的语句类型。

use crate::create_table::CreateTable;
use crate::dialect::StatementKind;
use crate::drop::DropStatement;
use crate::options::RenderOptions;
use crate::query::SelectQuery;
use std::fmt;
use tracing::trace;

/// 已冻结、可渲染的语句。
#[derive(Debug, Clone)]
pub enum Statement {
    Select(SelectQuery),
    CreateTable(CreateTable),
    Drop(DropStatement),
}

impl Statement {
    pub fn kind(&self) -> StatementKind {
        match self {
            Self::Select(_) => StatementKind::Select,
            Self::CreateTable(_) => StatementKind::CreateTable,
            Self::Drop(d) => d.kind(),
        }
    }

    pub fn to_sql(&self) -> String {
        self.render(&RenderOptions::default())
    }

    /// 渲染不会失败，同一语句多次渲染结果相同。
    ///
    /// 语句按自身策略渲染；`options` 只影响单独渲染 term / criterion。
    pub fn render(&self, options: &RenderOptions) -> String {
        let sql = match self {
            Self::Select(q) => q.render(options),
            Self::CreateTable(c) => c.render(options),
            Self::Drop(d) => d.render(options),
        };
        trace!(kind = %self.kind(), sql = %sql, "statement rendered");
        sql
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

impl From<SelectQuery> for Statement {
    fn from(q: SelectQuery) -> Self {
        Self::Select(q)
    }
}

impl From<CreateTable> for Statement {
    fn from(c: CreateTable) -> Self {
        Self::CreateTable(c)
    }
}

impl From<DropStatement> for Statement {
    fn from(d: DropStatement) -> Self {
        Self::Drop(d)
    }
}
