//! DropBuilder：`DROP TABLE` / `DROP VIEW`。

use crate::dialect::{DialectPolicy, StatementKind};
use crate::error::BuildError;
use crate::options::RenderOptions;
use crate::render::render_drop;
use crate::table::Table;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub(crate) struct DropData {
    pub(crate) policy: DialectPolicy,
    pub(crate) kind: StatementKind,
    pub(crate) table: Table,
    pub(crate) if_exists: bool,
}

#[derive(Debug, Clone)]
pub struct DropBuilder {
    data: DropData,
}

impl DropBuilder {
    pub fn drop_table(policy: impl Into<DialectPolicy>, table: impl Into<Table>) -> Self {
        Self::new(policy, StatementKind::DropTable, table)
    }

    pub fn drop_view(policy: impl Into<DialectPolicy>, view: impl Into<Table>) -> Self {
        Self::new(policy, StatementKind::DropView, view)
    }

    fn new(policy: impl Into<DialectPolicy>, kind: StatementKind, table: impl Into<Table>) -> Self {
        Self {
            data: DropData {
                policy: policy.into(),
                kind,
                table: table.into(),
                if_exists: false,
            },
        }
    }

    pub fn if_exists(&mut self) -> &mut Self {
        self.data.if_exists = true;
        self
    }

    /// 目前不会失败；返回 `Result` 与其它 builder 保持一致。
    pub fn build(&self) -> Result<DropStatement, BuildError> {
        debug!(kind = %self.data.kind, table = self.data.table.name(), "drop built");
        Ok(DropStatement {
            inner: Arc::new(self.data.clone()),
        })
    }
}

/// 冻结的 DROP 语句。
#[derive(Debug, Clone)]
pub struct DropStatement {
    inner: Arc<DropData>,
}

impl DropStatement {
    pub fn kind(&self) -> StatementKind {
        self.inner.kind
    }

    pub fn table(&self) -> &Table {
        &self.inner.table
    }

    pub fn to_sql(&self) -> String {
        self.render(&RenderOptions::default())
    }

    /// 语句按自身策略渲染；`options` 只影响单独渲染 term / criterion。
    pub fn render(&self, _options: &RenderOptions) -> String {
        render_drop(&self.inner, &self.inner.policy)
    }
}

impl fmt::Display for DropStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
