//! Query：按方言创建各类 builder 的入口。

use crate::create_table::CreateTableBuilder;
use crate::dialect::DialectPolicy;
use crate::drop::DropBuilder;
use crate::flavor::Flavor;
use crate::select::SelectBuilder;
use crate::table::{Source, Table};
use crate::term::Term;

/// 绑定了方言策略的语句工厂。不存在全局默认方言，每条语句在这里选定。
///
/// ```
/// use halo_query::{Flavor, Query, Table, terms};
///
/// let abc = Table::new("abc");
/// let q = Query::new(Flavor::Databricks)
///     .from(&abc)
///     .select(terms![abc.field("a").as_("bar")])
///     .build()
///     .unwrap();
/// assert_eq!(q.to_sql(), r#"SELECT a "bar" FROM abc"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Query {
    policy: DialectPolicy,
}

impl Query {
    pub fn new(flavor: Flavor) -> Self {
        Self::with_policy(flavor.policy())
    }

    /// 使用自定义策略。
    pub fn with_policy(policy: DialectPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &DialectPolicy {
        &self.policy
    }

    pub fn from(&self, source: impl Into<Source>) -> SelectBuilder {
        let mut builder = SelectBuilder::new(self.policy);
        builder.from(source);
        builder
    }

    /// 不带 FROM 的 SELECT，例如 `SELECT 1`。
    pub fn select<I, T>(&self, terms: I) -> SelectBuilder
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        let mut builder = SelectBuilder::new(self.policy);
        builder.select(terms);
        builder
    }

    pub fn create_table(&self, table: impl Into<Table>) -> CreateTableBuilder {
        CreateTableBuilder::new(self.policy, table)
    }

    pub fn drop_table(&self, table: impl Into<Table>) -> DropBuilder {
        DropBuilder::drop_table(self.policy, table)
    }

    pub fn drop_view(&self, view: impl Into<Table>) -> DropBuilder {
        DropBuilder::drop_view(self.policy, view)
    }
}
