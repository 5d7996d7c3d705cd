//! 表与别名：物理表、派生表（子查询）以及它们的身份标识。

use crate::query::SelectQuery;
use crate::term::{Field, Term};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(1);

/// 关系的身份。同名的两个 [`Table`] 拥有不同的 id；`as_` 不改变 id。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(u64);

impl TableId {
    pub(crate) fn next() -> Self {
        Self(NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 字段对所属关系的非拥有引用。
///
/// `namespace` 是创建字段时的名字快照，只在脱离语句单独渲染时使用；
/// 语句内部一律按 `id` 查找当前的来源。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub(crate) id: TableId,
    pub(crate) namespace: Option<String>,
    pub(crate) aliased: bool,
}

/// 物理表。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    id: TableId,
    schema: Option<String>,
    name: String,
    alias: Option<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TableId::next(),
            schema: None,
            name: name.into(),
            alias: None,
        }
    }

    /// 设置 schema，渲染为 `schema.name`。
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// 设置显式别名；返回的仍是同一个关系。
    pub fn as_(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema_name(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// 该表的一个字段。
    pub fn field(&self, name: impl Into<String>) -> Term {
        Term::Field(Field::bound(name, self.table_ref()))
    }

    /// `table.*`
    pub fn star(&self) -> Term {
        Term::Star(Some(self.table_ref()))
    }

    pub(crate) fn table_ref(&self) -> TableRef {
        TableRef {
            id: self.id,
            namespace: Some(self.alias.clone().unwrap_or_else(|| self.name.clone())),
            aliased: self.alias.is_some(),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema {
            write!(f, "{schema}.")?;
        }
        f.write_str(&self.name)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {alias}")?;
        }
        Ok(())
    }
}

impl From<&str> for Table {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Table {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&Table> for Table {
    fn from(t: &Table) -> Self {
        t.clone()
    }
}

/// 按名字批量创建表。
pub fn tables<I, S>(names: I) -> Vec<Table>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Table::new).collect()
}

/// FROM / JOIN 的来源：物理表或派生表。
#[derive(Debug, Clone)]
pub enum Source {
    Table(Table),
    Derived(SelectQuery),
}

impl Source {
    pub fn id(&self) -> TableId {
        match self {
            Self::Table(t) => t.id(),
            Self::Derived(q) => q.id(),
        }
    }

    /// 显式别名（不含渲染时分配的 `sqN`）。
    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Table(t) => t.alias(),
            Self::Derived(q) => q.alias(),
        }
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, Self::Derived(_))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(t) => t.fmt(f),
            Self::Derived(q) => match q.alias() {
                Some(alias) => write!(f, "(subquery) AS {alias}"),
                None => f.write_str("(subquery)"),
            },
        }
    }
}

impl From<Table> for Source {
    fn from(t: Table) -> Self {
        Self::Table(t)
    }
}

impl From<&Table> for Source {
    fn from(t: &Table) -> Self {
        Self::Table(t.clone())
    }
}

impl From<&str> for Source {
    fn from(name: &str) -> Self {
        Self::Table(Table::new(name))
    }
}

impl From<SelectQuery> for Source {
    fn from(q: SelectQuery) -> Self {
        Self::Derived(q)
    }
}

impl From<&SelectQuery> for Source {
    fn from(q: &SelectQuery) -> Self {
        Self::Derived(q.clone())
    }
}
