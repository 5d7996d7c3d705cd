//! 冻结后的 SELECT 语句：不可变、可共享、可重复渲染。

use crate::criterion::Criterion;
use crate::dialect::DialectPolicy;
use crate::options::RenderOptions;
use crate::render::render_select;
use crate::table::{Source, TableId, TableRef};
use crate::term::{Order, Term};
use std::fmt;
use std::sync::Arc;

/// JOIN 种类；`Inner` 渲染为不带前缀的 `JOIN`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    LeftOuter,
    Right,
    RightOuter,
    Full,
    FullOuter,
    Cross,
}

impl JoinKind {
    pub(crate) fn prefix(self) -> Option<&'static str> {
        match self {
            Self::Inner => None,
            Self::Left => Some("LEFT"),
            Self::LeftOuter => Some("LEFT OUTER"),
            Self::Right => Some("RIGHT"),
            Self::RightOuter => Some("RIGHT OUTER"),
            Self::Full => Some("FULL"),
            Self::FullOuter => Some("FULL OUTER"),
            Self::Cross => Some("CROSS"),
        }
    }
}

/// JOIN 的连接条件。
#[derive(Debug, Clone, PartialEq)]
pub enum JoinCondition {
    On(Criterion),
    Using(Vec<String>),
    /// `CROSS JOIN` 不需要条件。
    Cross,
}

#[derive(Debug, Clone)]
pub struct Join {
    pub(crate) kind: JoinKind,
    pub(crate) source: Source,
    pub(crate) condition: Option<JoinCondition>,
}

impl Join {
    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn condition(&self) -> Option<&JoinCondition> {
        self.condition.as_ref()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SelectData {
    pub(crate) id: TableId,
    pub(crate) alias: Option<String>,
    pub(crate) policy: DialectPolicy,
    pub(crate) distinct: bool,
    pub(crate) from: Option<Source>,
    pub(crate) joins: Vec<Join>,
    pub(crate) select: Vec<Term>,
    pub(crate) where_: Option<Criterion>,
    pub(crate) group_by: Vec<Term>,
    pub(crate) having: Option<Criterion>,
    pub(crate) order_by: Vec<(Term, Option<Order>)>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
}

impl SelectData {
    /// FROM 在前，JOIN 按声明顺序。
    pub(crate) fn sources(&self) -> impl Iterator<Item = &Source> {
        self.from
            .iter()
            .chain(self.joins.iter().map(|j| &j.source))
    }
}

/// 由 [`crate::SelectBuilder::build`] 产生的 SELECT 语句。
///
/// 克隆只增加引用计数；嵌入为子查询时拷贝的是这个冻结值，
/// 之后再修改原 builder 不会影响已嵌入的文本。
#[derive(Debug, Clone)]
pub struct SelectQuery {
    inner: Arc<SelectData>,
}

impl SelectQuery {
    pub(crate) fn new(data: SelectData) -> Self {
        Self {
            inner: Arc::new(data),
        }
    }

    pub(crate) fn data(&self) -> &SelectData {
        &self.inner
    }

    pub fn id(&self) -> TableId {
        self.inner.id
    }

    pub fn alias(&self) -> Option<&str> {
        self.inner.alias.as_deref()
    }

    pub fn policy(&self) -> &DialectPolicy {
        &self.inner.policy
    }

    pub fn joins(&self) -> &[Join] {
        &self.inner.joins
    }

    /// 作为派生表时的显式别名，身份不变。
    pub fn as_(mut self, alias: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.inner).alias = Some(alias.into());
        self
    }

    /// 派生表上的字段。
    pub fn field(&self, name: impl Into<String>) -> Term {
        Term::Field(crate::term::Field::bound(name, self.table_ref()))
    }

    pub fn star(&self) -> Term {
        Term::Star(Some(self.table_ref()))
    }

    pub(crate) fn table_ref(&self) -> TableRef {
        TableRef {
            id: self.inner.id,
            namespace: self.inner.alias.clone(),
            aliased: self.inner.alias.is_some(),
        }
    }

    pub fn to_sql(&self) -> String {
        self.render(&RenderOptions::default())
    }

    /// 语句内部的限定名由语句结构决定；`options` 只影响单独渲染 term / criterion。
    pub fn render(&self, _options: &RenderOptions) -> String {
        render_select(&self.inner, &self.inner.policy)
    }
}

impl fmt::Display for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
