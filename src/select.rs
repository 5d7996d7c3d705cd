//! SelectBuilder：可变的 SELECT 累加器，`build()` 校验后冻结为 [`SelectQuery`]。

use crate::criterion::Criterion;
use crate::dialect::DialectPolicy;
use crate::error::BuildError;
use crate::query::{Join, JoinCondition, JoinKind, SelectData, SelectQuery};
use crate::table::{Source, TableId, TableRef};
use crate::term::{Field, Order, Term};
use std::cell::Cell;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SelectBuilder {
    id: TableId,
    /// 首次 `build()` 沿用 `id`，之后每次构建分配新的身份。
    id_taken: Cell<bool>,
    alias: Option<String>,
    policy: DialectPolicy,

    distinct: bool,
    from: Option<Source>,
    joins: Vec<Join>,
    select_cols: Vec<Term>,

    where_: Option<Criterion>,
    group_by_cols: Vec<Term>,
    having: Option<Criterion>,
    order_by_cols: Vec<(Term, Option<Order>)>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Default for SelectBuilder {
    fn default() -> Self {
        Self::new(DialectPolicy::default())
    }
}

impl SelectBuilder {
    pub fn new(policy: impl Into<DialectPolicy>) -> Self {
        Self {
            id: TableId::next(),
            id_taken: Cell::new(false),
            alias: None,
            policy: policy.into(),
            distinct: false,
            from: None,
            joins: Vec::new(),
            select_cols: Vec::new(),
            where_: None,
            group_by_cols: Vec::new(),
            having: None,
            order_by_cols: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    pub fn policy(&self) -> &DialectPolicy {
        &self.policy
    }

    /// 设置 FROM 来源；再次调用会替换。
    pub fn from(&mut self, source: impl Into<Source>) -> &mut Self {
        self.from = Some(source.into());
        self
    }

    /// `JOIN`，需在返回的 [`Joiner`] 上补全条件。
    pub fn join(&mut self, source: impl Into<Source>) -> Joiner<'_> {
        self.join_with(JoinKind::Inner, source)
    }

    pub fn left_join(&mut self, source: impl Into<Source>) -> Joiner<'_> {
        self.join_with(JoinKind::Left, source)
    }

    pub fn right_join(&mut self, source: impl Into<Source>) -> Joiner<'_> {
        self.join_with(JoinKind::Right, source)
    }

    pub fn full_outer_join(&mut self, source: impl Into<Source>) -> Joiner<'_> {
        self.join_with(JoinKind::FullOuter, source)
    }

    pub fn join_with(&mut self, kind: JoinKind, source: impl Into<Source>) -> Joiner<'_> {
        let condition = (kind == JoinKind::Cross).then_some(JoinCondition::Cross);
        self.joins.push(Join {
            kind,
            source: source.into(),
            condition,
        });
        let index = self.joins.len() - 1;
        Joiner {
            builder: self,
            index,
        }
    }

    /// 替换 SELECT 列表。
    pub fn select<I, T>(&mut self, terms: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.select_cols = terms.into_iter().map(Into::into).collect();
        self
    }

    /// 追加到 SELECT 列表。
    pub fn select_more<I, T>(&mut self, terms: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.select_cols.extend(terms.into_iter().map(Into::into));
        self
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    /// 多次调用以 AND 连接。
    pub fn where_(&mut self, criterion: Criterion) -> &mut Self {
        self.where_ = Some(match self.where_.take() {
            Some(prev) => prev.and(criterion),
            None => criterion,
        });
        self
    }

    pub fn group_by<I, T>(&mut self, terms: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.group_by_cols.extend(terms.into_iter().map(Into::into));
        self
    }

    /// 多次调用以 AND 连接。
    pub fn having(&mut self, criterion: Criterion) -> &mut Self {
        self.having = Some(match self.having.take() {
            Some(prev) => prev.and(criterion),
            None => criterion,
        });
        self
    }

    /// 不带方向的 ORDER BY。
    pub fn order_by<I, T>(&mut self, terms: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        self.order_by_cols
            .extend(terms.into_iter().map(|t| (t.into(), None)));
        self
    }

    pub fn order_by_asc(&mut self, term: impl Into<Term>) -> &mut Self {
        self.order_by_cols.push((term.into(), Some(Order::Asc)));
        self
    }

    pub fn order_by_desc(&mut self, term: impl Into<Term>) -> &mut Self {
        self.order_by_cols.push((term.into(), Some(Order::Desc)));
        self
    }

    pub fn limit(&mut self, n: u64) -> &mut Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(&mut self, n: u64) -> &mut Self {
        self.offset = Some(n);
        self
    }

    /// 作为派生表时的显式别名。
    pub fn as_(&mut self, alias: impl Into<String>) -> &mut Self {
        self.alias = Some(alias.into());
        self
    }

    /// 本查询作为派生表时的字段，指向首次 `build()` 得到的语句。
    pub fn field(&self, name: impl Into<String>) -> Term {
        Term::Field(Field::bound(
            name,
            TableRef {
                id: self.id,
                namespace: self.alias.clone(),
                aliased: self.alias.is_some(),
            },
        ))
    }

    /// 校验并冻结。之后对 builder 的修改不会影响返回值；
    /// 同一 builder 多次构建得到的是不同的关系。
    pub fn build(&self) -> Result<SelectQuery, BuildError> {
        match self.validate() {
            Ok(()) => {
                let id = if self.id_taken.replace(true) {
                    TableId::next()
                } else {
                    self.id
                };
                debug!(
                    id = %id,
                    joins = self.joins.len(),
                    columns = self.select_cols.len(),
                    "select built"
                );
                Ok(SelectQuery::new(SelectData {
                    id,
                    alias: self.alias.clone(),
                    policy: self.policy,
                    distinct: self.distinct,
                    from: self.from.clone(),
                    joins: self.joins.clone(),
                    select: self.select_cols.clone(),
                    where_: self.where_.clone(),
                    group_by: self.group_by_cols.clone(),
                    having: self.having.clone(),
                    order_by: self.order_by_cols.clone(),
                    limit: self.limit,
                    offset: self.offset,
                }))
            }
            Err(err) => {
                debug!(id = %self.id, error = %err, "select rejected");
                Err(err)
            }
        }
    }

    fn validate(&self) -> Result<(), BuildError> {
        if let Some((index, join)) = self
            .joins
            .iter()
            .enumerate()
            .find(|(_, j)| j.condition.is_none())
        {
            return Err(BuildError::IncompleteJoin {
                index,
                table: join.source.to_string(),
            });
        }
        if self.select_cols.is_empty() {
            return Err(BuildError::EmptySelect);
        }
        if self.from.is_none() && !self.joins.is_empty() {
            return Err(BuildError::JoinWithoutFrom);
        }

        let sources: Vec<&Source> = self
            .from
            .iter()
            .chain(self.joins.iter().map(|j| &j.source))
            .collect();
        for (i, source) in sources.iter().enumerate() {
            if sources[..i].iter().any(|s| s.id() == source.id()) {
                return Err(BuildError::DuplicateSource {
                    table: source.to_string(),
                });
            }
        }

        let terms: Vec<&Term> = self
            .select_cols
            .iter()
            .chain(&self.group_by_cols)
            .chain(self.order_by_cols.iter().map(|(t, _)| t))
            .collect();
        let criteria: Vec<&Criterion> = self
            .where_
            .iter()
            .chain(&self.having)
            .chain(self.joins.iter().filter_map(|j| match &j.condition {
                Some(JoinCondition::On(c)) => Some(c),
                _ => None,
            }))
            .collect();

        terms.iter().try_for_each(|t| t.check())?;
        criteria.iter().try_for_each(|c| c.check())?;
        let empty_using = self.joins.iter().any(|j| match &j.condition {
            Some(JoinCondition::Using(cols)) => {
                cols.is_empty() || cols.iter().any(String::is_empty)
            }
            _ => false,
        });
        if empty_using {
            return Err(BuildError::EmptyFieldName);
        }

        let mut unknown: Option<String> = None;
        let mut check = |table: &TableRef, name: &str| {
            if unknown.is_none() && !sources.iter().any(|s| s.id() == table.id) {
                let ns = table.namespace.as_deref().unwrap_or("(subquery)");
                unknown = Some(format!("{ns}.{name}"));
            }
        };
        for term in &terms {
            term.visit_table_refs(&mut check);
        }
        for criterion in &criteria {
            criterion.visit_table_refs(&mut check);
        }
        match unknown {
            Some(field) => Err(BuildError::UnknownTable { field }),
            None => Ok(()),
        }
    }
}

/// 未完成的 JOIN；必须调用 `on`、`using` 或 `cross` 之一。
#[must_use = "a join without ON/USING fails at build()"]
#[derive(Debug)]
pub struct Joiner<'a> {
    builder: &'a mut SelectBuilder,
    index: usize,
}

impl<'a> Joiner<'a> {
    pub fn on(self, criterion: Criterion) -> &'a mut SelectBuilder {
        self.finish(JoinCondition::On(criterion))
    }

    pub fn using<I, S>(self, columns: I) -> &'a mut SelectBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.finish(JoinCondition::Using(
            columns.into_iter().map(Into::into).collect(),
        ))
    }

    /// 改为 `CROSS JOIN`。
    pub fn cross(self) -> &'a mut SelectBuilder {
        self.builder.joins[self.index].kind = JoinKind::Cross;
        self.finish(JoinCondition::Cross)
    }

    fn finish(self, condition: JoinCondition) -> &'a mut SelectBuilder {
        self.builder.joins[self.index].condition = Some(condition);
        self.builder
    }
}
