//! 渲染器：按方言策略把冻结的语句写成 SQL 文本。
//!
//! 每次渲染都会重新为未命名的派生表分配 `sq0, sq1, ...`，计数器只存在于
//! 单次渲染的 [`Scope`] 中，因此同一语句多次渲染结果一致。

use crate::create_table::CreateTableData;
use crate::dialect::{DialectPolicy, LimitStyle, StatementKind};
use crate::drop::DropData;
use crate::options::RenderOptions;
use crate::query::{JoinCondition, SelectData};
use crate::string_builder::StringBuilder;
use crate::table::{Source, TableId, TableRef};
use std::borrow::Cow;

/// term 所处的位置，决定别名如何输出。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    /// SELECT 列表：`expr "alias"`
    Select,
    /// GROUP BY / ORDER BY：别名出现在 SELECT 列表时只输出别名
    Reference,
    /// 其它位置：只输出表达式
    Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Namespace {
    /// 无别名的物理表，用表名限定
    Name(String),
    Explicit(String),
    /// 渲染器分配的 `sqN`，永不加引号
    Implicit(String),
}

/// 一条语句的来源表及其限定名。
#[derive(Debug, Default)]
pub(crate) struct Scope {
    entries: Vec<(TableId, Namespace)>,
}

impl Scope {
    fn of(query: &SelectData) -> Self {
        let mut next_sq = 0usize;
        let entries = query
            .sources()
            .map(|source| {
                let ns = match (source.alias(), source) {
                    (Some(alias), _) => Namespace::Explicit(alias.to_string()),
                    (None, Source::Table(t)) => Namespace::Name(t.name().to_string()),
                    (None, Source::Derived(_)) => {
                        let ns = Namespace::Implicit(format!("sq{next_sq}"));
                        next_sq += 1;
                        ns
                    }
                };
                (source.id(), ns)
            })
            .collect();
        Self { entries }
    }

    fn get(&self, id: TableId) -> Option<&Namespace> {
        self.entries
            .iter()
            .find_map(|(eid, ns)| (*eid == id).then_some(ns))
    }
}

pub(crate) struct RenderContext<'a> {
    pub(crate) policy: &'a DialectPolicy,
    quoting: bool,
    with_namespace: bool,
    scope: Option<&'a Scope>,
    selected_aliases: &'a [String],
}

impl<'a> RenderContext<'a> {
    pub(crate) fn standalone(policy: &'a DialectPolicy, options: &RenderOptions) -> Self {
        Self {
            policy,
            quoting: policy.applies_to(StatementKind::Select),
            with_namespace: options.with_namespace,
            scope: None,
            selected_aliases: &[],
        }
    }

    fn ddl(policy: &'a DialectPolicy, kind: StatementKind) -> Self {
        Self {
            policy,
            quoting: policy.applies_to(kind),
            with_namespace: false,
            scope: None,
            selected_aliases: &[],
        }
    }

    pub(crate) fn keyword<'k>(&self, kw: &'k str) -> Cow<'k, str> {
        self.policy.keyword(kw)
    }

    pub(crate) fn alias(&self, name: &str) -> String {
        if self.quoting {
            self.policy.quote_alias(name)
        } else {
            name.to_string()
        }
    }

    pub(crate) fn ident(&self, name: &str) -> String {
        if self.quoting {
            self.policy.quote_identifier(name)
        } else {
            name.to_string()
        }
    }

    pub(crate) fn is_selected_alias(&self, alias: &str) -> bool {
        self.selected_aliases.iter().any(|a| a == alias)
    }

    /// 字段的限定名；不需要限定时返回 `None`。
    pub(crate) fn qualifier(&self, table: &TableRef) -> Option<String> {
        if let Some(ns) = self.scope.and_then(|s| s.get(table.id)) {
            return match ns {
                Namespace::Implicit(alias) => Some(alias.clone()),
                Namespace::Explicit(alias) => Some(self.ident(alias)),
                Namespace::Name(name) => self.with_namespace.then(|| self.ident(name)),
            };
        }
        let ns = table.namespace.as_ref()?;
        (self.with_namespace || table.aliased).then(|| self.ident(ns))
    }

    fn write_table_name(&self, schema: Option<&str>, name: &str, out: &mut String) {
        if let Some(schema) = schema {
            out.push_str(&self.ident(schema));
            out.push('.');
        }
        out.push_str(&self.ident(name));
    }
}

/// 渲染一条 SELECT。内层派生表沿用外层的 `policy`，但各自决定限定名与 `sqN`。
pub(crate) fn render_select(query: &SelectData, policy: &DialectPolicy) -> String {
    let scope = Scope::of(query);
    let selected_aliases: Vec<String> = query
        .select
        .iter()
        .filter_map(|t| t.alias().map(str::to_string))
        .collect();
    let with_namespace =
        !query.joins.is_empty() || query.from.as_ref().is_some_and(Source::is_derived);
    let ctx = RenderContext {
        policy,
        quoting: policy.applies_to(StatementKind::Select),
        with_namespace,
        scope: Some(&scope),
        selected_aliases: &selected_aliases,
    };

    let mut buf = StringBuilder::new();

    buf.write_leading(&ctx.keyword("SELECT"));
    if query.distinct {
        buf.write_char(' ');
        buf.write_str(&ctx.keyword("DISTINCT"));
    }
    let cols: Vec<String> = query
        .select
        .iter()
        .map(|t| {
            let mut s = String::new();
            t.render_in(&ctx, Position::Select, &mut s);
            s
        })
        .collect();
    buf.write_char(' ');
    buf.write_strings(&cols, ",");

    if let Some(from) = &query.from {
        buf.write_leading(&ctx.keyword("FROM"));
        buf.write_char(' ');
        buf.write_str(&render_source(&ctx, &scope, from));
    }

    for join in &query.joins {
        let mut kw = String::new();
        if let Some(prefix) = join.kind.prefix() {
            kw.push_str(prefix);
            kw.push(' ');
        }
        kw.push_str("JOIN");
        buf.write_leading(&ctx.keyword(&kw));
        buf.write_char(' ');
        buf.write_str(&render_source(&ctx, &scope, &join.source));

        match &join.condition {
            Some(JoinCondition::On(criterion)) => {
                buf.write_leading(&ctx.keyword("ON"));
                buf.write_char(' ');
                let mut s = String::new();
                criterion.render_in(&ctx, &mut s);
                buf.write_str(&s);
            }
            Some(JoinCondition::Using(cols)) => {
                buf.write_leading(&ctx.keyword("USING"));
                buf.write_str(" (");
                let cols: Vec<String> = cols.iter().map(|c| ctx.ident(c)).collect();
                buf.write_strings(&cols, ",");
                buf.write_char(')');
            }
            Some(JoinCondition::Cross) | None => {}
        }
    }

    if let Some(criterion) = &query.where_ {
        buf.write_leading(&ctx.keyword("WHERE"));
        buf.write_char(' ');
        let mut s = String::new();
        criterion.render_in(&ctx, &mut s);
        buf.write_str(&s);
    }

    if !query.group_by.is_empty() {
        buf.write_leading(&ctx.keyword("GROUP BY"));
        buf.write_char(' ');
        let cols: Vec<String> = query
            .group_by
            .iter()
            .map(|t| {
                let mut s = String::new();
                t.render_in(&ctx, Position::Reference, &mut s);
                s
            })
            .collect();
        buf.write_strings(&cols, ",");
    }

    if let Some(criterion) = &query.having {
        buf.write_leading(&ctx.keyword("HAVING"));
        buf.write_char(' ');
        let mut s = String::new();
        criterion.render_in(&ctx, &mut s);
        buf.write_str(&s);
    }

    if !query.order_by.is_empty() {
        buf.write_leading(&ctx.keyword("ORDER BY"));
        buf.write_char(' ');
        let cols: Vec<String> = query
            .order_by
            .iter()
            .map(|(t, order)| {
                let mut s = String::new();
                t.render_in(&ctx, Position::Reference, &mut s);
                if let Some(order) = order {
                    s.push(' ');
                    s.push_str(&ctx.keyword(order.as_str()));
                }
                s
            })
            .collect();
        buf.write_strings(&cols, ",");
    }

    write_limit_offset(&ctx, query, &mut buf);

    buf.into_string()
}

fn render_source(ctx: &RenderContext<'_>, scope: &Scope, source: &Source) -> String {
    let mut out = String::new();
    match source {
        Source::Table(t) => ctx.write_table_name(t.schema_name(), t.name(), &mut out),
        Source::Derived(q) => {
            out.push('(');
            out.push_str(&render_select(q.data(), ctx.policy));
            out.push(')');
        }
    }
    match scope.get(source.id()) {
        Some(Namespace::Explicit(alias)) => {
            out.push(' ');
            out.push_str(&ctx.alias(alias));
        }
        Some(Namespace::Implicit(alias)) => {
            out.push(' ');
            out.push_str(alias);
        }
        Some(Namespace::Name(_)) | None => {}
    }
    out
}

fn write_limit_offset(ctx: &RenderContext<'_>, query: &SelectData, buf: &mut StringBuilder) {
    let limit = query.limit.map(|n| n.to_string());
    let offset = query.offset.map(|n| n.to_string());

    let mut write = |kw: &str, n: &str| {
        buf.write_leading(&ctx.keyword(kw));
        buf.write_char(' ');
        buf.write_str(n);
    };

    match ctx.policy.limit_style {
        LimitStyle::LimitOffset => {
            if let Some(lim) = &limit {
                write("LIMIT", lim);
            }
            if let Some(off) = &offset {
                write("OFFSET", off);
            }
        }
        LimitStyle::OffsetLimit => {
            if let Some(off) = &offset {
                write("OFFSET", off);
            }
            if let Some(lim) = &limit {
                write("LIMIT", lim);
            }
        }
        LimitStyle::OffsetFetch { order_by_required } => {
            if limit.is_none() && offset.is_none() {
                return;
            }
            if order_by_required && query.order_by.is_empty() {
                write("ORDER BY", "1");
            }
            let off = offset.as_deref().unwrap_or("0");
            write("OFFSET", off);
            buf.write_char(' ');
            buf.write_str(&ctx.keyword("ROWS"));
            if let Some(lim) = &limit {
                buf.write_leading(&ctx.keyword("FETCH NEXT"));
                buf.write_char(' ');
                buf.write_str(lim);
                buf.write_char(' ');
                buf.write_str(&ctx.keyword("ROWS ONLY"));
            }
        }
    }
}

pub(crate) fn render_create_table(ct: &CreateTableData, policy: &DialectPolicy) -> String {
    let ctx = RenderContext::ddl(policy, StatementKind::CreateTable);
    let mut buf = StringBuilder::new();

    buf.write_leading(&ctx.keyword(if ct.temporary {
        "CREATE TEMPORARY TABLE"
    } else {
        "CREATE TABLE"
    }));
    if ct.if_not_exists {
        buf.write_leading(&ctx.keyword("IF NOT EXISTS"));
    }
    let mut name = String::new();
    ctx.write_table_name(ct.table.schema_name(), ct.table.name(), &mut name);
    buf.write_leading(&name);

    if let Some(query) = &ct.as_select {
        buf.write_leading(&ctx.keyword("AS"));
        buf.write_str(" (");
        buf.write_str(&render_select(query.data(), policy));
        buf.write_char(')');
        return buf.into_string();
    }

    let mut defs: Vec<String> = ct
        .columns
        .iter()
        .map(|c| {
            let mut s = ctx.ident(c.name());
            if let Some(ty) = c.column_type() {
                s.push(' ');
                s.push_str(ty);
            }
            match c.nullable_flag() {
                Some(false) => {
                    s.push(' ');
                    s.push_str(&ctx.keyword("NOT NULL"));
                }
                Some(true) => {
                    s.push(' ');
                    s.push_str(&ctx.keyword("NULL"));
                }
                None => {}
            }
            if let Some(default) = c.default_value() {
                s.push(' ');
                s.push_str(&ctx.keyword("DEFAULT"));
                s.push(' ');
                default.render_expr(&ctx, &mut s);
            }
            s
        })
        .collect();

    let mut key_clause = |kw: &str, cols: &[String]| {
        if cols.is_empty() {
            return;
        }
        let cols: Vec<String> = cols.iter().map(|c| ctx.ident(c)).collect();
        defs.push(format!("{} ({})", ctx.keyword(kw), cols.join(",")));
    };
    key_clause("PRIMARY KEY", &ct.primary_key);
    for unique in &ct.unique {
        key_clause("UNIQUE", unique);
    }

    buf.write_leading("(");
    buf.write_strings(&defs, ", ");
    buf.write_char(')');

    buf.into_string()
}

pub(crate) fn render_drop(drop: &DropData, policy: &DialectPolicy) -> String {
    let ctx = RenderContext::ddl(policy, drop.kind);
    let mut buf = StringBuilder::new();

    buf.write_leading(&ctx.keyword(match drop.kind {
        StatementKind::DropView => "DROP VIEW",
        _ => "DROP TABLE",
    }));
    if drop.if_exists {
        buf.write_leading(&ctx.keyword("IF EXISTS"));
    }
    let mut name = String::new();
    ctx.write_table_name(drop.table.schema_name(), drop.table.name(), &mut name);
    buf.write_leading(&name);

    buf.into_string()
}
