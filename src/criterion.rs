//! Criterion：比较、区间、集合、空值判断与 AND/OR/NOT 组合。

use crate::dialect::DialectPolicy;
use crate::error::BuildError;
use crate::flavor::Flavor;
use crate::options::RenderOptions;
use crate::render::RenderContext;
use crate::table::TableRef;
use crate::term::Term;
use std::ops::{BitAnd, BitOr, Not};

/// 比较运算符。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterEqual,
    LessThan,
    LessEqual,
    Like,
    NotLike,
}

impl Comparator {
    fn write(self, ctx: &RenderContext<'_>, out: &mut String) {
        let op = match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::GreaterThan => ">",
            Self::GreaterEqual => ">=",
            Self::LessThan => "<",
            Self::LessEqual => "<=",
            Self::Like => {
                write_spaced(ctx, "LIKE", out);
                return;
            }
            Self::NotLike => {
                write_spaced(ctx, "NOT LIKE", out);
                return;
            }
        };
        out.push_str(op);
    }
}

fn write_spaced(ctx: &RenderContext<'_>, kw: &str, out: &mut String) {
    out.push(' ');
    out.push_str(&ctx.keyword(kw));
    out.push(' ');
}

/// 逻辑连接词。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// 谓词，用于 WHERE / ON / HAVING。
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    Compare {
        op: Comparator,
        left: Term,
        right: Term,
    },
    Between {
        term: Term,
        low: Term,
        high: Term,
        negated: bool,
    },
    In {
        term: Term,
        values: Vec<Term>,
        negated: bool,
    },
    Null {
        term: Term,
        negated: bool,
    },
    Complex {
        connective: Connective,
        left: Box<Criterion>,
        right: Box<Criterion>,
    },
    Not(Box<Criterion>),
}

impl Criterion {
    pub fn compare(op: Comparator, left: impl Into<Term>, right: impl Into<Term>) -> Self {
        Self::Compare {
            op,
            left: left.into(),
            right: right.into(),
        }
    }

    pub(crate) fn contains<I, T>(term: Term, values: I, negated: bool) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Self::In {
            term,
            values: values.into_iter().map(Into::into).collect(),
            negated,
        }
    }

    pub(crate) fn range(term: Term, low: impl Into<Term>, high: impl Into<Term>, negated: bool) -> Self {
        Self::Between {
            term,
            low: low.into(),
            high: high.into(),
            negated,
        }
    }

    pub(crate) fn null_check(term: Term, negated: bool) -> Self {
        Self::Null { term, negated }
    }

    pub fn and(self, other: Criterion) -> Self {
        Self::Complex {
            connective: Connective::And,
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    pub fn or(self, other: Criterion) -> Self {
        Self::Complex {
            connective: Connective::Or,
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// 用 AND 连接全部谓词；空迭代返回 `None`。
    pub fn all(criteria: impl IntoIterator<Item = Criterion>) -> Option<Self> {
        criteria.into_iter().reduce(Criterion::and)
    }

    /// 用 OR 连接全部谓词；空迭代返回 `None`。
    pub fn any(criteria: impl IntoIterator<Item = Criterion>) -> Option<Self> {
        criteria.into_iter().reduce(Criterion::or)
    }

    pub fn to_sql(&self, flavor: Flavor) -> String {
        self.render(&flavor.policy(), &RenderOptions::default())
    }

    pub fn render(&self, policy: &DialectPolicy, options: &RenderOptions) -> String {
        let ctx = RenderContext::standalone(policy, options);
        let mut out = String::new();
        self.render_in(&ctx, &mut out);
        out
    }

    pub(crate) fn render_in(&self, ctx: &RenderContext<'_>, out: &mut String) {
        match self {
            Self::Compare { op, left, right } => {
                left.render_expr(ctx, out);
                op.write(ctx, out);
                right.render_expr(ctx, out);
            }
            Self::Between {
                term,
                low,
                high,
                negated,
            } => {
                term.render_expr(ctx, out);
                write_spaced(ctx, if *negated { "NOT BETWEEN" } else { "BETWEEN" }, out);
                low.render_expr(ctx, out);
                write_spaced(ctx, "AND", out);
                high.render_expr(ctx, out);
            }
            Self::In {
                term,
                values,
                negated,
            } => {
                term.render_expr(ctx, out);
                write_spaced(ctx, if *negated { "NOT IN" } else { "IN" }, out);
                out.push('(');
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    v.render_expr(ctx, out);
                }
                out.push(')');
            }
            Self::Null { term, negated } => {
                term.render_expr(ctx, out);
                out.push(' ');
                out.push_str(&ctx.keyword(if *negated { "IS NOT NULL" } else { "IS NULL" }));
            }
            Self::Complex {
                connective,
                left,
                right,
            } => {
                left.render_operand(ctx, Some(*connective), out);
                write_spaced(ctx, connective.as_str(), out);
                right.render_operand(ctx, Some(*connective), out);
            }
            Self::Not(inner) => {
                out.push_str(&ctx.keyword("NOT"));
                out.push(' ');
                inner.render_operand(ctx, None, out);
            }
        }
    }

    /// 作为子项渲染：连接词不同（或在 NOT 之下）的组合谓词加括号。
    fn render_operand(&self, ctx: &RenderContext<'_>, parent: Option<Connective>, out: &mut String) {
        let parens = match self {
            Self::Complex { connective, .. } => parent != Some(*connective),
            _ => false,
        };
        if parens {
            out.push('(');
        }
        self.render_in(ctx, out);
        if parens {
            out.push(')');
        }
    }

    /// 构建前的合法性检查；`IN ()` 不是合法 SQL。
    pub(crate) fn check(&self) -> Result<(), BuildError> {
        match self {
            Self::Compare { left, right, .. } => {
                left.check()?;
                right.check()
            }
            Self::Between { term, low, high, .. } => {
                term.check()?;
                low.check()?;
                high.check()
            }
            Self::In { term, values, .. } => {
                term.check()?;
                if values.is_empty() {
                    return Err(BuildError::EmptyInList {
                        term: term.to_sql(Flavor::Generic),
                    });
                }
                values.iter().try_for_each(Term::check)
            }
            Self::Null { term, .. } => term.check(),
            Self::Complex { left, right, .. } => {
                left.check()?;
                right.check()
            }
            Self::Not(inner) => inner.check(),
        }
    }

    pub(crate) fn visit_table_refs(&self, f: &mut dyn FnMut(&TableRef, &str)) {
        match self {
            Self::Compare { left, right, .. } => {
                left.visit_table_refs(f);
                right.visit_table_refs(f);
            }
            Self::Between { term, low, high, .. } => {
                term.visit_table_refs(f);
                low.visit_table_refs(f);
                high.visit_table_refs(f);
            }
            Self::In { term, values, .. } => {
                term.visit_table_refs(f);
                values.iter().for_each(|v| v.visit_table_refs(f));
            }
            Self::Null { term, .. } => term.visit_table_refs(f),
            Self::Complex { left, right, .. } => {
                left.visit_table_refs(f);
                right.visit_table_refs(f);
            }
            Self::Not(inner) => inner.visit_table_refs(f),
        }
    }
}

impl BitAnd for Criterion {
    type Output = Criterion;

    fn bitand(self, rhs: Criterion) -> Criterion {
        self.and(rhs)
    }
}

impl BitOr for Criterion {
    type Output = Criterion;

    fn bitor(self, rhs: Criterion) -> Criterion {
        self.or(rhs)
    }
}

impl Not for Criterion {
    type Output = Criterion;

    fn not(self) -> Criterion {
        self.negate()
    }
}
