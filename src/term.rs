//! Term：字段、字面量、函数调用、算术表达式及其别名。

use crate::criterion::Criterion;
use crate::dialect::DialectPolicy;
use crate::error::BuildError;
use crate::flavor::Flavor;
use crate::options::RenderOptions;
use crate::render::{Position, RenderContext};
use crate::table::TableRef;
use crate::value::SqlValue;
use std::ops::{Add, Div, Mul, Sub};

/// 列引用。
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    table: Option<TableRef>,
}

impl Field {
    pub(crate) fn bound(name: impl Into<String>, table: TableRef) -> Self {
        Self {
            name: name.into(),
            table: Some(table),
        }
    }

    /// 不属于任何表的字段，永远不加限定名。
    pub fn unbound(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn table(&self) -> Option<&TableRef> {
        self.table.as_ref()
    }
}

/// 算术运算符。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithmeticOp {
    fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
        }
    }

    fn is_associative(self) -> bool {
        matches!(self, Self::Add | Self::Mul)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arithmetic {
    op: ArithmeticOp,
    left: Box<Term>,
    right: Box<Term>,
}

impl Arithmetic {
    pub fn new(op: ArithmeticOp, left: impl Into<Term>, right: impl Into<Term>) -> Self {
        Self {
            op,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    fn precedence_of(term: &Term) -> Option<u8> {
        match term.unaliased() {
            Term::Arithmetic(a) => Some(a.op.precedence()),
            _ => None,
        }
    }

    fn render(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let prec = self.op.precedence();
        let left_parens = Self::precedence_of(&self.left).is_some_and(|p| p < prec);
        let right_parens = Self::precedence_of(&self.right)
            .is_some_and(|p| p < prec || (p == prec && !self.op.is_associative()));

        render_wrapped(&self.left, ctx, left_parens, out);
        out.push(self.op.symbol());
        render_wrapped(&self.right, ctx, right_parens, out);
    }
}

fn render_wrapped(term: &Term, ctx: &RenderContext<'_>, parens: bool, out: &mut String) {
    if parens {
        out.push('(');
    }
    term.render_in(ctx, Position::Expression, out);
    if parens {
        out.push(')');
    }
}

/// 函数调用，渲染为 `NAME(arg,...)`。
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    name: String,
    args: Vec<Term>,
    distinct: bool,
}

impl Function {
    /// 函数名统一转为大写。
    pub fn new<I, T>(name: &str, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Self {
            name: name.to_uppercase(),
            args: args.into_iter().map(Into::into).collect(),
            distinct: false,
        }
    }

    /// `NAME(DISTINCT ...)`
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_(self, alias: impl Into<String>) -> Term {
        Term::from(self).as_(alias)
    }

    fn render(&self, ctx: &RenderContext<'_>, out: &mut String) {
        out.push_str(&self.name);
        out.push('(');
        if self.distinct {
            out.push_str(&ctx.keyword("DISTINCT"));
            out.push(' ');
        }
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            arg.render_in(ctx, Position::Expression, out);
        }
        out.push(')');
    }
}

/// 排序方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// 可渲染的 SQL 表达式节点。
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Field(Field),
    /// `*` 或 `table.*`
    Star(Option<TableRef>),
    Literal(SqlValue),
    Function(Function),
    Arithmetic(Arithmetic),
    Criterion(Box<Criterion>),
    Aliased(Box<Term>, String),
}

impl Term {
    /// 不属于任何表的字段；`"*"` 得到 `Star`。
    pub fn field(name: impl Into<String>) -> Self {
        let name = name.into();
        if name == "*" {
            return Self::Star(None);
        }
        Self::Field(Field::unbound(name))
    }

    pub fn star() -> Self {
        Self::Star(None)
    }

    /// 字面量（字符串请走这里，`&str` 直接转换得到的是字段）。
    pub fn value(v: impl Into<SqlValue>) -> Self {
        Self::Literal(v.into())
    }

    pub fn null() -> Self {
        Self::Literal(SqlValue::Null)
    }

    /// 设置别名；已有别名时替换。
    pub fn as_(self, alias: impl Into<String>) -> Self {
        match self {
            Self::Aliased(inner, _) => Self::Aliased(inner, alias.into()),
            other => Self::Aliased(Box::new(other), alias.into()),
        }
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::Aliased(_, alias) => Some(alias),
            _ => None,
        }
    }

    /// 去掉别名后的表达式。
    pub fn unaliased(&self) -> &Term {
        match self {
            Self::Aliased(inner, _) => inner.unaliased(),
            other => other,
        }
    }

    pub fn is_star(&self) -> bool {
        matches!(self.unaliased(), Self::Star(None))
    }

    pub fn to_sql(&self, flavor: Flavor) -> String {
        self.render(&flavor.policy(), &RenderOptions::default())
    }

    /// 脱离语句单独渲染（按 SELECT 列表的位置输出别名）。
    pub fn render(&self, policy: &DialectPolicy, options: &RenderOptions) -> String {
        let ctx = RenderContext::standalone(policy, options);
        let mut out = String::new();
        self.render_in(&ctx, Position::Select, &mut out);
        out
    }

    pub(crate) fn render_in(&self, ctx: &RenderContext<'_>, pos: Position, out: &mut String) {
        match self {
            Self::Aliased(inner, alias) => match pos {
                Position::Select => {
                    inner.render_in(ctx, Position::Expression, out);
                    out.push(' ');
                    out.push_str(&ctx.alias(alias));
                }
                Position::Reference if ctx.is_selected_alias(alias) => {
                    out.push_str(&ctx.alias(alias));
                }
                _ => inner.render_in(ctx, Position::Expression, out),
            },
            Self::Field(f) => {
                if let Some(q) = f.table().and_then(|t| ctx.qualifier(t)) {
                    out.push_str(&q);
                    out.push('.');
                }
                out.push_str(&ctx.ident(f.name()));
            }
            Self::Star(table) => {
                if let Some(q) = table.as_ref().and_then(|t| ctx.qualifier(t)) {
                    out.push_str(&q);
                    out.push('.');
                }
                out.push('*');
            }
            Self::Literal(v) => v.write_literal(out, ctx.policy),
            Self::Function(f) => f.render(ctx, out),
            Self::Arithmetic(a) => a.render(ctx, out),
            Self::Criterion(c) => c.render_in(ctx, out),
        }
    }

    /// 非别名位置的简写。
    pub(crate) fn render_expr(&self, ctx: &RenderContext<'_>, out: &mut String) {
        self.render_in(ctx, Position::Expression, out);
    }

    /// 构建前的合法性检查：字段名非空、字面量可内联。
    pub(crate) fn check(&self) -> Result<(), BuildError> {
        match self {
            Self::Field(field) if field.name().is_empty() => Err(BuildError::EmptyFieldName),
            Self::Field(_) | Self::Star(_) => Ok(()),
            Self::Literal(v) => v.check(),
            Self::Function(func) => func.args.iter().try_for_each(Term::check),
            Self::Arithmetic(a) => {
                a.left.check()?;
                a.right.check()
            }
            Self::Criterion(c) => c.check(),
            Self::Aliased(inner, _) => inner.check(),
        }
    }

    /// 遍历引用到的表（字段与 `table.*`），回调参数是引用和被引用的名字。
    pub(crate) fn visit_table_refs(&self, f: &mut dyn FnMut(&TableRef, &str)) {
        match self {
            Self::Field(field) => {
                if let Some(t) = field.table() {
                    f(t, field.name());
                }
            }
            Self::Star(Some(t)) => f(t, "*"),
            Self::Star(None) | Self::Literal(_) => {}
            Self::Function(func) => func.args.iter().for_each(|a| a.visit_table_refs(f)),
            Self::Arithmetic(a) => {
                a.left.visit_table_refs(f);
                a.right.visit_table_refs(f);
            }
            Self::Criterion(c) => c.visit_table_refs(f),
            Self::Aliased(inner, _) => inner.visit_table_refs(f),
        }
    }

    pub fn equal(self, other: impl Into<Term>) -> Criterion {
        Criterion::compare(crate::criterion::Comparator::Equal, self, other)
    }

    pub fn not_equal(self, other: impl Into<Term>) -> Criterion {
        Criterion::compare(crate::criterion::Comparator::NotEqual, self, other)
    }

    pub fn gt(self, other: impl Into<Term>) -> Criterion {
        Criterion::compare(crate::criterion::Comparator::GreaterThan, self, other)
    }

    pub fn gte(self, other: impl Into<Term>) -> Criterion {
        Criterion::compare(crate::criterion::Comparator::GreaterEqual, self, other)
    }

    pub fn lt(self, other: impl Into<Term>) -> Criterion {
        Criterion::compare(crate::criterion::Comparator::LessThan, self, other)
    }

    pub fn lte(self, other: impl Into<Term>) -> Criterion {
        Criterion::compare(crate::criterion::Comparator::LessEqual, self, other)
    }

    pub fn like(self, pattern: impl Into<Term>) -> Criterion {
        Criterion::compare(crate::criterion::Comparator::Like, self, pattern)
    }

    pub fn not_like(self, pattern: impl Into<Term>) -> Criterion {
        Criterion::compare(crate::criterion::Comparator::NotLike, self, pattern)
    }

    pub fn in_<I, T>(self, values: I) -> Criterion
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Criterion::contains(self, values, false)
    }

    pub fn not_in<I, T>(self, values: I) -> Criterion
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        Criterion::contains(self, values, true)
    }

    pub fn between(self, low: impl Into<Term>, high: impl Into<Term>) -> Criterion {
        Criterion::range(self, low, high, false)
    }

    pub fn not_between(self, low: impl Into<Term>, high: impl Into<Term>) -> Criterion {
        Criterion::range(self, low, high, true)
    }

    pub fn is_null(self) -> Criterion {
        Criterion::null_check(self, false)
    }

    pub fn is_not_null(self) -> Criterion {
        Criterion::null_check(self, true)
    }
}

impl From<Field> for Term {
    fn from(v: Field) -> Self {
        Self::Field(v)
    }
}

impl From<Function> for Term {
    fn from(v: Function) -> Self {
        Self::Function(v)
    }
}

impl From<Arithmetic> for Term {
    fn from(v: Arithmetic) -> Self {
        Self::Arithmetic(v)
    }
}

impl From<Criterion> for Term {
    fn from(v: Criterion) -> Self {
        Self::Criterion(Box::new(v))
    }
}

impl From<SqlValue> for Term {
    fn from(v: SqlValue) -> Self {
        Self::Literal(v)
    }
}

impl From<&Term> for Term {
    fn from(v: &Term) -> Self {
        v.clone()
    }
}

impl From<&str> for Term {
    fn from(name: &str) -> Self {
        Self::field(name)
    }
}

impl From<String> for Term {
    fn from(name: String) -> Self {
        Self::field(name)
    }
}

macro_rules! literal_term_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Term {
                fn from(v: $t) -> Self {
                    Self::Literal(SqlValue::from(v))
                }
            }
        )*
    };
}

literal_term_from!(bool, i32, i64, u32, u64, f64);

macro_rules! arithmetic_op {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<T: Into<Term>> $trait<T> for Term {
            type Output = Term;

            fn $method(self, rhs: T) -> Term {
                Term::Arithmetic(Arithmetic::new($op, self, rhs))
            }
        }
    };
}

arithmetic_op!(Add, add, ArithmeticOp::Add);
arithmetic_op!(Sub, sub, ArithmeticOp::Sub);
arithmetic_op!(Mul, mul, ArithmeticOp::Mul);
arithmetic_op!(Div, div, ArithmeticOp::Div);
