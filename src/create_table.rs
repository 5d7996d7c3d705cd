//! CreateTableBuilder：构建 CREATE TABLE。
//!
//! DDL 默认不加引号，见 [`DialectPolicy::applies_to`]。

use crate::dialect::DialectPolicy;
use crate::error::BuildError;
use crate::options::RenderOptions;
use crate::query::SelectQuery;
use crate::render::render_create_table;
use crate::table::Table;
use crate::term::Term;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// 列定义：`name [type][ NOT NULL | NULL][ DEFAULT v]`。
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    column_type: Option<String>,
    nullable: Option<bool>,
    default: Option<Term>,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            column_type: Some(column_type.into()),
            ..Self::named(name)
        }
    }

    /// 不带类型的列。
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: None,
            nullable: None,
            default: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = Some(false);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = Some(true);
        self
    }

    pub fn default(mut self, value: impl Into<Term>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn column_type(&self) -> Option<&str> {
        self.column_type.as_deref()
    }

    pub(crate) fn nullable_flag(&self) -> Option<bool> {
        self.nullable
    }

    pub(crate) fn default_value(&self) -> Option<&Term> {
        self.default.as_ref()
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}

/// `(name, type)`
impl<N: Into<String>, T: Into<String>> From<(N, T)> for Column {
    fn from((name, ty): (N, T)) -> Self {
        Self::new(name, ty)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CreateTableData {
    pub(crate) policy: DialectPolicy,
    pub(crate) table: Table,
    pub(crate) temporary: bool,
    pub(crate) if_not_exists: bool,
    pub(crate) columns: Vec<Column>,
    pub(crate) primary_key: Vec<String>,
    pub(crate) unique: Vec<Vec<String>>,
    pub(crate) as_select: Option<SelectQuery>,
}

#[derive(Debug, Clone)]
pub struct CreateTableBuilder {
    data: CreateTableData,
}

impl CreateTableBuilder {
    pub fn new(policy: impl Into<DialectPolicy>, table: impl Into<Table>) -> Self {
        Self {
            data: CreateTableData {
                policy: policy.into(),
                table: table.into(),
                temporary: false,
                if_not_exists: false,
                columns: Vec::new(),
                primary_key: Vec::new(),
                unique: Vec::new(),
                as_select: None,
            },
        }
    }

    /// 追加列定义。
    pub fn columns<I, C>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        self.data
            .columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn temporary(&mut self) -> &mut Self {
        self.data.temporary = true;
        self
    }

    pub fn if_not_exists(&mut self) -> &mut Self {
        self.data.if_not_exists = true;
        self
    }

    pub fn primary_key<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data.primary_key = columns.into_iter().map(Into::into).collect();
        self
    }

    /// 每次调用追加一个 UNIQUE 约束。
    pub fn unique<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data
            .unique
            .push(columns.into_iter().map(Into::into).collect());
        self
    }

    /// `CREATE TABLE name AS (select)`，与 `columns` 互斥。
    pub fn as_select(&mut self, query: &SelectQuery) -> &mut Self {
        self.data.as_select = Some(query.clone());
        self
    }

    pub fn build(&self) -> Result<CreateTable, BuildError> {
        let result = self.validate().map(|()| CreateTable {
            inner: Arc::new(self.data.clone()),
        });
        match &result {
            Ok(_) => debug!(table = self.data.table.name(), "create table built"),
            Err(err) => debug!(error = %err, "create table rejected"),
        }
        result
    }

    fn validate(&self) -> Result<(), BuildError> {
        let table = self.data.table.name().to_string();
        match (self.data.columns.is_empty(), &self.data.as_select) {
            (true, None) => return Err(BuildError::EmptyColumns { table }),
            (false, Some(_)) => return Err(BuildError::ConflictingDefinition { table }),
            _ => {}
        }
        let named = self
            .data
            .primary_key
            .iter()
            .chain(self.data.unique.iter().flatten())
            .map(String::as_str)
            .chain(self.data.columns.iter().map(Column::name));
        for name in named {
            if name.is_empty() {
                return Err(BuildError::EmptyFieldName);
            }
        }
        self.data
            .columns
            .iter()
            .filter_map(Column::default_value)
            .try_for_each(Term::check)
    }
}

/// 冻结的 CREATE TABLE 语句。
#[derive(Debug, Clone)]
pub struct CreateTable {
    inner: Arc<CreateTableData>,
}

impl CreateTable {
    pub fn table(&self) -> &Table {
        &self.inner.table
    }

    pub fn columns(&self) -> &[Column] {
        &self.inner.columns
    }

    pub fn policy(&self) -> &DialectPolicy {
        &self.inner.policy
    }

    pub fn to_sql(&self) -> String {
        self.render(&RenderOptions::default())
    }

    /// 语句按自身策略渲染；`options` 只影响单独渲染 term / criterion。
    pub fn render(&self, _options: &RenderOptions) -> String {
        render_create_table(&self.inner, &self.inner.policy)
    }
}

impl fmt::Display for CreateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
