//! halo-sql-query：以 term 树构建 SELECT / CREATE TABLE / DROP 语句，并按方言渲染为 SQL 文本。

pub mod builder;
pub mod create_table;
pub mod criterion;
#[cfg(test)]
mod databricks_tests;
pub mod dialect;
pub mod drop;
pub mod error;
pub mod flavor;
pub mod functions;
pub mod macros;
pub mod options;
pub mod query;
mod render;
pub mod select;
pub mod statement;
mod string_builder;
#[cfg(test)]
mod subquery_tests;
pub mod table;
pub mod term;
#[cfg(test)]
mod term_tests;
pub mod value;

pub use crate::builder::Query;
pub use crate::create_table::{Column, CreateTable, CreateTableBuilder};
pub use crate::criterion::{Comparator, Connective, Criterion};
pub use crate::dialect::{DialectPolicy, KeywordCase, LimitStyle, QuotePair, StatementKind};
pub use crate::drop::{DropBuilder, DropStatement};
pub use crate::error::{BuildError, ConfigError};
pub use crate::flavor::Flavor;
pub use crate::options::{RenderOptions, Strictness};
pub use crate::query::{Join, JoinCondition, JoinKind, SelectQuery};
pub use crate::select::{Joiner, SelectBuilder};
pub use crate::statement::Statement;
pub use crate::table::{Source, Table, TableId, TableRef, tables};
pub use crate::term::{Arithmetic, ArithmeticOp, Field, Function, Order, Term};
pub use crate::value::SqlValue;
