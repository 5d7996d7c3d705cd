//! 构建与配置错误。

/// `build()` 时检测到的结构错误；出错时不会产生任何语句。
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("builder select list is empty")]
    EmptySelect,
    #[error("builder join #{index} on {table} has no ON/USING condition")]
    IncompleteJoin { index: usize, table: String },
    #[error("builder field {field} references a table that is not a source of this query")]
    UnknownTable { field: String },
    #[error("builder source {table} is used more than once; alias a separate table instance")]
    DuplicateSource { table: String },
    #[error("builder join requires a FROM source")]
    JoinWithoutFrom,
    #[error("builder create table {table} has no columns")]
    EmptyColumns { table: String },
    #[error("builder create table {table} cannot have both columns and AS SELECT")]
    ConflictingDefinition { table: String },
    #[error("builder field or column name is empty")]
    EmptyFieldName,
    #[error("builder IN list on {term} is empty")]
    EmptyInList { term: String },
    #[error("builder literal {value} is not a finite number")]
    NonFiniteFloat { value: String },
    #[error("builder literal cannot be formatted: {reason}")]
    UnformattableLiteral { reason: String },
}

/// 渲染选项解析错误。
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("render option {0:?} is not recognized")]
    UnknownOption(String),
    #[error("render option {key:?} has invalid value {value:?}")]
    InvalidValue { key: String, value: String },
}
