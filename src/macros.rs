//! 宏集合：把不同类型的值收集为 `Vec<Term>`，便于一次传给 `select` / `group_by` 等方法。

/// 把每个参数经 `Term::from` 转换后收集为 `Vec<Term>`。
///
/// 字符串转换为不属于任何表的字段（`"*"` 为 `*`），数字与布尔值为字面量。
///
/// ```
/// use halo_query::{Flavor, Table, Term, functions::sum, terms};
///
/// let abc = Table::new("abc");
/// let cols: Vec<Term> = terms![abc.field("a"), sum(abc.field("b")), 1, "*"];
/// assert_eq!(cols.len(), 4);
/// assert_eq!(cols[3].to_sql(Flavor::Generic), "*");
/// ```
#[macro_export]
macro_rules! terms {
    () => {
        ::std::vec::Vec::<$crate::Term>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Term::from($value)),+]
    };
}
