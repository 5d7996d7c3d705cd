//! 常用 SQL 函数的构造器。

use crate::term::{Function, Term};

pub fn sum(term: impl Into<Term>) -> Function {
    Function::new("SUM", [term])
}

pub fn count(term: impl Into<Term>) -> Function {
    Function::new("COUNT", [term])
}

/// `COUNT(*)`
pub fn count_star() -> Function {
    Function::new("COUNT", [Term::star()])
}

pub fn avg(term: impl Into<Term>) -> Function {
    Function::new("AVG", [term])
}

pub fn min(term: impl Into<Term>) -> Function {
    Function::new("MIN", [term])
}

pub fn max(term: impl Into<Term>) -> Function {
    Function::new("MAX", [term])
}

pub fn abs(term: impl Into<Term>) -> Function {
    Function::new("ABS", [term])
}

pub fn lower(term: impl Into<Term>) -> Function {
    Function::new("LOWER", [term])
}

pub fn upper(term: impl Into<Term>) -> Function {
    Function::new("UPPER", [term])
}

pub fn coalesce<I, T>(terms: I) -> Function
where
    I: IntoIterator<Item = T>,
    T: Into<Term>,
{
    Function::new("COALESCE", terms)
}

pub fn concat<I, T>(terms: I) -> Function
where
    I: IntoIterator<Item = T>,
    T: Into<Term>,
{
    Function::new("CONCAT", terms)
}
