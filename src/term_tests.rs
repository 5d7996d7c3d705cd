#[cfg(test)]
mod tests {
    use crate::functions::{coalesce, count, count_star, lower};
    use crate::{Flavor, Function, RenderOptions, SqlValue, Table, Term};
    use pretty_assertions::assert_eq;

    fn with_namespace() -> RenderOptions {
        RenderOptions::default().with_namespace(true)
    }

    #[test]
    fn field_qualification_standalone() {
        let abc = Table::new("abc");
        let policy = Flavor::Generic.policy();

        assert_eq!(abc.field("a").to_sql(Flavor::Generic), r#""a""#);
        assert_eq!(abc.field("a").render(&policy, &with_namespace()), r#""abc"."a""#);
        assert_eq!(Term::field("a").render(&policy, &with_namespace()), r#""a""#);
    }

    #[test]
    fn aliased_table_always_qualifies() {
        let t = Table::new("abc").as_("t");
        assert_eq!(t.field("a").to_sql(Flavor::Generic), r#""t"."a""#);
        assert_eq!(t.field("a").to_sql(Flavor::Databricks), "t.a");
    }

    #[test]
    fn schema_does_not_change_qualifier() {
        let t = Table::new("abc").schema("s");
        let policy = Flavor::Databricks.policy();
        assert_eq!(t.field("a").render(&policy, &with_namespace()), "abc.a");
    }

    #[test]
    fn alias_renders_without_as_keyword() {
        let term = Term::field("a").as_("x");
        assert_eq!(term.to_sql(Flavor::Generic), r#""a" "x""#);
        assert_eq!(term.to_sql(Flavor::MySQL), "`a` `x`");
        assert_eq!(term.to_sql(Flavor::Databricks), r#"a "x""#);
    }

    #[test]
    fn realias_replaces_alias() {
        let term = Term::field("a").as_("x").as_("y");
        assert_eq!(term.alias(), Some("y"));
        assert_eq!(term.unaliased(), &Term::field("a"));
    }

    #[test]
    fn embedded_quote_is_doubled() {
        assert_eq!(Term::field(r#"we"ird"#).to_sql(Flavor::Generic), r#""we""ird""#);
    }

    #[test]
    fn star_terms() {
        assert!(Term::field("*").is_star());
        assert_eq!(Term::star().to_sql(Flavor::Generic), "*");

        let abc = Table::new("abc");
        let policy = Flavor::Generic.policy();
        assert!(!abc.star().is_star());
        assert_eq!(abc.star().render(&policy, &with_namespace()), r#""abc".*"#);
    }

    #[test]
    fn function_rendering() {
        assert_eq!(count_star().as_("n").to_sql(Flavor::Generic), r#"COUNT(*) "n""#);
        assert_eq!(
            Term::from(count(Term::field("a")).distinct()).to_sql(Flavor::Generic),
            r#"COUNT(DISTINCT "a")"#
        );
        assert_eq!(
            Term::from(Function::new("my_fn", [1, 2])).to_sql(Flavor::Generic),
            "MY_FN(1,2)"
        );
        assert_eq!(
            Term::from(coalesce([Term::field("a"), Term::value("x")])).to_sql(Flavor::Generic),
            r#"COALESCE("a",'x')"#
        );
        assert_eq!(
            Term::from(lower(Term::field("a"))).to_sql(Flavor::Databricks),
            "LOWER(a)"
        );
    }

    #[test]
    fn arithmetic_precedence() {
        let a = || Term::field("a");
        let b = || Term::field("b");
        let c = || Term::field("c");
        let sql = |t: Term| t.to_sql(Flavor::Databricks);

        assert_eq!(sql(a() + b() + c()), "a+b+c");
        assert_eq!(sql((a() + b()) * 2), "(a+b)*2");
        assert_eq!(sql(a() * b() + 1), "a*b+1");
        assert_eq!(sql(a() - (b() - c())), "a-(b-c)");
        assert_eq!(sql(a() + (b() + c())), "a+b+c");
        assert_eq!(sql(a() / (b() * 2)), "a/(b*2)");
    }

    #[test]
    fn literal_terms() {
        assert_eq!(Term::value("it's").to_sql(Flavor::Generic), "'it''s'");
        assert_eq!(Term::null().to_sql(Flavor::Generic), "NULL");
        assert_eq!(Term::from(true).to_sql(Flavor::Generic), "TRUE");
        assert_eq!(Term::from(1.5).to_sql(Flavor::Generic), "1.5");
        assert_eq!(
            Term::value(SqlValue::from_option::<i64>(None)),
            Term::null()
        );
    }

    #[test]
    fn strings_convert_to_fields() {
        assert_eq!(Term::from("a"), Term::field("a"));
        assert_eq!(Term::from(String::from("*")), Term::star());
    }
}
