#[cfg(test)]
mod tests {
    use crate::{BuildError, Flavor, Query, SelectQuery, Statement, Table, terms};
    use pretty_assertions::assert_eq;
    use std::thread;

    fn select_b(flavor: Flavor, table: &Table) -> SelectQuery {
        Query::new(flavor)
            .from(table)
            .select(terms![table.field("b")])
            .build()
            .unwrap()
    }

    #[test]
    fn derived_from_qualifies_with_implicit_alias() {
        let abc = Table::new("abc");
        let sub = select_b(Flavor::Generic, &abc);
        let q = Query::new(Flavor::Generic)
            .from(&sub)
            .select(terms![sub.field("b")])
            .build()
            .unwrap();

        assert_eq!(
            q.to_sql(),
            r#"SELECT sq0."b" FROM (SELECT "b" FROM "abc") sq0"#
        );
    }

    #[test]
    fn explicit_alias_does_not_consume_counter() {
        let abc = Table::new("abc");
        let efg = Table::new("efg");
        let s = select_b(Flavor::Generic, &abc).as_("s");
        let other = select_b(Flavor::Generic, &efg);
        let q = Query::new(Flavor::Generic)
            .from(&s)
            .join(&other)
            .on(s.field("b").equal(other.field("b")))
            .select(["*"])
            .build()
            .unwrap();

        assert_eq!(
            q.to_sql(),
            r#"SELECT * FROM (SELECT "b" FROM "abc") "s" JOIN (SELECT "b" FROM "efg") sq0 ON "s"."b"=sq0."b""#
        );
    }

    #[test]
    fn counter_restarts_per_statement_level() {
        let abc = Table::new("abc");
        let innermost = select_b(Flavor::Generic, &abc);
        let middle = Query::new(Flavor::Generic)
            .from(&innermost)
            .select(terms![innermost.field("b")])
            .build()
            .unwrap();
        let outer = Query::new(Flavor::Generic)
            .from(&middle)
            .select(terms![middle.field("b")])
            .build()
            .unwrap();

        assert_eq!(
            outer.to_sql(),
            r#"SELECT sq0."b" FROM (SELECT sq0."b" FROM (SELECT "b" FROM "abc") sq0) sq0"#
        );
    }

    #[test]
    fn embedded_query_is_a_snapshot() {
        let abc = Table::new("abc");
        let mut sb = Query::new(Flavor::Generic).from(&abc);
        sb.select(terms![abc.field("b")]);
        let sub = sb.build().unwrap();

        let q = Query::new(Flavor::Generic)
            .from(&sub)
            .select(["*"])
            .build()
            .unwrap();
        let before = q.to_sql();

        sb.where_(abc.field("b").gt(1));

        assert_eq!(q.to_sql(), before);
        assert_eq!(before, r#"SELECT * FROM (SELECT "b" FROM "abc") sq0"#);
    }

    #[test]
    fn builder_field_refers_to_built_query() {
        let abc = Table::new("abc");
        let mut sb = Query::new(Flavor::Databricks).from(&abc);
        sb.select(terms![abc.field("b")]).as_("t");
        let b = sb.field("b");
        let sub = sb.build().unwrap();

        let q = Query::new(Flavor::Databricks)
            .from(&sub)
            .select(terms![b])
            .build()
            .unwrap();

        assert_eq!(q.to_sql(), r#"SELECT t.b FROM (SELECT b FROM abc) "t""#);
    }

    #[test]
    fn each_build_is_a_distinct_relation() {
        let abc = Table::new("abc");
        let mut sb = Query::new(Flavor::Generic).from(&abc);
        sb.select(terms![abc.field("b")]);
        let v1 = sb.build().unwrap();
        sb.where_(abc.field("b").gt(1));
        let v2 = sb.build().unwrap();

        let q = Query::new(Flavor::Generic)
            .from(&v1)
            .join(&v2)
            .on(v1.field("b").equal(v2.field("b")))
            .select(["*"])
            .build()
            .unwrap();

        assert_eq!(
            q.to_sql(),
            r#"SELECT * FROM (SELECT "b" FROM "abc") sq0 JOIN (SELECT "b" FROM "abc" WHERE "b">1) sq1 ON sq0."b"=sq1."b""#
        );
    }

    #[test]
    fn unaliased_subquery_in_errors_has_no_internal_id() {
        let abc = Table::new("abc");
        let sub = select_b(Flavor::Generic, &abc);
        let err = Query::new(Flavor::Generic)
            .from(&sub)
            .join(&sub)
            .cross()
            .select(["*"])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::DuplicateSource {
                table: "(subquery)".into()
            }
        );

        let err = Query::new(Flavor::Generic)
            .from(&abc)
            .select(terms![sub.field("b")])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::UnknownTable {
                field: "(subquery).b".into()
            }
        );
    }

    #[test]
    fn inner_query_uses_outer_policy() {
        let abc = Table::new("abc");
        let sub = select_b(Flavor::MySQL, &abc);
        assert_eq!(sub.to_sql(), "SELECT `b` FROM `abc`");

        let q = Query::new(Flavor::Generic)
            .from(&sub)
            .select(["*"])
            .build()
            .unwrap();
        assert_eq!(q.to_sql(), r#"SELECT * FROM (SELECT "b" FROM "abc") sq0"#);
    }

    #[test]
    fn rendering_is_idempotent() {
        let abc = Table::new("abc");
        let efg = Table::new("efg");
        let sub1 = select_b(Flavor::Generic, &abc);
        let sub2 = select_b(Flavor::Generic, &efg);
        let q = Query::new(Flavor::Generic)
            .from(&sub1)
            .join(&sub2)
            .on(sub1.field("b").equal(sub2.field("b")))
            .select(["*"])
            .build()
            .unwrap();
        let stmt = Statement::from(q.clone());

        assert_eq!(q.to_sql(), q.to_sql());
        assert_eq!(stmt.to_sql(), q.to_sql());
        assert_eq!(q.to_string(), q.to_sql());
    }

    #[test]
    fn concurrent_rendering() {
        let abc = Table::new("abc");
        let sub = select_b(Flavor::Generic, &abc);
        let q = Query::new(Flavor::Generic)
            .from(&sub)
            .select(terms![sub.field("b")])
            .build()
            .unwrap();
        let expected = q.to_sql();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let q = q.clone();
                thread::spawn(move || q.to_sql())
            })
            .collect();

        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    }
}
