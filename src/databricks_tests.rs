#[cfg(test)]
mod tests {
    use crate::functions::sum;
    use crate::{Column, Flavor, Query, RenderOptions, Statement, Table, terms};
    use pretty_assertions::assert_eq;

    fn query() -> Query {
        Query::new(Flavor::Databricks)
    }

    #[test]
    fn select_alias_with_single_source() {
        let abc = Table::new("abc");
        let q = query()
            .from(&abc)
            .select(terms![abc.field("a").as_("bar")])
            .build()
            .unwrap();

        let options = RenderOptions::default().with_namespace(true);
        assert_eq!(q.render(&options), r#"SELECT a "bar" FROM abc"#);
    }

    #[test]
    fn join_qualifies_with_bare_aliases() {
        let abc = Table::new("abc").as_("foo");
        let efg = Table::new("efg").as_("bar");
        let q = query()
            .from(&abc)
            .join(&efg)
            .on(abc.field("fk").equal(efg.field("id")))
            .select(terms![abc.field("a"), efg.field("b")])
            .build()
            .unwrap();

        assert_eq!(
            q.to_sql(),
            r#"SELECT foo.a,bar.b FROM abc "foo" JOIN efg "bar" ON foo.fk=bar.id"#
        );
    }

    #[test]
    fn group_and_order_by_use_selected_alias() {
        let abc = Table::new("abc");
        let idx = abc.field("index").as_("idx");
        let val = sum(abc.field("value")).as_("val");
        let q = query()
            .from(&abc)
            .select(terms![&idx, val])
            .group_by(terms![&idx])
            .order_by(terms![idx])
            .build()
            .unwrap();

        assert_eq!(
            q.to_sql(),
            r#"SELECT index "idx",SUM(value) "val" FROM abc GROUP BY "idx" ORDER BY "idx""#
        );
    }

    #[test]
    fn unaliased_subqueries_get_implicit_aliases() {
        let abc = Table::new("abc");
        let efg = Table::new("efg");
        let sub1 = query()
            .from(&abc)
            .select(terms![abc.field("b")])
            .build()
            .unwrap();
        let sub2 = query()
            .from(&efg)
            .select(terms![efg.field("b")])
            .build()
            .unwrap();
        let q = query()
            .from(&sub1)
            .join(&sub2)
            .on(sub1.field("b").equal(sub2.field("b")))
            .select(["*"])
            .build()
            .unwrap();

        assert_eq!(
            q.to_sql(),
            "SELECT * FROM (SELECT b FROM abc) sq0 JOIN (SELECT b FROM efg) sq1 ON sq0.b=sq1.b"
        );
    }

    #[test]
    fn create_table_is_not_quoted() {
        let ct = query()
            .create_table("abc")
            .columns([Column::new("id", "INT")])
            .build()
            .unwrap();

        assert_eq!(ct.to_sql(), "CREATE TABLE abc (id INT)");
    }

    #[test]
    fn drop_table_is_not_quoted() {
        let drop = query().drop_table("abc").build().unwrap();
        let stmt = Statement::from(drop);

        assert_eq!(stmt.to_sql(), "DROP TABLE abc");
        assert_eq!(stmt.to_sql(), stmt.render(&RenderOptions::default()));
    }
}
