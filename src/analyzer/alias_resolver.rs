use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::analyzer::{last_segment, Patterns, TableCollector};

pub struct AliasResolver;

impl AliasResolver {
    /// Maps every visible name of a physical table to that table.
    ///
    /// The key is the explicit alias (`FROM s.t x`, `FROM s.t AS x`) or, when
    /// there is none, the last segment of the table path. Several keys may point
    /// at the same table; on a key collision the later reference wins.
    pub fn resolve(patterns: &Patterns, text: &str, tables: &BTreeSet<String>) -> IndexMap<String, String> {
        let mut aliases = IndexMap::new();

        for caps in patterns.table_ref.captures_iter(text) {
            let Some(path) = caps.get(1) else {
                continue;
            };
            let table = TableCollector::canonical(path.as_str());
            if !tables.contains(&table) {
                continue;
            }

            let visible = patterns
                .alias_after(&text[path.end()..])
                .unwrap_or_else(|| last_segment(&table).to_string());
            aliases.insert(visible, table);
        }

        aliases
    }

    /// Maps aliases of CTE references (`FROM recent r`) to the CTE name.
    pub fn resolve_ctes(patterns: &Patterns, text: &str, cte_names: &BTreeSet<String>) -> IndexMap<String, String> {
        let mut aliases = IndexMap::new();

        for caps in patterns.table_ref.captures_iter(text) {
            let Some(path) = caps.get(1) else {
                continue;
            };
            let name = TableCollector::canonical(path.as_str());
            if !cte_names.contains(&name) {
                continue;
            }
            if let Some(alias) = patterns.alias_after(&text[path.end()..]) {
                aliases.insert(alias, name);
            }
        }

        aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::patterns;

    fn tables(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_resolve_explicit_and_implicit() {
        let text = "SELECT * FROM public.users AS U JOIN sales.orders ON orders.uid = U.id";
        let aliases = AliasResolver::resolve(patterns().unwrap(), text, &tables(&["public.users", "sales.orders"]));

        assert_eq!(aliases.get("u").map(String::as_str), Some("public.users"));
        assert_eq!(aliases.get("orders").map(String::as_str), Some("sales.orders"));
        assert_eq!(aliases.len(), 2);
    }

    #[test]
    fn test_resolve_many_aliases_one_table() {
        let text = "FROM public.a x JOIN public.a y ON x.id = y.parent_id";
        let aliases = AliasResolver::resolve(patterns().unwrap(), text, &tables(&["public.a"]));

        assert_eq!(aliases.get("x").map(String::as_str), Some("public.a"));
        assert_eq!(aliases.get("y").map(String::as_str), Some("public.a"));
    }

    #[test]
    fn test_resolve_last_wins() {
        let text = "FROM s.first t JOIN s.second t ON 1 = 1";
        let aliases = AliasResolver::resolve(patterns().unwrap(), text, &tables(&["s.first", "s.second"]));

        assert_eq!(aliases.get("t").map(String::as_str), Some("s.second"));
        assert_eq!(aliases.len(), 1);
    }

    #[test]
    fn test_resolve_keyword_is_not_alias() {
        let text = "FROM s.a\nWHERE a.x = 1";
        let aliases = AliasResolver::resolve(patterns().unwrap(), text, &tables(&["s.a"]));

        assert_eq!(aliases.get("a").map(String::as_str), Some("s.a"));
        assert!(aliases.get("where").is_none());
    }

    #[test]
    fn test_resolve_skips_unknown_tables() {
        let text = "FROM cte c JOIN s.t ON c.id = t.id";
        let aliases = AliasResolver::resolve(patterns().unwrap(), text, &tables(&["s.t"]));

        assert!(aliases.get("c").is_none());
        assert_eq!(aliases.get("t").map(String::as_str), Some("s.t"));
    }

    #[test]
    fn test_resolve_ctes() {
        let text = "FROM recent r JOIN s.t ON r.id = t.id JOIN other ON 1 = 1";
        let ctes = tables(&["recent", "other"]);
        let aliases = AliasResolver::resolve_ctes(patterns().unwrap(), text, &ctes);

        assert_eq!(aliases.get("r").map(String::as_str), Some("recent"));
        assert_eq!(aliases.len(), 1);
    }
}
