use std::{collections::BTreeSet, ops::Range};

use indexmap::IndexMap;
use tracing::debug;

use crate::analyzer::{last_segment, AliasResolver, Patterns, TableCollector};

/// A common table expression found in normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CteDefinition {
    /// lower-cased CTE name
    pub name: String,
    /// byte range of the body, between the opening and the closing parenthesis
    pub body: Range<usize>,
}

/// The `SELECT <list> FROM <table>` clause at the top of a CTE body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CteSource {
    pub table: String,
    pub alias: String,
    pub select_list: String,
}

pub struct CteExtractor;

impl CteExtractor {
    /// Finds every `WITH name AS (` head plus the `, name AS (` entries chained after it.
    ///
    /// Heads nested inside another CTE body are found too; each one is matched
    /// on its own, without any attempt to understand how the CTEs relate.
    pub fn extract(patterns: &Patterns, text: &str) -> Vec<CteDefinition> {
        let mut ctes = Vec::new();
        let mut cursor = 0;

        while let Some(caps) = patterns.cte_head.captures_at(text, cursor) {
            let (Some(head), Some(name)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            let first_body = head.end();
            let mut body_start = first_body;
            let mut name = name.as_str().to_lowercase();

            loop {
                let body_end = Self::closing_paren(text, body_start);
                ctes.push(CteDefinition { name, body: body_start..body_end });

                let after = (body_end + 1).min(text.len());
                let Some(chain) = patterns.cte_chain.captures(&text[after..]) else {
                    break;
                };
                let (Some(chain_head), Some(chain_name)) = (chain.get(0), chain.get(1)) else {
                    break;
                };
                name = chain_name.as_str().to_lowercase();
                body_start = after + chain_head.end();
            }

            cursor = first_body;
        }

        debug!(count = ctes.len(), "extracted CTE definitions");
        ctes
    }

    /// Byte offset of the `)` closing the parenthesis opened right before `start`,
    /// or the end of `text` when it never closes.
    fn closing_paren(text: &str, start: usize) -> usize {
        let mut depth = 1usize;
        for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
            match byte {
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return start + offset;
                    }
                }
                _ => {}
            }
        }
        text.len()
    }

    pub fn names(ctes: &[CteDefinition]) -> BTreeSet<String> {
        ctes.iter().map(|cte| cte.name.clone()).collect()
    }

    /// Text with every CTE body blanked out, leaving only the outer query.
    pub fn outer_text(text: &str, ctes: &[CteDefinition]) -> String {
        let mut bytes = text.as_bytes().to_vec();
        for cte in ctes {
            for byte in &mut bytes[cte.body.clone()] {
                *byte = b' ';
            }
        }
        // bodies are delimited by ASCII parentheses, so the result stays valid UTF-8
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Locates the `SELECT … FROM` clause of a CTE body.
    pub fn source(patterns: &Patterns, body: &str) -> Option<CteSource> {
        let caps = patterns.cte_select.captures(body)?;
        let whole = caps.get(0)?;
        let table = caps[2].trim_end_matches('.').to_lowercase();
        if table.is_empty() {
            return None;
        }
        let alias = patterns
            .alias_after(&body[whole.end()..])
            .unwrap_or_else(|| last_segment(&table).to_string());

        Some(CteSource {
            table,
            alias,
            select_list: caps[1].to_string(),
        })
    }

    /// Builds the `cte.column -> source_table.column` map used to trace outer
    /// references back to the relation that produced them.
    ///
    /// Bodies without a recognizable `SELECT … FROM` are skipped.
    pub fn resolve_columns(patterns: &Patterns, text: &str, ctes: &[CteDefinition]) -> IndexMap<String, String> {
        let cte_names = Self::names(ctes);
        let mut resolved = IndexMap::new();

        for cte in ctes {
            let body = &text[cte.body.clone()];
            let Some(source) = Self::source(patterns, body) else {
                debug!(cte = %cte.name, "CTE body has no SELECT … FROM clause, skipping");
                continue;
            };

            let body_tables = TableCollector::collect(patterns, body, &cte_names);
            let body_aliases = AliasResolver::resolve(patterns, body, &body_tables);

            for item in split_top_level(strip_distinct(&source.select_list)) {
                let (expr, exposed) = match patterns.item_alias.captures(item) {
                    Some(caps) => (caps[1].trim().to_string(), Some(caps[2].to_lowercase())),
                    None => (item.to_string(), None),
                };
                if !patterns.identifier_path.is_match(&expr) {
                    continue;
                }

                let expr = expr.to_lowercase();
                let (qualifier, column) = match expr.rsplit_once('.') {
                    Some((qualifier, column)) => (Some(qualifier), column),
                    None => (None, expr.as_str()),
                };
                let table = match qualifier {
                    None => source.table.as_str(),
                    Some(q) if q == source.alias || q == source.table => source.table.as_str(),
                    Some(q) => match body_aliases.get(q) {
                        Some(table) => table.as_str(),
                        None if body_tables.contains(q) => q,
                        None => continue,
                    },
                };

                let target = format!("{table}.{column}");
                if let Some(exposed) = exposed.filter(|exposed| exposed != column) {
                    resolved.insert(format!("{}.{exposed}", cte.name), target.clone());
                }
                resolved.insert(format!("{}.{column}", cte.name), target);
            }
        }

        debug!(count = resolved.len(), "resolved CTE columns");
        resolved
    }
}

fn strip_distinct(list: &str) -> &str {
    let trimmed = list.trim_start();
    match (trimmed.get(..8), trimmed.get(8..)) {
        (Some(head), Some(rest)) if head.eq_ignore_ascii_case("distinct") && rest.starts_with(char::is_whitespace) => {
            rest.trim_start()
        }
        _ => trimmed,
    }
}

/// Splits a select list at commas that are not nested inside parentheses.
fn split_top_level(list: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (idx, ch) in list.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                items.push(list[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    items.push(list[start..].trim());
    items.retain(|item| !item.is_empty());
    items
}
