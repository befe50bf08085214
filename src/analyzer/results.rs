use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

/// Sorted, duplicate-free physical table names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TableNames(Vec<String>);

impl TableNames {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, table: &str) -> bool {
        self.0.binary_search_by(|name| name.as_str().cmp(table)).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<BTreeSet<String>> for TableNames {
    fn from(tables: BTreeSet<String>) -> Self {
        Self(tables.into_iter().collect())
    }
}

/// Physical table name -> sorted, duplicate-free referenced columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TableColumns(BTreeMap<String, Vec<String>>);

impl TableColumns {
    pub fn get(&self, table: &str) -> Option<&[String]> {
        self.0.get(table).map(Vec::as_slice)
    }

    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(table, columns)| (table.as_str(), columns.as_slice()))
    }

    /// `(table, column)` pairs, grouped by table in table order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .flat_map(|(table, columns)| columns.iter().map(move |column| (table, column.as_str())))
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl From<BTreeMap<String, BTreeSet<String>>> for TableColumns {
    fn from(columns: BTreeMap<String, BTreeSet<String>>) -> Self {
        Self(
            columns
                .into_iter()
                .map(|(table, set)| (table, set.into_iter().collect()))
                .collect(),
        )
    }
}
