//! Placeholder data-access layer.
//!
//! Mirrors the query shapes the site will use against a hosted record store
//! (`select .. eq .. fetch_one`, `select .. limit .. order_by`). Every query
//! currently resolves to "no data".

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::StoreError;

#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    _private: (),
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from<'a>(&'a self, table: &'a str) -> TableQuery<'a> {
        TableQuery { table }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TableQuery<'a> {
    table: &'a str,
}

impl<'a> TableQuery<'a> {
    pub fn select(self, columns: &'a str) -> SelectQuery<'a> {
        SelectQuery {
            table: self.table,
            columns,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SelectQuery<'a> {
    table: &'a str,
    columns: &'a str,
}

impl<'a> SelectQuery<'a> {
    pub fn eq(self, column: &'a str, value: impl ToString) -> FilterQuery<'a> {
        FilterQuery {
            select: self,
            column,
            value: value.to_string(),
        }
    }

    pub fn limit(self, limit: usize) -> LimitQuery<'a> {
        LimitQuery {
            select: self,
            limit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterQuery<'a> {
    select: SelectQuery<'a>,
    column: &'a str,
    value: String,
}

impl FilterQuery<'_> {
    pub fn fetch_one<T: DeserializeOwned>(&self) -> Result<Option<T>, StoreError> {
        debug!(
            table = self.select.table,
            columns = self.select.columns,
            column = self.column,
            value = %self.value,
            "record store stub: fetch_one"
        );
        Ok(None)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LimitQuery<'a> {
    select: SelectQuery<'a>,
    limit: usize,
}

impl LimitQuery<'_> {
    pub fn order_by<T: DeserializeOwned>(
        &self,
        column: &str,
        ascending: bool,
    ) -> Result<Vec<T>, StoreError> {
        debug!(
            table = self.select.table,
            columns = self.select.columns,
            limit = self.limit,
            column,
            ascending,
            "record store stub: order_by"
        );
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::RecordStore;

    #[test]
    fn queries_resolve_to_nothing() {
        let db = RecordStore::new();
        let one: Option<serde_json::Value> = db
            .from("projects")
            .select("*")
            .eq("id", 1)
            .fetch_one()
            .unwrap();
        assert!(one.is_none());

        let many: Vec<serde_json::Value> = db
            .from("projects")
            .select("*")
            .limit(10)
            .order_by("created_at", false)
            .unwrap();
        assert!(many.is_empty());
    }
}
