//! Database query check (SQLite).
//!
//! Runs a query against a database file and alerts with the first column of
//! the first row whenever the query returns anything.

use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags};
use std::path::PathBuf;

use crate::core::monitor::{AlertDispatch, Check};
use crate::error::Result;

pub struct QueryCheck {
    name: String,
    database: PathBuf,
    query: String,
}

impl QueryCheck {
    pub fn new<N, P, Q>(name: N, database: P, query: Q) -> Self
    where
        N: Into<String>,
        P: Into<PathBuf>,
        Q: Into<String>,
    {
        Self {
            name: name.into(),
            database: database.into(),
            query: query.into(),
        }
    }

    /// First column of the first row, if the query produced one
    pub fn first_row(&self) -> Result<Option<String>> {
        let conn = Connection::open_with_flags(
            &self.database,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let mut stmt = conn.prepare(&self.query)?;
        let mut rows = stmt.query([])?;

        let first = match rows.next()? {
            Some(row) => Some(render(row.get::<_, Value>(0)?)),
            None => None,
        };
        Ok(first)
    }
}

fn render(value: Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

impl Check for QueryCheck {
    fn default_name(&self) -> String {
        format!("Check Database: {}", self.name)
    }

    fn run(&mut self, dispatch: &mut AlertDispatch) {
        match self.first_row() {
            Ok(Some(value)) => {
                dispatch.log_alert(&format!("Query {} returned result: {}", self.name, value))
            }
            Ok(None) => {}
            Err(e) => dispatch.probe_failed(&e),
        }
    }
}
