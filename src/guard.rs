//! Scoped resource guards.
//!
//! Every cursor, statement and connection opened by the engine goes through
//! one of these helpers so it is released on success, error and early return.
//! Release order is cursor, then statement, then connection: a cursor borrows
//! its statement and a statement borrows its connection, so the borrow checker
//! rejects any other order.
//!
//! Release failures are logged at warn level and never replace the outcome of
//! the operation that used the resource.

use crate::error::Result;
use log::{debug, warn};
use rusqlite::{Connection, Params, Rows, Statement};
use std::ops::Deref;

/// Owns a connection for the duration of one operation and closes it on drop.
#[derive(Debug)]
pub struct ConnectionGuard {
    conn: Option<Connection>,
}

impl ConnectionGuard {
    pub fn new(conn: Connection) -> Self {
        ConnectionGuard { conn: Some(conn) }
    }
}

impl Deref for ConnectionGuard {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        // Safety: only `drop` takes the connection out
        self.conn.as_ref().expect("connection is present until drop")
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            match conn.close() {
                Ok(()) => debug!("Connection closed"),
                Err((_, e)) => warn!("Error closing connection: {}", e),
            }
        }
    }
}

/// Prepares `sql`, hands the statement to `f`, then finalizes it.
///
/// The result of `f` is returned unchanged even if finalizing fails.
pub fn with_statement<T, F>(conn: &Connection, sql: &str, f: F) -> Result<T>
where
    F: FnOnce(&mut Statement<'_>) -> Result<T>,
{
    let mut stmt = conn.prepare(sql)?;
    let result = f(&mut stmt);
    release_statement(stmt);
    result
}

/// Runs the query on `stmt` and hands the result cursor to `f`.
///
/// The cursor is dropped before this returns, which resets the statement so
/// the caller can finalize it.
pub fn with_cursor<P, T, F>(stmt: &mut Statement<'_>, params: P, f: F) -> Result<T>
where
    P: Params,
    F: FnOnce(&mut Rows<'_>) -> Result<T>,
{
    let mut rows = stmt.query(params)?;
    let result = f(&mut rows);
    drop(rows);
    result
}

fn release_statement(stmt: Statement<'_>) {
    if let Err(e) = stmt.finalize() {
        warn!("Error finalizing statement: {}", e);
    }
}
