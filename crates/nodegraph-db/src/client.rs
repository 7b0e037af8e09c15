//! The database seam
//!
//! The orchestrator only needs a few things from a Dgraph client: a way to open
//! a read-only transaction, a query call that takes bound variables, and a way
//! to release the transaction. Transports implement these traits outside this
//! crate.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;

/// Errors raised by a transport, passed through to the caller untouched.
pub type ClientError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Variable name (with `$`) to wire value.
pub type Vars = BTreeMap<String, String>;

pub trait DgraphClient: Send + Sync {
    type Txn: ReadTxn;

    fn new_read_only_txn(&self) -> Self::Txn;
}

#[async_trait]
pub trait ReadTxn: Send {
    /// Run `query` with `vars` bound, returning the decoded JSON response.
    async fn query_with_vars(&mut self, query: &str, vars: &Vars) -> Result<Value, ClientError>;

    /// Release the transaction. Must be safe to call more than once.
    async fn discard(&mut self);

    /// Release the transaction without waiting, for when the owning future is
    /// dropped or unwinds before [`discard`](Self::discard) ran. Must not block.
    fn abandon(&mut self);
}
