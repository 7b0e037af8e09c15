//! Children fetching
//!
//! Every fetch follows the same order: allocate filters, build the plan,
//! render the query, then open a read-only transaction, run the query and
//! discard the transaction before looking at the outcome. Contract violations
//! surface before a transaction is opened. A fetch that is cancelled or
//! panics mid-query still releases its transaction through a drop guard.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    client::{DgraphClient, ReadTxn},
    config::NodeQuery,
    nodes::{ProcessFilters, ProcessNode},
    query::{FilterCandidate, PreparedQuery, QueryBuilder},
    result::{decode_children, extract_children, ChildRecord},
    uid::Uid,
    DbError,
};

/// Children of the process `parent`, optionally filtered by pid and name.
pub async fn fetch_children<C: DgraphClient>(
    client: &C,
    parent: Uid,
    filters: &ProcessFilters,
) -> Result<Vec<ChildRecord>, DbError> {
    fetch_children_with(client, &NodeQuery::process(), parent, &filters.candidates()).await
}

/// Like [`fetch_children`], decoded into [`ProcessNode`]s.
pub async fn fetch_process_children<C: DgraphClient>(
    client: &C,
    parent: Uid,
    filters: &ProcessFilters,
) -> Result<Vec<ProcessNode>, DbError> {
    fetch_children_as(client, &NodeQuery::process(), parent, &filters.candidates()).await
}

/// Children of `parent` along `node.edge`, filtered by `candidates`.
///
/// A parent that does not exist yields an empty list. Transport and database
/// failures are returned as [`DbError::QueryExecution`] with the client's
/// error as the source.
#[tracing::instrument(skip_all, fields(query = %node.query_name, parent = %parent))]
pub async fn fetch_children_with<C: DgraphClient>(
    client: &C,
    node: &NodeQuery,
    parent: Uid,
    candidates: &[FilterCandidate],
) -> Result<Vec<ChildRecord>, DbError> {
    let prepared = QueryBuilder::new(node, parent)
        .candidates(candidates)?
        .build();
    tracing::debug!(
        variables = prepared.bindings.len(),
        "prepared {} query",
        prepared.name
    );
    tracing::trace!(query = %prepared.text);

    let response = run_read_only(client, &prepared).await?;
    let children = extract_children(&response, &node.root, &node.edge)?;
    tracing::debug!("{} query returned {} children", prepared.name, children.len());
    Ok(children)
}

/// Like [`fetch_children_with`], decoding each child into `T`.
pub async fn fetch_children_as<T, C>(
    client: &C,
    node: &NodeQuery,
    parent: Uid,
    candidates: &[FilterCandidate],
) -> Result<Vec<T>, DbError>
where
    T: DeserializeOwned,
    C: DgraphClient,
{
    let children = fetch_children_with(client, node, parent, candidates).await?;
    decode_children(children)
}

async fn run_read_only<C: DgraphClient>(
    client: &C,
    prepared: &PreparedQuery,
) -> Result<Value, DbError> {
    let mut guard = TxnGuard::new(client.new_read_only_txn());
    let outcome = guard
        .txn
        .query_with_vars(&prepared.text, &prepared.bindings)
        .await;
    guard.discard().await;

    outcome.map_err(|source| DbError::QueryExecution {
        query_name: prepared.name.clone(),
        source,
    })
}

/// Owns a transaction until it has been discarded; abandons it on drop otherwise.
struct TxnGuard<T: ReadTxn> {
    txn: T,
    released: bool,
}

impl<T: ReadTxn> TxnGuard<T> {
    fn new(txn: T) -> Self {
        Self {
            txn,
            released: false,
        }
    }

    async fn discard(mut self) {
        self.txn.discard().await;
        self.released = true;
    }
}

impl<T: ReadTxn> Drop for TxnGuard<T> {
    fn drop(&mut self) {
        if !self.released {
            tracing::debug!("transaction dropped before discard, abandoning");
            self.txn.abandon();
        }
    }
}
