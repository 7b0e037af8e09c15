//! Test scaffolding for nodegraph crates
//!
//! [`MockClient`] stands in for a Dgraph client. Every transaction it opens
//! answers with the same scripted outcome and records what it was asked, so
//! tests can check the query text, the bound variables and the transaction
//! lifecycle (discarded, or abandoned on drop).

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use nodegraph_db::{ClientError, DgraphClient, ReadTxn, Vars};
use serde_json::{json, Value};

/// Install a fmt subscriber honouring `RUST_LOG`, once per process.
/// Returns true if this call installed it.
pub fn init_tracing() -> bool {
    use tracing_subscriber::{fmt, EnvFilter};
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .is_ok()
}

/// Error returned by a [`MockClient`] scripted to fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("mock transport failure: {0}")]
pub struct MockError(pub String);

#[derive(Debug, Clone)]
enum Scripted {
    Respond(Value),
    Fail(String),
    Stall,
}

/// A query as the mock received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub text: String,
    pub vars: Vars,
}

#[derive(Debug, Default)]
struct MockState {
    opened: usize,
    discards: usize,
    abandons: usize,
    queries: Vec<RecordedQuery>,
}

#[derive(Debug, Clone)]
pub struct MockClient {
    script: Scripted,
    state: Arc<Mutex<MockState>>,
}

impl MockClient {
    /// Every query answers with `response`.
    pub fn responding(response: Value) -> Self {
        Self::with_script(Scripted::Respond(response))
    }

    /// Every query fails with a [`MockError`] carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_script(Scripted::Fail(message.into()))
    }

    /// Every query stays pending forever, for cancellation tests.
    pub fn stalling() -> Self {
        Self::with_script(Scripted::Stall)
    }

    fn with_script(script: Scripted) -> Self {
        Self {
            script,
            state: Arc::default(),
        }
    }

    pub fn transactions_opened(&self) -> usize {
        self.lock().opened
    }

    pub fn discards(&self) -> usize {
        self.lock().discards
    }

    pub fn abandons(&self) -> usize {
        self.lock().abandons
    }

    /// Transactions released by either path.
    pub fn releases(&self) -> usize {
        let state = self.lock();
        state.discards + state.abandons
    }

    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.lock().queries.clone()
    }

    pub fn last_query(&self) -> Option<RecordedQuery> {
        self.lock().queries.last().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }
}

impl DgraphClient for MockClient {
    type Txn = MockTxn;

    fn new_read_only_txn(&self) -> Self::Txn {
        self.lock().opened += 1;
        MockTxn {
            script: self.script.clone(),
            state: Arc::clone(&self.state),
        }
    }
}

pub struct MockTxn {
    script: Scripted,
    state: Arc<Mutex<MockState>>,
}

#[async_trait]
impl ReadTxn for MockTxn {
    async fn query_with_vars(&mut self, query: &str, vars: &Vars) -> Result<Value, ClientError> {
        self.state
            .lock()
            .expect("mock state poisoned")
            .queries
            .push(RecordedQuery {
                text: query.to_string(),
                vars: vars.clone(),
            });
        match &self.script {
            Scripted::Respond(response) => Ok(response.clone()),
            Scripted::Fail(message) => Err(Box::new(MockError(message.clone()))),
            Scripted::Stall => std::future::pending().await,
        }
    }

    async fn discard(&mut self) {
        self.state.lock().expect("mock state poisoned").discards += 1;
    }

    fn abandon(&mut self) {
        self.state.lock().expect("mock state poisoned").abandons += 1;
    }
}

/// `{ "process": [ { "children": children } ] }`
pub fn process_response(children: Vec<Value>) -> Value {
    json!({ "process": [ { "children": children } ] })
}

/// A child process record with the mandatory fields filled in.
pub fn process_child(uid: &str, pid: i64, name: &str) -> Value {
    json!({
        "uid": uid,
        "node_key": format!("proc-{pid}"),
        "process_id": pid,
        "process_name": name,
    })
}
