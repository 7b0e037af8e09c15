//! Safe, typed child-node queries against a Dgraph-style graph database
//!
//! Optional filters are allocated as typed query variables and bound at
//! execution time; filter values never appear in query text.

pub mod alloc;
pub mod client;
pub mod config;
mod error;
pub mod fetch;
pub mod nodes;
pub mod query;
mod result;
mod uid;

pub use alloc::{DeclaredType, FilterValue, ParamName, VarAllocator, Variable};
pub use client::{ClientError, DgraphClient, ReadTxn, Vars};
pub use config::{FilterDecl, MandatoryFields, NodeQuery};
pub use error::DbError;
pub use fetch::{fetch_children, fetch_children_as, fetch_children_with, fetch_process_children};
pub use nodes::{ProcessFilters, ProcessNode};
pub use query::{
    plan::{filter_expression, projection_fields, type_declarations},
    FilterCandidate, PreparedQuery, QueryBuilder, QueryPlan,
};
pub use result::{decode_children, extract_children, ChildRecord};
pub use uid::Uid;
