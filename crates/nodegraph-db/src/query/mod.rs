//! Query assembly
//!
//! [`plan`] turns a finished [`VarAllocator`](crate::VarAllocator) into the
//! fragments of a query, and [`builder`] renders those fragments into the full
//! text sent to the database.

pub mod builder;
pub mod plan;

pub use builder::{render_children_query, FilterCandidate, PreparedQuery, QueryBuilder};
pub use plan::QueryPlan;
