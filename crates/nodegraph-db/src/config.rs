//! Node query configuration
//!
//! A [`NodeQuery`] describes one "children of a node" query: the query block
//! name, the root block, the edge to traverse, the filters callers may apply and
//! the fields that are always projected. The process query is built in; other
//! node types can be described in TOML:
//!
//! ```toml
//! query_name = "file"
//! root = "file"
//! edge = "readers"
//!
//! [mandatory]
//! internal_id = "uid"
//! external_key = "node_key"
//!
//! [[filters]]
//! field = "process_name"
//! type = "string"
//! ```

use std::{collections::HashSet, path::Path};

use nodegraph_error::ContractError;
use serde::{Deserialize, Serialize};

use crate::{
    alloc::{validate_block_name, validate_edge, validate_predicate, DeclaredType, ParamName},
    nodes::process::{PROCESS_ID, PROCESS_NAME},
    DbError,
};

pub const UID: &str = "uid";
pub const NODE_KEY: &str = "node_key";

/// Fields projected on every child regardless of filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MandatoryFields {
    /// Opaque database identifier
    pub internal_id: String,
    /// Stable identifier callers key on
    pub external_key: String,
}

impl MandatoryFields {
    pub fn new(internal_id: impl Into<String>, external_key: impl Into<String>) -> Self {
        Self {
            internal_id: internal_id.into(),
            external_key: external_key.into(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [self.internal_id.as_str(), self.external_key.as_str()].into_iter()
    }
}

impl Default for MandatoryFields {
    fn default() -> Self {
        Self::new(UID, NODE_KEY)
    }
}

/// A filter callers are allowed to apply, with its variable type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDecl {
    pub field: String,
    /// Type name as written in config; parsed with [`DeclaredType::from_str`](std::str::FromStr).
    #[serde(rename = "type")]
    pub ty: String,
}

impl FilterDecl {
    pub fn new(field: impl Into<String>, ty: DeclaredType) -> Self {
        Self {
            field: field.into(),
            ty: ty.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeQuery {
    pub query_name: String,
    pub root: String,
    pub edge: String,
    #[serde(default)]
    pub mandatory: MandatoryFields,
    #[serde(default)]
    pub filters: Vec<FilterDecl>,
}

impl NodeQuery {
    /// Children of a process, filterable by pid and process name.
    pub fn process() -> Self {
        Self {
            query_name: "process".to_string(),
            root: "process".to_string(),
            edge: "children".to_string(),
            mandatory: MandatoryFields::default(),
            filters: vec![
                FilterDecl::new(PROCESS_ID, DeclaredType::Int),
                FilterDecl::new(PROCESS_NAME, DeclaredType::String),
            ],
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, DbError> {
        let query: Self = toml::from_str(s).map_err(|e| DbError::Config(e.to_string()))?;
        query.validate()?;
        Ok(query)
    }

    pub fn from_toml_path(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| DbError::Config(format!("reading {}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    /// Everything here ends up in query text, so all of it is checked.
    ///
    /// Two filters may not share a variable name, whether they repeat the same
    /// predicate or merely derive the same `$name` (`process.name` and
    /// `process_name`).
    pub fn validate(&self) -> Result<(), DbError> {
        validate_block_name(&self.query_name)?;
        validate_block_name(&self.root)?;
        validate_edge(&self.edge)?;
        for field in self.mandatory.iter() {
            validate_predicate(field)?;
        }

        let mut seen = HashSet::with_capacity(self.filters.len());
        for decl in &self.filters {
            validate_predicate(&decl.field)?;
            decl.ty.parse::<DeclaredType>()?;
            let param = ParamName::derive(&decl.field)?;
            if seen.contains(&param) {
                return Err(ContractError::DuplicateParameter {
                    field: decl.field.clone(),
                    param: param.to_string(),
                }
                .into());
            }
            seen.insert(param);
        }
        Ok(())
    }

    /// Declared type of a filter field.
    pub fn declared_type(&self, field: &str) -> Result<DeclaredType, ContractError> {
        self.filters
            .iter()
            .find(|decl| decl.field == field)
            .ok_or_else(|| ContractError::UnknownField {
                field: field.to_string(),
                query: self.query_name.clone(),
            })?
            .ty
            .parse()
    }
}
