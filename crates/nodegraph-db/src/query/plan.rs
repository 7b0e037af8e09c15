//! Query fragments derived from allocated variables

use std::collections::BTreeMap;

use itertools::Itertools;

use crate::{
    alloc::{ParamName, VarAllocator},
    config::MandatoryFields,
};

/// `$name: type` for every variable, comma-joined in allocation order.
pub fn type_declarations(vars: &VarAllocator) -> String {
    vars.iter()
        .map(|v| format!("{}: {}", v.name(), v.ty()))
        .join(", ")
}

/// One `eq` predicate per variable, joined with `AND`.
///
/// `None` when nothing was allocated; Dgraph rejects an empty `@filter()`.
pub fn filter_expression(vars: &VarAllocator) -> Option<String> {
    if vars.is_empty() {
        return None;
    }
    Some(
        vars.iter()
            .map(|v| format!("eq({}, {})", v.field(), v.name()))
            .join(" AND "),
    )
}

/// Filtered fields followed by the mandatory fields, without duplicates.
pub fn projection_fields(vars: &VarAllocator, mandatory: &MandatoryFields) -> Vec<String> {
    vars.fields()
        .chain(mandatory.iter())
        .unique()
        .map(str::to_string)
        .collect()
}

/// Everything needed to render and execute one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    type_declarations: String,
    filter: Option<String>,
    projection: Vec<String>,
    parameter_names: Vec<ParamName>,
    bindings: BTreeMap<String, String>,
}

impl QueryPlan {
    pub fn new(vars: &VarAllocator, mandatory: &MandatoryFields) -> Self {
        Self {
            type_declarations: type_declarations(vars),
            filter: filter_expression(vars),
            projection: projection_fields(vars, mandatory),
            parameter_names: vars.declared_names().cloned().collect(),
            bindings: vars.bindings(),
        }
    }

    pub fn type_declarations(&self) -> &str {
        &self.type_declarations
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn projection(&self) -> &[String] {
        &self.projection
    }

    pub fn projection_list(&self) -> String {
        self.projection.join(", ")
    }

    /// Variables referenced by the filter, in allocation order.
    pub fn parameter_names(&self) -> &[ParamName] {
        &self.parameter_names
    }

    pub fn bindings(&self) -> &BTreeMap<String, String> {
        &self.bindings
    }

    pub fn into_bindings(self) -> BTreeMap<String, String> {
        self.bindings
    }
}
