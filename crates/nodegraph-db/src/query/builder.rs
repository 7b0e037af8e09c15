//! Query text rendering

use std::collections::BTreeMap;

use crate::{
    alloc::{FilterValue, VarAllocator},
    config::NodeQuery,
    query::plan::QueryPlan,
    uid::Uid,
    DbError,
};

/// An optional filter supplied by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCandidate {
    pub field: String,
    pub value: Option<FilterValue>,
}

impl FilterCandidate {
    pub fn new<V: Into<FilterValue>>(field: impl Into<String>, value: Option<V>) -> Self {
        Self {
            field: field.into(),
            value: value.map(Into::into),
        }
    }
}

/// Query text plus the variables to bind when running it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuery {
    pub name: String,
    pub text: String,
    pub bindings: BTreeMap<String, String>,
}

/// Builds one children query.
///
/// The builder owns a fresh [`VarAllocator`]; each filter's type comes from
/// the [`NodeQuery`] declarations, never from the value it carries.
pub struct QueryBuilder<'a> {
    node: &'a NodeQuery,
    parent: Uid,
    vars: VarAllocator,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(node: &'a NodeQuery, parent: Uid) -> Self {
        Self {
            node,
            parent,
            vars: VarAllocator::new(),
        }
    }

    /// Add an optional filter. `None` (or an empty string) adds nothing.
    pub fn filter<V: Into<FilterValue>>(
        mut self,
        field: &str,
        value: Option<V>,
    ) -> Result<Self, DbError> {
        let ty = self.node.declared_type(field)?;
        self.vars.alloc(field, value, ty)?;
        Ok(self)
    }

    pub fn candidates(self, candidates: &[FilterCandidate]) -> Result<Self, DbError> {
        candidates
            .iter()
            .try_fold(self, |builder, c| builder.filter(&c.field, c.value.clone()))
    }

    pub fn plan(&self) -> QueryPlan {
        QueryPlan::new(&self.vars, &self.node.mandatory)
    }

    /// Render the final query text
    pub fn build(self) -> PreparedQuery {
        let plan = self.plan();
        let text = render_children_query(self.node, self.parent, &plan);
        PreparedQuery {
            name: self.node.query_name.clone(),
            text,
            bindings: plan.into_bindings(),
        }
    }
}

/// Render the children query for `parent`.
///
/// The variable list and the `@filter` directive are left out entirely when
/// the plan has no variables.
pub fn render_children_query(node: &NodeQuery, parent: Uid, plan: &QueryPlan) -> String {
    let name = &node.query_name;
    let root = &node.root;
    let fields = plan.projection_list();

    let signature = match plan.type_declarations() {
        "" => format!("query {name}"),
        decls => format!("query {name}({decls})"),
    };
    let edge = match plan.filter() {
        Some(filter) => format!(
            "{edge} @filter(\n            {filter}\n        )",
            edge = node.edge
        ),
        None => node.edge.clone(),
    };

    format!(
        r#"{signature}
{{
    {root}(func: uid({parent}))
    {{
        {edge} {{
            {fields}
        }}
    }}
}}
"#
    )
}
