//! Query variable allocation
//!
//! A [`VarAllocator`] is created fresh for every query. Each optional filter is
//! offered to it once; absent values are skipped, present ones are recorded
//! under a `$name` derived from the predicate. The recorded variables are the
//! single source for the type declarations, the filter predicates and the bound
//! values, so the three can never drift apart.

use std::{collections::BTreeMap, fmt, str::FromStr};

use nodegraph_error::ContractError;

/// Dgraph variable types a filter may be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    Int,
    Bool,
    String,
}

impl DeclaredType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclaredType::Int => "int",
            DeclaredType::Bool => "bool",
            DeclaredType::String => "string",
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeclaredType {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(DeclaredType::Int),
            "bool" => Ok(DeclaredType::Bool),
            "string" => Ok(DeclaredType::String),
            other => Err(ContractError::UnknownDeclaredType {
                name: other.to_string(),
            }),
        }
    }
}

/// A concrete value bound to a query variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Int(i64),
    Bool(bool),
    String(String),
}

impl FilterValue {
    pub fn declared_type(&self) -> DeclaredType {
        match self {
            FilterValue::Int(_) => DeclaredType::Int,
            FilterValue::Bool(_) => DeclaredType::Bool,
            FilterValue::String(_) => DeclaredType::String,
        }
    }

    /// An empty string means "no filter", same as `None`.
    pub fn is_absent(&self) -> bool {
        matches!(self, FilterValue::String(s) if s.is_empty())
    }

    /// Dgraph takes every variable as a string on the wire.
    pub fn to_wire(&self) -> String {
        match self {
            FilterValue::Int(i) => i.to_string(),
            FilterValue::Bool(b) => b.to_string(),
            FilterValue::String(s) => s.clone(),
        }
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Int(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        FilterValue::Int(i64::from(value))
    }
}

impl From<u32> for FilterValue {
    fn from(value: u32) -> Self {
        FilterValue::Int(i64::from(value))
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::String(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::String(value.to_string())
    }
}

/// A query variable name, including the leading `$`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParamName(String);

impl ParamName {
    /// Derive the variable name for a predicate.
    ///
    /// Characters outside `[A-Za-z0-9_]` become `_`, and a leading digit gets a
    /// `_` prefix, so `process.name` maps to `$process_name`.
    pub fn derive(field: &str) -> Result<Self, ContractError> {
        if field.is_empty() {
            return Err(ContractError::InvalidIdentifier {
                name: field.to_string(),
            });
        }
        let mut name = String::with_capacity(field.len() + 2);
        name.push('$');
        if field.starts_with(|c: char| c.is_ascii_digit()) {
            name.push('_');
        }
        name.extend(field.chars().map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        }));
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Predicates may contain letters, digits, `_` and `.`.
pub(crate) fn validate_predicate(name: &str) -> Result<(), ContractError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(ContractError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

/// An edge is a predicate, optionally reversed with a leading `~`.
pub(crate) fn validate_edge(name: &str) -> Result<(), ContractError> {
    let predicate = name.strip_prefix('~').unwrap_or(name);
    validate_predicate(predicate).map_err(|_| ContractError::InvalidIdentifier {
        name: name.to_string(),
    })
}

/// Query block names follow the usual `[A-Za-z_][A-Za-z0-9_]*` identifier rule.
pub(crate) fn validate_block_name(name: &str) -> Result<(), ContractError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ContractError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    field: String,
    name: ParamName,
    ty: DeclaredType,
    value: FilterValue,
}

impl Variable {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn name(&self) -> &ParamName {
        &self.name
    }

    pub fn ty(&self) -> DeclaredType {
        self.ty
    }

    pub fn value(&self) -> &FilterValue {
        &self.value
    }
}

/// Per-query registry of filter variables, kept in allocation order.
#[derive(Debug, Clone, Default)]
pub struct VarAllocator {
    vars: Vec<Variable>,
}

impl VarAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a filter to the allocator.
    ///
    /// Returns `Ok(None)` without recording anything when `value` is absent.
    /// A second allocation for the same predicate, or for a predicate whose
    /// derived name collides with an earlier one, is rejected and leaves the
    /// first allocation in place.
    pub fn alloc<V: Into<FilterValue>>(
        &mut self,
        field: &str,
        value: Option<V>,
        ty: DeclaredType,
    ) -> Result<Option<&ParamName>, ContractError> {
        validate_predicate(field)?;
        let value = match value.map(Into::into) {
            Some(v) if !v.is_absent() => v,
            _ => return Ok(None),
        };
        if value.declared_type() != ty {
            return Err(ContractError::TypeMismatch {
                field: field.to_string(),
                declared: ty.as_str(),
                actual: value.declared_type().as_str(),
            });
        }

        let name = ParamName::derive(field)?;
        if self.vars.iter().any(|v| v.field == field || v.name == name) {
            return Err(ContractError::DuplicateParameter {
                field: field.to_string(),
                param: name.0,
            });
        }

        self.vars.push(Variable {
            field: field.to_string(),
            name,
            ty,
            value,
        });
        Ok(self.vars.last().map(|v| &v.name))
    }

    /// Like [`alloc`](Self::alloc), with the type given by name (`"int"`,
    /// `"bool"`, `"string"`). Unknown names fail even when `value` is absent.
    pub fn alloc_with_type_name<V: Into<FilterValue>>(
        &mut self,
        field: &str,
        value: Option<V>,
        type_name: &str,
    ) -> Result<Option<&ParamName>, ContractError> {
        let ty: DeclaredType = type_name.parse()?;
        self.alloc(field, value, ty)
    }

    pub fn declared_names(&self) -> impl Iterator<Item = &ParamName> {
        self.vars.iter().map(|v| &v.name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(|v| v.field.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Variable> {
        self.vars.iter()
    }

    /// Variable name to wire value, ready to hand to the client.
    pub fn bindings(&self) -> BTreeMap<String, String> {
        self.vars
            .iter()
            .map(|v| (v.name.0.clone(), v.value.to_wire()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_are_skipped() {
        let mut vars = VarAllocator::new();
        assert!(vars
            .alloc("process_id", None::<i64>, DeclaredType::Int)
            .unwrap()
            .is_none());
        assert!(vars
            .alloc("process_name", Some(""), DeclaredType::String)
            .unwrap()
            .is_none());
        assert!(vars.is_empty());
        assert!(vars.bindings().is_empty());
    }

    #[test]
    fn names_follow_allocation_order() {
        let mut vars = VarAllocator::new();
        vars.alloc("process_name", Some("bash"), DeclaredType::String)
            .unwrap();
        vars.alloc("process_id", Some(42i64), DeclaredType::Int)
            .unwrap();
        let names: Vec<_> = vars.declared_names().map(ParamName::as_str).collect();
        assert_eq!(names, ["$process_name", "$process_id"]);
        let fields: Vec<_> = vars.fields().collect();
        assert_eq!(fields, ["process_name", "process_id"]);
    }

    #[test]
    fn bindings_use_wire_values() {
        let mut vars = VarAllocator::new();
        vars.alloc("process_id", Some(7i64), DeclaredType::Int)
            .unwrap();
        vars.alloc("is_root", Some(true), DeclaredType::Bool).unwrap();
        let bindings = vars.bindings();
        assert_eq!(bindings.get("$process_id").map(String::as_str), Some("7"));
        assert_eq!(bindings.get("$is_root").map(String::as_str), Some("true"));
    }

    #[test]
    fn duplicate_field_is_rejected_and_first_wins() {
        let mut vars = VarAllocator::new();
        vars.alloc("process_id", Some(1i64), DeclaredType::Int)
            .unwrap();
        let err = vars
            .alloc("process_id", Some(2i64), DeclaredType::Int)
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::DuplicateParameter {
                field: "process_id".into(),
                param: "$process_id".into(),
            }
        );
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.bindings()["$process_id"], "1");
    }

    #[test]
    fn derived_name_collision_is_rejected() {
        let mut vars = VarAllocator::new();
        vars.alloc("process.name", Some("a"), DeclaredType::String)
            .unwrap();
        let err = vars
            .alloc("process_name", Some("b"), DeclaredType::String)
            .unwrap_err();
        assert!(matches!(err, ContractError::DuplicateParameter { .. }));
    }

    #[test]
    fn type_mismatch_fails_fast() {
        let mut vars = VarAllocator::new();
        let err = vars
            .alloc("process_id", Some("42"), DeclaredType::Int)
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::TypeMismatch {
                field: "process_id".into(),
                declared: "int",
                actual: "string",
            }
        );
        assert!(vars.is_empty());
    }

    #[test]
    fn unknown_type_name_fails_even_without_value() {
        let mut vars = VarAllocator::new();
        let err = vars
            .alloc_with_type_name("process_id", None::<i64>, "integer")
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::UnknownDeclaredType {
                name: "integer".into()
            }
        );
    }

    #[test]
    fn invalid_predicates_are_rejected() {
        let mut vars = VarAllocator::new();
        for bad in ["", "name) { uid }", "a b", "$pid", "~parent", "pid~"] {
            let err = vars
                .alloc(bad, Some(1i64), DeclaredType::Int)
                .unwrap_err();
            assert!(matches!(err, ContractError::InvalidIdentifier { .. }), "{bad}");
        }
    }

    #[test]
    fn leading_digit_gets_prefixed() {
        assert_eq!(ParamName::derive("9lives").unwrap().as_str(), "$_9lives");
        assert_eq!(ParamName::derive("1.5").unwrap().as_str(), "$_1_5");
    }

    #[test]
    fn only_edges_may_be_reversed() {
        assert!(validate_edge("children").is_ok());
        assert!(validate_edge("~children").is_ok());
        assert!(validate_predicate("~children").is_err());
        for bad in ["~", "~~children", "children~", "~a b"] {
            assert_eq!(
                validate_edge(bad).unwrap_err(),
                ContractError::InvalidIdentifier { name: bad.into() }
            );
        }
    }

    #[test]
    fn block_names_must_be_identifiers() {
        assert!(validate_block_name("process").is_ok());
        assert!(validate_block_name("_q1").is_ok());
        assert!(validate_block_name("1q").is_err());
        assert!(validate_block_name("q-1").is_err());
        assert!(validate_block_name("").is_err());
    }
}
