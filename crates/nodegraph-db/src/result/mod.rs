//! Response handling
//!
//! A children query answers with `{ <root>: [ { <edge>: [ ... ] } ] }`. Only
//! the first root node is read. A missing root, an empty root list or a
//! missing edge all mean "no children".

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::DbError;

/// One child node, as projected by the query.
pub type ChildRecord = Map<String, Value>;

pub fn extract_children(
    response: &Value,
    root: &str,
    edge: &str,
) -> Result<Vec<ChildRecord>, DbError> {
    let parent = match response.get(root) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(nodes)) => match nodes.first() {
            Some(parent) => parent,
            None => return Ok(Vec::new()),
        },
        Some(other) => {
            return Err(DbError::ResponseShape(format!(
                "`{root}` should be a list, found {}",
                kind(other)
            )))
        }
    };
    let parent = parent.as_object().ok_or_else(|| {
        DbError::ResponseShape(format!(
            "`{root}[0]` should be an object, found {}",
            kind(parent)
        ))
    })?;

    match parent.get(edge) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(children)) => children
            .iter()
            .enumerate()
            .map(|(i, child)| {
                child.as_object().cloned().ok_or_else(|| {
                    DbError::ResponseShape(format!(
                        "`{root}[0].{edge}[{i}]` should be an object, found {}",
                        kind(child)
                    ))
                })
            })
            .collect(),
        Some(other) => Err(DbError::ResponseShape(format!(
            "`{root}[0].{edge}` should be a list, found {}",
            kind(other)
        ))),
    }
}

/// Decode child records into a typed view.
pub fn decode_children<T: DeserializeOwned>(children: Vec<ChildRecord>) -> Result<Vec<T>, DbError> {
    children
        .into_iter()
        .map(|child| {
            serde_json::from_value(Value::Object(child)).map_err(|e| DbError::Decode(e.to_string()))
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
