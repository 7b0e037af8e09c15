use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::query::FilterCandidate;

pub const PROCESS_ID: &str = "process_id";
pub const PROCESS_NAME: &str = "process_name";

/// Filters accepted when listing the children of a process.
///
/// Field names follow the request body (`pid`, `processName`); each maps to the
/// stored predicate it filters on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessFilters {
    #[serde(default)]
    pub pid: Option<i64>,
    #[serde(default)]
    pub process_name: Option<String>,
}

impl ProcessFilters {
    pub fn candidates(&self) -> Vec<FilterCandidate> {
        vec![
            FilterCandidate::new(PROCESS_ID, self.pid),
            FilterCandidate::new(PROCESS_NAME, self.process_name.clone()),
        ]
    }
}

/// A child process as returned by the children query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessNode {
    pub uid: String,
    pub node_key: String,
    #[serde(default)]
    pub process_id: Option<i64>,
    #[serde(default)]
    pub process_name: Option<String>,
    /// Any other projected predicates
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::FilterValue;

    #[test]
    fn filters_decode_from_request_body() {
        let filters: ProcessFilters =
            serde_json::from_value(json!({ "pid": 4, "processName": "init" })).unwrap();
        assert_eq!(filters.pid, Some(4));
        assert_eq!(filters.process_name.as_deref(), Some("init"));

        let empty: ProcessFilters = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, ProcessFilters::default());
    }

    #[test]
    fn candidates_cover_both_fields() {
        let filters = ProcessFilters {
            pid: None,
            process_name: Some("init".into()),
        };
        let candidates = filters.candidates();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].field, PROCESS_ID);
        assert_eq!(candidates[0].value, None);
        assert_eq!(
            candidates[1].value,
            Some(FilterValue::String("init".into()))
        );
    }

    #[test]
    fn node_keeps_extra_predicates() {
        let node: ProcessNode = serde_json::from_value(json!({
            "uid": "0x5",
            "node_key": "proc-5",
            "process_id": 5,
            "created_timestamp": 1600000000
        }))
        .unwrap();
        assert_eq!(node.process_id, Some(5));
        assert_eq!(node.process_name, None);
        assert_eq!(node.other["created_timestamp"], 1600000000);
    }
}
