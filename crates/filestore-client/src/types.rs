//! Wire types for the file store API

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a successful document read.
#[derive(Debug, Deserialize)]
pub struct ReadResponse {
    pub data: Value,
}

/// Body of a document write request.
#[derive(Debug, Serialize)]
pub struct WriteRequest<'a> {
    pub filename: &'a str,
    pub data: &'a Value,
}

/// Body of a write response. The store must explicitly acknowledge with
/// `success: true`; a missing flag reads as failure.
#[derive(Debug, Default, Deserialize)]
pub struct WriteResponse {
    #[serde(default)]
    pub success: bool,
}

/// Body of a list response. A missing `files` field reads as empty.
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub files: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_request_serializes_expected_shape() {
        let data = json!({"theme": "dark"});
        let body = serde_json::to_value(WriteRequest {
            filename: "settings",
            data: &data,
        })
        .unwrap();
        assert_eq!(body, json!({"filename": "settings", "data": {"theme": "dark"}}));
    }

    #[test]
    fn test_write_response_missing_success_reads_as_failure() {
        let resp: WriteResponse = serde_json::from_str("{}").unwrap();
        assert!(!resp.success);
    }

    #[test]
    fn test_write_response_explicit_success() {
        let resp: WriteResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(resp.success);
    }

    #[test]
    fn test_list_response_missing_files_reads_as_empty() {
        let resp: ListResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.files.is_empty());
    }

    #[test]
    fn test_read_response_carries_arbitrary_payload() {
        let resp: ReadResponse =
            serde_json::from_str(r#"{"data": [1, "two", {"three": 3}]}"#).unwrap();
        assert_eq!(resp.data, json!([1, "two", {"three": 3}]));
    }
}
