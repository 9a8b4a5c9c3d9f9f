//! Common types shared across SDP API models.
//!
//! This module defines entity references, the list-info descriptor and
//! the response status block.

use serde::{Deserialize, Serialize};

/// Reference to another entity by ID, e.g. `{"id": "7"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdRef<'a> {
    /// Entity ID.
    pub id: &'a str,
}

/// Reference to another entity by name, e.g. `{"name": "Ops"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NamedRef<'a> {
    /// Display name.
    pub name: &'a str,
}

/// Pagination, sorting and filtering for list operations.
///
/// Any `Serialize` value is accepted by
/// [`request_view_all`](crate::sdp_client::SdpClient::request_view_all);
/// this type is a typed way to build the common cases.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ListInfo {
    /// Maximum number of rows to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u32>,

    /// Starting index (1-based in SDP) for pagination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,

    /// Field to sort by.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_field: Option<String>,

    /// Sort order: "asc" or "desc".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,

    /// Whether to include the total row count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get_total_count: Option<bool>,

    /// Search criteria; SDP expects these inside `list_info`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_criteria: Vec<SearchCriterion>,
}

impl ListInfo {
    /// Creates an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of rows to return.
    pub fn with_row_count(mut self, count: u32) -> Self {
        self.row_count = Some(count);
        self
    }

    /// Sets the starting index for pagination.
    pub fn with_start_index(mut self, index: u32) -> Self {
        self.start_index = Some(index);
        self
    }

    /// Sorts by `field` in `order` ("asc" or "desc").
    pub fn with_sort(mut self, field: impl Into<String>, order: impl Into<String>) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = Some(order.into());
        self
    }

    /// Requests the total count along with results.
    pub fn with_total_count(mut self) -> Self {
        self.get_total_count = Some(true);
        self
    }

    /// Appends a criterion, chaining it to the previous one with AND
    /// unless the previous one already names an operator.
    pub fn with_criterion(mut self, criterion: SearchCriterion) -> Self {
        if let Some(last) = self.search_criteria.last_mut() {
            if last.logical_operator.is_none() {
                last.logical_operator = Some("AND".to_string());
            }
        }
        self.search_criteria.push(criterion);
        self
    }
}

/// A single search criterion for filtering list results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchCriterion {
    /// The field to filter on.
    pub field: String,

    /// The condition: "is", "is not", "contains", etc.
    pub condition: String,

    /// The value(s) to match.
    pub value: serde_json::Value,

    /// Logical operator to combine with next criterion: "AND" or "OR".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logical_operator: Option<String>,
}

impl SearchCriterion {
    /// Creates a criterion with an arbitrary condition.
    pub fn new(
        field: impl Into<String>,
        condition: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        Self {
            field: field.into(),
            condition: condition.into(),
            value: value.into(),
            logical_operator: None,
        }
    }

    /// Creates an "is" condition for exact matching.
    pub fn is(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, "is", serde_json::Value::String(value.into()))
    }

    /// Creates a "contains" condition for partial matching.
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, "contains", serde_json::Value::String(value.into()))
    }

    /// Chains with the next criterion using OR.
    pub fn or(mut self) -> Self {
        self.logical_operator = Some("OR".to_string());
        self
    }
}

/// Response status block returned by SDP.
///
/// The client hands back raw JSON; callers that want to branch on the
/// SDP status code can pull this block out with `from_response`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ResponseStatus {
    /// Status code: 2000 for success, 4000+ for errors.
    pub status_code: u32,

    /// Status string: "success" or "failed".
    #[serde(default)]
    pub status: String,

    /// Error messages (present on failure).
    #[serde(default)]
    pub messages: Vec<ResponseMessage>,
}

/// A single message in the response status.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ResponseMessage {
    /// The error or info message.
    #[serde(default)]
    pub message: String,

    /// Status code for this specific message.
    #[serde(default)]
    pub status_code: Option<u32>,

    /// Type of message.
    #[serde(rename = "type", default)]
    pub message_type: Option<String>,
}

impl ResponseStatus {
    /// Extracts `response_status` from a response body.
    ///
    /// List endpoints return the block as an array; the first entry is used.
    pub fn from_response(body: &serde_json::Value) -> Option<Self> {
        let status = body.get("response_status")?;
        let status = match status {
            serde_json::Value::Array(items) => items.first()?,
            other => other,
        };
        Self::deserialize(status).ok()
    }

    /// Returns true if the response indicates success.
    pub fn is_success(&self) -> bool {
        self.status_code == 2000
    }

    /// Returns the first message, if SDP sent one.
    pub fn first_message(&self) -> Option<&str> {
        self.messages.first().map(|m| m.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_list_info_skips_unset_fields() {
        let info = ListInfo::new().with_row_count(10);
        assert_eq!(serde_json::to_value(&info).unwrap(), json!({"row_count": 10}));
    }

    #[test]
    fn test_list_info_chains_criteria_with_and() {
        let info = ListInfo::new()
            .with_sort("created_time", "desc")
            .with_criterion(SearchCriterion::is("status.name", "Open"))
            .with_criterion(SearchCriterion::contains("subject", "printer"));

        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            json!({
                "sort_field": "created_time",
                "sort_order": "desc",
                "search_criteria": [
                    {"field": "status.name", "condition": "is", "value": "Open", "logical_operator": "AND"},
                    {"field": "subject", "condition": "contains", "value": "printer"}
                ]
            })
        );
    }

    #[test]
    fn test_list_info_keeps_explicit_or() {
        let info = ListInfo::new()
            .with_criterion(SearchCriterion::is("priority.name", "High").or())
            .with_criterion(SearchCriterion::is("priority.name", "Urgent"));
        assert_eq!(
            info.search_criteria[0].logical_operator.as_deref(),
            Some("OR")
        );
        assert_eq!(info.search_criteria[1].logical_operator, None);
    }

    #[test]
    fn test_response_status_from_object() {
        let body = json!({
            "response_status": {
                "status_code": 4000,
                "status": "failed",
                "messages": [{"status_code": 4001, "type": "failed", "message": "Invalid ID"}]
            }
        });
        let status = ResponseStatus::from_response(&body).unwrap();
        assert!(!status.is_success());
        assert_eq!(status.first_message(), Some("Invalid ID"));
        assert_eq!(status.messages[0].message_type.as_deref(), Some("failed"));
    }

    #[test]
    fn test_response_status_from_array() {
        let body = json!({
            "response_status": [{"status_code": 2000, "status": "success"}],
            "requests": []
        });
        let status = ResponseStatus::from_response(&body).unwrap();
        assert!(status.is_success());
        assert_eq!(status.first_message(), None);
    }

    #[test]
    fn test_response_status_missing() {
        assert_eq!(ResponseStatus::from_response(&json!({"requests": []})), None);
    }
}
