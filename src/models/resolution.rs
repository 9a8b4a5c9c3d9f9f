//! Resolution envelope for ServiceDesk Plus API.

use serde::Serialize;

/// Body of a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionInput<'a> {
    /// Resolution text (may contain HTML).
    pub content: &'a str,

    /// Whether to copy the resolution to linked requests. Only sent when adding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_to_linked_requests: Option<bool>,
}

/// `{"resolution": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionEnvelope<'a> {
    /// The resolution.
    pub resolution: ResolutionInput<'a>,
}

impl<'a> ResolutionEnvelope<'a> {
    /// Envelope for adding a resolution.
    pub fn add(content: &'a str, add_to_linked_requests: bool) -> Self {
        Self {
            resolution: ResolutionInput {
                content,
                add_to_linked_requests: Some(add_to_linked_requests),
            },
        }
    }

    /// Envelope for editing a resolution.
    pub fn edit(content: &'a str) -> Self {
        Self {
            resolution: ResolutionInput {
                content,
                add_to_linked_requests: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_add_resolution() {
        let value = serde_json::to_value(ResolutionEnvelope::add("Replaced toner", true)).unwrap();
        assert_eq!(
            value,
            json!({"resolution": {"content": "Replaced toner", "add_to_linked_requests": true}})
        );
    }

    #[test]
    fn test_edit_resolution() {
        let value = serde_json::to_value(ResolutionEnvelope::edit("Replaced drum")).unwrap();
        assert_eq!(value, json!({"resolution": {"content": "Replaced drum"}}));
    }
}
