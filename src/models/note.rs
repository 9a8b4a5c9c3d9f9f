//! Note envelopes for ServiceDesk Plus API.
//!
//! Notes are comments attached to a request. Adding a note sends all four
//! visibility/notification flags; editing sends only the first two.

use serde::Serialize;

/// Visibility and notification flags for a new note.
///
/// All flags default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteFlags {
    /// Whether the requester can see the note.
    pub show_to_requester: bool,
    /// Whether to notify the assigned technician.
    pub notify_technician: bool,
    /// Whether the note counts as the first response.
    pub mark_first_response: bool,
    /// Whether the note is copied to linked requests.
    pub add_to_linked_requests: bool,
}

impl NoteFlags {
    /// Creates flags with everything off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to show the note to the requester.
    pub fn with_show_to_requester(mut self, show: bool) -> Self {
        self.show_to_requester = show;
        self
    }

    /// Sets whether to notify the assigned technician.
    pub fn with_notify_technician(mut self, notify: bool) -> Self {
        self.notify_technician = notify;
        self
    }

    /// Sets whether the note marks the first response.
    pub fn with_mark_first_response(mut self, mark: bool) -> Self {
        self.mark_first_response = mark;
        self
    }

    /// Sets whether the note is added to linked requests.
    pub fn with_add_to_linked_requests(mut self, add: bool) -> Self {
        self.add_to_linked_requests = add;
        self
    }
}

/// Body of a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteInput<'a> {
    /// The note content (may contain HTML).
    pub description: &'a str,

    /// Whether to show the note to the requester.
    pub show_to_requester: bool,

    /// Whether to notify the assigned technician.
    pub notify_technician: bool,

    /// Only sent when adding a note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark_first_response: Option<bool>,

    /// Only sent when adding a note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_to_linked_requests: Option<bool>,
}

/// `{"request_note": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteEnvelope<'a> {
    /// The note.
    pub request_note: NoteInput<'a>,
}

impl<'a> NoteEnvelope<'a> {
    /// Envelope for adding a note.
    pub fn add(description: &'a str, flags: NoteFlags) -> Self {
        Self {
            request_note: NoteInput {
                description,
                show_to_requester: flags.show_to_requester,
                notify_technician: flags.notify_technician,
                mark_first_response: Some(flags.mark_first_response),
                add_to_linked_requests: Some(flags.add_to_linked_requests),
            },
        }
    }

    /// Envelope for editing a note.
    pub fn edit(description: &'a str, show_to_requester: bool, notify_technician: bool) -> Self {
        Self {
            request_note: NoteInput {
                description,
                show_to_requester,
                notify_technician,
                mark_first_response: None,
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
    fn test_add_note_defaults_all_flags_false() {
        let value = serde_json::to_value(NoteEnvelope::add("Rebooted", NoteFlags::new())).unwrap();
        assert_eq!(
            value,
            json!({"request_note": {
                "description": "Rebooted",
                "show_to_requester": false,
                "notify_technician": false,
                "mark_first_response": false,
                "add_to_linked_requests": false
            }})
        );
    }

    #[test]
    fn test_add_note_flags_are_independent() {
        let flags = NoteFlags::new()
            .with_notify_technician(true)
            .with_add_to_linked_requests(true);
        let value = serde_json::to_value(NoteEnvelope::add("x", flags)).unwrap();
        let note = &value["request_note"];
        assert_eq!(note["show_to_requester"], false);
        assert_eq!(note["notify_technician"], true);
        assert_eq!(note["mark_first_response"], false);
        assert_eq!(note["add_to_linked_requests"], true);
    }

    #[test]
    fn test_edit_note_omits_add_only_flags() {
        let value = serde_json::to_value(NoteEnvelope::edit("Updated", true, false)).unwrap();
        assert_eq!(
            value,
            json!({"request_note": {
                "description": "Updated",
                "show_to_requester": true,
                "notify_technician": false
            }})
        );
    }
}
