//! Request (ticket) envelopes for ServiceDesk Plus API.
//!
//! Request fields are passed through untouched; these types only supply
//! the top-level keys SDP expects.

use serde::Serialize;

use super::NamedRef;

/// `{"request": <fields>}` used by create and edit.
#[derive(Debug, Serialize)]
pub struct RequestEnvelope<'a, T: ?Sized + Serialize> {
    /// Request fields, serialized verbatim.
    pub request: &'a T,
}

/// `{"list_info": <descriptor>}` used by the list endpoint.
#[derive(Debug, Serialize)]
pub struct ListInfoEnvelope<'a, T: ?Sized + Serialize> {
    /// Filter/sort/pagination descriptor, serialized verbatim.
    pub list_info: &'a T,
}

/// Group and technician for the assign endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assignment<'a> {
    /// Support group to assign to.
    pub group: NamedRef<'a>,
    /// Technician to assign to.
    pub technician: NamedRef<'a>,
}

/// `{"request": {"group": {...}, "technician": {...}}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssignEnvelope<'a> {
    /// The assignment.
    pub request: Assignment<'a>,
}

impl<'a> AssignEnvelope<'a> {
    /// Assigns to the named group and technician.
    pub fn new(group: &'a str, technician: &'a str) -> Self {
        Self {
            request: Assignment {
                group: NamedRef { name: group },
                technician: NamedRef { name: technician },
            },
        }
    }
}
