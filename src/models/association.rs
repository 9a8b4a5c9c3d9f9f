//! Association and link envelopes for ServiceDesk Plus API.
//!
//! A request can be associated with a problem, with a change it initiated,
//! or with a change that caused it. Each association kind has its own
//! envelope key; associate and dissociate send the same body.

use serde::Serialize;

use super::IdRef;

/// `{"problem": {"id": ...}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProblemRef<'a> {
    /// The associated problem.
    pub problem: IdRef<'a>,
}

/// `{"change": {"id": ...}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangeRef<'a> {
    /// The associated change.
    pub change: IdRef<'a>,
}

/// `{"request_problem_association": {"problem": {"id": ...}}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProblemAssociationEnvelope<'a> {
    /// The association.
    pub request_problem_association: ProblemRef<'a>,
}

impl<'a> ProblemAssociationEnvelope<'a> {
    /// Envelope referencing `problem_id`.
    pub fn new(problem_id: &'a str) -> Self {
        Self {
            request_problem_association: ProblemRef {
                problem: IdRef { id: problem_id },
            },
        }
    }
}

/// `{"request_initiated_change": {"change": {"id": ...}}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InitiatedChangeEnvelope<'a> {
    /// The association.
    pub request_initiated_change: ChangeRef<'a>,
}

impl<'a> InitiatedChangeEnvelope<'a> {
    /// Envelope referencing `change_id`.
    pub fn new(change_id: &'a str) -> Self {
        Self {
            request_initiated_change: ChangeRef {
                change: IdRef { id: change_id },
            },
        }
    }
}

/// `{"request_caused_by_change": {"change": {"id": ...}}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CausedByChangeEnvelope<'a> {
    /// The association.
    pub request_caused_by_change: ChangeRef<'a>,
}

impl<'a> CausedByChangeEnvelope<'a> {
    /// Envelope referencing `change_id`.
    pub fn new(change_id: &'a str) -> Self {
        Self {
            request_caused_by_change: ChangeRef {
                change: IdRef { id: change_id },
            },
        }
    }
}

/// One entry of a link/unlink call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkRequest<'a> {
    /// The request on the other end of the link.
    pub linked_request: IdRef<'a>,

    /// Comment stored with the link. Not sent when unlinking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<&'a str>,
}

/// `{"link_requests": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRequestsEnvelope<'a> {
    /// Links to create or remove.
    pub link_requests: Vec<LinkRequest<'a>>,
}

impl<'a> LinkRequestsEnvelope<'a> {
    /// Envelope linking `linked_request_id`; a missing comment is sent as `""`.
    pub fn link(linked_request_id: &'a str, comments: Option<&'a str>) -> Self {
        Self {
            link_requests: vec![LinkRequest {
                linked_request: IdRef {
                    id: linked_request_id,
                },
                comments: Some(comments.unwrap_or("")),
            }],
        }
    }

    /// Envelope unlinking `linked_request_id`.
    pub fn unlink(linked_request_id: &'a str) -> Self {
        Self {
            link_requests: vec![LinkRequest {
                linked_request: IdRef {
                    id: linked_request_id,
                },
                comments: None,
            }],
        }
    }
}
