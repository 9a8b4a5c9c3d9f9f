//! Endpoint table for the ServiceDesk Plus v3 API.
//!
//! Every convenience method on [`SdpClient`](crate::sdp_client::SdpClient)
//! is an [`Action`]: a path template plus an HTTP method. Placeholders in a
//! template (`{request_id}`, `{note_id}`, ...) always occupy a whole path
//! segment and are filled positionally.

use std::fmt;
use std::str::FromStr;

use reqwest::Method;

use crate::error::SdpError;

/// The HTTP methods accepted by the ServiceDesk Plus API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl ApiMethod {
    /// Returns the upper-case wire name of the method.
    pub fn as_str(self) -> &'static str {
        match self {
            ApiMethod::Get => "GET",
            ApiMethod::Post => "POST",
            ApiMethod::Put => "PUT",
            ApiMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the exact upper-case method names; anything else is
/// `SdpError::UnsupportedMethod`.
impl FromStr for ApiMethod {
    type Err = SdpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(ApiMethod::Get),
            "POST" => Ok(ApiMethod::Post),
            "PUT" => Ok(ApiMethod::Put),
            "DELETE" => Ok(ApiMethod::Delete),
            other => Err(SdpError::UnsupportedMethod(other.to_string())),
        }
    }
}

impl From<ApiMethod> for Method {
    fn from(method: ApiMethod) -> Self {
        match method {
            ApiMethod::Get => Method::GET,
            ApiMethod::Post => Method::POST,
            ApiMethod::Put => Method::PUT,
            ApiMethod::Delete => Method::DELETE,
        }
    }
}

/// A path template and the method used to call it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// HTTP method for the endpoint.
    pub method: ApiMethod,
    /// Path relative to `api/v3/`, without a leading slash.
    pub template: &'static str,
}

impl Route {
    /// Number of `{placeholder}` segments in the template.
    pub fn param_count(&self) -> usize {
        self.template
            .split('/')
            .filter(|segment| segment.starts_with('{'))
            .count()
    }

    /// Fills the template's placeholders with `params`, in order.
    ///
    /// Each parameter is percent-encoded, so a `/` inside it cannot add
    /// segments. `.` and `..` pass through unchanged and are resolved by the
    /// URL parser, which drops or pops a segment; identifiers are not
    /// validated.
    pub(crate) fn render(&self, action: &'static str, params: &[&str]) -> Result<String, SdpError> {
        let expected = self.param_count();
        if params.len() != expected {
            return Err(SdpError::PathParams {
                action,
                expected,
                got: params.len(),
            });
        }

        let mut params = params.iter();
        let segments: Vec<String> = self
            .template
            .split('/')
            .map(|segment| {
                if segment.starts_with('{') {
                    params
                        .next()
                        .map(|p| urlencoding::encode(p).into_owned())
                        .unwrap_or_default()
                } else {
                    segment.to_string()
                }
            })
            .collect();

        Ok(segments.join("/"))
    }
}

macro_rules! actions {
    ($( $(#[$doc:meta])* $variant:ident => $name:literal, $method:ident, $template:literal; )*) => {
        /// A named operation on the ServiceDesk Plus API.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Action {
            $( $(#[$doc])* $variant, )*
        }

        impl Action {
            /// Every action in the table.
            pub const ALL: &'static [Action] = &[ $( Action::$variant, )* ];

            /// The snake_case name of the action.
            pub fn name(self) -> &'static str {
                match self {
                    $( Action::$variant => $name, )*
                }
            }

            /// The endpoint this action is sent to.
            pub fn route(self) -> Route {
                match self {
                    $( Action::$variant => Route {
                        method: ApiMethod::$method,
                        template: $template,
                    }, )*
                }
            }
        }
    };
}

actions! {
    /// View a single request.
    RequestView => "request_view", Get, "requests/{request_id}";
    /// List requests filtered by a list-info descriptor.
    RequestViewAll => "request_view_all", Get, "requests";
    /// Create a request.
    RequestAdd => "request_add", Post, "requests";
    /// Edit a request's fields.
    RequestEdit => "request_edit", Put, "requests/{request_id}";
    /// Move a request to the trash.
    RequestDelete => "request_delete", Delete, "requests/{request_id}/move_to_trash";
    /// Permanently delete a trashed request.
    RequestDeleteFromTrash => "request_delete_from_trash", Delete, "requests/{request_id}";
    /// Restore a trashed request.
    RequestRestoreFromTrash => "request_restore_from_trash", Put, "requests/{request_id}/restore_from_trash";
    /// Close a request.
    RequestClose => "request_close", Put, "requests/{request_id}/close";
    /// Assign a request to the calling technician.
    RequestPickup => "request_pickup", Put, "requests/{request_id}/pickup";
    /// Assign a request to a group and technician.
    RequestAssign => "request_assign", Put, "requests/{request_id}/assign";
    /// Get a request's resolution.
    RequestGetResolution => "request_get_resolution", Get, "requests/{request_id}/resolutions";
    /// Add a resolution.
    RequestAddResolution => "request_add_resolution", Post, "requests/{request_id}/resolutions";
    /// Edit a resolution.
    RequestEditResolution => "request_edit_resolution", Put, "requests/{request_id}/resolutions";
    /// Get a request's summary.
    RequestGetSummary => "request_get_summary", Get, "requests/{request_id}/summary";
    /// Associate a problem.
    RequestAssociateProblem => "request_associate_problem", Post, "requests/{request_id}/problem";
    /// Get the associated problem.
    RequestGetProblem => "request_get_problem", Get, "requests/{request_id}/problem";
    /// Dissociate a problem.
    RequestDissociateProblem => "request_dissociate_problem", Delete, "requests/{request_id}/problem";
    /// Associate a change initiated by the request.
    RequestAssociateInitiatedChange => "request_associate_initiated_change", Post, "requests/{request_id}/request_initiated_change";
    /// Get the initiated change.
    RequestGetInitiatedChange => "request_get_initiated_change", Get, "requests/{request_id}/request_initiated_change";
    /// Dissociate an initiated change.
    RequestDissociateInitiatedChange => "request_dissociate_initiated_change", Delete, "requests/{request_id}/request_initiated_change";
    /// Associate the change that caused the request.
    RequestAssociateCausedByChange => "request_associate_caused_by_change", Post, "requests/{request_id}/request_caused_by_change";
    /// Get the causing change.
    RequestGetCausedByChange => "request_get_caused_by_change", Get, "requests/{request_id}/request_caused_by_change";
    /// Dissociate a causing change.
    RequestDissociateCausedByChange => "request_dissociate_caused_by_change", Delete, "requests/{request_id}/request_caused_by_change";
    /// Link another request.
    RequestLinkRequest => "request_link_request", Post, "requests/{request_id}/link_requests";
    /// List linked requests.
    RequestGetLinkedRequests => "request_get_linked_requests", Get, "requests/{request_id}/link_requests";
    /// Unlink a request.
    RequestUnlinkRequest => "request_unlink_request", Delete, "requests/{request_id}/link_requests";
    /// Add a note.
    RequestAddNote => "request_add_note", Post, "requests/{request_id}/notes";
    /// Edit a note.
    RequestEditNote => "request_edit_note", Put, "requests/{request_id}/notes/{note_id}";
    /// View a note.
    RequestViewNote => "request_view_note", Get, "requests/{request_id}/notes/{note_id}";
    /// Delete a note.
    RequestDeleteNote => "request_delete_note", Delete, "requests/{request_id}/notes/{note_id}";
    /// History of any entity type, e.g. `problems/7/history`.
    EntityViewHistory => "entity_view_history", Get, "{entity}/{entity_id}/history";
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_method_from_str() {
        assert_eq!("GET".parse::<ApiMethod>().unwrap(), ApiMethod::Get);
        assert_eq!("POST".parse::<ApiMethod>().unwrap(), ApiMethod::Post);
        assert_eq!("PUT".parse::<ApiMethod>().unwrap(), ApiMethod::Put);
        assert_eq!("DELETE".parse::<ApiMethod>().unwrap(), ApiMethod::Delete);
    }

    #[test]
    fn test_method_from_str_rejects_unknown() {
        for raw in ["PATCH", "get", "", "HEAD"] {
            let err = raw.parse::<ApiMethod>().unwrap_err();
            assert!(matches!(err, SdpError::UnsupportedMethod(ref m) if m == raw));
        }
    }

    #[test]
    fn test_render_single_param() {
        let path = Action::RequestDelete.route().render("request_delete", &["42"]).unwrap();
        assert_eq!(path, "requests/42/move_to_trash");
    }

    #[test]
    fn test_render_two_params() {
        let path = Action::RequestViewNote
            .route()
            .render("request_view_note", &["42", "9"])
            .unwrap();
        assert_eq!(path, "requests/42/notes/9");

        let path = Action::EntityViewHistory
            .route()
            .render("entity_view_history", &["problems", "7"])
            .unwrap();
        assert_eq!(path, "problems/7/history");
    }

    #[test]
    fn test_render_encodes_params() {
        let path = Action::RequestView
            .route()
            .render("request_view", &["../admin"])
            .unwrap();
        assert_eq!(path, "requests/..%2Fadmin");
    }

    #[test]
    fn test_render_leaves_dot_segments_unencoded() {
        let path = Action::RequestView
            .route()
            .render("request_view", &[".."])
            .unwrap();
        assert_eq!(path, "requests/..");

        let path = Action::RequestDeleteNote
            .route()
            .render("request_delete_note", &["42", "."])
            .unwrap();
        assert_eq!(path, "requests/42/notes/.");
    }

    #[test]
    fn test_render_rejects_wrong_param_count() {
        let err = Action::RequestViewNote
            .route()
            .render("request_view_note", &["42"])
            .unwrap_err();
        assert!(matches!(
            err,
            SdpError::PathParams { expected: 2, got: 1, .. }
        ));
    }

    #[test]
    fn test_action_names_are_unique() {
        let names: HashSet<_> = Action::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(names.len(), Action::ALL.len());
    }

    #[test]
    fn test_no_template_has_leading_slash() {
        for action in Action::ALL {
            assert!(!action.route().template.starts_with('/'), "{}", action);
        }
    }

    #[test]
    fn test_table_entries() {
        let cases = [
            (Action::RequestView, ApiMethod::Get, "requests/{request_id}"),
            (Action::RequestAdd, ApiMethod::Post, "requests"),
            (Action::RequestAssign, ApiMethod::Put, "requests/{request_id}/assign"),
            (Action::RequestDeleteFromTrash, ApiMethod::Delete, "requests/{request_id}"),
            (
                Action::RequestDissociateCausedByChange,
                ApiMethod::Delete,
                "requests/{request_id}/request_caused_by_change",
            ),
        ];
        for (action, method, template) in cases {
            assert_eq!(action.route(), Route { method, template });
        }
    }
}
