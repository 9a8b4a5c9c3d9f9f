//! # sdp-api
//!
//! Client binding for the ManageEngine ServiceDesk Plus v3 REST API:
//! requests (tickets), their notes, resolutions, links, and associations
//! with problems and changes.
//!
//! Every operation is one HTTP round trip built from the same template:
//!
//! - URL: `<base_url>/api/v3/<endpoint>`
//! - Auth: `Authtoken` header and `TECHNICIAN_KEY` query parameter
//! - Input: JSON-encoded into the `input_data` query parameter
//! - Output: the response body as a `serde_json::Value`
//!
//! ## Architecture
//!
//! - [`config`] - Client configuration and environment loading
//! - [`error`] - Error types with API-key sanitization
//! - [`endpoints`] - The action table: path template and method per operation
//! - [`models`] - Typed `input_data` envelopes per sub-resource
//! - [`sdp_client`] - The HTTP client and its convenience methods
//!
//! ## Example
//!
//! ```ignore
//! use sdp_api::models::{ListInfo, NoteFlags, SearchCriterion};
//! use sdp_api::SdpClient;
//! use serde_json::json;
//!
//! async fn example() -> Result<(), sdp_api::SdpError> {
//!     let client = SdpClient::from_parts("technician-key", "https://sdp.example.com/")?;
//!
//!     let created = client.request_add(&json!({"subject": "VPN down"})).await?;
//!     let id = created["request"]["id"].as_str().unwrap_or_default();
//!
//!     client.request_assign(id, "Network", "Jane").await?;
//!     client
//!         .request_add_note(id, "Looking into it", NoteFlags::new().with_show_to_requester(true))
//!         .await?;
//!
//!     let open = ListInfo::new()
//!         .with_row_count(25)
//!         .with_criterion(SearchCriterion::is("status.name", "Open"));
//!     let page = client.request_view_all(&open).await?;
//!     println!("{}", page);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Security Considerations
//!
//! The API key is sent in the query string as the upstream API requires.
//! It is never logged, `Debug` output redacts it, and
//! [`SdpError::sanitized_display`] strips it from error messages.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod sdp_client;

pub use config::Config;
pub use endpoints::{Action, ApiMethod};
pub use error::SdpError;
pub use sdp_client::SdpClient;
