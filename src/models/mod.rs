//! Data models for ServiceDesk Plus API.
//!
//! This module contains the JSON envelopes sent as `input_data` for each
//! sub-resource (request, note, resolution, association), plus the list-info
//! descriptor and response status types.

mod association;
mod common;
mod note;
mod request;
mod resolution;

pub use association::*;
pub use common::*;
pub use note::*;
pub use request::*;
pub use resolution::*;
