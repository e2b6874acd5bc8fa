//! Normalizer for GitHub issue/PR activity timelines.
//!
//! The GraphQL timeline of an issue or pull request is a heterogeneous
//! sequence of ~25 event shapes, many of them recursively polymorphic. This
//! crate decodes a raw response page into a single uniform, ordered
//! [`model::ActivityModel`] that downstream tooling can consume without
//! knowing anything about the API's type system: unknown event shapes
//! degrade to a raw-payload variant instead of failing, and every bounded
//! collection that hits its 100-item cap is flagged as truncated.

pub mod actor;
pub mod assemble;
pub mod config;
pub mod error;
pub mod event;
pub mod fetch;
pub mod http;
pub mod model;
pub mod page;
pub mod queries;

pub use error::{DecodeError, Error, Result};
pub use model::{ActivityModel, EventKind, SubjectKind, TimelineEvent};
