//! Courier Domain - Core request pipeline types
//!
//! This crate defines the domain model for the Courier request pipeline.
//! All types here are pure Rust with no I/O dependencies.

pub mod catalog;
pub mod error;
pub mod failure;
pub mod id;
pub mod page;
pub mod request;
pub mod settings;
pub mod sort;

pub use catalog::EndpointCatalog;
pub use error::{DomainError, DomainResult};
pub use failure::{ErrorCategory, NormalizedError, TransportFailure};
pub use id::generate_call_id;
pub use page::Pagination;
pub use request::{
    EndpointDescriptor, HttpMethod, Payload, RoutedPayload, encode_query, filter_empty, route,
    synthesize_url,
};
pub use settings::{ClientSettings, Messages};
pub use sort::{SortDirection, SortOrder, SortSpec};
