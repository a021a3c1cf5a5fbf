//! Request construction: verbs, endpoint descriptors, payload routing and
//! query encoding.

mod endpoint;
mod method;
mod payload;
mod query;

pub use endpoint::{EndpointDescriptor, synthesize_url};
pub use method::HttpMethod;
pub use payload::{Payload, RoutedPayload, filter_empty, route};
pub use query::encode_query;
