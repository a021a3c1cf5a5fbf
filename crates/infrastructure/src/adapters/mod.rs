//! Adapters implementing the application ports.

mod memory_storage;
mod presentation;
mod reqwest_transport;
mod sort;

pub use memory_storage::InMemoryStorage;
pub use presentation::{TracingLoadingIndicator, TracingNavigator, TracingNotifier};
pub use reqwest_transport::{ReqwestTransport, TransportSetupError};
pub use sort::SpringSortSerializer;
