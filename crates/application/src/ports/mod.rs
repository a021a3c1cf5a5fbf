//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the request pipeline and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod loading;
mod navigator;
mod notifier;
mod page;
mod sort;
mod storage;
mod transport;

pub use loading::{LoadingHandle, LoadingIndicator};
pub use navigator::Navigator;
pub use notifier::{ConfirmDialog, Notifier};
pub use page::PageState;
pub use sort::SortSerializer;
pub use storage::TokenStorage;
pub use transport::{Transport, TransportRequest};
