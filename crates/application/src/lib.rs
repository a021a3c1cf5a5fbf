//! Courier Application - Request pipeline
//!
//! This crate turns a [`RequestOptions`] into one transport call and
//! delivers its outcome on a [`ResultChannel`]. Everything outside the
//! pipeline (HTTP, storage, dialogs, routing) is reached through the
//! traits in [`ports`].

pub mod channel;
pub mod classifier;
pub mod dispatcher;
pub mod error;
pub mod headers;
pub mod page;
pub mod ports;
pub mod session;

pub use channel::{AbandonReason, CallOutcome, ChannelState, ResultChannel};
pub use classifier::{ErrorClassifier, StatusRule, Verdict};
pub use dispatcher::{Dispatcher, DispatcherPorts, RequestOptions};
pub use error::{ApplicationError, ApplicationResult};
pub use headers::{HeaderComposer, Headers};
pub use page::SharedPage;
pub use session::SessionState;
