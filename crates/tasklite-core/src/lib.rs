//! Core domain types for tasklite.

pub mod backend;
pub mod config;
pub mod mock;
pub mod remote;
pub mod session;
pub mod store;
pub mod task;

pub use backend::{AuthReceipt, Backend, BackendError, CreateReceipt, UpdateReceipt};
pub use mock::MockBackend;
pub use remote::RemoteBackend;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
