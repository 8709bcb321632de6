//! HTTP job client for the room-redesign backend.
//!
//! Provides the REST API wrapper, the swappable [`source::JobSource`]
//! seam with live and mock implementations, the cancellable polling
//! loop, and the [`controller::RedesignController`] that drives one
//! submission flow end to end.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod mock;
pub mod poller;
pub mod source;

pub use api::RedesignApi;
pub use config::ClientConfig;
pub use controller::{RedesignController, RedesignOutcome};
pub use error::{ClientError, ClientResult};
pub use mock::MockJobSource;
pub use poller::{BackoffConfig, PollConfig};
pub use source::JobSource;
