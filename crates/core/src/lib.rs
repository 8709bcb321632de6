//! Domain types for the room-redesign job client.
//!
//! Pure logic only: job status and phase modeling, request validation,
//! and the artifact-path naming convention. All I/O lives in
//! `furnish-client`.

pub mod error;
pub mod job;
pub mod naming;
pub mod request;
pub mod types;
