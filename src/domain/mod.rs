//! Shared data model layer (structs/constants only).
//!
//! ## Files
//! - `models.rs` — request/response payloads, trigger metadata, run report.
//! - `constants.rs` — header names, output names, bot identity, commit text.
//! - `errors.rs` — relay and publish failure taxonomy.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! `ScanRequest` is the wire payload of the analysis API. Field renames here
//! are protocol changes.

pub mod constants;
pub mod errors;
pub mod models;
