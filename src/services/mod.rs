//! Service layer containing the relay logic and its side-effect helpers.
//!
//! ## Service map
//! - `relay.rs` — the end-to-end run: inputs, exchange, outputs, write-back.
//! - `instructions.rs` — scan-result loading and instruction file resolution.
//! - `api.rs` — the single POST to the analysis API and response validation.
//! - `publisher.rs` — git commit/push of the updated instruction file.
//! - `context.rs` — runner inputs, outputs, logging and failure reporting.
//! - `output.rs` — workflow-command and output-file formatting.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Host and git access go through `ActionContext` / `GitRunner` so tests can fake them.

pub mod api;
pub mod context;
pub mod instructions;
pub mod output;
pub mod publisher;
pub mod relay;
