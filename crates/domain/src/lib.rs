//! # groupboard-domain
//!
//! Pure domain model for the groupboard sensor dashboard.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps and unix-seconds helpers
//! - Define **Snapshots** (one reported state of a group: timestamp + sensor readings)
//! - Define the **Dashboard response** exchanged between server and pollers
//! - Define the **Recency policies** that classify a group as online or offline
//! - Format sensor values for display
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod dashboard;
pub mod recency;
pub mod snapshot;
