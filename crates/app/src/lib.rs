//! # groupboard-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SnapshotRepository` — append & query group snapshots
//!   - `DashboardSource` — fetch the current dashboard response
//!   - `DashboardView` — the three-slot rendering target
//!   - `Clock` — the current time
//! - Define **driving/inbound** use-cases:
//!   - `SnapshotService` — ingest readings, list latest per group, group history
//!   - `DashboardPoller` — poll, classify, and render on a fixed cadence
//! - Provide **in-process infrastructure** that doesn't need IO
//!   (card rendering, in-memory page)
//!
//! ## Dependency rule
//! Depends on `groupboard-domain` only (plus `tokio` for timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod page;
pub mod poller;
pub mod ports;
pub mod render;
pub mod services;
