//! # groupboard-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Receive device readings (`POST /api/data`)
//! - Serve the **dashboard JSON API** polled by dashboards
//!   (`/api/dashboard`, `/api/group/{group_id}`)
//! - Serve a **server-side-rendered HTML dashboard** at `/` and `/dashboard`
//!   that works with **zero JavaScript**: the same status cards the poller
//!   renders, plus `<meta http-equiv="refresh">` for live updates
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results into HTTP responses (JSON or HTML)
//!
//! ## Dependency rule
//! Depends on `groupboard-app` (for port traits and services) and
//! `groupboard-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;
