//! Application services (use-cases).

pub mod snapshot_service;
