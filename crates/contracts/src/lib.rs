//! Shared types and the pure KPI engine.
//!
//! Everything in this crate is free of I/O so it can be compiled for the
//! browser as well as for the backend.

pub mod domain;
pub mod shared;
pub mod usecases;
