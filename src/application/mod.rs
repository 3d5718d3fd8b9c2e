//! Application layer: lookup orchestration logic.

pub mod services;
