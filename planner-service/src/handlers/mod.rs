//! HTTP handlers for the planner service.

pub mod app;
pub mod health;
pub mod metrics;
pub mod plan;
pub mod policy;
